use aoi_quadtree::{Aoi, AoiError, Bounds, Config, EntityKey, QuadTree, SplitEligibility};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

fn key(name: &str) -> EntityKey {
    Arc::from(name)
}

fn sorted(mut keys: Vec<EntityKey>) -> Vec<EntityKey> {
    keys.sort();
    keys
}

fn scenario_tree() -> QuadTree {
    QuadTree::new_with_config(
        Bounds::new(0.0, 0.0, 100.0).unwrap(),
        Config {
            max_capacity: 2,
            radius: 5.0,
            ..Config::default()
        },
    )
    .unwrap()
}

#[test]
fn test_search_after_splits() {
    let qt = scenario_tree();
    qt.insert(60.9, 24.9, key("player1")).unwrap();
    qt.insert(25.0, 25.0, key("player2")).unwrap();
    assert_eq!(qt.search(60.9, 24.9).unwrap().len(), 2);

    // A third player overflows the root and splits it.
    qt.insert(99.0, 24.0, key("player3")).unwrap();
    assert_eq!(
        sorted(qt.search(60.9, 24.9).unwrap()),
        vec![key("player1"), key("player3")]
    );

    // The north-east quadrant overflows next.
    qt.insert(72.0, 23.0, key("player4")).unwrap();
    assert_eq!(
        sorted(qt.search(60.9, 24.9).unwrap()),
        vec![key("player1"), key("player4")]
    );
    assert_eq!(qt.search(25.0, 25.0).unwrap(), vec![key("player2")]);

    qt.insert(49.9, 49.9, key("player5")).unwrap();
    assert_eq!(
        sorted(qt.search(25.0, 25.0).unwrap()),
        vec![key("player2"), key("player5")]
    );

    qt.remove(49.9, 49.9, "player5").unwrap();
    assert_eq!(qt.search(25.0, 25.0).unwrap(), vec![key("player2")]);
    assert_eq!(qt.len(), 4);
}

#[test]
fn test_exactly_one_split() {
    let qt = scenario_tree();
    qt.insert(10.0, 10.0, key("a")).unwrap();
    qt.insert(20.0, 20.0, key("b")).unwrap();
    assert_eq!(qt.stats().branch_nodes, 0);
    qt.insert(80.0, 80.0, key("c")).unwrap();

    let stats = qt.stats();
    assert_eq!(stats.branch_nodes, 1);
    assert_eq!(stats.leaf_nodes, 4);
    assert_eq!(stats.entities, 3);
    assert_eq!(stats.max_depth, 2);

    let mut bounds = Vec::new();
    qt.node_bounds(&mut bounds);
    assert_eq!(bounds.len(), 5);
    assert_eq!(bounds[0], qt.bounds());
}

#[test]
fn test_search_near_quadrant_boundary() {
    let qt = scenario_tree();
    qt.insert(10.0, 10.0, key("nw")).unwrap();
    qt.insert(60.0, 10.0, key("ne")).unwrap();
    qt.insert(10.0, 60.0, key("sw")).unwrap();
    qt.insert(60.0, 60.0, key("se")).unwrap();
    assert_eq!(qt.stats().branch_nodes, 1);

    // Window [44, 54]² touches all four quadrants.
    assert_eq!(
        sorted(qt.search(49.0, 49.0).unwrap()),
        vec![key("ne"), key("nw"), key("se"), key("sw")]
    );
    // Window [43, 53] x [5, 15] touches only the northern pair.
    assert_eq!(
        sorted(qt.search(48.0, 10.0).unwrap()),
        vec![key("ne"), key("nw")]
    );
    // Deep inside one quadrant only that leaf is returned.
    assert_eq!(qt.search(10.0, 10.0).unwrap(), vec![key("nw")]);
    assert_eq!(qt.search(90.0, 90.0).unwrap(), vec![key("se")]);
}

#[test]
fn test_leaf_results_are_not_clipped() {
    let qt = scenario_tree();
    qt.insert(1.0, 1.0, key("far")).unwrap();
    // The root is still a single leaf; every resident comes back.
    assert_eq!(qt.search(90.0, 90.0).unwrap(), vec![key("far")]);
}

#[test]
fn test_insert_is_idempotent() {
    let qt = scenario_tree();
    qt.insert(30.0, 30.0, key("a")).unwrap();
    qt.insert(30.0, 30.0, key("a")).unwrap();
    assert_eq!(qt.len(), 1);
    assert_eq!(qt.search(30.0, 30.0).unwrap(), vec![key("a")]);
}

#[test]
fn test_remove_absent_key_is_noop() {
    let qt = scenario_tree();
    qt.insert(30.0, 30.0, key("a")).unwrap();
    qt.remove(30.0, 30.0, "b").unwrap();
    assert_eq!(qt.len(), 1);
    assert!(QuadTree::new(Bounds::new(0.0, 0.0, 10.0).unwrap())
        .unwrap()
        .search(5.0, 5.0)
        .unwrap()
        .is_empty());
}

#[test]
fn test_out_of_bounds_is_rejected() {
    let qt = scenario_tree();
    qt.insert(30.0, 30.0, key("a")).unwrap();

    assert!(matches!(
        qt.insert(100.0, 30.0, key("b")),
        Err(AoiError::OutOfBounds { .. })
    ));
    assert!(matches!(
        qt.insert(-0.5, 30.0, key("b")),
        Err(AoiError::OutOfBounds { .. })
    ));
    assert!(matches!(
        qt.remove(f64::NAN, 30.0, "a"),
        Err(AoiError::OutOfBounds { .. })
    ));
    assert!(matches!(
        qt.search(30.0, 250.0),
        Err(AoiError::OutOfBounds { .. })
    ));
    assert_eq!(qt.len(), 1);
    assert_eq!(qt.search(30.0, 30.0).unwrap(), vec![key("a")]);
}

#[test]
fn test_invalid_config() {
    let bounds = Bounds::new(0.0, 0.0, 100.0).unwrap();
    let invalid = [
        Config {
            max_capacity: 0,
            ..Config::default()
        },
        Config {
            max_depth: 0,
            ..Config::default()
        },
        Config {
            radius: -1.0,
            ..Config::default()
        },
        Config {
            radius: f64::NAN,
            ..Config::default()
        },
    ];
    for config in invalid {
        assert!(QuadTree::new_with_config(bounds, config).is_err());
    }
    let bad_bounds = Bounds {
        x: 0.0,
        y: 0.0,
        width: 0.0,
    };
    assert!(matches!(
        QuadTree::new(bad_bounds),
        Err(AoiError::InvalidBounds { .. })
    ));
}

#[test]
fn test_random_entities_are_found_then_gone() {
    let bounds = Bounds::new(0.0, 0.0, 1000.0).unwrap();
    let qt = QuadTree::new_with_config(
        bounds,
        Config {
            max_capacity: 8,
            max_depth: 6,
            split_eligibility: SplitEligibility::Anywhere,
            ..Config::default()
        },
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let entities: Vec<(f64, f64, EntityKey)> = (0..500)
        .map(|i| {
            let (x, y) = bounds.random_point(&mut rng);
            (x, y, key(&format!("player{}", i)))
        })
        .collect();
    for (x, y, k) in &entities {
        qt.insert(*x, *y, k.clone()).unwrap();
    }
    assert_eq!(qt.len(), entities.len());

    let mut results = Vec::new();
    for (x, y, k) in &entities {
        results.clear();
        qt.search_into(*x, *y, &mut results).unwrap();
        assert!(results.contains(k));
        let unique: HashSet<_> = results.iter().collect();
        assert_eq!(unique.len(), results.len());
    }

    for (x, y, k) in entities.iter().filter(|_| rng.gen_bool(0.5)) {
        qt.remove(*x, *y, k).unwrap();
        assert!(!qt.search(*x, *y).unwrap().contains(k));
    }
}

#[test]
fn test_search_pooled_recycles_buffer() {
    let qt = scenario_tree();
    qt.insert(30.0, 30.0, key("a")).unwrap();
    {
        let results = qt.search_pooled(30.0, 30.0).unwrap();
        assert_eq!(*results, vec![key("a")]);
    }
    assert_eq!(qt.result_pool().len(), 1);
    let results = qt.search_pooled(90.0, 90.0).unwrap();
    assert_eq!(results.len(), 1);
}

#[test]
fn test_concurrent_churn() {
    let bounds = Bounds::new(0.0, 0.0, 100.0).unwrap();
    let qt = QuadTree::new_with_config(
        bounds,
        Config {
            max_capacity: 3,
            ..Config::default()
        },
    )
    .unwrap();
    let aoi: &dyn Aoi = &qt;

    (0..30_000u64).into_par_iter().for_each(|i| {
        let mut rng = StdRng::seed_from_u64(i);
        let x = rng.gen_range(0..5) as f64 * 10.0;
        let y = rng.gen_range(0..5) as f64 * 10.0;
        let name = format!("player{}", rng.gen_range(0..50));
        match i % 3 {
            0 => aoi.insert(x, y, Arc::from(name)).unwrap(),
            1 => aoi.remove(x, y, &name).unwrap(),
            _ => {
                aoi.search(x, y).unwrap();
            }
        }
    });

    // Each key lives at up to 25 positions, and each position in one leaf.
    assert!(qt.len() <= 50 * 25);
}

#[test]
fn test_insert_is_visible_to_search_during_splits() {
    let bounds = Bounds::new(0.0, 0.0, 1000.0).unwrap();
    for round in 0..5u64 {
        let qt = QuadTree::new_with_config(
            bounds,
            Config {
                max_capacity: 4,
                max_depth: 8,
                radius: 1.0,
                ..Config::default()
            },
        )
        .unwrap();

        let missed: usize = (0..4000u64)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(round * 4000 + i);
                let (x, y) = bounds.random_point(&mut rng);
                let name: EntityKey = Arc::from(format!("player{}", i));
                qt.insert(x, y, name.clone()).unwrap();
                usize::from(!qt.search(x, y).unwrap().contains(&name))
            })
            .sum();

        assert_eq!(missed, 0, "round {}", round);
        assert_eq!(qt.len(), 4000);
        assert!(qt.stats().branch_nodes > 0);
    }
}
