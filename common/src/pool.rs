use crossbeam::queue::ArrayQueue;
use std::ops::{Deref, DerefMut};

/// Bounded, thread-safe pool of reusable objects.
///
/// Every object handed back is reset before it becomes available again, so a
/// caller never observes state left over from a previous use.
pub struct ObjectPool<T: Resettable> {
    pool: ArrayQueue<T>,
}

impl<T> ObjectPool<T>
where
    T: Resettable,
{
    // Create a new ObjectPool holding at most `max_size` idle objects
    pub fn new(max_size: usize) -> Self {
        ObjectPool {
            pool: ArrayQueue::new(max_size.max(1)),
        }
    }

    // Get an object from the pool if available, otherwise return a default object
    pub fn get(&self) -> T
    where
        T: Default,
    {
        self.pool.pop().unwrap_or_default()
    }

    /// Like [`get`](Self::get), but hands the object back on drop.
    pub fn take(&self) -> Pooled<'_, T>
    where
        T: Default,
    {
        Pooled {
            object: Some(self.get()),
            pool: self,
        }
    }

    // Reset the object and keep it if there is room, otherwise discard it
    pub fn return_object(&self, mut obj: T) {
        obj.reset();
        if self.pool.push(obj).is_err() {
            tracing::trace!(capacity = self.pool.capacity(), "object pool full, dropping object");
        }
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    // Clear all objects from the pool
    pub fn clear(&self) {
        while self.pool.pop().is_some() {}
    }
}

impl<T: Resettable> std::fmt::Debug for ObjectPool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectPool")
            .field("idle", &self.pool.len())
            .field("capacity", &self.pool.capacity())
            .finish()
    }
}

/// An object on loan from an [`ObjectPool`].
pub struct Pooled<'a, T: Resettable> {
    object: Option<T>,
    pool: &'a ObjectPool<T>,
}

impl<T: Resettable> Pooled<'_, T> {
    /// Keeps the object instead of returning it to the pool.
    pub fn into_inner(mut self) -> T {
        self.object
            .take()
            .unwrap_or_else(|| unreachable!("pooled object taken twice"))
    }
}

impl<T: Resettable> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.object
            .as_ref()
            .unwrap_or_else(|| unreachable!("pooled object already released"))
    }
}

impl<T: Resettable> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.object
            .as_mut()
            .unwrap_or_else(|| unreachable!("pooled object already released"))
    }
}

impl<T: Resettable> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(object) = self.object.take() {
            self.pool.return_object(object);
        }
    }
}

// Define the Resettable trait
pub trait Resettable {
    fn reset(&mut self);
}

impl<T> Resettable for Vec<T> {
    fn reset(&mut self) {
        self.clear();
    }
}
