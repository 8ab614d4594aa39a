use crate::{AnyValue, TypeMap};
use std::{
    any::Any,
    sync::{Arc, PoisonError, RwLock},
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeMapError {
    LockPoisoned(String),
}

impl<T> From<PoisonError<T>> for TypeMapError {
    fn from(err: PoisonError<T>) -> Self {
        TypeMapError::LockPoisoned(err.to_string())
    }
}

/// A thread-safe handle to a `TypeMap` using Arc and RwLock.
/// Clones share the same map.
pub struct SharedTypeMap<V: ?Sized> {
    inner: Arc<RwLock<TypeMap<V>>>,
}

impl<V: ?Sized> Clone for SharedTypeMap<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: ?Sized> Default for SharedTypeMap<V> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(TypeMap::default())),
        }
    }
}

impl<V: ?Sized> From<TypeMap<V>> for SharedTypeMap<V> {
    fn from(map: TypeMap<V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }
}

impl<V: ?Sized + AnyValue> SharedTypeMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with shared access to the map
    pub fn read<R>(&self, f: impl FnOnce(&TypeMap<V>) -> R) -> Result<R, TypeMapError> {
        Ok(f(&*self.inner.read()?))
    }

    /// Runs `f` with exclusive access to the map, for compound operations under a single lock
    pub fn write<R>(&self, f: impl FnOnce(&mut TypeMap<V>) -> R) -> Result<R, TypeMapError> {
        Ok(f(&mut *self.inner.write()?))
    }

    pub fn len(&self) -> Result<usize, TypeMapError> {
        self.read(TypeMap::len)
    }

    pub fn is_empty(&self) -> Result<bool, TypeMapError> {
        self.read(TypeMap::is_empty)
    }

    pub fn set(&self, value: Box<V>) -> Result<bool, TypeMapError> {
        self.set_with(value, false)
    }

    pub fn set_with(&self, value: Box<V>, overwrite: bool) -> Result<bool, TypeMapError> {
        self.write(|map| map.set_with(value, overwrite))
    }

    pub fn contains<S: ?Sized + 'static>(&self) -> Result<bool, TypeMapError> {
        self.read(TypeMap::contains::<S>)
    }

    pub fn get_cloned<S: Any + Clone>(&self) -> Result<Option<S>, TypeMapError> {
        self.read(|map| map.get::<S>().cloned())
    }

    pub fn remove<S: ?Sized + 'static>(&self) -> Result<bool, TypeMapError> {
        self.write(TypeMap::remove::<S>)
    }

    pub fn take<S: Any>(&self) -> Result<Option<Box<S>>, TypeMapError> {
        self.write(TypeMap::take::<S>)
    }

    pub fn clear(&self) -> Result<(), TypeMapError> {
        self.write(TypeMap::clear)
    }
}

impl<V: ?Sized + AnyValue> SharedTypeMap<V>
where
    Box<V>: Clone,
{
    /// Snapshot of the shared map
    pub fn snapshot(&self) -> Result<TypeMap<V>, TypeMapError> {
        self.read(TypeMap::clone)
    }
}
