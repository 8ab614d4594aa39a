use std::{fmt::Debug, sync::Arc};

pub trait TransformFn<T>: Fn(T) -> T + Send + Sync {}
impl<T, F: Fn(T) -> T + Send + Sync> TransformFn<T> for F {}

/// Masks a base value with an ordered chain of named transforms while keeping the base value intact.
///
/// `value()` folds the transforms over a clone of the base value in insertion order.
pub struct Mask<K, T> {
    original: T,
    transforms: Vec<(K, Arc<dyn TransformFn<T>>)>,
}

impl<K: PartialEq, T: Clone> Mask<K, T> {
    pub fn new(original: T) -> Self {
        Self {
            original,
            transforms: Vec::new(),
        }
    }

    pub fn with_transforms<I>(original: T, transforms: I) -> Self
    where
        I: IntoIterator<Item = (K, Arc<dyn TransformFn<T>>)>,
    {
        let mut mask = Self::new(original);
        for (key, transform) in transforms {
            mask.insert(key, transform);
        }
        mask
    }

    pub fn original(&self) -> &T {
        &self.original
    }

    /// The base value with every transform applied in order
    pub fn value(&self) -> T {
        self.transforms
            .iter()
            .fold(self.original.clone(), |current, (_, transform)| {
                transform(current)
            })
    }

    /// Appends `transform` under `key`. An existing transform with the same key is replaced in place
    pub fn push(&mut self, key: K, transform: impl Fn(T) -> T + Send + Sync + 'static) {
        self.insert(key, Arc::new(transform));
    }

    fn insert(&mut self, key: K, transform: Arc<dyn TransformFn<T>>) {
        match self.transforms.iter_mut().find(|(existing, _)| existing == &key) {
            Some((_, slot)) => *slot = transform,
            None => self.transforms.push((key, transform)),
        }
    }

    pub fn remove(&mut self, key: &K) -> bool {
        let before = self.transforms.len();
        self.transforms.retain(|(existing, _)| existing != key);
        before != self.transforms.len()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.transforms.iter().any(|(existing, _)| existing == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.transforms.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Drops every transform and returns the base value
    pub fn reset(&mut self) -> &T {
        self.transforms.clear();
        &self.original
    }
}

impl<K: Clone, T: Clone> Clone for Mask<K, T> {
    fn clone(&self) -> Self {
        Self {
            original: self.original.clone(),
            transforms: self.transforms.clone(),
        }
    }
}

/// Impl Debug for Mask manually as `Fn()` doesn't support `Debug`
impl<K: Debug, T: Debug> Debug for Mask<K, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mask")
            .field("original", &self.original)
            .field(
                "transforms",
                &self
                    .transforms
                    .iter()
                    .map(|(key, _)| (key, "<TransformFn>"))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
