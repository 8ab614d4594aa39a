use crate::{markers::TaggedMarker, type_key::AnyValue};
use std::{
    any::Any,
    fmt::Debug,
    hash::{Hash, Hasher},
};

/// Used to wrap any passed hashers to support `Tagged::_hash_tagged()`
// ----------------------------------------------------------
struct TaggedHasher<'a>(&'a mut dyn Hasher);

impl<'a> Hasher for TaggedHasher<'a> {
    fn finish(&self) -> u64 {
        self.0.finish()
    }

    fn write(&mut self, bytes: &[u8]) {
        self.0.write(bytes)
    }
}
// ----------------------------------------------------------

/// A value bound for `TypeMap<dyn Tagged>` whose boxes can be cloned, compared and hashed
pub trait Tagged: AnyValue + Send + Sync + Debug {
    fn tag(&self) -> &'static str;
    fn _clone_tagged(&self) -> Box<dyn Tagged>;
    fn _eq_tagged(&self, other: &dyn Any) -> bool;
    fn _hash_tagged(&self, state: &mut dyn Hasher);
}

// Blanket implementation for all marked types
impl<T: TaggedMarker> Tagged for T {
    fn tag(&self) -> &'static str {
        T::_tag()
    }

    fn _clone_tagged(&self) -> Box<dyn Tagged> {
        Box::new(self.clone())
    }

    fn _eq_tagged(&self, other: &dyn Any) -> bool {
        if let Some(other) = other.downcast_ref::<T>() {
            self == other
        } else {
            false
        }
    }

    fn _hash_tagged(&self, state: &mut dyn Hasher) {
        let mut wrapper = TaggedHasher(state);
        self.tag().hash(&mut wrapper);
        self.hash(&mut wrapper);
    }
}

impl Clone for Box<dyn Tagged> {
    fn clone(&self) -> Self {
        (**self)._clone_tagged()
    }
}

// `Box<dyn Tagged>` picks these up through std's `Box<T>` impls
impl PartialEq for dyn Tagged {
    fn eq(&self, other: &Self) -> bool {
        self._eq_tagged((*other).as_any())
    }
}

impl Hash for dyn Tagged {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self._hash_tagged(state);
    }
}
