use std::{
    any::{Any, TypeId},
    borrow::Borrow,
    fmt,
    hash::{Hash, Hasher},
};

/// Identity of a concrete type, used as the key of a `TypeMap`.
///
/// Equality and hashing only look at the `TypeId`, so a `TypeKey` can be looked up by `&TypeId`.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
    short_name: fn() -> String,
}

impl TypeKey {
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            short_name: tynm::type_name::<T>,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full path of the type, eg. `my_crate::animals::Dog`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without module paths, eg. `Dog` or `Wrapper<Dog>`
    pub fn short_name(&self) -> String {
        (self.short_name)()
    }

    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Borrow<TypeId> for TypeKey {
    fn borrow(&self) -> &TypeId {
        &self.id
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeKey").field(&self.name).finish()
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

/// Runtime type access for values stored behind a `Box<V>`.
///
/// Implemented for every sized `'static` type. A trait object gets it by declaring `AnyValue` as a supertrait:
/// `trait Animal: AnyValue {}` makes `TypeMap<dyn Animal>` possible.
///
/// Call these through the value, not the box: `(*boxed).type_key()`. `Box<V>` is itself `'static` and would
/// report its own type.
pub trait AnyValue: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn type_key(&self) -> TypeKey;
}

impl<T: Any> AnyValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::{AnyValue, TypeKey};
    use std::{
        any::TypeId,
        collections::HashMap,
        hash::{DefaultHasher, Hash, Hasher},
    };

    trait Shape: AnyValue {}

    struct Square;
    impl Shape for Square {}

    mod nested {
        pub struct Square;
    }

    #[test]
    fn key_identity() {
        assert_eq!(TypeKey::of::<u32>(), TypeKey::of::<u32>());
        assert_ne!(TypeKey::of::<u32>(), TypeKey::of::<u64>());
        assert_ne!(TypeKey::of::<Square>(), TypeKey::of::<nested::Square>());
        assert!(TypeKey::of::<Square>().is::<Square>());
        assert!(!TypeKey::of::<Square>().is::<nested::Square>());
    }

    #[test]
    fn key_names() {
        let key = TypeKey::of::<nested::Square>();
        assert!(key.name().ends_with("nested::Square"));
        assert_eq!(key.short_name(), "Square");
        assert_eq!(key.to_string(), "Square");
        assert_eq!(TypeKey::of::<Vec<String>>().short_name(), "Vec<String>");
    }

    /// Keys must hash like their `TypeId` so maps can be queried by `&TypeId`
    #[test]
    fn key_borrows_type_id() {
        let mut hasher = DefaultHasher::new();
        TypeKey::of::<Square>().hash(&mut hasher);
        let key_hash = hasher.finish();

        let mut hasher = DefaultHasher::new();
        TypeId::of::<Square>().hash(&mut hasher);
        assert_eq!(key_hash, hasher.finish());

        let mut map = HashMap::new();
        map.insert(TypeKey::of::<Square>(), 1);
        assert_eq!(map.get(&TypeId::of::<Square>()), Some(&1));
    }

    /// The key of a boxed trait object is the concrete type behind it
    #[test]
    fn trait_object_key() {
        let shape: Box<dyn Shape> = Box::new(Square);
        assert!((*shape).type_key().is::<Square>());
        assert!((*shape).as_any().is::<Square>());
        assert!(AnyValue::into_any(shape).downcast::<Square>().is_ok());
    }
}
