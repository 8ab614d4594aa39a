use crate::type_key::{AnyValue, TypeKey};
use std::{
    any::{Any, TypeId},
    cmp::Ordering,
    collections::{
        hash_map::{self, Entry},
        HashMap,
    },
    fmt::Debug,
};

/// A map holding at most one value per concrete type.
///
/// Entries are keyed by the runtime type of the inserted value, never by a caller supplied key. `V` is the
/// value bound: a sized type, or a trait object whose trait has `AnyValue` as a supertrait.
///
/// Typed accessors (`get`, `contains`, `remove`, ...) address the entry whose key is exactly the requested
/// type. They do not search for other types implementing the same trait.
///
/// `TypeMap` has no internal synchronization, use `SharedTypeMap` to share one between threads.
pub struct TypeMap<V: ?Sized> {
    entries: HashMap<TypeKey, Box<V>>,
}

impl<V: ?Sized> Default for TypeMap<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V: ?Sized + AnyValue> TypeMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Builds a map from `values` without overriding, the first value of each concrete type wins
    pub fn from_values<I: IntoIterator<Item = Box<V>>>(values: I) -> Self {
        let mut map = Self::new();
        map.extend(values);
        map
    }

    /// Builds a map from the values of `map`, re-keyed by their concrete type. Keys of `map` are ignored
    pub fn from_map<K>(map: HashMap<K, Box<V>>) -> Self {
        Self::from_values(map.into_values())
    }

    /// Number of distinct concrete types stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> hash_map::Keys<'_, TypeKey, Box<V>> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.values().map(|value| &**value)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.entries.values_mut().map(|value| &mut **value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeKey, &V)> + '_ {
        self.entries.iter().map(|(key, value)| (key, &**value))
    }

    /// Returns the value stored for exactly `S`, or `None`
    pub fn get<S: Any>(&self) -> Option<&S> {
        self.entries
            .get(&TypeId::of::<S>())
            .and_then(|value| (**value).as_any().downcast_ref::<S>())
    }

    pub fn get_mut<S: Any>(&mut self) -> Option<&mut S> {
        self.entries
            .get_mut(&TypeId::of::<S>())
            .and_then(|value| (**value).as_any_mut().downcast_mut::<S>())
    }

    /// Returns the value stored under `key`, without naming its type
    pub fn get_by_key(&self, key: &TypeKey) -> Option<&V> {
        self.entries.get(&key.id()).map(|value| &**value)
    }

    pub fn get_by_key_mut(&mut self, key: &TypeKey) -> Option<&mut V> {
        self.entries.get_mut(&key.id()).map(|value| &mut **value)
    }

    /// Inserts `value` unless an entry for its concrete type already exists
    pub fn set(&mut self, value: Box<V>) -> bool {
        self.set_with(value, false)
    }

    /// Inserts `value` keyed by its concrete type, replacing an existing entry only when `overwrite` is set.
    /// Returns whether the value was stored
    pub fn set_with(&mut self, value: Box<V>, overwrite: bool) -> bool {
        let key = (*value).type_key();
        match self.entries.entry(key) {
            Entry::Occupied(mut entry) => {
                if !overwrite {
                    tracing::trace!(type_name = %key, "entry already present, insert rejected");
                    return false;
                }
                tracing::trace!(type_name = %key, "entry replaced");
                entry.insert(value);
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
        true
    }

    /// Like `set_with`, but an absent `value` is rejected
    pub fn set_optional(&mut self, value: Option<Box<V>>, overwrite: bool) -> bool {
        match value {
            Some(value) => self.set_with(value, overwrite),
            None => {
                tracing::trace!("absent value, insert rejected");
                false
            }
        }
    }

    pub fn contains<S: ?Sized + 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<S>())
    }

    pub fn contains_key(&self, key: &TypeKey) -> bool {
        self.entries.contains_key(key)
    }

    /// True if an entry for exactly `S` exists and it orders equal to or greater than `candidate`
    pub fn contains_value<S: Any + Ord>(&self, candidate: &S) -> bool {
        self.get::<S>()
            .is_some_and(|stored| stored.cmp(candidate) != Ordering::Less)
    }

    /// Removes the entry for exactly `S`, returning whether one was present
    pub fn remove<S: ?Sized + 'static>(&mut self) -> bool {
        self.entries.remove(&TypeId::of::<S>()).is_some()
    }

    /// Removes the entry for exactly `S` and returns it
    pub fn take<S: Any>(&mut self) -> Option<Box<S>> {
        let value = self.entries.remove(&TypeId::of::<S>())?;
        AnyValue::into_any(value).downcast::<S>().ok()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn shrink_to_fit(&mut self) {
        self.entries.shrink_to_fit();
    }

    pub fn into_values(self) -> hash_map::IntoValues<TypeKey, Box<V>> {
        self.entries.into_values()
    }
}

impl<V: ?Sized + AnyValue> TypeMap<V>
where
    Box<V>: Clone,
{
    /// Snapshot of the stored values
    pub fn to_vec(&self) -> Vec<Box<V>> {
        self.entries.values().cloned().collect()
    }

    /// Snapshot of the stored entries
    pub fn to_map(&self) -> HashMap<TypeKey, Box<V>> {
        self.entries.clone()
    }
}

impl<V: ?Sized> Clone for TypeMap<V>
where
    Box<V>: Clone,
{
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<V: ?Sized> PartialEq for TypeMap<V>
where
    Box<V>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V: ?Sized + Debug> Debug for TypeMap<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|(key, value)| (key.short_name(), value)),
            )
            .finish()
    }
}

impl<V: ?Sized + AnyValue> Extend<Box<V>> for TypeMap<V> {
    /// Inserts without overriding, later duplicates of a concrete type are dropped
    fn extend<I: IntoIterator<Item = Box<V>>>(&mut self, values: I) {
        for value in values {
            self.set(value);
        }
    }
}

impl<V: ?Sized + AnyValue> FromIterator<Box<V>> for TypeMap<V> {
    fn from_iter<I: IntoIterator<Item = Box<V>>>(values: I) -> Self {
        Self::from_values(values)
    }
}

impl<V: ?Sized + AnyValue> From<Vec<Box<V>>> for TypeMap<V> {
    fn from(values: Vec<Box<V>>) -> Self {
        Self::from_values(values)
    }
}

impl<V: ?Sized + AnyValue> From<HashMap<TypeKey, Box<V>>> for TypeMap<V> {
    fn from(map: HashMap<TypeKey, Box<V>>) -> Self {
        Self::from_map(map)
    }
}

impl<V: ?Sized> From<TypeMap<V>> for Vec<Box<V>> {
    fn from(map: TypeMap<V>) -> Self {
        map.entries.into_values().collect()
    }
}

impl<V: ?Sized> IntoIterator for TypeMap<V> {
    type Item = Box<V>;
    type IntoIter = hash_map::IntoValues<TypeKey, Box<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

#[cfg(test)]
mod tests {
    use crate::{tagged, AnyValue, Tagged, TypeKey, TypeMap};
    use proptest::prelude::*;

    trait Animal: AnyValue {
        fn name(&self) -> &str;
    }

    struct Dog(&'static str);
    impl Animal for Dog {
        fn name(&self) -> &str {
            self.0
        }
    }

    struct Cat(&'static str);
    impl Animal for Cat {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[tagged]
    struct Health(u32);

    #[tagged]
    struct Label(String);

    #[tagged]
    #[derive(Eq, PartialOrd, Ord)]
    struct Score(u32);

    fn animals(values: Vec<Box<dyn Animal>>) -> TypeMap<dyn Animal> {
        TypeMap::from_values(values)
    }

    /// Values stored through a trait object are keyed by their concrete type
    #[test]
    fn exact_type_indexing() {
        let mut map = TypeMap::<dyn Animal>::new();
        assert!(map.set(Box::new(Dog("rex"))));
        assert_eq!(map.len(), 1);
        assert!(map.contains::<Dog>());
        assert!(!map.contains::<dyn Animal>());
        assert!(!map.contains::<Cat>());
        assert!(map.contains_key(&TypeKey::of::<Dog>()));
        assert_eq!(map.keys().next(), Some(&TypeKey::of::<Dog>()));
        assert_eq!(map.get::<Dog>().map(|dog| dog.name()), Some("rex"));
        assert!(map.get::<Cat>().is_none());
    }

    #[test]
    fn insert_without_override_keeps_first() {
        let mut map = TypeMap::<dyn Animal>::new();
        assert!(map.set(Box::new(Dog("first"))));
        assert!(!map.set(Box::new(Dog("second"))));
        assert!(!map.set_with(Box::new(Dog("third")), false));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get::<Dog>().map(|dog| dog.name()), Some("first"));
    }

    #[test]
    fn insert_with_override_replaces() {
        let mut map = TypeMap::<dyn Animal>::new();
        assert!(map.set(Box::new(Dog("first"))));
        assert!(map.set_with(Box::new(Dog("second")), true));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get::<Dog>().map(|dog| dog.name()), Some("second"));

        // overriding into an empty slot is a plain insert
        assert!(map.set_with(Box::new(Cat("tom")), true));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn absent_value_rejected() {
        let mut map = animals(vec![Box::new(Dog("rex"))]);
        assert!(!map.set_optional(None, false));
        assert!(!map.set_optional(None, true));
        assert_eq!(map.len(), 1);

        assert!(map.set_optional(Some(Box::new(Cat("tom"))), false));
        assert_eq!(map.len(), 2);
    }

    /// Bulk construction keeps the first value of each concrete type
    #[test]
    fn bulk_construction_first_wins() {
        let map = animals(vec![
            Box::new(Dog("x1")),
            Box::new(Dog("x2")),
            Box::new(Cat("y")),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get::<Dog>().map(|dog| dog.name()), Some("x1"));
        assert_eq!(map.get::<Cat>().map(|cat| cat.name()), Some("y"));

        let cats: Vec<Box<dyn Animal>> = vec![Box::new(Cat("a")), Box::new(Cat("b"))];
        let collected: TypeMap<dyn Animal> = cats.into_iter().collect();
        assert_eq!(collected.get::<Cat>().map(|cat| cat.name()), Some("a"));
    }

    #[test]
    fn extend_does_not_override() {
        let mut map = animals(vec![Box::new(Dog("rex"))]);
        let more: Vec<Box<dyn Animal>> = vec![Box::new(Dog("fido")), Box::new(Cat("tom"))];
        map.extend(more);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get::<Dog>().map(|dog| dog.name()), Some("rex"));
    }

    /// Exporting to a list and rebuilding yields the same entries
    #[test]
    fn list_round_trip() {
        let values: Vec<Box<dyn Tagged>> = vec![
            Box::new(Health(10)),
            Box::new(Label("hero".to_string())),
            Box::new(Score(3)),
        ];
        let map = TypeMap::from_values(values);
        let rebuilt = TypeMap::from_values(map.to_vec());
        assert_eq!(map, rebuilt);

        let from_map = TypeMap::from(map.to_map());
        assert_eq!(map, from_map);

        let owned: Vec<Box<dyn Tagged>> = map.clone().into();
        assert_eq!(TypeMap::from(owned), map);
    }

    #[test]
    fn exports_are_independent() {
        let mut map = TypeMap::<dyn Tagged>::new();
        map.set(Box::new(Health(10)));

        let mut list = map.to_vec();
        let mut snapshot = map.to_map();
        list.clear();
        snapshot.insert(TypeKey::of::<Score>(), Box::new(Score(1)));
        assert_eq!(map.len(), 1);
        assert!(!map.contains::<Score>());

        if let Some(health) = map.get_mut::<Health>() {
            health.0 = 20;
        }
        let stored = snapshot
            .get(&TypeKey::of::<Health>())
            .and_then(|value| (**value).as_any().downcast_ref::<Health>());
        assert_eq!(stored, Some(&Health(10)));
        assert_eq!(map.get::<Health>(), Some(&Health(20)));
    }

    #[test]
    fn removal() {
        let mut map = TypeMap::<dyn Animal>::new();
        assert!(!map.remove::<Dog>());

        map.set(Box::new(Cat("tom")));
        map.set(Box::new(Dog("rex")));
        assert_eq!(map.len(), 2);
        assert!(!map.remove::<dyn Animal>());
        assert!(map.remove::<Dog>());
        assert!(!map.contains::<Dog>());
        assert_eq!(map.len(), 1);
        assert!(!map.remove::<Dog>());
    }

    #[test]
    fn take_returns_entry() {
        let mut map = animals(vec![Box::new(Dog("rex"))]);
        assert!(map.take::<Cat>().is_none());
        let dog = map.take::<Dog>();
        assert_eq!(dog.map(|dog| dog.0), Some("rex"));
        assert!(map.is_empty());
    }

    /// `contains_value` is an order comparison: the stored value must be equal to or greater than the candidate
    #[test]
    fn contains_value_orders() {
        let mut map = TypeMap::<dyn Tagged>::new();
        assert!(!map.contains_value(&Score(0)));

        map.set(Box::new(Score(5)));
        assert!(map.contains_value(&Score(3)));
        assert!(map.contains_value(&Score(5)));
        assert!(!map.contains_value(&Score(7)));

        let mut numbers = TypeMap::<u32>::new();
        numbers.set(Box::new(5));
        assert!(numbers.contains_value(&5u32));
        assert!(!numbers.contains_value(&6u32));
    }

    #[test]
    fn views_and_clear() {
        let mut map = TypeMap::<dyn Animal>::new();
        map.set(Box::new(Dog("rex")));
        map.set(Box::new(Cat("tom")));

        let mut names: Vec<&str> = map.values().map(|animal| animal.name()).collect();
        names.sort_unstable();
        assert_eq!(names, ["rex", "tom"]);
        assert_eq!(map.keys().count(), 2);
        assert!(map
            .iter()
            .all(|(key, animal)| key == &(*animal).type_key()));

        map.clear();
        map.shrink_to_fit();
        assert!(map.is_empty());
        assert_eq!(map.values().count(), 0);
    }

    /// Every key handed out by `keys()` reads its entry back without naming the type
    #[test]
    fn lookup_by_key() {
        let mut map = animals(vec![Box::new(Dog("rex")), Box::new(Cat("tom"))]);
        let keys: Vec<TypeKey> = map.keys().copied().collect();
        for key in &keys {
            let animal = map.get_by_key(key).map(|animal| (*animal).type_key());
            assert_eq!(animal.as_ref(), Some(key));
        }
        assert!(map.get_by_key(&TypeKey::of::<String>()).is_none());

        if let Some(animal) = map.get_by_key_mut(&TypeKey::of::<Dog>()) {
            if let Some(dog) = (*animal).as_any_mut().downcast_mut::<Dog>() {
                dog.0 = "fido";
            }
        }
        assert_eq!(map.get::<Dog>().map(|dog| dog.name()), Some("fido"));
        assert_eq!(
            map.get_by_key(&TypeKey::of::<Cat>()).map(|cat| cat.name()),
            Some("tom")
        );
    }

    #[test]
    fn sized_value_bound() {
        let mut map = TypeMap::<String>::new();
        assert!(map.set(Box::new("a".to_string())));
        assert!(!map.set(Box::new("b".to_string())));
        assert_eq!(map.get::<String>().map(String::as_str), Some("a"));
        for value in map.values_mut() {
            value.push('!');
        }
        assert_eq!(map.get::<String>().map(String::as_str), Some("a!"));
    }

    #[test]
    fn debug_lists_short_names() {
        let map = TypeMap::<dyn Tagged>::from_values(vec![Box::new(Health(1)) as Box<dyn Tagged>]);
        assert_eq!(format!("{map:?}"), "{\"Health\": Health(1)}");
    }

    #[tagged]
    struct KindA(u8);

    #[tagged]
    struct KindB(u8);

    #[tagged]
    struct KindC(u8);

    proptest! {
        /// Any sequence of inserts leaves at most one entry per concrete type, matching a simple model
        #[test]
        fn one_entry_per_type(ops in proptest::collection::vec((0usize..3, any::<u8>(), any::<bool>()), 0..64)) {
            let mut map = TypeMap::<dyn Tagged>::new();
            let mut model: [Option<u8>; 3] = [None; 3];

            for (kind, value, overwrite) in ops {
                let boxed: Box<dyn Tagged> = match kind {
                    0 => Box::new(KindA(value)),
                    1 => Box::new(KindB(value)),
                    _ => Box::new(KindC(value)),
                };
                let expected = overwrite || model[kind].is_none();
                prop_assert_eq!(map.set_with(boxed, overwrite), expected);
                if expected {
                    model[kind] = Some(value);
                }
            }

            prop_assert_eq!(map.len(), model.iter().flatten().count());
            prop_assert_eq!(map.get::<KindA>().map(|a| a.0), model[0]);
            prop_assert_eq!(map.get::<KindB>().map(|b| b.0), model[1]);
            prop_assert_eq!(map.get::<KindC>().map(|c| c.0), model[2]);
        }
    }
}
