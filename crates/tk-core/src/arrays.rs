use crate::AnyValue;
use std::any::Any;

/// Returns `values` followed by `element`
pub fn append<T: Clone>(values: &[T], element: T) -> Vec<T> {
    let mut joined = Vec::with_capacity(values.len() + 1);
    joined.extend_from_slice(values);
    joined.push(element);
    joined
}

/// Returns `values` followed by `expansion`
pub fn concat<T: Clone>(values: &[T], expansion: &[T]) -> Vec<T> {
    [values, expansion].concat()
}

/// True if any of `values` has the concrete type `S`
pub fn contains_type<V: ?Sized + AnyValue, S: Any>(values: &[Box<V>]) -> bool {
    values.iter().any(|value| (**value).as_any().is::<S>())
}

/// Like `contains_type`, absent elements are skipped
pub fn contains_type_opt<V: ?Sized + AnyValue, S: Any>(values: &[Option<Box<V>>]) -> bool {
    values
        .iter()
        .flatten()
        .any(|value| (**value).as_any().is::<S>())
}
