use std::{fmt::Debug, hash::Hash};

/// Everything a `Tagged` value must provide besides its marker.
/// Also added as a bound to every generic parameter of a `#[derive(TaggedMarker)]` type
pub trait TaggedRequirements: 'static + Send + Sync + Clone + PartialEq + Debug + Hash {}
impl<T: 'static + Send + Sync + Clone + PartialEq + Debug + Hash> TaggedRequirements for T {}

/// `TaggedMarker` marks a type as usable as a `Tagged` value and should be derived for each such type
/// `_tag` is derived from the module_path and type name, eg. `my_crate::MyValue`
pub trait TaggedMarker: TaggedRequirements {
    fn _tag() -> &'static str;
}
