// map `self` to `tk_core` allowing the use of derive macros that use `tk_core::..`
extern crate self as tk_core;
#[cfg(feature = "arrays")]
mod arrays;
#[cfg(feature = "mask")]
mod mask;
mod markers;
#[cfg(feature = "json")]
mod objects;
#[cfg(feature = "shared")]
mod shared;
mod tagged;
mod type_key;
mod type_map;

#[cfg(feature = "arrays")]
pub use arrays::append;
#[cfg(feature = "arrays")]
pub use arrays::concat;
#[cfg(feature = "arrays")]
pub use arrays::contains_type;
#[cfg(feature = "arrays")]
pub use arrays::contains_type_opt;
#[cfg(feature = "mask")]
pub use mask::Mask;
#[cfg(feature = "mask")]
pub use mask::TransformFn;
pub use markers::TaggedMarker;
pub use markers::TaggedRequirements;
#[cfg(feature = "json")]
pub use objects::merge;
#[cfg(feature = "json")]
pub use objects::merge_maps;
#[cfg(feature = "json")]
pub use objects::ObjectError;
#[cfg(feature = "shared")]
pub use shared::SharedTypeMap;
#[cfg(feature = "shared")]
pub use shared::TypeMapError;
pub use tagged::Tagged;
pub use tk_derive::tagged;
pub use tk_derive::TaggedMarker;
pub use type_key::AnyValue;
pub use type_key::TypeKey;
pub use type_map::TypeMap;
