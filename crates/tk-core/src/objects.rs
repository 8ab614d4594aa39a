use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ObjectError {
    SerializationError(String),
    NotAnObject(&'static str),
}

impl From<serde_json::Error> for ObjectError {
    fn from(value: serde_json::Error) -> Self {
        ObjectError::SerializationError(value.to_string())
    }
}

/// Merges two property bags, keys of `second` overwrite those of `first`
pub fn merge_maps(first: &Map<String, Value>, second: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = first.clone();
    for (key, value) in second {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Serializes both values into JSON objects and merges their properties, `second` wins on conflicts
pub fn merge<A: Serialize, B: Serialize>(
    first: &A,
    second: &B,
) -> Result<Map<String, Value>, ObjectError> {
    Ok(merge_maps(
        &to_object(first, "first")?,
        &to_object(second, "second")?,
    ))
}

fn to_object<T: Serialize>(
    value: &T,
    which: &'static str,
) -> Result<Map<String, Value>, ObjectError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(ObjectError::NotAnObject(which)),
    }
}
