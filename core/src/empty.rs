//! The single definition of emptiness shared by both containers.
//!
//! Both absence markers of a dynamic host (`null` and `undefined`) collapse into [`None`]. Every other value, including
//! `0`, `false` and `""`, is present.

/// Returns `true` iff `value` holds no value.
#[inline]
pub fn is_empty<T>(value: &Option<T>) -> bool {
  value.is_none()
}

/// Returns `true` iff `value` holds a value.
#[inline]
pub fn is_present<T>(value: &Option<T>) -> bool {
  !is_empty(value)
}

/// Converts a JSON value into an option, where JSON `null` is the absence marker.
#[cfg(feature = "serde_json")]
#[inline]
pub fn from_json(value: serde_json::Value) -> Option<serde_json::Value> {
  match value {
    serde_json::Value::Null => None,
    value => Some(value),
  }
}
