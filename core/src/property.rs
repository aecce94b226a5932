//! Property access for [`take`](crate::Optional::take).
//!
//! Taking a property off a value that has no such property, or that is not a container at all, yields an empty result
//! rather than an error.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// A value from which a named (or indexed) property can be extracted.
pub trait Property<K> {
  type Output;

  /// Extracts the property at `key`, or `None` if there is no such property.
  fn property(self, key: K) -> Option<Self::Output>;
}

impl<'q, K, V, Q, S> Property<&'q Q> for HashMap<K, V, S> where
  K: Borrow<Q> + Eq + Hash,
  Q: Eq + Hash + ?Sized,
  S: BuildHasher,
{
  type Output = V;
  #[inline]
  fn property(mut self, key: &'q Q) -> Option<V> { self.remove(key) }
}
impl<'a, 'q, K, V, Q, S> Property<&'q Q> for &'a HashMap<K, V, S> where
  K: Borrow<Q> + Eq + Hash,
  Q: Eq + Hash + ?Sized,
  S: BuildHasher,
{
  type Output = &'a V;
  #[inline]
  fn property(self, key: &'q Q) -> Option<&'a V> { self.get(key) }
}

impl<'q, K, V, Q> Property<&'q Q> for BTreeMap<K, V> where
  K: Borrow<Q> + Ord,
  Q: Ord + ?Sized,
{
  type Output = V;
  #[inline]
  fn property(mut self, key: &'q Q) -> Option<V> { self.remove(key) }
}
impl<'a, 'q, K, V, Q> Property<&'q Q> for &'a BTreeMap<K, V> where
  K: Borrow<Q> + Ord,
  Q: Ord + ?Sized,
{
  type Output = &'a V;
  #[inline]
  fn property(self, key: &'q Q) -> Option<&'a V> { self.get(key) }
}

impl<T> Property<usize> for Vec<T> {
  type Output = T;
  #[inline]
  fn property(self, index: usize) -> Option<T> { self.into_iter().nth(index) }
}
impl<'a, T> Property<usize> for &'a [T] {
  type Output = &'a T;
  #[inline]
  fn property(self, index: usize) -> Option<&'a T> { self.get(index) }
}
impl<'a, T> Property<usize> for &'a Vec<T> {
  type Output = &'a T;
  #[inline]
  fn property(self, index: usize) -> Option<&'a T> { self.get(index) }
}

#[cfg(feature = "serde_json")]
mod json {
  use serde_json::Value;

  use crate::empty::from_json;

  use super::Property;

  impl<'q> Property<&'q str> for Value {
    type Output = Value;
    fn property(self, key: &'q str) -> Option<Value> {
      match self {
        Value::Object(mut map) => map.remove(key).and_then(from_json),
        _ => None,
      }
    }
  }
  impl Property<String> for Value {
    type Output = Value;
    #[inline]
    fn property(self, key: String) -> Option<Value> { self.property(key.as_str()) }
  }
  impl Property<usize> for Value {
    type Output = Value;
    fn property(self, index: usize) -> Option<Value> {
      match self {
        Value::Array(values) => values.into_iter().nth(index).and_then(from_json),
        _ => None,
      }
    }
  }

  impl<'a, 'q> Property<&'q str> for &'a Value {
    type Output = &'a Value;
    #[inline]
    fn property(self, key: &'q str) -> Option<&'a Value> { self.get(key).filter(|v| !v.is_null()) }
  }
  impl<'a> Property<usize> for &'a Value {
    type Output = &'a Value;
    #[inline]
    fn property(self, index: usize) -> Option<&'a Value> { self.get(index).filter(|v| !v.is_null()) }
  }
}
