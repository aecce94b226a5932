use std::any::Any;

use crate::async_optional::AsyncOptional;
use crate::empty::{is_empty, is_present};
use crate::error::Error;
use crate::property::Property;
use crate::util::maybe_send::MaybeSend;

/// Synchronous container of a possibly-absent value.
///
/// Every operation is immediate. Transforming operations consume the container and return a new one; the held value
/// is never rewritten in place. Callback failures surface synchronously: a panicking callback unwinds out of the call,
/// and the `try_*` variants return the callback's own error as-is.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct Optional<T> {
  value: Option<T>,
}

impl<T> Optional<T> {
  #[inline]
  pub const fn empty() -> Self { Self { value: None } }
  /// Creates an optional holding `value` as given, which may be empty.
  #[inline]
  pub const fn with(value: Option<T>) -> Self { Self { value } }
  #[inline]
  pub const fn of(value: T) -> Self { Self::with(Some(value)) }
  /// Creates an optional holding `value`, failing with [`Error::IllegalValue`] if it is empty.
  pub fn with_ensured(value: Option<T>) -> Result<Self, Error> {
    if is_empty(&value) {
      return Err(Error::illegal_value());
    }
    Ok(Self::with(value))
  }

  /// Returns this optional if it is present, otherwise an optional holding `new_value`.
  #[inline]
  pub fn or_use(self, new_value: impl Into<Option<T>>) -> Self {
    if self.is_empty() { Self::with(new_value.into()) } else { self }
  }
  /// Returns this optional if it is present, otherwise an optional holding the result of `supplier`.
  #[inline]
  pub fn or_compute<V: Into<Option<T>>>(self, supplier: impl FnOnce() -> V) -> Self {
    if self.is_empty() { Self::with(supplier().into()) } else { self }
  }
  /// Like [`or_compute`](Self::or_compute), but `supplier` may fail.
  pub fn try_or_compute<V: Into<Option<T>>, E>(self, supplier: impl FnOnce() -> Result<V, E>) -> Result<Self, E> {
    if self.is_empty() { Ok(Self::with(supplier()?.into())) } else { Ok(self) }
  }
  /// Returns this optional if it is present, otherwise the optional returned by `supplier`.
  #[inline]
  pub fn or_flat_compute(self, supplier: impl FnOnce() -> Optional<T>) -> Self {
    if self.is_empty() { supplier() } else { self }
  }

  /// Keeps the value if `predicate` holds for it, otherwise becomes empty. `predicate` is not invoked on an empty
  /// optional.
  #[inline]
  pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
    match self.value {
      Some(value) => if predicate(&value) { Self::of(value) } else { Self::empty() },
      None => Self::empty(),
    }
  }
  /// Like [`filter`](Self::filter), but `predicate` may fail.
  pub fn try_filter<E>(self, predicate: impl FnOnce(&T) -> Result<bool, E>) -> Result<Self, E> {
    match self.value {
      Some(value) => Ok(if predicate(&value)? { Self::of(value) } else { Self::empty() }),
      None => Ok(Self::empty()),
    }
  }

  /// Takes the property at `key` off the value. A missing property, or a value that has no properties, becomes
  /// empty.
  #[inline]
  pub fn take<K>(self, key: K) -> Optional<T::Output> where
    T: Property<K>
  {
    self.map_opt(|value| value.property(key))
  }

  /// Maps the value with `mapper`. `mapper` is not invoked on an empty optional.
  #[inline]
  pub fn map<U>(self, mapper: impl FnOnce(T) -> U) -> Optional<U> {
    Optional::with(self.value.map(mapper))
  }
  /// Maps the value with `mapper`, whose result may itself be empty.
  #[inline]
  pub fn map_opt<U>(self, mapper: impl FnOnce(T) -> Option<U>) -> Optional<U> {
    Optional::with(self.value.and_then(mapper))
  }
  /// Like [`map`](Self::map), but `mapper` may fail.
  pub fn try_map<U, E>(self, mapper: impl FnOnce(T) -> Result<U, E>) -> Result<Optional<U>, E> {
    Ok(Optional::with(self.value.map(mapper).transpose()?))
  }

  /// Replaces this optional with the one `mapper` returns for its value. `mapper` is not invoked on an empty optional.
  #[inline]
  pub fn flat_map<U>(self, mapper: impl FnOnce(T) -> Optional<U>) -> Optional<U> {
    match self.value {
      Some(value) => mapper(value),
      None => Optional::empty(),
    }
  }

  #[inline]
  pub fn if_present(&self, action: impl FnOnce(&T)) {
    if let Some(value) = &self.value {
      action(value);
    }
  }
  #[inline]
  pub fn if_absent(&self, action: impl FnOnce()) {
    if self.is_empty() {
      action();
    }
  }

  /// Performs `on_presence` on the value if present, returning a handle whose [`or`](OptionalEither::or) takes the
  /// action to perform if empty.
  ///
  /// ```
  /// # use fluent_optional::Optional;
  /// let mut seen = None;
  /// Optional::of(5)
  ///   .either(|v| seen = Some(*v))
  ///   .or(|| unreachable!());
  /// assert_eq!(seen, Some(5));
  /// ```
  #[inline]
  pub fn either(&self, on_presence: impl FnOnce(&T)) -> OptionalEither<'_, T> {
    self.if_present(on_presence);
    OptionalEither { source: self }
  }
  /// Performs exactly one of `on_presence` or `on_absence`. A `None` absence action is a no-op.
  pub fn either_or<A: FnOnce()>(&self, on_presence: impl FnOnce(&T), on_absence: Option<A>) {
    match &self.value {
      Some(value) => on_presence(value),
      None => if let Some(on_absence) = on_absence {
        on_absence()
      },
    }
  }

  #[inline]
  pub fn is_present(&self) -> bool { is_present(&self.value) }
  #[inline]
  pub fn is_empty(&self) -> bool { is_empty(&self.value) }

  /// Returns the held value, which may be empty.
  #[inline]
  pub fn get(self) -> Option<T> { self.value }
  #[inline]
  pub fn as_ref(&self) -> Optional<&T> { Optional::with(self.value.as_ref()) }
  #[inline]
  pub fn get_or_default(self, other: T) -> T { self.value.unwrap_or(other) }
  #[inline]
  pub fn get_or_compute(self, supplier: impl FnOnce() -> T) -> T { self.value.unwrap_or_else(supplier) }
}

/// Dynamic boundary: callbacks that hand back an opaque value which must turn out to be an [`Optional`].
impl<T: 'static> Optional<T> {
  /// Like [`or_flat_compute`](Self::or_flat_compute), but fails with [`Error::TypeExpectation`] if `supplier` does not
  /// return an `Optional<T>`.
  pub fn or_flat_compute_dyn(self, supplier: impl FnOnce() -> Box<dyn Any>) -> Result<Self, Error> {
    if self.is_empty() { Self::downcast(supplier()) } else { Ok(self) }
  }

  fn downcast(value: Box<dyn Any>) -> Result<Self, Error> {
    value.downcast::<Self>()
      .map(|optional| *optional)
      .map_err(|_| Error::type_expectation("Optional"))
  }
}

impl<T> Optional<T> {
  /// Like [`flat_map`](Self::flat_map), but fails with [`Error::TypeExpectation`] if `mapper` does not return an
  /// `Optional<U>`.
  pub fn flat_map_dyn<U: 'static>(self, mapper: impl FnOnce(T) -> Box<dyn Any>) -> Result<Optional<U>, Error> {
    match self.value {
      Some(value) => Optional::downcast(mapper(value)),
      None => Ok(Optional::empty()),
    }
  }
}

impl<T: MaybeSend + 'static> Optional<T> {
  /// Lifts this optional into an [`AsyncOptional`] holding an already settled value.
  #[inline]
  pub fn into_async(self) -> AsyncOptional<T> { AsyncOptional::with(self.value) }
}

#[cfg(feature = "serde_json")]
impl Optional<serde_json::Value> {
  /// Creates an optional from a JSON value, where JSON `null` is empty.
  #[inline]
  pub fn from_json(value: serde_json::Value) -> Self { Self::with(crate::empty::from_json(value)) }
}

impl<T> Default for Optional<T> {
  #[inline]
  fn default() -> Self { Self::empty() }
}
impl<T> From<Option<T>> for Optional<T> {
  #[inline]
  fn from(value: Option<T>) -> Self { Self::with(value) }
}
impl<T> From<Optional<T>> for Option<T> {
  #[inline]
  fn from(optional: Optional<T>) -> Self { optional.value }
}


/// Handle returned by [`Optional::either`]; its presence action has already run.
#[must_use = "`either` must be completed with `or`"]
pub struct OptionalEither<'a, T> {
  source: &'a Optional<T>,
}
impl<'a, T> OptionalEither<'a, T> {
  /// Performs `on_absence` if the source optional is empty.
  #[inline]
  pub fn or(self, on_absence: impl FnOnce()) {
    self.source.if_absent(on_absence);
  }
}
