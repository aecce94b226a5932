use std::convert::Infallible;
use std::error::Error as StdError;
use std::sync::Arc;

/// Failure of an [`Optional`](crate::Optional) or [`AsyncOptional`](crate::AsyncOptional) chain.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
  /// A value that was required to be present was empty.
  #[error("Value can't be empty")]
  IllegalValue,
  /// A callback at a dynamic boundary returned something other than the expected container.
  #[error("{expected} expected")]
  TypeExpectation { expected: &'static str },
  /// A caller-supplied callback failed; its error is kept as-is.
  #[error(transparent)]
  Callback(Arc<dyn StdError + Send + Sync + 'static>),
}

impl Error {
  /// Wraps a callback failure so that it can travel through an asynchronous chain.
  #[inline]
  pub fn callback(error: impl StdError + Send + Sync + 'static) -> Self {
    Self::Callback(Arc::new(error))
  }

  #[inline]
  pub fn is_illegal_value(&self) -> bool { matches!(self, Self::IllegalValue) }
  #[inline]
  pub fn is_type_expectation(&self) -> bool { matches!(self, Self::TypeExpectation { .. }) }

  /// Returns the callback error if it is of type `E`.
  pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
    match self {
      Self::Callback(cause) => cause.downcast_ref::<E>(),
      _ => None,
    }
  }

  pub(crate) fn type_expectation(expected: &'static str) -> Self {
    crate::trace!(expected, "callback returned a value that is not the expected container");
    Self::TypeExpectation { expected }
  }
  pub(crate) fn illegal_value() -> Self {
    crate::trace!("required value is empty");
    Self::IllegalValue
  }
}

impl From<Infallible> for Error {
  fn from(never: Infallible) -> Self { match never {} }
}
impl From<Box<dyn StdError + Send + Sync + 'static>> for Error {
  fn from(cause: Box<dyn StdError + Send + Sync + 'static>) -> Self { Self::Callback(Arc::from(cause)) }
}
