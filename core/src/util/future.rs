use std::future::Future;

use crate::error::Error;

/// What the deferred value of an [`AsyncOptional`](crate::AsyncOptional) settles to: a value, the absence of one, or
/// a failure.
pub type Settled<T> = Result<Option<T>, Error>;

/// Awaits `value`, then continues with `f` if it settled to a present value. Empty values and failures pass through
/// without invoking `f`.
pub(crate) async fn on_present<T, U, Fut>(
  value: impl Future<Output=Settled<T>>,
  f: impl FnOnce(T) -> Fut,
) -> Settled<U> where
  Fut: Future<Output=Settled<U>>
{
  match value.await? {
    Some(value) => f(value).await,
    None => Ok(None),
  }
}

/// Awaits `value`, then continues with `f` if it settled to an empty value. Present values and failures pass through
/// without invoking `f`.
pub(crate) async fn on_absent<T, Fut>(
  value: impl Future<Output=Settled<T>>,
  f: impl FnOnce() -> Fut,
) -> Settled<T> where
  Fut: Future<Output=Settled<T>>
{
  match value.await? {
    None => f().await,
    present => Ok(present),
  }
}

/// Result of an action callback: either nothing, or a fallible `Result<(), E>`.
pub trait Outcome {
  fn into_outcome(self) -> Result<(), Error>;
}
impl Outcome for () {
  #[inline]
  fn into_outcome(self) -> Result<(), Error> { Ok(()) }
}
impl<E: Into<Error>> Outcome for Result<(), E> {
  #[inline]
  fn into_outcome(self) -> Result<(), Error> { self.map_err(Into::into) }
}

/// Result of a filter predicate: either a `bool`, or a fallible `Result<bool, E>`.
pub trait Verdict {
  fn into_verdict(self) -> Result<bool, Error>;
}
impl Verdict for bool {
  #[inline]
  fn into_verdict(self) -> Result<bool, Error> { Ok(self) }
}
impl<E: Into<Error>> Verdict for Result<bool, E> {
  #[inline]
  fn into_verdict(self) -> Result<bool, Error> { self.map_err(Into::into) }
}

/// Keeps `value` if `verdict` passed.
#[inline]
pub(crate) fn sift<T>(value: T, verdict: impl Verdict) -> Settled<T> {
  Ok(verdict.into_verdict()?.then_some(value))
}
