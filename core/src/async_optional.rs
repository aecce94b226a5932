use std::fmt;
use std::future::{Future, IntoFuture};

use futures::future::{ready, FutureExt, Ready};

use crate::empty::{is_empty, is_present};
use crate::error::Error;
use crate::optional::Optional;
use crate::property::Property;
use crate::util::future::{on_absent, on_present, sift, Outcome, Settled, Verdict};
use crate::util::maybe_send::{BoxedAny, BoxedFuture, MaybeSend, MaybeSendFuture};

/// Asynchronous container of a possibly-absent value.
///
/// The held value is always a deferred computation that settles to a value, to the absence of one, or to a failure.
/// Plain values are normalized into an already settled computation at construction, so every operation treats plain
/// and deferred values alike.
///
/// Operations never block and never fail synchronously. Transforming operations return a new container whose value
/// settles once this container's value settles and the callback (and any future it returns) completes. Failures of
/// callbacks, and of [`with_ensured`](Self::with_ensured), surface only when the resulting container is observed
/// through [`get`](Self::get), an action, or by awaiting it.
///
/// Futures are lazy: nothing runs until the outermost future of a chain is polled. A chain then runs its continuations
/// strictly in declaration order.
pub struct AsyncOptional<T> {
  value: BoxedFuture<'static, Settled<T>>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Presence {
  Present,
  Absent,
}

#[inline]
fn nothing() -> Ready<Result<(), Error>> { ready(Ok(())) }

#[inline]
fn done(presence: Result<Presence, Error>) -> Result<(), Error> { presence.map(drop) }

fn ensure<T>(value: Option<T>) -> Settled<T> {
  if is_empty(&value) {
    return Err(Error::illegal_value());
  }
  Ok(value)
}

// Construction

impl<T: MaybeSend + 'static> AsyncOptional<T> {
  #[inline]
  fn settling(value: impl Future<Output=Settled<T>> + MaybeSend + 'static) -> Self {
    Self { value: value.boxed_maybe_send() }
  }

  #[inline]
  pub fn empty() -> Self { Self::with(None) }
  /// Creates an optional holding `value` as given, which may be empty.
  #[inline]
  pub fn with(value: Option<T>) -> Self { Self::settling(ready(Ok(value))) }
  #[inline]
  pub fn of(value: T) -> Self { Self::with(Some(value)) }
  /// Creates an optional holding the value that `future` settles to, which may be empty.
  #[inline]
  pub fn with_future(future: impl Future<Output=Option<T>> + MaybeSend + 'static) -> Self {
    Self::settling(future.map(Ok))
  }
  /// Creates an optional holding the value that `future` settles to, or failing with its error.
  #[inline]
  pub fn with_try_future<E: Into<Error>>(future: impl Future<Output=Result<Option<T>, E>> + MaybeSend + 'static) -> Self {
    Self::settling(future.map(|result| result.map_err(Into::into)))
  }

  /// Creates an optional holding `value` that fails with [`Error::IllegalValue`] if `value` is empty.
  ///
  /// The failure does not happen here, even though `value` is already known: it surfaces when the optional (or one
  /// derived from it) is observed.
  #[inline]
  pub fn with_ensured(value: Option<T>) -> Self { Self::with(value).ensured() }
  /// Creates an optional holding the value that `future` settles to, failing with [`Error::IllegalValue`] if it
  /// settles to an empty value.
  #[inline]
  pub fn with_ensured_future(future: impl Future<Output=Option<T>> + MaybeSend + 'static) -> Self {
    Self::with_future(future).ensured()
  }

  fn ensured(self) -> Self {
    Self::settling(async move { ensure(self.value.await?) })
  }

  fn downcast(value: BoxedAny) -> Result<Self, Error> {
    value.downcast::<Self>()
      .map(|optional| *optional)
      .map_err(|_| Error::type_expectation("AsyncOptional"))
  }
}

// Fallbacks

impl<T: MaybeSend + 'static> AsyncOptional<T> {
  /// Returns an optional with this optional's value if it settles to a present one, otherwise with `new_value`.
  pub fn or_use(self, new_value: impl Into<Option<T>>) -> Self {
    let new_value = new_value.into();
    Self::settling(on_absent(self.value, move || ready(Ok(new_value))))
  }
  /// Like [`or_use`](Self::or_use), with a value that `future` settles to. `future` is only polled if this optional
  /// settles to an empty value.
  pub fn or_use_future(self, future: impl Future<Output=Option<T>> + MaybeSend + 'static) -> Self {
    Self::settling(on_absent(self.value, move || future.map(Ok)))
  }

  /// Returns an optional with this optional's value if it settles to a present one, otherwise with the result of
  /// `supplier`.
  pub fn or_compute<V: Into<Option<T>>>(self, supplier: impl FnOnce() -> V + MaybeSend + 'static) -> Self {
    Self::settling(on_absent(self.value, move || ready(Ok(supplier().into()))))
  }
  /// Like [`or_compute`](Self::or_compute), with a supplier that returns a future.
  pub fn or_compute_async<V, Fut>(self, supplier: impl FnOnce() -> Fut + MaybeSend + 'static) -> Self where
    V: Into<Option<T>>,
    Fut: Future<Output=V> + MaybeSend + 'static,
  {
    Self::settling(on_absent(self.value, move || supplier().map(|value: V| -> Settled<T> { Ok(value.into()) })))
  }
  /// Like [`or_compute`](Self::or_compute), with a supplier that may fail.
  pub fn try_or_compute<V, E>(self, supplier: impl FnOnce() -> Result<V, E> + MaybeSend + 'static) -> Self where
    V: Into<Option<T>>,
    E: Into<Error>,
  {
    Self::settling(on_absent(self.value, move || ready(supplier().map(Into::into).map_err(Into::into))))
  }

  /// Returns an optional with this optional's value if it settles to a present one, otherwise adopts the value of the
  /// optional returned by `supplier`.
  pub fn or_flat_compute(self, supplier: impl FnOnce() -> AsyncOptional<T> + MaybeSend + 'static) -> Self {
    Self::settling(on_absent(self.value, move || supplier().value))
  }
  /// Like [`or_flat_compute`](Self::or_flat_compute), with a supplier that returns a future of an optional.
  pub fn or_flat_compute_async<Fut>(self, supplier: impl FnOnce() -> Fut + MaybeSend + 'static) -> Self where
    Fut: Future<Output=AsyncOptional<T>> + MaybeSend + 'static,
  {
    Self::settling(on_absent(self.value, move || supplier().then(|optional| optional.value)))
  }
  /// Like [`or_flat_compute`](Self::or_flat_compute), but fails with [`Error::TypeExpectation`] if `supplier` does not
  /// return an `AsyncOptional<T>`.
  pub fn or_flat_compute_dyn(self, supplier: impl FnOnce() -> BoxedAny + MaybeSend + 'static) -> Self {
    Self::settling(on_absent(self.value, move || async move {
      let optional = Self::downcast(supplier())?;
      optional.value.await
    }))
  }
  /// Like [`or_flat_compute_dyn`](Self::or_flat_compute_dyn), with a supplier that returns a future. The container
  /// type is checked once that future settles.
  pub fn or_flat_compute_dyn_async<Fut>(self, supplier: impl FnOnce() -> Fut + MaybeSend + 'static) -> Self where
    Fut: Future<Output=BoxedAny> + MaybeSend + 'static,
  {
    Self::settling(on_absent(self.value, move || async move {
      let optional = Self::downcast(supplier().await)?;
      optional.value.await
    }))
  }
}

// Transformations

impl<T: MaybeSend + 'static> AsyncOptional<T> {
  /// Keeps the value if `predicate` holds for it, otherwise becomes empty. `predicate` is not invoked if this optional
  /// settles to an empty value.
  pub fn filter<P: Verdict>(self, predicate: impl FnOnce(&T) -> P + MaybeSend + 'static) -> Self {
    Self::settling(on_present(self.value, move |value| {
      let verdict = predicate(&value);
      ready(sift(value, verdict))
    }))
  }
  /// Like [`filter`](Self::filter), with a predicate that returns a future.
  pub fn filter_async<Fut>(self, predicate: impl FnOnce(&T) -> Fut + MaybeSend + 'static) -> Self where
    Fut: Future + MaybeSend + 'static,
    Fut::Output: Verdict,
  {
    Self::settling(on_present(self.value, move |value| {
      let verdict = predicate(&value);
      verdict.map(move |verdict| sift(value, verdict))
    }))
  }

  /// Takes the property at `key` off the value. A missing property, or a value that has no properties, becomes
  /// empty.
  pub fn take<K>(self, key: K) -> AsyncOptional<T::Output> where
    T: Property<K>,
    T::Output: MaybeSend + 'static,
    K: MaybeSend + 'static,
  {
    self.map_opt(move |value| value.property(key))
  }

  /// Maps the value with `mapper`. `mapper` is not invoked if this optional settles to an empty value.
  pub fn map<U: MaybeSend + 'static>(self, mapper: impl FnOnce(T) -> U + MaybeSend + 'static) -> AsyncOptional<U> {
    AsyncOptional::settling(on_present(self.value, move |value| ready(Ok(Some(mapper(value))))))
  }
  /// Maps the value with `mapper`, whose result may itself be empty.
  pub fn map_opt<U: MaybeSend + 'static>(self, mapper: impl FnOnce(T) -> Option<U> + MaybeSend + 'static) -> AsyncOptional<U> {
    AsyncOptional::settling(on_present(self.value, move |value| ready(Ok(mapper(value)))))
  }
  /// Like [`map`](Self::map), with a mapper that returns a future.
  pub fn map_async<U, Fut>(self, mapper: impl FnOnce(T) -> Fut + MaybeSend + 'static) -> AsyncOptional<U> where
    U: MaybeSend + 'static,
    Fut: Future<Output=U> + MaybeSend + 'static,
  {
    AsyncOptional::settling(on_present(self.value, move |value| mapper(value).map(|mapped| Ok(Some(mapped)))))
  }
  /// Like [`map`](Self::map), with a mapper that may fail.
  pub fn try_map<U, E>(self, mapper: impl FnOnce(T) -> Result<U, E> + MaybeSend + 'static) -> AsyncOptional<U> where
    U: MaybeSend + 'static,
    E: Into<Error>,
  {
    AsyncOptional::settling(on_present(self.value, move |value| ready(mapper(value).map(Some).map_err(Into::into))))
  }
  /// Like [`map`](Self::map), with a mapper that returns a future which may fail.
  pub fn try_map_async<U, E, Fut>(self, mapper: impl FnOnce(T) -> Fut + MaybeSend + 'static) -> AsyncOptional<U> where
    U: MaybeSend + 'static,
    E: Into<Error>,
    Fut: Future<Output=Result<U, E>> + MaybeSend + 'static,
  {
    AsyncOptional::settling(on_present(self.value, move |value| {
      mapper(value).map(|mapped| mapped.map(Some).map_err(Into::into))
    }))
  }

  /// Adopts the value of the optional that `mapper` returns for this optional's value. `mapper` is not invoked if
  /// this optional settles to an empty value.
  pub fn flat_map<U: MaybeSend + 'static>(self, mapper: impl FnOnce(T) -> AsyncOptional<U> + MaybeSend + 'static) -> AsyncOptional<U> {
    AsyncOptional::settling(on_present(self.value, move |value| mapper(value).value))
  }
  /// Like [`flat_map`](Self::flat_map), with a mapper that returns a future of an optional.
  pub fn flat_map_async<U, Fut>(self, mapper: impl FnOnce(T) -> Fut + MaybeSend + 'static) -> AsyncOptional<U> where
    U: MaybeSend + 'static,
    Fut: Future<Output=AsyncOptional<U>> + MaybeSend + 'static,
  {
    AsyncOptional::settling(on_present(self.value, move |value| mapper(value).then(|optional| optional.value)))
  }
  /// Like [`flat_map`](Self::flat_map), but fails with [`Error::TypeExpectation`] if `mapper` does not return an
  /// `AsyncOptional<U>`.
  pub fn flat_map_dyn<U: MaybeSend + 'static>(self, mapper: impl FnOnce(T) -> BoxedAny + MaybeSend + 'static) -> AsyncOptional<U> {
    AsyncOptional::settling(on_present(self.value, move |value| async move {
      let optional = AsyncOptional::<U>::downcast(mapper(value))?;
      optional.value.await
    }))
  }
  /// Like [`flat_map_dyn`](Self::flat_map_dyn), with a mapper that returns a future. The container type is checked
  /// once that future settles.
  pub fn flat_map_dyn_async<U, Fut>(self, mapper: impl FnOnce(T) -> Fut + MaybeSend + 'static) -> AsyncOptional<U> where
    U: MaybeSend + 'static,
    Fut: Future<Output=BoxedAny> + MaybeSend + 'static,
  {
    AsyncOptional::settling(on_present(self.value, move |value| async move {
      let optional = AsyncOptional::<U>::downcast(mapper(value).await)?;
      optional.value.await
    }))
  }
}

// Actions

impl<T: MaybeSend + 'static> AsyncOptional<T> {
  async fn act<PF, AF>(
    self,
    on_presence: impl FnOnce(T) -> PF,
    on_absence: impl FnOnce() -> AF,
  ) -> Result<Presence, Error> where
    PF: Future<Output=Result<(), Error>>,
    AF: Future<Output=Result<(), Error>>,
  {
    match self.value.await? {
      Some(value) => {
        on_presence(value).await?;
        Ok(Presence::Present)
      }
      None => {
        on_absence().await?;
        Ok(Presence::Absent)
      }
    }
  }

  /// Performs `action` on the value once it settles, if present.
  pub fn if_present<R: Outcome>(self, action: impl FnOnce(T) -> R + MaybeSend + 'static) -> impl Future<Output=Result<(), Error>> {
    self.act(move |value| ready(action(value).into_outcome()), nothing).map(done)
  }
  /// Like [`if_present`](Self::if_present), with an action that returns a future.
  pub fn if_present_async<Fut>(self, action: impl FnOnce(T) -> Fut + MaybeSend + 'static) -> impl Future<Output=Result<(), Error>> where
    Fut: Future + MaybeSend + 'static,
    Fut::Output: Outcome,
  {
    self.act(move |value| action(value).map(Outcome::into_outcome), nothing).map(done)
  }
  /// Performs `action` once the value settles, if empty.
  pub fn if_absent<R: Outcome>(self, action: impl FnOnce() -> R + MaybeSend + 'static) -> impl Future<Output=Result<(), Error>> {
    self.act(|_| nothing(), move || ready(action().into_outcome())).map(done)
  }
  /// Like [`if_absent`](Self::if_absent), with an action that returns a future.
  pub fn if_absent_async<Fut>(self, action: impl FnOnce() -> Fut + MaybeSend + 'static) -> impl Future<Output=Result<(), Error>> where
    Fut: Future + MaybeSend + 'static,
    Fut::Output: Outcome,
  {
    self.act(|_| nothing(), move || action().map(Outcome::into_outcome)).map(done)
  }

  /// Provides the action to perform on the value if present, returning immediately with a handle whose
  /// [`or`](AsyncEither::or) takes the action to perform if empty.
  ///
  /// ```
  /// # use fluent_optional::AsyncOptional;
  /// # futures::executor::block_on(async {
  /// AsyncOptional::with_future(async { Some(5) })
  ///   .either(|v| assert_eq!(v, 5))
  ///   .or(|| -> () { unreachable!() })
  ///   .await
  ///   .unwrap();
  /// # });
  /// ```
  pub fn either<R: Outcome>(self, on_presence: impl FnOnce(T) -> R + MaybeSend + 'static) -> AsyncEither {
    AsyncEither::new(self.act(move |value| ready(on_presence(value).into_outcome()), nothing))
  }
  /// Like [`either`](Self::either), with a presence action that returns a future.
  pub fn either_async<Fut>(self, on_presence: impl FnOnce(T) -> Fut + MaybeSend + 'static) -> AsyncEither where
    Fut: Future + MaybeSend + 'static,
    Fut::Output: Outcome,
  {
    AsyncEither::new(self.act(move |value| on_presence(value).map(Outcome::into_outcome), nothing))
  }

  /// Performs exactly one of `on_presence` or `on_absence` once the value settles. A `None` absence action is a no-op.
  pub fn either_or<R, AR, A>(
    self,
    on_presence: impl FnOnce(T) -> R + MaybeSend + 'static,
    on_absence: Option<A>,
  ) -> impl Future<Output=Result<(), Error>> where
    R: Outcome,
    AR: Outcome,
    A: FnOnce() -> AR + MaybeSend + 'static,
  {
    self.act(
      move |value| ready(on_presence(value).into_outcome()),
      move || ready(on_absence.map_or(Ok(()), |on_absence| on_absence().into_outcome())),
    ).map(done)
  }
  /// Like [`either_or`](Self::either_or), with actions that return futures.
  pub fn either_or_async<PF, AF, A>(
    self,
    on_presence: impl FnOnce(T) -> PF + MaybeSend + 'static,
    on_absence: Option<A>,
  ) -> impl Future<Output=Result<(), Error>> where
    PF: Future + MaybeSend + 'static,
    PF::Output: Outcome,
    AF: Future + MaybeSend + 'static,
    AF::Output: Outcome,
    A: FnOnce() -> AF + MaybeSend + 'static,
  {
    self.act(
      move |value| on_presence(value).map(Outcome::into_outcome),
      move || async move {
        match on_absence {
          Some(on_absence) => on_absence().await.into_outcome(),
          None => Ok(()),
        }
      },
    ).map(done)
  }
}

// Observation

impl<T: MaybeSend + 'static> AsyncOptional<T> {
  #[inline]
  pub fn has_value(self) -> impl Future<Output=Result<bool, Error>> {
    self.value.map(|settled| settled.map(|value| is_present(&value)))
  }
  #[inline]
  pub fn is_empty(self) -> impl Future<Output=Result<bool, Error>> {
    self.value.map(|settled| settled.map(|value| is_empty(&value)))
  }

  /// Returns the deferred value itself, which may be empty or fail.
  #[inline]
  pub fn get(self) -> BoxedFuture<'static, Settled<T>> { self.value }
  #[inline]
  pub fn get_or_default(self, other: T) -> impl Future<Output=Result<T, Error>> {
    self.value.map(move |settled| settled.map(|value| value.unwrap_or(other)))
  }
  #[inline]
  pub fn get_or_compute(self, supplier: impl FnOnce() -> T + MaybeSend + 'static) -> impl Future<Output=Result<T, Error>> {
    self.value.map(move |settled| settled.map(|value| value.unwrap_or_else(supplier)))
  }
}

impl<T> IntoFuture for AsyncOptional<T> {
  type Output = Settled<T>;
  type IntoFuture = BoxedFuture<'static, Settled<T>>;
  #[inline]
  fn into_future(self) -> Self::IntoFuture { self.value }
}

impl<T> fmt::Debug for AsyncOptional<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AsyncOptional").finish_non_exhaustive()
  }
}

impl<T: MaybeSend + 'static> Default for AsyncOptional<T> {
  #[inline]
  fn default() -> Self { Self::empty() }
}
impl<T: MaybeSend + 'static> From<Option<T>> for AsyncOptional<T> {
  #[inline]
  fn from(value: Option<T>) -> Self { Self::with(value) }
}
impl<T: MaybeSend + 'static> From<Optional<T>> for AsyncOptional<T> {
  #[inline]
  fn from(optional: Optional<T>) -> Self { optional.into_async() }
}


/// Handle returned by [`AsyncOptional::either`].
///
/// Holds the completion of the presence branch, which also carries whether the source optional settled to a present
/// value. [`or`](Self::or) sequences the absence action after that completion, so the pair completes as one. Awaiting
/// the handle directly completes the presence branch alone.
#[must_use = "`either` must be completed with `or`, or awaited"]
pub struct AsyncEither {
  presence: BoxedFuture<'static, Result<Presence, Error>>,
}
impl AsyncEither {
  #[inline]
  fn new(presence: impl Future<Output=Result<Presence, Error>> + MaybeSend + 'static) -> Self {
    Self { presence: presence.boxed_maybe_send() }
  }

  /// Performs `on_absence` if the source optional settled to an empty value, after the presence branch completes.
  pub fn or<R: Outcome>(self, on_absence: impl FnOnce() -> R + MaybeSend + 'static) -> impl Future<Output=Result<(), Error>> {
    self.or_async(move || ready(on_absence().into_outcome()))
  }
  /// Like [`or`](Self::or), with an absence action that returns a future.
  pub fn or_async<Fut>(self, on_absence: impl FnOnce() -> Fut + MaybeSend + 'static) -> impl Future<Output=Result<(), Error>> where
    Fut: Future + MaybeSend + 'static,
    Fut::Output: Outcome,
  {
    async move {
      if self.presence.await? == Presence::Absent {
        on_absence().await.into_outcome()?;
      }
      Ok(())
    }
  }
}
impl IntoFuture for AsyncEither {
  type Output = Result<(), Error>;
  type IntoFuture = BoxedFuture<'static, Result<(), Error>>;
  #[inline]
  fn into_future(self) -> Self::IntoFuture { self.presence.map(done).boxed_maybe_send() }
}
impl fmt::Debug for AsyncEither {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AsyncEither").finish_non_exhaustive()
  }
}
