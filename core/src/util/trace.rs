/// Emits a `trace` level event when the `tracing` feature is enabled, and nothing otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace {
  ($($arg:tt)*) => { tracing::trace!($($arg)*) };
}
#[cfg(not(feature = "tracing"))]
macro_rules! trace {
  ($($arg:tt)*) => {};
}

pub(crate) use trace;
