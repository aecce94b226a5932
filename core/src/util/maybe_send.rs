use std::any::Any;
use std::future::Future;
use std::pin::Pin;

/// A trait alias that enforces `Send` only on native platforms.
pub use maybe_send::MaybeSend;

/// A boxed future that is `Send` only on native platforms.
#[cfg(not(target_arch = "wasm32"))]
pub type BoxedFuture<'a, T> = Pin<Box<dyn Future<Output=T> + Send + 'a>>;
/// A boxed future that is `Send` only on native platforms.
#[cfg(target_arch = "wasm32")]
pub type BoxedFuture<'a, T> = Pin<Box<dyn Future<Output=T> + 'a>>;

/// A boxed opaque value that is `Send` only on native platforms.
#[cfg(not(target_arch = "wasm32"))]
pub type BoxedAny = Box<dyn Any + Send>;
/// A boxed opaque value that is `Send` only on native platforms.
#[cfg(target_arch = "wasm32")]
pub type BoxedAny = Box<dyn Any>;

/// A future that can be boxed into a [`BoxedFuture`], which is `Send` only on native platforms.
pub trait MaybeSendFuture<'a>: Future {
  fn boxed_maybe_send(self) -> BoxedFuture<'a, Self::Output>;
}

#[cfg(not(target_arch = "wasm32"))]
mod maybe_send {
  use std::future::Future;

  use super::BoxedFuture;

  pub trait MaybeSend: Send {}

  impl<T> MaybeSend for T where T: Send {}

  impl<'a, F: Future + Send + 'a> super::MaybeSendFuture<'a> for F {
    #[inline]
    fn boxed_maybe_send(self) -> BoxedFuture<'a, F::Output> { Box::pin(self) }
  }
}

#[cfg(target_arch = "wasm32")]
mod maybe_send {
  use std::future::Future;

  use super::BoxedFuture;

  pub trait MaybeSend {}

  impl<T> MaybeSend for T {}

  impl<'a, F: Future + 'a> super::MaybeSendFuture<'a> for F {
    #[inline]
    fn boxed_maybe_send(self) -> BoxedFuture<'a, F::Output> { Box::pin(self) }
  }
}
