//! Chainable containers of possibly-absent values.
//!
//! [`Optional`] wraps a plain value and runs every operation immediately. [`AsyncOptional`] wraps a value that may
//! still be a deferred computation, and runs every operation once that computation settles. Both share the same notion
//! of emptiness ([`empty::is_empty`]) and the same chaining protocol: `map`, `filter`, `flat_map`, fallbacks
//! (`or_use`, `or_compute`, `or_flat_compute`), presence tests, and side-effect actions.
//!
//! ```
//! # use fluent_optional::{AsyncOptional, Optional};
//! assert_eq!(Optional::of(5).map(|x| x + 1).map(|x| x + 1).get(), Some(7));
//!
//! # futures::executor::block_on(async {
//! let value = AsyncOptional::with_future(async { None::<i32> })
//!   .or_compute(|| 8)
//!   .get()
//!   .await;
//! assert_eq!(value.unwrap(), Some(8));
//! # });
//! ```

pub mod util;
pub mod empty;
pub mod error;
pub mod property;

pub mod optional;
pub mod async_optional;

pub(crate) use util::trace::trace;

pub use async_optional::{AsyncEither, AsyncOptional};
pub use error::Error;
pub use optional::{Optional, OptionalEither};
pub use property::Property;
pub use util::future::{Outcome, Settled, Verdict};
