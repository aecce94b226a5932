pub mod future;
pub mod maybe_send;
pub(crate) mod trace;
