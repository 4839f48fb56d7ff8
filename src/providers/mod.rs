//! SMS provider implementations.

pub(crate) mod traits;

pub mod net2phone;

pub use traits::Provider;
