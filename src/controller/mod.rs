pub mod focus;
pub mod host;
pub mod keys;
pub mod modal;

#[cfg(test)]
pub(crate) mod testing;

pub use focus::*;
pub use host::*;
pub use keys::*;
pub use modal::*;
