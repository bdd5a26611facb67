pub mod compression;
pub mod error;
#[cfg(feature = "api")]
pub mod fetch;
pub mod location;
pub mod observation;
