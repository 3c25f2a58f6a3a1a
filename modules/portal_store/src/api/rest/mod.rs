//! REST boundary helpers

pub mod error;

pub use error::{map_repository_error, Problem};
