//! Data types shared by the compose executor and its plugins.

mod error;
pub use error::ModelError;

mod domain;
pub use domain::*;
