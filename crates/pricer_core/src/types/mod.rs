//! Core value types.
//!
//! - [`OptionParams`]: validated, immutable European option descriptor
//! - [`ParameterError`]: rejection reasons for an option descriptor

pub mod error;
pub mod option;

pub use error::ParameterError;
pub use option::OptionParams;
