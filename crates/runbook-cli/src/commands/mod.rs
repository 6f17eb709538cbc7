//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`generate`] - Render runbooks to an output directory
//! - [`validate`] - Check a rule file
//! - [`inspect`] - Show planned runbooks without rendering
//! - [`clean`] - Remove generated runbooks

pub mod clean;
pub mod generate;
pub mod inspect;
pub mod validate;

pub use clean::CleanCommand;
pub use generate::GenerateCommand;
pub use inspect::InspectCommand;
pub use validate::ValidateCommand;
