//! Strata domain core.
//!
//! Leaf logic shared by every other crate in the workspace: the error
//! taxonomy, database type aliases, the typed three-phase prompt content
//! model, placeholder substitution, and previous-output splicing.

pub mod error;
pub mod prompt;
pub mod splice;
pub mod substitution;
pub mod types;
