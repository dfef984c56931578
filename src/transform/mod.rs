//! Structural transforms over JSON value trees.
//!
//! This module hosts the pure core of the crate:
//! - `ns`: convert between JSON values and the namespace projection
//! - `merge`: combine same-shaped mappings into one
//! - `rekey`: rename a key at every nesting depth
//!
//! All three are total over well-formed JSON values: they never fail and
//! never log. Non-merge outcomes are signalled through [`MergeOutcome`].

pub mod merge;
pub mod ns;
pub mod rekey;

pub use merge::{merge, same_structure, MergeOutcome};
pub use ns::{to_namespace, to_value};
pub use rekey::replace_key;
