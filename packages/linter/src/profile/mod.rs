//! Lint profiles: which tags hold prose and which rules to ignore where.
//!
//! A profile replaces CSS-style selector matching with an explicit
//! classification of tag names and a list of tag selectors per set of
//! suppressed grammar rules.

mod config;
mod core;
mod loader;
mod types;

pub use config::create_cnxml_profile;
pub use core::LintProfile;
pub use loader::{load_profile, parse_profile, profile_to_yaml};
pub use types::{SuppressionRule, SuppressionSet, TagClass, TagSelector};
