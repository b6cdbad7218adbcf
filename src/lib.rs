// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. release::ReleaseNotes)
    clippy::module_name_repetitions
)]

//! # Micronize
//!
//! Converts Markdown documents and GitHub release notes to Micron, the page
//! markup served by NomadNet nodes.
//!
//! Conversion is line-for-line: every source line becomes one Micron line,
//! classified by an ordered rule table and rewritten in place. There is no
//! syntax tree.
//!
//! ## Modules
//!
//! - [`transduce`]: The line transducer and its rule profiles
//! - [`micron`]: Micron markup vocabulary
//! - [`document`]: Source and output document types
//! - [`site`]: Converting files and content trees
//! - [`release`]: Release announcement pages and asset caching
//! - [`watcher`]: File watching
//! - [`config`]: Saved command-line defaults
//! - [`perf`]: Timing and debug event log

pub mod config;
pub mod document;
pub mod micron;
pub mod perf;
pub mod release;
pub mod site;
pub mod transduce;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::document::{MicronDocument, SourceDocument};
    pub use crate::transduce::{Profile, Transducer, transduce};
}
