//! ACL Combiner Core
//!
//! Merges policy fragments written in HuJSON (JSON with comments and trailing
//! commas) into one base policy, keeping the comments of every file.
//!
//! The pipeline is: [`loader`] parses files into [`document::Document`]s,
//! [`merge`] folds fragments into the base following a [`sections::SectionMap`],
//! and [`format`] renders the result back to text.
//!
//! ```rust
//! use acl_combiner_core::{SectionMap, load_str, merge_documents, serialize, PrinterOptions};
//!
//! let mut base = load_str("{\"acls\": [\"base\"]}", "policy.hujson").unwrap();
//! let fragment = load_str("{\"acls\": [\"team\"]}", "team.hujson").unwrap();
//!
//! merge_documents(&SectionMap::default(), &mut base, [fragment]).unwrap();
//! assert_eq!(
//!     serialize(&base, &PrinterOptions::default()),
//!     "{\n\t\"acls\": [\"base\", \"team\"],\n}\n"
//! );
//! ```

pub mod combine;
pub mod config;
pub mod discovery;
pub mod document;
pub mod error;
pub mod format;
pub mod loader;
pub mod merge;
pub mod result;
pub mod sections;
pub mod sink;
pub mod syntax;

// Re-export commonly used types
pub use combine::{CombineOutcome, Combiner};
pub use config::{CombinerConfig, ConfigLoader};
pub use discovery::FragmentDiscovery;
pub use document::{Array, Document, Member, Object, Value};
pub use error::{CombinerError, ErrorKind};
pub use format::{PrinterOptions, serialize};
pub use loader::{load_file, load_reader, load_str};
pub use merge::{MergeReport, merge_documents};
pub use result::Result;
pub use sections::{SectionMap, SectionShape, allowed_sections};
pub use sink::Sink;

/// Initialize the tracing subscriber for logging
///
/// Logs go to stderr so that stdout can carry the combined document.
/// `RUST_LOG` takes precedence over `default_directive`.
pub fn init_tracing(default_directive: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false),
        )
        .try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
