//! Configuration for the combiner
//!
//! Configuration is optional. When no path is given, the loader searches
//! from the fragment directory upward for one of:
//!
//! - `.aclcombinerrc.json` (JSON with comments and trailing commas)
//! - `.aclcombinerrc.toml`
//! - `acl-combiner.yaml` / `acl-combiner.yml`
//! - `acl-combiner.json`
//!
//! ```jsonc
//! {
//!   "sections": {
//!     "allow": ["acls", "groups"],
//!     "shapes": { "ipsets": "Object" }
//!   },
//!   "files": { "extensions": ["json", "hujson"], "exclude": ["drafts/**"] },
//!   "output": { "useTabs": true }
//! }
//! ```

mod combiner_config;
mod loader;

pub use combiner_config::{
    CombinerConfig, FilesConfiguration, OutputConfiguration, SectionsConfiguration,
};
pub use loader::{CONFIG_FILE_NAMES, ConfigLoader};
