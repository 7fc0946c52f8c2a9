//! The combine pipeline: load, discover, merge, sort, render

use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::CombinerConfig;
use crate::discovery::FragmentDiscovery;
use crate::document::Document;
use crate::format::{PrinterOptions, serialize};
use crate::loader::load_file;
use crate::merge::{MergeReport, merge_documents};
use crate::sections::SectionMap;
use crate::Result;

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineOutcome {
    /// The combined document, ending with a newline
    pub rendered: String,
    pub report: MergeReport,
}

/// Combines a base policy with the fragments found under a directory
#[derive(Debug, Clone)]
pub struct Combiner {
    pub sections: SectionMap,
    pub discovery: FragmentDiscovery,
    pub printer: PrinterOptions,
}

impl Combiner {
    /// Default sections and formatting for fragments under `fragment_dir`
    pub fn new(fragment_dir: impl AsRef<Path>) -> Self {
        Self::from_config(&CombinerConfig::default(), fragment_dir)
    }

    pub fn from_config(config: &CombinerConfig, fragment_dir: impl AsRef<Path>) -> Self {
        Self {
            sections: config.section_map(),
            discovery: config.discovery(fragment_dir.as_ref()),
            printer: config.printer_options(),
        }
    }

    /// Run the whole pipeline without writing anything
    ///
    /// Without a base path the base starts as an empty object. Fragments are
    /// parsed in parallel; when several fail, the error of the first one in
    /// discovery order is returned.
    pub fn run(&self, base_path: Option<&Path>) -> Result<CombineOutcome> {
        let mut base = match base_path {
            Some(path) => load_file(path)?,
            None => {
                debug!("No parent file given, starting from an empty document");
                Document::empty()
            }
        };

        let paths = self.discovery.discover()?;
        let fragments = paths
            .par_iter()
            .map(load_file)
            .collect::<Vec<Result<Document>>>()
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        let report = merge_documents(&self.sections, &mut base, fragments)?;
        info!(
            "Merged {} fragments, {} entries appended",
            report.fragments,
            report.total_appended()
        );

        base.sort_members();
        let rendered = serialize(&base, &self.printer);

        Ok(CombineOutcome { rendered, report })
    }
}
