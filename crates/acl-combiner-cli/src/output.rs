//! Run summary printed after a verbose run
//!
//! Written to stderr so it never mixes with a document sent to stdout.

use acl_combiner_core::{MergeReport, Sink};
use colored::*;

/// What a successful run merged and where it went
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub fragments: usize,
    /// Appended entries per section, in first-touched order
    pub sections: Vec<(String, usize)>,
    pub destination: String,
}

impl RunSummary {
    pub fn new(report: &MergeReport, sink: &Sink) -> Self {
        Self {
            fragments: report.fragments,
            sections: report
                .appended
                .iter()
                .map(|(name, count)| (name.clone(), *count))
                .collect(),
            destination: sink.display_name(),
        }
    }

    pub fn total_appended(&self) -> usize {
        self.sections.iter().map(|(_, count)| count).sum()
    }

    pub fn print(&self) {
        eprintln!("{}", self.render());
    }

    fn render(&self) -> String {
        let mut lines = vec![
            format!("{}", "Summary:".bold()),
            format!("  Fragments merged: {}", self.fragments.to_string().green()),
        ];

        if self.sections.is_empty() {
            lines.push("  Nothing appended".to_string());
        } else {
            lines.push(format!(
                "  Entries appended: {}",
                self.total_appended().to_string().green()
            ));
            for (name, count) in &self.sections {
                lines.push(format!("    {}: {}", name.cyan(), count));
            }
        }

        lines.push(format!("  Written to: {}", self.destination));
        lines.join("\n")
    }
}
