//! Report generation for analysis results
//!
//! Output formatters for a fetched result set:
//!
//! - **HTML**: self-contained page with one section per result entry
//!   (embedded charts rendered inline, everything else pretty-printed)
//! - **JSON**: machine-readable dump of the section mapping
//!
//! # Usage
//!
//! ```ignore
//! use edaview::report;
//!
//! // Picks the format from the extension
//! report::generate("eda.html", &results)?;  // HTML
//! report::generate("eda.json", &results)?;  // JSON
//! ```

pub mod html;
pub mod json;

use crate::render::{ResultSet, Section, SectionBody};
use std::io;
use std::path::Path;

/// Generate a report in the appropriate format based on file extension.
pub fn generate<P: AsRef<Path>>(path: P, results: &ResultSet) -> io::Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut file = std::fs::File::create(path)?;

    match ext.as_str() {
        "html" | "htm" => html::write_sections(&mut file, results),
        _ => json::write(&mut file, results),
    }
}

/// Section counts shown at the top of reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub markup: usize,
    pub text: usize,
}

impl Summary {
    pub fn from_sections(sections: &[Section]) -> Self {
        let mut summary = Self::default();
        summary.total = sections.len();

        for section in sections {
            match section.body {
                SectionBody::Markup(_) => summary.markup += 1,
                SectionBody::Text(_) => summary.text += 1,
            }
        }

        summary
    }
}
