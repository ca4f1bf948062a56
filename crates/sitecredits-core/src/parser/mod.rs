//! HTML parsers for the showcase page
//!
//! This module contains the two extraction passes and their combination:
//! - `patterns`: regex extraction over the raw markup
//! - `walker`: tag-event walk over the parsed DOM

pub mod patterns;
pub mod walker;

use std::collections::HashSet;

use tracing::debug;

use crate::error::Result;
use crate::types::CreatorRecord;

// Re-export main parsing functions
pub use patterns::{extract_by_patterns, extract_project_credits, is_social_link};
pub use walker::{walk_creator_records, CreditWalker};

/// Extract creator records with both passes.
///
/// Regex records come first. Walker records are appended only when no
/// regex record has the same title, compared case-insensitively.
pub fn extract_creator_records(html: &str) -> Result<Vec<CreatorRecord>> {
    let mut records = extract_by_patterns(html)?;
    let mut seen: HashSet<String> = records.iter().map(|r| r.title.to_lowercase()).collect();

    let walked = walk_creator_records(html);
    let walked_total = walked.len();
    for record in walked {
        if seen.insert(record.title.to_lowercase()) {
            records.push(record);
        }
    }

    debug!(
        total = records.len(),
        walked = walked_total,
        "combined creator records"
    );
    Ok(records)
}
