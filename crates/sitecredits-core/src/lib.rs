//! sitecredits core library
//!
//! This crate pulls creator attribution out of a saved showcase page and
//! merges it into a JSON catalog of sites.
//!
//! # Features
//! - Regex and DOM-walk extraction of "Title, by Creator" credits
//! - Project link extraction with social-network filtering
//! - Title and URL matching against catalog entries
//! - Hosting platform detection with logo paths
//! - Order-preserving catalog rewrite

pub mod catalog;
pub mod error;
pub mod matching;
pub mod parser;
pub mod types;
pub mod updater;

// Re-export main types for convenience
pub use catalog::Catalog;
pub use error::{CreditsError, Result};
pub use types::{CreatorRecord, MatchedSite, Platform, ProjectCredit, SiteEntry, UpdateReport};
pub use updater::{CreditsUpdater, Strategy, UpdaterConfig};
