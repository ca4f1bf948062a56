//! Main sitecredits API
//!
//! This module ties the parsers to the catalog: it reads the showcase HTML,
//! extracts credits with one of two strategies, merges them into the catalog
//! and writes the catalog back.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{CreditsError, Result};
use crate::matching::{urls_match, CreatorIndex};
use crate::parser::{extract_creator_records, extract_project_credits};
use crate::types::{CreatorRecord, MatchedSite, Platform, ProjectCredit, SiteEntry, UpdateReport};

/// Default location of the saved showcase page
pub const DEFAULT_HTML_PATH: &str =
    "original_site/What people are vibe coding (and actually using).html";

/// Default location of the site catalog
pub const DEFAULT_CATALOG_PATH: &str = "public/sites.json";

/// How extracted credits are associated with catalog entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Match credit titles against entry titles
    ByTitle,
    /// Match credit project links against entry URLs
    ByUrl,
}

impl Strategy {
    /// Platform recorded when an entry's URL is not on a known host.
    pub fn fallback_platform(&self) -> Platform {
        match self {
            Strategy::ByTitle => Platform::Custom,
            Strategy::ByUrl => Platform::Web,
        }
    }
}

/// Configuration for an update run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdaterConfig {
    /// Showcase HTML to extract credits from
    pub html_path: PathBuf,
    /// Catalog JSON to update in place
    pub catalog_path: PathBuf,
    /// Skip writing the catalog back (default: false)
    pub dry_run: bool,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            html_path: PathBuf::from(DEFAULT_HTML_PATH),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            dry_run: false,
        }
    }
}

/// Creator credit updater for a site catalog
///
/// # Example
/// ```no_run
/// use sitecredits_core::{CreditsUpdater, Strategy};
///
/// # fn example() -> Result<(), sitecredits_core::CreditsError> {
/// let updater = CreditsUpdater::new();
/// let report = updater.run(Strategy::ByUrl)?;
/// println!("Updated {}/{} sites", report.updated(), report.total);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CreditsUpdater {
    config: UpdaterConfig,
}

impl CreditsUpdater {
    /// Create an updater using the default paths.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: UpdaterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    /// Read the showcase HTML.
    ///
    /// # Errors
    /// Returns `CreditsError::Io` if the file cannot be read as UTF-8.
    pub fn read_html(&self) -> Result<String> {
        let path = &self.config.html_path;
        fs::read_to_string(path).map_err(|e| CreditsError::io(path, e))
    }

    /// Creator records used by [`Strategy::ByTitle`].
    pub fn creator_records(&self) -> Result<Vec<CreatorRecord>> {
        extract_creator_records(&self.read_html()?)
    }

    /// Project credits used by [`Strategy::ByUrl`].
    pub fn project_credits(&self) -> Result<Vec<ProjectCredit>> {
        extract_project_credits(&self.read_html()?)
    }

    /// Extract credits, merge them into the catalog and save it.
    ///
    /// The catalog is written only after every entry has been processed,
    /// and not at all in dry-run mode.
    ///
    /// # Errors
    /// - `CreditsError::Io` if a file cannot be read or written
    /// - `CreditsError::Json` / `InvalidCatalog` / `MissingField` for a bad catalog
    pub fn run(&self, strategy: Strategy) -> Result<UpdateReport> {
        let html = self.read_html()?;
        let mut catalog = Catalog::load(&self.config.catalog_path)?;

        let (extracted, matched) = match strategy {
            Strategy::ByTitle => {
                let records = extract_creator_records(&html)?;
                info!(records = records.len(), "extracted creator records");
                (records.len(), apply_title_credits(&mut catalog, &records))
            }
            Strategy::ByUrl => {
                let credits = extract_project_credits(&html)?;
                info!(credits = credits.len(), "extracted project credits");
                (credits.len(), apply_url_credits(&mut catalog, &credits))
            }
        };

        let saved = !self.config.dry_run;
        if saved {
            catalog.save(&self.config.catalog_path)?;
        }
        info!(
            updated = matched.len(),
            total = catalog.len(),
            saved,
            "catalog update finished"
        );

        Ok(UpdateReport {
            extracted,
            matched,
            total: catalog.len(),
            saved,
        })
    }
}

/// Annotate entries whose titles match a creator record.
///
/// Records are indexed by lowercased title; for each entry the first
/// matching record in index order wins.
pub fn apply_title_credits(catalog: &mut Catalog, records: &[CreatorRecord]) -> Vec<MatchedSite> {
    let index: CreatorIndex = records.iter().cloned().collect();
    let fallback = Strategy::ByTitle.fallback_platform();
    let mut matched = Vec::new();

    for entry in catalog.entries_mut() {
        let Some(record) = index.find_by_title(entry.title()) else {
            continue;
        };
        let platform = Platform::detect(entry.url(), fallback);
        entry.set("creator", record.creator.as_str());
        entry.set("creator_url", record.creator_url.as_str());
        set_platform(entry, platform);

        debug!(title = entry.title(), creator = %record.creator, %platform, "matched by title");
        matched.push(matched_site(entry, &record.creator, platform));
    }

    matched
}

/// Annotate entries whose URLs match a project credit.
///
/// For each entry the first matching credit in extraction order wins.
pub fn apply_url_credits(catalog: &mut Catalog, credits: &[ProjectCredit]) -> Vec<MatchedSite> {
    let fallback = Strategy::ByUrl.fallback_platform();
    let mut matched = Vec::new();

    for entry in catalog.entries_mut() {
        let Some(credit) = credits
            .iter()
            .find(|c| urls_match(entry.url(), &c.project_url))
        else {
            continue;
        };
        let platform = Platform::detect(entry.url(), fallback);
        entry.set("creator", credit.creator.as_str());
        entry.set("creator_url", credit.creator_url.as_str());
        entry.set("description", credit.description.as_str());
        set_platform(entry, platform);

        debug!(title = entry.title(), creator = %credit.creator, %platform, "matched by url");
        matched.push(matched_site(entry, &credit.creator, platform));
    }

    matched
}

fn set_platform(entry: &mut SiteEntry, platform: Platform) {
    entry.set("platform", platform.as_str());
    entry.set("image", platform.logo_path());
}

fn matched_site(entry: &SiteEntry, creator: &str, platform: Platform) -> MatchedSite {
    MatchedSite {
        title: entry.title().to_string(),
        url: entry.url().to_string(),
        creator: creator.to_string(),
        platform,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, creator: &str) -> CreatorRecord {
        CreatorRecord {
            title: title.to_string(),
            creator: creator.to_string(),
            creator_url: format!("https://bsky.app/{}", creator.to_lowercase()),
        }
    }

    fn credit(project_url: &str, creator: &str) -> ProjectCredit {
        ProjectCredit {
            description: format!("Built by {creator}"),
            creator: creator.to_string(),
            creator_url: format!("https://bsky.app/{}", creator.to_lowercase()),
            project_url: project_url.to_string(),
        }
    }

    #[test]
    fn test_default_config() {
        let config = UpdaterConfig::default();
        assert_eq!(config.catalog_path, PathBuf::from("public/sites.json"));
        assert!(config.html_path.ends_with("What people are vibe coding (and actually using).html"));
        assert!(!config.dry_run);
    }

    #[test]
    fn test_fallback_platforms() {
        assert_eq!(Strategy::ByTitle.fallback_platform(), Platform::Custom);
        assert_eq!(Strategy::ByUrl.fallback_platform(), Platform::Web);
    }

    #[test]
    fn test_apply_title_credits() {
        let mut catalog = Catalog::new(vec![
            SiteEntry::new("Budget Buddy", "https://budget.vercel.app"),
            SiteEntry::new("Unrelated", "https://u.dev"),
            SiteEntry::new("Recipe Box: cook more", "https://recipes.example.com"),
        ]);
        let records = vec![record("budget buddy", "Ann"), record("Recipe Box", "Bob")];

        let matched = apply_title_credits(&mut catalog, &records);

        assert_eq!(matched.len(), 2);
        let budget = &catalog.entries()[0];
        assert_eq!(budget.creator(), Some("Ann"));
        assert_eq!(budget.creator_url(), Some("https://bsky.app/ann"));
        assert_eq!(budget.platform(), Some("vercel"));
        assert_eq!(budget.image(), Some("/images/vercel-logo.svg"));

        let unrelated = &catalog.entries()[1];
        assert_eq!(unrelated, &SiteEntry::new("Unrelated", "https://u.dev"));

        let recipes = &catalog.entries()[2];
        assert_eq!(recipes.creator(), Some("Bob"));
        assert_eq!(recipes.platform(), Some("custom"));
        assert!(recipes.description().is_none());
    }

    #[test]
    fn test_apply_title_credits_first_record_wins() {
        let mut catalog = Catalog::new(vec![SiteEntry::new("Notes App", "https://n.dev")]);
        let records = vec![record("Notes", "Ann"), record("Notes App", "Bob")];
        let matched = apply_title_credits(&mut catalog, &records);
        assert_eq!(matched[0].creator, "Ann");
    }

    #[test]
    fn test_apply_title_credits_duplicate_title_last_record_wins() {
        let mut catalog = Catalog::new(vec![SiteEntry::new("Notes", "https://n.dev")]);
        let records = vec![record("Notes", "Ann"), record("NOTES", "Bob")];
        let matched = apply_title_credits(&mut catalog, &records);
        assert_eq!(matched[0].creator, "Bob");
    }

    #[test]
    fn test_apply_url_credits() {
        let mut catalog = Catalog::new(vec![
            SiteEntry::new("Habits", "https://www.habits.replit.app/"),
            SiteEntry::new("Maps", "https://maps.example.org"),
            SiteEntry::new("Other", "https://other.dev"),
        ]);
        let credits = vec![
            credit("https://habits.replit.app", "Ann"),
            credit("http://maps.example.org/start", "Cy"),
        ];

        let matched = apply_url_credits(&mut catalog, &credits);

        assert_eq!(matched.len(), 2);
        let habits = &catalog.entries()[0];
        assert_eq!(habits.creator(), Some("Ann"));
        assert_eq!(habits.description(), Some("Built by Ann"));
        assert_eq!(habits.platform(), Some("replit"));
        assert_eq!(habits.image(), Some("/images/replit-logo.svg"));

        let maps = &catalog.entries()[1];
        assert_eq!(maps.platform(), Some("web"));
        assert_eq!(maps.image(), Some("/images/web-logo.svg"));

        assert!(catalog.entries()[2].creator().is_none());
        assert_eq!(matched[1].url, "https://maps.example.org");
    }

    #[test]
    fn test_apply_url_credits_blank_url_never_matches() {
        let mut catalog = Catalog::new(vec![SiteEntry::new("Blank", "")]);
        let credits = vec![credit("https://a.dev", "Ann")];
        assert!(apply_url_credits(&mut catalog, &credits).is_empty());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut catalog = Catalog::new(vec![SiteEntry::new("Budget", "https://b.vercel.app")]);
        let records = vec![record("Budget", "Ann")];
        apply_title_credits(&mut catalog, &records);
        let once = catalog.clone();
        apply_title_credits(&mut catalog, &records);
        assert_eq!(catalog, once);
    }

    #[test]
    fn test_run_missing_html() {
        let dir = tempfile::tempdir().unwrap();
        let updater = CreditsUpdater::with_config(UpdaterConfig {
            html_path: dir.path().join("missing.html"),
            catalog_path: dir.path().join("sites.json"),
            dry_run: true,
        });
        let result = updater.run(Strategy::ByTitle);
        match result {
            Err(CreditsError::Io { path, .. }) => assert!(path.ends_with("missing.html")),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }
}
