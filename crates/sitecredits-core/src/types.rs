//! Data types for sitecredits
//!
//! This module contains the catalog entry wrapper, the records pulled out of
//! the showcase HTML and the report produced by an update run.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Hosting platform a site was built or deployed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Replit,
    Lovable,
    Vercel,
    Netlify,
    Cloudflare,
    Claude,
    /// Fallback used when matching by title
    Custom,
    /// Fallback used when matching by URL
    Web,
}

/// URL fragments identifying each known platform, checked in order.
const PLATFORM_MARKERS: &[(&[&str], Platform)] = &[
    (&["replit.app", "repl.it"], Platform::Replit),
    (&["lovable.app", "lovable.dev"], Platform::Lovable),
    (&["vercel.app"], Platform::Vercel),
    (&["netlify.app"], Platform::Netlify),
    (&["pages.dev"], Platform::Cloudflare),
    (&["claude.ai"], Platform::Claude),
];

impl Platform {
    /// Detect the platform from a site URL.
    ///
    /// The URL is lowercased and checked against a fixed table of hosting
    /// domains; the first hit wins. Returns `fallback` when nothing matches.
    ///
    /// # Examples
    /// ```
    /// use sitecredits_core::Platform;
    ///
    /// assert_eq!(Platform::detect("https://todo.Vercel.app/", Platform::Web), Platform::Vercel);
    /// assert_eq!(Platform::detect("https://example.com", Platform::Custom), Platform::Custom);
    /// ```
    pub fn detect(url: &str, fallback: Platform) -> Platform {
        let url = url.to_lowercase();
        PLATFORM_MARKERS
            .iter()
            .find(|(markers, _)| markers.iter().any(|m| url.contains(m)))
            .map(|(_, platform)| *platform)
            .unwrap_or(fallback)
    }

    /// Lowercase name as written into the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Replit => "replit",
            Platform::Lovable => "lovable",
            Platform::Vercel => "vercel",
            Platform::Netlify => "netlify",
            Platform::Cloudflare => "cloudflare",
            Platform::Claude => "claude",
            Platform::Custom => "custom",
            Platform::Web => "web",
        }
    }

    /// Public path of the platform logo, e.g. `/images/vercel-logo.svg`.
    pub fn logo_path(&self) -> String {
        format!("/images/{}-logo.svg", self.as_str())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creator attribution found next to a project title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorRecord {
    /// Project title as written on the page
    pub title: String,
    /// Creator display name
    pub creator: String,
    /// Creator profile URL
    pub creator_url: String,
}

/// Creator attribution paired with the project link that follows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCredit {
    /// Project description as written on the page
    pub description: String,
    /// Creator display name
    pub creator: String,
    /// Creator profile URL
    pub creator_url: String,
    /// Link to the project itself
    pub project_url: String,
}

/// One site record of the catalog.
///
/// Kept as a raw JSON object so fields this crate does not know about
/// (`id`, `tags`, `featured`, ...) survive a rewrite in their original order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteEntry(Map<String, Value>);

impl SiteEntry {
    /// Create an entry with just a title and URL.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("title".to_string(), Value::String(title.into()));
        fields.insert("url".to_string(), Value::String(url.into()));
        Self(fields)
    }

    /// Wrap an existing JSON object.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// String value of a field, `None` if absent or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn title(&self) -> &str {
        self.get_str("title").unwrap_or_default()
    }

    pub fn url(&self) -> &str {
        self.get_str("url").unwrap_or_default()
    }

    pub fn creator(&self) -> Option<&str> {
        self.get_str("creator")
    }

    pub fn creator_url(&self) -> Option<&str> {
        self.get_str("creator_url")
    }

    pub fn platform(&self) -> Option<&str> {
        self.get_str("platform")
    }

    pub fn image(&self) -> Option<&str> {
        self.get_str("image")
    }

    pub fn description(&self) -> Option<&str> {
        self.get_str("description")
    }

    /// Set a string field. An existing key keeps its position; a new key is
    /// appended after the existing ones.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), Value::String(value.into()));
    }

    /// Underlying JSON object.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// A catalog entry that received creator information during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedSite {
    pub title: String,
    pub url: String,
    pub creator: String,
    pub platform: Platform,
}

/// Outcome of one update run
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateReport {
    /// Number of credits extracted from the page
    pub extracted: usize,
    /// Matched sites in catalog order
    pub matched: Vec<MatchedSite>,
    /// Number of entries in the catalog
    pub total: usize,
    /// Whether the catalog was written back
    pub saved: bool,
}

impl UpdateReport {
    /// Number of catalog entries that were updated.
    pub fn updated(&self) -> usize {
        self.matched.len()
    }
}
