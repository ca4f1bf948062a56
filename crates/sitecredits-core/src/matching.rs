//! Heuristics that associate extracted records with catalog entries
//!
//! Titles are compared by case-insensitive containment, URLs by containment
//! after stripping scheme, `www.` and trailing slashes.

use url::{ParseError, Url};

use crate::types::CreatorRecord;

/// Check whether two titles likely name the same project.
///
/// Either lowercased title containing the other counts as a match.
/// A blank title never matches.
///
/// # Examples
/// ```
/// use sitecredits_core::matching::titles_match;
///
/// assert!(titles_match("Budget Buddy", "budget buddy - track your spending"));
/// assert!(!titles_match("Budget Buddy", "Recipe Box"));
/// assert!(!titles_match("", "Recipe Box"));
/// ```
pub fn titles_match(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a.trim().is_empty() || b.trim().is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// Normalize a URL for comparison.
///
/// Lowercases, removes every `http://`, `https://` and `www.` occurrence,
/// then strips trailing slashes.
///
/// # Examples
/// ```
/// use sitecredits_core::matching::normalize_url;
///
/// assert_eq!(normalize_url("HTTPS://www.Example.com/app/"), "example.com/app");
/// ```
pub fn normalize_url(url: &str) -> String {
    url.to_lowercase()
        .replace("http://", "")
        .replace("https://", "")
        .replace("www.", "")
        .trim_end_matches('/')
        .to_string()
}

/// Check whether two URLs likely point to the same site.
///
/// Matches when the normalized forms are equal or one contains the other.
/// A URL that normalizes to an empty string never matches.
pub fn urls_match(a: &str, b: &str) -> bool {
    let a = normalize_url(a);
    let b = normalize_url(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a == b || a.contains(&b) || b.contains(&a)
}

/// Host part of a URL, lowercased, without `www.` or port.
///
/// Scheme-less input such as `netflix.com/title` is read as `http://`.
/// Returns `None` for a URL without a host.
pub fn host(url: &str) -> Option<String> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("http://{}", url.trim_start_matches('/'))).ok()?
        }
        Err(_) => return None,
    };
    let host = parsed.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    (!host.is_empty()).then(|| host.to_string())
}

/// Whether `host` is `domain` or one of its subdomains.
pub fn host_in_domain(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Creator records keyed by lowercased title, in first-seen order.
///
/// Inserting a title that is already present replaces its record but keeps
/// the original position, so iteration order is first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct CreatorIndex {
    entries: Vec<(String, CreatorRecord)>,
}

impl CreatorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its lowercased title.
    pub fn insert(&mut self, record: CreatorRecord) {
        let key = record.title.to_lowercase();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = record,
            None => self.entries.push((key, record)),
        }
    }

    /// First record whose title matches `title`.
    pub fn find_by_title(&self, title: &str) -> Option<&CreatorRecord> {
        self.entries
            .iter()
            .find(|(key, _)| titles_match(key, title))
            .map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CreatorRecord> {
        self.entries.iter().map(|(_, record)| record)
    }
}

impl FromIterator<CreatorRecord> for CreatorIndex {
    fn from_iter<I: IntoIterator<Item = CreatorRecord>>(iter: I) -> Self {
        let mut index = Self::new();
        for record in iter {
            index.insert(record);
        }
        index
    }
}
