//! Regex extraction over the raw showcase HTML
//!
//! The showcase page renders each credit as
//! `<span>Title, by </span><a href="profile">Creator</a>`, usually followed by
//! a "Check it out" link to the project. These patterns work on the raw
//! markup, so captured text keeps any HTML entities as written.

use regex_lite::Regex;
use tracing::{debug, warn};

use crate::error::Result;
use crate::matching::{host, host_in_domain};
use crate::types::{CreatorRecord, ProjectCredit};

/// `<span>Title, by </span><a href="url">Creator</a>`
const COMMA_BY_PATTERN: &str =
    r#"<span>([^<]+?), by </span><a href="([^"]+)"[^>]*>([^<]+)</a>"#;

/// `<span>Title by </span><a href="url">Creator</a>`
const BY_PATTERN: &str = r#"<span>([^<]+?) by </span><a href="([^"]+)"[^>]*>([^<]+)</a>"#;

/// A comma credit followed, anywhere later, by a project call-to-action link.
const PROJECT_PATTERN: &str = r#"(?s)<span>([^<]+?), by </span><a href="([^"]+)"[^>]*>([^<]+)</a>.*?<a[^>]*href="(https?://[^"]+)"[^>]*>(?:Check it out|Enjoy|track)"#;

/// Domains whose links are profiles, not projects.
pub const SOCIAL_DOMAINS: &[&str] = &[
    "linkedin.com",
    "twitter.com",
    "x.com",
    "facebook.com",
    "instagram.com",
];

/// Extract creator records with both credit patterns.
///
/// All `", by "` matches come first, followed by all `" by "` matches.
/// Each pattern scans the whole document for non-overlapping matches.
///
/// # Examples
/// ```
/// use sitecredits_core::parser::extract_by_patterns;
///
/// let html = r#"<p><span>Budget Buddy, by </span><a href="https://x.com/ann">Ann</a></p>"#;
/// let records = extract_by_patterns(html).unwrap();
/// assert_eq!(records[0].title, "Budget Buddy");
/// assert_eq!(records[0].creator, "Ann");
/// ```
pub fn extract_by_patterns(html: &str) -> Result<Vec<CreatorRecord>> {
    let mut records = Vec::new();

    for pattern in [COMMA_BY_PATTERN, BY_PATTERN] {
        let re = Regex::new(pattern)?;
        for caps in re.captures_iter(html) {
            let record = CreatorRecord {
                title: caps[1].trim().to_string(),
                creator: caps[3].trim().to_string(),
                creator_url: caps[2].trim().to_string(),
            };
            debug!(title = %record.title, creator = %record.creator, "pattern credit");
            records.push(record);
        }
    }

    Ok(records)
}

/// Extract credits that are followed by a project link.
///
/// Credits whose project link points at a social network are skipped.
pub fn extract_project_credits(html: &str) -> Result<Vec<ProjectCredit>> {
    let re = Regex::new(PROJECT_PATTERN)?;
    let mut credits = Vec::new();

    for caps in re.captures_iter(html) {
        let project_url = caps[4].trim();
        if is_social_link(project_url) {
            warn!(url = project_url, creator = caps[3].trim(), "skipping social link");
            continue;
        }

        let credit = ProjectCredit {
            description: caps[1].trim().to_string(),
            creator: caps[3].trim().to_string(),
            creator_url: caps[2].trim().to_string(),
            project_url: project_url.to_string(),
        };
        debug!(creator = %credit.creator, project = %credit.project_url, "project credit");
        credits.push(credit);
    }

    Ok(credits)
}

/// Whether a URL points at one of the social networks in [`SOCIAL_DOMAINS`].
pub fn is_social_link(url: &str) -> bool {
    host(url).is_some_and(|host| {
        SOCIAL_DOMAINS
            .iter()
            .any(|domain| host_in_domain(&host, domain))
    })
}
