//! Subcommand handlers and report rendering.

use std::path::Path;

use sitecredits_core::{CreditsUpdater, Strategy, UpdateReport};

/// Longest URL prefix shown per matched site.
const URL_PREVIEW_CHARS: usize = 60;

/// Run one update strategy and print the outcome.
pub fn update(updater: &CreditsUpdater, strategy: Strategy, json: bool) -> anyhow::Result<()> {
    print!("{}", update_output(updater, strategy, json)?);
    Ok(())
}

/// Run one update strategy and render its report, as JSON or text.
pub fn update_output(
    updater: &CreditsUpdater,
    strategy: Strategy,
    json: bool,
) -> anyhow::Result<String> {
    let report = updater.run(strategy)?;
    if json {
        Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
    } else {
        Ok(render_report(
            &report,
            strategy,
            &updater.config().catalog_path,
        ))
    }
}

/// Print the records a strategy would use, as JSON.
pub fn extract(updater: &CreditsUpdater, strategy: Strategy) -> anyhow::Result<()> {
    println!("{}", extract_json(updater, strategy)?);
    Ok(())
}

/// Extracted records of one strategy as pretty JSON.
pub fn extract_json(updater: &CreditsUpdater, strategy: Strategy) -> anyhow::Result<String> {
    let json = match strategy {
        Strategy::ByTitle => serde_json::to_string_pretty(&updater.creator_records()?)?,
        Strategy::ByUrl => serde_json::to_string_pretty(&updater.project_credits()?)?,
    };
    Ok(json)
}

/// Human-readable summary of an update run.
pub fn render_report(report: &UpdateReport, strategy: Strategy, catalog_path: &Path) -> String {
    let mut lines = vec![format!(
        "Found {} projects with creator information:\n",
        report.extracted
    )];

    for site in &report.matched {
        lines.push(format!("✓ {}", site.title));
        lines.push(format!("  Creator: {}", site.creator));
        if strategy == Strategy::ByUrl {
            lines.push(format!("  URL: {}...", preview(&site.url, URL_PREVIEW_CHARS)));
        }
        lines.push(format!("  Platform: {}", site.platform));
        lines.push(String::new());
    }

    lines.push(format!(
        "\nUpdated {}/{} sites with creator information",
        report.updated(),
        report.total
    ));
    if report.saved {
        lines.push(format!("Saved to {}", catalog_path.display()));
    } else {
        lines.push(format!("Dry run: {} not written", catalog_path.display()));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn preview(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecredits_core::{MatchedSite, Platform, UpdaterConfig};
    use serde_json::Value;

    const PAGE: &str = r#"<p><span>Notes, by </span><a href="https://ann.dev">Ann</a>
<a href="https://notes.vercel.app">Check it out</a></p>"#;

    fn fixture_updater(dir: &tempfile::TempDir, dry_run: bool) -> CreditsUpdater {
        let html = dir.path().join("page.html");
        let catalog = dir.path().join("sites.json");
        std::fs::write(&html, PAGE).unwrap();
        std::fs::write(
            &catalog,
            r#"[{"title":"Notes","url":"https://notes.vercel.app"},{"title":"Other","url":"https://other.dev"}]"#,
        )
        .unwrap();
        CreditsUpdater::with_config(UpdaterConfig {
            html_path: html,
            catalog_path: catalog,
            dry_run,
        })
    }

    fn report(saved: bool) -> UpdateReport {
        UpdateReport {
            extracted: 4,
            matched: vec![MatchedSite {
                title: "Habit Garden".into(),
                url: "https://habit-garden.replit.app".into(),
                creator: "Bo Chen".into(),
                platform: Platform::Replit,
            }],
            total: 5,
            saved,
        }
    }

    #[test]
    fn test_render_by_title() {
        let out = render_report(&report(true), Strategy::ByTitle, Path::new("public/sites.json"));
        assert_eq!(
            out,
            "Found 4 projects with creator information:\n\n\
             ✓ Habit Garden\n  Creator: Bo Chen\n  Platform: replit\n\n\
             \nUpdated 1/5 sites with creator information\n\
             Saved to public/sites.json\n"
        );
    }

    #[test]
    fn test_render_by_url_shows_url() {
        let out = render_report(&report(true), Strategy::ByUrl, Path::new("sites.json"));
        assert!(out.contains("  URL: https://habit-garden.replit.app...\n"));
    }

    #[test]
    fn test_render_dry_run() {
        let out = render_report(&report(false), Strategy::ByTitle, Path::new("sites.json"));
        assert!(out.ends_with("Dry run: sites.json not written\n"));
        assert!(!out.contains("Saved to"));
    }

    #[test]
    fn test_preview_counts_chars() {
        assert_eq!(preview("héllo", 2), "hé");
        assert_eq!(preview("short", 60), "short");
    }

    #[test]
    fn test_update_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let updater = fixture_updater(&dir, false);

        let out = update_output(&updater, Strategy::ByTitle, true).unwrap();
        let report: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(report["total"], 2);
        assert_eq!(report["saved"], true);
        assert!(report["extracted"].as_u64().unwrap() >= 1);
        let matched = report["matched"].as_array().unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0]["title"], "Notes");
        assert_eq!(matched[0]["creator"], "Ann");
        assert_eq!(matched[0]["platform"], "vercel");
    }

    #[test]
    fn test_update_json_report_dry_run() {
        let dir = tempfile::tempdir().unwrap();
        let updater = fixture_updater(&dir, true);

        let out = update_output(&updater, Strategy::ByUrl, true).unwrap();
        let report: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(report["saved"], false);
        assert_eq!(report["matched"][0]["url"], "https://notes.vercel.app");
    }

    #[test]
    fn test_update_text_report() {
        let dir = tempfile::tempdir().unwrap();
        let updater = fixture_updater(&dir, true);

        let out = update_output(&updater, Strategy::ByTitle, false).unwrap();
        assert!(out.contains("✓ Notes\n  Creator: Ann\n"));
        assert!(out.contains("Updated 1/2 sites with creator information"));
    }

    #[test]
    fn test_extract_json_by_title() {
        let dir = tempfile::tempdir().unwrap();
        let updater = fixture_updater(&dir, true);

        let out = extract_json(&updater, Strategy::ByTitle).unwrap();
        let records: Value = serde_json::from_str(&out).unwrap();
        let first = &records.as_array().unwrap()[0];

        assert_eq!(first["title"], "Notes");
        assert_eq!(first["creator"], "Ann");
        assert_eq!(first["creator_url"], "https://ann.dev");
    }

    #[test]
    fn test_extract_json_by_url() {
        let dir = tempfile::tempdir().unwrap();
        let updater = fixture_updater(&dir, true);

        let out = extract_json(&updater, Strategy::ByUrl).unwrap();
        let credits: Value = serde_json::from_str(&out).unwrap();
        let credits = credits.as_array().unwrap();

        assert_eq!(credits.len(), 1);
        assert_eq!(credits[0]["description"], "Notes");
        assert_eq!(credits[0]["creator"], "Ann");
        assert_eq!(credits[0]["creator_url"], "https://ann.dev");
        assert_eq!(credits[0]["project_url"], "https://notes.vercel.app");
    }
}
