/// End-to-end integration tests for the jobfeed pipeline.
///
/// Tests the complete flow:
///   Config → Registry → Fetcher (variants, fallback) → Parser → Aggregator → Filter
use std::fs;
use std::sync::Arc;

use jobfeed::aggregator::Aggregator;
use jobfeed::config::Config;
use jobfeed::debug_log::DebugLog;
use jobfeed::fetcher::{Fetcher, expand_variants};
use jobfeed::fetcher::mock::MockTransport;
use jobfeed::filter::{FilterOptions, JobFilter, apply_filters};
use jobfeed::models::{JobType, RoleType, SelectionAction};
use jobfeed::parser::TableParser;
use tempfile::tempdir;

const BASE: &str = "https://raw.githubusercontent.com/jobright-ai";

const H1B_README: &str = "\
# Daily H1B Jobs In Tech

| Company | Job Title | Level | Location | H1B | Link | Date Posted |
| ------- | --------- | ----- | -------- | --- | ---- | ----------- |
| **[Google](https://google.com)** | Software Engineer III | Mid-Level | Mountain View, CA | 🏆 | [apply](https://jobright.ai/jobs/info/g1) | 2025-05-20 |
| **↳** | Staff Engineer | Senior | Remote | 🏆 | [apply](https://jobright.ai/jobs/info/g2) | 2025-05-20 |
| **[Goldman Sachs](https://gs.com)** | Quant Analyst | Entry-Level | New York, NY | 🏅 | [apply](https://jobright.ai/jobs/info/gs1) | 2025-05-19 |
| **[Meta](https://meta.com)** | Data Engineer | Senior | Menlo Park, CA | 🥈 | [apply](https://jobright.ai/jobs/info/m1) | 2025-05-19 |
";

const NEW_GRAD_README: &str = "\
# 2025 Software Engineer New Grad Positions

| Company | Job Title | Location | Work Model | Date Posted |
| ----- | --------- | --------- | ---- | ------- |
| **[Stripe](https://stripe.com)** | **[Software Engineer, New Grad](https://jobright.ai/jobs/info/s1)** | Seattle, WA | On Site | May 20 |
| **[Datadog](https://datadoghq.com)** | **[Junior Engineer](https://jobright.ai/jobs/info/d1)** | New York, NY | Hybrid | May 19 |
";

fn readme(repo: &str, branch_path: &str) -> String {
    format!("{BASE}/{repo}/{branch_path}/README.md")
}

fn aggregator(transport: &MockTransport, config: &Config) -> Aggregator {
    let fetcher = Fetcher::new(Arc::new(transport.clone()), DebugLog::new());
    Aggregator::new(fetcher, TableParser::new(config.link_host.clone()))
}

/// H1B tab: configured URL 404s, the `main` branch mirror answers.
#[tokio::test]
async fn test_h1b_tab_through_branch_fallback() {
    let config = Config::default();
    let transport = MockTransport::new()
        .with_status(&readme("Daily-H1B-Jobs-In-Tech", "refs/heads/master"), 404)
        .with_body(&readme("Daily-H1B-Jobs-In-Tech", "refs/heads/main"), H1B_README);
    let agg = aggregator(&transport, &config);

    let load = agg.load_category(config.tab("h1b").unwrap()).await;

    assert!(!load.from_samples);
    assert_eq!(load.listings.len(), 4);
    assert_eq!(load.listings[1].company, "Google", "continuation row inherits company");
    assert_eq!(load.listings[1].role, "Staff Engineer");
    assert_eq!(
        transport.requests(),
        vec![
            readme("Daily-H1B-Jobs-In-Tech", "refs/heads/master"),
            readme("Daily-H1B-Jobs-In-Tech", "master"),
            readme("Daily-H1B-Jobs-In-Tech", "refs/heads/main"),
        ]
    );

    // Company prefix filter, case-insensitive.
    let filter = JobFilter {
        company: "go".to_string(),
        ..Default::default()
    };
    let hits = apply_filters(&load.listings, &filter);
    let companies: Vec<&str> = hits.iter().map(|j| j.company.as_str()).collect();
    assert_eq!(companies, vec!["Google", "Google", "Goldman Sachs"]);

    // Badge options keep first-seen order.
    let options = FilterOptions::from_listings(&load.listings);
    assert_eq!(options.h1b_statuses, vec!["All", "🏆", "🏅", "🥈"]);

    // Selection payload for the collaborator.
    let selection = hits[2].to_selection(SelectionAction::Apply);
    assert_eq!(selection.description, "Quant Analyst at Goldman Sachs (New York, NY)");
    assert_eq!(selection.link, "https://jobright.ai/jobs/info/gs1");
}

/// Multi-source tab: one source loads, the others fail; no samples used.
#[tokio::test]
async fn test_new_grad_tab_partial_failure() {
    let config = Config::default();
    let swe = readme("2025-Software-Engineer-New-Grad", "refs/heads/master");
    let transport = MockTransport::new().with_body(&swe, NEW_GRAD_README);
    let agg = aggregator(&transport, &config);

    let load = agg.load_category(config.tab("new-grad-intern").unwrap()).await;

    assert!(!load.from_samples);
    assert_eq!(load.listings.len(), 2);
    assert!(load.listings.iter().all(|j| j.job_type == JobType::Swe));
    assert!(load.listings.iter().all(|j| j.role_type == RoleType::NewGrad));
    assert!(load.listings.iter().all(|j| j.level == "Entry-Level"));
    assert!(load.listings[0].id.starts_with("SWE-New Grad-Stripe-"));

    let filter = JobFilter {
        job_type: "SWE".to_string(),
        location: "New York, NY".to_string(),
        ..Default::default()
    };
    let hits = apply_filters(&load.listings, &filter);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].company, "Datadog");

    let log = agg.log().render();
    assert!(log.contains("Error with source"));
    assert!(log.contains(&format!("Successfully parsed 2 jobs from {swe}")));
}

/// Nothing reachable: every tab still shows its samples.
#[tokio::test]
async fn test_offline_uses_samples() {
    let config = Config::default();
    let transport = MockTransport::new();
    let agg = aggregator(&transport, &config);

    for tab in &config.tabs {
        let load = agg.load_category(tab).await;
        assert!(load.from_samples, "{} should fall back", tab.id);
        assert_eq!(load.listings.len(), tab.samples.len());
        assert!(load.listings.iter().all(|j| j.id.starts_with("sample-")));
    }
}

/// Every variant downloads but holds no job table: both parse strategies
/// miss on each one and the tab falls back to its samples.
#[tokio::test]
async fn test_unparseable_feed_escalates_to_samples() {
    let config = Config::default();
    let tab = config.tab("h1b").unwrap();
    let mut transport = MockTransport::new();
    for url in expand_variants(&tab.sources[0].url) {
        transport = transport.with_body(&url, "# Daily H1B Jobs\n\nThe list has moved.\n");
    }
    let agg = aggregator(&transport, &config);

    let load = agg.load_category(tab).await;

    assert!(load.from_samples);
    assert_eq!(load.listings.len(), 1);
    assert_eq!(load.listings[0].id, "sample-h1b");
    assert_eq!(transport.requests().len(), 4);
    let log = agg.log().render();
    assert!(log.contains("No usable content in"));
    assert!(log.contains("All URLs failed. Using fallback data."));
}

/// A custom config file points the H1B layout at a mirror with its own link host.
#[tokio::test]
async fn test_custom_config_tab() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("jobfeed.json");
    fs::write(
        &path,
        r#"{
            "link_host": "jobs.example.com/apply",
            "tabs": [{
                "id": "mirror",
                "name": "Mirror",
                "kind": "h1b",
                "sources": [{"url": "https://mirror.example.com/README.md"}],
                "samples": ["h1b"]
            }]
        }"#,
    )
    .unwrap();

    let config = Config::load(path.to_str().unwrap()).unwrap();
    config.validate().unwrap();

    let body = "\
| Company | Job Title | Level | Location | H1B | Link | Date |
| --- | --- | --- | --- | --- | --- | --- |
| Initech | Developer | Mid-Level | Austin, TX | 🏅 | [site](https://initech.com) [apply](https://jobs.example.com/apply/7) | 2025-02-02 |
";
    let transport = MockTransport::new().with_body("https://mirror.example.com/README.md", body);
    let agg = aggregator(&transport, &config);

    let load = agg.load_category(config.tab("mirror").unwrap()).await;
    assert!(!load.from_samples);
    assert_eq!(load.listings[0].apply_link_url, "https://jobs.example.com/apply/7");
    assert_eq!(load.listings[0].apply_link_text, "apply");
}
