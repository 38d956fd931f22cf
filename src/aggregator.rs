/// Per-tab loading: fetch and parse every source, merge, fall back to samples.
///
/// Sources of a multi-source tab run concurrently and are joined with
/// settle-all semantics, so one failing repository never hides the rows of
/// the others. A tab never comes back empty: if nothing could be loaded the
/// tab's fixed sample records are returned and `from_samples` is set.
use futures::future::join_all;
use tracing::{info, warn};

use crate::debug_log::DebugLog;
use crate::fetcher::{FetchError, Fetcher, expand_variants};
use crate::models::{JobListing, TableKind};
use crate::parser::detect::hints_before_fetch;
use crate::parser::{ParseHints, Strategy, TableParser};
use crate::registry::{Source, SourceGroup};
use crate::samples::sample_listings;

/// Rows loaded for one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLoad {
    pub listings: Vec<JobListing>,
    /// Set when `listings` are the tab's fixed samples.
    pub from_samples: bool,
}

/// Outcome of one source pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLoad {
    /// Candidate URL that produced the rows.
    pub url: String,
    pub strategy: Strategy,
    pub listings: Vec<JobListing>,
}

pub struct Aggregator {
    fetcher: Fetcher,
    parser: TableParser,
}

impl Aggregator {
    pub fn new(fetcher: Fetcher, parser: TableParser) -> Self {
        Self { fetcher, parser }
    }

    #[must_use]
    pub fn log(&self) -> &DebugLog {
        self.fetcher.log()
    }

    /// Fetch one source through its URL variants and parse it.
    ///
    /// A candidate whose body yields no rows under either strategy is skipped
    /// like a failed download.
    pub async fn load_source(&self, source: &Source, kind: TableKind) -> Result<SourceLoad, FetchError> {
        let candidates = expand_variants(&source.url);
        let (job_type, role_type) = hints_before_fetch(&source.url, source.job_type, source.role_type);
        let hints = ParseHints {
            kind: Some(kind),
            job_type,
            role_type,
        };

        let log = self.log();
        let parser = &self.parser;
        let ((strategy, listings), url) = self
            .fetcher
            .fetch_until(&candidates, |fetched| {
                let (strategy, listings) = parser.parse(&fetched.text, &hints)?;
                log.push(match strategy {
                    Strategy::Primary => {
                        format!("Successfully parsed {} jobs from {}", listings.len(), fetched.url)
                    }
                    Strategy::Alternate => format!(
                        "Parsed {} jobs from {} with the alternate strategy",
                        listings.len(),
                        fetched.url
                    ),
                });
                Some((strategy, listings))
            })
            .await?;

        Ok(SourceLoad {
            url,
            strategy,
            listings,
        })
    }

    /// Load every source of `group`.
    pub async fn load_category(&self, group: &SourceGroup) -> CategoryLoad {
        let log = self.log();

        if group.sources.is_empty() {
            log.push(format!("Tab {} has no sources. Using fallback data.", group.id));
            return self.samples(group);
        }

        if !group.is_multi_source() {
            return match self.load_source(&group.sources[0], group.kind).await {
                Ok(load) => {
                    info!("Loaded {} jobs for tab {}", load.listings.len(), group.id);
                    CategoryLoad {
                        listings: load.listings,
                        from_samples: false,
                    }
                }
                Err(e) => {
                    warn!("Tab {} failed to load: {e}", group.id);
                    log.push("All URLs failed. Using fallback data.");
                    self.samples(group)
                }
            };
        }

        log.push(format!("Fetching from all {} sources", group.sources.len()));
        let results = join_all(
            group
                .sources
                .iter()
                .map(|source| self.load_source(source, group.kind)),
        )
        .await;

        let mut listings = Vec::new();
        for (source, result) in group.sources.iter().zip(results) {
            match result {
                Ok(load) => listings.extend(load.listings.into_iter().map(|mut job| {
                    job.id = format!("{}-{}-{}", job.job_type, job.role_type, job.id);
                    job
                })),
                Err(e) => {
                    warn!("Source {} failed: {e}", source.url);
                    log.push(format!("Error with source {}: {e}", source.url));
                }
            }
        }

        if listings.is_empty() {
            log.push("No jobs found in any repo. Using fallback data.");
            return self.samples(group);
        }

        info!("Loaded {} jobs for tab {}", listings.len(), group.id);
        CategoryLoad {
            listings,
            from_samples: false,
        }
    }

    fn samples(&self, group: &SourceGroup) -> CategoryLoad {
        CategoryLoad {
            listings: sample_listings(&group.sample_keys()),
            from_samples: true,
        }
    }
}
