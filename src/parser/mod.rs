/// Markdown job-table parsing.
///
/// Two strategies share the row logic in this module:
/// - [`primary`] anchors on a recognized header row and supports
///   continuation rows.
/// - [`alternate`] scans any line carrying an apply link, no header needed.
///
/// [`TableParser::parse`] runs them in that order.
pub mod alternate;
pub mod cells;
pub mod detect;
pub mod primary;

use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::models::{JobListing, JobType, RoleType, TableKind};

pub use detect::{detect_category, infer_from_url};

/// Link host used when the config does not override it.
pub const DEFAULT_LINK_HOST: &str = "jobright.ai/jobs/info";

/// Category information the caller already knows about a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseHints {
    pub kind: Option<TableKind>,
    pub job_type: Option<JobType>,
    pub role_type: Option<RoleType>,
}

/// Result of one parse strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// At least one listing.
    Parsed(Vec<JobListing>),
    /// No header, or no row survived.
    NoMatch,
}

impl ParseOutcome {
    fn from_listings(listings: Vec<JobListing>) -> Self {
        if listings.is_empty() {
            Self::NoMatch
        } else {
            Self::Parsed(listings)
        }
    }

    #[must_use]
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch)
    }

    #[must_use]
    pub fn into_listings(self) -> Vec<JobListing> {
        match self {
            Self::Parsed(listings) => listings,
            Self::NoMatch => Vec::new(),
        }
    }
}

/// Which strategy produced a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Primary,
    Alternate,
}

impl Strategy {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Alternate => "alternate",
        }
    }
}

/// Hints with every field decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Resolved {
    pub kind: TableKind,
    pub job_type: JobType,
    pub role_type: RoleType,
}

/// Stateless parser configured with the job-board link host.
#[derive(Debug, Clone)]
pub struct TableParser {
    link_host: String,
}

impl Default for TableParser {
    fn default() -> Self {
        Self::new(DEFAULT_LINK_HOST)
    }
}

impl TableParser {
    pub fn new(link_host: impl Into<String>) -> Self {
        Self {
            link_host: link_host.into(),
        }
    }

    /// Primary strategy, then alternate if the primary finds nothing.
    #[must_use]
    pub fn parse(&self, raw: &str, hints: &ParseHints) -> Option<(Strategy, Vec<JobListing>)> {
        if let ParseOutcome::Parsed(listings) = self.parse_primary(raw, hints) {
            return Some((Strategy::Primary, listings));
        }
        match self.parse_alternate(raw, hints) {
            ParseOutcome::Parsed(listings) => Some((Strategy::Alternate, listings)),
            ParseOutcome::NoMatch => None,
        }
    }

    /// Fill in whatever the caller left open, sniffing the body only when needed.
    pub(crate) fn resolve(&self, raw: &str, lines: &[&str], hints: &ParseHints) -> Resolved {
        let kind = hints.kind.unwrap_or_else(|| {
            if lines.iter().any(|l| primary::is_h1b_header(l)) {
                TableKind::H1b
            } else {
                TableKind::Generic
            }
        });

        let (job_type, role_type) = match (hints.job_type, hints.role_type) {
            (Some(j), Some(r)) => (j, r),
            (j, r) => {
                let (dj, dr) = detect_category(raw);
                (j.unwrap_or(dj), r.unwrap_or(dr))
            }
        };

        Resolved {
            kind,
            job_type,
            role_type,
        }
    }

    /// Map split cells onto a listing for the resolved layout.
    ///
    /// Returns `None` when the row fails the emit invariant.
    pub(crate) fn build_row(
        &self,
        cols: &[String],
        company: String,
        resolved: &Resolved,
        row: usize,
    ) -> Option<JobListing> {
        let cell = |i: usize| cols.get(i).cloned().unwrap_or_default();

        let mut listing = JobListing {
            company,
            job_type: resolved.job_type,
            role_type: resolved.role_type,
            ..Default::default()
        };

        let link_idx = match resolved.kind {
            TableKind::H1b => {
                listing.level = cell(2);
                listing.location = cell(3);
                listing.h1b_status = cell(4);
                listing.date_posted = cell(6);
                match cols.get(5) {
                    Some(c) if c.contains('[') || c.contains("http") => Some(5),
                    Some(_) => self.find_link_cell(cols).or(Some(5)),
                    None => self.find_link_cell(cols),
                }
            }
            TableKind::Generic => {
                listing.location = cell(2);
                listing.level = match resolved.role_type.implied_level() {
                    Some(level) => level.to_string(),
                    None => cols
                        .get(3)
                        .cloned()
                        .unwrap_or_else(|| "Experienced".to_string()),
                };
                if cols.len() >= 5 {
                    listing.date_posted = cell(4);
                }
                self.find_link_cell(cols)
            }
        };

        let role_raw = cell(1);
        let role_link = cells::pick_link(&role_raw, &self.link_host);
        listing.role = if role_link.is_some() {
            cells::inline_text(&role_raw)
        } else {
            role_raw
        };

        if let Some(idx) = link_idx.filter(|&i| i != 1) {
            let link_cell = &cols[idx];
            match cells::pick_link(link_cell, &self.link_host) {
                Some(link) => {
                    listing.apply_link_text = link.text;
                    listing.apply_link_url = link.url;
                }
                None if link_cell.starts_with("http") => {
                    listing.apply_link_url = link_cell.clone();
                }
                None => listing.apply_link_text = link_cell.clone(),
            }
        }

        if listing.apply_link_url.is_empty() {
            if let Some(link) = role_link {
                listing.apply_link_url = link.url;
                listing.apply_link_text = "apply".to_string();
            }
        }

        if !listing.apply_link_url.is_empty() && listing.apply_link_text.is_empty() {
            listing.apply_link_text = "Apply".to_string();
        }

        if !listing.is_emittable() {
            return None;
        }

        listing.id = make_id(&listing.company, &listing.role, row);
        Some(listing)
    }

    /// Index of the first non-company cell that mentions the link host.
    fn find_link_cell(&self, cols: &[String]) -> Option<usize> {
        cols
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, c)| c.contains(self.link_host.as_str()))
            .map(|(i, _)| i)
    }
}

/// Batch-unique id: company, role and source line, plus a random suffix.
pub(crate) fn make_id(company: &str, role: &str, row: usize) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(5)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{company}-{role}-{row}-{suffix}")
}
