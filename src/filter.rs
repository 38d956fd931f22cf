/// Predicates over normalized listings and the option lists that feed them.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::JobListing;

/// Sentinel meaning "no constraint" for the exact-match fields.
pub const ALL: &str = "All";

/// User-entered filter values. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    pub company: String,
    pub role: String,
    pub level: String,
    pub location: String,
    pub h1b_status: String,
    pub job_type: String,
    pub role_type: String,
}

fn prefix_match(value: &str, prefix: &str) -> bool {
    prefix.is_empty() || value.to_lowercase().starts_with(&prefix.to_lowercase())
}

fn exact_match(value: &str, wanted: &str) -> bool {
    wanted.is_empty() || wanted == ALL || value == wanted
}

impl JobFilter {
    /// All predicates ANDed.
    #[must_use]
    pub fn matches(&self, job: &JobListing) -> bool {
        prefix_match(&job.company, &self.company)
            && prefix_match(&job.role, &self.role)
            && exact_match(&job.level, &self.level)
            && exact_match(&job.location, &self.location)
            && exact_match(&job.h1b_status, &self.h1b_status)
            && exact_match(job.job_type.as_str(), &self.job_type)
            && exact_match(job.role_type.as_str(), &self.role_type)
    }

    /// `(field, value)` pairs for the predicates that constrain anything.
    #[must_use]
    pub fn active(&self) -> Vec<(&'static str, &str)> {
        [
            ("Company", self.company.as_str()),
            ("Role", self.role.as_str()),
            ("Level", self.level.as_str()),
            ("Location", self.location.as_str()),
            ("H1B Status", self.h1b_status.as_str()),
            ("Job Type", self.job_type.as_str()),
            ("Role Type", self.role_type.as_str()),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_empty() && *v != ALL)
        .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }
}

/// Listings that satisfy `filter`, in input order.
#[must_use]
pub fn apply_filters<'a>(records: &'a [JobListing], filter: &JobFilter) -> Vec<&'a JobListing> {
    records.iter().filter(|job| filter.matches(job)).collect()
}

/// Dropdown choices derived from the loaded listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub levels: Vec<String>,
    pub locations: Vec<String>,
    pub h1b_statuses: Vec<String>,
    pub job_types: Vec<String>,
    pub role_types: Vec<String>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn sorted_with_all<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let unique: BTreeSet<&str> = values.filter(|v| !v.is_empty()).collect();
    std::iter::once(ALL.to_string())
        .chain(unique.into_iter().map(str::to_string))
        .collect()
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            levels: strings(&["Senior", "Mid-Level", "Entry-Level/Junior", "Internship"]),
            locations: strings(&["REMOTE", "New York, NY", "San Francisco, CA"]),
            h1b_statuses: strings(&["🏅", "🥈", "🏆"]),
            job_types: strings(&["PM", "Data", "SWE"]),
            role_types: strings(&["New Grad", "Internship"]),
        }
    }
}

impl FilterOptions {
    /// `"All"` plus the distinct non-empty values of each field.
    ///
    /// Values are sorted except sponsorship badges, which keep first-seen
    /// order. With no listings the fixed defaults are returned.
    #[must_use]
    pub fn from_listings(listings: &[JobListing]) -> Self {
        if listings.is_empty() {
            return Self::default();
        }

        let mut h1b_statuses = vec![ALL.to_string()];
        for job in listings {
            if !job.h1b_status.is_empty() && !h1b_statuses.contains(&job.h1b_status) {
                h1b_statuses.push(job.h1b_status.clone());
            }
        }

        Self {
            levels: sorted_with_all(listings.iter().map(|j| j.level.as_str())),
            locations: sorted_with_all(listings.iter().map(|j| j.location.as_str())),
            h1b_statuses,
            job_types: sorted_with_all(listings.iter().map(|j| j.job_type.as_str())),
            role_types: sorted_with_all(listings.iter().map(|j| j.role_type.as_str())),
        }
    }
}
