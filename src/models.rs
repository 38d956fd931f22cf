/// Normalized job records and the entities derived from them.
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

use serde::{Deserialize, Serialize};

// ── Category enums ───────────────────────────────────────────────────

/// Job function of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "SWE")]
    Swe,
    #[serde(rename = "PM")]
    Pm,
    #[serde(rename = "Data")]
    Data,
    #[default]
    #[serde(rename = "Other")]
    Other,
}

impl JobType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Swe => "SWE",
            Self::Pm => "PM",
            Self::Data => "Data",
            Self::Other => "Other",
        }
    }

    /// Parse a display label (`"SWE"`, `"pm"`, ...). Unknown labels give `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "swe" => Some(Self::Swe),
            "pm" => Some(Self::Pm),
            "data" => Some(Self::Data),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn is_other(&self) -> bool {
        *self == Self::Other
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Career stage a listing targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoleType {
    #[serde(rename = "New Grad")]
    NewGrad,
    #[serde(rename = "Internship")]
    Internship,
    #[default]
    #[serde(rename = "Other")]
    Other,
}

impl RoleType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewGrad => "New Grad",
            Self::Internship => "Internship",
            Self::Other => "Other",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "new grad" | "newgrad" => Some(Self::NewGrad),
            "internship" | "intern" => Some(Self::Internship),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn is_other(&self) -> bool {
        *self == Self::Other
    }

    /// Level label implied by the role stage, for feeds without a level column.
    #[must_use]
    pub fn implied_level(&self) -> Option<&'static str> {
        match self {
            Self::Internship => Some("Internship"),
            Self::NewGrad => Some("Entry-Level"),
            Self::Other => None,
        }
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column layout of a source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// Sponsorship feed: Company | Job Title | Level | Location | H1B | Link | Date
    H1b,
    /// New-grad, internship and experienced feeds.
    #[default]
    Generic,
}

impl TableKind {
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "h1b" => Some(Self::H1b),
            "generic" => Some(Self::Generic),
            _ => None,
        }
    }
}

// ── JobListing ───────────────────────────────────────────────────────

/// One normalized row of a job table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    pub company: String,
    pub role: String,
    pub level: String,
    pub location: String,
    pub h1b_status: String,
    pub apply_link_text: String,
    pub apply_link_url: String,
    pub date_posted: String,
    pub job_type: JobType,
    pub role_type: RoleType,
}

impl JobListing {
    /// Whether the record carries enough data to be shown.
    ///
    /// Requires a company or role, and an apply link (URL or raw link text).
    #[must_use]
    pub fn is_emittable(&self) -> bool {
        let has_name = !self.company.is_empty() || !self.role.is_empty();
        let has_link = !self.apply_link_url.is_empty() || !self.apply_link_text.is_empty();
        has_name && has_link
    }

    /// Content hash of (company, role, apply URL).
    ///
    /// Unlike `id`, this is identical across re-fetches of the same row within
    /// one build. `DefaultHasher` output may change between Rust releases, so
    /// do not persist these keys past a toolchain upgrade.
    #[must_use]
    pub fn stable_key(&self) -> String {
        let mut hasher = DefaultHasher::new();
        self.company.hash(&mut hasher);
        self.role.hash(&mut hasher);
        self.apply_link_url.hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }

    /// Build the payload handed to the analysis/document collaborators.
    #[must_use]
    pub fn to_selection(&self, action: SelectionAction) -> JobSelection {
        let description = if self.location.is_empty() {
            format!("{} at {}", self.role, self.company)
        } else {
            format!("{} at {} ({})", self.role, self.company, self.location)
        };

        JobSelection {
            company: self.company.clone(),
            role: self.role.clone(),
            location: self.location.clone(),
            link: self.apply_link_url.clone(),
            description,
            date_posted: self.date_posted.clone(),
            action,
        }
    }
}

// ── Derived entities ─────────────────────────────────────────────────

/// What the user wants to do with a selected listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionAction {
    #[default]
    Analyze,
    Apply,
}

/// A listing the user acted on, as passed to `AnalyzeFit` / `GenerateDocument`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSelection {
    pub company: String,
    pub role: String,
    pub location: String,
    pub link: String,
    pub description: String,
    pub date_posted: String,
    pub action: SelectionAction,
}

/// Tracker entry copied from a listing at the moment the user applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub company: String,
    pub role: String,
    pub location: String,
    pub applied_date: String,
    pub status: String,
    pub notes: String,
    pub link: String,
}

impl Application {
    #[must_use]
    pub fn from_listing(listing: &JobListing) -> Self {
        let now = chrono::Local::now();
        Self {
            id: format!("app-{}", now.timestamp_millis()),
            company: listing.company.clone(),
            role: listing.role.clone(),
            location: listing.location.clone(),
            applied_date: now.format("%Y-%m-%d").to_string(),
            status: "Applied".to_string(),
            notes: String::new(),
            link: listing.apply_link_url.clone(),
        }
    }
}
