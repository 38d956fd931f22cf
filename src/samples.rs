/// Fixed listings shown when no source of a tab could be loaded.
use serde::{Deserialize, Serialize};

use crate::models::{JobListing, JobType, RoleType, TableKind};

/// Key of one built-in sample record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SampleKey {
    H1b,
    PmNewGrad,
    PmIntern,
    PmExp,
    DataNewGrad,
    DataIntern,
    DataExp,
    SweNewGrad,
    SweIntern,
    SweExp,
}

impl SampleKey {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::H1b => "h1b",
            Self::PmNewGrad => "pm-new-grad",
            Self::PmIntern => "pm-intern",
            Self::PmExp => "pm-exp",
            Self::DataNewGrad => "data-new-grad",
            Self::DataIntern => "data-intern",
            Self::DataExp => "data-exp",
            Self::SweNewGrad => "swe-new-grad",
            Self::SweIntern => "swe-intern",
            Self::SweExp => "swe-exp",
        }
    }

    /// Sample closest to a table layout and category. Unknown job functions
    /// fall back to the SWE records.
    #[must_use]
    pub fn for_category(kind: TableKind, job_type: JobType, role_type: RoleType) -> Self {
        if kind == TableKind::H1b {
            return Self::H1b;
        }
        match (job_type, role_type) {
            (JobType::Pm, RoleType::NewGrad) => Self::PmNewGrad,
            (JobType::Pm, RoleType::Internship) => Self::PmIntern,
            (JobType::Pm, RoleType::Other) => Self::PmExp,
            (JobType::Data, RoleType::NewGrad) => Self::DataNewGrad,
            (JobType::Data, RoleType::Internship) => Self::DataIntern,
            (JobType::Data, RoleType::Other) => Self::DataExp,
            (_, RoleType::NewGrad) => Self::SweNewGrad,
            (_, RoleType::Internship) => Self::SweIntern,
            (_, RoleType::Other) => Self::SweExp,
        }
    }

    fn categories(&self) -> (JobType, RoleType) {
        match self {
            Self::H1b => (JobType::Other, RoleType::Other),
            Self::PmNewGrad => (JobType::Pm, RoleType::NewGrad),
            Self::PmIntern => (JobType::Pm, RoleType::Internship),
            Self::PmExp => (JobType::Pm, RoleType::Other),
            Self::DataNewGrad => (JobType::Data, RoleType::NewGrad),
            Self::DataIntern => (JobType::Data, RoleType::Internship),
            Self::DataExp => (JobType::Data, RoleType::Other),
            Self::SweNewGrad => (JobType::Swe, RoleType::NewGrad),
            Self::SweIntern => (JobType::Swe, RoleType::Internship),
            Self::SweExp => (JobType::Swe, RoleType::Other),
        }
    }

    // (company, role, level, location, h1b, link slug, date)
    fn fields(&self) -> [&'static str; 7] {
        match self {
            Self::H1b => [
                "Vanguard",
                "Senior Fraud Data Scientist",
                "Senior",
                "Malvern, PA",
                "🏅",
                "example123",
                "2025-05-20",
            ],
            Self::PmNewGrad => [
                "T-Mobile",
                "Associate Product Manager",
                "Entry-Level",
                "Bellevue, WA",
                "",
                "example456",
                "2025-05-19",
            ],
            Self::PmIntern => [
                "Meta",
                "Product Management Intern",
                "Internship",
                "Menlo Park, CA",
                "",
                "example789",
                "2025-05-18",
            ],
            Self::PmExp => [
                "Amazon",
                "Senior Product Manager",
                "Senior",
                "Seattle, WA",
                "",
                "example101",
                "2025-05-17",
            ],
            Self::DataNewGrad => [
                "Google",
                "Data Analyst",
                "Entry-Level",
                "Mountain View, CA",
                "",
                "example102",
                "2025-05-16",
            ],
            Self::DataIntern => [
                "Microsoft",
                "Data Science Intern",
                "Internship",
                "Redmond, WA",
                "",
                "example103",
                "2025-05-15",
            ],
            Self::DataExp => [
                "IBM",
                "Principal Data Scientist",
                "Senior",
                "New York, NY",
                "",
                "example104",
                "2025-05-14",
            ],
            Self::SweNewGrad => [
                "Microsoft",
                "Software Engineer",
                "Entry-Level",
                "Redmond, WA",
                "",
                "example105",
                "2025-05-13",
            ],
            Self::SweIntern => [
                "Apple",
                "Software Engineering Intern",
                "Internship",
                "Cupertino, CA",
                "",
                "example106",
                "2025-05-12",
            ],
            Self::SweExp => [
                "Netflix",
                "Senior Software Engineer",
                "Senior",
                "Los Gatos, CA",
                "",
                "example107",
                "2025-05-11",
            ],
        }
    }

    /// The sample record for this key, id `sample-{key}`.
    #[must_use]
    pub fn listing(&self) -> JobListing {
        let [company, role, level, location, h1b_status, slug, date] = self.fields();
        let (job_type, role_type) = self.categories();
        JobListing {
            id: format!("sample-{}", self.as_str()),
            company: company.to_string(),
            role: role.to_string(),
            level: level.to_string(),
            location: location.to_string(),
            h1b_status: h1b_status.to_string(),
            apply_link_text: "apply".to_string(),
            apply_link_url: format!("https://jobright.ai/jobs/info/{slug}"),
            date_posted: date.to_string(),
            job_type,
            role_type,
        }
    }
}

/// Sample records for `keys`, in order.
#[must_use]
pub fn sample_listings(keys: &[SampleKey]) -> Vec<JobListing> {
    keys.iter().map(SampleKey::listing).collect()
}
