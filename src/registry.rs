/// Category tabs and the remote documents behind them.
///
/// The built-in registry covers the two jobright-ai feeds; a config file may
/// replace it wholesale (see [`crate::config::Config::tabs`]).
use serde::{Deserialize, Serialize};

use crate::models::{JobType, RoleType, TableKind};
use crate::parser::detect::hints_before_fetch;
use crate::samples::SampleKey;

const RAW_BASE: &str = "https://raw.githubusercontent.com/jobright-ai";

/// One remote Markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub url: String,

    /// Job function of every row in this document, when known up front.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,

    /// Role stage of every row in this document, when known up front.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_type: Option<RoleType>,
}

impl Source {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            job_type: None,
            role_type: None,
        }
    }

    #[must_use]
    pub fn typed(mut self, job_type: JobType, role_type: RoleType) -> Self {
        self.job_type = Some(job_type);
        self.role_type = Some(role_type);
        self
    }
}

/// A tab: display name, table layout, sources and fallback samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceGroup {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub kind: TableKind,

    pub sources: Vec<Source>,

    #[serde(default)]
    pub samples: Vec<SampleKey>,
}

impl SourceGroup {
    #[must_use]
    pub fn is_multi_source(&self) -> bool {
        self.sources.len() > 1
    }

    /// Fallback sample keys; never empty.
    ///
    /// Configured `samples` win. Otherwise one key per distinct source
    /// category, resolved from explicit types and the URL.
    #[must_use]
    pub fn sample_keys(&self) -> Vec<SampleKey> {
        if !self.samples.is_empty() {
            return self.samples.clone();
        }

        let mut keys = Vec::new();
        for source in &self.sources {
            let (job, role) = hints_before_fetch(&source.url, source.job_type, source.role_type);
            let key = SampleKey::for_category(
                self.kind,
                job.unwrap_or_default(),
                role.unwrap_or_default(),
            );
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        if keys.is_empty() {
            keys.push(SampleKey::for_category(
                self.kind,
                JobType::default(),
                RoleType::default(),
            ));
        }
        keys
    }
}

fn readme(repo: &str) -> String {
    format!("{RAW_BASE}/{repo}/refs/heads/master/README.md")
}

/// The tabs shipped with the crate.
#[must_use]
pub fn builtin_tabs() -> Vec<SourceGroup> {
    vec![
        SourceGroup {
            id: "h1b".to_string(),
            name: "H1B Jobs".to_string(),
            kind: TableKind::H1b,
            sources: vec![Source::new(readme("Daily-H1B-Jobs-In-Tech"))],
            samples: vec![SampleKey::H1b],
        },
        SourceGroup {
            id: "new-grad-intern".to_string(),
            name: "New Grad & Internships".to_string(),
            kind: TableKind::Generic,
            sources: vec![
                Source::new(readme("2025-Product-Management-New-Grad"))
                    .typed(JobType::Pm, RoleType::NewGrad),
                Source::new(readme("2025-Product-Management-Internship"))
                    .typed(JobType::Pm, RoleType::Internship),
                Source::new(readme("2025-Data-Analysis-New-Grad"))
                    .typed(JobType::Data, RoleType::NewGrad),
                Source::new(readme("2025-Data-Analysis-Internship"))
                    .typed(JobType::Data, RoleType::Internship),
                Source::new(readme("2025-Software-Engineer-New-Grad"))
                    .typed(JobType::Swe, RoleType::NewGrad),
                Source::new(readme("2025-Software-Engineering-Internship"))
                    .typed(JobType::Swe, RoleType::Internship),
            ],
            samples: vec![
                SampleKey::PmNewGrad,
                SampleKey::PmIntern,
                SampleKey::DataNewGrad,
                SampleKey::DataIntern,
                SampleKey::SweNewGrad,
                SampleKey::SweIntern,
            ],
        },
    ]
}

/// Look a tab up by id.
#[must_use]
pub fn find_tab<'a>(tabs: &'a [SourceGroup], id: &str) -> Option<&'a SourceGroup> {
    tabs.iter().find(|t| t.id == id)
}
