/// Category inference for sources whose job function / role stage is not
/// configured.
///
/// Resolution order is the same for every source and applied per field:
/// explicit source config, then the URL path, then the document body. A stage
/// that resolves to `Other` falls through to the next one.
use crate::models::{JobType, RoleType};

/// Best-effort `(JobType, RoleType)` from document content.
#[must_use]
pub fn detect_category(raw: &str) -> (JobType, RoleType) {
    let text = raw.to_lowercase();

    let job_type = if text.contains("product management") {
        JobType::Pm
    } else if text.contains("data analy") {
        JobType::Data
    } else if text.contains("software engineer") {
        JobType::Swe
    } else {
        JobType::Other
    };

    let role_type = if text.contains("new grad") || text.contains("2025") {
        RoleType::NewGrad
    } else if text.contains("intern") {
        RoleType::Internship
    } else {
        RoleType::Other
    };

    (job_type, role_type)
}

/// `(JobType, RoleType)` from the repository name inside a source URL.
#[must_use]
pub fn infer_from_url(url: &str) -> (JobType, RoleType) {
    let job_type = if url.contains("Software-Engineer") {
        JobType::Swe
    } else if url.contains("Product-Management") {
        JobType::Pm
    } else if url.contains("Data-Analysis") {
        JobType::Data
    } else {
        JobType::Other
    };

    let role_type = if url.contains("New-Grad") {
        RoleType::NewGrad
    } else if url.contains("Internship") {
        RoleType::Internship
    } else {
        RoleType::Other
    };

    (job_type, role_type)
}

/// Category hints known before the body is downloaded.
///
/// Explicit values win over URL inference; a field left `None` is sniffed
/// from content at parse time.
#[must_use]
pub fn hints_before_fetch(
    url: &str,
    job_type: Option<JobType>,
    role_type: Option<RoleType>,
) -> (Option<JobType>, Option<RoleType>) {
    let (url_job, url_role) = infer_from_url(url);
    let job = job_type.or_else(|| (!url_job.is_other()).then_some(url_job));
    let role = role_type.or_else(|| (!url_role.is_other()).then_some(url_role));
    (job, role)
}
