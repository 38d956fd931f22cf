/// Alternate raw-content URLs for a single canonical source URL.
///
/// Upstream repositories rename default branches and raw content is reachable
/// with or without the `refs/heads/` segment, so one configured URL fans out
/// into a short ordered list of plausible mirrors.

const REFS_HEADS: &str = "/refs/heads/";
const MASTER: &str = "/master/";
const MAIN: &str = "/main/";

/// Expand `url` into its candidate list, original first, without duplicates.
#[must_use]
pub fn expand_variants(url: &str) -> Vec<String> {
    let mut variants: Vec<String> = Vec::with_capacity(4);
    let mut push = |candidate: String| {
        if !variants.contains(&candidate) {
            variants.push(candidate);
        }
    };

    push(url.to_string());

    let stripped = url.contains(REFS_HEADS).then(|| url.replacen(REFS_HEADS, "/", 1));
    if let Some(ref s) = stripped {
        push(s.clone());
    }

    if let Some(swapped) = swap_branch(url) {
        push(swapped);
    }

    if let Some(s) = stripped.as_deref().and_then(swap_branch) {
        push(s);
    }

    variants
}

/// Replace the `master`/`main` branch segment with the other name.
fn swap_branch(url: &str) -> Option<String> {
    if url.contains(MASTER) {
        Some(url.replacen(MASTER, MAIN, 1))
    } else if url.contains(MAIN) {
        Some(url.replacen(MAIN, MASTER, 1))
    } else {
        None
    }
}
