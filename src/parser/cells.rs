/// Cell-level helpers shared by both table strategies.
use std::sync::LazyLock;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use regex::Regex;

/// Rows with fewer non-empty cells than this are skipped.
pub const MIN_CELLS: usize = 3;

/// Markers a table uses to mean "same company as the row above".
const CONTINUATION_MARKERS: &[char] = &['↳', '〃'];

static RAW_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(?https?://[^\s)]*\)?").unwrap());

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\s|:\-]+$").unwrap());

static IMAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]*\)").unwrap());

static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

/// A Markdown inline link `[text](url)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MdLink {
    pub text: String,
    pub url: String,
}

/// Split a table row on `|`, trimming cells and dropping empty ones.
#[must_use]
pub fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

#[must_use]
pub fn is_continuation(cell: &str) -> bool {
    cell.contains(CONTINUATION_MARKERS)
}

/// Headings and horizontal rules are never data rows.
#[must_use]
pub fn is_heading_or_rule(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("---")
}

/// A `| --- | :---: |` style line.
#[must_use]
pub fn is_separator(line: &str) -> bool {
    line.contains('-') && SEPARATOR.is_match(line)
}

/// Plain text of a table cell: images and links reduced to their text,
/// bold markers dropped, `<br>` treated as a word break.
///
/// Only inline syntax is touched. A cell is not a document, so text such as
/// `1. First Republic` or `<Acme>` is kept as written.
#[must_use]
pub fn inline_text(cell: &str) -> String {
    let text = IMAGE.replace_all(cell, "$1");
    let text = LINK.replace_all(&text, "$1");
    let text = LINE_BREAK.replace_all(&text, " ");
    let text = text.replace("**", "").replace("__", "");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All inline links in `cell`, in order.
#[must_use]
pub fn links(cell: &str) -> Vec<MdLink> {
    let mut found = Vec::new();
    let mut current: Option<MdLink> = None;

    for event in Parser::new(cell) {
        match event {
            Event::Start(Tag::Link { dest_url, .. }) => {
                current = Some(MdLink {
                    text: String::new(),
                    url: dest_url.to_string(),
                });
            }
            Event::End(TagEnd::Link) => {
                if let Some(mut link) = current.take() {
                    link.text = link.text.trim().to_string();
                    found.push(link);
                }
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some(link) = current.as_mut() {
                    link.text.push_str(&t);
                }
            }
            _ => {}
        }
    }

    found
}

/// First link pointing at `host`, else the first link of any kind.
#[must_use]
pub fn pick_link(cell: &str, host: &str) -> Option<MdLink> {
    let mut all = links(cell);
    match all.iter().position(|l| l.url.contains(host)) {
        Some(idx) => Some(all.swap_remove(idx)),
        None => all.into_iter().next(),
    }
}

/// Company name from a company cell: bold markers stripped, links unwrapped,
/// raw URLs removed.
#[must_use]
pub fn clean_company(cell: &str) -> String {
    let text = inline_text(cell);
    let text = RAW_URL.replace_all(&text, "");
    text.replace(['[', ']'], "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_cells_drops_empty() {
        let cells = split_cells("| Acme |  | Engineer | Remote |");
        assert_eq!(cells, vec!["Acme", "Engineer", "Remote"]);
        assert!(split_cells("||  |").is_empty());
    }

    #[test]
    fn test_continuation_markers() {
        assert!(is_continuation("↳"));
        assert!(is_continuation("**↳**"));
        assert!(is_continuation("〃"));
        assert!(!is_continuation("Acme"));
    }

    #[test]
    fn test_separator_detection() {
        assert!(is_separator("| --- | --- | :---: |"));
        assert!(is_separator("----- | --------- | --------- | ---- | -------"));
        assert!(!is_separator("| Company | Job Title |"));
        assert!(!is_separator("|  |"));
    }

    #[test]
    fn test_clean_company_variants() {
        assert_eq!(clean_company("**[Acme](https://acme.com)**"), "Acme");
        assert_eq!(clean_company("[Globex Corp](https://globex.com)"), "Globex Corp");
        assert_eq!(clean_company("**Initech**"), "Initech");
        assert_eq!(clean_company("Hooli (https://hooli.xyz)"), "Hooli");
        assert_eq!(clean_company("Umbrella https://umbrella.com"), "Umbrella");
        assert_eq!(clean_company("[Stark"), "Stark");
    }

    #[test]
    fn test_links() {
        let found = links("[apply](https://jobright.ai/jobs/info/abc)");
        assert_eq!(
            found,
            vec![MdLink {
                text: "apply".to_string(),
                url: "https://jobright.ai/jobs/info/abc".to_string(),
            }]
        );
        assert!(links("plain text").is_empty());
        assert!(links("[broken](https://x.com").is_empty());
    }

    #[test]
    fn test_image_link_text() {
        let found = links("[![Apply](https://img.shields.io/badge/apply.png)](https://jobright.ai/jobs/info/x)");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "https://jobright.ai/jobs/info/x");
        assert_eq!(found[0].text, "Apply");
    }

    #[test]
    fn test_pick_link_prefers_host() {
        let cell = "[site](https://acme.com) [apply](https://jobright.ai/jobs/info/1)";
        let link = pick_link(cell, "jobright.ai/jobs/info").unwrap();
        assert_eq!(link.text, "apply");

        let link = pick_link("[site](https://acme.com)", "jobright.ai/jobs/info").unwrap();
        assert_eq!(link.url, "https://acme.com");
        assert!(pick_link("none", "jobright.ai/jobs/info").is_none());
    }

    #[test]
    fn test_inline_text() {
        assert_eq!(inline_text("**[Engineer](https://x.y)** 🔥"), "Engineer 🔥");
        assert_eq!(inline_text("New York<br>Remote"), "New York Remote");
        assert_eq!(
            inline_text("[![Apply](https://img.shields.io/a.png)](https://jobright.ai/jobs/info/x)"),
            "Apply"
        );
    }

    #[test]
    fn test_clean_company_keeps_block_like_text() {
        assert_eq!(clean_company("1. First Republic"), "1. First Republic");
        assert_eq!(clean_company("- Dash Co"), "- Dash Co");
        assert_eq!(clean_company("<Acme>"), "<Acme>");
        assert_eq!(clean_company("**# Hashtag Labs**"), "# Hashtag Labs");
    }
}
