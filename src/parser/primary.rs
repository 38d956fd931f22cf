/// Header-anchored table strategy.
use super::cells::{self, MIN_CELLS};
use super::{ParseHints, ParseOutcome, TableParser};
use crate::models::TableKind;

/// Compact separator some generic feeds use in place of a worded header.
const COMPACT_SEPARATOR: &str = "----- | --------- | --------- | ---- | -------";

fn has_all(line: &str, words: &[&str]) -> bool {
    words.iter().all(|w| line.contains(w))
}

/// Header of the sponsorship feed.
pub(crate) fn is_h1b_header(line: &str) -> bool {
    has_all(line, &["Company", "Job Title", "Level", "H1B"])
}

fn is_titled_header(line: &str) -> bool {
    has_all(line, &["Company", "Job Title", "Location"])
}

fn is_work_model_header(line: &str) -> bool {
    has_all(line, &["Company", "Location", "Work Model"])
}

fn is_compact_separator(line: &str) -> bool {
    line.contains(COMPACT_SEPARATOR)
}

const H1B_HEADERS: &[fn(&str) -> bool] = &[is_h1b_header];
const GENERIC_HEADERS: &[fn(&str) -> bool] =
    &[is_titled_header, is_work_model_header, is_compact_separator];

/// Header predicates for a layout, in the order they are tried.
fn header_predicates(kind: TableKind) -> &'static [fn(&str) -> bool] {
    match kind {
        TableKind::H1b => H1B_HEADERS,
        TableKind::Generic => GENERIC_HEADERS,
    }
}

/// Index of the header line: the first line matching the first predicate
/// that matches anything.
fn find_header(lines: &[&str], kind: TableKind) -> Option<usize> {
    header_predicates(kind)
        .iter()
        .find_map(|pred| lines.iter().position(|l| pred(l)))
}

impl TableParser {
    /// Parse rows below a recognized header.
    ///
    /// Continuation rows reuse the company of the last full row seen in this
    /// call. Rows with too few cells or without an apply link are dropped.
    #[must_use]
    pub fn parse_primary(&self, raw: &str, hints: &ParseHints) -> ParseOutcome {
        let lines: Vec<&str> = raw.lines().collect();
        let resolved = self.resolve(raw, &lines, hints);

        let Some(header) = find_header(&lines, resolved.kind) else {
            tracing::debug!("no {:?} table header found", resolved.kind);
            return ParseOutcome::NoMatch;
        };

        // A worded header is followed by its separator row; a matched
        // separator is already that row.
        let first_row = if cells::is_separator(lines[header]) {
            header + 1
        } else {
            header + 2
        };

        let mut last_company: Option<String> = None;
        let mut listings = Vec::new();

        for (row, line) in lines.iter().enumerate().skip(first_row) {
            let line = line.trim();
            if line.is_empty() || !line.contains('|') || cells::is_heading_or_rule(line) {
                continue;
            }

            let row_cells = cells::split_cells(line);
            if row_cells.len() < MIN_CELLS {
                continue;
            }

            let company = if cells::is_continuation(&row_cells[0]) {
                last_company.clone().unwrap_or_default()
            } else {
                let company = cells::clean_company(&row_cells[0]);
                last_company = Some(company.clone());
                company
            };

            if let Some(listing) = self.build_row(&row_cells, company, &resolved, row) {
                listings.push(listing);
            }
        }

        ParseOutcome::from_listings(listings)
    }
}
