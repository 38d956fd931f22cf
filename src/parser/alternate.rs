/// Lenient line-scan strategy.
///
/// Any line with a pipe and the link host is a candidate row; no header is
/// required. Each line stands alone, so continuation markers do not inherit
/// a company here.
use super::cells::{self, MIN_CELLS};
use super::{ParseHints, ParseOutcome, TableParser};

impl TableParser {
    #[must_use]
    pub fn parse_alternate(&self, raw: &str, hints: &ParseHints) -> ParseOutcome {
        let lines: Vec<&str> = raw.lines().collect();
        let resolved = self.resolve(raw, &lines, hints);

        let listings = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| {
                line.contains('|')
                    && line.contains(self.link_host.as_str())
                    && !cells::is_heading_or_rule(line.trim())
            })
            .filter_map(|(row, line)| {
                let row_cells = cells::split_cells(line);
                if row_cells.len() < MIN_CELLS {
                    return None;
                }
                let company = if cells::is_continuation(&row_cells[0]) {
                    String::new()
                } else {
                    cells::clean_company(&row_cells[0])
                };
                self.build_row(&row_cells, company, &resolved, row)
            })
            .collect();

        ParseOutcome::from_listings(listings)
    }
}
