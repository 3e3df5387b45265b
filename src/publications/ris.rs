//! Parser for RIS-style citation exports (`.ciw` files).
//!
//! Every line is a two-character tag, one separator column and a value:
//!
//! ```text
//! AF Doe, Jane
//!    Roe, Richard
//! TI A very long title that continues
//!    on the next line
//! PY 2021
//! ER
//! ```
//!
//! A line whose tag is blank continues the previous tag. A line of three
//! characters or fewer (`ER`, `EF`, an empty line) closes the current record.
//! Tags other than the ones [`Publication`] keeps are skipped.

use crate::constants::DOI_URL_PREFIX;

use super::Publication;

/// Parses every record in `content`. `source` is stored on each record.
///
/// Returns an empty list when no line carries a recognized tag.
pub fn parse(content: &str, source: &str) -> Vec<Publication> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut records = Vec::new();
    let mut current = Publication::with_source(source);
    let mut key = String::new();

    for line in content.lines() {
        let line = line.trim_end_matches('\r');
        if line.chars().count() <= 3 {
            if !current.is_empty() {
                records.push(std::mem::replace(&mut current, Publication::with_source(source)));
            }
            key.clear();
            continue;
        }

        let tag: String = line.chars().take(2).collect();
        if tag != "  " {
            key = tag;
        }
        let value: String = line.chars().skip(3).collect();
        current.add(&key, &value);
    }

    if !current.is_empty() {
        records.push(current);
    }
    records
}

impl Publication {
    fn with_source(source: &str) -> Self {
        Self {
            source: source.to_string(),
            ..Self::default()
        }
    }

    fn add(&mut self, key: &str, value: &str) {
        match key {
            "AF" => self.authors.push(value.to_string()),
            "TI" => append_words(&mut self.title, value),
            "AB" => append_words(&mut self.abstract_text, value),
            "JI" => self.journal = value.to_string(),
            "PD" => self.date = value.to_string(),
            "PY" => self.year = value.to_string(),
            "DI" => self.doi = format!("{DOI_URL_PREFIX}{value}"),
            _ => {}
        }
    }

    fn is_empty(&self) -> bool {
        self.authors.is_empty()
            && self.title.is_empty()
            && self.abstract_text.is_empty()
            && self.journal.is_empty()
            && self.date.is_empty()
            && self.year.is_empty()
            && self.doi.is_empty()
    }
}

fn append_words(field: &mut String, value: &str) {
    if !field.is_empty() {
        field.push(' ');
    }
    field.push_str(value);
}
