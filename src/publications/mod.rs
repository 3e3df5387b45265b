//! Publication lists built from citation exports.
//!
//! [`load_publications`] reads every `.ciw` file of a directory and returns
//! the records newest first. [`publist`] turns each record into one include
//! of a per-record template, so the layout of a publication list is itself
//! just another document:
//!
//! ```text
//! <li>{{ arg(i=0) }}. {{ arg(i=1) | join(sep="; ") }}. <i>{{ arg(i=2) }}</i> {{ arg(i=3) }}</li>
//! ```
//!
//! Template arguments, in order: title, authors (a list), journal,
//! `date + " " + year`, DOI link, abstract.

pub mod ris;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tera::Value;

use crate::constants::CITATION_EXTENSION;
use crate::templating::{ComposeError, Composer, RenderContext, path};

/// One parsed citation record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Publication {
    pub authors: Vec<String>,
    pub title: String,
    pub abstract_text: String,
    pub journal: String,
    pub date: String,
    pub year: String,
    /// Full DOI link, empty when the record has none.
    pub doi: String,
    /// The file the record was read from.
    pub source: String,
}

impl Publication {
    /// The positional arguments handed to the per-record template.
    pub fn template_args(&self) -> Vec<Value> {
        vec![
            Value::String(self.title.clone()),
            Value::Array(self.authors.iter().cloned().map(Value::String).collect()),
            Value::String(self.journal.clone()),
            Value::String(format!("{} {}", self.date, self.year)),
            Value::String(self.doi.clone()),
            Value::String(self.abstract_text.clone()),
        ]
    }
}

/// Records loaded from one directory.
#[derive(Debug, Default)]
pub struct PublicationList {
    /// Every record that parsed, most recent year first.
    pub records: Vec<Publication>,
    /// The last file that could not be read or held no record.
    pub failure: Option<ComposeError>,
}

/// Loads all `.ciw` files in `dir`.
///
/// Files are visited in name order and records are stable-sorted by year,
/// descending, so records of the same year keep that order. A broken file is
/// skipped with a warning and reported in [`PublicationList::failure`]; only
/// an unreadable directory fails the whole call.
pub fn load_publications(dir: &str) -> Result<PublicationList, ComposeError> {
    let entries = fs::read_dir(dir).map_err(|e| ComposeError::Citation {
        path: dir.to_string(),
        message: e.to_string(),
    })?;

    let mut files: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| {
            Path::new(&entry.file_name()).extension().is_some_and(|ext| ext == CITATION_EXTENSION)
        })
        .map(|entry| format!("{}/{}", dir.trim_end_matches('/'), entry.file_name().to_string_lossy()))
        .collect();
    files.sort();

    let mut list = PublicationList::default();
    for file in files {
        match load_file(&file) {
            Ok(mut records) => list.records.append(&mut records),
            Err(err) => {
                tracing::warn!("{}", err);
                list.failure = Some(err);
            }
        }
    }

    list.records.sort_by(|a, b| b.year.cmp(&a.year));
    tracing::debug!("Loaded {} publications from {}", list.records.len(), dir);
    Ok(list)
}

fn load_file(file: &str) -> Result<Vec<Publication>, ComposeError> {
    let content = fs::read_to_string(file).map_err(|e| ComposeError::Citation {
        path: file.to_string(),
        message: e.to_string(),
    })?;
    let records = ris::parse(&content, file);
    if records.is_empty() {
        return Err(ComposeError::Citation {
            path: file.to_string(),
            message: "no citation record found".to_string(),
        });
    }
    Ok(records)
}

/// Includes `template` once per publication found in `dir` and concatenates
/// the results.
///
/// `dir` and `template` resolve like any include reference. Loading problems
/// are recorded on `ctx`; the records that did load are still rendered.
pub fn publist(composer: &Composer, ctx: &Arc<RenderContext>, dir: &str, template: &str) -> String {
    let resolved = path::resolve(ctx.document(), dir);
    let list = match load_publications(&resolved) {
        Ok(list) => list,
        Err(err) => {
            tracing::warn!("{}: {}", ctx.document(), err);
            ctx.record(err);
            return String::new();
        }
    };

    if let Some(err) = list.failure {
        ctx.record(err);
    }

    list.records
        .iter()
        .map(|publication| composer.include(ctx, template, publication.template_args()).text)
        .collect()
}
