// src/links.rs

use anyhow::{bail, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, str::FromStr};
use tracing::debug;

use crate::decode::decode_entities;

/// How rows of the links CSV are split into cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Split on `\n` and `,` with no quote handling. A quoted cell containing
    /// a comma is cut in two.
    #[default]
    Naive,
    /// RFC 4180 parsing via the `csv` crate.
    Quoted,
}

impl FromStr for ParseMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "naive" => Ok(ParseMode::Naive),
            "quoted" | "csv" => Ok(ParseMode::Quoted),
            other => bail!("unknown CSV parse mode `{}` (expected naive or quoted)", other),
        }
    }
}

/// Trim, decode entities, then drop a single leading `"`.
pub fn clean_cell(raw: &str) -> String {
    let decoded = decode_entities(raw.trim());
    match decoded.strip_prefix('"') {
        Some(rest) => rest.to_string(),
        None => decoded,
    }
}

/// Collect the distinct company names from the first two columns of every
/// data row. The header row is skipped and rows with fewer than two cells are
/// ignored. The returned set iterates in ascending code-point order.
pub fn extract_company_names(body: &str, mode: ParseMode) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    match mode {
        ParseMode::Naive => collect_naive(body, &mut names),
        ParseMode::Quoted => collect_quoted(body, &mut names),
    }
    debug!(?mode, names = names.len(), "extracted company names");
    names
}

fn collect_naive(body: &str, names: &mut BTreeSet<String>) {
    for line in body.split('\n').skip(1) {
        let cells: Vec<&str> = line.split(',').collect();
        if cells.len() < 2 {
            continue;
        }
        names.insert(clean_cell(cells[0]));
        names.insert(clean_cell(cells[1]));
    }
}

fn collect_quoted(body: &str, names: &mut BTreeSet<String>) {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    for (idx, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                debug!(record = idx, error = %e, "skipping unparseable CSV record");
                continue;
            }
        };
        if let (Some(home), Some(link)) = (record.get(0), record.get(1)) {
            names.insert(clean_cell(home));
            names.insert(clean_cell(link));
        }
    }
}
