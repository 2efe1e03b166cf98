//! CSV roster and sort-order loading
//!
//! Rosters have a header row of attribute names and one row per team.
//! Team ids are zero-based row order. Sort-order sources only contribute
//! their header row.

use event_core::Team;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::LoadError;

#[cfg(test)]
#[path = "loader_tests.rs"]
mod loader_tests;

/// Teams in load order plus the attribute names from the header.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    pub teams: Vec<Team>,
    pub attributes: Vec<String>,
}

impl Roster {
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Load a roster from a CSV file.
pub fn load_roster(path: &Path) -> Result<Roster, LoadError> {
    let roster = read_roster(open(path)?)?;
    tracing::debug!(
        path = %path.display(),
        teams = roster.len(),
        attributes = ?roster.attributes,
        "loaded roster"
    );
    Ok(roster)
}

/// Read a roster from any CSV source.
///
/// Empty cells count as 0.0. Anything else that is not a number is an error.
pub fn read_roster<R: Read>(reader: R) -> Result<Roster, LoadError> {
    let mut reader = csv_reader(reader);
    let attributes: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if attributes.iter().all(String::is_empty) {
        return Err(LoadError::EmptySource);
    }

    let mut teams = Vec::new();
    for (id, record) in reader.records().enumerate() {
        let record = record?;
        let mut team = Team::new(id);
        for (column, field) in attributes.iter().zip(record.iter()) {
            let value = if field.is_empty() {
                0.0
            } else {
                field.parse().map_err(|_| LoadError::InvalidValue {
                    row: id + 1,
                    column: column.clone(),
                    value: field.to_string(),
                })?
            };
            team.set_attribute(column.as_str(), value);
        }
        teams.push(team);
    }

    let roster = Roster { teams, attributes };
    if roster.is_empty() {
        return Err(LoadError::EmptySource);
    }
    Ok(roster)
}

/// Load ranking metric names (highest priority first) from a CSV header.
pub fn load_sort_order(path: &Path) -> Result<Vec<String>, LoadError> {
    read_sort_order(open(path)?)
}

pub fn read_sort_order<R: Read>(reader: R) -> Result<Vec<String>, LoadError> {
    let mut reader = csv_reader(reader);
    let order: Vec<String> = reader
        .headers()?
        .iter()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    if order.is_empty() {
        return Err(LoadError::EmptySource);
    }
    Ok(order)
}
