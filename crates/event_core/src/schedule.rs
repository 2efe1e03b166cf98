//! Precomputed schedule templates
//!
//! A template is a table of match rows keyed by `(team_count, matches_per_team)`.
//! Each row names 1-based roster slots for the red alliance followed by the
//! blue alliance. Two row layouts are accepted:
//!
//! - plain: `r1,r2,r3,b1,b2,b3`
//! - MatchMaker: `r1,s,r2,s,r3,s,b1,s,b2,s,b3,s` where every `s` is a
//!   surrogate flag (read and ignored)
//!
//! Templates are never synthesized at runtime. A missing key is a
//! [`ScheduleError::TemplateNotFound`].

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::ScheduleError;

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod schedule_tests;

/// Teams per alliance in the shipped templates.
pub const ALLIANCE_SIZE: usize = 3;

/// Slot assignment for one match. Slots are 1-based roster positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateRow {
    pub red: Vec<usize>,
    pub blue: Vec<usize>,
}

/// A fully parsed template for one `(teams, matches_per_team)` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleTemplate {
    pub teams: usize,
    pub matches_per_team: usize,
    pub alliance_size: usize,
    pub rows: Vec<TemplateRow>,
}

impl ScheduleTemplate {
    /// Parse CSV template text with the default alliance size.
    pub fn parse(teams: usize, matches_per_team: usize, text: &str) -> Result<Self, ScheduleError> {
        Self::parse_with_alliance_size(teams, matches_per_team, ALLIANCE_SIZE, text)
    }

    pub fn parse_with_alliance_size(
        teams: usize,
        matches_per_team: usize,
        alliance_size: usize,
        text: &str,
    ) -> Result<Self, ScheduleError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| ScheduleError::MalformedTemplate {
                line: e.position().map_or(0, |p| p.line()),
                reason: e.to_string(),
            })?;
            let line = record.position().map_or(0, |p| p.line());

            if record.iter().all(str::is_empty) {
                continue;
            }

            // Plain rows carry one field per slot, MatchMaker rows two.
            let stride = match record.len() {
                n if n == 2 * alliance_size => 1,
                n if n == 4 * alliance_size => 2,
                n => {
                    return Err(ScheduleError::MalformedTemplate {
                        line,
                        reason: format!(
                            "expected {} or {} fields, found {}",
                            2 * alliance_size,
                            4 * alliance_size,
                            n
                        ),
                    })
                }
            };

            let slots = record
                .iter()
                .step_by(stride)
                .map(|field| parse_slot(field, line, teams))
                .collect::<Result<Vec<_>, _>>()?;

            let distinct: BTreeSet<_> = slots.iter().collect();
            if distinct.len() != slots.len() {
                return Err(ScheduleError::MalformedTemplate {
                    line,
                    reason: "a slot appears twice in one match".to_string(),
                });
            }

            let (red, blue) = slots.split_at(alliance_size);
            rows.push(TemplateRow {
                red: red.to_vec(),
                blue: blue.to_vec(),
            });
        }

        if rows.is_empty() {
            return Err(ScheduleError::MalformedTemplate {
                line: 0,
                reason: "template contains no matches".to_string(),
            });
        }

        Ok(Self {
            teams,
            matches_per_team,
            alliance_size,
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of matches each slot plays, indexed by `slot - 1`.
    ///
    /// Slots outside `1..=teams` are not counted.
    pub fn slot_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.teams];
        for row in &self.rows {
            for &slot in row.red.iter().chain(row.blue.iter()) {
                if let Some(count) = slot.checked_sub(1).and_then(|i| counts.get_mut(i)) {
                    *count += 1;
                }
            }
        }
        counts
    }
}

fn parse_slot(field: &str, line: u64, teams: usize) -> Result<usize, ScheduleError> {
    let slot: usize = field.parse().map_err(|_| ScheduleError::MalformedTemplate {
        line,
        reason: format!("'{}' is not a slot number", field),
    })?;
    if slot == 0 || slot > teams {
        return Err(ScheduleError::SlotOutOfRange { line, slot, teams });
    }
    Ok(slot)
}

/// File name a template is stored under, e.g. `24_12.csv`.
pub fn template_file_name(teams: usize, matches_per_team: usize) -> String {
    format!("{}_{}.csv", teams, matches_per_team)
}

/// Inverse of [`template_file_name`].
pub fn parse_template_file_name(name: &str) -> Option<(usize, usize)> {
    let (teams, matches) = name.strip_suffix(".csv")?.split_once('_')?;
    Some((teams.parse().ok()?, matches.parse().ok()?))
}

// =============================================================================
// Template stores
// =============================================================================

/// Read-only source of schedule templates.
pub trait ScheduleTemplateStore {
    /// Resolve the template for a roster size and match count.
    fn lookup(&self, teams: usize, matches_per_team: usize) -> Result<ScheduleTemplate, ScheduleError>;

    /// Every `(teams, matches_per_team)` key this store can resolve, sorted.
    fn available(&self) -> Vec<(usize, usize)>;
}

macro_rules! builtin_templates {
    ($(($teams:tt, $matches:tt)),* $(,)?) => {
        &[$((
            $teams,
            $matches,
            include_str!(concat!("../../../schedules/", $teams, "_", $matches, ".csv")),
        )),*]
    };
}

const BUILTIN: &[(usize, usize, &str)] = builtin_templates![
    (12, 6), (12, 8), (12, 10), (12, 12),
    (18, 6), (18, 8), (18, 10), (18, 12),
    (24, 6), (24, 8), (24, 10), (24, 12),
    (30, 6), (30, 8), (30, 10), (30, 12),
    (36, 6), (36, 8), (36, 10), (36, 12),
];

/// Templates compiled into the binary from the workspace `schedules/` directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl ScheduleTemplateStore for BuiltinTemplates {
    fn lookup(&self, teams: usize, matches_per_team: usize) -> Result<ScheduleTemplate, ScheduleError> {
        let (_, _, text) = BUILTIN
            .iter()
            .find(|(t, m, _)| *t == teams && *m == matches_per_team)
            .ok_or(ScheduleError::TemplateNotFound {
                teams,
                matches: matches_per_team,
            })?;
        ScheduleTemplate::parse(teams, matches_per_team, text)
    }

    fn available(&self) -> Vec<(usize, usize)> {
        let mut keys: Vec<_> = BUILTIN.iter().map(|(t, m, _)| (*t, *m)).collect();
        keys.sort_unstable();
        keys
    }
}

/// Templates read from `<root>/<teams>_<matches>.csv` on each lookup.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ScheduleTemplateStore for DirectoryTemplates {
    fn lookup(&self, teams: usize, matches_per_team: usize) -> Result<ScheduleTemplate, ScheduleError> {
        let path = self.root.join(template_file_name(teams, matches_per_team));
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ScheduleError::TemplateNotFound {
                    teams,
                    matches: matches_per_team,
                })
            }
            Err(source) => return Err(ScheduleError::Io { path, source }),
        };
        tracing::debug!(path = %path.display(), "loaded schedule template");
        ScheduleTemplate::parse(teams, matches_per_team, &text)
    }

    fn available(&self) -> Vec<(usize, usize)> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(root = %self.root.display(), error = %e, "cannot list schedule templates");
                return Vec::new();
            }
        };
        let mut keys: Vec<_> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| parse_template_file_name(&entry.file_name().to_string_lossy()))
            .collect();
        keys.sort_unstable();
        keys
    }
}

/// Templates held in memory, for tests and programmatic schedules.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplates {
    templates: HashMap<(usize, usize), ScheduleTemplate>,
}

impl InMemoryTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a template under its own key, replacing any previous one.
    pub fn insert(&mut self, template: ScheduleTemplate) {
        self.templates
            .insert((template.teams, template.matches_per_team), template);
    }
}

impl ScheduleTemplateStore for InMemoryTemplates {
    fn lookup(&self, teams: usize, matches_per_team: usize) -> Result<ScheduleTemplate, ScheduleError> {
        self.templates
            .get(&(teams, matches_per_team))
            .cloned()
            .ok_or(ScheduleError::TemplateNotFound {
                teams,
                matches: matches_per_team,
            })
    }

    fn available(&self) -> Vec<(usize, usize)> {
        let mut keys: Vec<_> = self.templates.keys().copied().collect();
        keys.sort_unstable();
        keys
    }
}
