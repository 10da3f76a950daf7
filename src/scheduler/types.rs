use serde::{Deserialize, Serialize};
use thiserror::Error;

fn default_max_consecutive_days() -> u32 {
    5
}

fn default_min_rest_days() -> u32 {
    2
}

/// Contraintes de l'audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationConstraints {
    #[serde(default = "default_max_consecutive_days")]
    pub max_consecutive_days: u32,
    /// Conservé pour les clients existants ; aucune règle ne l'évalue.
    #[serde(default = "default_min_rest_days")]
    pub min_rest_days: u32,
}

impl Default for ValidationConstraints {
    fn default() -> Self {
        Self {
            max_consecutive_days: default_max_consecutive_days(),
            min_rest_days: default_min_rest_days(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    Duplicate,
    Overwork,
}

impl ConflictKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictKind::Duplicate => "duplicate",
            ConflictKind::Overwork => "overwork",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Conflict {
    /// Même personne sur plusieurs créneaux le même jour.
    Duplicate { person: String, date: String },
    /// Série de jours travaillés au-delà du maximum autorisé.
    #[serde(rename_all = "camelCase")]
    Overwork {
        person: String,
        start_date: String,
        end_date: String,
        consecutive_days: u32,
    },
}

impl Conflict {
    pub fn kind(&self) -> ConflictKind {
        match self {
            Conflict::Duplicate { .. } => ConflictKind::Duplicate,
            Conflict::Overwork { .. } => ConflictKind::Overwork,
        }
    }

    pub fn person(&self) -> &str {
        match self {
            Conflict::Duplicate { person, .. } | Conflict::Overwork { person, .. } => person,
        }
    }
}

/// Résultat de l'audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub conflicts: Vec<Conflict>,
}

impl ValidationReport {
    pub(crate) fn from_conflicts(conflicts: Vec<Conflict>) -> Self {
        Self {
            valid: conflicts.is_empty(),
            conflicts,
        }
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("scheduleDays must contain exactly 5 entries, got {0}")]
    ScheduleDays(usize),
    #[error("invalid roster: {0}")]
    InvalidRoster(String),
    #[error("invalid tasks: {0}")]
    InvalidTasks(String),
    #[error("schedule data must be a non-empty sequence of weeks")]
    EmptyWeeks,
    #[error("malformed week {index}: {reason}")]
    MalformedWeek { index: usize, reason: String },
    #[error("number of weeks must be > 0")]
    NoWeeks,
    #[error("week {week}: {required} slots required but only {available} available")]
    CapacityExceeded {
        week: usize,
        required: u64,
        available: u64,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
