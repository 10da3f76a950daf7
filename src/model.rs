use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Valeur réservée pour un créneau qu'aucune personne n'a pu couvrir.
pub const UNFILLED: &str = "UNFILLED";

/// Nombre de jours ouvrés d'une semaine (lundi à vendredi).
pub const WEEKDAYS: usize = 5;

fn default_max_shifts() -> u32 {
    5
}

/// Personne disponible pour les permanences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    /// Plafond hebdomadaire de créneaux.
    #[serde(default = "default_max_shifts")]
    pub max_shifts: u32,
    /// Jours (0 = lundi .. 4 = vendredi) où la personne est indisponible.
    #[serde(default)]
    pub off_days: BTreeSet<u8>,
    /// Tâche préférée, vide si aucune.
    #[serde(default)]
    pub preferred_task: String,
}

impl Person {
    pub fn new<N: Into<String>>(name: N, max_shifts: u32) -> Self {
        Self {
            name: name.into(),
            max_shifts,
            off_days: BTreeSet::new(),
            preferred_task: String::new(),
        }
    }

    pub fn with_off_days<I: IntoIterator<Item = u8>>(mut self, days: I) -> Self {
        self.off_days = days.into_iter().collect();
        self
    }

    pub fn with_preferred_task<T: Into<String>>(mut self, task: T) -> Self {
        self.preferred_task = task.into();
        self
    }

    pub fn is_off(&self, weekday: usize) -> bool {
        u8::try_from(weekday).is_ok_and(|d| self.off_days.contains(&d))
    }

    pub fn prefers(&self, task: &str) -> bool {
        !self.preferred_task.is_empty() && self.preferred_task == task
    }
}

/// Tâche récurrente : `count` créneaux par jour actif.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub count: u32,
}

impl Task {
    pub fn new<N: Into<String>>(name: N, count: u32) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Jour de la semaine planifiée. `should_schedule == false` pour un férié.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDay {
    pub date: String,
    pub should_schedule: bool,
    #[serde(default)]
    pub description: String,
}

impl ScheduleDay {
    pub fn active<D: Into<String>>(date: D) -> Self {
        Self {
            date: date.into(),
            should_schedule: true,
            description: String::new(),
        }
    }

    pub fn holiday<D: Into<String>, S: Into<String>>(date: D, description: S) -> Self {
        Self {
            date: date.into(),
            should_schedule: false,
            description: description.into(),
        }
    }
}

/// Réglages d'un profil : tâches et personnel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub personnel: Vec<Person>,
}

impl Settings {
    /// Créneaux requis sur les jours actifs donnés.
    pub fn required_slots(&self, days: &[ScheduleDay]) -> u64 {
        let per_day: u64 = self.tasks.iter().map(|t| u64::from(t.count)).sum();
        let active = days.iter().filter(|d| d.should_schedule).count() as u64;
        per_day * active
    }

    /// Créneaux que le personnel peut couvrir sur une semaine.
    pub fn available_slots(&self) -> u64 {
        self.personnel.iter().map(|p| u64::from(p.max_shifts)).sum()
    }
}

/// Grille d'une semaine : `schedule[jour][tâche]` → noms affectés.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekAssignment {
    pub schedule: Vec<Vec<Vec<String>>>,
    pub tasks: Vec<Task>,
    pub schedule_days: Vec<ScheduleDay>,
}

impl WeekAssignment {
    pub fn is_active(&self, weekday: usize) -> bool {
        self.schedule_days
            .get(weekday)
            .map_or(false, |d| d.should_schedule)
    }

    /// Noms réellement affectés un jour donné (sentinelles exclues), dans l'ordre de la grille.
    pub fn names_on(&self, weekday: usize) -> impl Iterator<Item = &str> {
        self.schedule
            .get(weekday)
            .into_iter()
            .flatten()
            .flatten()
            .map(String::as_str)
            .filter(|name| is_person_name(name))
    }

    /// Nombre d'affectations d'une personne sur les jours actifs.
    pub fn shifts_of(&self, person: &str) -> usize {
        (0..self.schedule.len())
            .filter(|d| self.is_active(*d))
            .map(|d| self.names_on(d).filter(|n| *n == person).count())
            .sum()
    }

    /// Créneaux restés vacants.
    pub fn unfilled_slots(&self) -> usize {
        self.schedule
            .iter()
            .flatten()
            .flatten()
            .filter(|name| name.as_str() == UNFILLED)
            .count()
    }
}

pub(crate) fn is_person_name(name: &str) -> bool {
    !name.is_empty() && name != UNFILLED
}
