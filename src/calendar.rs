use crate::model::{ScheduleDay, WEEKDAYS};
use crate::storage;
use anyhow::{bail, Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

const DEFAULT_HOLIDAY_NAME: &str = "Public holiday";
const FALLBACK_DESCRIPTION: &str = "Holiday";

/// Les cinq jours ouvrés d'une semaine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekInfo {
    pub dates: [NaiveDate; WEEKDAYS],
}

impl WeekInfo {
    pub fn from_monday(monday: NaiveDate) -> Self {
        Self {
            dates: std::array::from_fn(|i| monday + Duration::days(i as i64)),
        }
    }

    /// Clés `YYYYMMDD`.
    pub fn date_keys(&self) -> Vec<String> {
        self.dates.iter().map(|d| date_key(*d)).collect()
    }

    /// Libellés `MM/DD`.
    pub fn day_labels(&self) -> Vec<String> {
        self.dates.iter().map(|d| d.format("%m/%d").to_string()).collect()
    }

    pub fn date_range(&self) -> String {
        let labels = self.day_labels();
        format!("{} - {}", labels[0], labels[WEEKDAYS - 1])
    }
}

/// Source des dates d'une semaine à partir d'un identifiant et d'un décalage.
pub trait WeekCalendar {
    fn week(&self, start_week: &str, offset: u32) -> Result<WeekInfo>;
}

/// Semaines ISO 8601, identifiant `YYYY-Www` (ex. `2025-W02`).
#[derive(Debug, Default, Clone, Copy)]
pub struct IsoWeekCalendar;

impl WeekCalendar for IsoWeekCalendar {
    fn week(&self, start_week: &str, offset: u32) -> Result<WeekInfo> {
        let (year, week) = start_week
            .trim()
            .split_once("-W")
            .with_context(|| format!("invalid week identifier: {start_week}"))?;
        let year: i32 = year
            .parse()
            .with_context(|| format!("invalid year in {start_week}"))?;
        let week: u32 = week
            .parse()
            .with_context(|| format!("invalid week number in {start_week}"))?;
        let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
            .with_context(|| format!("week {week} does not exist in {year}"))?;
        let monday = monday
            .checked_add_signed(Duration::weeks(i64::from(offset)))
            .context("date overflow")?;
        monday
            .checked_add_signed(Duration::days(WEEKDAYS as i64 - 1))
            .context("date overflow")?;
        Ok(WeekInfo::from_monday(monday))
    }
}

/// Réponse d'une source de jours fériés.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HolidayStatus {
    pub is_holiday: bool,
    pub description: String,
}

pub trait HolidayProvider {
    fn is_holiday(&self, date: &str) -> HolidayStatus;
}

/// Construit les `ScheduleDay` d'une semaine.
pub fn schedule_days(week: &WeekInfo, holidays: &dyn HolidayProvider) -> Vec<ScheduleDay> {
    week.date_keys()
        .into_iter()
        .map(|date| {
            let status = holidays.is_holiday(&date);
            if status.is_holiday {
                ScheduleDay::holiday(date, status.description)
            } else {
                ScheduleDay::active(date)
            }
        })
        .collect()
}

/// Entrée d'un fichier de jours fériés.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayEntry {
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_holiday: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holiday {
    pub date: String,
    pub name: String,
}

/// Calendrier des jours fériés : `YYYYMMDD` → nom.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    days: BTreeMap<String, String>,
}

impl HolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I: IntoIterator<Item = HolidayEntry>>(entries: I) -> Self {
        let mut calendar = Self::new();
        calendar.merge(entries);
        calendar
    }

    /// Fusionne des entrées ; ignore celles sans date ou non fériées.
    pub fn merge<I: IntoIterator<Item = HolidayEntry>>(&mut self, entries: I) -> usize {
        let mut added = 0;
        for entry in entries {
            if !entry.is_holiday || entry.date.trim().is_empty() {
                continue;
            }
            let name = entry
                .name
                .filter(|n| !n.is_empty())
                .or(entry.description.filter(|d| !d.is_empty()))
                .unwrap_or_else(|| DEFAULT_HOLIDAY_NAME.to_string());
            self.days.insert(entry.date.trim().to_string(), name);
            added += 1;
        }
        added
    }

    /// Charge tous les `*.json` d'un répertoire (ordre alphabétique).
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut files: Vec<_> = fs::read_dir(dir)
            .with_context(|| format!("reading holiday directory {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect();
        files.sort();

        let mut calendar = Self::new();
        for path in files {
            let entries = read_entries(&path)?;
            let added = calendar.merge(entries);
            tracing::debug!(file = %path.display(), added, "holiday file loaded");
        }
        tracing::info!(total = calendar.len(), "holiday calendar loaded");
        Ok(calendar)
    }

    /// Charge un calendrier enregistré ; vide si le fichier n'existe pas.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        Ok(Self::from_entries(read_entries(path)?))
    }

    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_vec_pretty(&self.entries())?;
        storage::write_atomic(path.as_ref(), &json)
    }

    pub fn entries(&self) -> Vec<HolidayEntry> {
        self.days
            .iter()
            .map(|(date, name)| HolidayEntry {
                date: date.clone(),
                name: Some(name.clone()),
                description: None,
                is_holiday: true,
            })
            .collect()
    }

    /// Déclare (`is_holiday`) ou retire un jour férié.
    pub fn set(&mut self, date: &str, name: &str, is_holiday: bool) -> Result<()> {
        parse_date_key(date)?;
        if is_holiday {
            let name = if name.trim().is_empty() {
                DEFAULT_HOLIDAY_NAME
            } else {
                name.trim()
            };
            self.days.insert(date.to_string(), name.to_string());
        } else {
            self.days.remove(date);
        }
        Ok(())
    }

    pub fn name(&self, date: &str) -> Option<&str> {
        self.days.get(date).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn for_year(&self, year: i32) -> Vec<Holiday> {
        let prefix = format!("{year:04}");
        self.days
            .iter()
            .filter(|(date, _)| date.starts_with(&prefix))
            .map(|(date, name)| Holiday {
                date: date.clone(),
                name: name.clone(),
            })
            .collect()
    }

    /// Jours fériés parmi les dates données, dans l'ordre des dates.
    pub fn in_range<'a, I: IntoIterator<Item = &'a str>>(&self, dates: I) -> Vec<Holiday> {
        dates
            .into_iter()
            .filter_map(|date| {
                self.name(date).map(|name| Holiday {
                    date: date.to_string(),
                    name: name.to_string(),
                })
            })
            .collect()
    }
}

impl HolidayProvider for HolidayCalendar {
    fn is_holiday(&self, date: &str) -> HolidayStatus {
        match self.name(date) {
            Some(name) => HolidayStatus {
                is_holiday: true,
                description: name.to_string(),
            },
            None => HolidayStatus::default(),
        }
    }
}

/// Seuls les jours de `off` sont chômés ; le nom vient du calendrier s'il existe.
#[derive(Debug, Clone)]
pub struct SelectedHolidays<'a> {
    calendar: &'a HolidayCalendar,
    off: BTreeSet<String>,
}

impl<'a> SelectedHolidays<'a> {
    pub fn new<I: IntoIterator<Item = String>>(calendar: &'a HolidayCalendar, off: I) -> Self {
        Self {
            calendar,
            off: off.into_iter().collect(),
        }
    }
}

impl HolidayProvider for SelectedHolidays<'_> {
    fn is_holiday(&self, date: &str) -> HolidayStatus {
        if !self.off.contains(date) {
            return HolidayStatus::default();
        }
        HolidayStatus {
            is_holiday: true,
            description: self
                .calendar
                .name(date)
                .unwrap_or(FALLBACK_DESCRIPTION)
                .to_string(),
        }
    }
}

pub fn date_key(date: NaiveDate) -> String {
    format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

/// Valide une clé `YYYYMMDD`.
pub fn parse_date_key(raw: &str) -> Result<NaiveDate> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        bail!("invalid date key (expected YYYYMMDD): {raw}");
    }
    NaiveDate::parse_from_str(raw, "%Y%m%d").with_context(|| format!("invalid date: {raw}"))
}

fn read_entries(path: &Path) -> Result<Vec<HolidayEntry>> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing {}", path.display()))
}
