use crate::model::{Person, Task, WeekAssignment};
use crate::planner::PlannedWeek;
use crate::scheduler::{Conflict, ValidationConstraints};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Import du personnel depuis CSV: header `name,max_shifts[,off_days][,preferred_task]`
pub fn import_personnel_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Person>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid personnel row (empty name)");
        }
        let max_shifts = match rec.get(1).map(str::trim) {
            Some(raw) if !raw.is_empty() => raw
                .parse::<u32>()
                .with_context(|| format!("invalid max_shifts for {name}"))?,
            _ => 5,
        };
        let mut person = Person::new(name, max_shifts);
        if let Some(raw) = rec.get(2) {
            person.off_days =
                parse_off_days(raw).with_context(|| format!("invalid off_days for {name}"))?;
        }
        if let Some(task) = rec.get(3) {
            person.preferred_task = task.trim().to_string();
        }
        out.push(person);
    }
    Ok(out)
}

/// Jours séparés par `;` : indices `0..4` ou `mon..fri`.
pub fn parse_off_days(raw: &str) -> anyhow::Result<BTreeSet<u8>> {
    raw.split(';')
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(parse_weekday)
        .collect()
}

fn parse_weekday(s: &str) -> anyhow::Result<u8> {
    let day = match s.to_ascii_lowercase().as_str() {
        "mon" | "monday" | "lun" => 0,
        "tue" | "tuesday" | "mar" => 1,
        "wed" | "wednesday" | "mer" => 2,
        "thu" | "thursday" | "jeu" => 3,
        "fri" | "friday" | "ven" => 4,
        other => other
            .parse::<u8>()
            .with_context(|| format!("unknown weekday: {s}"))?,
    };
    if day > 4 {
        bail!("weekday index out of range 0-4: {day}");
    }
    Ok(day)
}

/// Import des tâches: header `name,count`
pub fn import_tasks_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Task>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let count = rec.get(1).context("missing count")?.trim();
        if name.is_empty() {
            bail!("invalid task row (empty name)");
        }
        let count: u32 = count
            .parse()
            .with_context(|| format!("invalid count for task {name}"))?;
        out.push(Task::new(name, count));
    }
    Ok(out)
}

/// Export JSON des semaines (jolie mise en forme)
pub fn export_weeks_json<P: AsRef<Path>>(path: P, weeks: &[PlannedWeek]) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(weeks)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV: header `week,date,task,slot,person`. Un jour férié donne une
/// ligne par tâche, la description à la place du nom.
pub fn export_weeks_csv<P: AsRef<Path>>(path: P, weeks: &[PlannedWeek]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["week", "date", "task", "slot", "person"])?;
    for (index, week) in weeks.iter().enumerate() {
        let number = (index + 1).to_string();
        let grid = &week.assignment;
        for (weekday, day) in grid.schedule_days.iter().enumerate() {
            for (task_index, task) in grid.tasks.iter().enumerate() {
                if !day.should_schedule {
                    w.write_record([
                        number.as_str(),
                        day.date.as_str(),
                        task.name.as_str(),
                        "",
                        day.description.as_str(),
                    ])?;
                    continue;
                }
                let cell = grid
                    .schedule
                    .get(weekday)
                    .and_then(|row| row.get(task_index))
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                for (slot, person) in cell.iter().enumerate() {
                    let slot = (slot + 1).to_string();
                    w.write_record([
                        number.as_str(),
                        day.date.as_str(),
                        task.name.as_str(),
                        slot.as_str(),
                        person.as_str(),
                    ])?;
                }
            }
        }
    }
    w.flush()?;
    Ok(())
}

/// Export CSV des conflits: header `type,person,date,start_date,end_date,consecutive_days`
pub fn export_conflicts_csv<P: AsRef<Path>>(path: P, conflicts: &[Conflict]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "type",
        "person",
        "date",
        "start_date",
        "end_date",
        "consecutive_days",
    ])?;
    for c in conflicts {
        let kind = c.kind().as_str();
        match c {
            Conflict::Duplicate { person, date } => {
                w.write_record([kind, person.as_str(), date.as_str(), "", "", ""])?;
            }
            Conflict::Overwork {
                person,
                start_date,
                end_date,
                consecutive_days,
            } => {
                let days = consecutive_days.to_string();
                w.write_record([
                    kind,
                    person.as_str(),
                    "",
                    start_date.as_str(),
                    end_date.as_str(),
                    days.as_str(),
                ])?;
            }
        }
    }
    w.flush()?;
    Ok(())
}

/// Corps d'une demande d'audit.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationRequest {
    pub schedule: Vec<WeekAssignment>,
    #[serde(default)]
    pub constraints: Option<ValidationConstraints>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RequestShape {
    Wrapped(ValidationRequest),
    Bare(Vec<WeekAssignment>),
}

/// Lit une demande d'audit : `{schedule, constraints?}` ou un tableau de semaines.
/// Les champs d'affichage d'un planning exporté (`dateRange`, ...) sont ignorés.
pub fn parse_validation_request(data: &[u8]) -> anyhow::Result<ValidationRequest> {
    let shape: RequestShape = serde_json::from_slice(data)
        .context("expected {\"schedule\": [...]} or an array of weeks")?;
    Ok(match shape {
        RequestShape::Wrapped(req) => req,
        RequestShape::Bare(schedule) => ValidationRequest {
            schedule,
            constraints: None,
        },
    })
}

pub fn load_validation_request<P: AsRef<Path>>(path: P) -> anyhow::Result<ValidationRequest> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    parse_validation_request(&data).with_context(|| format!("parsing {}", path.display()))
}
