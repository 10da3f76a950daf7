use super::SchedError;
use crate::model::{Person, ScheduleDay, Task, UNFILLED, WEEKDAYS};
use std::collections::HashSet;

pub(super) fn check_roster(roster: &[Person]) -> Result<(), SchedError> {
    let mut seen = HashSet::new();
    for person in roster {
        let name = person.name.as_str();
        if name.trim().is_empty() {
            return Err(SchedError::InvalidRoster("person name cannot be empty".into()));
        }
        if name == UNFILLED {
            return Err(SchedError::InvalidRoster(format!(
                "{UNFILLED} is reserved and cannot be used as a name"
            )));
        }
        if !seen.insert(name) {
            return Err(SchedError::InvalidRoster(format!("duplicate person name: {name}")));
        }
        if person.max_shifts == 0 {
            return Err(SchedError::InvalidRoster(format!("maxShifts must be > 0 for {name}")));
        }
        if let Some(day) = person.off_days.iter().find(|d| usize::from(**d) >= WEEKDAYS) {
            return Err(SchedError::InvalidRoster(format!(
                "off day {day} out of range 0-4 for {name}"
            )));
        }
    }
    Ok(())
}

pub(super) fn check_tasks(tasks: &[Task]) -> Result<(), SchedError> {
    let mut seen = HashSet::new();
    for task in tasks {
        let name = task.name.as_str();
        if name.trim().is_empty() {
            return Err(SchedError::InvalidTasks("task name cannot be empty".into()));
        }
        if !seen.insert(name) {
            return Err(SchedError::InvalidTasks(format!("duplicate task name: {name}")));
        }
        if task.count == 0 {
            return Err(SchedError::InvalidTasks(format!("count must be > 0 for {name}")));
        }
    }
    Ok(())
}

pub(super) fn check_days(days: &[ScheduleDay]) -> Result<(), SchedError> {
    if days.len() != WEEKDAYS {
        return Err(SchedError::ScheduleDays(days.len()));
    }
    Ok(())
}

/// Noms distincts, dans l'ordre de première apparition, avec leur nombre d'occurrences.
pub(super) fn tally<'a, I: IntoIterator<Item = &'a str>>(names: I) -> Vec<(&'a str, usize)> {
    let mut out: Vec<(&str, usize)> = Vec::new();
    for name in names {
        match out.iter_mut().find(|(n, _)| *n == name) {
            Some((_, count)) => *count += 1,
            None => out.push((name, 1)),
        }
    }
    out
}
