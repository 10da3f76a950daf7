use super::{util, Conflict, SchedError, ValidationConstraints, ValidationReport};
use crate::model::{WeekAssignment, WEEKDAYS};
use std::collections::HashMap;

/// Série en cours pour une personne.
struct Streak {
    days: u32,
    start_date: String,
    /// Index du conflit `Overwork` déjà émis pour cette série.
    reported: Option<usize>,
}

pub(super) fn validate(
    weeks: &[WeekAssignment],
    constraints: ValidationConstraints,
) -> Result<ValidationReport, SchedError> {
    check_weeks(weeks)?;

    let mut out = Vec::new();
    let mut streaks: HashMap<String, Streak> = HashMap::new();

    for week in weeks {
        for (weekday, day) in week.schedule_days.iter().enumerate() {
            if !day.should_schedule {
                continue;
            }
            let workers = util::tally(week.names_on(weekday));

            for (person, count) in &workers {
                if *count > 1 {
                    out.push(Conflict::Duplicate {
                        person: (*person).to_string(),
                        date: day.date.clone(),
                    });
                }
            }

            streaks.retain(|name, _| workers.iter().any(|(w, _)| *w == name.as_str()));

            for (person, _) in &workers {
                let streak = streaks.entry((*person).to_string()).or_insert_with(|| Streak {
                    days: 0,
                    start_date: day.date.clone(),
                    reported: None,
                });
                streak.days += 1;
                if streak.days <= constraints.max_consecutive_days {
                    continue;
                }
                match streak.reported {
                    Some(idx) => extend_overwork(&mut out[idx], &day.date, streak.days),
                    None => {
                        streak.reported = Some(out.len());
                        out.push(Conflict::Overwork {
                            person: (*person).to_string(),
                            start_date: streak.start_date.clone(),
                            end_date: day.date.clone(),
                            consecutive_days: streak.days,
                        });
                    }
                }
            }
        }
    }

    Ok(ValidationReport::from_conflicts(out))
}

fn extend_overwork(conflict: &mut Conflict, date: &str, days: u32) {
    if let Conflict::Overwork {
        end_date,
        consecutive_days,
        ..
    } = conflict
    {
        *end_date = date.to_string();
        *consecutive_days = days;
    }
}

fn check_weeks(weeks: &[WeekAssignment]) -> Result<(), SchedError> {
    if weeks.is_empty() {
        return Err(SchedError::EmptyWeeks);
    }
    for (index, week) in weeks.iter().enumerate() {
        if week.schedule.len() != WEEKDAYS {
            return Err(SchedError::MalformedWeek {
                index,
                reason: format!("expected {WEEKDAYS} day rows, got {}", week.schedule.len()),
            });
        }
        if week.schedule_days.len() != WEEKDAYS {
            return Err(SchedError::MalformedWeek {
                index,
                reason: format!(
                    "expected {WEEKDAYS} scheduleDays, got {}",
                    week.schedule_days.len()
                ),
            });
        }
    }
    Ok(())
}
