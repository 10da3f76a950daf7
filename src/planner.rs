//! Orchestration sur plusieurs semaines : dates, fériés, contrôle de capacité,
//! puis une affectation par semaine.

use crate::calendar::{self, HolidayProvider, WeekCalendar};
use crate::model::{Settings, WeekAssignment};
use crate::scheduler::{self, SchedError};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Une semaine générée, avec ses libellés d'affichage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedWeek {
    #[serde(flatten)]
    pub assignment: WeekAssignment,
    pub date_range: String,
    pub week_day_dates: Vec<String>,
}

/// Génère `num_weeks` semaines à partir de `start_week`.
///
/// Échoue avant toute affectation si une semaine demande plus de créneaux que
/// le personnel ne peut en couvrir.
pub fn plan_weeks<R: Rng + ?Sized>(
    settings: &Settings,
    start_week: &str,
    num_weeks: u32,
    weeks: &dyn WeekCalendar,
    holidays: &dyn HolidayProvider,
    rng: &mut R,
) -> Result<Vec<PlannedWeek>, SchedError> {
    if num_weeks == 0 {
        return Err(SchedError::NoWeeks);
    }
    scheduler::check_settings(settings)?;

    let mut out = Vec::new();
    for offset in 0..num_weeks {
        let info = weeks.week(start_week, offset)?;
        let days = calendar::schedule_days(&info, holidays);

        let required = settings.required_slots(&days);
        let available = settings.available_slots();
        if required > available {
            return Err(SchedError::CapacityExceeded {
                week: offset as usize + 1,
                required,
                available,
            });
        }

        let assignment = scheduler::assign(&settings.personnel, &settings.tasks, &days, rng)?;
        let unfilled = assignment.unfilled_slots();
        if unfilled > 0 {
            tracing::warn!(week = offset + 1, unfilled, "week has unfilled slots");
        }
        tracing::debug!(week = offset + 1, range = %info.date_range(), "week planned");

        out.push(PlannedWeek {
            assignment,
            date_range: info.date_range(),
            week_day_dates: info.day_labels(),
        });
    }

    tracing::info!(start_week, weeks = out.len(), "schedule generated");
    Ok(out)
}

/// Grilles seules, dans l'ordre, pour l'audit.
pub fn assignments(weeks: &[PlannedWeek]) -> Vec<WeekAssignment> {
    weeks.iter().map(|w| w.assignment.clone()).collect()
}
