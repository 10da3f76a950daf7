mod assignment;
mod conflicts;
mod types;
mod util;

pub use types::{
    Conflict, ConflictKind, SchedError, ValidationConstraints, ValidationReport,
};

use crate::model::{Person, ScheduleDay, Settings, Task, WeekAssignment};
use rand::Rng;

/// Répartit le personnel sur une semaine.
///
/// Pour chaque jour actif, dans l'ordre : pool = personnes présentes ce jour-là
/// et sous leur plafond hebdomadaire ; pour chaque tâche, les personnes qui la
/// préfèrent passent devant, chaque groupe étant mélangé avec `rng`. Une personne
/// ne prend qu'un créneau par jour. Les créneaux non couverts valent
/// [`UNFILLED`](crate::model::UNFILLED) : ce n'est pas une erreur.
///
/// Le générateur est fourni par l'appelant : même graine, même grille.
pub fn assign<R: Rng + ?Sized>(
    roster: &[Person],
    tasks: &[Task],
    schedule_days: &[ScheduleDay],
    rng: &mut R,
) -> Result<WeekAssignment, SchedError> {
    assignment::assign(roster, tasks, schedule_days, rng)
}

/// Contrôle personnel et tâches une fois, avant toute semaine.
pub(crate) fn check_settings(settings: &Settings) -> Result<(), SchedError> {
    util::check_roster(&settings.personnel)?;
    util::check_tasks(&settings.tasks)
}

/// Audite des semaines consécutives (ordre calendaire).
///
/// Signale les doublons (même personne plusieurs fois un même jour) et les
/// séries de jours travaillés au-delà de `max_consecutive_days`. Les séries
/// traversent les semaines ; les jours fériés sont ignorés. Une série trop longue
/// produit un seul conflit, prolongé tant qu'elle dure.
pub fn validate(
    weeks: &[WeekAssignment],
    constraints: Option<ValidationConstraints>,
) -> Result<ValidationReport, SchedError> {
    conflicts::validate(weeks, constraints.unwrap_or_default())
}
