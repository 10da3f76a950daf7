#![forbid(unsafe_code)]
//! Permanence : génération de plannings de permanence hebdomadaires (sans BD).
//!
//! - Affectation par semaine : indisponibilités, plafonds, tâches préférées.
//! - Audit : doublons dans la journée, séries de jours travaillés trop longues.
//! - Générateur aléatoire fourni par l'appelant ; cœur pur, sans I/O.
//! - Profils, fériés et exports (JSON/CSV/HTML) autour du cœur.

pub mod calendar;
pub mod io;
pub mod model;
pub mod planner;
pub mod profile;
pub mod render;
pub mod scheduler;
pub mod storage;

pub use calendar::{
    HolidayCalendar, HolidayProvider, HolidayStatus, IsoWeekCalendar, SelectedHolidays,
    WeekCalendar, WeekInfo,
};
pub use model::{Person, ScheduleDay, Settings, Task, WeekAssignment, UNFILLED};
pub use planner::{plan_weeks, PlannedWeek};
pub use profile::{Profile, ProfileBook, SavedSchedule};
pub use render::{HtmlTable, ScheduleRenderer, TextTable};
pub use scheduler::{
    assign, validate, Conflict, ConflictKind, SchedError, ValidationConstraints,
    ValidationReport,
};
pub use storage::{JsonStorage, Storage};
