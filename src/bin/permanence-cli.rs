#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use permanence::{
    calendar::{HolidayCalendar, IsoWeekCalendar, SelectedHolidays, WeekCalendar},
    io,
    planner,
    profile::{ProfileBook, SavedSchedule},
    render::{HtmlTable, ScheduleRenderer, TextTable},
    scheduler::{self, Conflict, ValidationConstraints, ValidationReport},
    storage::{JsonStorage, Storage},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planning de permanences (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON des profils
    #[arg(long, global = true, default_value = "profiles.json")]
    store: String,

    /// Fichier JSON du calendrier des jours fériés
    #[arg(long, global = true, default_value = "holidays.json")]
    holidays: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Gérer les profils
    Profile {
        #[command(subcommand)]
        cmd: ProfileCmd,
    },

    /// Remplacer le personnel du profil actif depuis un CSV
    ImportPersonnel {
        #[arg(long)]
        csv: String,
    },

    /// Remplacer les tâches du profil actif depuis un CSV
    ImportTasks {
        #[arg(long)]
        csv: String,
    },

    /// Gérer le calendrier des jours fériés
    Holiday {
        #[command(subcommand)]
        cmd: HolidayCmd,
    },

    /// Générer un planning sur plusieurs semaines
    Generate {
        /// Semaine ISO de départ, ex. 2025-W02
        #[arg(long)]
        start_week: String,
        #[arg(long, default_value_t = 1)]
        weeks: u32,
        /// Graine du générateur (reproductible)
        #[arg(long)]
        seed: Option<u64>,
        /// Fériés travaillés quand même, "YYYYMMDD,..."
        #[arg(long)]
        work_on: Option<String>,
        /// Jours chômés en plus du calendrier, "YYYYMMDD,..."
        #[arg(long)]
        off: Option<String>,
        /// Enregistrer sous ce nom dans le profil actif
        #[arg(long)]
        save: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        html: Option<String>,
        /// Auditer le résultat
        #[arg(long)]
        check: bool,
        #[arg(long, default_value_t = 5)]
        max_consecutive_days: u32,
    },

    /// Auditer un planning JSON
    Validate {
        #[arg(long)]
        input: String,
        #[arg(long)]
        max_consecutive_days: Option<u32>,
        #[arg(long)]
        min_rest_days: Option<u32>,
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
        /// Affiche le rapport en JSON
        #[arg(long)]
        json: bool,
    },

    /// Plannings enregistrés du profil actif
    Schedule {
        #[command(subcommand)]
        cmd: ScheduleCmd,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileCmd {
    List,
    Create { name: String },
    Use { name: String },
    Rename { name: String, new_name: String },
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum HolidayCmd {
    /// Importer un répertoire de fichiers JSON
    Import {
        #[arg(long)]
        dir: String,
    },
    /// Déclarer ou retirer un jour férié
    Set {
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        remove: bool,
    },
    List {
        #[arg(long)]
        year: i32,
    },
    /// Fériés couverts par une plage de semaines
    Range {
        #[arg(long)]
        start_week: String,
        #[arg(long, default_value_t = 1)]
        weeks: u32,
    },
}

#[derive(Subcommand, Debug)]
enum ScheduleCmd {
    List,
    Show {
        name: String,
        #[arg(long)]
        html: Option<String>,
    },
    Delete {
        name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.store)?;
    let mut book = storage.load_or_default()?;

    let code = match cli.cmd {
        Commands::Profile { cmd } => {
            run_profile(&mut book, cmd)?;
            storage.save(&book)?;
            0
        }
        Commands::ImportPersonnel { csv } => {
            let personnel = io::import_personnel_csv(csv)?;
            println!("{} person(s) imported", personnel.len());
            let mut settings = book.active()?.settings.clone();
            settings.personnel = personnel;
            let active = book.active_profile.clone();
            book.update_settings(&active, settings)?;
            storage.save(&book)?;
            0
        }
        Commands::ImportTasks { csv } => {
            let tasks = io::import_tasks_csv(csv)?;
            println!("{} task(s) imported", tasks.len());
            let mut settings = book.active()?.settings.clone();
            settings.tasks = tasks;
            let active = book.active_profile.clone();
            book.update_settings(&active, settings)?;
            storage.save(&book)?;
            0
        }
        Commands::Holiday { cmd } => {
            run_holiday(&cli.holidays, cmd)?;
            0
        }
        Commands::Generate {
            start_week,
            weeks,
            seed,
            work_on,
            off,
            save,
            out_json,
            out_csv,
            html,
            check,
            max_consecutive_days,
        } => {
            let calendar = HolidayCalendar::load_file(&cli.holidays)?;
            let week_calendar = IsoWeekCalendar;
            let off_days = off_dates(
                &calendar,
                &week_calendar,
                &start_week,
                weeks,
                off.as_deref(),
                work_on.as_deref(),
            )?;
            let holidays = SelectedHolidays::new(&calendar, off_days);
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };

            let settings = &book.active()?.settings;
            let planned = planner::plan_weeks(
                settings,
                &start_week,
                weeks,
                &week_calendar,
                &holidays,
                &mut rng,
            )?;

            print!("{}", TextTable.render(&planned));
            if let Some(path) = out_json {
                io::export_weeks_json(path, &planned)?;
            }
            if let Some(path) = out_csv {
                io::export_weeks_csv(path, &planned)?;
            }
            if let Some(path) = html {
                std::fs::write(path, HtmlTable.render(&planned))?;
            }

            let code = if check {
                let constraints = ValidationConstraints {
                    max_consecutive_days,
                    ..ValidationConstraints::default()
                };
                let report =
                    scheduler::validate(&planner::assignments(&planned), Some(constraints))?;
                print_report(&report)
            } else {
                0
            };

            if let Some(name) = save {
                book.save_schedule(&name, SavedSchedule::new(start_week, planned, Utc::now()))?;
                storage.save(&book)?;
                println!("Schedule saved as {name} in {}", storage.path().display());
            }
            code
        }
        Commands::Validate {
            input,
            max_consecutive_days,
            min_rest_days,
            report,
            json,
        } => {
            let request = io::load_validation_request(&input)?;
            let mut constraints = request.constraints.unwrap_or_default();
            if let Some(days) = max_consecutive_days {
                constraints.max_consecutive_days = days;
            }
            if let Some(days) = min_rest_days {
                constraints.min_rest_days = days;
            }
            let result = scheduler::validate(&request.schedule, Some(constraints))?;
            if let Some(path) = report {
                io::export_conflicts_csv(path, &result.conflicts)?;
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                if result.valid {
                    0
                } else {
                    2
                }
            } else {
                print_report(&result)
            }
        }
        Commands::Schedule { cmd } => match cmd {
            ScheduleCmd::List => {
                for (name, saved) in &book.active()?.schedules {
                    println!(
                        "{} | {} | {} week(s) | {}",
                        name,
                        saved.start_week,
                        saved.weeks.len(),
                        saved.created_at.to_rfc3339()
                    );
                }
                0
            }
            ScheduleCmd::Show { name, html } => {
                let saved = book.schedule(&name)?;
                print!("{}", TextTable.render(&saved.weeks));
                if let Some(path) = html {
                    std::fs::write(path, HtmlTable.render(&saved.weeks))?;
                }
                0
            }
            ScheduleCmd::Delete { name } => {
                book.delete_schedule(&name)?;
                storage.save(&book)?;
                0
            }
        },
    };

    std::process::exit(code);
}

fn run_profile(book: &mut ProfileBook, cmd: ProfileCmd) -> Result<()> {
    match cmd {
        ProfileCmd::List => {
            for name in book.names() {
                let marker = if name == book.active_profile { "*" } else { " " };
                println!("{marker} {name}");
            }
        }
        ProfileCmd::Create { name } => book.create(&name)?,
        ProfileCmd::Use { name } => book.set_active(&name)?,
        ProfileCmd::Rename { name, new_name } => book.rename(&name, &new_name)?,
        ProfileCmd::Delete { name } => book.delete(&name)?,
    }
    Ok(())
}

fn run_holiday(path: &str, cmd: HolidayCmd) -> Result<()> {
    let mut calendar = HolidayCalendar::load_file(path)?;
    match cmd {
        HolidayCmd::Import { dir } => {
            let imported = HolidayCalendar::load_dir(&dir)?;
            let added = calendar.merge(imported.entries());
            calendar.save_file(path)?;
            println!("{added} holiday(s) imported");
        }
        HolidayCmd::Set { date, name, remove } => {
            calendar.set(&date, &name, !remove)?;
            calendar.save_file(path)?;
        }
        HolidayCmd::List { year } => {
            for h in calendar.for_year(year) {
                println!("{} | {}", h.date, h.name);
            }
        }
        HolidayCmd::Range { start_week, weeks } => {
            let dates = week_dates(&IsoWeekCalendar, &start_week, weeks)?;
            for h in calendar.in_range(dates.iter().map(String::as_str)) {
                println!("{} | {}", h.date, h.name);
            }
        }
    }
    Ok(())
}

fn week_dates(calendar: &dyn WeekCalendar, start_week: &str, weeks: u32) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for offset in 0..weeks {
        out.extend(calendar.week(start_week, offset)?.date_keys());
    }
    Ok(out)
}

/// Fériés du calendrier sur la plage, plus `off`, moins `work_on`.
fn off_dates(
    calendar: &HolidayCalendar,
    weeks_calendar: &dyn WeekCalendar,
    start_week: &str,
    weeks: u32,
    off: Option<&str>,
    work_on: Option<&str>,
) -> Result<BTreeSet<String>> {
    let dates = week_dates(weeks_calendar, start_week, weeks)?;
    let mut out: BTreeSet<String> = calendar
        .in_range(dates.iter().map(String::as_str))
        .into_iter()
        .map(|h| h.date)
        .collect();
    for date in split_dates(off)? {
        out.insert(date);
    }
    for date in split_dates(work_on)? {
        out.remove(&date);
    }
    Ok(out)
}

fn split_dates(list: Option<&str>) -> Result<Vec<String>> {
    let Some(list) = list else {
        return Ok(Vec::new());
    };
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            permanence::calendar::parse_date_key(s)
                .with_context(|| format!("invalid date in list: {s}"))?;
            Ok(s.to_string())
        })
        .collect()
}

fn print_report(report: &ValidationReport) -> i32 {
    if report.valid {
        println!("OK: no conflicts");
        return 0;
    }
    eprintln!("Found {} conflict(s)", report.conflicts.len());
    for c in &report.conflicts {
        match c {
            Conflict::Duplicate { person, date } => {
                eprintln!("duplicate | {person} | {date}");
            }
            Conflict::Overwork {
                person,
                start_date,
                end_date,
                consecutive_days,
            } => {
                eprintln!("overwork | {person} | {start_date} → {end_date} | {consecutive_days} day(s)");
            }
        }
    }
    // Code 2 = WARNING/INCOMPLETE
    2
}
