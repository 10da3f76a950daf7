use super::{util, SchedError};
use crate::model::{Person, ScheduleDay, Task, WeekAssignment, UNFILLED};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

pub(super) fn assign<R: Rng + ?Sized>(
    roster: &[Person],
    tasks: &[Task],
    schedule_days: &[ScheduleDay],
    rng: &mut R,
) -> Result<WeekAssignment, SchedError> {
    util::check_roster(roster)?;
    util::check_tasks(tasks)?;
    util::check_days(schedule_days)?;

    let mut load: HashMap<&str, u32> = roster.iter().map(|p| (p.name.as_str(), 0)).collect();
    let mut schedule = Vec::with_capacity(schedule_days.len());

    for (weekday, day) in schedule_days.iter().enumerate() {
        if !day.should_schedule {
            schedule.push(vec![Vec::new(); tasks.len()]);
            continue;
        }

        let mut pool: Vec<&Person> = roster
            .iter()
            .filter(|p| !p.is_off(weekday) && load[p.name.as_str()] < p.max_shifts)
            .collect();

        let mut row = Vec::with_capacity(tasks.len());
        for task in tasks {
            let (picked, remaining) = staff_task(task, pool, rng);
            for person in &picked {
                if let Some(count) = load.get_mut(person.name.as_str()) {
                    *count += 1;
                }
            }
            row.push(fill_cell(task, &picked));
            pool = remaining;
        }
        schedule.push(row);
    }

    Ok(WeekAssignment {
        schedule,
        tasks: tasks.to_vec(),
        schedule_days: schedule_days.to_vec(),
    })
}

/// Choisit jusqu'à `task.count` personnes : préférences d'abord, puis les autres,
/// chaque groupe mélangé. Retourne (choisis, pool restant pour la tâche suivante).
fn staff_task<'a, R: Rng + ?Sized>(
    task: &Task,
    pool: Vec<&'a Person>,
    rng: &mut R,
) -> (Vec<&'a Person>, Vec<&'a Person>) {
    let (mut ordered, mut others): (Vec<&Person>, Vec<&Person>) =
        pool.into_iter().partition(|p| p.prefers(&task.name));
    ordered.shuffle(rng);
    others.shuffle(rng);
    ordered.append(&mut others);

    let take = ordered.len().min(task.count as usize);
    let remaining = ordered.split_off(take);
    (ordered, remaining)
}

fn fill_cell(task: &Task, picked: &[&Person]) -> Vec<String> {
    let mut cell: Vec<String> = picked.iter().map(|p| p.name.clone()).collect();
    cell.resize(task.count as usize, UNFILLED.to_string());
    cell
}
