#![forbid(unsafe_code)]
use permanence::{
    HtmlTable, PlannedWeek, ScheduleDay, ScheduleRenderer, Task, TextTable, WeekAssignment,
};

fn cells(row: &[&[&str]]) -> Vec<Vec<String>> {
    row.iter()
        .map(|cell| cell.iter().map(|s| s.to_string()).collect())
        .collect()
}

fn sample_week() -> PlannedWeek {
    PlannedWeek {
        assignment: WeekAssignment {
            schedule: vec![
                cells(&[&["alice"], &["bob", "carol"]]),
                cells(&[&[], &[]]),
                cells(&[&["bob"], &["alice", "UNFILLED"]]),
                cells(&[&["carol"], &["alice", "bob"]]),
                cells(&[&["alice"], &["bob", "carol"]]),
            ],
            tasks: vec![Task::new("front", 1), Task::new("back", 2)],
            schedule_days: vec![
                ScheduleDay::active("20250106"),
                ScheduleDay::holiday("20250107", "Fair"),
                ScheduleDay::active("20250108"),
                ScheduleDay::active("20250109"),
                ScheduleDay::active("20250110"),
            ],
        },
        date_range: "01/06 - 01/10".into(),
        week_day_dates: ["01/06", "01/07", "01/08", "01/09", "01/10"]
            .into_iter()
            .map(String::from)
            .collect(),
    }
}

#[test]
fn text_table_layout() {
    let out = TextTable.render(&[sample_week()]);
    insta::assert_snapshot!(out, @r###"
    Week 1 (01/06 - 01/10)
    Task  | Mon 01/06  | Tue 01/07 | Wed 01/08       | Thu 01/09  | Fri 01/10
    front | alice      | Fair      | bob             | carol      | alice
    back  | bob, carol | Fair      | alice, UNFILLED | alice, bob | bob, carol
    "###);
}

#[test]
fn text_table_separates_weeks() {
    let out = TextTable.render(&[sample_week(), sample_week()]);
    assert!(out.contains("\nWeek 2 (01/06 - 01/10)\n"));
    assert_eq!(out.matches("front |").count(), 2);
}

#[test]
fn html_table_marks_holidays_and_escapes() {
    let mut week = sample_week();
    week.assignment.tasks[0].name = "R&D <desk>".into();

    let html = HtmlTable.render(&[week.clone(), week]);
    assert!(html.contains("id=\"schedule-week-0\""));
    assert!(html.contains("<h3>Week 1 (01/06 - 01/10)</h3>"));
    assert!(html.contains("<td>R&amp;D &lt;desk&gt;</td>"));
    assert!(html.contains("<td class=\"holiday-cell\">Fair</td>"));
    assert!(html.contains("<td>bob<br>carol</td>"));
    assert!(html.contains("Mon<br>(01/06)"));
    assert!(html.contains("#0284c7"));
    assert!(html.contains("#15803d"));
}
