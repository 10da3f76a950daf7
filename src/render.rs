use crate::model::WEEKDAYS;
use crate::planner::PlannedWeek;
use std::fmt::Write;

const WEEKDAY_NAMES: [&str; WEEKDAYS] = ["Mon", "Tue", "Wed", "Thu", "Fri"];
const HEADER_COLORS: [&str; 4] = ["#0284c7", "#15803d", "#be185d", "#86198f"];

/// Permet de choisir le rendu d'un planning (texte, HTML, etc.).
pub trait ScheduleRenderer {
    fn render(&self, weeks: &[PlannedWeek]) -> String;
}

/// Grille texte, une ligne par tâche.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextTable;

impl ScheduleRenderer for TextTable {
    fn render(&self, weeks: &[PlannedWeek]) -> String {
        let mut out = String::new();
        for (index, week) in weeks.iter().enumerate() {
            let grid = &week.assignment;
            let mut rows: Vec<Vec<String>> = Vec::with_capacity(grid.tasks.len() + 1);

            let mut header = vec!["Task".to_string()];
            header.extend((0..WEEKDAYS).map(|d| {
                let label = week.week_day_dates.get(d).map(String::as_str).unwrap_or("");
                format!("{} {}", WEEKDAY_NAMES[d], label).trim_end().to_string()
            }));
            rows.push(header);

            for (task_index, task) in grid.tasks.iter().enumerate() {
                let mut row = vec![task.name.clone()];
                row.extend((0..WEEKDAYS).map(|d| cell_text(week, d, task_index, ", ")));
                rows.push(row);
            }

            if index > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "Week {} ({})", index + 1, week.date_range);
            write_aligned(&mut out, &rows);
        }
        out
    }
}

/// Tableau HTML : titre de semaine, en-têtes colorés, cellules fériées grisées.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlTable;

impl ScheduleRenderer for HtmlTable {
    fn render(&self, weeks: &[PlannedWeek]) -> String {
        let mut html = String::new();
        for (index, week) in weeks.iter().enumerate() {
            let grid = &week.assignment;
            let color = HEADER_COLORS[index % HEADER_COLORS.len()];
            let style = format!("style=\"background-color: {color}; color: white;\"");

            let _ = writeln!(html, "<div class=\"mb-8\" id=\"schedule-week-{index}\">");
            let _ = writeln!(
                html,
                "<h3>Week {} ({})</h3>",
                index + 1,
                escape_html(&week.date_range)
            );
            html.push_str("<table class=\"schedule-table\">\n<thead>\n<tr>");
            let _ = write!(html, "<th {style}>Task</th>");
            for d in 0..WEEKDAYS {
                let label = week.week_day_dates.get(d).map(String::as_str).unwrap_or("");
                let _ = write!(
                    html,
                    "<th {style}>{}<br>({})</th>",
                    WEEKDAY_NAMES[d],
                    escape_html(label)
                );
            }
            html.push_str("</tr>\n</thead>\n<tbody>\n");

            for (task_index, task) in grid.tasks.iter().enumerate() {
                let _ = write!(html, "<tr><td>{}</td>", escape_html(&task.name));
                for d in 0..WEEKDAYS {
                    let holiday = !grid.is_active(d);
                    let class = if holiday { " class=\"holiday-cell\"" } else { "" };
                    let text = escape_html(&cell_text(week, d, task_index, "\n")).replace('\n', "<br>");
                    let _ = write!(html, "<td{class}>{text}</td>");
                }
                html.push_str("</tr>\n");
            }
            html.push_str("</tbody>\n</table>\n</div>\n");
        }
        html
    }
}

fn cell_text(week: &PlannedWeek, weekday: usize, task_index: usize, sep: &str) -> String {
    let grid = &week.assignment;
    if !grid.is_active(weekday) {
        return grid
            .schedule_days
            .get(weekday)
            .map(|d| d.description.clone())
            .unwrap_or_default();
    }
    grid.schedule
        .get(weekday)
        .and_then(|row| row.get(task_index))
        .map(|names| names.join(sep))
        .unwrap_or_default()
}

fn write_aligned(out: &mut String, rows: &[Vec<String>]) {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();
    for row in rows {
        let line = row
            .iter()
            .enumerate()
            .map(|(c, s)| format!("{s:<width$}", width = widths[c]))
            .collect::<Vec<_>>()
            .join(" | ");
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
