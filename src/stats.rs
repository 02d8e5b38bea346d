use crate::ledger::{day_key, Ledger};
use crate::models::{DailyPoint, StatsResponse, TaskTotal};
use crate::registry::TaskRegistry;
use chrono::{Duration, Local, NaiveDate};

pub const WINDOW_DAYS: usize = 30;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn window(today: NaiveDate) -> Vec<NaiveDate> {
    (0..WINDOW_DAYS)
        .map(|offset| today + Duration::days(offset as i64))
        .collect()
}

// Ties round away from zero.
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

pub fn day_percentage(ledger: &Ledger, tasks: &TaskRegistry, day: NaiveDate) -> u32 {
    percentage(ledger.checked_on(day, tasks), tasks.len())
}

pub fn task_total(ledger: &Ledger, task: &str, days: &[NaiveDate]) -> usize {
    days.iter().filter(|day| ledger.is_checked(**day, task)).count()
}

pub fn overall_percentage(ledger: &Ledger, tasks: &TaskRegistry, days: &[NaiveDate]) -> u32 {
    let checked: usize = days.iter().map(|day| ledger.checked_on(*day, tasks)).sum();
    percentage(checked, days.len() * tasks.len())
}

pub fn trend(ledger: &Ledger, tasks: &TaskRegistry, days: &[NaiveDate]) -> Vec<u32> {
    days.iter()
        .map(|day| day_percentage(ledger, tasks, *day))
        .collect()
}

pub fn build_stats_at(today: NaiveDate, tasks: &TaskRegistry, ledger: &Ledger) -> StatsResponse {
    let days = window(today);

    let daily = days
        .iter()
        .zip(trend(ledger, tasks, &days))
        .map(|(day, percentage)| DailyPoint {
            date: day_key(*day),
            checked: ledger.checked_on(*day, tasks),
            percentage,
        })
        .collect();

    let task_totals = tasks
        .labels()
        .iter()
        .map(|task| {
            let days_checked = task_total(ledger, task, &days);
            TaskTotal {
                task: task.clone(),
                days_checked,
                height: days_checked as f64 / WINDOW_DAYS as f64 * 100.0,
            }
        })
        .collect();

    StatsResponse {
        overall: overall_percentage(ledger, tasks, &days),
        daily,
        task_totals,
    }
}
