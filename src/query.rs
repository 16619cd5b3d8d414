//! Read-only derived views over the task collection.
//!
//! Everything here is a pure function of the task slice and the calendar
//! date passed in; nothing mutates the repository. Callers re-run these
//! after any mutation to stay consistent.

use chrono::NaiveDate;

use crate::fields::Filter;
use crate::task::Task;

/// Aggregate counters for the stats view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
}

/// Per-category counts, always computed over the full collection
/// regardless of the active filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeCounts {
    pub total: usize,
    pub today: usize,
    pub important: usize,
    pub completed: usize,
}

/// Select tasks matching `criterion`, then narrow by `search` as a
/// case-insensitive substring match on the text. An empty search matches
/// everything.
pub fn filter<'a>(
    tasks: &'a [Task],
    criterion: Filter,
    search: &str,
    today: NaiveDate,
) -> Vec<&'a Task> {
    let needle = search.trim().to_lowercase();
    tasks
        .iter()
        .filter(|t| match criterion {
            Filter::All => true,
            Filter::Today => t.is_due_today(today),
            Filter::Important => t.important,
            Filter::Completed => t.completed,
            Filter::Pending => !t.completed,
        })
        .filter(|t| needle.is_empty() || t.text.to_lowercase().contains(&needle))
        .collect()
}

pub fn stats(tasks: &[Task], today: NaiveDate) -> Stats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let overdue = tasks.iter().filter(|t| t.is_overdue(today)).count();
    Stats {
        total,
        completed,
        pending: total - completed,
        overdue,
    }
}

pub fn badge_counts(tasks: &[Task], today: NaiveDate) -> BadgeCounts {
    BadgeCounts {
        total: tasks.len(),
        today: tasks.iter().filter(|t| t.is_due_today(today)).count(),
        important: tasks.iter().filter(|t| t.important).count(),
        completed: tasks.iter().filter(|t| t.completed).count(),
    }
}

/// Completion percentage rounded to the nearest integer, 0 for an empty
/// collection.
pub fn progress_percent(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let completed = tasks.iter().filter(|t| t.completed).count();
    ((completed as f64 / tasks.len() as f64) * 100.0).round() as u8
}
