//! Task data structure.
//!
//! This module defines the core `Task` struct representing a single to-do
//! item with its text, status flags, optional due date, and timestamps.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single to-do item.
///
/// `completed_at_utc` is present if and only if `completed` is true; the
/// repository maintains that invariant across every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    pub important: bool,
    pub due: Option<NaiveDate>,
    pub created_at_utc: i64,
    #[serde(default)]
    pub completed_at_utc: Option<i64>,
}

impl Task {
    /// True when the task is not completed, has a due date, and that date
    /// is strictly before `today`. A task due today is not overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due.is_some_and(|d| d < today)
    }

    /// True when the task is due exactly on `today`.
    pub fn is_due_today(&self, today: NaiveDate) -> bool {
        self.due == Some(today)
    }
}
