//! Enumerations for filtering and sorting task lists.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Filtering criteria for task views.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    #[default]
    All,
    Today,
    Important,
    Completed,
    Pending,
}

/// Available sorting keys. Sorting is stable: ties keep their prior
/// relative order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Ascending by due date, undated tasks last.
    Date,
    /// Important tasks before the rest.
    Priority,
    /// Ascending case-insensitive by text.
    Name,
    /// Most recently created first.
    Created,
}
