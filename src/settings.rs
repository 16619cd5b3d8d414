//! Persisted display and behaviour preferences.
//!
//! Settings load as defaults merged field-by-field with whatever partial
//! record is in the store; absent or unknown persisted fields never error.

use chrono::{Duration, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::{Store, SETTINGS_KEY};

/// Default due date applied when a task is added without one.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DuePolicy {
    None,
    Today,
    #[default]
    Tomorrow,
}

impl DuePolicy {
    /// Resolve the policy against the current date.
    pub fn resolve(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            DuePolicy::None => None,
            DuePolicy::Today => Some(today),
            DuePolicy::Tomorrow => Some(today + Duration::days(1)),
        }
    }
}

/// Animation speed preference, consumed by the presentation layer only.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Ask before deleting a task.
    pub confirm_delete: bool,
    /// Show completed tasks in the unfiltered list view.
    pub show_completed: bool,
    pub default_due: DuePolicy,
    pub animation_speed: AnimationSpeed,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            confirm_delete: true,
            show_completed: true,
            default_due: DuePolicy::Tomorrow,
            animation_speed: AnimationSpeed::Normal,
        }
    }
}

/// Format a due policy with the same spelling `settings set` accepts.
pub fn format_due_policy(p: DuePolicy) -> &'static str {
    match p {
        DuePolicy::None => "none",
        DuePolicy::Today => "today",
        DuePolicy::Tomorrow => "tomorrow",
    }
}

/// Format an animation speed with the same spelling `settings set` accepts.
pub fn format_animation_speed(s: AnimationSpeed) -> &'static str {
    match s {
        AnimationSpeed::Slow => "slow",
        AnimationSpeed::Normal => "normal",
        AnimationSpeed::Fast => "fast",
    }
}

/// Load settings from the store, falling back to defaults for anything
/// missing or unreadable.
pub fn load(store: &impl Store) -> Settings {
    match store.get(SETTINGS_KEY) {
        Ok(Some(blob)) => serde_json::from_str(&blob).unwrap_or_else(|e| {
            eprintln!("Error parsing settings, using defaults: {e}");
            Settings::default()
        }),
        _ => Settings::default(),
    }
}

/// Persist the full settings record.
pub fn save(store: &mut impl Store, settings: &Settings) -> Result<()> {
    let blob = serde_json::to_string_pretty(settings)?;
    store.set(SETTINGS_KEY, &blob)
}
