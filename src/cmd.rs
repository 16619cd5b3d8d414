//! Command implementations for the CLI interface.
//!
//! This module contains the command handlers that forward user gestures
//! into the task repository and re-query the derived views afterwards.
//! Handlers print to stdout/stderr and exit non-zero on failure; all the
//! actual task logic lives in `repo`, `query`, and `settings`.

use std::io::{self, BufRead, Write};

use chrono::Local;
use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::dates::{format_due_relative, parse_due_input};
use crate::fields::{Filter, SortKey};
use crate::query;
use crate::repo::TaskRepo;
use crate::settings::{self, AnimationSpeed, DuePolicy, Settings};
use crate::store::Store;
use crate::task::Task;

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task.
    Add {
        /// The task text.
        text: String,
        /// Mark the task as important.
        #[arg(long)]
        important: bool,
        /// Due today, overriding any --due value.
        #[arg(long)]
        today: bool,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", "in Nd", or a weekday.
        #[arg(long)]
        due: Option<String>,
    },

    /// List tasks with optional filtering and search.
    List {
        /// Filter: all | today | important | completed | pending.
        #[arg(long, value_enum, default_value_t = Filter::All)]
        filter: Filter,
        /// Case-insensitive substring match on task text.
        #[arg(long)]
        search: Option<String>,
        /// Limit number of rows printed.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Reorder the task list and persist the new order.
    Sort {
        /// Sort key: date | priority | name | created.
        #[arg(value_enum)]
        key: SortKey,
    },

    /// Toggle a task's completed state.
    Done {
        /// Task id.
        id: u64,
    },

    /// Toggle a task's important flag.
    Star {
        /// Task id.
        id: u64,
    },

    /// Replace a task's text.
    Edit {
        /// Task id.
        id: u64,
        /// New task text.
        text: String,
    },

    /// Delete a task.
    Delete {
        /// Task id.
        id: u64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    /// Show aggregate statistics and progress.
    Stats,

    /// Show or change settings.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the current settings.
    Show,
    /// Update one or more settings.
    Set {
        /// Ask before deleting a task.
        #[arg(long)]
        confirm_delete: Option<bool>,
        /// Show completed tasks in the unfiltered list.
        #[arg(long)]
        show_completed: Option<bool>,
        /// Default due date for new tasks: none | today | tomorrow.
        #[arg(long, value_enum)]
        default_due: Option<DuePolicy>,
        /// Animation speed: slow | normal | fast.
        #[arg(long, value_enum)]
        animation_speed: Option<AnimationSpeed>,
    },
}

/// Add a new task, applying the default due-date policy when no explicit
/// date was given.
pub fn cmd_add<S: Store>(
    repo: &mut TaskRepo<S>,
    settings: &Settings,
    text: String,
    important: bool,
    today_flag: bool,
    due: Option<String>,
) {
    let today = Local::now().date_naive();
    let due = match due {
        Some(ref s) => match parse_due_input(s, today) {
            Some(d) => Some(d),
            None => {
                eprintln!("Unrecognised due date: {s}");
                std::process::exit(1);
            }
        },
        None if today_flag => None, // create() forces today itself
        None => settings.default_due.resolve(today),
    };

    match repo.create(&text, important, due, today_flag) {
        Ok(task) => println!("Added task {}", task.id),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// List tasks through the query engine.
pub fn cmd_list<S: Store>(
    repo: &TaskRepo<S>,
    settings: &Settings,
    filter: Filter,
    search: Option<String>,
    limit: Option<usize>,
) {
    let today = Local::now().date_naive();
    let tasks = repo.all();
    let search = search.unwrap_or_default();
    let mut rows = query::filter(&tasks, filter, &search, today);

    // Display preference: the unfiltered view may hide completed tasks.
    if filter == Filter::All && !settings.show_completed {
        rows.retain(|t| !t.completed);
    }
    if let Some(n) = limit {
        rows.truncate(n);
    }

    if rows.is_empty() {
        println!("No tasks found.");
        return;
    }
    print_table(&rows);
}

/// Persist a new ordering of the full collection.
pub fn cmd_sort<S: Store>(repo: &mut TaskRepo<S>, key: SortKey) {
    if let Err(e) = repo.sort_by(key) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    println!("Sorted.");
}

/// Toggle a task's completed state.
pub fn cmd_done<S: Store>(repo: &mut TaskRepo<S>, id: u64) {
    match repo.toggle_completed(id) {
        Ok(task) if task.completed => println!("\"{}\" marked as completed", task.text),
        Ok(task) => println!("\"{}\" marked as pending", task.text),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Toggle a task's important flag.
pub fn cmd_star<S: Store>(repo: &mut TaskRepo<S>, id: u64) {
    match repo.toggle_important(id) {
        Ok(task) if task.important => println!("\"{}\" marked as important", task.text),
        Ok(task) => println!("\"{}\" removed from important", task.text),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Replace a task's text.
pub fn cmd_edit<S: Store>(repo: &mut TaskRepo<S>, id: u64, text: String) {
    match repo.edit_text(id, &text) {
        Ok(_) => println!("Task updated."),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Delete a task, prompting first when the confirm-delete setting is on.
pub fn cmd_delete<S: Store>(repo: &mut TaskRepo<S>, settings: &Settings, id: u64, yes: bool) {
    if settings.confirm_delete && !yes {
        let Some(task) = repo.get(id) else {
            eprintln!("Error: no task with id {id}");
            std::process::exit(1);
        };
        print!("Delete \"{}\"? [y/N] ", task.text);
        io::stdout().flush().ok();
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer).ok();
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("Cancelled.");
            return;
        }
    }

    match repo.delete(id) {
        Ok(task) => println!("\"{}\" deleted", task.text),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Print aggregate statistics, badge counts, and completion progress.
pub fn cmd_stats<S: Store>(repo: &TaskRepo<S>) {
    let today = Local::now().date_naive();
    let tasks = repo.all();
    let stats = query::stats(&tasks, today);
    let badges = query::badge_counts(&tasks, today);
    let percent = query::progress_percent(&tasks);

    println!("Total:      {}", stats.total);
    println!("Completed:  {}", stats.completed);
    println!("Pending:    {}", stats.pending);
    println!("Overdue:    {}", stats.overdue);
    println!();
    println!("Due today:  {}", badges.today);
    println!("Important:  {}", badges.important);
    println!("Progress:   {percent}%");
}

/// Show or update the settings record.
pub fn cmd_settings<S: Store>(store: &mut S, action: SettingsAction) {
    match action {
        SettingsAction::Show => {
            let s = settings::load(store);
            println!("confirm-delete:   {}", s.confirm_delete);
            println!("show-completed:   {}", s.show_completed);
            println!("default-due:      {}", settings::format_due_policy(s.default_due));
            println!(
                "animation-speed:  {}",
                settings::format_animation_speed(s.animation_speed)
            );
        }
        SettingsAction::Set {
            confirm_delete,
            show_completed,
            default_due,
            animation_speed,
        } => {
            let mut s = settings::load(store);
            if let Some(v) = confirm_delete {
                s.confirm_delete = v;
            }
            if let Some(v) = show_completed {
                s.show_completed = v;
            }
            if let Some(v) = default_due {
                s.default_due = v;
            }
            if let Some(v) = animation_speed {
                s.animation_speed = v;
            }
            if let Err(e) = settings::save(store, &s) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
            println!("Settings saved.");
        }
    }
}

/// Generate shell completions on stdout.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

/// Print tasks in a formatted table.
fn print_table(tasks: &[&Task]) {
    println!("{:<14} {:<3} {:<3} {:<10} {}", "ID", "", "", "Due", "Text");
    let today = Local::now().date_naive();
    for t in tasks {
        let done = if t.completed { "x" } else { " " };
        let star = if t.important { "*" } else { " " };
        let due = match t.due {
            Some(d) => format_due_relative(d, today),
            None => "-".into(),
        };
        println!(
            "{:<14} [{}] {:<3} {:<10} {}",
            t.id,
            done,
            star,
            due,
            truncate(&t.text, 60)
        );
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}
