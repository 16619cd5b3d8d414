//! # taskdeck - Daily task management CLI
//!
//! A small, file-backed personal task manager: add, complete, star, edit,
//! delete, filter, sort, and search short text tasks, with aggregate
//! statistics and state persisted across invocations.
//!
//! ## Quick Start
//!
//! ```bash
//! # Add a task due tomorrow (the default due-date policy)
//! td add "Book dentist appointment"
//!
//! # Add an important task due today
//! td add "Submit expense report" --important --today
//!
//! # List pending tasks matching a search
//! td list --filter pending --search report
//!
//! # Complete, star, edit, delete by id
//! td done 1756369912000
//! td star 1756369912000
//! td edit 1756369912000 "Submit Q3 expense report"
//! td delete 1756369912000
//!
//! # Aggregate view
//! td stats
//! ```
//!
//! State lives in `~/.taskdeck/` as two JSON files (`tasks.json` and
//! `settings.json`); pass `--data-dir` to use a different directory. The
//! task list order is insertion order (newest first) until an explicit
//! `td sort <key>` persists a new order.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod dates;
pub mod error;
pub mod fields;
pub mod query;
pub mod repo;
pub mod settings;
pub mod store;
pub mod task;

use cli::Cli;
use cmd::*;
use repo::TaskRepo;
use store::FileStore;

fn main() {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.clone().unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".taskdeck")
    });

    let mut store = match FileStore::open(data_dir) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open data directory: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        // These two only need the store, not the repository.
        Commands::Settings { action } => cmd_settings(&mut store, action),
        Commands::Completions { shell } => cmd_completions(shell),

        command => {
            let settings = settings::load(&store);
            let mut repo = TaskRepo::load(store);

            match command {
                Commands::Add { text, important, today, due } => {
                    cmd_add(&mut repo, &settings, text, important, today, due)
                }

                Commands::List { filter, search, limit } => {
                    cmd_list(&repo, &settings, filter, search, limit)
                }

                Commands::Sort { key } => cmd_sort(&mut repo, key),

                Commands::Done { id } => cmd_done(&mut repo, id),

                Commands::Star { id } => cmd_star(&mut repo, id),

                Commands::Edit { id, text } => cmd_edit(&mut repo, id, text),

                Commands::Delete { id, yes } => cmd_delete(&mut repo, &settings, id, yes),

                Commands::Stats => cmd_stats(&repo),

                Commands::Settings { .. } | Commands::Completions { .. } => {
                    unreachable!("handled above")
                }
            }
        }
    }
}
