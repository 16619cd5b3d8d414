//! Task repository: the authoritative in-memory task sequence.
//!
//! The repository owns the ordered collection of tasks, applies every
//! mutation, and writes the full collection back to the store after each
//! successful change. Insertion order is the canonical order (new tasks go
//! to the head) until an explicit `sort_by` persists a new order.
//!
//! Validation and lookup failures leave both memory and storage untouched.
//! A persist failure is reported but the in-memory change stands.

use std::cmp::Reverse;

use chrono::{Local, NaiveDate, Utc};

use crate::error::{Error, Result};
use crate::fields::SortKey;
use crate::store::{Store, TASKS_KEY};
use crate::task::Task;

pub struct TaskRepo<S: Store> {
    tasks: Vec<Task>,
    store: S,
}

impl<S: Store> TaskRepo<S> {
    /// Load the repository from the store, starting empty if no blob exists
    /// or the existing blob cannot be parsed.
    pub fn load(store: S) -> Self {
        let tasks = match store.get(TASKS_KEY) {
            Ok(Some(blob)) => match serde_json::from_str(&blob) {
                Ok(tasks) => tasks,
                Err(e) => {
                    eprintln!("Error parsing task store, starting fresh: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                eprintln!("Error reading task store, starting fresh: {e}");
                Vec::new()
            }
        };
        TaskRepo { tasks, store }
    }

    /// Create a task and insert it at the head of the order.
    ///
    /// Fails with `Error::Validation` if `text` trims to empty. When
    /// `mark_today` is set the due date is forced to the current calendar
    /// date regardless of `due`.
    pub fn create(
        &mut self,
        text: &str,
        important: bool,
        due: Option<NaiveDate>,
        mark_today: bool,
    ) -> Result<Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Validation);
        }
        let due = if mark_today {
            Some(Local::now().date_naive())
        } else {
            due
        };
        let task = Task {
            id: self.next_id(),
            text: text.to_string(),
            completed: false,
            important,
            due,
            created_at_utc: Utc::now().timestamp(),
            completed_at_utc: None,
        };
        self.tasks.insert(0, task.clone());
        self.persist()?;
        Ok(task)
    }

    /// Flip a task's completed flag, setting or clearing its completion
    /// timestamp to match.
    pub fn toggle_completed(&mut self, id: u64) -> Result<Task> {
        let task = self.get_mut(id)?;
        task.completed = !task.completed;
        task.completed_at_utc = task.completed.then(|| Utc::now().timestamp());
        let task = task.clone();
        self.persist()?;
        Ok(task)
    }

    /// Flip a task's important flag.
    pub fn toggle_important(&mut self, id: u64) -> Result<Task> {
        let task = self.get_mut(id)?;
        task.important = !task.important;
        let task = task.clone();
        self.persist()?;
        Ok(task)
    }

    /// Replace a task's text. Fails with `Error::Validation` if the new
    /// text trims to empty, leaving the task unchanged.
    pub fn edit_text(&mut self, id: u64, new_text: &str) -> Result<Task> {
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return Err(Error::Validation);
        }
        let task = self.get_mut(id)?;
        task.text = new_text.to_string();
        let task = task.clone();
        self.persist()?;
        Ok(task)
    }

    /// Remove a task from the order, returning it for notification or
    /// undo purposes in the caller.
    pub fn delete(&mut self, id: u64) -> Result<Task> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::NotFound(id))?;
        let removed = self.tasks.remove(idx);
        self.persist()?;
        Ok(removed)
    }

    /// Reorder the collection by `key` and persist the new order. All
    /// sorts are stable: equal keys keep their prior relative order.
    pub fn sort_by(&mut self, key: SortKey) -> Result<()> {
        match key {
            // Undated tasks compare as infinitely far in the future.
            SortKey::Date => self.tasks.sort_by_key(|t| t.due.unwrap_or(NaiveDate::MAX)),
            SortKey::Priority => self.tasks.sort_by_key(|t| !t.important),
            SortKey::Name => self.tasks.sort_by_key(|t| t.text.to_lowercase()),
            SortKey::Created => self.tasks.sort_by_key(|t| Reverse(t.created_at_utc)),
        }
        self.persist()
    }

    /// Read-only snapshot of the collection in its current order.
    pub fn all(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Get a task by id.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Error::NotFound(id))
    }

    /// Generate a fresh id: millisecond timestamp at creation, bumped past
    /// the current maximum so ids stay unique even within one millisecond.
    fn next_id(&self) -> u64 {
        let stamp = Utc::now().timestamp_millis() as u64;
        let max = self.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        stamp.max(max + 1)
    }

    fn persist(&mut self) -> Result<()> {
        let blob = serde_json::to_string_pretty(&self.tasks)?;
        self.store.set(TASKS_KEY, &blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;

    fn repo() -> TaskRepo<MemStore> {
        TaskRepo::load(MemStore::new())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn create_sets_defaults_and_unique_ids() {
        let mut repo = repo();
        let due = date(2026, 9, 1);
        let a = repo.create("write report", false, None, false).unwrap();
        let b = repo.create("file taxes", true, Some(due), false).unwrap();

        assert!(!a.completed);
        assert!(!a.important);
        assert_eq!(a.due, None);
        assert_eq!(a.completed_at_utc, None);
        assert!(b.important);
        assert_eq!(b.due, Some(due));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn create_inserts_at_head() {
        let mut repo = repo();
        let first = repo.create("first", false, None, false).unwrap();
        let second = repo.create("second", false, None, false).unwrap();
        let order: Vec<u64> = repo.all().iter().map(|t| t.id).collect();
        assert_eq!(order, vec![second.id, first.id]);
    }

    #[test]
    fn create_rejects_empty_text() {
        let mut repo = repo();
        repo.create("keep me", false, None, false).unwrap();

        assert!(matches!(
            repo.create("", false, None, false),
            Err(Error::Validation)
        ));
        assert!(matches!(
            repo.create("   ", false, None, false),
            Err(Error::Validation)
        ));
        assert_eq!(repo.all().len(), 1);
    }

    #[test]
    fn create_mark_today_overrides_due() {
        let mut repo = repo();
        let task = repo
            .create("call dentist", false, Some(date(2030, 1, 1)), true)
            .unwrap();
        assert_eq!(task.due, Some(Local::now().date_naive()));
    }

    #[test]
    fn toggle_completed_round_trips() {
        let mut repo = repo();
        let id = repo.create("water plants", false, None, false).unwrap().id;

        let done = repo.toggle_completed(id).unwrap();
        assert!(done.completed);
        assert!(done.completed_at_utc.is_some());

        let undone = repo.toggle_completed(id).unwrap();
        assert!(!undone.completed);
        assert_eq!(undone.completed_at_utc, None);
    }

    #[test]
    fn completed_at_matches_completed_after_mixed_mutations() {
        let mut repo = repo();
        let a = repo.create("a", false, None, false).unwrap().id;
        let b = repo.create("b", true, None, false).unwrap().id;
        repo.toggle_completed(a).unwrap();
        repo.toggle_important(a).unwrap();
        repo.edit_text(b, "b edited").unwrap();
        repo.toggle_completed(b).unwrap();
        repo.toggle_completed(b).unwrap();

        for task in repo.all() {
            assert_eq!(task.completed, task.completed_at_utc.is_some());
        }
    }

    #[test]
    fn edit_text_trims_and_rejects_empty() {
        let mut repo = repo();
        let id = repo.create("original", false, None, false).unwrap().id;

        let edited = repo.edit_text(id, "  new text  ").unwrap();
        assert_eq!(edited.text, "new text");

        assert!(matches!(repo.edit_text(id, "   "), Err(Error::Validation)));
        assert_eq!(repo.get(id).unwrap().text, "new text");
    }

    #[test]
    fn delete_returns_task_and_forgets_id() {
        let mut repo = repo();
        let id = repo.create("ephemeral", false, None, false).unwrap().id;

        let removed = repo.delete(id).unwrap();
        assert_eq!(removed.text, "ephemeral");

        assert!(matches!(repo.delete(id), Err(Error::NotFound(_))));
        assert!(matches!(repo.toggle_completed(id), Err(Error::NotFound(_))));
        assert!(matches!(repo.edit_text(id, "x"), Err(Error::NotFound(_))));
    }

    #[test]
    fn sort_by_name_is_case_insensitive() {
        let mut repo = repo();
        repo.create("banana", false, None, false).unwrap();
        repo.create("Apple", false, None, false).unwrap();
        repo.create("cherry", false, None, false).unwrap();

        repo.sort_by(SortKey::Name).unwrap();
        let order: Vec<String> = repo.all().iter().map(|t| t.text.clone()).collect();
        assert_eq!(order, vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn sort_by_date_puts_undated_last() {
        let mut repo = repo();
        repo.create("undated", false, None, false).unwrap();
        repo.create("later", false, Some(date(2026, 9, 10)), false).unwrap();
        repo.create("sooner", false, Some(date(2026, 9, 1)), false).unwrap();

        repo.sort_by(SortKey::Date).unwrap();
        let order: Vec<String> = repo.all().iter().map(|t| t.text.clone()).collect();
        assert_eq!(order, vec!["sooner", "later", "undated"]);
    }

    #[test]
    fn sort_by_priority_keeps_ties_in_order() {
        let mut repo = repo();
        repo.create("plain one", false, None, false).unwrap();
        repo.create("starred", true, None, false).unwrap();
        repo.create("plain two", false, None, false).unwrap();

        repo.sort_by(SortKey::Priority).unwrap();
        let order: Vec<String> = repo.all().iter().map(|t| t.text.clone()).collect();
        // Head order before sorting was: plain two, starred, plain one.
        assert_eq!(order, vec!["starred", "plain two", "plain one"]);
    }

    #[test]
    fn sort_by_created_puts_newest_first() {
        let mut repo = repo();
        repo.create("oldest", false, None, false).unwrap();
        repo.create("middle", false, None, false).unwrap();
        repo.create("newest", false, None, false).unwrap();
        // Pin creation times explicitly so ordering does not depend on the
        // clock resolution within this test.
        for (task, stamp) in repo.tasks.iter_mut().rev().zip([100, 200, 300]) {
            task.created_at_utc = stamp;
        }

        repo.sort_by(SortKey::Created).unwrap();
        let order: Vec<String> = repo.all().iter().map(|t| t.text.clone()).collect();
        assert_eq!(order, vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn persisted_state_round_trips() {
        let mut repo = repo();
        repo.create("one", false, Some(date(2026, 9, 5)), false).unwrap();
        let id = repo.create("two", true, None, false).unwrap().id;
        repo.toggle_completed(id).unwrap();
        let before = repo.all();

        let reloaded = TaskRepo::load(repo.store.clone());
        assert_eq!(reloaded.all(), before);
    }

    #[test]
    fn load_survives_corrupt_blob() {
        let mut store = MemStore::new();
        store.set(TASKS_KEY, "not json").unwrap();
        let repo = TaskRepo::load(store);
        assert!(repo.all().is_empty());
    }
}
