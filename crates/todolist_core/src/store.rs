use crate::model::Task;

/// In-memory ordered collection of tasks plus the id counter.
///
/// Every mutation builds a fresh collection from the previous one and swaps
/// it in; order is insertion order and is never re-sorted. Mutations keyed
/// by an unknown id are silent no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild a store from a previously persisted collection. The id
    /// counter resumes past the highest existing id so ids are never
    /// reused across sessions.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|task| task.id).max().map_or(1, |id| id + 1);
        Self { tasks, next_id }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn find(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Append a new pending task. Empty titles are permitted.
    pub fn add(&mut self, title: &str, time: &str) -> Task {
        let task = Task::new(self.next_id, title, time);
        self.next_id += 1;
        let mut updated = self.tasks.clone();
        updated.push(task.clone());
        self.tasks = updated;
        task
    }

    /// Flip the done flag on the matching task.
    pub fn toggle(&mut self, id: u64) -> Option<Task> {
        let updated: Vec<Task> = self
            .tasks
            .iter()
            .map(|task| {
                if task.id == id {
                    Task {
                        has_done: !task.has_done,
                        ..task.clone()
                    }
                } else {
                    task.clone()
                }
            })
            .collect();
        self.tasks = updated;
        self.find(id).cloned()
    }

    /// Replace the title on the matching task; time and done flag are left
    /// untouched.
    pub fn edit(&mut self, id: u64, new_title: &str) -> Option<Task> {
        let updated: Vec<Task> = self
            .tasks
            .iter()
            .map(|task| {
                if task.id == id {
                    Task {
                        title: new_title.to_string(),
                        ..task.clone()
                    }
                } else {
                    task.clone()
                }
            })
            .collect();
        self.tasks = updated;
        self.find(id).cloned()
    }

    /// Drop the matching task from the collection.
    pub fn remove(&mut self, id: u64) -> Option<Task> {
        let removed = self.find(id).cloned();
        let updated: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        self.tasks = updated;
        removed
    }

    /// Flip the done flag on every task. This is a per-task toggle, not a
    /// "set all done".
    pub fn check_all(&mut self) {
        let updated: Vec<Task> = self
            .tasks
            .iter()
            .map(|task| Task {
                has_done: !task.has_done,
                ..task.clone()
            })
            .collect();
        self.tasks = updated;
    }

    pub fn clear_all(&mut self) {
        self.tasks = Vec::new();
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::TodoStore;
    use crate::model::Task;
    use std::collections::HashSet;

    #[test]
    fn add_assigns_sequential_unique_ids() {
        let mut store = TodoStore::new();
        for n in 0..5 {
            store.add(&format!("task {n}"), "09:00 AM");
        }

        let ids: Vec<u64> = store.tasks().iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        let unique: HashSet<u64> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let mut store = TodoStore::new();
        store.add("first", "09:00 AM");
        store.add("second", "09:00 AM");

        assert_eq!(store.tasks()[0].title, "first");
        assert_eq!(store.tasks()[1].title, "second");
    }

    #[test]
    fn add_permits_empty_title() {
        let mut store = TodoStore::new();
        let task = store.add("", "09:00 AM");
        assert_eq!(task.title, "");
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn from_tasks_resumes_id_counter() {
        let tasks = vec![
            Task::new(3, "old", "08:00 AM"),
            Task::new(7, "older", "08:00 AM"),
        ];
        let mut store = TodoStore::from_tasks(tasks);

        let task = store.add("fresh", "09:00 AM");
        assert_eq!(task.id, 8);
    }

    #[test]
    fn from_tasks_empty_starts_at_one() {
        let mut store = TodoStore::from_tasks(Vec::new());
        assert_eq!(store.add("first", "09:00 AM").id, 1);
    }

    #[test]
    fn toggle_flips_only_the_matching_task() {
        let mut store = TodoStore::new();
        store.add("a", "09:00 AM");
        store.add("b", "09:00 AM");

        let toggled = store.toggle(1).unwrap();
        assert!(toggled.has_done);
        assert!(store.tasks()[0].has_done);
        assert!(!store.tasks()[1].has_done);
    }

    #[test]
    fn double_toggle_restores_original_state() {
        let mut store = TodoStore::new();
        store.add("a", "09:00 AM");
        store.add("b", "09:00 AM");
        store.toggle(2).unwrap();

        let before: Vec<_> = store.tasks().to_vec();
        store.toggle(1).unwrap();
        store.toggle(1).unwrap();

        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn toggle_unknown_id_is_a_no_op() {
        let mut store = TodoStore::new();
        store.add("a", "09:00 AM");
        let before = store.tasks().to_vec();

        assert!(store.toggle(99).is_none());
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn toggle_preserves_order() {
        let mut store = TodoStore::new();
        store.add("a", "09:00 AM");
        store.add("b", "09:00 AM");
        store.add("c", "09:00 AM");

        store.toggle(2).unwrap();
        let ids: Vec<u64> = store.tasks().iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn edit_replaces_title_only() {
        let mut store = TodoStore::new();
        store.add("old", "06:00 AM");
        store.toggle(1).unwrap();

        let edited = store.edit(1, "new").unwrap();
        assert_eq!(edited.title, "new");
        assert_eq!(edited.time, "06:00 AM");
        assert!(edited.has_done);
    }

    #[test]
    fn edit_unknown_id_is_a_no_op() {
        let mut store = TodoStore::new();
        store.add("old", "06:00 AM");

        assert!(store.edit(42, "new").is_none());
        assert_eq!(store.tasks()[0].title, "old");
    }

    #[test]
    fn remove_drops_only_the_matching_task() {
        let mut store = TodoStore::new();
        store.add("a", "09:00 AM");
        store.add("b", "09:00 AM");

        let removed = store.remove(1).unwrap();
        assert_eq!(removed.title, "a");
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].id, 2);
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut store = TodoStore::new();
        store.add("a", "09:00 AM");

        assert!(store.remove(42).is_none());
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn removed_ids_are_never_reused() {
        let mut store = TodoStore::new();
        store.add("a", "09:00 AM");
        store.add("b", "09:00 AM");
        store.remove(2).unwrap();

        let task = store.add("c", "09:00 AM");
        assert_eq!(task.id, 3);
    }

    #[test]
    fn check_all_flips_each_task_individually() {
        let mut store = TodoStore::new();
        store.add("a", "09:00 AM");
        store.add("b", "09:00 AM");
        store.toggle(2).unwrap();

        store.check_all();
        assert!(store.tasks()[0].has_done);
        assert!(!store.tasks()[1].has_done);
    }

    #[test]
    fn check_all_preserves_order() {
        let mut store = TodoStore::new();
        store.add("a", "09:00 AM");
        store.add("b", "09:00 AM");

        store.check_all();
        let ids: Vec<u64> = store.tasks().iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn clear_all_empties_the_collection() {
        let mut store = TodoStore::new();
        store.add("a", "09:00 AM");
        store.add("b", "09:00 AM");

        store.clear_all();
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn add_toggle_remove_clear_scenario() {
        let mut store = TodoStore::new();

        store.add("Do exercise", "06:00 AM");
        assert_eq!(
            store.tasks(),
            &[Task {
                id: 1,
                title: "Do exercise".to_string(),
                time: "06:00 AM".to_string(),
                has_done: false,
            }]
        );

        store.toggle(1).unwrap();
        assert!(store.tasks()[0].has_done);

        store.add("Meditation", "06:00 AM");
        let ids: Vec<u64> = store.tasks().iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![1, 2]);

        store.remove(1).unwrap();
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].id, 2);

        store.clear_all();
        assert!(store.tasks().is_empty());
    }
}
