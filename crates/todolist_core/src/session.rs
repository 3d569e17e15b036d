use crate::error::AppError;
use crate::model::Task;
use crate::storage::StoreSink;
use crate::store::TodoStore;

/// One interactive session over the store: the modal flag, the pending
/// input, the edit cursor, and the clock string captured when the session
/// started. Every mutation writes the full collection through the sink,
/// including mutations that matched nothing.
pub struct Session {
    store: TodoStore,
    sink: Box<dyn StoreSink>,
    clock: String,
    modal_open: bool,
    pending_input: String,
    edit_cursor: Option<u64>,
}

impl Session {
    pub fn new(store: TodoStore, sink: Box<dyn StoreSink>, clock: String) -> Self {
        Self {
            store,
            sink,
            clock,
            modal_open: false,
            pending_input: String::new(),
            edit_cursor: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn edit_cursor(&self) -> Option<u64> {
        self.edit_cursor
    }

    /// Flip modal visibility. Covers both the floating add button and the
    /// close button. Closing without submitting discards the pending input
    /// and the edit cursor, so a cancelled edit never bleeds into the next
    /// submit.
    pub fn toggle_modal(&mut self) {
        self.modal_open = !self.modal_open;
        if !self.modal_open {
            self.pending_input.clear();
            self.edit_cursor = None;
        }
    }

    /// Replace (never merge) the pending input with the given value.
    pub fn set_input(&mut self, value: &str) {
        self.pending_input = value.to_string();
    }

    /// Open the modal in edit mode for the given task. Returns false and
    /// does nothing when the id matches no task.
    pub fn open_for_edit(&mut self, id: u64) -> bool {
        let Some(task) = self.store.find(id) else {
            return false;
        };

        self.pending_input = task.title.clone();
        self.modal_open = true;
        self.edit_cursor = Some(id);
        // The prefill is discarded again before the prompt is shown; edits
        // start from an empty field.
        self.pending_input.clear();
        true
    }

    /// Close the modal and apply the pending input: an edit when the edit
    /// cursor is set, otherwise an add stamped with the session clock. The
    /// pending input is cleared either way.
    pub fn submit(&mut self) -> Result<Option<Task>, AppError> {
        self.modal_open = false;
        let input = std::mem::take(&mut self.pending_input);

        let outcome = match self.edit_cursor.take() {
            Some(id) => self.store.edit(id, &input),
            None => Some(self.store.add(&input, &self.clock)),
        };

        self.persist()?;
        Ok(outcome)
    }

    pub fn toggle(&mut self, id: u64) -> Result<Option<Task>, AppError> {
        let outcome = self.store.toggle(id);
        self.persist()?;
        Ok(outcome)
    }

    pub fn remove(&mut self, id: u64) -> Result<Option<Task>, AppError> {
        let outcome = self.store.remove(id);
        self.persist()?;
        Ok(outcome)
    }

    pub fn check_all(&mut self) -> Result<(), AppError> {
        self.store.check_all();
        self.persist()
    }

    pub fn clear_all(&mut self) -> Result<(), AppError> {
        self.store.clear_all();
        self.persist()
    }

    fn persist(&self) -> Result<(), AppError> {
        self.sink.persist(self.store.tasks())
    }
}
