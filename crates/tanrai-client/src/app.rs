//! The list controller.
//!
//! [`TodoApp`] owns the last-known server list and the transient UI state.
//! Adds are confirmed-only; toggles and deletes are applied locally first and
//! reverted when the server call fails or is cancelled.
//!
//! Operations take `&self`, so the view can be read while a call is in
//! flight. State lives behind a mutex that is never held across an `.await`.

use parking_lot::Mutex;
use tanrai_core::{CreateTodo, Todo, UpdateTodo};
use tracing::warn;

use crate::api::TodoApi;
use crate::errors::{ClientError, Result};
use crate::state::{Intent, Reduction, reduce};

/// Shown after a failed load.
pub const FETCH_FAILED: &str = "Failed to fetch todos";
/// Shown after a failed add.
pub const ADD_FAILED: &str = "Failed to add todo";
/// Shown after a failed toggle.
pub const UPDATE_FAILED: &str = "Failed to update todo";
/// Shown after a failed delete.
pub const DELETE_FAILED: &str = "Failed to delete todo";

#[derive(Default)]
struct ViewState {
    todos: Vec<Todo>,
    input: String,
    loading: bool,
    submitting: bool,
    error: Option<String>,
}

impl ViewState {
    fn apply(&mut self, intent: Intent) -> Option<Intent> {
        let Reduction { todos, revert } = reduce(&self.todos, intent);
        self.todos = todos;
        revert
    }
}

#[derive(Clone, Copy)]
enum Busy {
    Loading,
    Submitting,
}

/// Raises a busy flag for its lifetime.
struct BusyGuard<'a> {
    state: &'a Mutex<ViewState>,
    busy: Busy,
}

impl<'a> BusyGuard<'a> {
    fn raise(state: &'a Mutex<ViewState>, busy: Busy) -> Self {
        Self::set(&mut state.lock(), busy, true);
        Self { state, busy }
    }

    fn set(state: &mut ViewState, busy: Busy, value: bool) {
        match busy {
            Busy::Loading => state.loading = value,
            Busy::Submitting => state.submitting = value,
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        Self::set(&mut self.state.lock(), self.busy, false);
    }
}

/// Undo for an optimistic change, applied on drop unless confirmed.
///
/// Dropping an armed guard means the request was cancelled before it
/// settled; the change is undone and `message` recorded as the error.
struct PendingRevert<'a> {
    state: &'a Mutex<ViewState>,
    revert: Option<Intent>,
    message: &'static str,
}

impl<'a> PendingRevert<'a> {
    fn new(state: &'a Mutex<ViewState>, revert: Option<Intent>, message: &'static str) -> Self {
        Self {
            state,
            revert,
            message,
        }
    }

    /// The server accepted the change.
    fn confirm(mut self) {
        self.revert = None;
    }

    /// The server rejected the change; the caller reports the error.
    fn undo(mut self) {
        if let Some(intent) = self.revert.take() {
            let _ = self.state.lock().apply(intent);
        }
    }
}

impl Drop for PendingRevert<'_> {
    fn drop(&mut self) {
        if let Some(intent) = self.revert.take() {
            warn!("{}: request cancelled", self.message);
            let mut state = self.state.lock();
            let _ = state.apply(intent);
            state.error = Some(self.message.to_owned());
        }
    }
}

/// Client-side todo list synchronized with a [`TodoApi`].
pub struct TodoApp<A> {
    api: A,
    state: Mutex<ViewState>,
}

impl<A: TodoApi> TodoApp<A> {
    /// Empty list bound to `api`.
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::default(),
        }
    }

    /// Snapshot of the current list, newest first.
    pub fn todos(&self) -> Vec<Todo> {
        self.state.lock().todos.clone()
    }

    /// Pending input text.
    pub fn input(&self) -> String {
        self.state.lock().input.clone()
    }

    /// Replace the pending input text.
    pub fn set_input(&self, text: impl Into<String>) {
        self.state.lock().input = text.into();
    }

    /// A load is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    /// An add is in flight.
    pub fn is_submitting(&self) -> bool {
        self.state.lock().submitting
    }

    /// Last recorded error message.
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// The underlying API.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Replace the list with the server's.
    pub async fn load(&self) -> Result<()> {
        let result = {
            let _busy = BusyGuard::raise(&self.state, Busy::Loading);
            self.api.list().await
        };

        match result {
            Ok(todos) => {
                let mut state = self.state.lock();
                let _ = state.apply(Intent::Replace(todos));
                state.error = None;
                Ok(())
            }
            Err(e) => self.fail(FETCH_FAILED, e),
        }
    }

    /// Create a todo from the pending input.
    ///
    /// Does nothing when the input is blank. The new todo is shown only once
    /// the server has returned it.
    pub async fn add(&self) -> Result<()> {
        let text = self.input();
        if text.trim().is_empty() {
            return Ok(());
        }

        let result = {
            let _busy = BusyGuard::raise(&self.state, Busy::Submitting);
            self.api.create(&CreateTodo::new(text)).await
        };

        match result {
            Ok(todo) => {
                let mut state = self.state.lock();
                let _ = state.apply(Intent::Prepend(todo));
                state.input.clear();
                state.error = None;
                Ok(())
            }
            Err(e) => self.fail(ADD_FAILED, e),
        }
    }

    /// Flip `completed` now, then confirm with the server.
    ///
    /// On failure or cancellation the flag goes back to its value before
    /// this call. Unknown ids are ignored.
    pub async fn toggle(&self, id: i64) -> Result<()> {
        let (target, revert) = {
            let mut state = self.state.lock();
            let Some(target) = state.todos.iter().find(|t| t.id == id).map(|t| !t.completed)
            else {
                return Ok(());
            };
            (target, state.apply(Intent::Toggle(id)))
        };
        let pending = PendingRevert::new(&self.state, revert, UPDATE_FAILED);

        match self.api.update(id, &UpdateTodo::completed(target)).await {
            Ok(todo) => {
                pending.confirm();
                let _ = self.state.lock().apply(Intent::Reconcile(todo));
                Ok(())
            }
            Err(e) => {
                pending.undo();
                self.fail(UPDATE_FAILED, e)
            }
        }
    }

    /// Remove now, then confirm with the server.
    ///
    /// On failure or cancellation the whole prior list is restored.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let revert = self.state.lock().apply(Intent::Remove(id));
        let pending = PendingRevert::new(&self.state, revert, DELETE_FAILED);

        match self.api.delete(id).await {
            Ok(_) => {
                pending.confirm();
                Ok(())
            }
            Err(e) => {
                pending.undo();
                self.fail(DELETE_FAILED, e)
            }
        }
    }

    fn fail(&self, message: &str, err: ClientError) -> Result<()> {
        warn!(error = %err, "{message}");
        self.state.lock().error = Some(message.to_owned());
        Err(err)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
