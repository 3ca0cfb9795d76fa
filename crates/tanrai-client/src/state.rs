//! Pure list transitions.
//!
//! [`reduce`] never performs I/O. Optimistic intents ([`Intent::Toggle`],
//! [`Intent::Remove`]) hand back the intent that undoes them, so the caller
//! can restore the pre-mutation state whatever happened in between.

use tanrai_core::Todo;

/// A change to the local list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Replace the whole list (load, or restoring a snapshot).
    Replace(Vec<Todo>),
    /// Put a server-confirmed todo at the front.
    Prepend(Todo),
    /// Flip `completed` before the server confirms.
    Toggle(i64),
    /// Set `completed` to a known value.
    SetCompleted {
        /// Target todo.
        id: i64,
        /// Value to set.
        completed: bool,
    },
    /// Drop a todo before the server confirms.
    Remove(i64),
    /// Swap in the server's copy of a todo.
    Reconcile(Todo),
}

/// Result of applying an [`Intent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reduction {
    /// The list after the intent.
    pub todos: Vec<Todo>,
    /// Intent that restores the prior state, for optimistic intents that
    /// changed something.
    pub revert: Option<Intent>,
}

impl Reduction {
    fn settled(todos: Vec<Todo>) -> Self {
        Self {
            todos,
            revert: None,
        }
    }
}

/// Apply `intent` to `todos`.
pub fn reduce(todos: &[Todo], intent: Intent) -> Reduction {
    match intent {
        Intent::Replace(next) => Reduction::settled(next),
        Intent::Prepend(todo) => {
            let id = todo.id;
            let mut next = Vec::with_capacity(todos.len() + 1);
            next.push(todo);
            next.extend(todos.iter().filter(|t| t.id != id).cloned());
            Reduction::settled(next)
        }
        Intent::Toggle(id) => match todos.iter().find(|t| t.id == id) {
            Some(current) => {
                let previous = current.completed;
                Reduction {
                    todos: set_completed(todos, id, !previous),
                    revert: Some(Intent::SetCompleted {
                        id,
                        completed: previous,
                    }),
                }
            }
            None => Reduction::settled(todos.to_vec()),
        },
        Intent::SetCompleted { id, completed } => {
            Reduction::settled(set_completed(todos, id, completed))
        }
        Intent::Remove(id) => {
            let next: Vec<Todo> = todos.iter().filter(|t| t.id != id).cloned().collect();
            let revert = (next.len() != todos.len()).then(|| Intent::Replace(todos.to_vec()));
            Reduction { todos: next, revert }
        }
        Intent::Reconcile(server) => {
            let next = todos
                .iter()
                .map(|t| if t.id == server.id { server.clone() } else { t.clone() })
                .collect();
            Reduction::settled(next)
        }
    }
}

fn set_completed(todos: &[Todo], id: i64, completed: bool) -> Vec<Todo> {
    todos
        .iter()
        .map(|t| {
            if t.id == id {
                Todo {
                    completed,
                    ..t.clone()
                }
            } else {
                t.clone()
            }
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: i64, completed: bool) -> Todo {
        Todo {
            id,
            text: format!("todo {id}"),
            completed,
            created_at: "2024-05-01T12:00:00Z".parse().unwrap(),
        }
    }

    fn ids(todos: &[Todo]) -> Vec<i64> {
        todos.iter().map(|t| t.id).collect()
    }

    #[test]
    fn replace_swaps_list() {
        let r = reduce(&[todo(1, false)], Intent::Replace(vec![todo(2, true)]));
        assert_eq!(ids(&r.todos), vec![2]);
        assert!(r.revert.is_none());
    }

    #[test]
    fn prepend_puts_new_first() {
        let r = reduce(&[todo(1, false)], Intent::Prepend(todo(2, false)));
        assert_eq!(ids(&r.todos), vec![2, 1]);
        assert!(r.revert.is_none());
    }

    #[test]
    fn prepend_replaces_existing_id() {
        let r = reduce(&[todo(1, false), todo(2, false)], Intent::Prepend(todo(2, true)));
        assert_eq!(ids(&r.todos), vec![2, 1]);
        assert!(r.todos[0].completed);
    }

    #[test]
    fn toggle_flips_only_target() {
        let list = [todo(1, false), todo(2, false)];
        let r = reduce(&list, Intent::Toggle(2));
        assert!(!r.todos[0].completed);
        assert!(r.todos[1].completed);
        assert_eq!(
            r.revert,
            Some(Intent::SetCompleted {
                id: 2,
                completed: false
            })
        );
    }

    #[test]
    fn toggle_then_revert_restores_flag() {
        let list = vec![todo(1, true)];
        let toggled = reduce(&list, Intent::Toggle(1));
        assert!(!toggled.todos[0].completed);
        let restored = reduce(&toggled.todos, toggled.revert.unwrap());
        assert_eq!(restored.todos, list);
    }

    #[test]
    fn revert_sets_value_even_after_second_toggle() {
        // A second flip lands before the first request fails.
        let list = vec![todo(1, false)];
        let first = reduce(&list, Intent::Toggle(1));
        let second = reduce(&first.todos, Intent::Toggle(1));
        let reverted = reduce(&second.todos, first.revert.unwrap());
        assert!(!reverted.todos[0].completed);
    }

    #[test]
    fn toggle_unknown_is_noop() {
        let list = vec![todo(1, false)];
        let r = reduce(&list, Intent::Toggle(9));
        assert_eq!(r.todos, list);
        assert!(r.revert.is_none());
    }

    #[test]
    fn remove_drops_target_and_snapshots() {
        let list = vec![todo(3, false), todo(2, true), todo(1, false)];
        let r = reduce(&list, Intent::Remove(2));
        assert_eq!(ids(&r.todos), vec![3, 1]);
        assert_eq!(r.revert, Some(Intent::Replace(list.clone())));

        let restored = reduce(&r.todos, r.revert.unwrap());
        assert_eq!(restored.todos, list);
    }

    #[test]
    fn remove_unknown_has_no_revert() {
        let list = vec![todo(1, false)];
        let r = reduce(&list, Intent::Remove(5));
        assert_eq!(r.todos, list);
        assert!(r.revert.is_none());
    }

    #[test]
    fn reconcile_replaces_matching_row() {
        let list = vec![todo(1, false), todo(2, false)];
        let mut server = todo(2, true);
        server.text = "from server".into();
        let r = reduce(&list, Intent::Reconcile(server.clone()));
        assert_eq!(r.todos[1], server);
        assert_eq!(r.todos[0], list[0]);
    }

    #[test]
    fn reconcile_missing_row_is_ignored() {
        let list = vec![todo(1, false)];
        let r = reduce(&list, Intent::Reconcile(todo(7, true)));
        assert_eq!(r.todos, list);
    }
}
