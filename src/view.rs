//! Board view model.
//!
//! Derives what the board shows from a store snapshot and the presentation's
//! selected task id. Kept apart from the store so rendering never mutates.

use crate::store::Store;
use crate::task::{Task, TaskId};

/// One of the two board sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Todo,
    Done,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Todo => "TO DO",
            Section::Done => "DONE",
        }
    }

    /// Message shown when the section has no tasks.
    pub fn empty_message(self) -> &'static str {
        match self {
            Section::Todo => "No tasks yet.\nAdd a new TODO!",
            Section::Done => "Nothing done yet.\nCheck off a task!",
        }
    }

    /// Section a task currently belongs to.
    pub fn of(task: &Task) -> Section {
        if task.completed {
            Section::Done
        } else {
            Section::Todo
        }
    }

    pub fn other(self) -> Section {
        match self {
            Section::Todo => Section::Done,
            Section::Done => Section::Todo,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Section::Todo => 0,
            Section::Done => 1,
        }
    }
}

/// Tasks of one section, in collection order.
#[derive(Debug, Clone)]
pub struct SectionView<'a> {
    pub section: Section,
    pub tasks: Vec<&'a Task>,
}

impl<'a> SectionView<'a> {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

/// What the board renders for the current snapshot.
#[derive(Debug, Clone)]
pub enum BoardView<'a> {
    /// Both sections plus the compose input.
    Overview {
        todo: SectionView<'a>,
        done: SectionView<'a>,
    },
    /// A single selected task, expanded; the compose input is hidden.
    Focus { section: Section, task: &'a Task },
}

impl<'a> BoardView<'a> {
    /// Build the view for `store` with the optional selection.
    ///
    /// A selection that no longer resolves to a task falls back to the
    /// overview.
    pub fn derive(store: &'a Store, selected: Option<TaskId>) -> Self {
        if let Some(task) = selected.and_then(|id| store.get(id)) {
            return BoardView::Focus {
                section: Section::of(task),
                task,
            };
        }
        BoardView::Overview {
            todo: SectionView {
                section: Section::Todo,
                tasks: store.active_view(),
            },
            done: SectionView {
                section: Section::Done,
                tasks: store.completed_view(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_splits_sections() {
        let mut store = Store::new();
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();
        store.toggle(a.id);

        match BoardView::derive(&store, None) {
            BoardView::Overview { todo, done } => {
                assert_eq!(todo.section, Section::Todo);
                assert_eq!(todo.tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![b.id]);
                assert_eq!(done.tasks[0].id, a.id);
                assert_eq!(done.len(), 1);
            }
            other => panic!("expected overview, got {other:?}"),
        }
    }

    #[test]
    fn selection_focuses_single_task() {
        let mut store = Store::new();
        let a = store.add("a").unwrap();
        store.add("b").unwrap();
        store.toggle(a.id);

        match BoardView::derive(&store, Some(a.id)) {
            BoardView::Focus { section, task } => {
                assert_eq!(section, Section::Done);
                assert_eq!(task.id, a.id);
            }
            other => panic!("expected focus, got {other:?}"),
        }
    }

    #[test]
    fn stale_selection_falls_back_to_overview() {
        let mut store = Store::new();
        let a = store.add("a").unwrap();
        store.delete(a.id);

        assert!(matches!(
            BoardView::derive(&store, Some(a.id)),
            BoardView::Overview { .. }
        ));
    }

    #[test]
    fn empty_sections_have_messages() {
        let store = Store::new();
        if let BoardView::Overview { todo, done } = BoardView::derive(&store, None) {
            assert!(todo.is_empty() && done.is_empty());
        }
        assert!(Section::Todo.empty_message().contains("TODO"));
        assert_ne!(Section::Todo.empty_message(), Section::Done.empty_message());
        assert_eq!(Section::Todo.other(), Section::Done);
    }
}
