//! In-memory task store.
//!
//! The `Store` owns the ordered task collection for one session. Every
//! operation is total: unknown ids and blank text are no-ops, never errors.
//! Order is insertion order and only `delete` removes elements.

use log::debug;

use crate::task::{has_content, Task, TaskId};

/// Ordered collection of tasks with the mutations the board needs.
#[derive(Debug, Default, Clone)]
pub struct Store {
    tasks: Vec<Task>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Store::default()
    }

    /// Append a new open task.
    ///
    /// Returns a copy of the created record, or `None` when `text` is blank.
    pub fn add(&mut self, text: &str) -> Option<Task> {
        if !has_content(text) {
            debug!("event=task_add status=rejected reason=blank_text");
            return None;
        }
        let task = Task::new(text);
        debug!("event=task_add status=ok id={} count={}", task.id, self.tasks.len() + 1);
        self.tasks.push(task.clone());
        Some(task)
    }

    /// Flip the completion flag. Returns the new value when the task exists.
    pub fn toggle(&mut self, id: TaskId) -> Option<bool> {
        let task = self.get_mut(id)?;
        task.completed = !task.completed;
        debug!("event=task_toggle id={} completed={}", id, task.completed);
        Some(task.completed)
    }

    /// Remove a task, preserving the relative order of the rest.
    pub fn delete(&mut self, id: TaskId) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        let removed = self.tasks.remove(idx);
        debug!("event=task_delete id={} count={}", id, self.tasks.len());
        Some(removed)
    }

    /// Replace the text of a task. Blank text leaves the task untouched.
    pub fn edit(&mut self, id: TaskId, new_text: &str) -> bool {
        if !has_content(new_text) {
            debug!("event=task_edit status=rejected reason=blank_text id={}", id);
            return false;
        }
        match self.get_mut(id) {
            Some(task) => {
                task.text = new_text.to_string();
                debug!("event=task_edit status=ok id={}", id);
                true
            }
            None => false,
        }
    }

    /// Replace the memo of a task. An empty memo clears it.
    pub fn update_memo(&mut self, id: TaskId, memo: &str) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.memo = if memo.is_empty() {
                    None
                } else {
                    Some(memo.to_string())
                };
                debug!("event=task_memo id={} len={}", id, memo.len());
                true
            }
            None => false,
        }
    }

    /// Attach (`Some`) or remove (`None`) the image of a task.
    pub fn set_image(&mut self, id: TaskId, image_url: Option<String>) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                debug!(
                    "event=task_image id={} attached={} bytes={}",
                    id,
                    image_url.is_some(),
                    image_url.as_ref().map_or(0, |u| u.len())
                );
                task.image_url = image_url;
                true
            }
            None => false,
        }
    }

    /// Tasks not yet completed, in collection order.
    pub fn active_view(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| !t.completed).collect()
    }

    /// Completed tasks, in collection order.
    pub fn completed_view(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.completed).collect()
    }

    /// Get a task by id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// All tasks in collection order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drop every task, starting the session over.
    pub fn clear(&mut self) {
        debug!("event=store_clear count={}", self.tasks.len());
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn ids(tasks: &[&Task]) -> Vec<TaskId> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn add_then_toggle_moves_task_to_completed_view() {
        let mut store = Store::new();
        let task = store.add("buy milk").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.tasks()[0].text, "buy milk");
        assert!(!store.tasks()[0].completed);

        assert_eq!(store.toggle(task.id), Some(true));
        assert_eq!(ids(&store.completed_view()), vec![task.id]);
        assert!(store.active_view().is_empty());
    }

    #[test]
    fn add_rejects_blank_text() {
        let mut store = Store::new();
        assert!(store.add("   ").is_none());
        assert!(store.add("").is_none());
        assert!(store.add("\t\n").is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn add_keeps_text_as_entered() {
        let mut store = Store::new();
        let task = store.add("  call mom ").unwrap();
        assert_eq!(store.get(task.id).unwrap().text, "  call mom ");
    }

    #[test]
    fn ids_are_unique_for_rapid_adds() {
        let mut store = Store::new();
        let mut seen = HashSet::new();
        for i in 0..1000 {
            let task = store.add(&format!("task {i}")).unwrap();
            assert!(seen.insert(task.id));
        }
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut store = Store::new();
        store.add("a").unwrap();
        let before = store.tasks().to_vec();
        let missing = Uuid::new_v4();

        assert_eq!(store.toggle(missing), None);
        assert!(store.delete(missing).is_none());
        assert!(!store.edit(missing, "b"));
        assert!(!store.update_memo(missing, "memo"));
        assert!(!store.set_image(missing, Some("data:,".to_string())));
        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn edit_replaces_text_but_rejects_blank() {
        let mut store = Store::new();
        let task = store.add("draft").unwrap();

        assert!(store.edit(task.id, "final"));
        assert_eq!(store.get(task.id).unwrap().text, "final");

        assert!(!store.edit(task.id, "  "));
        assert_eq!(store.get(task.id).unwrap().text, "final");
    }

    #[test]
    fn update_memo_sets_and_clears() {
        let mut store = Store::new();
        let task = store.add("vitamins").unwrap();

        assert!(store.update_memo(task.id, "after breakfast"));
        assert_eq!(store.get(task.id).unwrap().memo_text(), "after breakfast");

        assert!(store.update_memo(task.id, ""));
        assert_eq!(store.get(task.id).unwrap().memo, None);
    }

    #[test]
    fn set_image_attaches_and_removes() {
        let mut store = Store::new();
        let task = store.add("photo").unwrap();

        assert!(store.set_image(task.id, Some("data:image/png;base64,AAAA".to_string())));
        assert!(store.get(task.id).unwrap().has_image());
        assert!(store.set_image(task.id, None));
        assert!(!store.get(task.id).unwrap().has_image());
    }

    #[test]
    fn delete_preserves_relative_order() {
        let mut store = Store::new();
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();
        let c = store.add("c").unwrap();

        let removed = store.delete(b.id).unwrap();
        assert_eq!(removed.id, b.id);
        let remaining: Vec<TaskId> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(remaining, vec![a.id, c.id]);
    }

    #[test]
    fn toggle_keeps_collection_order() {
        let mut store = Store::new();
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();
        let c = store.add("c").unwrap();
        store.toggle(a.id);
        store.toggle(c.id);

        assert_eq!(ids(&store.active_view()), vec![b.id]);
        assert_eq!(ids(&store.completed_view()), vec![a.id, c.id]);
        let all: Vec<TaskId> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(all, vec![a.id, b.id, c.id]);
    }

    #[test]
    fn clear_empties_the_store() {
        let mut store = Store::new();
        store.add("a");
        store.add("b");
        store.clear();
        assert!(store.is_empty());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(String),
        Toggle(usize),
        Delete(usize),
        Edit(usize, String),
        Memo(usize, String),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let text = prop_oneof![Just(String::new()), Just("   ".to_string()), "[a-z ]{0,8}"];
        prop_oneof![
            text.clone().prop_map(Op::Add),
            (0usize..16).prop_map(Op::Toggle),
            (0usize..16).prop_map(Op::Delete),
            ((0usize..16), text.clone()).prop_map(|(i, t)| Op::Edit(i, t)),
            ((0usize..16), text).prop_map(|(i, t)| Op::Memo(i, t)),
        ]
    }

    fn pick(store: &Store, idx: usize) -> TaskId {
        // Out-of-range indexes map to an id that is never present.
        store
            .tasks()
            .get(idx)
            .map(|t| t.id)
            .unwrap_or_else(Uuid::new_v4)
    }

    proptest! {
        #[test]
        fn prop_len_counts_non_blank_adds(texts in prop::collection::vec("[a-z \t]{0,6}", 0..40)) {
            let mut store = Store::new();
            let mut expected = 0;
            for text in &texts {
                let before = store.len();
                let added = store.add(text);
                if text.trim().is_empty() {
                    prop_assert!(added.is_none());
                    prop_assert_eq!(store.len(), before);
                } else {
                    expected += 1;
                }
            }
            prop_assert_eq!(store.len(), expected);
        }

        #[test]
        fn prop_views_partition_collection(ops in prop::collection::vec(op_strategy(), 0..60)) {
            let mut store = Store::new();
            for op in ops {
                match op {
                    Op::Add(t) => { store.add(&t); }
                    Op::Toggle(i) => { let id = pick(&store, i); store.toggle(id); }
                    Op::Delete(i) => { let id = pick(&store, i); store.delete(id); }
                    Op::Edit(i, t) => { let id = pick(&store, i); store.edit(id, &t); }
                    Op::Memo(i, t) => { let id = pick(&store, i); store.update_memo(id, &t); }
                }

                let active = ids(&store.active_view());
                let done = ids(&store.completed_view());
                prop_assert_eq!(active.len() + done.len(), store.len());

                let mut seen = HashSet::new();
                for id in active.iter().chain(done.iter()) {
                    prop_assert!(seen.insert(*id));
                }
                for task in store.tasks() {
                    prop_assert!(seen.contains(&task.id));
                    prop_assert!(has_content(&task.text));
                }
            }
        }

        #[test]
        fn prop_toggle_twice_restores(count in 1usize..10, pick_idx in 0usize..10, pre_toggle in any::<bool>()) {
            let mut store = Store::new();
            for i in 0..count {
                store.add(&format!("t{i}"));
            }
            let id = store.tasks()[pick_idx % count].id;
            if pre_toggle {
                store.toggle(id);
            }
            let before = store.get(id).unwrap().completed;
            store.toggle(id);
            store.toggle(id);
            prop_assert_eq!(store.get(id).unwrap().completed, before);
        }

        #[test]
        fn prop_delete_removes_exactly_one(count in 1usize..12, pick_idx in 0usize..12) {
            let mut store = Store::new();
            for i in 0..count {
                store.add(&format!("t{i}"));
            }
            let victim = store.tasks()[pick_idx % count].id;
            let expected: Vec<TaskId> = store
                .tasks()
                .iter()
                .map(|t| t.id)
                .filter(|id| *id != victim)
                .collect();

            prop_assert!(store.delete(victim).is_some());
            let remaining: Vec<TaskId> = store.tasks().iter().map(|t| t.id).collect();
            prop_assert_eq!(remaining, expected);
        }
    }
}
