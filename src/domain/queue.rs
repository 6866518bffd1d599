//! In-memory task queue
//!
//! Pending tasks live in a binary min-heap keyed by [`TaskKey`]:
//! `(priority, due_date, insertion sequence)`. Insert is O(log n) and peek
//! is O(1). Completing by name scans and filters every entry, O(n), since
//! names are not indexed; personal task lists stay small.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::task::{Task, TaskKey};

#[derive(Debug, Clone)]
struct Entry {
    key: TaskKey,
    task: Task,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Priority-ordered collection of pending tasks
#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl TaskQueue {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a task; ties on priority and due date keep insertion order
    pub fn insert(&mut self, task: Task) {
        let key = TaskKey::for_task(&task, self.next_seq);
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { key, task }));
    }

    /// Returns the task that would run next, without removing it
    pub fn peek_next(&self) -> Option<&Task> {
        self.heap.peek().map(|Reverse(entry)| &entry.task)
    }

    /// Removes every task whose stored name equals `name` exactly
    ///
    /// Returns how many were removed. Zero is a normal result.
    pub fn complete(&mut self, name: &str) -> usize {
        let before = self.heap.len();
        self.heap.retain(|Reverse(entry)| entry.task.name != name);
        before - self.heap.len()
    }

    /// Snapshot sorted by priority, then due date, then insertion order
    pub fn list_by_priority(&self) -> Vec<Task> {
        self.sorted_entries(|a, b| a.key.cmp(&b.key))
    }

    /// Snapshot sorted by due date, then insertion order
    pub fn list_by_due_date(&self) -> Vec<Task> {
        self.sorted_entries(|a, b| a.key.cmp_by_due_date(&b.key))
    }

    /// Number of pending tasks
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if no tasks are pending
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn sorted_entries(&self, compare: impl Fn(&Entry, &Entry) -> Ordering) -> Vec<Task> {
        let mut entries: Vec<&Entry> = self.heap.iter().map(|Reverse(entry)| entry).collect();
        entries.sort_by(|a, b| compare(a, b));
        entries.into_iter().map(|entry| entry.task.clone()).collect()
    }
}

impl FromIterator<Task> for TaskQueue {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        let mut queue = TaskQueue::new();
        queue.extend(iter);
        queue
    }
}

impl Extend<Task> for TaskQueue {
    fn extend<I: IntoIterator<Item = Task>>(&mut self, iter: I) {
        for task in iter {
            self.insert(task);
        }
    }
}
