//! In-memory notification list, newest first.

use std::collections::VecDeque;
use std::sync::Mutex;

use tracing::debug;

use shophub_core::types::id::NotificationId;
use shophub_entity::notification::Notification;

/// Ordered in-memory collection of notifications with derived unread
/// count.
///
/// Insertions prepend, so the collection is always newest first. All
/// methods take `&self`; the engine shares the list behind an `Arc`.
#[derive(Debug)]
pub struct NotificationList {
    /// Entries, newest first.
    entries: Mutex<VecDeque<Notification>>,
    /// Maximum retained entries; the oldest are trimmed beyond this.
    max_stored: usize,
}

impl NotificationList {
    /// Creates an empty list retaining at most `max_stored` entries.
    pub fn new(max_stored: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            max_stored,
        }
    }

    /// Prepends a notification.
    pub fn insert(&self, notification: Notification) {
        let mut entries = self.lock();
        entries.push_front(notification);
        if entries.len() > self.max_stored {
            entries.truncate(self.max_stored);
            debug!(max_stored = self.max_stored, "Trimmed oldest notifications");
        }
    }

    /// Marks one notification read. No-op if the id is absent; read never
    /// reverts to unread.
    pub fn mark_read(&self, id: NotificationId) -> bool {
        let mut entries = self.lock();
        match entries.iter_mut().find(|n| n.id == id) {
            Some(entry) => {
                entry.read = true;
                true
            }
            None => false,
        }
    }

    /// Marks every notification read. Returns the number of entries that
    /// changed.
    pub fn mark_all_read(&self) -> usize {
        let mut entries = self.lock();
        let mut changed = 0;
        for entry in entries.iter_mut() {
            if !entry.read {
                entry.read = true;
                changed += 1;
            }
        }
        changed
    }

    /// Removes one notification. No-op if the id is absent.
    pub fn remove(&self, id: NotificationId) -> bool {
        let mut entries = self.lock();
        match entries.iter().position(|n| n.id == id) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Empties the collection.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Count of unread entries, recomputed live from the entries.
    pub fn unread_count(&self) -> usize {
        self.lock().iter().filter(|n| n.is_unread()).count()
    }

    /// Cloned view of the entries, newest first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().iter().cloned().collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Notification>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shophub_entity::notification::NotificationDraft;

    fn make(title: &str) -> Notification {
        Notification::from_draft(NotificationDraft::new(title, "body"))
    }

    fn make_list() -> NotificationList {
        NotificationList::new(100)
    }

    #[test]
    fn test_insertion_order_newest_first() {
        let list = make_list();
        list.insert(make("first"));
        list.insert(make("second"));
        list.insert(make("third"));

        let titles: Vec<String> = list.snapshot().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, ["third", "second", "first"]);
    }

    #[test]
    fn test_unread_count_matches_entries() {
        let list = make_list();
        let a = make("a");
        let a_id = a.id;
        list.insert(a);
        list.insert(make("b"));
        assert_eq!(list.unread_count(), 2);

        list.mark_read(a_id);
        assert_eq!(list.unread_count(), 1);

        list.mark_all_read();
        assert_eq!(list.unread_count(), 0);
    }

    #[test]
    fn test_mark_read_is_idempotent() {
        let list = make_list();
        let n = make("a");
        let id = n.id;
        list.insert(n);

        assert!(list.mark_read(id));
        assert!(list.mark_read(id));
        assert_eq!(list.unread_count(), 0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_absent_id_is_a_noop() {
        let list = make_list();
        list.insert(make("a"));

        assert!(!list.mark_read(NotificationId::new()));
        assert!(!list.remove(NotificationId::new()));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_twice_same_as_once() {
        let list = make_list();
        let n = make("a");
        let id = n.id;
        list.insert(n);

        assert!(list.remove(id));
        assert!(!list.remove(id));
        assert!(list.is_empty());
    }

    #[test]
    fn test_clear_empties() {
        let list = make_list();
        list.insert(make("a"));
        list.insert(make("b"));
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.unread_count(), 0);
    }

    #[test]
    fn test_cap_trims_oldest() {
        let list = NotificationList::new(3);
        for i in 0..5 {
            list.insert(make(&format!("n{i}")));
        }

        let titles: Vec<String> = list.snapshot().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, ["n4", "n3", "n2"]);
    }
}
