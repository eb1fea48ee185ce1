//! Registry of open sessions
//!
//! Owned by the controller. Entries keep insertion order so a global
//! navigation action visits sessions in the order they were opened.

use super::session::{Direction, Session};

/// Open sessions keyed by their window
#[derive(Debug)]
pub struct Registry<K> {
    entries: Vec<(K, Session)>,
    any_open: bool,
}

impl<K> Default for Registry<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            any_open: false,
        }
    }
}

impl<K: Copy + PartialEq> Registry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a session. A session already stored under `key` is replaced.
    pub fn insert(&mut self, key: K, session: Session) {
        match self.get_mut(key) {
            Some(existing) => *existing = session,
            None => self.entries.push((key, session)),
        }
        self.refresh();
    }

    /// Remove and dispose the session stored under `key`
    pub fn remove(&mut self, key: K) -> Option<Session> {
        let position = self.entries.iter().position(|(k, _)| *k == key)?;
        let (_, mut session) = self.entries.remove(position);
        session.dispose();
        self.refresh();
        Some(session)
    }

    pub fn get(&self, key: K) -> Option<&Session> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, s)| s)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut Session> {
        self.entries.iter_mut().find(|(k, _)| *k == key).map(|(_, s)| s)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> Vec<K> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any session is open. Gates the global navigation action.
    pub fn any_open(&self) -> bool {
        self.any_open
    }

    /// Step every session in `direction`. Returns each key with its new index.
    pub fn step_all(&mut self, direction: Direction) -> Vec<(K, usize)> {
        self.entries
            .iter_mut()
            .map(|(k, session)| (*k, session.step(direction)))
            .collect()
    }

    fn refresh(&mut self) {
        let any_open = !self.entries.is_empty();
        if any_open != self.any_open {
            tracing::debug!("Session open state changed: {}", any_open);
        }
        self.any_open = any_open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::siblings::Siblings;
    use std::path::PathBuf;

    fn session(prefix: &str, len: usize, index: usize) -> Session {
        let paths = (0..len)
            .map(|i| PathBuf::from(format!("/{}/{}.png", prefix, i)))
            .collect();
        Session::new(Siblings { paths, index })
    }

    #[test]
    fn test_any_open_tracks_membership() {
        let mut registry = Registry::new();
        assert!(!registry.any_open());

        registry.insert(1, session("a", 2, 0));
        assert!(registry.any_open());

        registry.insert(2, session("b", 2, 0));
        registry.remove(1);
        assert!(registry.any_open());

        registry.remove(2);
        assert!(!registry.any_open());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_step_all_advances_each_session() {
        let mut registry = Registry::new();
        registry.insert(1, session("a", 3, 2));
        registry.insert(2, session("b", 5, 1));

        let stepped = registry.step_all(Direction::Next);

        assert_eq!(stepped, vec![(1, 0), (2, 2)]);
        assert_eq!(registry.get(1).unwrap().current_index(), 0);
        assert_eq!(registry.get(2).unwrap().current_index(), 2);
    }

    #[test]
    fn test_removed_session_is_not_stepped() {
        let mut registry = Registry::new();
        registry.insert(1, session("a", 3, 0));
        registry.insert(2, session("b", 3, 0));

        let removed = registry.remove(1).unwrap();
        assert!(removed.is_disposed());

        let stepped = registry.step_all(Direction::Previous);
        assert_eq!(stepped, vec![(2, 2)]);
        assert!(registry.get(1).is_none());
        assert_eq!(removed.current_index(), 0);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut registry = Registry::new();
        registry.insert(7, session("a", 1, 0));
        registry.insert(3, session("b", 1, 0));
        registry.insert(5, session("c", 1, 0));
        registry.remove(3);

        assert_eq!(registry.keys(), vec![7, 5]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_unknown_key() {
        let mut registry: Registry<u32> = Registry::new();
        assert!(registry.remove(9).is_none());
        assert!(!registry.any_open());
    }
}
