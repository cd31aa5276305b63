//! Concurrent-safe in-memory user registry.
//!
//! Read-mostly: the evaluator iterates it for every opportunity while writes
//! only happen when users are loaded at startup. Any number of readers may
//! hold the lock together; a writer excludes everyone else.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::Arc;

use crate::domain::{id::UserId, user::User};

/// Mapping from user identity to user configuration.
///
/// At most one entry exists per [`UserId`]. Users are stored behind an
/// [`Arc`] so callers can keep a user past the lifetime of a read guard.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: RwLock<HashMap<UserId, Arc<User>>>,
}

impl UserRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from loaded users. A later user with the same id
    /// replaces an earlier one.
    #[must_use]
    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        let map = users
            .into_iter()
            .map(|user| (user.id(), Arc::new(user)))
            .collect();
        Self {
            users: RwLock::new(map),
        }
    }

    /// Look up a user by id.
    #[must_use]
    pub fn get(&self, id: UserId) -> Option<Arc<User>> {
        self.users.read().get(&id).cloned()
    }

    /// Insert or replace a user, returning the previous entry.
    pub fn set(&self, user: User) -> Option<Arc<User>> {
        self.users.write().insert(user.id(), Arc::new(user))
    }

    /// Remove a user, returning it if it was present.
    pub fn delete(&self, id: UserId) -> Option<Arc<User>> {
        self.users.write().remove(&id)
    }

    /// Replace the whole registry contents in a single write.
    pub fn replace_all(&self, users: impl IntoIterator<Item = User>) {
        let map: HashMap<_, _> = users
            .into_iter()
            .map(|user| (user.id(), Arc::new(user)))
            .collect();
        *self.users.write() = map;
    }

    /// Visit every user under one read lock.
    ///
    /// Returning [`ControlFlow::Break`] from `f` stops the walk. The visit
    /// order is unspecified. `f` must not call back into the registry's
    /// write operations.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&Arc<User>) -> ControlFlow<()>,
    {
        let users = self.users.read();
        for user in users.values() {
            if f(user).is_break() {
                break;
            }
        }
    }

    /// Clone out every user.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<User>> {
        self.users.read().values().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::ChatId;
    use rust_decimal_macros::dec;
    use std::thread;

    fn user(id: i64) -> User {
        User::new(UserId::new(id), ChatId::new(id * 10))
    }

    #[test]
    fn test_set_and_get() {
        let registry = UserRegistry::new();
        assert!(registry.set(user(1)).is_none());

        let found = registry.get(UserId::new(1)).unwrap();
        assert_eq!(found.chat_id(), ChatId::new(10));
        assert!(registry.get(UserId::new(2)).is_none());
    }

    #[test]
    fn test_one_entry_per_identity() {
        let registry = UserRegistry::new();
        registry.set(user(1));
        let previous = registry.set(user(1).with_volume_bounds(dec!(5), dec!(50)));

        assert!(previous.is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(UserId::new(1)).unwrap().volume_max(), dec!(50));
    }

    #[test]
    fn test_from_users_keeps_last_duplicate() {
        let registry = UserRegistry::from_users([
            user(1),
            user(2),
            user(1).with_volume_bounds(dec!(0), dec!(7)),
        ]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(UserId::new(1)).unwrap().volume_max(), dec!(7));
    }

    #[test]
    fn test_delete() {
        let registry = UserRegistry::from_users([user(1), user(2)]);
        assert!(registry.delete(UserId::new(1)).is_some());
        assert!(registry.delete(UserId::new(1)).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_for_each_visits_all() {
        let registry = UserRegistry::from_users((1..=5).map(user));
        let mut ids = Vec::new();
        registry.for_each(|u| {
            ids.push(u.id().get());
            ControlFlow::Continue(())
        });
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_for_each_stops_on_break() {
        let registry = UserRegistry::from_users((1..=5).map(user));
        let mut visited = 0;
        registry.for_each(|_| {
            visited += 1;
            if visited == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(visited, 2);
    }

    #[test]
    fn test_replace_all() {
        let registry = UserRegistry::from_users([user(1), user(2)]);
        registry.replace_all([user(3)]);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(UserId::new(3)).is_some());
        assert!(registry.get(UserId::new(1)).is_none());
    }

    #[test]
    fn test_concurrent_readers_and_writer() {
        let registry = Arc::new(UserRegistry::from_users((1..=50).map(user)));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..100 {
                        let mut seen = 0;
                        registry.for_each(|_| {
                            seen += 1;
                            ControlFlow::Continue(())
                        });
                        assert!(seen >= 50);
                    }
                })
            })
            .collect();

        let writer = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for id in 51..=100 {
                    registry.set(user(id));
                }
            })
        };

        for handle in readers {
            handle.join().unwrap();
        }
        writer.join().unwrap();
        assert_eq!(registry.len(), 100);
        assert!(!registry.is_empty());
    }
}
