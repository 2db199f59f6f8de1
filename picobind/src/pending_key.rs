// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;

/// The object key waiting for its value.
///
/// A value is always consumed before the next key or a nested container is
/// read, so a single slot is enough: nested objects start with the slot empty
/// because their parent popped the key that introduced them.
#[derive(Debug, Default)]
pub(crate) struct PendingKey {
    slot: Option<String>,
}

impl PendingKey {
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Only called when empty: a string seen while a key is pending is that
    /// key's value, not a new key.
    pub fn push(&mut self, key: String) {
        debug_assert!(self.slot.is_none(), "key pushed over a pending key");
        self.slot = Some(key);
    }

    pub fn pop(&mut self) -> Option<String> {
        self.slot.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop() {
        let mut pending = PendingKey::default();
        assert!(pending.is_empty());
        pending.push("kind".into());
        assert!(!pending.is_empty());
        assert_eq!(pending.pop().as_deref(), Some("kind"));
        assert!(pending.is_empty());
        assert_eq!(pending.pop(), None);
    }
}
