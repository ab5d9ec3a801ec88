//! Direct messages
//!
//! Messaging is silent: no operation here posts a notification.

use chrono::Utc;

use shared::models::Message;
use shared::util::generate_id;

use super::HrStore;

impl HrStore {
    /// All messages in insertion order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Send from the signed-in user (or the fallback identity) to `to_id`
    pub fn send_message(&mut self, to_id: &str, content: impl Into<String>) -> Message {
        let message = Message {
            id: generate_id("msg"),
            from_id: self.acting_user_id(),
            to_id: to_id.to_string(),
            content: content.into(),
            read: false,
            created_at: Utc::now(),
        };

        tracing::debug!(id = %message.id, from = %message.from_id, to = %message.to_id, "Message sent");
        self.messages.push(message.clone());
        self.persist();
        message
    }

    /// Flag the given messages as read. Unknown ids are ignored.
    pub fn mark_as_read(&mut self, ids: &[&str]) {
        let mut changed = 0usize;
        for message in self.messages.iter_mut() {
            if !message.read && ids.contains(&message.id.as_str()) {
                message.read = true;
                changed += 1;
            }
        }
        if changed > 0 {
            self.persist();
        }
    }

    /// Messages between the signed-in user and `participant_id`, oldest first
    pub fn get_conversation(&self, participant_id: &str) -> Vec<Message> {
        let Some(user) = &self.user else {
            return Vec::new();
        };
        let mut conversation: Vec<Message> = self
            .messages
            .iter()
            .filter(|m| m.is_between(&user.id, participant_id))
            .cloned()
            .collect();
        conversation.sort_by_key(|m| m.created_at);
        conversation
    }

    /// Unread messages addressed to the signed-in user
    pub fn unread_count(&self) -> usize {
        let Some(user) = &self.user else {
            return 0;
        };
        self.messages
            .iter()
            .filter(|m| m.to_id == user.id && !m.read)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;
    use chrono::{Duration, TimeZone};

    fn message(id: &str, from: &str, to: &str, minute: u32) -> Message {
        Message {
            id: id.to_string(),
            from_id: from.to_string(),
            to_id: to.to_string(),
            content: id.to_string(),
            read: false,
            created_at: Utc.with_ymd_and_hms(2025, 1, 10, 9, minute, 0).unwrap(),
        }
    }

    fn signed_in() -> HrStore {
        let mut store = HrStore::in_memory(SeedData::generate(0, 0));
        assert!(store.login("sarah.chen@blackflag.hr", "Admin123!"));
        store
    }

    #[test]
    fn test_conversation_sorted_regardless_of_insertion_order() {
        let mut a = signed_in();
        let mut b = signed_in();
        let msgs = vec![
            message("m1", "emp-001", "emp-013", 1),
            message("m2", "emp-013", "emp-001", 2),
            message("m3", "emp-001", "emp-999", 3),
            message("m4", "emp-001", "emp-013", 4),
        ];
        a.messages = msgs.clone();
        b.messages = msgs.into_iter().rev().collect();

        let ids = |store: &HrStore| -> Vec<String> {
            store
                .get_conversation("emp-013")
                .into_iter()
                .map(|m| m.id)
                .collect()
        };
        assert_eq!(ids(&a), ["m1", "m2", "m4"]);
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn test_send_and_unread() {
        let mut store = signed_in();
        let sent = store.send_message("emp-013", "Quarterly reviews are due");
        assert_eq!(sent.from_id, "emp-001");
        assert!(!sent.read);
        assert_eq!(store.messages().last(), Some(&sent));

        let mut incoming = message("in-1", "emp-013", "emp-001", 0);
        incoming.created_at = sent.created_at - Duration::minutes(1);
        store.messages.push(incoming);
        assert_eq!(store.unread_count(), 1);

        store.mark_as_read(&["in-1", "does-not-exist"]);
        assert_eq!(store.unread_count(), 0);
        assert_eq!(store.get_conversation("emp-013")[0].id, "in-1");

        // Messaging posts no notifications beyond the welcome
        assert_eq!(store.notifications().len(), 1);
    }

    #[test]
    fn test_signed_out_views_are_empty() {
        let mut store = HrStore::in_memory(SeedData::generate(0, 0));
        let sent = store.send_message("emp-013", "hello");
        assert_eq!(sent.from_id, "emp-001");
        assert!(store.get_conversation("emp-013").is_empty());
        assert_eq!(store.unread_count(), 0);
    }
}
