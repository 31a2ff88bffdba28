//! Per-reader message disclosure rules

use crate::models::{Message, MessageKind, BROADCAST_TARGET};

/// Whether `requester` may read `message`.
///
/// Broadcasts and public messages are readable by anyone; everything else only
/// by its sender and its recipient.
pub fn is_visible(message: &Message, requester: &str) -> bool {
    message.to == requester
        || message.from == requester
        || message.to == BROADCAST_TARGET
        || message.kind == MessageKind::Message
}

/// Messages `requester` may read, oldest first, keeping only the newest
/// `limit` entries when a limit is given.
pub fn list_for(messages: Vec<Message>, requester: &str, limit: Option<usize>) -> Vec<Message> {
    let mut visible: Vec<Message> = messages
        .into_iter()
        .filter(|m| is_visible(m, requester))
        .collect();

    if let Some(limit) = limit.filter(|&n| n > 0) {
        let skip = visible.len().saturating_sub(limit);
        visible.drain(..skip);
    }

    visible
}

/// Interpret a raw `limit` query value. Anything that is not a positive
/// integer means "no limit".
pub fn parse_limit(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(from: &str, to: &str, text: &str, kind: MessageKind) -> Message {
        Message {
            from: from.to_string(),
            to: to.to_string(),
            text: text.to_string(),
            kind,
            time: "00:00:00".to_string(),
        }
    }

    #[test]
    fn test_private_message_hidden_from_third_party() {
        let m = msg("Y", "X", "secret", MessageKind::PrivateMessage);
        assert!(is_visible(&m, "X"));
        assert!(is_visible(&m, "Y"));
        assert!(!is_visible(&m, "R"));
        assert!(list_for(vec![m], "R", None).is_empty());
    }

    #[test]
    fn test_public_message_visible_to_everyone() {
        let m = msg("Y", "X", "hello X", MessageKind::Message);
        for reader in ["X", "Y", "R", ""] {
            assert!(is_visible(&m, reader), "hidden from {reader:?}");
        }
    }

    #[test]
    fn test_broadcast_status_visible_to_everyone() {
        let m = Message::join_notice("Alice", "00:00:00");
        assert!(is_visible(&m, "Bob"));
        assert!(is_visible(&m, ""));
    }

    #[test]
    fn test_private_broadcast_visible_to_everyone() {
        let m = msg("Y", BROADCAST_TARGET, "to all", MessageKind::PrivateMessage);
        assert!(is_visible(&m, "R"));
    }

    #[test]
    fn test_limit_keeps_last_entries_in_order() {
        let messages = vec![
            msg("A", "Todos", "1", MessageKind::Message),
            msg("A", "B", "hidden", MessageKind::PrivateMessage),
            msg("A", "Todos", "2", MessageKind::Message),
            msg("A", "Todos", "3", MessageKind::Message),
        ];

        let texts: Vec<String> = list_for(messages.clone(), "C", Some(2))
            .into_iter()
            .map(|m| m.text)
            .collect();
        assert_eq!(texts, vec!["2", "3"]);

        // fewer entries than the limit
        assert_eq!(list_for(messages.clone(), "C", Some(10)).len(), 3);
        // zero means no limit
        assert_eq!(list_for(messages, "B", Some(0)).len(), 4);
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(Some("5")), Some(5));
        assert_eq!(parse_limit(Some(" 3 ")), Some(3));
        assert_eq!(parse_limit(Some("0")), None);
        assert_eq!(parse_limit(Some("-1")), None);
        assert_eq!(parse_limit(Some("abc")), None);
        assert_eq!(parse_limit(None), None);
    }
}
