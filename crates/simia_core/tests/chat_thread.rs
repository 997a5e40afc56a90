use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use simia_core::chat::{day_heading, ChatError, ChatThread, REACTIONS};
use simia_core::model::chat::DeliveryStatus;

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn send_trims_text_and_rejects_blank_messages() {
    let mut thread = ChatThread::new("1", "2");
    let id = thread.send("  Morning team  ", at(2024, 12, 1, 8)).unwrap();
    let message = thread.message(&id).unwrap();
    assert_eq!(message.text, "Morning team");
    assert_eq!(message.sender_id, "1");
    assert_eq!(message.status, DeliveryStatus::Sending);

    assert_eq!(
        thread.send(" \n ", at(2024, 12, 1, 8)).unwrap_err(),
        ChatError::BlankMessage
    );
    assert_eq!(thread.messages().len(), 1);
}

#[test]
fn delivery_status_only_moves_forward() {
    let mut thread = ChatThread::new("1", "2");
    let id = thread.send("Quote sent", at(2024, 12, 1, 9)).unwrap();
    assert_eq!(thread.advance(&id).unwrap(), DeliveryStatus::Delivered);
    assert_eq!(thread.advance(&id).unwrap(), DeliveryStatus::Read);
    assert_eq!(thread.advance(&id).unwrap(), DeliveryStatus::Read);
    assert_eq!(
        thread.advance("m-99").unwrap_err(),
        ChatError::MessageNotFound("m-99".to_string())
    );
}

#[test]
fn simulated_reply_quotes_original_and_marks_it_read() {
    let mut thread = ChatThread::new("1", "3");
    let original = thread.send("Can you call Acme?", at(2024, 12, 1, 10)).unwrap();
    let reply = thread.simulate_reply(&original, at(2024, 12, 1, 11)).unwrap();

    assert_ne!(original, reply);
    assert_eq!(thread.message(&original).unwrap().status, DeliveryStatus::Read);
    let reply = thread.message(&reply).unwrap();
    assert_eq!(reply.text, "Reply to: Can you call Acme?");
    assert_eq!(reply.sender_id, "3");
}

#[test]
fn reactions_toggle_per_user() {
    let mut thread = ChatThread::new("1", "2");
    let id = thread.send("Renewal approved", at(2024, 12, 1, 12)).unwrap();
    let thumbs = REACTIONS[0];

    thread.toggle_reaction(&id, thumbs, "1").unwrap();
    thread.toggle_reaction(&id, thumbs, "2").unwrap();
    assert_eq!(thread.message(&id).unwrap().reaction_count(thumbs), 2);

    thread.toggle_reaction(&id, thumbs, "1").unwrap();
    thread.toggle_reaction(&id, thumbs, "2").unwrap();
    let message = thread.message(&id).unwrap();
    assert_eq!(message.reaction_count(thumbs), 0);
    assert!(message.reactions.is_empty());

    assert!(thread.toggle_reaction("missing", thumbs, "1").is_err());
}

#[test]
fn messages_group_by_day_with_relative_headings() {
    let mut thread = ChatThread::new("1", "2");
    thread.send("today late", at(2024, 12, 1, 15)).unwrap();
    thread.send("long ago", at(2024, 3, 5, 9)).unwrap();
    thread.send("yesterday", at(2024, 11, 30, 9)).unwrap();
    thread.send("today early", at(2024, 12, 1, 8)).unwrap();

    let groups = thread.grouped_by_day(day(2024, 12, 1));
    let headings: Vec<&str> = groups.iter().map(|group| group.heading.as_str()).collect();
    assert_eq!(headings, vec!["March 5, 2024", "Yesterday", "Today"]);

    let today: Vec<&str> = groups[2]
        .messages
        .iter()
        .map(|message| message.text.as_str())
        .collect();
    assert_eq!(today, vec!["today early", "today late"]);

    assert_eq!(day_heading(day(2024, 1, 1), day(2024, 1, 2)), "Yesterday");
    assert_eq!(day_heading(day(2023, 12, 31), day(2024, 1, 2)), "December 31, 2023");
}
