//! Review-mode session journeys
//!
//! Complete user workflows over a realistic collection: draining the whole
//! queue, restricting to a subdeck, resetting cards mid-session, sibling
//! burying, and text edits.

use recite_core::prelude::*;
use recite_e2e_tests::harness::SessionBuilder;
use recite_e2e_tests::mocks::DeckFactory;

#[tokio::test]
async fn test_full_session_drains_queue() {
    let (bank, tree) = DeckFactory::language_collection();
    let mut session = SessionBuilder::review().build(bank, tree).unwrap();

    let root = TopicPath::root();
    let before = session.get_deck_stats(&root).unwrap();
    assert_eq!(before.total_count, 6);
    assert_eq!(before.new_count, 3);
    assert_eq!(before.due_count, 3);
    assert_eq!(before.cards_in_queue_count, 6);

    let mut reviews = 0;
    while session.has_current_card() {
        session.process_review(ReviewResponse::Good).await.unwrap();
        reviews += 1;
    }
    assert_eq!(reviews, 6);

    let after = session.get_deck_stats(&root).unwrap();
    assert_eq!(after.cards_in_queue_count, 0);
    assert_eq!(after.total_count, 6);
    assert_eq!(session.store().schedule_writes.len(), 6);
    // 3 due cards rebucketed, 3 new cards added: 6 tracked schedules
    assert_eq!(session.histogram().total(), 6);
}

#[tokio::test]
async fn test_subdeck_restriction_leaves_rest_untouched() {
    let (bank, tree) = DeckFactory::language_collection();
    let mut session = SessionBuilder::review().build(bank, tree).unwrap();

    let spanish = TopicPath::from("language/spanish");
    session.set_current_deck(&spanish).unwrap();

    let mut reviews = 0;
    while session.has_current_card() {
        assert_eq!(
            session.current_deck().unwrap().topic_path,
            spanish,
            "restricted session surfaced a card outside the subdeck"
        );
        session.process_review(ReviewResponse::Good).await.unwrap();
        reviews += 1;
    }
    assert_eq!(reviews, 3);

    // french and math still queued
    assert_eq!(session.remaining_deck().total_card_count(true), 3);
    let stats = session.get_deck_stats(&spanish).unwrap();
    assert_eq!(stats.cards_in_queue_count, 0);
}

#[tokio::test]
async fn test_reset_requeues_and_session_still_finishes() {
    let (bank, tree) = DeckFactory::language_collection();
    let mut session = SessionBuilder::review().build(bank, tree).unwrap();

    // First card is the first "ser vs estar" sibling, brand new
    let first = session.current_card().unwrap().clone();
    assert!(!first.has_schedule());

    session.process_review(ReviewResponse::Reset).await.unwrap();
    // Resetting a new card persists nothing; the card went to the back
    assert!(session.store().schedule_writes.is_empty());
    assert_eq!(session.remaining_deck().total_card_count(true), 6);
    let current = session.current_card().unwrap();
    assert!(!current.same_identity(&first));

    let mut reviews = 0;
    while session.has_current_card() {
        session.process_review(ReviewResponse::Good).await.unwrap();
        reviews += 1;
    }
    // The reset card came around again at the end
    assert_eq!(reviews, 6);
    assert_eq!(session.store().schedule_writes.len(), 6);
}

#[tokio::test]
async fn test_sibling_burying_across_a_session() {
    let (bank, tree) = DeckFactory::language_collection();
    let mut session = SessionBuilder::review()
        .bury_siblings(true)
        .build(bank, tree)
        .unwrap();

    // First review hits the two-card "ser vs estar" question
    session.process_review(ReviewResponse::Good).await.unwrap();
    assert_eq!(session.postponement_list().len(), 1);
    assert_eq!(session.store().postponement_writes.len(), 1);
    // Both siblings left the queue after one review
    assert_eq!(session.remaining_deck().total_card_count(true), 4);

    // Every remaining question is single-card; the list stays put
    while session.has_current_card() {
        session.process_review(ReviewResponse::Good).await.unwrap();
    }
    assert_eq!(session.postponement_list().len(), 1);
    assert_eq!(session.store().postponement_writes.len(), 1);
}

#[tokio::test]
async fn test_due_first_order_surfaces_scheduled_card() {
    let (bank, tree) = DeckFactory::language_collection();
    let session = SessionBuilder::review()
        .card_order(CardOrder::DueFirst)
        .build(bank, tree)
        .unwrap();

    // spanish holds both queues; its due card wins under DueFirst
    let first = session.current_card().unwrap();
    assert!(first.has_schedule());
    assert_eq!(session.current_question().unwrap().text, "por vs para");
}

#[tokio::test]
async fn test_text_edit_mid_session() {
    let (bank, tree) = DeckFactory::language_collection();
    let mut session = SessionBuilder::review().build(bank, tree).unwrap();

    session
        .update_current_question_text("ser vs estar (with examples)")
        .await
        .unwrap();
    assert_eq!(session.store().text_writes.len(), 1);
    assert_eq!(
        session.current_question().unwrap().text,
        "ser vs estar (with examples)"
    );

    // Editing does not touch the queue
    assert_eq!(session.remaining_deck().total_card_count(true), 6);
    session.process_review(ReviewResponse::Good).await.unwrap();
    assert!(session.has_current_card());
}

#[tokio::test]
async fn test_overdue_card_rebuckets_cleanly() {
    let (bank, tree) = DeckFactory::language_collection();
    let mut session = SessionBuilder::review().build(bank, tree).unwrap();

    // The overdue integral card sits in the -2 bucket
    assert_eq!(session.histogram().get(-2), 1);

    while session.has_current_card() {
        session.process_review(ReviewResponse::Good).await.unwrap();
    }
    // All negative buckets cleared once everything is rescheduled
    assert_eq!(session.histogram().get(-2), 0);
    assert!(session.histogram().iter().all(|(offset, _)| offset > 0));
}
