//! Cram-mode session journeys
//!
//! Cram sessions drill the queue without touching schedules: nothing is
//! persisted, the histogram stays frozen, and cards repeat until the user
//! marks them Easy.

use recite_core::prelude::*;
use recite_e2e_tests::harness::SessionBuilder;
use recite_e2e_tests::mocks::DeckFactory;

#[tokio::test]
async fn test_cram_drills_until_easy() {
    let (bank, tree) = DeckFactory::language_collection();
    let mut session = SessionBuilder::cram().build(bank, tree).unwrap();

    // Miss every card once before getting it: Hard requeues, Easy retires
    let mut responses = 0;
    while session.has_current_card() {
        let response = if responses % 2 == 0 {
            ReviewResponse::Hard
        } else {
            ReviewResponse::Easy
        };
        session.process_review(response).await.unwrap();
        responses += 1;
    }
    // Every second response retires a card: 6 Easy + 6 Hard
    assert_eq!(responses, 12);
    assert_eq!(session.remaining_deck().total_card_count(true), 0);
}

#[tokio::test]
async fn test_cram_persists_nothing() {
    let (bank, tree) = DeckFactory::language_collection();
    let mut session = SessionBuilder::cram().build(bank, tree).unwrap();
    let histogram_before = session.histogram().clone();

    while session.has_current_card() {
        session.process_review(ReviewResponse::Easy).await.unwrap();
    }
    assert!(session.store().schedule_writes.is_empty());
    assert!(session.store().postponement_writes.is_empty());
    assert_eq!(session.histogram(), &histogram_before);
}

#[tokio::test]
async fn test_cram_leaves_schedules_untouched() {
    let (bank, tree) = DeckFactory::language_collection();
    let mut session = SessionBuilder::cram().build(bank, tree).unwrap();

    let math = TopicPath::from("math");
    session.set_current_deck(&math).unwrap();

    let intervals = |session: &ReviewSequencer<_>| -> Vec<u32> {
        session
            .remaining_deck()
            .find(&math)
            .unwrap()
            .due_cards
            .iter()
            .filter_map(|c| c.schedule.map(|s| s.interval))
            .collect()
    };
    assert_eq!(intervals(&session), vec![7, 4]);

    // One full lap over the deck; requeueing alternates the two cards
    session.process_review(ReviewResponse::Good).await.unwrap();
    session.process_review(ReviewResponse::Good).await.unwrap();

    assert_eq!(intervals(&session), vec![7, 4]);
    assert!(session.store().schedule_writes.is_empty());
    assert_eq!(session.remaining_deck().total_card_count(true), 6);
}

#[tokio::test]
async fn test_cram_ignores_sibling_burying() {
    let (bank, tree, question) = DeckFactory::sibling_deck(2);
    let mut session = SessionBuilder::cram()
        .bury_siblings(true)
        .build(bank, tree)
        .unwrap();

    session.process_review(ReviewResponse::Easy).await.unwrap();
    // Only the reviewed card retired; its sibling stays in the queue
    assert_eq!(session.remaining_deck().question_card_count(question, true), 1);
    assert!(session.postponement_list().is_empty());
}
