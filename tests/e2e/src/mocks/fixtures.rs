//! Test Deck Factory
//!
//! Provides utilities for generating realistic review collections:
//! - Deck trees with mixed new and due cards
//! - Multi-card questions for sibling-burying scenarios
//! - Pre-built collections for common journey tests

use chrono::{DateTime, Duration, TimeZone, Utc};
use recite_core::{Card, Deck, QuestionBank, QuestionId, ScheduleInfo};

/// Fixed session date shared by all journey tests
pub fn today() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
}

/// Factory for creating test deck trees
///
/// # Example
///
/// ```rust,ignore
/// let (bank, tree) = DeckFactory::language_collection();
/// let stats = DeckStats::compute(&tree, &tree.clone());
/// ```
pub struct DeckFactory;

impl DeckFactory {
    /// A small realistic collection:
    ///
    /// ```text
    /// language/spanish  - "ser vs estar" (2 new sibling cards),
    ///                     "por vs para" (due in 3 days)
    /// language/french   - "avoir conjugation" (1 new card)
    /// math              - "derivative of sin x" (due in 7 days),
    ///                     "integral of 1/x" (2 days overdue)
    /// ```
    ///
    /// 6 cards total: 3 new, 3 due.
    pub fn language_collection() -> (QuestionBank, Deck) {
        let mut bank = QuestionBank::new();
        let mut tree = Deck::root();

        let spanish_note = bank.add_note("notes/spanish.md");
        let spanish = tree.get_or_create(&["language", "spanish"]);
        let ser = bank.add_question(spanish_note, "ser vs estar");
        spanish.append_card(Card::new(ser, 0));
        spanish.append_card(Card::new(ser, 1));
        let por = bank.add_question(spanish_note, "por vs para");
        spanish.append_card(Card::with_schedule(
            por,
            0,
            ScheduleInfo::from_interval(today(), 3),
        ));

        let french_note = bank.add_note("notes/french.md");
        let avoir = bank.add_question(french_note, "avoir conjugation");
        tree.get_or_create(&["language", "french"])
            .append_card(Card::new(avoir, 0));

        let math_note = bank.add_note("notes/math.md");
        let math = tree.get_or_create(&["math"]);
        let derivative = bank.add_question(math_note, "derivative of sin x");
        math.append_card(Card::with_schedule(
            derivative,
            0,
            ScheduleInfo::from_interval(today(), 7),
        ));
        let integral = bank.add_question(math_note, "integral of 1/x");
        math.append_card(Card::with_schedule(
            integral,
            0,
            ScheduleInfo::new(today() - Duration::days(2), 4),
        ));

        (bank, tree)
    }

    /// Single deck holding one question with `cards` sibling cards, all new
    pub fn sibling_deck(cards: usize) -> (QuestionBank, Deck, QuestionId) {
        let mut bank = QuestionBank::new();
        let note = bank.add_note("notes/siblings.md");
        let question = bank.add_question(note, "question with siblings");
        let mut tree = Deck::root();
        let deck = tree.get_or_create(&["topic"]);
        for i in 0..cards {
            deck.append_card(Card::new(question, i));
        }
        (bank, tree, question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recite_core::CardListType;

    #[test]
    fn test_language_collection_shape() {
        let (bank, tree) = DeckFactory::language_collection();
        assert_eq!(bank.question_count(), 5);
        assert_eq!(tree.total_card_count(true), 6);
        assert_eq!(tree.card_count(CardListType::New, true), 3);
        assert_eq!(tree.card_count(CardListType::Due, true), 3);
    }

    #[test]
    fn test_sibling_deck_shares_one_question() {
        let (_bank, tree, question) = DeckFactory::sibling_deck(3);
        assert_eq!(tree.question_card_count(question, true), 3);
    }
}
