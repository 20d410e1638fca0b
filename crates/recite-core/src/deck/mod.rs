//! Deck module - Hierarchical topic tree
//!
//! A deck is a named node in a topic hierarchy owning cards (partitioned
//! into new and due queues) and child decks. Two parallel trees exist per
//! review session: an immutable *original* snapshot used for total counts,
//! and a mutable *remaining* work queue that shrinks as cards are processed.
//! Both share the same set of topic paths; decks are never removed during a
//! session, only cards, so paths stay stable.

mod iterator;

pub use iterator::{CardOrder, DeckTreeIterator};

use serde::{Deserialize, Serialize};

use crate::card::{Card, CardListType, QuestionId};

// ============================================================================
// TOPIC PATHS
// ============================================================================

/// Hierarchical address of a deck within a tree, e.g. `language/spanish`.
///
/// The root deck has the empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicPath(Vec<String>);

impl TopicPath {
    /// The root path (empty)
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build from owned segments
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Whether this is the root path
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path segments, outermost first
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Final segment, or empty string for the root
    pub fn name(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or("")
    }

    /// Child path extending this one by a segment
    pub fn join(&self, name: &str) -> TopicPath {
        let mut segments = self.0.clone();
        segments.push(name.to_string());
        Self(segments)
    }
}

impl std::fmt::Display for TopicPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl From<&str> for TopicPath {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            return Self::root();
        }
        Self(s.split('/').map(str::to_string).collect())
    }
}

// ============================================================================
// DECKS
// ============================================================================

/// A node in the topic hierarchy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    /// Full topic path of this deck
    pub topic_path: TopicPath,
    /// Cards awaiting their first review
    pub new_cards: Vec<Card>,
    /// Cards with a schedule, queued for this session
    pub due_cards: Vec<Card>,
    /// Child decks
    pub children: Vec<Deck>,
}

impl Deck {
    /// Create an empty root deck
    pub fn root() -> Self {
        Self::new(TopicPath::root())
    }

    /// Create an empty deck at a topic path
    pub fn new(topic_path: TopicPath) -> Self {
        Self {
            topic_path,
            new_cards: Vec::new(),
            due_cards: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Final path segment naming this deck
    pub fn name(&self) -> &str {
        self.topic_path.name()
    }

    /// Walk to the child at `rel` (segments relative to this deck), creating
    /// missing decks along the way. Used when building trees.
    pub fn get_or_create(&mut self, rel: &[&str]) -> &mut Deck {
        let mut deck = self;
        for name in rel {
            let idx = match deck.children.iter().position(|c| c.name() == *name) {
                Some(idx) => idx,
                None => {
                    let path = deck.topic_path.join(name);
                    deck.children.push(Deck::new(path));
                    deck.children.len() - 1
                }
            };
            deck = &mut deck.children[idx];
        }
        deck
    }

    /// Find the deck at an absolute topic path, starting from this deck.
    ///
    /// Returns `None` if the path does not lie under this deck.
    pub fn find(&self, path: &TopicPath) -> Option<&Deck> {
        let rel = path.segments().strip_prefix(self.topic_path.segments())?;
        self.find_rel(rel)
    }

    /// Mutable variant of [`Deck::find`]
    pub fn find_mut(&mut self, path: &TopicPath) -> Option<&mut Deck> {
        let rel = path
            .segments()
            .strip_prefix(self.topic_path.segments())?
            .to_vec();
        self.find_rel_mut(&rel)
    }

    fn find_rel(&self, rel: &[String]) -> Option<&Deck> {
        match rel.split_first() {
            None => Some(self),
            Some((name, rest)) => self
                .children
                .iter()
                .find(|c| c.name() == name)?
                .find_rel(rest),
        }
    }

    fn find_rel_mut(&mut self, rel: &[String]) -> Option<&mut Deck> {
        match rel.split_first() {
            None => Some(self),
            Some((name, rest)) => self
                .children
                .iter_mut()
                .find(|c| c.name() == name)?
                .find_rel_mut(rest),
        }
    }

    /// Preorder list of every topic path in this subtree, self first
    pub fn topic_paths(&self) -> Vec<TopicPath> {
        let mut out = Vec::new();
        self.collect_paths(&mut out);
        out
    }

    fn collect_paths(&self, out: &mut Vec<TopicPath>) {
        out.push(self.topic_path.clone());
        for child in &self.children {
            child.collect_paths(out);
        }
    }

    // ========================================================================
    // CARD ACCESS
    // ========================================================================

    /// The queue for a list type
    pub fn card_list(&self, list: CardListType) -> &Vec<Card> {
        match list {
            CardListType::New => &self.new_cards,
            CardListType::Due => &self.due_cards,
        }
    }

    /// Mutable queue access
    pub fn card_list_mut(&mut self, list: CardListType) -> &mut Vec<Card> {
        match list {
            CardListType::New => &mut self.new_cards,
            CardListType::Due => &mut self.due_cards,
        }
    }

    /// Append a card to the queue matching its schedule state
    pub fn append_card(&mut self, card: Card) {
        let list = card.list_type();
        self.card_list_mut(list).push(card);
    }

    /// Count cards of one list type, optionally recursing into subdecks
    pub fn card_count(&self, list: CardListType, include_subdecks: bool) -> usize {
        let mut count = self.card_list(list).len();
        if include_subdecks {
            for child in &self.children {
                count += child.card_count(list, true);
            }
        }
        count
    }

    /// Count all cards (new + due), optionally recursing
    pub fn total_card_count(&self, include_subdecks: bool) -> usize {
        self.card_count(CardListType::New, include_subdecks)
            + self.card_count(CardListType::Due, include_subdecks)
    }

    /// Whether this deck itself (not subdecks) still has queued cards
    pub fn has_queued_cards(&self) -> bool {
        !self.new_cards.is_empty() || !self.due_cards.is_empty()
    }

    /// Count this deck's cards belonging to a question, optionally recursing
    pub fn question_card_count(&self, question: QuestionId, include_subdecks: bool) -> usize {
        let mut count = self
            .new_cards
            .iter()
            .chain(self.due_cards.iter())
            .filter(|c| c.question == question)
            .count();
        if include_subdecks {
            for child in &self.children {
                count += child.question_card_count(question, true);
            }
        }
        count
    }

    /// Clone every card of a question in this subtree into `out`
    pub fn collect_question_cards(&self, question: QuestionId, out: &mut Vec<Card>) {
        for card in self.new_cards.iter().chain(self.due_cards.iter()) {
            if card.question == question {
                out.push(card.clone());
            }
        }
        for child in &self.children {
            child.collect_question_cards(question, out);
        }
    }

    // ========================================================================
    // CARD REMOVAL
    // ========================================================================

    /// Remove one card identity from this whole subtree.
    ///
    /// Returns the number of copies removed.
    pub fn remove_card(&mut self, question: QuestionId, card_index: usize) -> usize {
        let mut removed = 0;
        for list in [CardListType::New, CardListType::Due] {
            let cards = self.card_list_mut(list);
            let before = cards.len();
            cards.retain(|c| !(c.question == question && c.card_index == card_index));
            removed += before - cards.len();
        }
        for child in &mut self.children {
            removed += child.remove_card(question, card_index);
        }
        removed
    }

    /// Remove every card of a question from this whole subtree.
    ///
    /// Returns the number of cards removed.
    pub fn remove_question(&mut self, question: QuestionId) -> usize {
        let mut removed = 0;
        for list in [CardListType::New, CardListType::Due] {
            let cards = self.card_list_mut(list);
            let before = cards.len();
            cards.retain(|c| c.question != question);
            removed += before - cards.len();
        }
        for child in &mut self.children {
            removed += child.remove_question(question);
        }
        removed
    }

    // ========================================================================
    // QUEUE SCANS
    // ========================================================================

    /// Descendant decks (any depth) that still have at least one new or due
    /// card at their own level, counted non-recursively per node.
    ///
    /// Depth-first; within each branch descendants appear before their
    /// ancestor. This deck itself is never included.
    pub fn sub_decks_with_cards_in_queue(&self) -> Vec<&Deck> {
        let mut out = Vec::new();
        for child in &self.children {
            child.collect_decks_in_queue(&mut out);
        }
        out
    }

    fn collect_decks_in_queue<'a>(&'a self, out: &mut Vec<&'a Deck>) {
        for child in &self.children {
            child.collect_decks_in_queue(out);
        }
        if self.has_queued_cards() {
            out.push(self);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
