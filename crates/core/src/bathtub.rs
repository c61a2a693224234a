//! Bathtub Solitaire.
//!
//! Cards are drawn one at a time onto the front of a hand window. Whenever
//! the window holds at least four cards the front card is compared with the
//! fourth:
//!
//! - same rank: the front four cards are discarded;
//! - same suit: the two cards between them are discarded;
//! - otherwise the hand stalls and one more card is drawn.
//!
//! The trial ends once the deck is exhausted. An empty hand is a win.

use crate::{Card, Deck, EngineError, RandomSource, TrialEngine};
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Smallest hand on which the discard rules are evaluated.
pub const RESOLVE_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiscardRule {
    MatchRank,
    MatchSuit,
}

/// Rank is checked before suit. Two distinct cards never match on both.
pub fn discard_rule(front: Card, fourth: Card) -> Option<DiscardRule> {
    if front.rank == fourth.rank {
        Some(DiscardRule::MatchRank)
    } else if front.suit == fourth.suit {
        Some(DiscardRule::MatchSuit)
    } else {
        None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub hand: Vec<Card>,
    pub deck_len: usize,
    pub discarded: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum BathtubAction {
    Drew(Card),
    DroppedFour([Card; 4]),
    DroppedMiddle([Card; 2]),
    Stalled,
    Finished,
}

/// An action together with the table state right after it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BathtubEvent {
    pub action: BathtubAction,
    pub state: Snapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BathtubResult {
    pub cards_left: usize,
    pub final_hand: Vec<Card>,
}

impl BathtubResult {
    pub fn is_win(&self) -> bool {
        self.cards_left == 0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BathtubEngine;

impl BathtubEngine {
    pub fn new() -> Self {
        Self
    }

    /// Plays an already ordered deck.
    pub fn play_deck(&self, deck: Deck) -> Result<BathtubResult, EngineError> {
        play(deck, None)
    }

    pub fn play_deck_traced(
        &self,
        deck: Deck,
        events: &mut Vec<BathtubEvent>,
    ) -> Result<BathtubResult, EngineError> {
        play(deck, Some(events))
    }

    pub fn run_trial_traced<R: RandomSource>(
        &self,
        rng: &mut R,
        events: &mut Vec<BathtubEvent>,
    ) -> Result<BathtubResult, EngineError> {
        self.play_deck_traced(shuffled_deck(rng), events)
    }
}

impl TrialEngine for BathtubEngine {
    type Outcome = BathtubResult;

    fn run_trial<R: RandomSource>(&self, rng: &mut R) -> Result<BathtubResult, EngineError> {
        self.play_deck(shuffled_deck(rng))
    }
}

fn shuffled_deck<R: RandomSource>(rng: &mut R) -> Deck {
    let mut deck = Deck::standard52();
    deck.shuffle(rng);
    deck
}

#[derive(Debug)]
struct Table {
    deck: Deck,
    hand: VecDeque<Card>,
    discarded: usize,
    initial: usize,
}

impl Table {
    fn new(deck: Deck) -> Self {
        let initial = deck.len();
        Self {
            hand: VecDeque::with_capacity(initial),
            deck,
            discarded: 0,
            initial,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            hand: self.hand.iter().copied().collect(),
            deck_len: self.deck.len(),
            discarded: self.discarded,
        }
    }

    fn draw(&mut self) -> Option<Card> {
        let card = self.deck.draw_card()?;
        self.hand.push_front(card);
        Some(card)
    }

    /// Applies the first matching rule to the window, if any.
    fn resolve_once(&mut self) -> Option<BathtubAction> {
        if self.hand.len() < RESOLVE_SIZE {
            return None;
        }
        match discard_rule(self.hand[0], self.hand[3])? {
            DiscardRule::MatchRank => {
                let cards = [self.hand[0], self.hand[1], self.hand[2], self.hand[3]];
                self.hand.drain(..4);
                self.discarded += 4;
                Some(BathtubAction::DroppedFour(cards))
            }
            DiscardRule::MatchSuit => {
                let cards = [self.hand[1], self.hand[2]];
                self.hand.drain(1..3);
                self.discarded += 2;
                Some(BathtubAction::DroppedMiddle(cards))
            }
        }
    }

    fn check_finished(&self) -> Result<(), EngineError> {
        if !self.deck.is_empty() {
            return Err(EngineError::Invariant(format!(
                "trial ended with {} cards still in the deck",
                self.deck.len()
            )));
        }
        let accounted = self.deck.len() + self.hand.len() + self.discarded;
        if accounted != self.initial {
            return Err(EngineError::Invariant(format!(
                "card count drifted: {accounted} accounted for, {} dealt",
                self.initial
            )));
        }
        Ok(())
    }
}

fn record(events: &mut Option<&mut Vec<BathtubEvent>>, table: &Table, action: BathtubAction) {
    if let Some(events) = events.as_deref_mut() {
        events.push(BathtubEvent {
            action,
            state: table.snapshot(),
        });
    }
}

fn play(
    deck: Deck,
    mut events: Option<&mut Vec<BathtubEvent>>,
) -> Result<BathtubResult, EngineError> {
    let mut table = Table::new(deck);
    let mut draw_extra = false;

    while !table.deck.is_empty() {
        // After a stall exactly one extra card is drawn, even on a full window.
        while table.hand.len() < RESOLVE_SIZE || draw_extra {
            let Some(card) = table.draw() else {
                break;
            };
            draw_extra = false;
            record(&mut events, &table, BathtubAction::Drew(card));
        }

        while table.hand.len() >= RESOLVE_SIZE {
            match table.resolve_once() {
                Some(action) => {
                    trace!("bathtub: {action:?}");
                    record(&mut events, &table, action);
                }
                None => {
                    record(&mut events, &table, BathtubAction::Stalled);
                    break;
                }
            }
        }
        draw_extra = true;
    }

    table.check_finished()?;
    record(&mut events, &table, BathtubAction::Finished);
    Ok(BathtubResult {
        cards_left: table.hand.len(),
        final_hand: table.hand.into_iter().collect(),
    })
}
