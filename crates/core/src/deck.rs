use crate::{Card, RandomSource, Rank, Suit};

pub const DECK_SIZE: usize = 52;

/// Ordered draw pile. Cards are drawn from the end.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Deck {
    pub draw: Vec<Card>,
}

impl Deck {
    pub fn standard52() -> Self {
        let mut draw = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                draw.push(Card::new(suit, rank));
            }
        }
        Self { draw }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { draw: cards }
    }

    pub fn shuffle<R: RandomSource>(&mut self, rng: &mut R) {
        rng.shuffle(&mut self.draw);
    }

    pub fn draw_card(&mut self) -> Option<Card> {
        self.draw.pop()
    }

    pub fn len(&self) -> usize {
        self.draw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty()
    }
}
