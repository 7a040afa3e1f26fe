use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Position of a card in the dealt deck.
pub type CardId = usize;

/// A symbol id together with the glyph the emoji board draws for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub id: &'static str,
    pub glyph: &'static str,
}

const fn symbol(id: &'static str, glyph: &'static str) -> Symbol {
    Symbol { id, glyph }
}

/// Every symbol the game knows, in dealing order. Each difficulty takes a prefix.
pub const SYMBOL_TABLE: [Symbol; 12] = [
    symbol("gamepad", "🎮"),
    symbol("target", "🎯"),
    symbol("palette", "🎨"),
    symbol("masks", "🎭"),
    symbol("circus", "🎪"),
    symbol("guitar", "🎸"),
    symbol("piano", "🎹"),
    symbol("trumpet", "🎺"),
    symbol("violin", "🎻"),
    symbol("clapper", "🎬"),
    symbol("microphone", "🎤"),
    symbol("headphones", "🎧"),
];

pub fn glyph_for(symbol_id: &str) -> Option<&'static str> {
    SYMBOL_TABLE
        .iter()
        .find(|symbol| symbol.id == symbol_id)
        .map(|symbol| symbol.glyph)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn pair_count(self) -> usize {
        match self {
            Difficulty::Easy => 6,
            Difficulty::Medium => 8,
            Difficulty::Hard => 12,
        }
    }

    pub fn card_count(self) -> usize {
        self.pair_count() * 2
    }

    /// The distinct symbols dealt at this difficulty, in table order.
    pub fn symbols(self) -> &'static [Symbol] {
        &SYMBOL_TABLE[..self.pair_count()]
    }

    pub fn columns(self) -> usize {
        match self {
            Difficulty::Easy | Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    pub fn rows(self) -> usize {
        self.card_count().div_ceil(self.columns())
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn mood(self) -> &'static str {
        match self {
            Difficulty::Easy => "😊",
            Difficulty::Medium => "🤔",
            Difficulty::Hard => "😤",
        }
    }

    pub fn summary(self) -> String {
        format!("{} cards ({} pairs)", self.card_count(), self.pair_count())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: CardId,
    pub symbol: &'static str,
    pub face_up: bool,
    pub matched: bool,
}

impl Card {
    /// Whether the board should show this card's symbol.
    pub fn is_revealed(&self) -> bool {
        self.face_up || self.matched
    }
}

/// Deals a face-down deck holding every symbol of `difficulty` twice.
///
/// Uses a Fisher-Yates shuffle, so every arrangement is equally likely.
/// Ids follow the shuffled order.
pub fn deal<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Vec<Card> {
    let mut symbols: Vec<&'static str> = difficulty
        .symbols()
        .iter()
        .flat_map(|symbol| [symbol.id, symbol.id])
        .collect();
    symbols.shuffle(rng);

    symbols
        .into_iter()
        .enumerate()
        .map(|(id, symbol)| Card {
            id,
            symbol,
            face_up: false,
            matched: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn deck_holds_each_symbol_twice() {
        let mut rng = StdRng::seed_from_u64(7);
        for difficulty in Difficulty::ALL {
            let deck = deal(difficulty, &mut rng);
            assert_eq!(deck.len(), 2 * difficulty.pair_count());

            let mut counts: HashMap<&str, usize> = HashMap::new();
            for card in &deck {
                *counts.entry(card.symbol).or_default() += 1;
            }
            assert_eq!(counts.len(), difficulty.pair_count());
            assert!(counts.values().all(|&count| count == 2));
        }
    }

    #[test]
    fn dealt_cards_start_hidden_with_sequential_ids() {
        let deck = deal(Difficulty::Hard, &mut StdRng::seed_from_u64(3));
        for (position, card) in deck.iter().enumerate() {
            assert_eq!(card.id, position);
            assert!(!card.face_up);
            assert!(!card.matched);
        }
    }

    #[test]
    fn same_seed_deals_same_deck() {
        let a = deal(Difficulty::Medium, &mut StdRng::seed_from_u64(99));
        let b = deal(Difficulty::Medium, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn grid_fits_every_card() {
        assert_eq!((Difficulty::Easy.columns(), Difficulty::Easy.rows()), (4, 3));
        assert_eq!((Difficulty::Medium.columns(), Difficulty::Medium.rows()), (4, 4));
        assert_eq!((Difficulty::Hard.columns(), Difficulty::Hard.rows()), (6, 4));
    }

    #[test]
    fn symbol_sets_are_distinct_prefixes() {
        assert_eq!(Difficulty::Easy.symbols().len(), 6);
        assert_eq!(Difficulty::Medium.symbols().len(), 8);
        assert_eq!(Difficulty::Hard.symbols().len(), 12);
        assert_eq!(&Difficulty::Medium.symbols()[..6], Difficulty::Easy.symbols());
        assert_eq!(glyph_for("violin"), Some("🎻"));
        assert_eq!(glyph_for("kazoo"), None);
    }

    #[test]
    fn summary_reads_like_the_menu() {
        assert_eq!(Difficulty::Easy.summary(), "12 cards (6 pairs)");
        assert_eq!(Difficulty::Hard.summary(), "24 cards (12 pairs)");
    }
}
