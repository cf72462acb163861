use std::cmp::Ordering;

use crate::domain::hand::{EvaluatedHand, HandCategory};

impl EvaluatedHand {
    pub fn new(category: HandCategory, tie_breakers: Vec<u8>) -> Self {
        Self {
            category,
            tie_breakers,
        }
    }
}

/// Полный порядок над руками: сначала категория, потом тай-брейкеры по порядку.
/// `Equal` означает точный сплит.
pub fn compare_hands(a: &EvaluatedHand, b: &EvaluatedHand) -> Ordering {
    a.category
        .cmp(&b.category)
        .then_with(|| a.tie_breakers.cmp(&b.tie_breakers))
}

/// Человеческое описание руки по категории.
pub fn describe_hand(hand: &EvaluatedHand) -> String {
    let name = match hand.category {
        HandCategory::HighCard => "High card",
        HandCategory::Pair => "Pair",
        HandCategory::TwoPair => "Two pair",
        HandCategory::ThreeOfAKind => "Three of a kind",
        HandCategory::Straight => "Straight",
        HandCategory::Flush => "Flush",
        HandCategory::FullHouse => "Full house",
        HandCategory::FourOfAKind => "Four of a kind",
        HandCategory::StraightFlush => "Straight flush",
        HandCategory::RoyalFlush => return "Royal flush".to_string(),
    };
    match hand.tie_breakers.first() {
        Some(&top) => format!("{name} ({})", rank_label(top)),
        None => name.to_string(),
    }
}

fn rank_label(value: u8) -> String {
    match value {
        11 => "J".to_string(),
        12 => "Q".to_string(),
        13 => "K".to_string(),
        14 => "A".to_string(),
        v => v.to_string(),
    }
}
