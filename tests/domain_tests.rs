// tests/domain_tests.rs

use std::collections::HashSet;

use holdem_engine::domain::card::{parse_cards, Card, ParseCardError, Rank, Suit};
use holdem_engine::domain::chips::Chips;
use holdem_engine::domain::deck::{Deck, DeckExhausted};
use holdem_engine::domain::table::{ConfigError, TableConfig, TableStakes};
use holdem_engine::infra::DeterministicRng;

use proptest::prelude::*;

//
// КАРТЫ
//

#[test]
fn card_roundtrips_through_display() {
    let c: Card = "Td".parse().unwrap();
    assert_eq!(c, Card::new(Rank::Ten, Suit::Diamonds));
    assert_eq!(c.to_string(), "Td");

    let unicode: Card = "A♠".parse().unwrap();
    assert_eq!(unicode, Card::new(Rank::Ace, Suit::Spades));
}

#[test]
fn bad_card_strings_are_rejected() {
    assert_eq!("1h".parse::<Card>(), Err(ParseCardError::BadRank('1')));
    assert_eq!("Ax".parse::<Card>(), Err(ParseCardError::BadSuit('x')));
    assert!(matches!("10h".parse::<Card>(), Err(ParseCardError::BadLength(_))));
    assert!(parse_cards("Ah Kd zz").is_err());
}

//
// ФИШКИ
//

#[test]
fn chips_arithmetic_saturates() {
    assert_eq!(Chips(10) - Chips(30), Chips::ZERO);
    assert_eq!(Chips(10).signed_diff(Chips(30)), -20);
    assert_eq!(Chips(u64::MAX) + Chips(1), Chips(u64::MAX));
    assert_eq!(Chips(20).to_string(), "$20");
}

//
// КОЛОДА
//

#[test]
fn standard_deck_has_52_unique_cards() {
    let deck = Deck::standard_52();
    assert_eq!(deck.remaining(), 52);

    let unique: HashSet<Card> = deck.remaining_cards().iter().copied().collect();
    assert_eq!(unique.len(), 52);
    assert_eq!(deck.remaining_cards()[0], Card::new(Rank::Two, Suit::Spades));
    assert_eq!(deck.remaining_cards()[51], Card::new(Rank::Ace, Suit::Clubs));
}

#[test]
fn deal_takes_from_the_front() {
    let mut deck = Deck::standard_52();
    let first = deck.deal(3).unwrap();
    assert_eq!(first, parse_cards("2s 3s 4s").unwrap());
    assert_eq!(deck.remaining(), 49);
    assert_eq!(deck.dealt(), first.as_slice());
    assert_eq!(deck.deal_one().unwrap(), "5s".parse().unwrap());
}

#[test]
fn deal_more_than_remaining_fails_without_taking() {
    let mut deck = Deck::standard_52();
    deck.deal(50).unwrap();

    let err = deck.deal(3).unwrap_err();
    assert_eq!(
        err,
        DeckExhausted {
            requested: 3,
            remaining: 2
        }
    );
    assert_eq!(deck.remaining(), 2);

    deck.deal(2).unwrap();
    assert_eq!(deck.remaining(), 0);
    assert!(deck.deal_one().is_err());
}

#[test]
fn top_cards_keep_deck_complete() {
    let top = parse_cards("Ah Kd Ah 2s").unwrap();
    let mut deck = Deck::with_top_cards(&top);
    assert_eq!(deck.remaining(), 52);

    let unique: HashSet<Card> = deck.remaining_cards().iter().copied().collect();
    assert_eq!(unique.len(), 52);
    assert_eq!(deck.deal(3).unwrap(), parse_cards("Ah Kd 2s").unwrap());
    assert_eq!(deck.deal_one().unwrap(), "3s".parse().unwrap());
}

#[test]
fn same_seed_gives_same_shuffle() {
    let a = Deck::shuffled(&mut DeterministicRng::from_seed(7));
    let b = Deck::shuffled(&mut DeterministicRng::from_seed(7));
    let c = Deck::shuffled(&mut DeterministicRng::from_seed(8));
    assert_eq!(a, b);
    assert_ne!(a.remaining_cards(), c.remaining_cards());
}

proptest! {
    /// Любая перетасовка – перестановка канонической колоды.
    #[test]
    fn shuffle_is_a_permutation(seed in any::<u64>()) {
        let mut deck = Deck::shuffled(&mut DeterministicRng::from_seed(seed));

        let mut shuffled = deck.remaining_cards().to_vec();
        let mut canonical = Deck::standard_52().remaining_cards().to_vec();
        shuffled.sort_by_key(|c| (c.suit.index(), c.rank.value()));
        canonical.sort_by_key(|c| (c.suit.index(), c.rank.value()));
        prop_assert_eq!(shuffled, canonical);

        // 2×9 + 5 карт на полный стол всегда хватает.
        prop_assert!(deck.deal(23).is_ok());
        prop_assert_eq!(deck.remaining(), 29);
    }
}

//
// КОНФИГ
//

#[test]
fn default_config_matches_table_defaults() {
    let config = TableConfig::default();
    assert_eq!(config.max_seats, 9);
    assert_eq!(config.stakes, TableStakes::new(Chips(10), Chips(20)));
    assert_eq!(config.buy_in, Chips(1_000));
    assert!(config.validate().is_ok());
}

#[test]
fn config_from_json_fills_missing_fields() {
    let config =
        TableConfig::from_json_str(r#"{"max_seats": 6, "stakes": {"small_blind": 5, "big_blind": 10}}"#)
            .unwrap();
    assert_eq!(config.max_seats, 6);
    assert_eq!(config.stakes.big_blind, Chips(10));
    assert_eq!(config.buy_in, Chips(1_000));
}

#[test]
fn invalid_config_is_rejected() {
    assert!(matches!(
        TableConfig::from_json_str(r#"{"max_seats": 12}"#),
        Err(ConfigError::SeatCount(12))
    ));
    assert!(matches!(
        TableConfig::from_json_str(r#"{"stakes": {"small_blind": 20, "big_blind": 10}}"#),
        Err(ConfigError::Blinds { .. })
    ));
    assert!(matches!(
        TableConfig::from_json_str("{not json"),
        Err(ConfigError::Parse(_))
    ));
}
