// tests/eval_tests.rs

use std::cmp::Ordering;

use holdem_engine::domain::card::{parse_cards, Card, Rank, Suit};
use holdem_engine::domain::hand::HandCategory;
use holdem_engine::eval::{compare_hands, describe_hand, evaluate, evaluate_best_hand};

use proptest::prelude::*;

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).expect("валидная строка карт")
}

fn eval(s: &str) -> holdem_engine::domain::hand::EvaluatedHand {
    evaluate(&cards(s))
}

//
// КАТЕГОРИИ
//

#[test]
fn detects_every_category() {
    let table = [
        ("2s 7d 9c Jh As", HandCategory::HighCard),
        ("2s 2d 9c Jh As", HandCategory::Pair),
        ("2s 2d 9c 9h As", HandCategory::TwoPair),
        ("2s 2d 2c Jh As", HandCategory::ThreeOfAKind),
        ("5s 6d 7c 8h 9s", HandCategory::Straight),
        ("2h 7h 9h Jh Ah", HandCategory::Flush),
        ("2s 2d 2c Jh Js", HandCategory::FullHouse),
        ("2s 2d 2c 2h As", HandCategory::FourOfAKind),
        ("5s 6s 7s 8s 9s", HandCategory::StraightFlush),
        ("Ts Js Qs Ks As", HandCategory::RoyalFlush),
    ];

    for (hand, expected) in table {
        assert_eq!(eval(hand).category, expected, "рука {hand}");
    }
}

/// A-2-3-4-5 разных мастей – стрит с тай-брейкером 5, а не 14.
#[test]
fn wheel_is_five_high_straight() {
    let wheel = eval("As 2d 3c 4h 5s");
    assert_eq!(wheel.category, HandCategory::Straight);
    assert_eq!(wheel.tie_breakers, vec![5]);

    let six_high = eval("2d 3c 4h 5s 6d");
    assert_eq!(compare_hands(&six_high, &wheel), Ordering::Greater);
}

#[test]
fn steel_wheel_is_straight_flush_not_royal() {
    let h = eval("Ah 2h 3h 4h 5h");
    assert_eq!(h.category, HandCategory::StraightFlush);
    assert_eq!(h.tie_breakers, vec![5]);
}

#[test]
fn royal_flush_beats_king_high_straight_flush() {
    let royal = eval("Ts Js Qs Ks As");
    let king_high = eval("9h Th Jh Qh Kh");
    assert_eq!(compare_hands(&royal, &king_high), Ordering::Greater);
}

/// Стрит-флеш ищется только внутри флешевой масти: стрит + флеш разных карт – просто флеш.
#[test]
fn straight_and_flush_from_different_cards_is_flush() {
    let h = evaluate_best_hand(&cards("6d 2h"), &cards("3h 4h 5c 7h Kh"));
    assert_eq!(h.category, HandCategory::Flush);
    assert_eq!(h.tie_breakers, vec![13, 7, 4, 3, 2]);
}

#[test]
fn full_house_uses_second_trips_as_pair() {
    let h = evaluate_best_hand(&cards("9s 9d"), &cards("9c 4h 4s 4d 2c"));
    assert_eq!(h.category, HandCategory::FullHouse);
    assert_eq!(h.tie_breakers, vec![9, 4]);
}

//
// ТАЙ-БРЕЙКЕРЫ
//

#[test]
fn quads_tie_breakers_are_quad_and_kicker() {
    let h = evaluate_best_hand(&cards("Ks 2d"), &cards("7s 7d 7c 7h Qs"));
    assert_eq!(h.category, HandCategory::FourOfAKind);
    assert_eq!(h.tie_breakers, vec![7, 13]);
}

#[test]
fn pair_kicker_decides() {
    let a = evaluate_best_hand(&cards("Ah Kd"), &cards("As 9c 7d 4h 2s"));
    let b = evaluate_best_hand(&cards("Ad Qd"), &cards("As 9c 7d 4h 2s"));
    assert_eq!(a.tie_breakers, vec![14, 13, 9, 7]);
    assert_eq!(compare_hands(&a, &b), Ordering::Greater);
}

#[test]
fn two_pair_uses_best_two_pairs_and_kicker() {
    let h = evaluate_best_hand(&cards("Qs Qd"), &cards("9c 9d 4h 4s As"));
    assert_eq!(h.category, HandCategory::TwoPair);
    assert_eq!(h.tie_breakers, vec![12, 9, 14]);
}

/// Играет борд – у обоих одинаковая пятёрка, точный сплит.
#[test]
fn board_plays_gives_exact_tie() {
    let board = cards("Ts Js Qs Ks As");
    let a = evaluate_best_hand(&cards("2c 3d"), &board);
    let b = evaluate_best_hand(&cards("4h 5h"), &board);
    assert_eq!(compare_hands(&a, &b), Ordering::Equal);
    assert_eq!(a, b);
}

#[test]
fn same_hand_compares_equal_to_itself() {
    let h = eval("2s 7d 9c Jh As");
    assert_eq!(compare_hands(&h, &h), Ordering::Equal);
}

//
// ПОРЯДОК КАТЕГОРИЙ
//

#[test]
fn every_higher_category_beats_every_lower() {
    let samples = [
        eval("2s 7d 9c Jh As"),
        eval("2s 2d 9c Jh As"),
        eval("2s 2d 9c 9h As"),
        eval("2s 2d 2c Jh As"),
        eval("5s 6d 7c 8h 9s"),
        eval("2h 7h 9h Jh Ah"),
        eval("2s 2d 2c Jh Js"),
        eval("2s 2d 2c 2h As"),
        eval("5s 6s 7s 8s 9s"),
        eval("Ts Js Qs Ks As"),
    ];

    for (i, lower) in samples.iter().enumerate() {
        for higher in &samples[i + 1..] {
            assert_eq!(compare_hands(higher, lower), Ordering::Greater);
            assert_eq!(compare_hands(lower, higher), Ordering::Less);
        }
    }
}

//
// МЕНЬШЕ ПЯТИ КАРТ
//

#[test]
fn fewer_than_five_cards_is_high_card_of_all_ranks() {
    let h = evaluate(&cards("9c Ah"));
    assert_eq!(h.category, HandCategory::HighCard);
    assert_eq!(h.tie_breakers, vec![14, 9]);

    // Даже пара в руке на префлопе – это только старшие карты.
    let pocket = evaluate(&cards("Kc Kh"));
    assert_eq!(pocket.category, HandCategory::HighCard);
}

#[test]
fn describes_hands_for_logs() {
    assert_eq!(describe_hand(&eval("Ts Js Qs Ks As")), "Royal flush");
    assert_eq!(describe_hand(&eval("2s Kd Kc Jh As")), "Pair (K)");
    assert_eq!(describe_hand(&eval("As 2d 3c 4h 5s")), "Straight (5)");
}

//
// СВОЙСТВА
//

fn full_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(r, s)))
        .collect()
}

fn arb_seven_cards() -> impl Strategy<Value = Vec<Card>> {
    Just(full_deck())
        .prop_shuffle()
        .prop_map(|deck| deck.into_iter().take(7).collect())
}

proptest! {
    #[test]
    fn comparator_is_antisymmetric(a in arb_seven_cards(), b in arb_seven_cards()) {
        let ha = evaluate(&a);
        let hb = evaluate(&b);
        prop_assert_eq!(compare_hands(&ha, &hb), compare_hands(&hb, &ha).reverse());
        prop_assert_eq!(compare_hands(&ha, &ha), Ordering::Equal);
    }

    #[test]
    fn comparator_is_transitive(
        a in arb_seven_cards(),
        b in arb_seven_cards(),
        c in arb_seven_cards(),
    ) {
        let mut hands = vec![evaluate(&a), evaluate(&b), evaluate(&c)];
        hands.sort_by(compare_hands);
        prop_assert_ne!(compare_hands(&hands[0], &hands[2]), Ordering::Greater);
        prop_assert_ne!(compare_hands(&hands[0], &hands[1]), Ordering::Greater);
        prop_assert_ne!(compare_hands(&hands[1], &hands[2]), Ordering::Greater);
    }

    /// Лучшая рука из 7 карт не хуже руки из любых 5 из них.
    #[test]
    fn best_of_seven_dominates_first_five(c in arb_seven_cards()) {
        let seven = evaluate(&c);
        let five = evaluate(&c[..5]);
        prop_assert_ne!(compare_hands(&seven, &five), Ordering::Less);
    }
}
