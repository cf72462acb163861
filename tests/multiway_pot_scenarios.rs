// tests/multiway_pot_scenarios.rs

use holdem_engine::domain::chips::Chips;
use holdem_engine::domain::SeatIndex;
use holdem_engine::engine::side_pots::{compute_side_pots, SidePot};

use std::collections::HashMap;

/// Хелпер: удобное создание contributions карты.
fn contrib(entries: &[(SeatIndex, u64)]) -> HashMap<SeatIndex, Chips> {
    let mut m = HashMap::new();
    for (seat, amount) in entries {
        m.insert(*seat, Chips(*amount));
    }
    m
}

/// Сценарий:
/// - Seat 0 вложил 100
/// - Seat 1 вложил 200
/// - Seat 2 вложил 400
///
/// Ожидаем:
/// - Main pot: 100 * 3 = 300, участвуют [0,1,2]
/// - Side pot 1: (200-100) * 2 = 200, участвуют [1,2]
/// - Side pot 2: (400-200) * 1 = 200, участвует [2]
#[test]
fn multiway_all_in_side_pots_are_computed_correctly() {
    let contributions = contrib(&[(0, 100), (1, 200), (2, 400)]);

    let pots: Vec<SidePot> = compute_side_pots(&contributions);
    assert_eq!(pots.len(), 3, "Должно быть 3 pot-а (main + 2 side)");

    // Для удобства сортируем по amount
    let mut pots_sorted = pots.clone();
    pots_sorted.sort_by_key(|p| p.amount.0);

    // Проверяем суммы
    assert_eq!(pots_sorted[0].amount.0, 200); // самый маленький: 200
    assert_eq!(pots_sorted[1].amount.0, 200);
    assert_eq!(pots_sorted[2].amount.0, 300);

    // Проверяем наборы eligible_seats (множества игроков, кто может претендовать на pot)
    let mut sets: Vec<Vec<SeatIndex>> = pots_sorted
        .iter()
        .map(|p| {
            let mut s = p.eligible_seats.clone();
            s.sort();
            s
        })
        .collect();

    sets.sort(); // сортируем сами наборы для стабильности проверок

    assert!(
        sets.contains(&vec![0, 1, 2]),
        "Должен быть pot для [0,1,2]"
    );
    assert!(sets.contains(&vec![1, 2]), "Должен быть pot для [1,2]");
    assert!(sets.contains(&vec![2]), "Должен быть pot для [2]");
}

/// Corner-case: если один игрок вложил 0, он не должен появляться в side pots.
#[test]
fn player_with_zero_contribution_is_not_in_pots() {
    let contributions = contrib(&[(0, 0), (1, 100), (2, 100)]);

    let pots = compute_side_pots(&contributions);
    assert_eq!(pots.len(), 1, "Должен быть один основной pot");

    let pot = &pots[0];
    assert_eq!(pot.amount.0, 200);
    let mut seats = pot.eligible_seats.clone();
    seats.sort();
    assert_eq!(seats, vec![1, 2], "Seat 0 не должен участвовать");
}

//
// РАСПРЕДЕЛЕНИЕ ПО СЛОЯМ
//

use std::collections::BTreeMap;

use holdem_engine::domain::hand::{EvaluatedHand, HandCategory};
use holdem_engine::engine::showdown::{best_hands, distribute_pot, split_amount};

fn hand(category: HandCategory, tb: &[u8]) -> EvaluatedHand {
    EvaluatedHand::new(category, tb.to_vec())
}

/// Короткий олл-ин с лучшей рукой забирает только main pot,
/// сайд-пот уходит лучшему из тех, кто вложил больше.
#[test]
fn short_all_in_winner_takes_only_main_pot() {
    let contributions = contrib(&[(0, 200), (1, 200), (2, 50)]);

    let mut hands = BTreeMap::new();
    hands.insert(0, hand(HandCategory::HighCard, &[14, 12, 9, 4, 3]));
    hands.insert(1, hand(HandCategory::ThreeOfAKind, &[13, 14, 9]));
    hands.insert(2, hand(HandCategory::ThreeOfAKind, &[14, 13, 9]));

    let awards = distribute_pot(&contributions, &hands).unwrap();

    assert_eq!(awards.get(&2), Some(&Chips(150)));
    assert_eq!(awards.get(&1), Some(&Chips(300)));
    assert_eq!(awards.get(&0), None);

    let total: Chips = awards.values().sum();
    assert_eq!(total, Chips(450));
}

/// Сфолдивший игрок платит в слои, но ничего не получает.
#[test]
fn folded_contribution_goes_to_remaining_players() {
    // Seat 1 сфолдил после 100, его руки нет в шоудауне.
    let contributions = contrib(&[(0, 300), (1, 100), (2, 300)]);

    let mut hands = BTreeMap::new();
    hands.insert(0, hand(HandCategory::Pair, &[10, 14, 8, 3]));
    hands.insert(2, hand(HandCategory::Pair, &[10, 14, 8, 2]));

    let awards = distribute_pot(&contributions, &hands).unwrap();
    assert_eq!(awards.get(&0), Some(&Chips(700)));
    assert_eq!(awards.len(), 1);
}

/// Нечётный сплит: лишняя фишка – месту с меньшим индексом.
#[test]
fn odd_chip_goes_to_lowest_seat() {
    let parts = split_amount(Chips(25), &[2, 5]);
    assert_eq!(parts, vec![(2, Chips(13)), (5, Chips(12))]);

    let parts = split_amount(Chips(100), &[1, 3, 4]);
    assert_eq!(parts, vec![(1, Chips(34)), (3, Chips(33)), (4, Chips(33))]);
}

#[test]
fn best_hands_collects_exact_ties_sorted() {
    let a = hand(HandCategory::Straight, &[9]);
    let b = hand(HandCategory::Straight, &[9]);
    let c = hand(HandCategory::Straight, &[8]);

    let winners = best_hands(vec![(4, &a), (0, &c), (1, &b)]);
    assert_eq!(winners, vec![1, 4]);
}

#[test]
fn showdown_without_hands_is_invalid_state() {
    let contributions = contrib(&[(0, 100), (1, 100)]);
    let err = distribute_pot(&contributions, &BTreeMap::new()).unwrap_err();
    assert!(matches!(err, holdem_engine::engine::EngineError::InvalidSeatState(_)));
}
