// tests/positions_tests.rs

use holdem_engine::domain::chips::Chips;
use holdem_engine::domain::player::PlayerAtTable;
use holdem_engine::domain::table::{Table, TableConfig};
use holdem_engine::domain::SeatIndex;
use holdem_engine::engine::positions::{assign_blinds, next_dealer, seats_after, BlindSeats};
use holdem_engine::engine::{apply_action, start_hand, PlayerAction, PlayerActionKind, RandomSource};

struct NoShuffle;

impl RandomSource for NoShuffle {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}

    fn below(&mut self, _upper: u32) -> u32 {
        0
    }
}

/// Стол с игроками на заданных местах (все Active, как после старта раздачи).
fn table_with_seats(seats: &[SeatIndex]) -> Table {
    let mut table = Table::new(1, "positions".to_string(), TableConfig::default());
    for &seat in seats {
        let mut p = PlayerAtTable::new(seat as u64, Chips(1000));
        p.reset_for_hand();
        table.seats[seat as usize] = Some(p);
    }
    table
}

/// Сыграть раздачу до конца: все сбрасывают до последнего.
fn play_fold_around(table: &mut Table, hand_id: u64) {
    let mut engine = start_hand(table, &mut NoShuffle, hand_id).unwrap();
    while let Some(seat) = engine.current_actor() {
        let status = apply_action(table, &mut engine, PlayerAction::new(seat, PlayerActionKind::Fold)).unwrap();
        if status.is_finished() {
            break;
        }
    }
    assert!(!table.hand_in_progress);
}

#[test]
fn first_dealer_is_first_occupied_seat() {
    let table = table_with_seats(&[2, 5, 7]);
    assert_eq!(next_dealer(&table), Some(2));
    assert_eq!(
        assign_blinds(&table, 2),
        Some(BlindSeats {
            dealer: 2,
            small_blind: 5,
            big_blind: 7
        })
    );
}

#[test]
fn heads_up_dealer_posts_small_blind() {
    let table = table_with_seats(&[3, 6]);
    assert_eq!(
        assign_blinds(&table, 6),
        Some(BlindSeats {
            dealer: 6,
            small_blind: 6,
            big_blind: 3
        })
    );
}

#[test]
fn seats_after_wraps_around_and_skips_empty() {
    let table = table_with_seats(&[0, 4, 8]);
    assert_eq!(seats_after(&table, 4), vec![8, 0, 4]);
    assert_eq!(seats_after(&table, 8), vec![0, 4, 8]);
    assert_eq!(seats_after(&table, 5), vec![8, 0, 4]);
}

#[test]
fn button_rotates_each_hand() {
    let mut table = table_with_seats(&[0, 1, 2]);

    play_fold_around(&mut table, 1);
    assert_eq!(table.dealer_button, Some(0));

    play_fold_around(&mut table, 2);
    assert_eq!(table.dealer_button, Some(1));
    assert_eq!(table.small_blind_seat, Some(2));
    assert_eq!(table.big_blind_seat, Some(0));

    play_fold_around(&mut table, 3);
    assert_eq!(table.dealer_button, Some(2));

    play_fold_around(&mut table, 4);
    assert_eq!(table.dealer_button, Some(0));
    assert_eq!(table.hands_played, 4);
}

/// Место прошлого дилера опустело – кнопка идёт к следующему занятому месту.
#[test]
fn button_skips_vacated_dealer_seat() {
    let mut table = table_with_seats(&[0, 3, 5, 7]);
    play_fold_around(&mut table, 1);
    play_fold_around(&mut table, 2);
    assert_eq!(table.dealer_button, Some(3));

    table.seats[3] = None;
    play_fold_around(&mut table, 3);
    assert_eq!(table.dealer_button, Some(5));
    assert_eq!(table.small_blind_seat, Some(7));
    assert_eq!(table.big_blind_seat, Some(0));
}

#[test]
fn busted_player_is_skipped_for_blinds() {
    let mut table = table_with_seats(&[0, 1, 2, 3]);
    table.player_mut(2).unwrap().stack = Chips::ZERO;

    let engine = start_hand(&mut table, &mut NoShuffle, 1).unwrap();
    assert_eq!(engine.blinds.dealer, 0);
    assert_eq!(engine.blinds.small_blind, 1);
    assert_eq!(engine.blinds.big_blind, 3);
}
