use serde::{Deserialize, Serialize};

use crate::domain::{SeatIndex, Table};

/// Кнопка и блайнды на одну раздачу.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindSeats {
    pub dealer: SeatIndex,
    pub small_blind: SeatIndex,
    pub big_blind: SeatIndex,
}

/// Участвует ли место в текущей раздаче (занято и игрок не sit-out).
fn is_dealt_in(table: &Table, seat: SeatIndex) -> bool {
    table.player(seat).map(|p| p.is_in_hand()).unwrap_or(false)
}

/// Найти следующее участвующее место по кругу (включая/исключая start).
pub fn next_occupied_seat(table: &Table, start: SeatIndex, include_start: bool) -> Option<SeatIndex> {
    let max = table.seats.len();
    if max == 0 {
        return None;
    }

    let first = if include_start { 0 } else { 1 };
    (first..first + max)
        .map(|i| ((start as usize + i) % max) as SeatIndex)
        .find(|&seat| is_dealt_in(table, seat))
}

/// Все участвующие места по кругу, начиная с `start` (включительно).
pub fn collect_occupied_seats_from(table: &Table, start: SeatIndex) -> Vec<SeatIndex> {
    let max = table.seats.len();
    (0..max)
        .map(|i| ((start as usize + i) % max) as SeatIndex)
        .filter(|&seat| is_dealt_in(table, seat))
        .collect()
}

/// Все участвующие места по кругу, начиная со следующего после `seat`.
pub fn seats_after(table: &Table, seat: SeatIndex) -> Vec<SeatIndex> {
    let max = table.seats.len();
    if max == 0 {
        return Vec::new();
    }
    collect_occupied_seats_from(table, ((seat as usize + 1) % max) as SeatIndex)
}

/// Следующая позиция дилера:
/// - если кнопка уже была – следующее участвующее место после неё
///   (если место прошлого дилера опустело, это то же самое, что "на нём или после него");
/// - если нет – первое участвующее место с нуля.
pub fn next_dealer(table: &Table) -> Option<SeatIndex> {
    match table.dealer_button {
        Some(button) => next_occupied_seat(table, button, false),
        None => next_occupied_seat(table, 0, true),
    }
}

/// Назначить SB/BB относительно дилера.
///
/// Heads-up: дилер сам ставит малый блайнд, второй игрок – большой.
pub fn assign_blinds(table: &Table, dealer: SeatIndex) -> Option<BlindSeats> {
    let order = collect_occupied_seats_from(table, dealer);
    match order.len() {
        0 | 1 => None,
        2 => Some(BlindSeats {
            dealer,
            small_blind: order[0],
            big_blind: order[1],
        }),
        _ => Some(BlindSeats {
            dealer,
            small_blind: order[1],
            big_blind: order[2],
        }),
    }
}
