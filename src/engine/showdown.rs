//! Шоудаун: выбор победителей и деление банка.

use std::collections::{BTreeMap, HashMap};

use crate::domain::chips::Chips;
use crate::domain::hand::EvaluatedHand;
use crate::domain::SeatIndex;
use crate::engine::errors::EngineError;
use crate::engine::side_pots::compute_side_pots;

/// Места с лучшей рукой среди кандидатов (все точные сплиты), по возрастанию индекса.
pub fn best_hands<'a>(
    candidates: impl IntoIterator<Item = (SeatIndex, &'a EvaluatedHand)>,
) -> Vec<SeatIndex> {
    let mut best: Option<&EvaluatedHand> = None;
    let mut winners: Vec<SeatIndex> = Vec::new();

    for (seat, hand) in candidates {
        match best {
            Some(b) if hand < b => {}
            Some(b) if hand == b => winners.push(seat),
            _ => {
                best = Some(hand);
                winners.clear();
                winners.push(seat);
            }
        }
    }

    winners.sort_unstable();
    winners
}

/// Поделить сумму поровну. Остаток от деления целиком уходит первому
/// (с наименьшим индексом места) победителю.
pub fn split_amount(amount: Chips, winners: &[SeatIndex]) -> Vec<(SeatIndex, Chips)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let n = winners.len() as u64;
    let share = Chips(amount.0 / n);
    let remainder = Chips(amount.0 % n);

    winners
        .iter()
        .enumerate()
        .map(|(i, &seat)| {
            let prize = if i == 0 { share + remainder } else { share };
            (seat, prize)
        })
        .collect()
}

/// Разделить банк между не сфолдившими игроками.
///
/// `contributions` – взносы всех игроков (включая сфолдивших),
/// `hands` – руки тех, кто дошёл до шоудауна.
/// Возвращает выигрыш по местам; сумма выигрышей = сумма взносов.
pub fn distribute_pot(
    contributions: &HashMap<SeatIndex, Chips>,
    hands: &BTreeMap<SeatIndex, EvaluatedHand>,
) -> Result<BTreeMap<SeatIndex, Chips>, EngineError> {
    if hands.is_empty() {
        return Err(EngineError::InvalidSeatState("шоудаун без игроков"));
    }

    let mut awards: BTreeMap<SeatIndex, Chips> = BTreeMap::new();

    for pot in compute_side_pots(contributions) {
        if pot.amount.is_zero() {
            continue;
        }

        let mut winners = best_hands(
            pot.eligible_seats
                .iter()
                .filter_map(|seat| hands.get(seat).map(|h| (*seat, h))),
        );
        // Слой, на который не претендует ни один живой игрок, отдаём лучшей руке стола.
        if winners.is_empty() {
            winners = best_hands(hands.iter().map(|(seat, h)| (*seat, h)));
        }

        for (seat, prize) in split_amount(pot.amount, &winners) {
            *awards.entry(seat).or_insert(Chips::ZERO) += prize;
        }
    }

    Ok(awards)
}
