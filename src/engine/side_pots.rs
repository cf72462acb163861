use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, SeatIndex};

/// Сайд-пот: слой банка, на который претендуют только игроки,
/// внёсшие в раздачу не меньше уровня этого слоя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    /// По возрастанию индекса места. Сфолдившие тоже здесь – их отсекает шоудаун.
    pub eligible_seats: Vec<SeatIndex>,
}

/// Посчитать сайд-поты из сумм, которые внесли игроки.
///
/// Вход: contributions[seat] = сколько суммарно фишек поставил игрок (во всех улицах).
/// Выход: слои от младшего к старшему. Сумма слоёв = сумма вкладов.
/// Без олл-инов получается ровно один слой на весь банк.
pub fn compute_side_pots(contributions: &HashMap<SeatIndex, Chips>) -> Vec<SidePot> {
    let mut entries: Vec<(SeatIndex, Chips)> = contributions
        .iter()
        .filter(|(_, chips)| !chips.is_zero())
        .map(|(seat, chips)| (*seat, *chips))
        .collect();

    entries.sort_by_key(|&(seat, c)| (c, seat));

    let mut levels: Vec<Chips> = entries.iter().map(|&(_, c)| c).collect();
    levels.dedup();

    let mut pots = Vec::with_capacity(levels.len());
    let mut prev_level = Chips::ZERO;

    for level in levels {
        let mut eligible: Vec<SeatIndex> = entries
            .iter()
            .filter(|&&(_, c)| c >= level)
            .map(|&(seat, _)| seat)
            .collect();
        eligible.sort_unstable();

        // Игроки, не дотянувшие до этого уровня, всё равно докладывают свой остаток в слой.
        let amount: Chips = entries
            .iter()
            .map(|&(_, c)| c.min(level).saturating_sub(prev_level))
            .sum();

        pots.push(SidePot {
            amount,
            eligible_seats: eligible,
        });
        prev_level = level;
    }

    pots
}
