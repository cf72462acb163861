use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::PlayerAtTable;
use crate::domain::{SeatIndex, Table};

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Улица, к которой относится этот раунд.
    pub street: Street,
    /// Текущая целевая ставка, до которой должны дотянуться игроки.
    pub current_bet: Chips,
    /// Размер последнего повышения на этой улице (0, если повышений не было).
    pub last_raise_size: Chips,
    /// Порядок хода: не сфолдившие места на момент старта раунда, по кругу.
    /// Считается один раз на улицу, дальше двигается только курсор.
    pub order: Vec<SeatIndex>,
    /// Индекс текущего актёра в `order`.
    pub cursor: Option<usize>,
}

impl BettingState {
    pub fn new(street: Street, current_bet: Chips, order: Vec<SeatIndex>) -> Self {
        Self {
            street,
            current_bet,
            last_raise_size: Chips::ZERO,
            order,
            cursor: None,
        }
    }

    /// Минимальная прибавка: не меньше прошлого рейза и не меньше BB.
    pub fn min_raise(&self, big_blind: Chips) -> Chips {
        self.last_raise_size.max(big_blind)
    }

    /// Минимальная итоговая ставка для рейза.
    pub fn min_raise_to(&self, big_blind: Chips) -> Chips {
        self.current_bet + self.min_raise(big_blind)
    }

    /// Чей сейчас ход.
    pub fn current_seat(&self) -> Option<SeatIndex> {
        self.cursor.and_then(|i| self.order.get(i).copied())
    }

    /// Обновить состояние после bet/raise.
    /// Флаги `has_acted` остальных игроков сбрасывает движок.
    pub fn on_raise(&mut self, new_bet: Chips, raise_size: Chips) {
        self.current_bet = new_bet;
        self.last_raise_size = raise_size;
    }

    /// Раунд завершён, когда каждый, кто ещё может ставить, походил и уравнял ставку.
    /// Олл-ин игроки не ходят и в проверке не участвуют.
    pub fn is_round_complete(&self, table: &Table) -> bool {
        self.order
            .iter()
            .filter_map(|&seat| table.player(seat))
            .filter(|p| p.can_act())
            .all(|p| p.has_acted && (p.current_bet == self.current_bet || self.current_bet.is_zero()))
    }

    /// Первый, кому нужно ходить, начиная с позиции `start` в `order` (по кругу).
    pub fn find_next_from(&self, table: &Table, start: usize) -> Option<usize> {
        let len = self.order.len();
        (0..len)
            .map(|i| (start + i) % len)
            .find(|&idx| {
                table
                    .player(self.order[idx])
                    .map(|p| needs_action(p, self.current_bet))
                    .unwrap_or(false)
            })
    }

    /// Передать ход следующему после текущего.
    pub fn advance(&mut self, table: &Table) {
        let start = self.cursor.map(|i| i + 1).unwrap_or(0);
        self.cursor = self.find_next_from(table, start);
    }
}

/// Игроку нужно ходить: может ставить и либо ещё не ходил, либо должен доплатить.
pub fn needs_action(player: &PlayerAtTable, table_bet: Chips) -> bool {
    player.can_act() && (!player.has_acted || player.current_bet < table_bet)
}
