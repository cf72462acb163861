use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Статус игрока именно в контексте стола/раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок активен в текущей раздаче и может делать ставки.
    Active,
    /// Игрок сфолдил и больше не участвует в банке.
    Folded,
    /// Игрок в олл-ине – в раздаче, но ставок больше не делает.
    AllIn,
    /// Игрок сидит за столом, но не участвует в раздаче (нет фишек или раздача ещё не началась).
    SittingOut,
}

/// Состояние игрока за конкретным столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAtTable {
    pub player_id: PlayerId,
    /// Текущий стек за столом.
    pub stack: Chips,
    /// Ставка на текущей улице.
    pub current_bet: Chips,
    /// Сколько всего внесено за раздачу (для отображения и сайд-потов).
    pub total_bet: Chips,
    pub status: PlayerStatus,
    /// Ходил ли игрок в текущем раунде ставок. Сбрасывается на каждой улице и при каждом рейзе.
    pub has_acted: bool,
    pub is_bot: bool,
    /// Игрок встал из-за стола посреди раздачи – место освободится после неё.
    pub leaving: bool,
    /// Карманные карты (0 или 2).
    pub hole_cards: Vec<Card>,
}

impl PlayerAtTable {
    pub fn new(player_id: PlayerId, stack: Chips) -> Self {
        Self {
            player_id,
            stack,
            current_bet: Chips::ZERO,
            total_bet: Chips::ZERO,
            status: PlayerStatus::SittingOut,
            has_acted: false,
            is_bot: false,
            leaving: false,
            hole_cards: Vec::new(),
        }
    }

    pub fn bot(player_id: PlayerId, stack: Chips) -> Self {
        Self {
            is_bot: true,
            ..Self::new(player_id, stack)
        }
    }

    /// Не сфолдил и участвует в раздаче (включая олл-ин).
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Может ли ещё делать ставки.
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Сколько не хватает до текущей ставки стола.
    pub fn to_call(&self, table_bet: Chips) -> Chips {
        table_bet.saturating_sub(self.current_bet)
    }

    /// Сбросить всё, что относится к прошлой раздаче.
    pub fn reset_for_hand(&mut self) {
        self.current_bet = Chips::ZERO;
        self.total_bet = Chips::ZERO;
        self.has_acted = false;
        self.hole_cards.clear();
        self.status = if self.stack.is_zero() || self.leaving {
            PlayerStatus::SittingOut
        } else {
            PlayerStatus::Active
        };
    }
}
