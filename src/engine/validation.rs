use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::PlayerAtTable;
use crate::domain::SeatIndex;
use crate::engine::actions::PlayerActionKind;
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;

/// Проверка, может ли игрок выполнить это действие при текущем состоянии ставок.
/// Очередность хода проверяет вызывающий код.
pub fn validate_action(
    seat: SeatIndex,
    player: &PlayerAtTable,
    action: &PlayerActionKind,
    betting: &BettingState,
    big_blind: Chips,
) -> Result<(), EngineError> {
    if !player.can_act() {
        return Err(EngineError::PlayerNotInHand(seat));
    }

    let to_call = player.to_call(betting.current_bet);

    match action {
        PlayerActionKind::Fold => Ok(()),

        PlayerActionKind::Check => {
            if to_call.is_zero() {
                Ok(())
            } else {
                Err(EngineError::CannotCheck)
            }
        }

        // Call при коротком стеке разрешён – это олл-ин на остаток.
        PlayerActionKind::Call => {
            if to_call.is_zero() {
                Err(EngineError::CannotCall)
            } else {
                Ok(())
            }
        }

        PlayerActionKind::RaiseTo(total_bet) => {
            let min_raise_to = betting.min_raise_to(big_blind);
            if *total_bet < min_raise_to {
                return Err(EngineError::RaiseTooSmall { min_raise_to });
            }

            let diff = total_bet.saturating_sub(player.current_bet);
            if diff > player.stack {
                return Err(EngineError::NotEnoughChips);
            }

            Ok(())
        }
    }
}

/// Что сейчас может сделать игрок – для рендера кнопок.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegalActions {
    pub can_fold: bool,
    pub can_check: bool,
    /// Сколько реально уйдёт в банк при call (с учётом короткого стека).
    pub call_amount: Option<Chips>,
    /// Диапазон итоговой ставки для RaiseTo (None – рейз недоступен).
    pub min_raise_to: Option<Chips>,
    pub max_raise_to: Option<Chips>,
}

impl LegalActions {
    pub fn none() -> Self {
        Self {
            can_fold: false,
            can_check: false,
            call_amount: None,
            min_raise_to: None,
            max_raise_to: None,
        }
    }

    /// Разрешено ли конкретное действие (с той же логикой, что и `validate_action`).
    pub fn allows(&self, action: &PlayerActionKind) -> bool {
        match action {
            PlayerActionKind::Fold => self.can_fold,
            PlayerActionKind::Check => self.can_check,
            PlayerActionKind::Call => self.call_amount.is_some(),
            PlayerActionKind::RaiseTo(total) => match (self.min_raise_to, self.max_raise_to) {
                (Some(min), Some(max)) => *total >= min && *total <= max,
                _ => false,
            },
        }
    }
}

/// Посчитать разрешённые действия для игрока, чей сейчас ход.
pub fn legal_actions(player: &PlayerAtTable, betting: &BettingState, big_blind: Chips) -> LegalActions {
    if !player.can_act() {
        return LegalActions::none();
    }

    let to_call = player.to_call(betting.current_bet);
    let max_raise_to = player.current_bet + player.stack;
    let min_raise_to = betting.min_raise_to(big_blind);
    let can_raise = max_raise_to >= min_raise_to;

    LegalActions {
        can_fold: true,
        can_check: to_call.is_zero(),
        call_amount: if to_call.is_zero() {
            None
        } else {
            Some(to_call.min(player.stack))
        },
        min_raise_to: can_raise.then_some(min_raise_to),
        max_raise_to: can_raise.then_some(max_raise_to),
    }
}
