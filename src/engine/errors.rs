use crate::domain::deck::DeckExhausted;
use crate::domain::{Chips, SeatIndex, TableId};

use thiserror::Error;

/// Ошибки движка покера.
///
/// Любая ошибка из `apply_action` означает, что состояние стола не изменилось
/// (кроме `DeckExhausted` – там раздача прерывается с возвратом фишек).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Стол {0} не найден")]
    TableNotFound(TableId),

    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("В этом месте нет игрока")]
    EmptySeat,

    #[error("Место {0} уже занято")]
    SeatOccupied(SeatIndex),

    #[error("Недостаточно активных игроков для раздачи")]
    NotEnoughPlayers,

    #[error("Раздача уже идёт")]
    HandAlreadyInProgress,

    #[error("Раздача не активна")]
    NoActiveHand,

    #[error("Сейчас не ход места {0}")]
    NotPlayersTurn(SeatIndex),

    #[error("Игрок на месте {0} уже не участвует в раздаче")]
    PlayerNotInHand(SeatIndex),

    #[error("Невозможно выполнить check – нужно хотя бы уравнять ставку")]
    CannotCheck,

    #[error("Невозможно выполнить call – нет ставки для уравнивания")]
    CannotCall,

    #[error("Размер рейза слишком мал: минимум до {min_raise_to}")]
    RaiseTooSmall { min_raise_to: Chips },

    #[error("Недостаточно фишек для этой ставки")]
    NotEnoughChips,

    #[error(transparent)]
    DeckExhausted(#[from] DeckExhausted),

    #[error("Некорректное состояние мест: {0}")]
    InvalidSeatState(&'static str),

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl EngineError {
    /// Действие нарушает правила (не тот ход, check при долге, маленький рейз и т.п.).
    pub fn is_illegal_action(&self) -> bool {
        matches!(
            self,
            EngineError::NotPlayersTurn(_)
                | EngineError::PlayerNotInHand(_)
                | EngineError::CannotCheck
                | EngineError::CannotCall
                | EngineError::RaiseTooSmall { .. }
                | EngineError::NotEnoughChips
        )
    }
}
