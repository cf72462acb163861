use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::TableId;
use crate::engine::{EngineError, ManagerError};

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    #[error("некорректный запрос: {0}")]
    BadRequest(String),

    #[error("стол {0} не найден")]
    TableNotFound(TableId),

    /// Действие нарушает правила – состояние стола не изменилось.
    #[error("недопустимое действие: {0}")]
    IllegalAction(String),

    /// Команда не может быть выполнена в текущем состоянии.
    #[error("команда невыполнима: {0}")]
    InvalidCommand(String),

    /// Внутренняя ошибка (колода, несогласованное состояние).
    #[error("внутренняя ошибка: {0}")]
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::TableNotFound(id) => ApiError::TableNotFound(id),
            e if e.is_illegal_action() => ApiError::IllegalAction(e.to_string()),
            e @ (EngineError::DeckExhausted(_)
            | EngineError::InvalidSeatState(_)
            | EngineError::Internal(_)) => ApiError::Internal(e.to_string()),
            e => ApiError::InvalidCommand(e.to_string()),
        }
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::TableNotFound(id) => ApiError::TableNotFound(id),
            ManagerError::Engine(e) => e.into(),
            e @ (ManagerError::NoActiveHand(_) | ManagerError::NotBotTurn { .. }) => {
                ApiError::InvalidCommand(e.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
