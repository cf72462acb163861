//! Покерный движок: ставки, переход улиц, сайд-поты, шоудаун.
//!
//! Высокоуровневый объект: `HandEngine`
//! Основные операции:
//!   - `start_hand` – запустить новую раздачу
//!   - `apply_action` – применить действие игрока
//!   - `force_action` – действие за игрока (таймаут)
//!   - `leave_hand` – игрок встаёт посреди раздачи
//!   - `advance_if_needed` – авто-переход улиц/завершение раздачи

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod pot;
pub mod showdown;
pub mod side_pots;
pub mod table_manager;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use errors::EngineError;
pub use game_loop::{
    advance_if_needed, apply_action, force_action, leave_hand, legal_actions_for, start_hand,
    HandEngine, HandStatus,
};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use pot::Pot;
pub use side_pots::SidePot;
pub use table_manager::{ManagerError, TableManager};
pub use validation::LegalActions;

/// RNG интерфейс для engine.
/// Реализации – в `infra::rng` (обёртки над `rand`).
pub trait RandomSource {
    /// Равномерная перестановка (каждая перестановка равновероятна).
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Равномерное число в диапазоне `0..upper` (`upper > 0`).
    fn below(&mut self, upper: u32) -> u32;
}
