//! Простые боты для мест без живого игрока.
//!
//! Бот не хранит состояние: на каждый ход получает свои карты, борд и
//! список разрешённых действий и возвращает одно из них.

pub mod policy;

pub use policy::{has_strength, BotPolicy};
