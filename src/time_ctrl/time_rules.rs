// src/time_ctrl/time_rules.rs
//! Конфигурация тайминга (shot-clock) для стола.
//!
//! Здесь описываем только "правила", без состояния и без привязки к конкретному столу.

use serde::{Deserialize, Serialize};

/// Профиль тайминга.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeProfile {
    /// 20 сек на ход.
    Standard,
    /// 10 сек на ход.
    Turbo,
}

/// Правила тайминга для одного стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimeRules {
    /// Сколько секунд даётся на решение (каждый ход).
    pub action_secs: u32,
}

impl TimeRules {
    pub const fn new(action_secs: u32) -> Self {
        Self { action_secs }
    }

    /// Стандартный профиль: 20 сек на ход.
    pub const fn standard() -> Self {
        Self { action_secs: 20 }
    }

    /// Получить правила по профилю.
    pub const fn from_profile(profile: TimeProfile) -> Self {
        match profile {
            TimeProfile::Standard => Self::standard(),
            TimeProfile::Turbo => Self::new(10),
        }
    }
}

impl Default for TimeRules {
    fn default() -> Self {
        Self::standard()
    }
}
