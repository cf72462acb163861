// src/time_ctrl/clock.rs
//! Локальный таймер хода (shot clock) для текущего места.

use serde::{Deserialize, Serialize};

use crate::domain::SeatIndex;

use super::TimeRules;

/// Состояние таймера текущего хода.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnClock {
    /// Какое место сейчас должно ходить (None, если активного хода нет).
    pub current_seat: Option<SeatIndex>,
    /// Сколько секунд ещё осталось на этот ход.
    pub remaining_secs: u32,
}

/// Результат "протекания" времени.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeoutState {
    /// Время ещё не вышло, игрок может думать дальше.
    Ongoing,
    /// Время хода исчерпано – нужен авто-Check/авто-Fold.
    TimedOut(SeatIndex),
    /// Сейчас нет активного места, на кого вешать таймер.
    NoActivePlayer,
}

impl TurnClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Начать ход места согласно правилам.
    pub fn start_turn(&mut self, seat: SeatIndex, rules: &TimeRules) {
        self.current_seat = Some(seat);
        self.remaining_secs = rules.action_secs;
    }

    /// Очистить таймер (игрок сходил, или раздача закончилась).
    pub fn clear(&mut self) {
        self.current_seat = None;
        self.remaining_secs = 0;
    }

    /// Симулируем протекание `delta_secs` для текущего места.
    /// Таймаут срабатывает один раз: после него таймер очищен.
    pub fn elapse(&mut self, delta_secs: u32) -> TimeoutState {
        let Some(seat) = self.current_seat else {
            return TimeoutState::NoActivePlayer;
        };

        if delta_secs < self.remaining_secs {
            self.remaining_secs -= delta_secs;
            return TimeoutState::Ongoing;
        }

        self.clear();
        TimeoutState::TimedOut(seat)
    }
}
