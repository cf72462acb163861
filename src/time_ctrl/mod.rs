// src/time_ctrl/mod.rs
//! Контроль времени хода (shot clock).
//!
//! Движок сам часов не читает: внешний планировщик двигает время через
//! `TimeController::on_time_passed` и при таймауте вызывает
//! `TableManager::timeout_action`.

pub mod clock;
pub mod time_rules;

pub use clock::{TimeoutState, TurnClock};
pub use time_rules::{TimeProfile, TimeRules};

use crate::domain::SeatIndex;

/// Какое авто-действие нужно сделать при истечении времени.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AutoActionDecision {
    /// Время не вышло – действий со стороны движка не требуется.
    None,
    /// Время места истекло – AUTO CHECK / AUTO FOLD
    /// (что именно, решает `TableManager::timeout_action`).
    TimeoutCheckOrFold(SeatIndex),
}

/// Высокоуровневый контроллер времени для стола.
#[derive(Clone, Debug, Default)]
pub struct TimeController {
    pub rules: TimeRules,
    pub clock: TurnClock,
}

impl TimeController {
    /// Создать контроллер с заданными правилами (например, `TimeRules::standard()`).
    pub fn new(rules: TimeRules) -> Self {
        Self {
            rules,
            clock: TurnClock::new(),
        }
    }

    /// Начать ход конкретного места.
    pub fn start_turn(&mut self, seat: SeatIndex) {
        self.clock.start_turn(seat, &self.rules);
    }

    /// Подстроиться под текущего актёра стола: новый актёр – новый таймер.
    pub fn sync(&mut self, current_actor: Option<SeatIndex>) {
        match current_actor {
            Some(seat) if self.clock.current_seat != Some(seat) => self.start_turn(seat),
            Some(_) => {}
            None => self.clock.clear(),
        }
    }

    /// Игрок сделал действие вовремя – таймер хода очищается.
    pub fn on_manual_action(&mut self, seat: SeatIndex) {
        if self.clock.current_seat == Some(seat) {
            self.clock.clear();
        }
    }

    /// "Протекание" времени для текущего актёра.
    pub fn on_time_passed(&mut self, delta_secs: u32) -> AutoActionDecision {
        match self.clock.elapse(delta_secs) {
            TimeoutState::TimedOut(seat) => AutoActionDecision::TimeoutCheckOrFold(seat),
            TimeoutState::Ongoing | TimeoutState::NoActivePlayer => AutoActionDecision::None,
        }
    }
}
