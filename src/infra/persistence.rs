use std::collections::HashMap;

use crate::domain::hand::HandSummary;
use crate::domain::PlayerId;

/// Внешнее хранилище балансов игроков.
///
/// Движок держит фишки только в памяти на время раздачи.
/// После каждой законченной раздачи `TableManager` сообщает сюда
/// изменения стеков по местам (`Payout::delta`).
pub trait BalanceLedger {
    fn record_hand(&mut self, summary: &HandSummary);
}

/// Простая in-memory реализация для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    balances: HashMap<PlayerId, i64>,
    hands_recorded: u64,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Суммарный результат игрока по всем записанным раздачам.
    pub fn net_for(&self, player_id: PlayerId) -> i64 {
        self.balances.get(&player_id).copied().unwrap_or(0)
    }

    pub fn hands_recorded(&self) -> u64 {
        self.hands_recorded
    }
}

impl BalanceLedger for InMemoryLedger {
    fn record_hand(&mut self, summary: &HandSummary) {
        for p in summary.payouts() {
            *self.balances.entry(p.player_id).or_insert(0) += p.delta;
        }
        self.hands_recorded += 1;
    }
}
