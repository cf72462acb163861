use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Главный (total) банк. Растёт монотонно до выплаты, детализацию по сайд-потам делаем отдельно.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub total: Chips,
}

impl Pot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, amount: Chips) {
        self.total += amount;
    }

    /// Забрать весь банк (при выплате или возврате), оставив ноль.
    pub fn take(&mut self) -> Chips {
        std::mem::take(&mut self.total)
    }
}
