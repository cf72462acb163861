use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{EvaluatedHand, Street};
use crate::domain::{HandId, SeatIndex, TableId};
use crate::engine::actions::PlayerActionKind;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    HandStarted {
        table_id: TableId,
        hand_id: HandId,
    },

    /// Кнопка/блайнды. Суммы – сколько реально поставлено (может быть меньше при коротком стеке).
    BlindsPosted {
        dealer: SeatIndex,
        small_blind: (SeatIndex, Chips),
        big_blind: (SeatIndex, Chips),
    },

    HoleCardsDealt {
        seat: SeatIndex,
        cards: Vec<Card>,
    },

    /// Открыты общие карты. `cards` – весь борд после открытия.
    BoardDealt {
        street: Street,
        cards: Vec<Card>,
    },

    PlayerActed {
        seat: SeatIndex,
        action: PlayerActionKind,
        /// Сколько фишек ушло в банк этим действием.
        paid: Chips,
        new_stack: Chips,
        pot_after: Chips,
        all_in: bool,
    },

    /// Действие сделано за игрока (таймаут).
    ActionForced {
        seat: SeatIndex,
        action: PlayerActionKind,
    },

    /// Игрок встал посреди раздачи – засчитан fold.
    PlayerLeft {
        seat: SeatIndex,
    },

    StreetChanged {
        street: Street,
    },

    /// Шоудаун – открытие карт.
    ShowdownReveal {
        seat: SeatIndex,
        hole_cards: Vec<Card>,
        hand: EvaluatedHand,
    },

    PotAwarded {
        seat: SeatIndex,
        amount: Chips,
    },

    /// Раздача прервана, взносы возвращены игрокам.
    HandAborted {
        reason: String,
    },

    HandFinished {
        hand_id: HandId,
        table_id: TableId,
    },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn kinds(&self) -> impl Iterator<Item = &HandEventKind> {
        self.events.iter().map(|e| &e.kind)
    }

    /// Сколько раз в истории встречается событие, подходящее под условие.
    pub fn count(&self, pred: impl Fn(&HandEventKind) -> bool) -> usize {
        self.kinds().filter(|k| pred(k)).count()
    }
}
