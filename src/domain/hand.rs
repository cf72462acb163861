use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{HandId, PlayerId, SeatIndex, TableId};

/// Улица раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Сколько общих карт лежит на борде на этой улице.
    pub const fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River | Street::Showdown => 5,
        }
    }

    /// Следующая улица и сколько карт для неё открыть.
    pub const fn next(self) -> Option<(Street, usize)> {
        match self {
            Street::Preflop => Some((Street::Flop, 3)),
            Street::Flop => Some((Street::Turn, 1)),
            Street::Turn => Some((Street::River, 1)),
            Street::River | Street::Showdown => None,
        }
    }
}

/// Категория покерной руки по силе (от слабой к сильной).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

/// Оценённая рука: категория + тай-брейкеры (значения рангов 2..14, по убыванию важности).
///
/// Порядок полей важен: derive(Ord) сравнивает сначала категорию,
/// потом тай-брейкеры лексикографически.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EvaluatedHand {
    pub category: HandCategory,
    pub tie_breakers: Vec<u8>,
}

/// Результат конкретного игрока в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerHandResult {
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    /// Итоговая рука (если дошёл до шоудауна).
    pub hand: Option<EvaluatedHand>,
    /// Сколько всего внёс в банк за раздачу.
    pub contributed: Chips,
    /// Сколько забрал из банка.
    pub won: Chips,
    /// won - contributed. Положительное значение = выигрыш.
    pub net_chips: i64,
    /// Является ли игрок победителем (включая сплит).
    pub is_winner: bool,
}

/// Итог раздачи для внешнего хранилища балансов: (seat, игрок, изменение).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payout {
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    pub delta: i64,
}

/// Краткое описание завершённой раздачи. Удобно для истории/реплеера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_id: HandId,
    pub table_id: TableId,
    pub street_reached: Street,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    /// false – все, кроме одного, сбросили.
    pub went_to_showdown: bool,
    pub results: Vec<PlayerHandResult>,
}

impl HandSummary {
    pub fn winners(&self) -> impl Iterator<Item = &PlayerHandResult> {
        self.results.iter().filter(|r| r.is_winner)
    }

    pub fn total_won(&self) -> Chips {
        self.results.iter().map(|r| r.won).sum()
    }

    pub fn payouts(&self) -> Vec<Payout> {
        self.results
            .iter()
            .map(|r| Payout {
                seat: r.seat,
                player_id: r.player_id,
                delta: r.net_chips,
            })
            .collect()
    }
}
