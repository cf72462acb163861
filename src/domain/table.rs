use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::PlayerAtTable;
use crate::domain::{HandId, TableId};

/// Индекс места за столом (0..max_seats-1).
pub type SeatIndex = u8;

/// Максимум мест за холдем-столом.
pub const MAX_SEATS: u8 = 9;

pub const DEFAULT_SMALL_BLIND: Chips = Chips(10);
pub const DEFAULT_BIG_BLIND: Chips = Chips(20);
pub const DEFAULT_BUY_IN: Chips = Chips(1_000);

/// Ошибки конфигурации стола.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("не удалось разобрать конфиг: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("количество мест должно быть от 2 до 9, получено {0}")]
    SeatCount(u8),

    #[error("блайнды некорректны: SB={small_blind}, BB={big_blind}")]
    Blinds { small_blind: Chips, big_blind: Chips },
}

/// Стейки стола (SB/BB). Фиксированные, без роста уровней.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
        }
    }
}

impl Default for TableStakes {
    fn default() -> Self {
        Self::new(DEFAULT_SMALL_BLIND, DEFAULT_BIG_BLIND)
    }
}

/// Конфиг стола: сколько мест, какие блайнды, стандартный бай-ин.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    pub max_seats: u8,
    pub stakes: TableStakes,
    /// Стек по умолчанию для тех, кто садится без явной суммы.
    pub buy_in: Chips,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_seats: MAX_SEATS,
            stakes: TableStakes::default(),
            buy_in: DEFAULT_BUY_IN,
        }
    }
}

impl TableConfig {
    /// Разобрать конфиг из JSON. Отсутствующие поля берутся из `Default`.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_SEATS).contains(&self.max_seats) {
            return Err(ConfigError::SeatCount(self.max_seats));
        }
        let TableStakes {
            small_blind,
            big_blind,
        } = self.stakes;
        if small_blind.is_zero() || big_blind < small_blind {
            return Err(ConfigError::Blinds {
                small_blind,
                big_blind,
            });
        }
        Ok(())
    }
}

/// Основное состояние стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub id: TableId,
    pub name: String,
    pub config: TableConfig,

    /// Места за столом: индекс вектора = SeatIndex.
    /// None – место пустое.
    pub seats: Vec<Option<PlayerAtTable>>,

    /// Общие карты борда (0, 3, 4 или 5 карт).
    pub board: Vec<Card>,

    /// Место дилера или None, если раздача ещё не начиналась.
    pub dealer_button: Option<SeatIndex>,
    pub small_blind_seat: Option<SeatIndex>,
    pub big_blind_seat: Option<SeatIndex>,

    /// ID текущей (или последней) раздачи.
    pub current_hand_id: Option<HandId>,

    pub street: Street,

    /// Идёт ли сейчас раздача (true), либо стол ждёт начала новой.
    pub hand_in_progress: bool,

    /// Общий размер банка (зеркало `Pot` из движка, для рендера).
    pub total_pot: Chips,

    pub hands_played: u64,
}

impl Table {
    /// Создать пустой стол с заданной конфигурацией.
    pub fn new(id: TableId, name: String, config: TableConfig) -> Self {
        let seats = vec![None; config.max_seats as usize];
        Self {
            id,
            name,
            config,
            seats,
            board: Vec::new(),
            dealer_button: None,
            small_blind_seat: None,
            big_blind_seat: None,
            current_hand_id: None,
            street: Street::Preflop,
            hand_in_progress: false,
            total_pot: Chips::ZERO,
            hands_played: 0,
        }
    }

    pub fn big_blind(&self) -> Chips {
        self.config.stakes.big_blind
    }

    pub fn is_seat_empty(&self, index: SeatIndex) -> bool {
        self.seats
            .get(index as usize)
            .map(|s| s.is_none())
            .unwrap_or(true)
    }

    pub fn player(&self, seat: SeatIndex) -> Option<&PlayerAtTable> {
        self.seats.get(seat as usize).and_then(|s| s.as_ref())
    }

    pub fn player_mut(&mut self, seat: SeatIndex) -> Option<&mut PlayerAtTable> {
        self.seats.get_mut(seat as usize).and_then(|s| s.as_mut())
    }

    /// Занятые места вместе с игроками, по возрастанию индекса.
    pub fn occupied(&self) -> impl Iterator<Item = (SeatIndex, &PlayerAtTable)> {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(idx, s)| s.as_ref().map(|p| (idx as SeatIndex, p)))
    }

    /// Сколько игроков ещё не сфолдили (включая олл-ин).
    pub fn in_hand_count(&self) -> usize {
        self.occupied().filter(|(_, p)| p.is_in_hand()).count()
    }

    /// Сколько игроков ещё могут делать ставки.
    pub fn can_act_count(&self) -> usize {
        self.occupied().filter(|(_, p)| p.can_act()).count()
    }

    /// Все фишки на столе: стеки + банк. Не меняется в течение раздачи.
    pub fn total_chips(&self) -> Chips {
        self.occupied().map(|(_, p)| p.stack).sum::<Chips>() + self.total_pot
    }
}
