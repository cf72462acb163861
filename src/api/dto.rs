use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandSummary, Street};
use crate::domain::player::PlayerStatus;
use crate::domain::table::Table;
use crate::domain::{PlayerId, SeatIndex, TableId};
use crate::engine::validation::LegalActions;
use crate::engine::{legal_actions_for, HandEngine};

/// Одно место за столом глазами конкретного зрителя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatView {
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    pub stack: Chips,
    pub current_bet: Chips,
    pub status: PlayerStatus,
    pub is_bot: bool,
    /// Карманные карты – только свои, либо вскрытые на шоудауне.
    pub hole_cards: Option<Vec<Card>>,
}

/// Снимок стола для рендера (read-only).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableView {
    pub table_id: TableId,
    pub name: String,
    pub street: Street,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    pub current_bet: Chips,
    pub last_raise_size: Chips,
    pub dealer_button: Option<SeatIndex>,
    pub small_blind_seat: Option<SeatIndex>,
    pub big_blind_seat: Option<SeatIndex>,
    /// Есть ли активная раздача.
    pub hand_in_progress: bool,
    /// Индекс текущего актёра среди не сфолдивших, в порядке хода этой улицы.
    pub active_player_index: Option<usize>,
    /// Место, чей сейчас ход (если раздача идёт).
    pub current_actor_seat: Option<SeatIndex>,
    pub seats: Vec<SeatView>,
    /// Что может сделать зритель – только когда его ход.
    pub legal_actions: Option<LegalActions>,
}

impl TableView {
    /// Собрать снимок.
    ///
    /// `viewer` – место зрителя (None – наблюдатель без карт),
    /// `revealed` – карты, вскрытые на последнем шоудауне.
    pub fn build(
        table: &Table,
        engine: Option<&HandEngine>,
        viewer: Option<SeatIndex>,
        revealed: &HashMap<SeatIndex, Vec<Card>>,
    ) -> Self {
        let engine = engine.filter(|_| table.hand_in_progress);

        let seats = table
            .occupied()
            .map(|(seat, p)| {
                let hole_cards = if viewer == Some(seat) && !p.hole_cards.is_empty() {
                    Some(p.hole_cards.clone())
                } else {
                    revealed.get(&seat).cloned()
                };
                SeatView {
                    seat,
                    player_id: p.player_id,
                    stack: p.stack,
                    current_bet: p.current_bet,
                    status: p.status,
                    is_bot: p.is_bot,
                    hole_cards,
                }
            })
            .collect();

        let legal_actions = match (engine, viewer) {
            (Some(e), Some(seat)) if e.current_actor() == Some(seat) => {
                Some(legal_actions_for(table, e, seat))
            }
            _ => None,
        };

        TableView {
            table_id: table.id,
            name: table.name.clone(),
            street: table.street,
            board: table.board.clone(),
            total_pot: table.total_pot,
            current_bet: engine.map(|e| e.betting.current_bet).unwrap_or(Chips::ZERO),
            last_raise_size: engine.map(|e| e.betting.last_raise_size).unwrap_or(Chips::ZERO),
            dealer_button: table.dealer_button,
            small_blind_seat: table.small_blind_seat,
            big_blind_seat: table.big_blind_seat,
            hand_in_progress: table.hand_in_progress,
            active_player_index: engine.and_then(|e| e.active_player_index(table)),
            current_actor_seat: engine.and_then(|e| e.current_actor()),
            seats,
            legal_actions,
        }
    }

    pub fn seat(&self, seat: SeatIndex) -> Option<&SeatView> {
        self.seats.iter().find(|s| s.seat == seat)
    }
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Вернуть обновлённое состояние стола.
    TableState(TableView),

    /// Раздача закончилась этой командой.
    HandFinished {
        table: TableView,
        summary: HandSummary,
    },
}

impl CommandResponse {
    pub fn table(&self) -> &TableView {
        match self {
            CommandResponse::TableState(table) => table,
            CommandResponse::HandFinished { table, .. } => table,
        }
    }
}
