use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{HandId, PlayerId, SeatIndex, TableId};
use crate::engine::{HandStatus, PlayerAction, PlayerActionKind, RandomSource, TableManager};

use super::dto::CommandResponse;
use super::errors::ApiError;
use super::queries::table_view;

/// Команды, которые относятся к существующему столу.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TableCommand {
    /// Посадить игрока. Без `stack` – стандартный бай-ин стола.
    SitDown {
        table_id: TableId,
        seat: SeatIndex,
        player_id: PlayerId,
        #[serde(default)]
        stack: Option<Chips>,
        #[serde(default)]
        is_bot: bool,
    },

    /// Встать из-за стола (в раздаче – fold).
    Leave { table_id: TableId, seat: SeatIndex },

    /// Запустить новую раздачу (если сейчас нет активной).
    StartHand { table_id: TableId, hand_id: HandId },

    /// Действие игрока в раздаче.
    Act {
        table_id: TableId,
        seat: SeatIndex,
        action: PlayerActionKind,
    },

    /// Время хода вышло: check, если можно, иначе fold.
    Timeout { table_id: TableId, seat: SeatIndex },

    /// Прогнать ходы ботов, пока не дойдёт до живого игрока.
    RunBots { table_id: TableId },
}

impl TableCommand {
    pub fn table_id(&self) -> TableId {
        match self {
            TableCommand::SitDown { table_id, .. }
            | TableCommand::Leave { table_id, .. }
            | TableCommand::StartHand { table_id, .. }
            | TableCommand::Act { table_id, .. }
            | TableCommand::Timeout { table_id, .. }
            | TableCommand::RunBots { table_id } => *table_id,
        }
    }

    /// Чьими глазами показывать стол в ответе.
    fn viewer(&self) -> Option<SeatIndex> {
        match self {
            TableCommand::SitDown { seat, .. }
            | TableCommand::Act { seat, .. }
            | TableCommand::Timeout { seat, .. } => Some(*seat),
            TableCommand::Leave { .. }
            | TableCommand::StartHand { .. }
            | TableCommand::RunBots { .. } => None,
        }
    }
}

/// Применить команду к менеджеру столов.
pub fn handle_command<R: RandomSource>(
    manager: &mut TableManager,
    rng: &mut R,
    command: TableCommand,
) -> Result<CommandResponse, ApiError> {
    let table_id = command.table_id();
    let viewer = command.viewer();

    let status = match command {
        TableCommand::SitDown {
            seat,
            player_id,
            stack,
            is_bot,
            ..
        } => {
            let buy_in = manager
                .table(table_id)
                .map(|t| t.config.buy_in)
                .ok_or(ApiError::TableNotFound(table_id))?;
            manager.sit_down(table_id, seat, player_id, stack.unwrap_or(buy_in), is_bot)?;
            HandStatus::Ongoing
        }
        TableCommand::Leave { seat, .. } => manager.leave_seat(table_id, seat)?,
        TableCommand::StartHand { hand_id, .. } => manager.start_hand(table_id, rng, hand_id)?,
        TableCommand::Act { seat, action, .. } => {
            manager.submit_action(table_id, PlayerAction::new(seat, action))?
        }
        TableCommand::Timeout { seat, .. } => manager.timeout_action(table_id, seat)?,
        TableCommand::RunBots { .. } => manager.run_bots(table_id, rng)?,
    };

    let table = table_view(manager, table_id, viewer)?;
    Ok(match status {
        HandStatus::Ongoing => CommandResponse::TableState(table),
        HandStatus::Finished(summary, _history) => CommandResponse::HandFinished { table, summary },
    })
}

/// То же, но команда приходит строкой JSON.
pub fn handle_json_command<R: RandomSource>(
    manager: &mut TableManager,
    rng: &mut R,
    json: &str,
) -> Result<CommandResponse, ApiError> {
    let command: TableCommand = serde_json::from_str(json)?;
    handle_command(manager, rng, command)
}
