// src/engine/table_manager.rs

use std::collections::HashMap;

use log::{debug, info};
use thiserror::Error;

use crate::bot::BotPolicy;
use crate::domain::chips::Chips;
use crate::domain::hand::HandSummary;
use crate::domain::player::PlayerAtTable;
use crate::domain::table::Table;
use crate::domain::{HandId, PlayerId, SeatIndex, TableId};
use crate::engine::hand_history::HandHistory;
use crate::engine::validation::LegalActions;
use crate::engine::{self, EngineError, HandEngine, HandStatus, PlayerAction, PlayerActionKind};
use crate::engine::RandomSource;
use crate::infra::persistence::BalanceLedger;

/// Ошибки уровня менеджера столов (над движком одной раздачи).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ManagerError {
    #[error("Стол {0} не найден")]
    TableNotFound(TableId),

    #[error("На столе {0} нет активной раздачи")]
    NoActiveHand(TableId),

    #[error("Место {seat} за столом {table_id} – не бот, или сейчас не его ход")]
    NotBotTurn { table_id: TableId, seat: SeatIndex },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Внутренний объект: один стол + опционально активный движок раздачи.
struct ManagedTable {
    table: Table,
    engine: Option<HandEngine>,
    last_summary: Option<HandSummary>,
    last_history: Option<HandHistory>,
}

impl ManagedTable {
    fn new(table: Table) -> Self {
        Self {
            table,
            engine: None,
            last_summary: None,
            last_history: None,
        }
    }

    fn engine_mut(&mut self) -> Result<(&mut Table, &mut HandEngine), ManagerError> {
        let table_id = self.table.id;
        match self.engine.as_mut() {
            Some(engine) if self.table.hand_in_progress => Ok((&mut self.table, engine)),
            _ => Err(ManagerError::NoActiveHand(table_id)),
        }
    }
}

/// Разобрать результат шага движка: закрыть раздачу, отдать выплаты в ledger.
fn settle(
    mt: &mut ManagedTable,
    ledger: &mut Option<Box<dyn BalanceLedger>>,
    result: Result<HandStatus, EngineError>,
) -> Result<HandStatus, ManagerError> {
    match result {
        Ok(HandStatus::Finished(summary, history)) => {
            if let Some(ledger) = ledger.as_mut() {
                ledger.record_hand(&summary);
            }
            mt.engine = None;
            mt.last_summary = Some(summary.clone());
            mt.last_history = Some(history.clone());
            Ok(HandStatus::Finished(summary, history))
        }
        Ok(HandStatus::Ongoing) => Ok(HandStatus::Ongoing),
        Err(e) => {
            // Раздача прервана (колода) – движок больше не нужен, история остаётся.
            if !mt.table.hand_in_progress {
                if let Some(engine) = mt.engine.take() {
                    mt.last_history = Some(engine.history);
                }
            }
            Err(e.into())
        }
    }
}

/// Менеджер столов – единственный владелец изменяемого состояния:
/// - хранит несколько столов по TableId;
/// - для каждого стола может быть активный HandEngine (текущая раздача);
/// - все мутации идут через `&mut self`, два действия одновременно применить нельзя.
pub struct TableManager {
    tables: HashMap<TableId, ManagedTable>,
    ledger: Option<Box<dyn BalanceLedger>>,
    bot_policy: BotPolicy,
}

impl Default for TableManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TableManager {
    /// Создать пустой менеджер.
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
            ledger: None,
            bot_policy: BotPolicy::default(),
        }
    }

    /// Менеджер, который сообщает итоги раздач во внешний ledger.
    pub fn with_ledger(ledger: Box<dyn BalanceLedger>) -> Self {
        Self {
            ledger: Some(ledger),
            ..Self::new()
        }
    }

    pub fn set_bot_policy(&mut self, policy: BotPolicy) {
        self.bot_policy = policy;
    }

    /// Добавить стол под его TableId.
    ///
    /// Если стол с таким id уже был – заменяем его.
    pub fn add_table(&mut self, table: Table) {
        let id = table.id;
        self.tables.insert(id, ManagedTable::new(table));
    }

    /// Есть ли стол с таким id.
    pub fn has_table(&self, table_id: TableId) -> bool {
        self.tables.contains_key(&table_id)
    }

    /// Получить ссылку на стол (read-only). Изменять стол можно только через методы менеджера.
    pub fn table(&self, table_id: TableId) -> Option<&Table> {
        self.tables.get(&table_id).map(|mt| &mt.table)
    }

    /// Есть ли активная раздача на столе.
    pub fn has_active_hand(&self, table_id: TableId) -> bool {
        self.hand_engine(table_id).is_some()
    }

    /// Получить ссылку на HandEngine (read-only) для стола.
    pub fn hand_engine(&self, table_id: TableId) -> Option<&HandEngine> {
        self.tables
            .get(&table_id)
            .filter(|mt| mt.table.hand_in_progress)
            .and_then(|mt| mt.engine.as_ref())
    }

    /// Текущий актёр на столе (если есть активная раздача).
    pub fn current_actor_seat(&self, table_id: TableId) -> Option<SeatIndex> {
        self.hand_engine(table_id).and_then(|e| e.current_actor())
    }

    /// Разрешённые действия для места (пусто, если не его ход).
    pub fn legal_actions(&self, table_id: TableId, seat: SeatIndex) -> LegalActions {
        match self.tables.get(&table_id) {
            Some(ManagedTable {
                table,
                engine: Some(engine),
                ..
            }) => engine::legal_actions_for(table, engine, seat),
            _ => LegalActions::none(),
        }
    }

    /// Итог последней законченной раздачи.
    pub fn last_summary(&self, table_id: TableId) -> Option<&HandSummary> {
        self.tables.get(&table_id).and_then(|mt| mt.last_summary.as_ref())
    }

    /// История последней законченной (или прерванной) раздачи.
    pub fn last_history(&self, table_id: TableId) -> Option<&HandHistory> {
        self.tables.get(&table_id).and_then(|mt| mt.last_history.as_ref())
    }

    /// Посадить игрока. Посреди раздачи он ждёт следующую (SittingOut).
    pub fn sit_down(
        &mut self,
        table_id: TableId,
        seat: SeatIndex,
        player_id: PlayerId,
        stack: Chips,
        is_bot: bool,
    ) -> Result<(), ManagerError> {
        let mt = self
            .tables
            .get_mut(&table_id)
            .ok_or(ManagerError::TableNotFound(table_id))?;

        let slot = mt
            .table
            .seats
            .get_mut(seat as usize)
            .ok_or(EngineError::InvalidSeat(seat))?;
        if slot.is_some() {
            return Err(EngineError::SeatOccupied(seat).into());
        }

        *slot = Some(if is_bot {
            PlayerAtTable::bot(player_id, stack)
        } else {
            PlayerAtTable::new(player_id, stack)
        });
        info!("стол {}: игрок {} сел на место {} со стеком {}", table_id, player_id, seat, stack);
        Ok(())
    }

    /// Игрок встаёт. Вне раздачи место освобождается сразу,
    /// в раздаче – fold немедленно, место освобождается после раздачи.
    pub fn leave_seat(&mut self, table_id: TableId, seat: SeatIndex) -> Result<HandStatus, ManagerError> {
        let mt = self
            .tables
            .get_mut(&table_id)
            .ok_or(ManagerError::TableNotFound(table_id))?;

        if mt.table.hand_in_progress {
            let (table, engine) = mt.engine_mut()?;
            let result = engine::leave_hand(table, engine, seat);
            return settle(mt, &mut self.ledger, result);
        }

        let slot = mt
            .table
            .seats
            .get_mut(seat as usize)
            .ok_or(EngineError::InvalidSeat(seat))?;
        if slot.take().is_none() {
            return Err(EngineError::EmptySeat.into());
        }
        info!("стол {}: место {} освободилось", table_id, seat);
        Ok(HandStatus::Ongoing)
    }

    /// Запустить новую раздачу на конкретном столе.
    ///
    /// hand_id генерируется снаружи (например, `infra::IdGenerator`).
    /// Если после блайндов ставить некому, борд докладывается сразу.
    pub fn start_hand<R: RandomSource>(
        &mut self,
        table_id: TableId,
        rng: &mut R,
        hand_id: HandId,
    ) -> Result<HandStatus, ManagerError> {
        let mt = self
            .tables
            .get_mut(&table_id)
            .ok_or(ManagerError::TableNotFound(table_id))?;

        let mut engine = engine::start_hand(&mut mt.table, rng, hand_id)?;
        let result = if engine.current_actor().is_none() {
            engine::advance_if_needed(&mut mt.table, &mut engine)
        } else {
            Ok(HandStatus::Ongoing)
        };
        mt.engine = Some(engine);

        settle(mt, &mut self.ledger, result)
    }

    /// Единая точка входа для действия игрока.
    pub fn submit_action(
        &mut self,
        table_id: TableId,
        action: PlayerAction,
    ) -> Result<HandStatus, ManagerError> {
        let mt = self
            .tables
            .get_mut(&table_id)
            .ok_or(ManagerError::TableNotFound(table_id))?;

        let (table, engine) = mt.engine_mut()?;
        let result = engine::apply_action(table, engine, action);
        settle(mt, &mut self.ledger, result)
    }

    /// Действие за игрока (вызывает внешний таймер). Проверки те же, что и у `submit_action`.
    pub fn force_action(
        &mut self,
        table_id: TableId,
        action: PlayerAction,
    ) -> Result<HandStatus, ManagerError> {
        let mt = self
            .tables
            .get_mut(&table_id)
            .ok_or(ManagerError::TableNotFound(table_id))?;

        let (table, engine) = mt.engine_mut()?;
        let result = engine::force_action(table, engine, action);
        settle(mt, &mut self.ledger, result)
    }

    /// Таймаут хода: check, если можно, иначе fold.
    pub fn timeout_action(&mut self, table_id: TableId, seat: SeatIndex) -> Result<HandStatus, ManagerError> {
        if !self.has_table(table_id) {
            return Err(ManagerError::TableNotFound(table_id));
        }
        if !self.has_active_hand(table_id) {
            return Err(ManagerError::NoActiveHand(table_id));
        }

        let kind = if self.legal_actions(table_id, seat).can_check {
            PlayerActionKind::Check
        } else {
            PlayerActionKind::Fold
        };
        self.force_action(table_id, PlayerAction::new(seat, kind))
    }

    /// Один ход бота, если сейчас ходит бот.
    pub fn bot_action<R: RandomSource>(
        &mut self,
        table_id: TableId,
        rng: &mut R,
    ) -> Result<HandStatus, ManagerError> {
        let mt = self
            .tables
            .get(&table_id)
            .ok_or(ManagerError::TableNotFound(table_id))?;
        let engine = mt
            .engine
            .as_ref()
            .filter(|_| mt.table.hand_in_progress)
            .ok_or(ManagerError::NoActiveHand(table_id))?;

        let seat = engine
            .current_actor()
            .ok_or(ManagerError::NoActiveHand(table_id))?;
        let player = mt
            .table
            .player(seat)
            .filter(|p| p.is_bot)
            .ok_or(ManagerError::NotBotTurn { table_id, seat })?;

        let legal = engine::legal_actions_for(&mt.table, engine, seat);
        let kind = self
            .bot_policy
            .decide(player, &mt.table.board, &legal, mt.table.big_blind(), rng);
        debug!("стол {}: бот на месте {} выбирает {}", table_id, seat, kind);

        self.submit_action(table_id, PlayerAction::new(seat, kind))
    }

    /// Прогнать ботов, пока ход у бота и раздача идёт.
    pub fn run_bots<R: RandomSource>(
        &mut self,
        table_id: TableId,
        rng: &mut R,
    ) -> Result<HandStatus, ManagerError> {
        if !self.has_table(table_id) {
            return Err(ManagerError::TableNotFound(table_id));
        }

        loop {
            let bot_turn = self
                .current_actor_seat(table_id)
                .and_then(|seat| self.table(table_id).and_then(|t| t.player(seat)))
                .map(|p| p.is_bot)
                .unwrap_or(false);
            if !bot_turn {
                return Ok(HandStatus::Ongoing);
            }

            let status = self.bot_action(table_id, rng)?;
            if status.is_finished() {
                return Ok(status);
            }
        }
    }
}
