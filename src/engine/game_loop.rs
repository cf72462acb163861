use std::collections::{BTreeMap, HashMap};

use log::{debug, error, info, warn};

use crate::domain::chips::Chips;
use crate::domain::deck::{Deck, DeckExhausted};
use crate::domain::hand::{EvaluatedHand, HandSummary, PlayerHandResult, Street};
use crate::domain::player::PlayerStatus;
use crate::domain::table::Table;
use crate::domain::{HandId, SeatIndex, TableId};
use crate::eval::evaluate_best_hand;
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{assign_blinds, next_dealer, seats_after, BlindSeats};
use crate::engine::pot::Pot;
use crate::engine::showdown::distribute_pot;
use crate::engine::validation::{legal_actions, validate_action, LegalActions};
use crate::engine::RandomSource;

/// Статус раздачи для внешнего кода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStatus {
    Ongoing,
    Finished(HandSummary, HandHistory),
}

impl HandStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, HandStatus::Finished(..))
    }

    pub fn summary(&self) -> Option<&HandSummary> {
        match self {
            HandStatus::Finished(summary, _) => Some(summary),
            HandStatus::Ongoing => None,
        }
    }
}

/// Внутреннее состояние раздачи.
#[derive(Clone, Debug)]
pub struct HandEngine {
    pub table_id: TableId,
    pub hand_id: HandId,
    pub deck: Deck,
    pub blinds: BlindSeats,
    pub betting: BettingState,
    pub pot: Pot,
    /// Сколько всего фишек внёс каждый seat (для side pots и возврата при аборте).
    pub contributions: HashMap<SeatIndex, Chips>,
    pub history: HandHistory,
}

impl HandEngine {
    fn new(table_id: TableId, hand_id: HandId, deck: Deck, blinds: BlindSeats) -> Self {
        Self {
            table_id,
            hand_id,
            deck,
            blinds,
            betting: BettingState::new(Street::Preflop, Chips::ZERO, Vec::new()),
            pot: Pot::new(),
            contributions: HashMap::new(),
            history: HandHistory::new(),
        }
    }

    /// Чей сейчас ход (seat).
    pub fn current_actor(&self) -> Option<SeatIndex> {
        self.betting.current_seat()
    }

    /// Индекс текущего актёра среди тех, кто ещё в раздаче, в порядке хода улицы.
    /// Сфолдившие по ходу раунда из счёта выпадают, олл-ин остаются.
    pub fn active_player_index(&self, table: &Table) -> Option<usize> {
        let actor = self.current_actor()?;
        self.betting
            .order
            .iter()
            .filter(|&&seat| table.player(seat).map(|p| p.is_in_hand()).unwrap_or(false))
            .position(|&seat| seat == actor)
    }
}

/// Старт новой раздачи:
/// - двигает кнопку и назначает блайнды;
/// - постит блайнды;
/// - раздаёт карманные карты из свежей колоды;
/// - настраивает BettingState и первого актёра.
///
/// Если после блайндов ходить некому (все в олл-ине), `current_actor()` будет `None` –
/// тогда вызывающий код должен сразу вызвать `advance_if_needed`.
pub fn start_hand<R: RandomSource>(
    table: &mut Table,
    rng: &mut R,
    new_hand_id: HandId,
) -> Result<HandEngine, EngineError> {
    if table.hand_in_progress {
        return Err(EngineError::HandAlreadyInProgress);
    }

    for p in table.seats.iter_mut().flatten() {
        p.reset_for_hand();
    }
    if table.in_hand_count() < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }

    let dealer = next_dealer(table).ok_or(EngineError::NotEnoughPlayers)?;
    let blinds = assign_blinds(table, dealer).ok_or(EngineError::NotEnoughPlayers)?;

    table.board.clear();
    table.total_pot = Chips::ZERO;
    table.current_hand_id = Some(new_hand_id);
    table.street = Street::Preflop;
    table.hand_in_progress = true;
    table.dealer_button = Some(blinds.dealer);
    table.small_blind_seat = Some(blinds.small_blind);
    table.big_blind_seat = Some(blinds.big_blind);

    let mut engine = HandEngine::new(table.id, new_hand_id, Deck::shuffled(rng), blinds);
    engine.history.push(HandEventKind::HandStarted {
        table_id: table.id,
        hand_id: new_hand_id,
    });

    post_blinds(table, &mut engine)?;

    if let Err(e) = deal_hole_cards(table, &mut engine) {
        abort_hand(table, &mut engine, &e);
        return Err(e.into());
    }

    // Префлоп: первым ходит следующий после BB.
    let mut betting = BettingState::new(
        Street::Preflop,
        engine.betting.current_bet,
        seats_after(table, blinds.big_blind),
    );
    betting.cursor = betting.find_next_from(table, 0);
    engine.betting = betting;

    info!(
        "стол {}: раздача {} началась, дилер {}, SB {}, BB {}",
        table.id, new_hand_id, blinds.dealer, blinds.small_blind, blinds.big_blind
    );

    Ok(engine)
}

/// Постинг блайндов. Суммы ограничены стеком – короткий игрок уходит в олл-ин.
fn post_blinds(table: &mut Table, engine: &mut HandEngine) -> Result<(), EngineError> {
    let stakes = table.config.stakes.clone();
    let BlindSeats {
        dealer,
        small_blind,
        big_blind,
    } = engine.blinds;

    let sb_paid = commit_chips(table, engine, small_blind, stakes.small_blind)?;
    let bb_paid = commit_chips(table, engine, big_blind, stakes.big_blind)?;

    engine.betting.current_bet = sb_paid.max(bb_paid);

    engine.history.push(HandEventKind::BlindsPosted {
        dealer,
        small_blind: (small_blind, sb_paid),
        big_blind: (big_blind, bb_paid),
    });
    Ok(())
}

/// Переложить фишки игрока в банк (не больше стека). Возвращает, сколько реально ушло.
fn commit_chips(
    table: &mut Table,
    engine: &mut HandEngine,
    seat: SeatIndex,
    amount: Chips,
) -> Result<Chips, EngineError> {
    let player = table.player_mut(seat).ok_or(EngineError::EmptySeat)?;
    let paid = amount.min(player.stack);

    player.stack -= paid;
    player.current_bet += paid;
    player.total_bet += paid;
    if player.stack.is_zero() && player.status == PlayerStatus::Active {
        player.status = PlayerStatus::AllIn;
    }

    if !paid.is_zero() {
        engine.pot.add(paid);
        *engine.contributions.entry(seat).or_insert(Chips::ZERO) += paid;
    }
    table.total_pot = engine.pot.total;
    Ok(paid)
}

/// Раздача карманных карт – по 2 карты, по кругу, начиная слева от дилера.
fn deal_hole_cards(table: &mut Table, engine: &mut HandEngine) -> Result<(), DeckExhausted> {
    let order = seats_after(table, engine.blinds.dealer);

    for _round in 0..2 {
        for &seat in &order {
            let card = engine.deck.deal_one()?;
            if let Some(p) = table.player_mut(seat) {
                p.hole_cards.push(card);
            }
        }
    }

    for &seat in &order {
        if let Some(p) = table.player(seat) {
            engine.history.push(HandEventKind::HoleCardsDealt {
                seat,
                cards: p.hole_cards.clone(),
            });
        }
    }
    Ok(())
}

/// Общие проверки перед любым действием: раздача идёт, место валидное, игрок в игре, его ход, действие легально.
fn check_action(table: &Table, engine: &HandEngine, action: &PlayerAction) -> Result<(), EngineError> {
    if !table.hand_in_progress {
        return Err(EngineError::NoActiveHand);
    }
    if action.seat as usize >= table.seats.len() {
        return Err(EngineError::InvalidSeat(action.seat));
    }

    let player = table.player(action.seat).ok_or(EngineError::EmptySeat)?;
    if !player.is_in_hand() {
        return Err(EngineError::PlayerNotInHand(action.seat));
    }
    if engine.current_actor() != Some(action.seat) {
        return Err(EngineError::NotPlayersTurn(action.seat));
    }

    validate_action(action.seat, player, &action.kind, &engine.betting, table.big_blind())
}

/// Применить действие игрока. Возвращает статус раздачи (идёт / закончилась).
///
/// При ошибке состояние не меняется (кроме `DeckExhausted`, см. `abort_hand`).
pub fn apply_action(
    table: &mut Table,
    engine: &mut HandEngine,
    action: PlayerAction,
) -> Result<HandStatus, EngineError> {
    if let Err(e) = check_action(table, engine, &action) {
        warn!("стол {}: отклонено {} от места {}: {}", table.id, action.kind, action.seat, e);
        return Err(e);
    }

    let seat = action.seat;
    let mut paid = Chips::ZERO;

    match action.kind {
        PlayerActionKind::Fold => {
            let player = table.player_mut(seat).ok_or(EngineError::EmptySeat)?;
            player.status = PlayerStatus::Folded;
        }

        PlayerActionKind::Check => {}

        PlayerActionKind::Call => {
            let to_call = table
                .player(seat)
                .map(|p| p.to_call(engine.betting.current_bet))
                .ok_or(EngineError::EmptySeat)?;
            paid = commit_chips(table, engine, seat, to_call)?;
        }

        PlayerActionKind::RaiseTo(total_bet) => {
            let bet_before = engine.betting.current_bet;
            let player_bet = table
                .player(seat)
                .map(|p| p.current_bet)
                .ok_or(EngineError::EmptySeat)?;

            paid = commit_chips(table, engine, seat, total_bet - player_bet)?;
            engine.betting.on_raise(total_bet, total_bet - bet_before);
            reopen_action(table, seat);
        }
    }

    let (new_stack, all_in) = {
        let player = table.player_mut(seat).ok_or(EngineError::EmptySeat)?;
        player.has_acted = true;
        (player.stack, player.status == PlayerStatus::AllIn)
    };

    engine.history.push(HandEventKind::PlayerActed {
        seat,
        action: action.kind,
        paid,
        new_stack,
        pot_after: engine.pot.total,
        all_in,
    });
    debug!(
        "стол {}: место {} – {}, банк {}",
        table.id, seat, action.kind, engine.pot.total
    );

    after_action(table, engine)
}

/// Действие за игрока по таймауту. Те же проверки, что и у обычного действия.
pub fn force_action(
    table: &mut Table,
    engine: &mut HandEngine,
    action: PlayerAction,
) -> Result<HandStatus, EngineError> {
    check_action(table, engine, &action)?;

    warn!(
        "стол {}: место {} не успело, выполняем {}",
        table.id, action.seat, action.kind
    );
    engine.history.push(HandEventKind::ActionForced {
        seat: action.seat,
        action: action.kind,
    });
    apply_action(table, engine, action)
}

/// Игрок встаёт из-за стола посреди раздачи: это немедленный fold,
/// его фишки остаются в банке, место освобождается после раздачи.
pub fn leave_hand(
    table: &mut Table,
    engine: &mut HandEngine,
    seat: SeatIndex,
) -> Result<HandStatus, EngineError> {
    if !table.hand_in_progress {
        return Err(EngineError::NoActiveHand);
    }
    if seat as usize >= table.seats.len() {
        return Err(EngineError::InvalidSeat(seat));
    }
    let player = table.player_mut(seat).ok_or(EngineError::EmptySeat)?;
    player.leaving = true;
    if !player.is_in_hand() {
        return Ok(HandStatus::Ongoing);
    }
    player.status = PlayerStatus::Folded;
    player.has_acted = true;

    engine.history.push(HandEventKind::PlayerLeft { seat });
    info!("стол {}: место {} встало посреди раздачи", table.id, seat);

    if table.in_hand_count() == 1 {
        return finish_hand_without_showdown(table, engine);
    }
    if engine.betting.is_round_complete(table) {
        return advance_if_needed(table, engine);
    }
    if engine.current_actor() == Some(seat) {
        engine.betting.advance(table);
    }
    Ok(HandStatus::Ongoing)
}

/// Что может сделать место прямо сейчас (пусто, если не его ход).
pub fn legal_actions_for(table: &Table, engine: &HandEngine, seat: SeatIndex) -> LegalActions {
    if !table.hand_in_progress || engine.current_actor() != Some(seat) {
        return LegalActions::none();
    }
    match table.player(seat) {
        Some(p) => legal_actions(p, &engine.betting, table.big_blind()),
        None => LegalActions::none(),
    }
}

/// После рейза все остальные не сфолдившие должны ответить заново.
fn reopen_action(table: &mut Table, raiser: SeatIndex) {
    for (idx, p) in table.seats.iter_mut().enumerate() {
        if let Some(p) = p {
            if idx as SeatIndex != raiser && p.is_in_hand() {
                p.has_acted = false;
            }
        }
    }
}

/// Что делать после действия: конец раздачи, конец улицы или передача хода.
fn after_action(table: &mut Table, engine: &mut HandEngine) -> Result<HandStatus, EngineError> {
    // Остался один не сфолдивший – он забирает банк без вскрытия.
    if table.in_hand_count() == 1 {
        return finish_hand_without_showdown(table, engine);
    }

    if engine.betting.is_round_complete(table) {
        return advance_if_needed(table, engine);
    }

    engine.betting.advance(table);
    if engine.current_actor().is_none() {
        return Err(EngineError::Internal("раунд не завершён, но ходить некому"));
    }
    Ok(HandStatus::Ongoing)
}

/// Переход улиц / шоудаун.
///
/// Если на новой улице ставить может меньше двух игроков (остальные в олл-ине),
/// борд докладывается без торговли до самого ривера.
pub fn advance_if_needed(
    table: &mut Table,
    engine: &mut HandEngine,
) -> Result<HandStatus, EngineError> {
    loop {
        let (next_street, count) = match table.street.next() {
            Some(next) => next,
            None if table.street == Street::River => {
                return finish_hand_with_showdown(table, engine);
            }
            None => return Err(EngineError::Internal("попытка advance на Showdown")),
        };

        if let Err(e) = deal_board_cards(table, engine, count, next_street) {
            abort_hand(table, engine, &e);
            return Err(e.into());
        }
        reset_bets_for_new_street(table, engine, next_street);

        if table.can_act_count() >= 2 && engine.current_actor().is_some() {
            return Ok(HandStatus::Ongoing);
        }
        debug!("стол {}: торговли нет, открываем дальше", table.id);
    }
}

/// Открыть board карты.
fn deal_board_cards(
    table: &mut Table,
    engine: &mut HandEngine,
    count: usize,
    street: Street,
) -> Result<(), DeckExhausted> {
    let cards = engine.deck.deal(count)?;
    table.board.extend(cards);
    table.street = street;

    engine.history.push(HandEventKind::BoardDealt {
        street,
        cards: table.board.clone(),
    });
    engine.history.push(HandEventKind::StreetChanged { street });
    debug!("стол {}: {:?}, борд {:?}", table.id, street, table.board);
    Ok(())
}

/// Сбросить ставки улицы, построить новый порядок хода: первый не сфолдивший после дилера.
fn reset_bets_for_new_street(table: &mut Table, engine: &mut HandEngine, street: Street) {
    for p in table.seats.iter_mut().flatten() {
        p.current_bet = Chips::ZERO;
        p.has_acted = false;
    }

    let mut betting = BettingState::new(street, Chips::ZERO, seats_after(table, engine.blinds.dealer));
    betting.cursor = betting.find_next_from(table, 0);
    engine.betting = betting;
}

/// Завершение раздачи без шоудауна (все сфолдили, остался один).
fn finish_hand_without_showdown(
    table: &mut Table,
    engine: &mut HandEngine,
) -> Result<HandStatus, EngineError> {
    let winner = table
        .occupied()
        .find(|(_, p)| p.is_in_hand())
        .map(|(seat, _)| seat)
        .ok_or(EngineError::InvalidSeatState("не осталось ни одного игрока"))?;

    let mut awards = BTreeMap::new();
    awards.insert(winner, engine.pot.total);

    conclude_hand(table, engine, awards, BTreeMap::new(), false)
}

/// Завершение раздачи с шоудауном и side pots.
fn finish_hand_with_showdown(
    table: &mut Table,
    engine: &mut HandEngine,
) -> Result<HandStatus, EngineError> {
    let contenders: Vec<(SeatIndex, Vec<_>)> = table
        .occupied()
        .filter(|(_, p)| p.is_in_hand())
        .map(|(seat, p)| (seat, p.hole_cards.clone()))
        .collect();

    let mut hands: BTreeMap<SeatIndex, EvaluatedHand> = BTreeMap::new();
    for (seat, hole_cards) in contenders {
        let hand = evaluate_best_hand(&hole_cards, &table.board);
        engine.history.push(HandEventKind::ShowdownReveal {
            seat,
            hole_cards,
            hand: hand.clone(),
        });
        hands.insert(seat, hand);
    }

    let awards = distribute_pot(&engine.contributions, &hands)?;

    conclude_hand(table, engine, awards, hands, true)
}

/// Выплатить выигрыши, собрать итог и закрыть раздачу.
fn conclude_hand(
    table: &mut Table,
    engine: &mut HandEngine,
    awards: BTreeMap<SeatIndex, Chips>,
    mut hands: BTreeMap<SeatIndex, EvaluatedHand>,
    went_to_showdown: bool,
) -> Result<HandStatus, EngineError> {
    let street_reached = table.street;
    let total_pot = engine.pot.take();

    for (&seat, &amount) in &awards {
        let player = table
            .player_mut(seat)
            .ok_or(EngineError::InvalidSeatState("победитель без места"))?;
        player.stack += amount;
        engine.history.push(HandEventKind::PotAwarded { seat, amount });
    }

    let results: Vec<PlayerHandResult> = table
        .occupied()
        .filter(|(_, p)| p.status != PlayerStatus::SittingOut)
        .map(|(seat, p)| {
            let contributed = engine.contributions.get(&seat).copied().unwrap_or(Chips::ZERO);
            let won = awards.get(&seat).copied().unwrap_or(Chips::ZERO);
            PlayerHandResult {
                seat,
                player_id: p.player_id,
                hand: hands.remove(&seat),
                contributed,
                won,
                net_chips: won.signed_diff(contributed),
                is_winner: !won.is_zero(),
            }
        })
        .collect();

    engine.history.push(HandEventKind::HandFinished {
        hand_id: engine.hand_id,
        table_id: engine.table_id,
    });

    let summary = HandSummary {
        hand_id: engine.hand_id,
        table_id: engine.table_id,
        street_reached,
        board: table.board.clone(),
        total_pot,
        went_to_showdown,
        results,
    };

    info!(
        "стол {}: раздача {} завершена, банк {}, победители {:?}",
        table.id,
        engine.hand_id,
        total_pot,
        awards.keys().collect::<Vec<_>>()
    );

    close_hand(table);
    Ok(HandStatus::Finished(summary, engine.history.clone()))
}

/// Прервать раздачу (колода кончилась): вернуть каждому его взнос.
pub fn abort_hand(table: &mut Table, engine: &mut HandEngine, reason: &DeckExhausted) {
    error!(
        "стол {}: раздача {} прервана: {}",
        table.id, engine.hand_id, reason
    );

    for (&seat, &amount) in &engine.contributions {
        if let Some(p) = table.player_mut(seat) {
            p.stack += amount;
        }
    }
    engine.pot.take();
    engine.contributions.clear();

    engine.history.push(HandEventKind::HandAborted {
        reason: reason.to_string(),
    });
    close_hand(table);
}

/// Общая уборка после раздачи: флаги, карты, ушедшие игроки.
fn close_hand(table: &mut Table) {
    table.street = Street::Showdown;
    table.hand_in_progress = false;
    table.total_pot = Chips::ZERO;
    table.hands_played += 1;

    for seat_opt in table.seats.iter_mut() {
        if seat_opt.as_ref().map(|p| p.leaving).unwrap_or(false) {
            *seat_opt = None;
        } else if let Some(p) = seat_opt {
            p.current_bet = Chips::ZERO;
            p.has_acted = false;
            p.hole_cards.clear();
            if p.stack.is_zero() {
                p.status = PlayerStatus::SittingOut;
            }
        }
    }
}
