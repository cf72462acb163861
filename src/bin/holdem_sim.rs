// src/bin/holdem_sim.rs

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{info, warn};

use holdem_engine::domain::chips::Chips;
use holdem_engine::domain::table::{Table, TableConfig, MAX_SEATS};
use holdem_engine::engine::{EngineError, HandStatus, ManagerError, RandomSource, TableManager};
use holdem_engine::eval::describe_hand;
use holdem_engine::infra::{DeterministicRng, IdGenerator, SystemRng};

/// Симуляция стола с ботами: N мест, M раздач.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Сколько ботов посадить (2..=9).
    #[arg(short, long, default_value_t = 6)]
    players: u8,

    /// Сколько раздач сыграть.
    #[arg(short = 'n', long, default_value_t = 100)]
    hands: u64,

    /// JSON с конфигом стола (TableConfig).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed для воспроизводимой симуляции.
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match load_config(args.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("конфиг: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match args.seed {
        Some(seed) => run(&args, config, &mut DeterministicRng::from_seed(seed)),
        None => run(&args, config, &mut SystemRng),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{msg}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<TableConfig, String> {
    let config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
            TableConfig::from_json_str(&raw).map_err(|e| e.to_string())?
        }
        None => TableConfig::default(),
    };
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn run<R: RandomSource>(args: &Args, config: TableConfig, rng: &mut R) -> Result<(), String> {
    let players = args.players.clamp(2, config.max_seats.min(MAX_SEATS));
    let buy_in = config.buy_in;

    let ids = IdGenerator::new();
    let table_id = ids.next_table_id();
    let mut manager = TableManager::new();
    manager.add_table(Table::new(table_id, "SIM".to_string(), config));

    for seat in 0..players {
        manager
            .sit_down(table_id, seat, ids.next_player_id(), buy_in, true)
            .map_err(|e| e.to_string())?;
    }
    let expected_total = Chips(buy_in.0 * players as u64);

    println!("holdem_sim: {players} ботов, бай-ин {buy_in}, раздач {}", args.hands);

    let mut played = 0u64;
    for _ in 0..args.hands {
        let hand_id = ids.next_hand_id();
        let mut status = match manager.start_hand(table_id, rng, hand_id) {
            Ok(status) => status,
            Err(ManagerError::Engine(EngineError::NotEnoughPlayers)) => {
                warn!("игроков с фишками меньше двух – стоп");
                break;
            }
            Err(e) => return Err(e.to_string()),
        };

        while !status.is_finished() {
            status = manager.run_bots(table_id, rng).map_err(|e| e.to_string())?;
            if !status.is_finished() && !manager.has_active_hand(table_id) {
                return Err(format!("раздача {hand_id} зависла без актёра"));
            }
        }

        if let HandStatus::Finished(summary, _) = &status {
            for r in summary.winners() {
                let hand = r
                    .hand
                    .as_ref()
                    .map(describe_hand)
                    .unwrap_or_else(|| "без вскрытия".to_string());
                info!(
                    "раздача {}: место {} выиграло {} ({})",
                    summary.hand_id, r.seat, r.won, hand
                );
            }
        }
        played += 1;

        let total = manager.table(table_id).map(|t| t.total_chips()).unwrap_or_default();
        if total != expected_total {
            return Err(format!(
                "фишки не сходятся после раздачи {hand_id}: {total} вместо {expected_total}"
            ));
        }
    }

    println!();
    println!("Сыграно раздач: {played}");
    if let Some(table) = manager.table(table_id) {
        for (seat, p) in table.occupied() {
            println!("  место {seat}: игрок {} – {}", p.player_id, p.stack);
        }
    }
    Ok(())
}
