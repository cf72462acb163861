//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основные функции:
//!   `evaluate(cards) -> EvaluatedHand` – 0..=7 карт;
//!   `evaluate_best_hand(hole, board)`;
//!   `compare_hands(a, b)` – полный порядок (категория, потом тай-брейкеры).

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate, evaluate_best_hand};
pub use hand_rank::{compare_hands, describe_hand};
