use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};
use crate::domain::chips::Chips;
use crate::domain::player::PlayerAtTable;
use crate::engine::actions::PlayerActionKind;
use crate::engine::validation::LegalActions;
use crate::engine::RandomSource;

/// Настройки эвристики бота. Проценты – шанс из 100.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BotPolicy {
    /// Шанс повысить с сильной рукой, когда есть ставка.
    pub raise_percent: u32,
    /// Шанс открыть торговлю минимальной ставкой, когда долга нет.
    pub open_percent: u32,
    /// Долг больше стольких BB считается большим для слабой руки.
    pub fold_over_big_blinds: u64,
}

impl Default for BotPolicy {
    fn default() -> Self {
        Self {
            raise_percent: 20,
            open_percent: 10,
            fold_over_big_blinds: 2,
        }
    }
}

/// Есть ли у руки "что-то": пара (в руке или с бордом) или старшая карта от валета.
pub fn has_strength(hole_cards: &[Card], board: &[Card]) -> bool {
    let high_card = hole_cards.iter().any(|c| c.rank >= Rank::Jack);
    let pocket_pair = hole_cards.len() == 2 && hole_cards[0].rank == hole_cards[1].rank;
    let paired_board = hole_cards
        .iter()
        .any(|h| board.iter().any(|b| b.rank == h.rank));

    high_card || pocket_pair || paired_board
}

impl BotPolicy {
    /// Выбрать действие. Результат всегда входит в `legal`.
    pub fn decide<R: RandomSource>(
        &self,
        player: &PlayerAtTable,
        board: &[Card],
        legal: &LegalActions,
        big_blind: Chips,
        rng: &mut R,
    ) -> PlayerActionKind {
        let strong = has_strength(&player.hole_cards, board);

        if legal.can_check {
            return match legal.min_raise_to {
                Some(min) if strong && self.roll(rng, self.open_percent) => PlayerActionKind::RaiseTo(min),
                _ => PlayerActionKind::Check,
            };
        }

        let Some(owed) = legal.call_amount else {
            return PlayerActionKind::Fold;
        };

        if strong {
            return match legal.min_raise_to {
                Some(min) if self.roll(rng, self.raise_percent) => PlayerActionKind::RaiseTo(min),
                _ => PlayerActionKind::Call,
            };
        }

        let big_owed = owed > Chips(big_blind.0.saturating_mul(self.fold_over_big_blinds));
        let big_for_stack = owed.0.saturating_mul(4) > player.stack.0;
        if big_owed || big_for_stack {
            PlayerActionKind::Fold
        } else {
            PlayerActionKind::Call
        }
    }

    fn roll<R: RandomSource>(&self, rng: &mut R, percent: u32) -> bool {
        percent > 0 && rng.below(100) < percent
    }
}
