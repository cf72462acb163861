use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};
use crate::engine::RandomSource;

/// В колоде не осталось столько карт, сколько попросили.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("колода исчерпана: запрошено {requested}, осталось {remaining}")]
pub struct DeckExhausted {
    pub requested: usize,
    pub remaining: usize,
}

/// Колода карт: упорядоченный список + курсор.
///
/// Карты берутся с начала списка, `cards[..next]` уже розданы,
/// `cards[next..]` ещё в колоде. Вместе это всегда все 52 карты без повторов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Spades 2..A, Hearts 2..A, Diamonds 2..A, Clubs 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards, next: 0 }
    }

    /// Колода, где сверху лежат `top` (в этом порядке), дальше остальные карты
    /// в стандартном порядке. Повторы в `top` пропускаются. Для реплеев и тестов.
    pub fn with_top_cards(top: &[Card]) -> Self {
        let mut cards: Vec<Card> = Vec::with_capacity(52);
        for card in top {
            if !cards.contains(card) {
                cards.push(*card);
            }
        }
        let rest: Vec<Card> = Self::standard_52()
            .cards
            .into_iter()
            .filter(|c| !cards.contains(c))
            .collect();
        cards.extend(rest);
        Deck { cards, next: 0 }
    }

    /// Свежая перемешанная колода (на каждую раздачу – новая).
    pub fn shuffled<R: RandomSource>(rng: &mut R) -> Self {
        let mut deck = Self::standard_52();
        deck.shuffle(rng);
        deck
    }

    /// Перемешать все 52 карты и вернуть курсор в начало.
    pub fn shuffle<R: RandomSource>(&mut self, rng: &mut R) {
        self.next = 0;
        rng.shuffle(&mut self.cards);
    }

    /// Сколько карт ещё можно раздать.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }

    /// Ещё не розданные карты (в порядке раздачи).
    pub fn remaining_cards(&self) -> &[Card] {
        &self.cards[self.next..]
    }

    /// Уже розданные карты (в порядке раздачи).
    pub fn dealt(&self) -> &[Card] {
        &self.cards[..self.next]
    }

    /// Взять `n` карт сверху колоды.
    ///
    /// Если карт не хватает – ничего не берём и возвращаем ошибку.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, DeckExhausted> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(DeckExhausted {
                requested: n,
                remaining,
            });
        }
        let taken = self.cards[self.next..self.next + n].to_vec();
        self.next += n;
        Ok(taken)
    }

    /// Взять одну карту.
    pub fn deal_one(&mut self) -> Result<Card, DeckExhausted> {
        let remaining = self.remaining();
        match self.cards.get(self.next).copied() {
            Some(card) => {
                self.next += 1;
                Ok(card)
            }
            None => Err(DeckExhausted {
                requested: 1,
                remaining,
            }),
        }
    }
}
