use serde::{Deserialize, Serialize};

use crate::domain::{CardValue, Color, PlayerIndex};

/// Тип события матча. Скрытые значения сюда не попадают:
/// история публичная и может отдаваться любому зрителю.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum MatchEventKind {
    /// Матч перешёл в setup, выбран первый игрок.
    MatchStarted {
        match_index: u64,
        starting_player: PlayerIndex,
    },

    /// Игрок отправил стартовый выбор (только цвета).
    SelectionCommitted {
        player: PlayerIndex,
        colors: Vec<Color>,
    },

    /// Стартовые руки розданы, стопка собрана.
    HandsDealt { pile_size: usize },

    /// Игрок взял карту из стопки (цвет виден всем).
    CardDrawn {
        player: PlayerIndex,
        pile_index: usize,
        color: Color,
    },

    /// Игрок выложил взятую карту.
    CardPlaced {
        player: PlayerIndex,
        position: usize,
    },

    /// Догадка и её результат.
    Guessed {
        player: PlayerIndex,
        target_index: usize,
        value: CardValue,
        correct: bool,
    },

    /// Позиция руки открыта (после верной догадки соперника или штрафа).
    CardRevealed {
        owner: PlayerIndex,
        index: usize,
    },

    /// Ход передан.
    TurnPassed { next_player: PlayerIndex },

    /// Матч окончен.
    MatchFinished { winner: PlayerIndex },
}

/// Событие с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchEvent {
    pub index: u32,
    pub kind: MatchEventKind,
}

/// Полная история текущего матча.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchHistory {
    pub events: Vec<MatchEvent>,
}

impl MatchHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: MatchEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(MatchEvent { index: idx, kind });
    }

    pub fn last(&self) -> Option<&MatchEventKind> {
        self.events.last().map(|e| &e.kind)
    }

    /// Последняя догадка (для «lastGuess» на клиенте).
    pub fn last_guess(&self) -> Option<&MatchEventKind> {
        self.events
            .iter()
            .rev()
            .map(|e| &e.kind)
            .find(|k| matches!(k, MatchEventKind::Guessed { .. }))
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
