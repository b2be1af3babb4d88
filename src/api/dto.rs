use serde::{Deserialize, Serialize};

use crate::domain::{Card, PlayerIndex};
use crate::engine::{GuessOutcome, MatchStatus, PlayerView};

/// DTO результата догадки (рассылается обоим игрокам).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuessResultDto {
    pub correct: bool,
    pub game_over: bool,
    pub winner: Option<PlayerIndex>,
    /// Имя победителя для экрана «игра окончена».
    pub winner_name: Option<String>,
    pub revealed_owner: Option<PlayerIndex>,
    pub revealed_index: Option<usize>,
}

impl GuessResultDto {
    pub fn from_outcome(outcome: GuessOutcome, resolve_name: impl Fn(PlayerIndex) -> Option<String>) -> Self {
        Self {
            correct: outcome.correct,
            game_over: outcome.game_over,
            winner: outcome.winner,
            winner_name: outcome.winner.and_then(resolve_name),
            revealed_owner: outcome.revealed.map(|(owner, _)| owner),
            revealed_index: outcome.revealed.map(|(_, idx)| idx),
        }
    }
}

/// DTO лобби.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LobbyViewDto {
    pub status: MatchStatus,
    pub players: Vec<PlayerView>,
    /// Оба места заняты, оба готовы, матч ещё не идёт.
    pub can_start: bool,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Успешный результат без доп.данных.
    Ok,

    /// Игрок сел на место.
    Joined { seat: PlayerIndex },

    /// Матч перешёл в setup.
    GameStarted { starting_player: PlayerIndex },

    /// Стартовый выбор принят; `dealt`: руки уже розданы.
    SelectionRecorded { dealt: bool },

    /// Взятая карта: только для взявшего игрока.
    CardDrawn { card: Card },

    /// Карта выложена на позицию.
    CardPlaced { position: usize },

    /// Результат догадки.
    GuessResult(GuessResultDto),
}
