use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Color, PlayerIndex};

/// Ошибки движка. Все они локальные и восстановимые: операция либо
/// применяется целиком, либо состояние не меняется.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Для старта нужны два готовых игрока")]
    NotEnoughPlayers,

    #[error("Оба места в лобби уже заняты")]
    LobbyFull,

    #[error("Игрок {0} не найден")]
    UnknownPlayer(PlayerIndex),

    #[error("Операция недопустима в текущей фазе")]
    WrongPhase,

    #[error("Сейчас не ход игрока {0}")]
    NotYourTurn(PlayerIndex),

    #[error("Индекс {0} недопустим")]
    InvalidIndex(usize),

    #[error("Позиция {position} вне диапазона 0..={len}")]
    InvalidPosition { position: usize, len: usize },

    #[error("Нужно выбрать ровно {expected} карт, получено {got}")]
    InvalidSelectionSize { expected: usize, got: usize },

    #[error("Недопустимое значение для угадывания")]
    InvalidGuessValue,

    #[error("В пуле не осталось значений цвета {0}")]
    NoValuesAvailable(Color),

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}

/// Дискриминант ошибки для транспорта (без полей).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorKind {
    NotEnoughPlayers,
    LobbyFull,
    UnknownPlayer,
    WrongPhase,
    NotYourTurn,
    InvalidIndex,
    InvalidPosition,
    InvalidSelectionSize,
    InvalidGuessValue,
    NoValuesAvailable,
    Internal,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::NotEnoughPlayers => ErrorKind::NotEnoughPlayers,
            EngineError::LobbyFull => ErrorKind::LobbyFull,
            EngineError::UnknownPlayer(_) => ErrorKind::UnknownPlayer,
            EngineError::WrongPhase => ErrorKind::WrongPhase,
            EngineError::NotYourTurn(_) => ErrorKind::NotYourTurn,
            EngineError::InvalidIndex(_) => ErrorKind::InvalidIndex,
            EngineError::InvalidPosition { .. } => ErrorKind::InvalidPosition,
            EngineError::InvalidSelectionSize { .. } => ErrorKind::InvalidSelectionSize,
            EngineError::InvalidGuessValue => ErrorKind::InvalidGuessValue,
            EngineError::NoValuesAvailable(_) => ErrorKind::NoValuesAvailable,
            EngineError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Нарушение внутреннего инварианта, а не ошибка пользователя.
    pub fn is_invariant_breach(&self) -> bool {
        matches!(
            self,
            EngineError::NoValuesAvailable(_) | EngineError::Internal(_)
        )
    }
}
