use serde::{Deserialize, Serialize};

use crate::engine::{EngineError, ErrorKind};

/// Ошибки внешнего API (то, что транспорт отдаёт только автору команды).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    BadRequest(String),

    /// Движок отклонил команду: неверная фаза, не твой ход, плохой индекс и т.п.
    Rejected { kind: ErrorKind, message: String },

    /// Нарушение внутреннего инварианта движка.
    Internal(String),
}

impl ApiError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ApiError::Rejected { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        if err.is_invariant_breach() {
            ApiError::Internal(err.to_string())
        } else {
            ApiError::Rejected {
                kind: err.kind(),
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
