use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::VALUES_PER_COLOR;

/// Как движок обращается с позицией, выбранной игроком при выкладке карты.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlacementRule {
    /// Карта встаёт ровно туда, куда указал игрок. Правильность места -
    /// ответственность игрока.
    #[default]
    Free,
    /// Числовая карта встаёт в каноническую позицию, указанная позиция
    /// учитывается только для джокера.
    Sorted,
}

/// Ошибки конфигурации правил.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Некорректный JSON правил: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Размер стартовой руки {0} вне диапазона 1..={max}", max = MAX_INITIAL_HAND_SIZE)]
    InvalidHandSize(usize),

    #[error("Префикс имени игрока не может быть пустым")]
    EmptyNamePrefix,
}

/// Больше 6 карт на игрока не влезает в 12 слотов одного цвета при худшем выборе.
pub const MAX_INITIAL_HAND_SIZE: usize = VALUES_PER_COLOR / 2;

/// Конфиг матча.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameRules {
    /// Сколько карт каждый игрок выбирает на этапе setup.
    pub initial_hand_size: usize,
    pub placement: PlacementRule,
    /// Игрок сразу считается готовым после входа в лобби.
    pub auto_ready_on_join: bool,
    /// Имя по умолчанию: "{prefix} {seat + 1}".
    pub default_name_prefix: String,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            initial_hand_size: 4,
            placement: PlacementRule::Free,
            auto_ready_on_join: true,
            default_name_prefix: "Player".to_string(),
        }
    }
}

impl GameRules {
    /// Загрузить правила из JSON. Отсутствующие поля берутся из `Default`.
    pub fn from_json_str(s: &str) -> Result<Self, RulesError> {
        let rules: GameRules = serde_json::from_str(s)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        if self.initial_hand_size == 0 || self.initial_hand_size > MAX_INITIAL_HAND_SIZE {
            return Err(RulesError::InvalidHandSize(self.initial_hand_size));
        }
        if self.default_name_prefix.trim().is_empty() {
            return Err(RulesError::EmptyNamePrefix);
        }
        Ok(())
    }

    pub fn default_name(&self, seat: usize) -> String {
        format!("{} {}", self.default_name_prefix, seat + 1)
    }
}
