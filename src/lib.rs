//! Движок игры «Da Vinci Code» на двух игроков.
//!
//! Слои:
//! - `domain`: карты, пул значений, стопка, руки, ростер, правила;
//! - `engine`: сессия матча: раздача, ходы, догадки, маскировка;
//! - `api`: команды/запросы для транспортного слоя;
//! - `infra`: реализации RNG.
//!
//! Транспорт, соединения и комнаты: забота внешнего кода.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
