use serde::{Deserialize, Serialize};

use crate::domain::PlayerIndex;

/// Игрок в лобби: отображаемое имя и готовность к старту.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatedPlayer {
    pub name: String,
    pub ready: bool,
}

impl SeatedPlayer {
    pub fn new(name: impl Into<String>, ready: bool) -> Self {
        Self {
            name: name.into(),
            ready,
        }
    }
}

/// Ростер на два места. Индексы мест стабильны (0 и 1) на весь матч.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Roster {
    pub seats: [Option<SeatedPlayer>; 2],
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Первое свободное место.
    pub fn free_seat(&self) -> Option<PlayerIndex> {
        self.seats
            .iter()
            .position(|s| s.is_none())
            .map(|i| i as PlayerIndex)
    }

    pub fn get(&self, player: PlayerIndex) -> Option<&SeatedPlayer> {
        self.seats.get(player as usize).and_then(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, player: PlayerIndex) -> Option<&mut SeatedPlayer> {
        self.seats.get_mut(player as usize).and_then(|s| s.as_mut())
    }

    pub fn seat(&mut self, player: PlayerIndex, seated: SeatedPlayer) {
        self.seats[player as usize] = Some(seated);
    }

    pub fn unseat(&mut self, player: PlayerIndex) -> Option<SeatedPlayer> {
        self.seats.get_mut(player as usize).and_then(|s| s.take())
    }

    pub fn seated_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    /// Оба места заняты и оба игрока готовы.
    pub fn all_ready(&self) -> bool {
        self.seats
            .iter()
            .all(|s| s.as_ref().map(|p| p.ready).unwrap_or(false))
    }

    pub fn clear_ready(&mut self) {
        for p in self.seats.iter_mut().flatten() {
            p.ready = false;
        }
    }
}
