use serde::{Deserialize, Serialize};

use crate::domain::{Card, CardValue, Color, CommunityPile, Hand, PlayerIndex};
use crate::engine::reveal::RevealSet;
use crate::engine::turn::TurnPhase;

/// Кто запрашивает снапшот.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Viewer {
    Player(PlayerIndex),
    /// Зритель видит только публичную информацию.
    Spectator,
}

impl Viewer {
    pub fn seat(&self) -> Option<PlayerIndex> {
        match self {
            Viewer::Player(p) => Some(*p),
            Viewer::Spectator => None,
        }
    }

    fn owns(&self, owner: PlayerIndex) -> bool {
        self.seat() == Some(owner)
    }
}

/// Стадия матча.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchStatus {
    Lobby,
    Setup,
    Playing,
    Finished { winner: PlayerIndex },
}

/// Карта глазами зрителя. `value == None`: значение скрыто, виден только цвет.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardView {
    pub color: Color,
    pub value: Option<CardValue>,
    pub revealed: bool,
    /// Карта выложена в текущем ходу.
    pub just_placed: bool,
}

/// Рука глазами зрителя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandView {
    pub owner: PlayerIndex,
    pub cards: Vec<CardView>,
}

impl HandView {
    pub fn revealed_count(&self) -> usize {
        self.cards.iter().filter(|c| c.revealed).count()
    }
}

/// Слот стопки: виден цвет и взят ли он. Джокерность слота скрыта.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PileSlotView {
    pub color: Color,
    pub drawn: bool,
}

/// Текущий ход.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnView {
    pub current_player: PlayerIndex,
    pub phase: TurnPhase,
    pub can_end_turn: bool,
}

/// Игрок в снапшоте.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerView {
    pub seat: PlayerIndex,
    pub name: String,
    pub ready: bool,
}

/// Полный снапшот матча с маскировкой для конкретного зрителя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSnapshot {
    pub match_index: u64,
    pub viewer: Viewer,
    pub status: MatchStatus,
    pub players: Vec<PlayerView>,
    pub turn: Option<TurnView>,
    /// Руки обоих игроков, индекс = место.
    pub hands: Vec<HandView>,
    pub pile: Vec<PileSlotView>,
    /// Взятая, но ещё не выложенная карта: только для взявшего.
    pub held_card: Option<Card>,
    /// Кто уже отправил стартовый выбор.
    pub setup_committed: [bool; 2],
    /// Слоты стартовой раскладки, занятые кем-либо.
    pub claimed_slots: Vec<usize>,
}

/// Маскировка руки: значение видно владельцу и для открытых позиций.
pub fn mask_hand(
    hand: &Hand,
    reveals: &RevealSet,
    owner: PlayerIndex,
    viewer: Viewer,
    placed_index: Option<usize>,
) -> HandView {
    let cards = hand
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let revealed = reveals.is_revealed(i);
            CardView {
                color: card.color,
                value: if revealed || viewer.owns(owner) {
                    Some(card.value)
                } else {
                    None
                },
                revealed,
                just_placed: placed_index == Some(i),
            }
        })
        .collect();

    HandView { owner, cards }
}

pub fn mask_pile(pile: &CommunityPile) -> Vec<PileSlotView> {
    pile.slots
        .iter()
        .map(|s| PileSlotView {
            color: s.color,
            drawn: s.drawn,
        })
        .collect()
}
