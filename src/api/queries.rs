use serde::{Deserialize, Serialize};

use crate::engine::{GameSession, GameSnapshot, MatchEvent, MatchStatus, RandomSource, Viewer};

use super::dto::LobbyViewDto;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Снапшот матча с маскировкой для зрителя.
    GetState { viewer: Viewer },

    /// Состояние лобби.
    GetLobby,

    /// Публичная история текущего матча.
    GetHistory,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum QueryResponse {
    State(GameSnapshot),
    Lobby(LobbyViewDto),
    History(Vec<MatchEvent>),
}

pub fn run_query<R: RandomSource>(session: &GameSession<R>, query: Query) -> QueryResponse {
    match query {
        Query::GetState { viewer } => QueryResponse::State(session.masked_state(viewer)),
        Query::GetLobby => QueryResponse::Lobby(build_lobby_view(session)),
        Query::GetHistory => QueryResponse::History(session.history().events.clone()),
    }
}

/// Снапшоты для рассылки после каждой команды: по одному на каждое место.
pub fn snapshots_for_seats<R: RandomSource>(session: &GameSession<R>) -> Vec<GameSnapshot> {
    session
        .lobby_state()
        .iter()
        .map(|p| session.masked_state(Viewer::Player(p.seat)))
        .collect()
}

pub fn build_lobby_view<R: RandomSource>(session: &GameSession<R>) -> LobbyViewDto {
    let roster = session.roster();
    LobbyViewDto {
        status: session.status(),
        players: session.lobby_state(),
        can_start: session.status() == MatchStatus::Lobby && roster.all_ready(),
    }
}
