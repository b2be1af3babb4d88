use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{CardValue, PlayerIndex};
use crate::engine::{GameSession, RandomSource};

use super::dto::{CommandResponse, GuessResultDto};
use super::errors::ApiError;

/// Команда верхнего уровня: намерение игрока, пришедшее от транспорта.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Command {
    /// Сесть на свободное место в лобби.
    Join(JoinCommand),

    /// Сменить отображаемое имя.
    Rename(RenameCommand),

    /// Отметить готовность к старту.
    SetReady(SetReadyCommand),

    /// Уйти из лобби / матча. Идущий матч сбрасывается.
    Leave { player: PlayerIndex },

    /// Запустить матч (нужны два готовых игрока).
    StartGame,

    /// Стартовый выбор слотов раскладки.
    SelectInitialCards(SelectInitialCardsCommand),

    /// Взять карту из общей стопки.
    DrawCard(DrawCardCommand),

    /// Выложить взятую карту в свою руку.
    PlaceCard(PlaceCardCommand),

    /// Угадать закрытую карту соперника.
    GuessCard(GuessCardCommand),

    /// Закончить ход после верной догадки.
    EndTurn { player: PlayerIndex },

    /// Новая игра: всё обратно в лобби.
    ResetGame,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoinCommand {
    pub name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameCommand {
    pub player: PlayerIndex,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetReadyCommand {
    pub player: PlayerIndex,
    pub ready: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectInitialCardsCommand {
    pub player: PlayerIndex,
    /// Индексы слотов раскладки (чётный: белый, нечётный: чёрный).
    pub slot_indices: Vec<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrawCardCommand {
    pub player: PlayerIndex,
    pub pile_index: usize,
}

/// Карту клиент не передаёт: взятая карта хранится в движке.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaceCardCommand {
    pub player: PlayerIndex,
    pub position: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuessCardCommand {
    pub player: PlayerIndex,
    pub target_index: usize,
    pub value: CardValue,
}

/// Разобрать команду из JSON (формат: serde по умолчанию).
pub fn decode_command(json: &str) -> Result<Command, ApiError> {
    Ok(serde_json::from_str(json)?)
}

/// Применить команду к сессии.
///
/// Ошибка возвращается только автору команды; состояние при ошибке не меняется.
pub fn execute_command<R: RandomSource>(
    session: &mut GameSession<R>,
    command: Command,
) -> Result<CommandResponse, ApiError> {
    let result = apply(session, command.clone());
    if let Err(err) = &result {
        warn!(?command, ?err, "command rejected");
    }
    result
}

fn apply<R: RandomSource>(
    session: &mut GameSession<R>,
    command: Command,
) -> Result<CommandResponse, ApiError> {
    let response = match command {
        Command::Join(JoinCommand { name }) => CommandResponse::Joined {
            seat: session.join(name)?,
        },

        Command::Rename(RenameCommand { player, name }) => {
            session.rename(player, name)?;
            CommandResponse::Ok
        }

        Command::SetReady(SetReadyCommand { player, ready }) => {
            session.set_ready(player, ready)?;
            CommandResponse::Ok
        }

        Command::Leave { player } => {
            session.leave(player)?;
            CommandResponse::Ok
        }

        Command::StartGame => CommandResponse::GameStarted {
            starting_player: session.initialize_game()?,
        },

        Command::SelectInitialCards(SelectInitialCardsCommand {
            player,
            slot_indices,
        }) => {
            let outcome = session.select_initial_cards(player, &slot_indices)?;
            CommandResponse::SelectionRecorded {
                dealt: outcome.dealt,
            }
        }

        Command::DrawCard(DrawCardCommand { player, pile_index }) => CommandResponse::CardDrawn {
            card: session.draw_card(player, pile_index)?,
        },

        Command::PlaceCard(PlaceCardCommand { player, position }) => {
            CommandResponse::CardPlaced {
                position: session.place_card(player, position)?,
            }
        }

        Command::GuessCard(GuessCardCommand {
            player,
            target_index,
            value,
        }) => {
            let outcome = session.guess_card(player, target_index, value)?;
            let roster = session.roster();
            CommandResponse::GuessResult(GuessResultDto::from_outcome(outcome, |p| {
                roster.get(p).map(|s| s.name.clone())
            }))
        }

        Command::EndTurn { player } => {
            session.end_turn(player)?;
            CommandResponse::Ok
        }

        Command::ResetGame => {
            session.reset_game();
            CommandResponse::Ok
        }
    };

    Ok(response)
}
