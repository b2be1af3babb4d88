use davinci_engine::{
    api::{
        build_lobby_view, decode_command, execute_command, run_query, snapshots_for_seats,
        ApiError, Command, CommandResponse, DrawCardCommand, GuessCardCommand, JoinCommand,
        PlaceCardCommand, Query, QueryResponse, SelectInitialCardsCommand,
    },
    domain::{Card, CardValue, Color, GameRules},
    engine::{ErrorKind, GameSession, MatchEventKind, MatchStatus, RandomSource, Viewer},
};

/// Утилита: RNG без перемешивания, всегда наименьшее свободное значение.
struct FirstPickRng;

impl RandomSource for FirstPickRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}

    fn pick_index(&mut self, _len: usize) -> usize {
        0
    }
}

/// Утилита: прогнать команду, ожидая успех.
fn ok(session: &mut GameSession<FirstPickRng>, command: Command) -> CommandResponse {
    execute_command(session, command).expect("command should succeed")
}

/// Утилита: сессия после раздачи через API.
/// Alice = [b0, w0, b1, w1], Bob = [b2, w2, b3, w3], ходит Alice.
fn dealt_session() -> GameSession<FirstPickRng> {
    let mut s = GameSession::new(GameRules::default(), FirstPickRng);
    ok(&mut s, Command::Join(JoinCommand { name: Some("Alice".into()) }));
    ok(&mut s, Command::Join(JoinCommand { name: Some("Bob".into()) }));
    ok(&mut s, Command::StartGame);
    ok(
        &mut s,
        Command::SelectInitialCards(SelectInitialCardsCommand {
            player: 0,
            slot_indices: vec![0, 2, 1, 3],
        }),
    );
    ok(
        &mut s,
        Command::SelectInitialCards(SelectInitialCardsCommand {
            player: 1,
            slot_indices: vec![4, 6, 5, 7],
        }),
    );
    s
}

#[test]
fn decode_command_reads_serde_json() {
    assert_eq!(decode_command(r#""StartGame""#), Ok(Command::StartGame));
    assert_eq!(
        decode_command(r#"{"Join":{"name":null}}"#),
        Ok(Command::Join(JoinCommand { name: None }))
    );
    assert_eq!(
        decode_command(r#"{"GuessCard":{"player":1,"target_index":2,"value":{"Number":7}}}"#),
        Ok(Command::GuessCard(GuessCardCommand {
            player: 1,
            target_index: 2,
            value: CardValue::Number(7),
        }))
    );
    assert_eq!(
        decode_command(r#"{"GuessCard":{"player":0,"target_index":0,"value":"Joker"}}"#)
            .map(|c| matches!(c, Command::GuessCard(GuessCardCommand { value: CardValue::Joker, .. }))),
        Ok(true)
    );
}

#[test]
fn decode_command_reports_bad_request() {
    let err = decode_command(r#"{"Fly":{}}"#).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
    assert_eq!(err.kind(), None);
}

#[test]
fn lobby_flow_through_commands() {
    let mut s = GameSession::new(GameRules::default(), FirstPickRng);
    assert_eq!(
        ok(&mut s, Command::Join(JoinCommand { name: None })),
        CommandResponse::Joined { seat: 0 }
    );

    let lobby = build_lobby_view(&s);
    assert!(!lobby.can_start);
    assert_eq!(lobby.players[0].name, "Player 1");

    ok(&mut s, Command::Join(JoinCommand { name: Some("Bob".into()) }));
    assert!(build_lobby_view(&s).can_start);

    assert_eq!(
        ok(&mut s, Command::StartGame),
        CommandResponse::GameStarted { starting_player: 0 }
    );
    assert!(!build_lobby_view(&s).can_start);
}

#[test]
fn engine_rejection_maps_to_rejected_with_kind() {
    let mut s = GameSession::new(GameRules::default(), FirstPickRng);
    let err = execute_command(&mut s, Command::StartGame).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::NotEnoughPlayers));
    assert!(matches!(err, ApiError::Rejected { ref message, .. } if !message.is_empty()));

    let mut s = dealt_session();
    let err = execute_command(
        &mut s,
        Command::DrawCard(DrawCardCommand { player: 1, pile_index: 0 }),
    )
    .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::NotYourTurn));
}

#[test]
fn full_turn_through_commands() {
    let mut s = dealt_session();

    assert_eq!(
        ok(&mut s, Command::DrawCard(DrawCardCommand { player: 0, pile_index: 0 })),
        CommandResponse::CardDrawn {
            card: Card::number(Color::White, 4)
        }
    );
    assert_eq!(
        ok(&mut s, Command::PlaceCard(PlaceCardCommand { player: 0, position: 4 })),
        CommandResponse::CardPlaced { position: 4 }
    );

    let resp = ok(
        &mut s,
        Command::GuessCard(GuessCardCommand {
            player: 0,
            target_index: 0,
            value: CardValue::Number(2),
        }),
    );
    let CommandResponse::GuessResult(res) = resp else {
        panic!("expected GuessResult");
    };
    assert!(res.correct);
    assert_eq!(res.revealed_owner, Some(1));
    assert_eq!(res.revealed_index, Some(0));
    assert_eq!(res.winner_name, None);

    assert_eq!(ok(&mut s, Command::EndTurn { player: 0 }), CommandResponse::Ok);
}

#[test]
fn winning_guess_carries_winner_name() {
    let mut s = dealt_session();
    ok(&mut s, Command::DrawCard(DrawCardCommand { player: 0, pile_index: 0 }));
    ok(&mut s, Command::PlaceCard(PlaceCardCommand { player: 0, position: 4 }));

    let mut last = None;
    for (target_index, value) in [(0, 2), (1, 2), (2, 3), (3, 3)] {
        last = Some(ok(
            &mut s,
            Command::GuessCard(GuessCardCommand {
                player: 0,
                target_index,
                value: CardValue::Number(value),
            }),
        ));
    }

    let Some(CommandResponse::GuessResult(res)) = last else {
        panic!("expected GuessResult");
    };
    assert!(res.game_over);
    assert_eq!(res.winner, Some(0));
    assert_eq!(res.winner_name.as_deref(), Some("Alice"));
    assert_eq!(s.status(), MatchStatus::Finished { winner: 0 });
}

#[test]
fn queries_return_masked_state_lobby_and_history() {
    let mut s = dealt_session();
    ok(&mut s, Command::DrawCard(DrawCardCommand { player: 0, pile_index: 0 }));

    let QueryResponse::State(view) = run_query(&s, Query::GetState { viewer: Viewer::Player(1) }) else {
        panic!("expected State");
    };
    assert_eq!(view.held_card, None, "Взятая карта видна только взявшему");
    assert!(view.hands[0].cards.iter().all(|c| c.value.is_none()));

    let QueryResponse::Lobby(lobby) = run_query(&s, Query::GetLobby) else {
        panic!("expected Lobby");
    };
    assert_eq!(lobby.status, MatchStatus::Playing);
    assert_eq!(lobby.players.len(), 2);

    let QueryResponse::History(events) = run_query(&s, Query::GetHistory) else {
        panic!("expected History");
    };
    assert!(matches!(
        events.last().map(|e| &e.kind),
        Some(MatchEventKind::CardDrawn { player: 0, pile_index: 0, color: Color::White })
    ));
    assert!(events.windows(2).all(|w| w[0].index + 1 == w[1].index));
}

#[test]
fn snapshots_for_seats_mask_per_player() {
    let mut s = dealt_session();
    ok(&mut s, Command::DrawCard(DrawCardCommand { player: 0, pile_index: 0 }));

    let views = snapshots_for_seats(&s);
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].viewer, Viewer::Player(0));
    assert!(views[0].held_card.is_some());
    assert!(views[1].held_card.is_none());
    assert!(views[1].hands[1].cards.iter().all(|c| c.value.is_some()));
}

#[test]
fn reset_and_leave_commands_return_to_lobby() {
    let mut s = dealt_session();
    assert_eq!(ok(&mut s, Command::ResetGame), CommandResponse::Ok);
    assert_eq!(s.status(), MatchStatus::Lobby);

    ok(&mut s, Command::StartGame);
    assert_eq!(ok(&mut s, Command::Leave { player: 0 }), CommandResponse::Ok);
    assert_eq!(s.status(), MatchStatus::Lobby);
    assert_eq!(s.lobby_state().len(), 1);
}
