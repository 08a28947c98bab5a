//! Tests for the turn controller state machine.

use strictly_tictactoe::{
    EngineError, GameConfig, GameEvent, HeuristicOpponent, IllegalMove, Mode, Outcome, Side,
    TickOutcome, Transition, TurnController,
};
use tokio::sync::mpsc;

fn started(mode: Mode, human: Side) -> TurnController {
    let config = GameConfig::default().with_turn_seconds(2);
    let mut controller =
        TurnController::with_opponent(config, HeuristicOpponent::seeded(42)).unwrap();
    controller.start_game(mode, 3, human).unwrap();
    controller
}

fn illegal(reason: IllegalMove) -> Result<Transition, EngineError> {
    Err(EngineError::IllegalMove { reason })
}

#[test]
fn test_rejected_moves_change_nothing() {
    let mut game = started(Mode::VsHuman, Side::X);
    game.submit_move(4, Side::X).unwrap();
    let before = game.snapshot();

    assert_eq!(game.submit_move(4, Side::O), illegal(IllegalMove::CellOccupied { index: 4 }));
    assert_eq!(game.submit_move(0, Side::X), illegal(IllegalMove::NotYourTurn { side: Side::X }));
    assert_eq!(
        game.submit_move(9, Side::O),
        Err(EngineError::IndexOutOfRange { index: 9, cells: 9 })
    );
    assert_eq!(game.snapshot(), before);
    assert_eq!(game.state().history().len(), 1);
}

#[test]
fn test_moves_after_game_over_rejected() {
    let mut game = started(Mode::VsHuman, Side::X);
    for index in [0, 3, 1, 4, 2] {
        game.submit_local_move(index).unwrap();
    }
    assert!(game.state().is_terminal());
    let before = game.snapshot();

    assert_eq!(game.submit_move(8, Side::O), illegal(IllegalMove::GameOver));
    assert_eq!(game.on_timer_expiry(), illegal(IllegalMove::GameOver));
    assert!(!game.start_timer());
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_expiry_switches_side_once_without_touching_board() {
    let mut game = started(Mode::VsHuman, Side::X);
    game.submit_move(0, Side::X).unwrap();
    let cells = game.state().board().clone();

    assert_eq!(game.on_timer_expiry(), Ok(Transition::Continue { side: Side::X }));
    assert_eq!(game.state().active_side(), Some(Side::X));
    assert_eq!(game.state().board(), &cells);
    assert_eq!(game.state().countdown().remaining(), 2);
    assert!(game.state().countdown().is_running());
}

#[test]
fn test_stale_tick_after_move_is_ignored() {
    let mut game = started(Mode::VsHuman, Side::X);
    let old = game.timer_stamp().unwrap();
    assert_eq!(game.on_timer_tick(old), TickOutcome::Ticked(1));

    game.submit_move(0, Side::X).unwrap();
    assert_eq!(game.on_timer_tick(old), TickOutcome::Stale);
    assert_eq!(game.state().active_side(), Some(Side::O));
    assert_eq!(game.state().countdown().remaining(), 2);

    let fresh = game.timer_stamp().unwrap();
    assert_ne!(fresh, old);
    assert_eq!(game.on_timer_tick(fresh), TickOutcome::Ticked(1));
    assert_eq!(
        game.on_timer_tick(fresh),
        TickOutcome::Expired(Transition::Continue { side: Side::X })
    );
}

#[test]
fn test_ledger_survives_reset_and_settings_changes() {
    let mut game = started(Mode::VsHuman, Side::X);
    for index in [0, 3, 1, 4, 2] {
        game.submit_local_move(index).unwrap();
    }
    assert_eq!(*game.ledger().human_wins(), 1);

    game.reset();
    game.change_symbol(Side::O);
    game.change_mode(Mode::VsComputer);
    game.change_board_size(4).unwrap();
    assert_eq!(*game.ledger().human_wins(), 1);
    assert_eq!(game.ledger().games(), 1);

    assert_eq!(game.state().size(), 4);
    assert_eq!(game.state().human_side(), Side::O);
    assert_eq!(game.state().active_side(), Some(Side::O));
    assert!(!game.state().countdown().is_running());
}

#[test]
fn test_expiry_with_stopped_clock_rejected() {
    let mut game = started(Mode::VsHuman, Side::X);
    game.reset();
    assert_eq!(game.on_timer_expiry(), illegal(IllegalMove::ClockStopped));
    assert_eq!(game.state().active_side(), Some(Side::X));
}

#[test]
fn test_full_game_against_computer() {
    let mut game = started(Mode::VsComputer, Side::X);
    let outcome = loop {
        let index = game.state().board().empty_cells()[0];
        match game.submit_move(index, Side::X).unwrap() {
            Transition::Finished(outcome) => break outcome,
            Transition::Continue { .. } => panic!("the computer should be up"),
            Transition::OpponentToMove { ticket } => {
                assert_eq!(game.state().active_side(), Some(Side::O));
                match game.play_opponent(ticket).unwrap() {
                    Transition::Finished(outcome) => break outcome,
                    Transition::Continue { side } => assert_eq!(side, Side::X),
                    Transition::OpponentToMove { .. } => panic!("computer moved twice"),
                }
            }
        }
    };

    // Human always opens; the computer holds at least a draw against first-empty play.
    assert_ne!(outcome.winner(), Some(Side::X));
    assert_eq!(game.ledger().games(), 1);
    let history = game.state().history();
    for pair in history.windows(2) {
        assert_ne!(pair[0].side, pair[1].side);
    }
}

#[test]
fn test_human_as_o_opens_against_computer() {
    let mut game = started(Mode::VsComputer, Side::O);
    assert_eq!(game.state().active_side(), Some(Side::O));
    assert_eq!(game.pending_opponent(), None);
    assert_eq!(game.play_pending_opponent(), None);
    assert!(matches!(
        game.submit_move(4, Side::O),
        Ok(Transition::OpponentToMove { .. })
    ));
    assert!(game.play_pending_opponent().is_some());
    assert_eq!(game.state().history().len(), 2);
}

#[test]
fn test_timer_events_and_game_end_event() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let config = GameConfig::default()
        .with_mode(Mode::VsHuman)
        .with_turn_seconds(2)
        .with_player_two_name("Grace");
    let mut game = TurnController::with_opponent(config, HeuristicOpponent::seeded(1))
        .unwrap()
        .with_events(tx);
    game.start_game(Mode::VsHuman, 3, Side::X).unwrap();

    let stamp = game.timer_stamp().unwrap();
    game.on_timer_tick(stamp);
    game.on_timer_tick(stamp);
    // O now moves first and wins the left column.
    for index in [0, 4, 3, 8, 6] {
        game.submit_local_move(index).unwrap();
    }

    let events: Vec<GameEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
    let ticks: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::TimerTick { remaining } => Some(*remaining),
            _ => None,
        })
        .collect();
    assert_eq!(ticks, vec![1, 0]);
    assert_eq!(
        events.last(),
        Some(&GameEvent::GameEnded {
            outcome: Outcome::Win {
                side: Side::O,
                line: vec![0, 3, 6]
            },
            winner: Some("Grace".to_string()),
        })
    );
    assert_eq!(*game.ledger().opponent_wins(), 1);
}

#[test]
fn test_stamp_from_before_reset_stays_stale() {
    let mut game = started(Mode::VsHuman, Side::X);
    let old = game.timer_stamp().unwrap();

    game.reset();
    assert_eq!(game.on_timer_tick(old), TickOutcome::Stale);
    assert!(game.start_timer());
    assert_ne!(game.timer_stamp(), Some(old));
    assert_eq!(game.on_timer_tick(old), TickOutcome::Stale);
    assert_eq!(game.state().countdown().remaining(), 2);
}

#[test]
fn test_stamp_from_before_resize_stays_stale() {
    let mut game = started(Mode::VsHuman, Side::X);
    let old = game.timer_stamp().unwrap();

    game.change_board_size(4).unwrap();
    assert!(game.start_timer());
    assert_eq!(game.on_timer_tick(old), TickOutcome::Stale);
    assert_eq!(game.state().countdown().remaining(), 2);
    assert_eq!(game.state().active_side(), Some(Side::X));
}

#[test]
fn test_stamp_from_before_mode_change_stays_stale() {
    let mut game = started(Mode::VsComputer, Side::X);
    let old = game.timer_stamp().unwrap();

    game.change_mode(Mode::VsHuman);
    assert!(game.start_timer());
    assert_eq!(game.on_timer_tick(old), TickOutcome::Stale);
    assert_eq!(game.on_timer_tick(old), TickOutcome::Stale);
    assert_eq!(game.state().countdown().remaining(), 2);
    assert_eq!(game.state().active_side(), Some(Side::X));
}

#[test]
fn test_stamp_from_before_restart_stays_stale() {
    let mut game = started(Mode::VsHuman, Side::X);
    let old = game.timer_stamp().unwrap();

    game.start_game(Mode::VsHuman, 3, Side::O).unwrap();
    assert_eq!(game.on_timer_tick(old), TickOutcome::Stale);
    assert_eq!(game.state().countdown().remaining(), 2);
}

#[test]
fn test_ticket_from_before_reset_is_ignored() {
    let mut game = started(Mode::VsComputer, Side::X);
    let Ok(Transition::OpponentToMove { ticket }) = game.submit_move(0, Side::X) else {
        panic!("the computer should be up");
    };

    game.reset();
    assert_eq!(game.play_opponent(ticket), None);
    assert!(game.state().history().is_empty());
    assert_eq!(game.state().board().empty_cells().len(), 9);

    assert!(game.start_timer());
    assert!(matches!(
        game.submit_move(4, Side::X),
        Ok(Transition::OpponentToMove { .. })
    ));
    assert_eq!(game.play_opponent(ticket), None);
    assert_eq!(game.state().history().len(), 1);
    assert!(game.play_pending_opponent().is_some());
}

#[test]
fn test_oversized_board_rejected_without_change() {
    let mut game = started(Mode::VsHuman, Side::X);
    game.submit_move(4, Side::X).unwrap();
    let before = game.snapshot();

    let huge = 1usize << (usize::BITS / 2);
    assert_eq!(game.change_board_size(huge), Err(EngineError::InvalidSize { size: huge }));
    assert_eq!(
        game.start_game(Mode::VsHuman, usize::MAX, Side::O),
        Err(EngineError::InvalidSize { size: usize::MAX })
    );
    assert_eq!(game.snapshot(), before);
    assert_eq!(*game.config().board_size(), 3);
}
