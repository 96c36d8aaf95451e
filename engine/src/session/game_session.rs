use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, Notify};

use crate::config::GameConfig;
use crate::game::{
    BotDifficulty, BotInput, GameMode, GameState, GameStatus, ScoreBoard, SessionRng,
    calculate_minimax_move, calculate_move, check_win_with_line,
};
use crate::log;
use super::broadcaster::{GameBroadcaster, GameOverNotification, MarkPlaced};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    PlaceMark { index: usize },
    Reset,
    SetMode(GameMode),
    SetDifficulty(BotDifficulty),
    Close,
}

/// Totals reported when a session is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub scores: ScoreBoard,
    pub games_finished: u32,
}

#[derive(Clone)]
pub struct GameSessionState {
    pub game_state: Arc<Mutex<GameState>>,
    pub rng: Arc<Mutex<SessionRng>>,
    pub turn_notify: Arc<Notify>,
    pub bot_delay: Duration,
    closed: Arc<AtomicBool>,
}

impl GameSessionState {
    pub fn create(config: &GameConfig, seed: u64) -> Self {
        Self {
            game_state: Arc::new(Mutex::new(GameState::new(config.mode, config.difficulty))),
            rng: Arc::new(Mutex::new(SessionRng::new(seed))),
            turn_notify: Arc::new(Notify::new()),
            bot_delay: Duration::from_millis(config.bot_delay_ms),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }
}

pub struct GameSession;

impl GameSession {
    /// Drives one session until a `Close` command arrives. Commands
    /// are fed in through [`GameSession::handle_command`] from the UI
    /// task; every state change is pushed to the broadcaster.
    pub async fn run(
        state: GameSessionState,
        broadcaster: impl GameBroadcaster,
    ) -> SessionSummary {
        let mut game_over_announced = false;

        loop {
            if state.closed.load(Ordering::SeqCst) {
                break;
            }

            broadcast_state(&state, &broadcaster).await;

            let (status, is_bot_turn) = {
                let game_state = state.game_state.lock().await;
                let is_bot_turn = game_state.status() == GameStatus::InProgress
                    && game_state.bot_mark() == Some(game_state.current_mark());
                (game_state.status(), is_bot_turn)
            };

            if status.is_terminal() {
                if !game_over_announced {
                    broadcast_game_over(&state, &broadcaster).await;
                    game_over_announced = true;
                }
                state.turn_notify.notified().await;
                continue;
            }
            game_over_announced = false;

            if is_bot_turn {
                // The delay keeps the computer's reply perceptible.
                // Any command arriving meanwhile wakes the notify and
                // cancels the pending move.
                tokio::select! {
                    _ = tokio::time::sleep(state.bot_delay) => {
                        play_bot_turn(&state, &broadcaster).await;
                    }
                    _ = state.turn_notify.notified() => {}
                }
            } else {
                state.turn_notify.notified().await;
            }
        }

        build_session_summary(&state).await
    }

    pub async fn handle_command(
        state: &GameSessionState,
        broadcaster: &impl GameBroadcaster,
        command: SessionCommand,
    ) {
        match command {
            SessionCommand::PlaceMark { index } => {
                let mut game_state = state.game_state.lock().await;

                if game_state.status() == GameStatus::InProgress
                    && game_state.bot_mark() == Some(game_state.current_mark())
                {
                    log!("Ignoring tap at {}: waiting for the computer's move", index);
                    return;
                }

                let mark = game_state.current_mark();
                match game_state.place_mark(index, mark) {
                    Ok(()) => {
                        drop(game_state);
                        broadcaster
                            .notify_mark_placed(MarkPlaced { index, mark })
                            .await;
                        state.turn_notify.notify_one();
                    }
                    Err(e) => {
                        log!("Rejected move at {}: {}", index, e);
                    }
                }
            }
            SessionCommand::Reset => {
                let mut game_state = state.game_state.lock().await;
                game_state.reset();
                drop(game_state);
                state.turn_notify.notify_one();
            }
            SessionCommand::SetMode(mode) => {
                let mut game_state = state.game_state.lock().await;
                game_state.set_mode(mode);
                drop(game_state);
                log!("Game mode changed to {:?}", mode);
                state.turn_notify.notify_one();
            }
            SessionCommand::SetDifficulty(difficulty) => {
                let mut game_state = state.game_state.lock().await;
                game_state.set_difficulty(difficulty);
                drop(game_state);
                log!("Bot difficulty changed to {:?}", difficulty);
                state.turn_notify.notify_one();
            }
            SessionCommand::Close => {
                state.closed.store(true, Ordering::SeqCst);
                state.turn_notify.notify_one();
            }
        }
    }
}

async fn play_bot_turn(state: &GameSessionState, broadcaster: &impl GameBroadcaster) {
    let (input, difficulty, bot_mark) = {
        let game_state = state.game_state.lock().await;

        let Some(bot_mark) = game_state.bot_mark() else {
            return;
        };
        if game_state.status() != GameStatus::InProgress
            || game_state.current_mark() != bot_mark
        {
            return;
        }

        (
            BotInput::from_game_state(&game_state),
            game_state.difficulty(),
            bot_mark,
        )
    };

    let calculated_move = match difficulty {
        BotDifficulty::Random => {
            let mut rng = state.rng.lock().await;
            calculate_move(difficulty, &input, &mut rng)
        }
        BotDifficulty::Minimax => {
            match tokio::task::spawn_blocking(move || calculate_minimax_move(&input)).await {
                Ok(chosen) => chosen,
                Err(e) => {
                    log!("Minimax task failed: {}", e);
                    None
                }
            }
        }
    };

    let Some(index) = calculated_move else {
        return;
    };

    let mut game_state = state.game_state.lock().await;
    // The game may have been reset or reconfigured while the move was
    // being computed; a stale move must not touch the new game.
    if game_state.status() != GameStatus::InProgress || game_state.current_mark() != bot_mark {
        return;
    }

    match game_state.place_mark(index, bot_mark) {
        Ok(()) => {
            drop(game_state);
            broadcaster
                .notify_mark_placed(MarkPlaced {
                    index,
                    mark: bot_mark,
                })
                .await;
        }
        Err(e) => {
            log!("Bot failed to place mark at {}: {}", index, e);
        }
    }
}

async fn broadcast_state(state: &GameSessionState, broadcaster: &impl GameBroadcaster) {
    let snapshot = {
        let game_state = state.game_state.lock().await;
        game_state.snapshot()
    };
    broadcaster.broadcast_state(snapshot).await;
}

async fn broadcast_game_over(state: &GameSessionState, broadcaster: &impl GameBroadcaster) {
    let notification = {
        let game_state = state.game_state.lock().await;
        GameOverNotification {
            status: game_state.status(),
            winner: game_state.status().winner(),
            winning_line: check_win_with_line(game_state.board()),
            scores: game_state.scores(),
        }
    };
    broadcaster.broadcast_game_over(notification).await;
}

async fn build_session_summary(state: &GameSessionState) -> SessionSummary {
    let game_state = state.game_state.lock().await;
    SessionSummary {
        scores: game_state.scores(),
        games_finished: game_state.games_finished(),
    }
}
