use sim_core::{Game, TerminalOutcome};
use sim_server::{
    spawn_tick_loop, EventCursor, SessionConfig, SessionError, SessionHandle, SessionStatus,
};
use std::time::Duration;
use tokio::time::sleep;

/// A simple counter game for testing.
/// Each step the counter increments. Win when counter reaches target.
#[derive(Clone)]
struct CounterGame {
    counter: u64,
    target: u64,
}

#[derive(Clone, Debug, PartialEq)]
enum CounterEvent {
    Incremented { new_value: u64 },
}

impl Game for CounterGame {
    type Event = CounterEvent;

    fn step(&mut self, _delta_secs: f32, out_events: &mut Vec<Self::Event>) {
        self.counter += 1;
        out_events.push(CounterEvent::Incremented {
            new_value: self.counter,
        });
    }

    fn restart(&mut self) {
        self.counter = 0;
    }

    fn is_terminal(&self) -> Option<TerminalOutcome> {
        if self.counter >= self.target {
            Some(TerminalOutcome::Win)
        } else {
            None
        }
    }
}

fn config() -> SessionConfig {
    SessionConfig {
        tick_hz: 200, // Fast for testing
        event_buffer_capacity: 1000,
    }
}

#[tokio::test]
async fn test_loop_advances_and_emits_events() {
    let session = SessionHandle::new(CounterGame { counter: 0, target: 1_000_000 }, &config());
    let task = spawn_tick_loop(session.clone());

    sleep(Duration::from_millis(100)).await;

    let batch = session.poll_events(EventCursor(0)).await;
    assert!(!batch.events.is_empty());
    assert_eq!(
        batch.events[0].event,
        CounterEvent::Incremented { new_value: 1 }
    );
    assert!(session.current_tick().await > 0);

    session.shutdown().await;
    task.await.unwrap();
}

#[tokio::test]
async fn test_pause_freezes_world() {
    let session = SessionHandle::new(CounterGame { counter: 0, target: 1_000_000 }, &config());
    let task = spawn_tick_loop(session.clone());

    sleep(Duration::from_millis(50)).await;
    session.pause().await.unwrap();
    assert_eq!(session.status().await, SessionStatus::Paused);

    let frozen = session.with_game(|g| g.counter).await;
    sleep(Duration::from_millis(50)).await;
    assert_eq!(session.with_game(|g| g.counter).await, frozen);

    session.resume().await.unwrap();
    sleep(Duration::from_millis(50)).await;
    assert!(session.with_game(|g| g.counter).await > frozen);

    session.shutdown().await;
    task.await.unwrap();
}

#[tokio::test]
async fn test_game_finishes_and_restarts() {
    let session = SessionHandle::new(CounterGame { counter: 0, target: 5 }, &config());
    let task = spawn_tick_loop(session.clone());

    sleep(Duration::from_millis(100)).await;
    assert_eq!(
        session.status().await,
        SessionStatus::Finished(TerminalOutcome::Win)
    );
    assert_eq!(session.with_game(|g| g.counter).await, 5);

    session.restart().await.unwrap();
    assert_eq!(session.status().await, SessionStatus::Running);
    assert_eq!(session.current_tick().await, 0);

    sleep(Duration::from_millis(100)).await;
    assert_eq!(
        session.status().await,
        SessionStatus::Finished(TerminalOutcome::Win)
    );

    session.shutdown().await;
    task.await.unwrap();
}

#[tokio::test]
async fn test_loop_idles_while_finished_and_paused() {
    let session = SessionHandle::new(CounterGame { counter: 0, target: 3 }, &config());
    let task = spawn_tick_loop(session.clone());

    sleep(Duration::from_millis(100)).await;
    assert_eq!(
        session.status().await,
        SessionStatus::Finished(TerminalOutcome::Win)
    );
    let finished_tick = session.current_tick().await;
    sleep(Duration::from_millis(50)).await;
    assert_eq!(session.current_tick().await, finished_tick);
    assert!(!task.is_finished());

    session.restart().await.unwrap();
    session.pause().await.unwrap();
    let paused_tick = session.current_tick().await;
    sleep(Duration::from_millis(50)).await;
    assert_eq!(session.current_tick().await, paused_tick);
    assert!(!task.is_finished());

    session.resume().await.unwrap();
    sleep(Duration::from_millis(100)).await;
    assert_eq!(session.with_game(|g| g.counter).await, 3);

    session.shutdown().await;
    task.await.unwrap();
}

#[tokio::test]
async fn test_mutation_between_ticks() {
    let session = SessionHandle::new(CounterGame { counter: 0, target: 1_000_000 }, &config());
    session.pause().await.unwrap();

    session.with_game_mut(|g| g.counter = 41).await.unwrap();
    assert!(!session.step_one_tick().await);
    assert_eq!(session.with_game(|g| g.counter).await, 41);

    session.resume().await.unwrap();
    session.step_one_tick().await;
    assert_eq!(session.with_game(|g| g.counter).await, 42);
}

#[tokio::test]
async fn test_shutdown_rejects_commands() {
    let session = SessionHandle::new(CounterGame { counter: 0, target: 1_000_000 }, &config());
    let task = spawn_tick_loop(session.clone());

    session.shutdown().await;
    task.await.unwrap();

    assert_eq!(session.status().await, SessionStatus::Shutdown);
    assert_eq!(session.pause().await, Err(SessionError::Shutdown));
    assert_eq!(session.restart().await, Err(SessionError::Shutdown));
    assert!(session.with_game_mut(|g| g.counter = 0).await.is_err());
}
