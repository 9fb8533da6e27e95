//! End-to-end tests driving the runtime through its public handle.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};
use tokio::time::timeout;

use cube_core::{
    Color, CubeState, Direction, Face, LatticePos, RotationEngine, Slot, encode,
};
use runtime::{
    CubeEvent, GatewayError, Runtime, RuntimeConfig, RuntimeError, SolverGateway,
};

const WAIT: Duration = Duration::from_secs(5);

fn fast_config() -> RuntimeConfig {
    RuntimeConfig {
        frame_interval: Duration::from_millis(1),
        turn_duration: Duration::from_millis(4),
        scramble_turn_duration: Duration::from_millis(1),
        ..RuntimeConfig::default()
    }
}

async fn wait_for(
    events: &mut broadcast::Receiver<CubeEvent>,
    mut predicate: impl FnMut(&CubeEvent) -> bool,
) -> Vec<CubeEvent> {
    let mut seen = Vec::new();
    timeout(WAIT, async {
        loop {
            let event = events.recv().await.expect("event stream stays open");
            let done = predicate(&event);
            seen.push(event);
            if done {
                return;
            }
        }
    })
    .await
    .expect("event arrives in time");
    seen
}

async fn wait_until_idle(events: &mut broadcast::Receiver<CubeEvent>) -> Vec<CubeEvent> {
    wait_for(events, |event| matches!(event, CubeEvent::QueueDrained)).await
}

#[tokio::test]
async fn turn_commits_and_matches_direct_application() {
    let rt = Runtime::builder().config(fast_config()).build();
    let handle = rt.handle();
    let mut events = handle.subscribe();

    handle.turn(Face::Right, Direction::Plus).await.unwrap();
    let seen = wait_until_idle(&mut events).await;

    assert!(seen.iter().any(|event| matches!(
        event,
        CubeEvent::TurnCommitted {
            face: Face::Right,
            direction: Direction::Plus
        }
    )));

    let mut expected = CubeState::solved();
    RotationEngine::new(&mut expected).turn(Face::Right, Direction::Plus);
    assert_eq!(handle.snapshot().await.unwrap(), expected);

    rt.shutdown().await.unwrap();
}

#[tokio::test]
async fn edits_defer_behind_the_running_animation() {
    let rt = Runtime::builder().config(fast_config()).build();
    let handle = rt.handle();
    let mut events = handle.subscribe();

    handle.turn(Face::Up, Direction::Minus).await.unwrap();
    handle
        .set_sticker(LatticePos::new(1, 1, 1), Slot::PosY, Color::Blue)
        .await
        .unwrap();
    let seen = wait_until_idle(&mut events).await;

    let committed = seen
        .iter()
        .position(|event| matches!(event, CubeEvent::TurnCommitted { .. }))
        .expect("turn committed");
    let edited = seen
        .iter()
        .position(|event| matches!(event, CubeEvent::StickerSet { .. }))
        .expect("sticker set");
    assert!(committed < edited, "edit must wait for the turn: {seen:?}");

    rt.shutdown().await.unwrap();
}

#[tokio::test]
async fn invalid_edit_is_rejected_immediately() {
    let rt = Runtime::builder().config(fast_config()).build();
    let handle = rt.handle();

    // The origin has no outward slot on any axis.
    let err = handle
        .set_sticker(LatticePos::ORIGIN, Slot::PosX, Color::Red)
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Edit(_)));

    rt.shutdown().await.unwrap();
}

#[tokio::test]
async fn scramble_then_reset_restores_canonical_state() {
    let rt = Runtime::builder()
        .config(fast_config())
        .scramble_seed(7)
        .build();
    let handle = rt.handle();
    let mut events = handle.subscribe();

    handle.scramble(Some(10)).await.unwrap();
    wait_until_idle(&mut events).await;
    assert_ne!(handle.snapshot().await.unwrap(), CubeState::solved());

    handle.reset().await.unwrap();
    wait_for(&mut events, |event| {
        matches!(event, CubeEvent::StateReplaced)
    })
    .await;
    assert_eq!(handle.snapshot().await.unwrap(), CubeState::solved());
    assert_eq!(handle.encode().await.unwrap(), encode(&CubeState::solved()));

    rt.shutdown().await.unwrap();
}

#[tokio::test]
async fn undo_returns_to_the_previous_state() {
    let rt = Runtime::builder().config(fast_config()).build();
    let handle = rt.handle();
    let mut events = handle.subscribe();

    handle.turn(Face::Front, Direction::Plus).await.unwrap();
    wait_until_idle(&mut events).await;

    assert!(handle.undo().await.unwrap());
    wait_until_idle(&mut events).await;
    assert_eq!(handle.snapshot().await.unwrap(), CubeState::solved());

    // History is spent.
    assert!(!handle.undo().await.unwrap());

    rt.shutdown().await.unwrap();
}

#[tokio::test]
async fn sequences_parse_and_apply_in_order() {
    let rt = Runtime::builder().config(fast_config()).build();
    let handle = rt.handle();
    let mut events = handle.subscribe();

    let moves = handle.apply_sequence("R U2 F'").await.unwrap();
    assert_eq!(moves.len(), 3);
    wait_until_idle(&mut events).await;

    let mut expected = CubeState::solved();
    {
        let mut engine = RotationEngine::new(&mut expected);
        for mv in &moves {
            for (face, direction) in mv.quarter_turns() {
                engine.turn(face, direction);
            }
        }
    }
    assert_eq!(handle.snapshot().await.unwrap(), expected);

    assert!(handle.apply_sequence("R3").await.is_err());

    rt.shutdown().await.unwrap();
}

struct ReverseSolver {
    answer: String,
    received: Mutex<Option<String>>,
}

#[async_trait]
impl SolverGateway for ReverseSolver {
    async fn solve(&self, facelets: &str) -> Result<String, GatewayError> {
        *self.received.lock().await = Some(facelets.to_string());
        Ok(self.answer.clone())
    }
}

struct DownSolver;

#[async_trait]
impl SolverGateway for DownSolver {
    async fn solve(&self, _facelets: &str) -> Result<String, GatewayError> {
        Err(GatewayError::Unavailable("connection refused".into()))
    }
}

#[tokio::test]
async fn solver_answer_is_enqueued_and_solves_the_cube() {
    let rt = Runtime::builder().config(fast_config()).build();
    let handle = rt.handle();
    let mut events = handle.subscribe();

    handle.apply_sequence("R U2 F'").await.unwrap();
    wait_until_idle(&mut events).await;

    // Pretend the backend found the exact inverse sequence.
    let gateway: Arc<dyn SolverGateway> = Arc::new(ReverseSolver {
        answer: "F U2 R'".to_string(),
        received: Mutex::new(None),
    });
    let moves = handle.request_solution(&gateway).await.unwrap();
    assert_eq!(moves.len(), 3);

    let seen = wait_until_idle(&mut events).await;
    assert!(seen
        .iter()
        .any(|event| matches!(event, CubeEvent::SolutionReceived { .. })));
    assert_eq!(handle.snapshot().await.unwrap(), CubeState::solved());

    rt.shutdown().await.unwrap();
}

#[tokio::test]
async fn solver_request_sends_face_letters_grouped_by_center() {
    let rt = Runtime::builder().config(fast_config()).build();
    let handle = rt.handle();

    let gateway = Arc::new(ReverseSolver {
        answer: String::new(),
        received: Mutex::new(None),
    });
    let dyn_gateway: Arc<dyn SolverGateway> = gateway.clone();
    handle.request_solution(&dyn_gateway).await.unwrap();

    let facelets = gateway.received.lock().await.clone().expect("request sent");
    assert_eq!(
        facelets,
        "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB"
    );

    rt.shutdown().await.unwrap();
}

#[tokio::test]
async fn solver_request_rejects_partially_colored_states() {
    let rt = Runtime::builder()
        .config(fast_config())
        .initial_state(CubeState::uncolored())
        .build();
    let handle = rt.handle();

    let gateway: Arc<dyn SolverGateway> = Arc::new(ReverseSolver {
        answer: String::new(),
        received: Mutex::new(None),
    });
    let err = handle.request_solution(&gateway).await.unwrap_err();
    assert!(matches!(err, RuntimeError::Net(_)), "{err:?}");

    rt.shutdown().await.unwrap();
}

#[tokio::test]
async fn unreachable_solver_surfaces_without_touching_the_cube() {
    let rt = Runtime::builder().config(fast_config()).build();
    let handle = rt.handle();

    let gateway: Arc<dyn SolverGateway> = Arc::new(DownSolver);
    let err = handle.request_solution(&gateway).await.unwrap_err();
    assert!(matches!(err, RuntimeError::SolverUnavailable(_)), "{err:?}");
    assert_eq!(handle.snapshot().await.unwrap(), CubeState::solved());

    rt.shutdown().await.unwrap();
}

#[tokio::test]
async fn replace_loads_an_external_piece_set() {
    let rt = Runtime::builder().config(fast_config()).build();
    let handle = rt.handle();
    let mut events = handle.subscribe();

    let mut scrambled = CubeState::solved();
    RotationEngine::new(&mut scrambled).turn(Face::Left, Direction::Minus);
    handle
        .replace(scrambled.snapshot().to_vec())
        .await
        .unwrap();
    wait_for(&mut events, |event| {
        matches!(event, CubeEvent::StateReplaced)
    })
    .await;

    assert_eq!(handle.snapshot().await.unwrap(), scrambled);

    rt.shutdown().await.unwrap();
}

#[tokio::test]
async fn shutdown_joins_after_all_handles_drop() {
    let rt = Runtime::builder().config(fast_config()).build();
    let handle = rt.handle();
    handle.turn(Face::Back, Direction::Plus).await.unwrap();
    drop(handle);
    rt.shutdown().await.unwrap();
}
