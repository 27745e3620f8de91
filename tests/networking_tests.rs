//! Networking Integration Tests
//!
//! - `GameSession` against an in-memory `PositionService`
//! - `HttpPositionClient` against a local axum stub of the position service

use async_trait::async_trait;
use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use serina_board::game::resources::{NoPromotion, PositionSnapshot, SnapshotRequest};
use serina_board::game::types::{Side, Square};
use serina_board::game::{ClickOutcome, GameError};
use serina_board::networking::{
    AnalysisRequest, AnalysisResult, GameSession, HttpPositionClient, NetworkError,
    NetworkResult, PositionService, SessionEvent, DEFAULT_TIMEOUT,
};
use shared::protocol::{ChessData, PerftResult, SearchResult};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;

const START: [&str; 8] = [
    "rnbqkbnr", "pppppppp", "........", "........", "........", "........", "PPPPPPPP",
    "RNBQKBNR",
];

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn snapshot(side: Side, catalog: &[&str]) -> PositionSnapshot {
    PositionSnapshot::from_diagram(START, side, catalog).unwrap()
}

/// In-memory service answering from a script; `gate` holds fetches until released
struct FakeService {
    answers: Mutex<VecDeque<NetworkResult<PositionSnapshot>>>,
    calls: Mutex<Vec<SnapshotRequest>>,
    gate: Option<Semaphore>,
}

impl FakeService {
    fn new(answers: Vec<NetworkResult<PositionSnapshot>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    fn gated(answers: Vec<NetworkResult<PositionSnapshot>>) -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new(answers)
        }
    }

    fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    fn calls(&self) -> Vec<SnapshotRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PositionService for FakeService {
    async fn fetch_snapshot(&self, request: &SnapshotRequest) -> NetworkResult<PositionSnapshot> {
        self.calls.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(NetworkError::Decode {
                message: "script exhausted".to_string(),
            }))
    }

    async fn fetch_analysis(&self, request: AnalysisRequest) -> NetworkResult<AnalysisResult> {
        match request {
            AnalysisRequest::Perft { depth } => Ok(AnalysisResult::Perft {
                counts: BTreeMap::from([("e2e4".to_string(), u64::from(depth))]),
                total: u64::from(depth),
                elapsed: Duration::from_millis(1),
            }),
            AnalysisRequest::Search { .. } => Ok(AnalysisResult::Search {
                best_move: "e2e4".to_string(),
                elapsed: Duration::from_millis(2),
            }),
        }
    }
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_first_click_loads_current_position() {
    let service = Arc::new(FakeService::new(vec![Ok(snapshot(Side::White, &["e2e4"]))]));
    let mut session = GameSession::new(Arc::clone(&service));

    let result = session.click(sq("e2"), &mut NoPromotion);
    assert_eq!(result, Err(GameError::NotInitialized));

    let event = session.settle().await;
    assert!(matches!(event, Some(SessionEvent::Installed(SnapshotRequest::Current))));
    assert!(session.controller().board().is_initialized());
    assert_eq!(service.calls(), vec![SnapshotRequest::Current]);
}

#[tokio::test]
async fn test_move_round_trip() {
    let service = Arc::new(FakeService::new(vec![
        Ok(snapshot(Side::White, &["e2e4"])),
        Ok(snapshot(Side::Black, &["e7e5"])),
    ]));
    let mut session = GameSession::new(Arc::clone(&service));
    assert!(session.refresh());
    session.settle().await;

    session.click(sq("e2"), &mut NoPromotion).unwrap();
    let outcome = session.click(sq("e4"), &mut NoPromotion).unwrap();
    assert!(matches!(outcome, ClickOutcome::MoveResolved { .. }));

    let event = session.settle().await;
    assert!(matches!(
        event,
        Some(SessionEvent::Installed(SnapshotRequest::ApplyMove(_)))
    ));
    let controller = session.controller();
    assert_eq!(controller.board().side_to_move().unwrap(), Side::Black);
    assert_eq!(controller.history().len(), 1);
    assert!(!controller.is_busy());
    assert_eq!(
        service.calls()[1],
        SnapshotRequest::ApplyMove("e2e4".parse().unwrap())
    );
}

#[tokio::test]
async fn test_clicks_blocked_until_snapshot_settles() {
    let service = Arc::new(FakeService::gated(vec![
        Ok(snapshot(Side::White, &["e2e4", "d2d4"])),
        Ok(snapshot(Side::Black, &["e7e5"])),
    ]));
    let mut session = GameSession::new(Arc::clone(&service));
    session.refresh();
    service.release();
    session.settle().await;

    session.click(sq("e2"), &mut NoPromotion).unwrap();
    session.click(sq("e4"), &mut NoPromotion).unwrap();

    assert_eq!(
        session.click(sq("d2"), &mut NoPromotion).unwrap(),
        ClickOutcome::Busy
    );
    assert!(!session.flip());
    assert!(session.poll().is_none());

    service.release();
    session.settle().await;
    assert!(!session.controller().is_busy());
    assert_eq!(service.calls().len(), 2);
}

#[tokio::test]
async fn test_failed_move_leaves_board_and_rolls_back() {
    let service = Arc::new(FakeService::new(vec![
        Ok(snapshot(Side::White, &["e2e4"])),
        Err(NetworkError::Status {
            status: 500,
            url: "http://test/move".to_string(),
        }),
    ]));
    let mut session = GameSession::new(service);
    session.refresh();
    session.settle().await;
    let generation = session.controller().board().generation();

    session.click(sq("e2"), &mut NoPromotion).unwrap();
    session.click(sq("e4"), &mut NoPromotion).unwrap();
    let event = session.settle().await;

    assert!(matches!(
        event,
        Some(SessionEvent::Failed {
            error: NetworkError::Status { status: 500, .. },
            ..
        })
    ));
    let controller = session.controller();
    assert_eq!(controller.board().generation(), generation);
    assert_eq!(controller.board().side_to_move().unwrap(), Side::White);
    assert!(controller.history().is_empty());
    assert!(!controller.is_busy());
}

#[tokio::test]
async fn test_settle_with_nothing_in_flight() {
    let service = Arc::new(FakeService::new(Vec::new()));
    let mut session = GameSession::new(service);
    assert!(session.settle().await.is_none());
}

#[tokio::test]
async fn test_analysis_does_not_touch_board() {
    let service = Arc::new(FakeService::new(vec![Ok(snapshot(Side::White, &["e2e4"]))]));
    let mut session = GameSession::new(service);
    session.refresh();
    session.settle().await;

    let result = session
        .analyse(AnalysisRequest::Perft { depth: 3 })
        .await
        .unwrap();
    assert!(matches!(result, AnalysisResult::Perft { total: 3, .. }));
    assert_eq!(session.controller().board().generation(), 1);
}

// ============================================================================
// HTTP Client Tests
// ============================================================================

fn start_data(moves: Option<Vec<&str>>) -> ChessData {
    let board = START
        .iter()
        .flat_map(|rank| rank.chars())
        .map(|c| if c == '.' { " ".to_string() } else { c.to_string() })
        .collect();
    ChessData {
        board,
        side_to_move: "white".to_string(),
        en_passant_target: "-".to_string(),
        castling: "KQkq".to_string(),
        halfmove: 0,
        fullmove: 1,
        moves: moves.map(|m| m.into_iter().map(String::from).collect()),
    }
}

/// Helper to serve a stub position service on a random local port
async fn stub_service() -> String {
    let app = Router::new()
        .route(
            "/fen/",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                match params.get("fen") {
                    Some(fen) if fen.starts_with("bad") => Err(StatusCode::BAD_REQUEST),
                    Some(_) => Ok(Json(start_data(None))),
                    None => Ok(Json(start_data(Some(vec!["e2e4", "g1f3"])))),
                }
            }),
        )
        .route(
            "/move",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let mut data = start_data(Some(vec!["e7e5"]));
                data.side_to_move = "black".to_string();
                if params.get("move").map(String::as_str) != Some("e2e4") {
                    data.board.truncate(10);
                }
                Json(data)
            }),
        )
        .route("/flip/", get(|| async { "not json" }))
        .route(
            "/perft",
            get(|| async {
                Json(PerftResult {
                    result: BTreeMap::from([("a2a3".to_string(), 1), ("a2a4".to_string(), 1)]),
                    total_node: 2,
                    time: 5,
                })
            }),
        )
        .route(
            "/search",
            get(|| async {
                Json(SearchResult {
                    searched_move: "e2e4".to_string(),
                    time: 40,
                })
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_http_current_position() {
    let base = stub_service().await;
    let client = HttpPositionClient::new(&base, DEFAULT_TIMEOUT).unwrap();

    let snapshot = client.fetch_snapshot(&SnapshotRequest::Current).await.unwrap();
    assert_eq!(snapshot.side_to_move, Side::White);
    assert_eq!(snapshot.catalog.len(), 2);
    assert_eq!(snapshot.castling, "KQkq");
}

#[tokio::test]
async fn test_http_null_moves_are_empty_catalog() {
    let base = stub_service().await;
    let client = HttpPositionClient::new(&base, DEFAULT_TIMEOUT).unwrap();

    let snapshot = client
        .fetch_snapshot(&SnapshotRequest::SetPosition("8/8/8/8/8/8/8/8 w - - 0 1".to_string()))
        .await
        .unwrap();
    assert!(snapshot.catalog.is_empty());
}

#[tokio::test]
async fn test_http_error_status() {
    let base = stub_service().await;
    let client = HttpPositionClient::new(&base, DEFAULT_TIMEOUT).unwrap();

    let result = client
        .fetch_snapshot(&SnapshotRequest::SetPosition("bad fen".to_string()))
        .await;
    assert!(matches!(result, Err(NetworkError::Status { status: 400, .. })));
}

#[tokio::test]
async fn test_http_decode_and_snapshot_errors() {
    let base = stub_service().await;
    let client = HttpPositionClient::new(&base, DEFAULT_TIMEOUT).unwrap();

    let flipped = client.fetch_snapshot(&SnapshotRequest::Flip).await;
    assert!(matches!(flipped, Err(NetworkError::Decode { .. })));

    let short_board = client
        .fetch_snapshot(&SnapshotRequest::ApplyMove("d2d4".parse().unwrap()))
        .await;
    assert!(matches!(
        short_board,
        Err(NetworkError::InvalidSnapshot(GameError::InvalidSnapshot { .. }))
    ));

    let applied = client
        .fetch_snapshot(&SnapshotRequest::ApplyMove("e2e4".parse().unwrap()))
        .await
        .unwrap();
    assert_eq!(applied.side_to_move, Side::Black);
}

#[tokio::test]
async fn test_http_analysis() {
    let base = stub_service().await;
    let client = HttpPositionClient::new(&base, DEFAULT_TIMEOUT).unwrap();

    let perft = client
        .fetch_analysis(AnalysisRequest::Perft { depth: 1 })
        .await
        .unwrap();
    assert_eq!(
        perft,
        AnalysisResult::Perft {
            counts: BTreeMap::from([("a2a3".to_string(), 1), ("a2a4".to_string(), 1)]),
            total: 2,
            elapsed: Duration::from_millis(5),
        }
    );

    let search = client
        .fetch_analysis(AnalysisRequest::Search { depth: 4 })
        .await
        .unwrap();
    assert_eq!(
        search,
        AnalysisResult::Search {
            best_move: "e2e4".to_string(),
            elapsed: Duration::from_millis(40),
        }
    );
}

#[tokio::test]
async fn test_http_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpPositionClient::new(&format!("http://{}", addr), DEFAULT_TIMEOUT).unwrap();
    let result = client.fetch_snapshot(&SnapshotRequest::Current).await;
    assert!(matches!(result, Err(NetworkError::Request(_))));
}
