//! Game session - a [`BoardController`] wired to a [`PositionService`]
//!
//! Clicks stay synchronous. Whenever the controller hands back a
//! [`SnapshotRequest`], the session spawns a tokio task to perform it and the
//! answer arrives on an mpsc channel. [`GameSession::poll`] (non-blocking) or
//! [`GameSession::settle`] (async) install it. The controller's pending flag
//! keeps at most one request in flight, so answers can never arrive out of
//! order.

use crate::game::error::{GameError, GameResult};
use crate::game::resources::{PositionSnapshot, PromotionPrompt, SnapshotRequest};
use crate::game::systems::{BoardController, ClickOutcome};
use crate::game::types::Square;
use crate::networking::client::{AnalysisRequest, AnalysisResult, PositionService};
use crate::networking::error::{NetworkError, NetworkResult};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Answer to one dispatched request
#[derive(Debug)]
struct FetchOutcome {
    request: SnapshotRequest,
    result: NetworkResult<PositionSnapshot>,
}

/// What happened when a request settled
#[derive(Debug)]
pub enum SessionEvent {
    /// New snapshot installed on the board
    Installed(SnapshotRequest),
    /// Request failed; the previous board is still shown
    Failed {
        request: SnapshotRequest,
        error: NetworkError,
    },
}

pub struct GameSession<S: PositionService + 'static> {
    controller: BoardController,
    service: Arc<S>,
    tx: mpsc::UnboundedSender<FetchOutcome>,
    rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl<S: PositionService + 'static> GameSession<S> {
    pub fn new(service: Arc<S>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            controller: BoardController::new(),
            service,
            tx,
            rx,
        }
    }

    pub fn controller(&self) -> &BoardController {
        &self.controller
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    /// Forward a click to the controller, dispatching any resolved move
    ///
    /// A click before the first snapshot starts loading the current
    /// position and still returns [`GameError::NotInitialized`].
    ///
    /// Must be called from inside a tokio runtime.
    pub fn click(
        &mut self,
        square: Square,
        prompt: &mut dyn PromotionPrompt,
    ) -> GameResult<ClickOutcome> {
        match self.controller.on_square_click(square, prompt) {
            Ok(ClickOutcome::MoveResolved { token, request }) => {
                self.dispatch(request.clone());
                Ok(ClickOutcome::MoveResolved { token, request })
            }
            Err(GameError::NotInitialized) => {
                warn!("[SESSION] Board not loaded yet; requesting current position");
                self.refresh();
                Err(GameError::NotInitialized)
            }
            other => other,
        }
    }

    /// Load the starting position. Returns false if a request is in flight.
    pub fn refresh(&mut self) -> bool {
        self.start(SnapshotRequest::Current)
    }

    /// Load a FEN position. Returns false if a request is in flight.
    pub fn set_position(&mut self, fen: impl Into<String>) -> bool {
        self.start(SnapshotRequest::SetPosition(fen.into()))
    }

    /// Flip the board. Returns false if a request is in flight.
    pub fn flip(&mut self) -> bool {
        self.start(SnapshotRequest::Flip)
    }

    fn start(&mut self, request: SnapshotRequest) -> bool {
        if !self.controller.begin_request(request.clone()) {
            return false;
        }
        self.dispatch(request);
        true
    }

    fn dispatch(&self, request: SnapshotRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        debug!("[SESSION] Dispatching {}", request);

        tokio::spawn(async move {
            let result = service.fetch_snapshot(&request).await;
            if tx.send(FetchOutcome { request, result }).is_err() {
                debug!("[SESSION] Session dropped before fetch completed");
            }
        });
    }

    /// Install a finished request without waiting
    pub fn poll(&mut self) -> Option<SessionEvent> {
        let outcome = self.rx.try_recv().ok()?;
        Some(self.apply(outcome))
    }

    /// Wait for the in-flight request to finish and install it
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn settle(&mut self) -> Option<SessionEvent> {
        if !self.controller.is_busy() {
            return self.poll();
        }
        let outcome = self.rx.recv().await?;
        Some(self.apply(outcome))
    }

    /// Run an engine analysis on the service's current position
    ///
    /// Analysis never changes the board, so it may run while a snapshot
    /// request is in flight.
    pub async fn analyse(&self, request: AnalysisRequest) -> NetworkResult<AnalysisResult> {
        info!("[SESSION] Requesting {:?}", request);
        self.service.fetch_analysis(request).await
    }

    fn apply(&mut self, outcome: FetchOutcome) -> SessionEvent {
        let FetchOutcome { request, result } = outcome;
        if self.controller.in_flight() != Some(&request) {
            warn!("[SESSION] Answer for {} arrived but was not in flight", request);
        }

        match result {
            Ok(snapshot) => {
                self.controller.install_snapshot(snapshot);
                SessionEvent::Installed(request)
            }
            Err(error) => {
                error!("[SESSION] {} failed: {}", request, error);
                self.controller.fail_request();
                SessionEvent::Failed { request, error }
            }
        }
    }
}
