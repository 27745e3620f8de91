use crate::game::move_token::MoveToken;
use std::fmt;

/// Position-changing request sent to the position service
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnapshotRequest {
    /// Load the starting position
    Current,
    ApplyMove(MoveToken),
    /// Load a position from a FEN string
    SetPosition(String),
    Flip,
}

impl fmt::Display for SnapshotRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotRequest::Current => f.write_str("current position"),
            SnapshotRequest::ApplyMove(token) => write!(f, "move {}", token),
            SnapshotRequest::SetPosition(fen) => write!(f, "set position '{}'", fen),
            SnapshotRequest::Flip => f.write_str("flip"),
        }
    }
}

/// Single outstanding snapshot request; board clicks wait until it settles
#[derive(Debug, Default)]
pub struct PendingRefresh {
    pending: Option<SnapshotRequest>,
}

impl PendingRefresh {
    /// Mark a request as in flight. Returns false if one already is.
    pub fn request(&mut self, request: SnapshotRequest) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(request);
        true
    }

    pub fn take(&mut self) -> Option<SnapshotRequest> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn in_flight(&self) -> Option<&SnapshotRequest> {
        self.pending.as_ref()
    }
}
