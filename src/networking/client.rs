//! HTTP client for the position service
//!
//! The service is a plain JSON-over-GET API: every position-changing call
//! answers with a full [`ChessData`] snapshot, and the analysis calls answer
//! with [`PerftResult`] / [`SearchResult`]. [`PositionService`] is the seam the
//! session talks through so tests can swap in an in-memory service.

use crate::game::resources::{PositionSnapshot, SnapshotRequest};
use crate::networking::error::{NetworkError, NetworkResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shared::protocol::{ChessData, Endpoint, PerftResult, SearchResult};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Default request timeout when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Engine analysis the service can run on its current position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisRequest {
    /// Count leaf nodes per root move
    Perft { depth: u32 },
    /// Best move at a fixed depth
    Search { depth: u32 },
}

/// Decoded analysis answer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnalysisResult {
    Perft {
        counts: BTreeMap<String, u64>,
        total: u64,
        elapsed: Duration,
    },
    Search {
        best_move: String,
        elapsed: Duration,
    },
}

/// Remote holder of the authoritative position
#[async_trait]
pub trait PositionService: Send + Sync {
    /// Perform `request` and return the resulting position
    async fn fetch_snapshot(&self, request: &SnapshotRequest) -> NetworkResult<PositionSnapshot>;

    async fn fetch_analysis(&self, request: AnalysisRequest) -> NetworkResult<AnalysisResult>;
}

/// [`PositionService`] backed by reqwest
#[derive(Clone, Debug)]
pub struct HttpPositionClient {
    http: reqwest::Client,
    base: Url,
}

impl HttpPositionClient {
    /// Build a client for the service at `base_url`
    ///
    /// A base with a path prefix (`http://host/engine`) keeps the prefix.
    pub fn new(base_url: &str, timeout: Duration) -> NetworkResult<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;
        info!("[NETWORK] Position service at {}", base);
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Full URL for `endpoint` with an optional query value
    pub fn endpoint_url(&self, endpoint: Endpoint, value: Option<&str>) -> NetworkResult<Url> {
        let mut url = self.base.join(endpoint.path().trim_start_matches('/'))?;
        if let (Some(key), Some(value)) = (endpoint.query_key(), value) {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    /// URL for a snapshot request
    pub fn snapshot_url(&self, request: &SnapshotRequest) -> NetworkResult<Url> {
        match request {
            SnapshotRequest::Current => self.endpoint_url(Endpoint::Fen, None),
            SnapshotRequest::SetPosition(fen) => self.endpoint_url(Endpoint::Fen, Some(fen)),
            SnapshotRequest::ApplyMove(token) => {
                self.endpoint_url(Endpoint::Move, Some(&token.to_string()))
            }
            SnapshotRequest::Flip => self.endpoint_url(Endpoint::Flip, None),
        }
    }

    /// URL for an analysis request
    pub fn analysis_url(&self, request: AnalysisRequest) -> NetworkResult<Url> {
        match request {
            AnalysisRequest::Perft { depth } => {
                self.endpoint_url(Endpoint::Perft, Some(&depth.to_string()))
            }
            AnalysisRequest::Search { depth } => {
                self.endpoint_url(Endpoint::Search, Some(&depth.to_string()))
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> NetworkResult<T> {
        debug!("[NETWORK] GET {}", url);
        let response = self.http.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("[NETWORK] {} answered {}", url, status);
            return Err(NetworkError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                NetworkError::Decode {
                    message: e.to_string(),
                }
            } else {
                NetworkError::Request(e)
            }
        })
    }
}

#[async_trait]
impl PositionService for HttpPositionClient {
    async fn fetch_snapshot(&self, request: &SnapshotRequest) -> NetworkResult<PositionSnapshot> {
        let url = self.snapshot_url(request)?;
        let data: ChessData = self.get_json(url).await?;
        let snapshot = PositionSnapshot::try_from(&data)?;
        debug!(
            "[NETWORK] {} -> {} to move, {} moves",
            request,
            snapshot.side_to_move,
            snapshot.catalog.len()
        );
        Ok(snapshot)
    }

    async fn fetch_analysis(&self, request: AnalysisRequest) -> NetworkResult<AnalysisResult> {
        let url = self.analysis_url(request)?;
        match request {
            AnalysisRequest::Perft { .. } => {
                let perft: PerftResult = self.get_json(url).await?;
                Ok(AnalysisResult::Perft {
                    counts: perft.result,
                    total: perft.total_node,
                    elapsed: Duration::from_millis(perft.time),
                })
            }
            AnalysisRequest::Search { .. } => {
                let search: SearchResult = self.get_json(url).await?;
                Ok(AnalysisResult::Search {
                    best_move: search.searched_move,
                    elapsed: Duration::from_millis(search.time),
                })
            }
        }
    }
}
