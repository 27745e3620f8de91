//! Networking module - position service transport
//!
//! - `client` - [`PositionService`] trait and its reqwest implementation
//! - `session` - [`GameSession`], which runs requests on tokio and feeds
//!   the answers back into the board controller
//! - `error` - [`NetworkError`] and [`NetworkResult`]

pub mod client;
pub mod error;
pub mod session;

pub use client::{
    AnalysisRequest, AnalysisResult, HttpPositionClient, PositionService, DEFAULT_TIMEOUT,
};
pub use error::{NetworkError, NetworkResult};
pub use session::{GameSession, SessionEvent};
