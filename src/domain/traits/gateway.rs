use crate::domain::entities::Product;
use async_trait::async_trait;
use std::fmt;

/// Outcome of a best-effort remote write. Deliberately not a `Result`:
/// callers only ever log it, they never branch on it or surface it to the
/// user. Local mutations proceed regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteAck {
    Confirmed,
    Unconfirmed,
}

impl fmt::Display for RemoteAck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteAck::Confirmed => write!(f, "confirmed"),
            RemoteAck::Unconfirmed => write!(f, "unconfirmed"),
        }
    }
}

/// Remote catalog service - a side-effect channel, never a source of truth.
///
/// Each operation is a single round trip with no retry. Network and parse
/// failures are swallowed: fetches degrade to empty/absent results, writes
/// report an unconfirmed ack.
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    async fn create(&self, product: &Product) -> RemoteAck;
    async fn fetch_all(&self) -> Vec<Product>;
    async fn fetch_one(&self, id: u64) -> Option<Product>;
    async fn update(&self, id: u64, product: &Product) -> RemoteAck;
    async fn remove(&self, id: u64) -> RemoteAck;
}
