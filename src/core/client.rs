/// Capability boundary around the container engine
///
/// Every call is a single request/response. Implementations hold no UI state.

use async_trait::async_trait;

use crate::core::error::ConsoleResult;
use crate::core::resource::{ResourceEntry, ResourceKind};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Snapshot of every resource of `kind`, in engine order
    async fn list(&self, kind: ResourceKind) -> ConsoleResult<Vec<ResourceEntry>>;

    async fn remove(&self, kind: ResourceKind, id: &str) -> ConsoleResult<()>;

    async fn stop(&self, container_id: &str) -> ConsoleResult<()>;

    /// Create and start a container from an image, returning the new container id
    async fn run(&self, image_ref: &str) -> ConsoleResult<String>;

    /// Full log output of a container as one blob
    async fn fetch_logs(&self, container_id: &str) -> ConsoleResult<String>;
}
