use async_trait::async_trait;
use dce_model::TaskStatusUpdate;

use crate::error::DriverError;

/// Handle to the executor driver that talks to the cluster resource manager.
///
/// Passed to [`ComposePlugin::shutdown`](crate::ComposePlugin::shutdown) so a plugin
/// can report final task states or stop the driver.
#[async_trait]
pub trait ExecutorDriver: Send + Sync {
    async fn send_status_update(&self, update: &TaskStatusUpdate) -> Result<(), DriverError>;

    async fn send_framework_message(&self, message: &str) -> Result<(), DriverError>;

    async fn stop(&self) -> Result<(), DriverError>;

    async fn abort(&self) -> Result<(), DriverError>;
}
