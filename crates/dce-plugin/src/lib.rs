//! Extension points of the compose executor.
//!
//! Two contracts are exposed to plugin authors:
//! - [`ComposePlugin`]: hooks around image pull, pod launch, kill and shutdown;
//! - [`PodStatusHook`]: a callback invoked on pod status changes.
//!
//! Implementations are registered in an [`Extensions`] registry and executed
//! in configured order by [`ComposeChain`] and [`StatusHookChain`].

mod error;
pub use error::{DriverError, HookError, PluginError};

pub mod config;
pub use config::{ConfigError, HookConfig};

mod context;
pub use context::HookContext;

mod driver;
pub use driver::ExecutorDriver;

pub mod hook;
pub use hook::{ComposePlugin, HookFailure, HookStage, PodStatusHook, StatusData};

pub mod registry;
pub use registry::{ExtensionPoint, Extensions};

pub mod chain;
pub use chain::{ComposeChain, HookReport, ReportEntry, StatusHookChain};

pub mod prelude {
    pub use crate::chain::{ComposeChain, HookReport, StatusHookChain};
    pub use crate::error::{DriverError, HookError, PluginError};
    pub use crate::hook::{ComposePlugin, HookFailure, PodStatusHook, StatusData};
    pub use crate::registry::Extensions;
    pub use crate::{ExecutorDriver, HookConfig, HookContext};
}
