use async_trait::async_trait;
use dce_model::{PodStatus, TaskInfo};
use dce_plugin::{HookFailure, PodStatusHook, StatusData};

use crate::hook::view::log_status;

/// Status hook that writes every pod status change to the log. Never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct JournalHook;

impl JournalHook {
    pub const NAME: &'static str = "journal";

    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PodStatusHook for JournalHook {
    async fn execute(&self, status: PodStatus, data: &StatusData) -> Result<(), HookFailure> {
        log_status(status, data.downcast_ref::<TaskInfo>());
        Ok(())
    }
}
