use crate::hook::HookStage;

/// A hook failure that did not abort its chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub plugin: String,
    pub stage: HookStage,
    pub error: String,
}

/// Failures collected while running a best-effort chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookReport {
    failures: Vec<ReportEntry>,
}

impl HookReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, plugin: &str, stage: HookStage, error: impl ToString) {
        self.failures.push(ReportEntry {
            plugin: plugin.to_string(),
            stage,
            error: error.to_string(),
        });
    }

    /// `true` when every hook succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[ReportEntry] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}
