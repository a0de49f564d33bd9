use multitool_core::{DispatchObserver, StructuredError};
use std::sync::Mutex;
use std::time::Duration;

/// One diagnostic reported during construction or dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedEvent {
    DuplicateCategory { category: String },
    DuplicateTool { category: String, tool: String },
    AbsentCategorySkipped { toolkit: String },
    RequestRejected { toolkit: String, code: String },
    CategoryNotFound { category: String },
    ToolNotFound { category: String, tool: String },
    ToolFailed { category: String, tool: String, code: String },
    ToolCompleted { category: String, tool: String },
    UnsupportedProvider { requested: String, fallback: String },
}

/// Observer that keeps every event for later inspection.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ObservedEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events in the order they were reported.
    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn count(&self, predicate: impl Fn(&ObservedEvent) -> bool) -> usize {
        self.events
            .lock()
            .map(|e| e.iter().filter(|event| predicate(event)).count())
            .unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    fn push(&self, event: ObservedEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl DispatchObserver for RecordingObserver {
    fn duplicate_category(&self, category: &str) {
        self.push(ObservedEvent::DuplicateCategory {
            category: category.into(),
        });
    }

    fn duplicate_tool(&self, category: &str, tool: &str) {
        self.push(ObservedEvent::DuplicateTool {
            category: category.into(),
            tool: tool.into(),
        });
    }

    fn absent_category_skipped(&self, toolkit: &str) {
        self.push(ObservedEvent::AbsentCategorySkipped {
            toolkit: toolkit.into(),
        });
    }

    fn request_rejected(&self, toolkit: &str, error: &StructuredError) {
        self.push(ObservedEvent::RequestRejected {
            toolkit: toolkit.into(),
            code: error.code.clone(),
        });
    }

    fn category_not_found(&self, category: &str) {
        self.push(ObservedEvent::CategoryNotFound {
            category: category.into(),
        });
    }

    fn tool_not_found(&self, category: &str, tool: &str) {
        self.push(ObservedEvent::ToolNotFound {
            category: category.into(),
            tool: tool.into(),
        });
    }

    fn tool_failed(&self, category: &str, tool: &str, error: &StructuredError) {
        self.push(ObservedEvent::ToolFailed {
            category: category.into(),
            tool: tool.into(),
            code: error.code.clone(),
        });
    }

    fn tool_completed(&self, category: &str, tool: &str, _elapsed: Duration) {
        self.push(ObservedEvent::ToolCompleted {
            category: category.into(),
            tool: tool.into(),
        });
    }

    fn unsupported_provider(&self, requested: &str, fallback: &str) {
        self.push(ObservedEvent::UnsupportedProvider {
            requested: requested.into(),
            fallback: fallback.into(),
        });
    }
}
