//! Unified diagnostic type used across all editor-core phases.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Parse,
    Category,
    Resolve,
    Namespace,
    Expression,
    Normalize,
    Validate,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Parse => write!(f, "Parse"),
            Phase::Category => write!(f, "Category"),
            Phase::Resolve => write!(f, "Resolve"),
            Phase::Namespace => write!(f, "Namespace"),
            Phase::Expression => write!(f, "Expression"),
            Phase::Normalize => write!(f, "Normalize"),
            Phase::Validate => write!(f, "Validate"),
        }
    }
}

/// Only `Error` blocks persisting a workflow; `Warning` is advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone)]
pub struct EditorError {
    pub code: String,
    pub phase: Phase,
    pub severity: Severity,
    pub message: String,
    pub node_id: Option<String>,
}

impl std::fmt::Display for EditorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.node_id {
            Some(id) => write!(
                f,
                "[{}:{}] {} (node '{}')",
                self.phase, self.code, self.message, id
            ),
            None => write!(f, "[{}:{}] {}", self.phase, self.code, self.message),
        }
    }
}

impl std::error::Error for EditorError {}

impl EditorError {
    pub fn parse(code: &str, message: impl Into<String>) -> Self {
        EditorError {
            code: code.into(),
            phase: Phase::Parse,
            severity: Severity::Error,
            message: message.into(),
            node_id: None,
        }
    }

    pub fn validate(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        EditorError {
            code: code.into(),
            phase: Phase::Validate,
            severity: Severity::Error,
            message: message.into(),
            node_id,
        }
    }

    pub fn warning(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        EditorError {
            code: code.into(),
            phase: Phase::Validate,
            severity: Severity::Warning,
            message: message.into(),
            node_id,
        }
    }

    pub fn expression(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        EditorError {
            code: code.into(),
            phase: Phase::Expression,
            severity: Severity::Warning,
            message: message.into(),
            node_id,
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error
    }
}
