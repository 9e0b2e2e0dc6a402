use thiserror::Error;

/// Errors that abort a whole compilation.
///
/// Everything else (bad `menuOptions`, missing properties, dangling edges, unknown node types)
/// degrades into defaults and never reaches the caller as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Workflow must have at least one node")]
    EmptyWorkflow,

    #[error("No start node found")]
    NoStartNode,
}

/// Errors that can occur when converting an editor payload (or any custom format) into a `Diagram`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagramConversionError {
    #[error("Failed to parse diagram JSON: {0}")]
    Json(String),

    #[error("Node id '{0}' is used by more than one node")]
    DuplicateNodeId(String),

    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}

/// Errors raised while loading `CompileOptions`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),
}
