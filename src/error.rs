use thiserror::Error;

use crate::shape::ShapeId;

/// Errors raised while building or querying a path geometry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The geometry has no figures, so there is no pen position
    #[error("path geometry has no figures")]
    EmptyGeometry,
    /// A segment was appended before any figure was started
    #[error("no current figure, begin_figure must be called first")]
    NoCurrentFigure,
}

/// Errors that can occur during tool state transitions
#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Command(#[from] CommandError),

    /// The shape the tool is editing is no longer in the layer it was put in
    #[error("shape {0} is missing from the working layer")]
    MissingShape(ShapeId),

    /// The shape the tool is editing has a different kind than expected
    #[error("shape {id} is not a {expected}")]
    UnexpectedKind { id: ShapeId, expected: &'static str },
}

/// Errors that can occur during command execution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    /// A command referenced a shape that is not in any layer
    #[error("shape {0} not found")]
    ShapeNotFound(ShapeId),
}

/// Errors that can occur while loading editor options
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse editor options: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid editor option: {0}")]
    Invalid(String),
}

/// Result type for tool transitions
pub type ToolResult<T = crate::tools::ToolStatus> = Result<T, ToolError>;

/// Result type for command operations
pub type CommandResult = Result<(), CommandError>;
