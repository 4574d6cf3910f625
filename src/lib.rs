#![warn(clippy::all, rust_2018_idioms)]

pub mod command;
pub mod config;
pub mod editor;
pub mod error;
pub mod event;
pub mod geometry;
pub mod id_generator;
pub mod layer;
pub mod path;
pub mod project;
pub mod render;
pub mod selection;
pub mod shape;
pub mod style;
pub mod tools;

pub use command::{Command, History, MoveTarget, Snapshot};
pub use config::{EditorOptions, EllipseMode, MoveMode};
pub use editor::{Editor, EditorSession, ProjectEditor};
pub use error::{CommandError, ConfigError, GeometryError, ToolError};
pub use event::{EditorEvent, EventBus, EventHandler};
pub use geometry::{PointId, PointShape, PointStore, ShapeState};
pub use layer::{Container, Layer, LayerKind};
pub use path::{GeometryContext, PathGeometry};
pub use project::Project;
pub use render::ShapeRenderer;
pub use selection::Selection;
pub use shape::{Shape, ShapeId, ShapeKind};
pub use style::ShapeStyle;
pub use tools::{InputArgs, Tool, ToolStatus, ToolType};
