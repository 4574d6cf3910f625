//! The facade every tool talks to.
//!
//! Tools never reach into a host directly: snapping, connection lookup,
//! hit-testing and selection go through [`Editor`]. [`ProjectEditor`] is the
//! in-crate host and [`EditorSession`] wraps it with the active tool.

use kurbo::Rect;

use crate::config::EditorOptions;
use crate::geometry::PointId;
use crate::layer::LayerKind;
use crate::project::Project;
use crate::selection::Selection;
use crate::tools::InputArgs;

mod project_editor;
mod session;

pub use project_editor::ProjectEditor;
pub use session::EditorSession;

pub trait Editor {
    fn project(&self) -> &Project;
    fn project_mut(&mut self) -> &mut Project;
    fn options(&self) -> &EditorOptions;
    fn selection(&self) -> &Selection;
    fn selection_mut(&mut self) -> &mut Selection;

    /// Apply the grid-snap policy to a pointer position
    fn try_to_snap(&self, args: &InputArgs) -> (f64, f64) {
        self.options().snap(args.x, args.y)
    }

    /// An existing point of the current layer within the hit threshold
    fn try_to_get_connection_point(&self, x: f64, y: f64) -> Option<PointId>;

    /// Highlight the shape under the cursor; returns true if one was found
    fn try_to_hover_shape(&mut self, x: f64, y: f64) -> bool;

    fn dehover(&mut self, layer: LayerKind);

    /// Insert `point` as a connector on the line under (x, y)
    ///
    /// When no line is hit and `add_if_no_split` is set, the point is added to
    /// the current layer as a standalone point. Returns true only on a split.
    fn try_to_split_line(
        &mut self,
        x: f64,
        y: f64,
        point: PointId,
        add_if_no_split: bool,
    ) -> bool;

    /// Replace the selection with the point or shape under (x, y)
    fn try_to_select_shape(&mut self, layer: LayerKind, x: f64, y: f64) -> bool;

    /// Replace the selection with every shape overlapping `rect`
    fn try_to_select_shapes(&mut self, layer: LayerKind, rect: Rect);
}
