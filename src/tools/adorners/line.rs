use super::Decorations;
use crate::editor::Editor;
use crate::geometry::PointId;

/// Start and end handles of a line or path segment being drawn
#[derive(Debug)]
pub struct ToolLineSelection {
    decorations: Decorations,
}

impl ToolLineSelection {
    pub fn new(editor: &mut dyn Editor, start: PointId, end: PointId) -> Self {
        let mut decorations = Decorations::default();
        decorations.handle(editor, start);
        decorations.handle(editor, end);
        Self { decorations }
    }

    /// Re-sync the handles with the line's points
    pub fn sync(&self, editor: &mut dyn Editor) {
        self.decorations.sync(editor);
    }

    pub fn reset(&mut self, editor: &mut dyn Editor) {
        self.decorations.clear(editor);
    }
}
