use super::Decorations;
use crate::editor::Editor;
use crate::geometry::PointId;

/// Corner handles of a rectangle, ellipse, text or image being drawn
#[derive(Debug)]
pub struct ToolBoxSelection {
    decorations: Decorations,
}

impl ToolBoxSelection {
    pub fn new(editor: &mut dyn Editor, top_left: PointId, bottom_right: PointId) -> Self {
        let mut decorations = Decorations::default();
        decorations.handle(editor, top_left);
        decorations.handle(editor, bottom_right);
        Self { decorations }
    }

    pub fn sync(&self, editor: &mut dyn Editor) {
        self.decorations.sync(editor);
    }

    pub fn reset(&mut self, editor: &mut dyn Editor) {
        self.decorations.clear(editor);
    }
}
