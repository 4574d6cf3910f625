use super::Decorations;
use crate::editor::Editor;
use crate::geometry::PointId;
use crate::shape::factory;

/// Handles of an arc being drawn, with the ellipse it is cut from
#[derive(Debug)]
pub struct ToolArcSelection {
    decorations: Decorations,
}

impl ToolArcSelection {
    pub fn new(
        editor: &mut dyn Editor,
        point1: PointId,
        point2: PointId,
        point3: PointId,
        point4: PointId,
    ) -> Self {
        let mut decorations = Decorations::default();
        let top_left = decorations.handle(editor, point1);
        let bottom_right = decorations.handle(editor, point2);
        let ellipse = factory::create_ellipse(editor.options(), top_left, bottom_right);
        decorations.add(editor, ellipse);
        decorations.handle(editor, point3);
        decorations.handle(editor, point4);
        Self { decorations }
    }

    pub fn sync(&self, editor: &mut dyn Editor) {
        self.decorations.sync(editor);
    }

    pub fn reset(&mut self, editor: &mut dyn Editor) {
        self.decorations.clear(editor);
    }
}
