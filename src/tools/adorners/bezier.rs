use super::Decorations;
use crate::editor::Editor;
use crate::geometry::PointId;

/// Handles of a cubic curve being drawn, with guide lines to its control points
#[derive(Debug)]
pub struct ToolCubicBezierSelection {
    decorations: Decorations,
}

impl ToolCubicBezierSelection {
    pub fn new(
        editor: &mut dyn Editor,
        point1: PointId,
        point2: PointId,
        point3: PointId,
        point4: PointId,
    ) -> Self {
        let mut decorations = Decorations::default();
        let h1 = decorations.handle(editor, point1);
        let h2 = decorations.handle(editor, point2);
        let h3 = decorations.handle(editor, point3);
        let h4 = decorations.handle(editor, point4);
        decorations.guide_line(editor, h1, h2);
        decorations.guide_line(editor, h3, h4);
        Self { decorations }
    }

    pub fn sync(&self, editor: &mut dyn Editor) {
        self.decorations.sync(editor);
    }

    pub fn reset(&mut self, editor: &mut dyn Editor) {
        self.decorations.clear(editor);
    }
}

/// Handles of a quadratic curve being drawn, with guide lines through the control point
#[derive(Debug)]
pub struct ToolQuadraticBezierSelection {
    decorations: Decorations,
}

impl ToolQuadraticBezierSelection {
    pub fn new(editor: &mut dyn Editor, point1: PointId, point2: PointId, point3: PointId) -> Self {
        let mut decorations = Decorations::default();
        let h1 = decorations.handle(editor, point1);
        let h2 = decorations.handle(editor, point2);
        let h3 = decorations.handle(editor, point3);
        decorations.guide_line(editor, h1, h2);
        decorations.guide_line(editor, h2, h3);
        Self { decorations }
    }

    pub fn sync(&self, editor: &mut dyn Editor) {
        self.decorations.sync(editor);
    }

    pub fn reset(&mut self, editor: &mut dyn Editor) {
        self.decorations.clear(editor);
    }
}
