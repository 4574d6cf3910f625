use crate::layer::LayerKind;
use crate::shape::ShapeId;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// A layer must be repainted
    LayerInvalidated { layer: LayerKind, version: u64 },
    /// A finished shape was added to a persistent layer
    ShapeCommitted { shape: ShapeId },
    /// An undo/redo unit was recorded, undone or redone
    HistoryChanged { can_undo: bool, can_redo: bool },
}
