use futures::channel::oneshot;
use log::{debug, info};

use super::box_tool::{BoxState, BoxToolCore};
use super::{ImagePick, InputArgs, Tool, ToolStatus};
use crate::editor::Editor;
use crate::error::ToolResult;
use crate::shape::{factory, ShapeId};

/// A first click waiting for the host to pick an image
#[derive(Debug)]
struct PendingPick {
    receiver: oneshot::Receiver<String>,
    x: f64,
    y: f64,
}

/// Picks an image key, then draws its box with two clicks
///
/// The first click suspends: it returns [`ToolStatus::Pending`] with an
/// [`ImagePick`] for the host. Once the host resolves it, [`Tool::poll`]
/// continues the same click by anchoring the image at the clicked position.
/// A dropped or cancelled pick leaves the tool in its initial state.
#[derive(Debug, Default)]
pub struct ImageTool {
    core: BoxToolCore,
    pending: Option<PendingPick>,
}

impl ImageTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BoxState {
        self.core.state()
    }

    pub fn shape(&self) -> Option<ShapeId> {
        self.core.shape()
    }

    pub fn is_waiting_for_pick(&self) -> bool {
        self.pending.is_some()
    }
}

impl Tool for ImageTool {
    fn name(&self) -> &'static str {
        "Image"
    }

    fn current_state_name(&self) -> &'static str {
        if self.pending.is_some() {
            "Pick"
        } else {
            self.core.state().name()
        }
    }

    fn status(&self) -> ToolStatus {
        if self.pending.is_some() {
            ToolStatus::Cancelable
        } else {
            self.core.status()
        }
    }

    fn left_down(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        if self.pending.is_some() {
            // Clicks are ignored until the pick completes
            return Ok(ToolStatus::Cancelable);
        }
        let (x, y) = editor.try_to_snap(&args);
        match self.core.state() {
            BoxState::TopLeft => {
                let (sender, receiver) = oneshot::channel();
                debug!("image pick requested at ({x}, {y})");
                self.pending = Some(PendingPick { receiver, x, y });
                Ok(ToolStatus::Pending(ImagePick::new(sender)))
            }
            BoxState::BottomRight => Ok(self.core.finish(editor, "Image", x, y)),
        }
    }

    fn right_down(&mut self, editor: &mut dyn Editor, _args: InputArgs) -> ToolResult {
        self.reset(editor);
        Ok(ToolStatus::Idle)
    }

    fn pointer_move(&mut self, editor: &mut dyn Editor, args: InputArgs) -> ToolResult {
        if self.pending.is_some() {
            return Ok(ToolStatus::Cancelable);
        }
        let (x, y) = editor.try_to_snap(&args);
        Ok(self.core.pointer_move(editor, x, y))
    }

    fn poll(&mut self, editor: &mut dyn Editor) -> ToolResult {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(self.status());
        };
        match pending.receiver.try_recv() {
            Ok(None) => Ok(ToolStatus::Cancelable),
            Ok(Some(key)) => {
                let (x, y) = (pending.x, pending.y);
                self.pending = None;
                info!("image {key} picked");
                Ok(self.core.begin(editor, x, y, false, |options, top_left, bottom_right| {
                    factory::create_image(options, top_left, bottom_right, &key)
                }))
            }
            Err(oneshot::Canceled) => {
                debug!("image pick cancelled");
                self.pending = None;
                Ok(ToolStatus::Idle)
            }
        }
    }

    fn reset(&mut self, editor: &mut dyn Editor) {
        self.pending = None;
        self.core.reset(editor);
    }
}
