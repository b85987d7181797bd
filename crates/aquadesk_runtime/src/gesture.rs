//! Transient drag/resize buffers.
//!
//! A [`GestureSession`] owns the uncommitted geometry of one pointer gesture. Pointer moves only
//! touch the buffer; [`GestureSession::finish`] consumes it and yields the single commit to apply
//! to the window engine. Dropping a session without finishing it discards the geometry.

use serde::{Deserialize, Serialize};

use crate::model::{GestureKind, Point, PointerPosition, Size, WindowId, WindowRect};

/// Size bounds applied while resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeLimits {
    pub min: Size,
    pub max: Size,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            min: Size::new(400, 300),
            max: Size::new(1600, 1200),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureSession {
    pub window_id: WindowId,
    pub kind: GestureKind,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
    preview: WindowRect,
}

/// Terminal value of a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureCommit {
    Position { window_id: WindowId, position: Point },
    Size { window_id: WindowId, size: Size },
}

impl GestureSession {
    pub fn begin(
        window_id: WindowId,
        kind: GestureKind,
        pointer: PointerPosition,
        rect_start: WindowRect,
    ) -> Self {
        Self {
            window_id,
            kind,
            pointer_start: pointer,
            rect_start,
            preview: rect_start,
        }
    }

    /// Recomputes the preview geometry from the pointer delta since the gesture began.
    pub fn update(&mut self, pointer: PointerPosition, limits: SizeLimits) {
        let dx = pointer.x.saturating_sub(self.pointer_start.x);
        let dy = pointer.y.saturating_sub(self.pointer_start.y);
        self.preview = match self.kind {
            GestureKind::Move => WindowRect {
                x: self.rect_start.x.saturating_add(dx),
                y: self.rect_start.y.saturating_add(dy),
                ..self.rect_start
            },
            // south-east handle
            GestureKind::Resize => {
                let size = Size::new(
                    self.rect_start.w.saturating_add(dx),
                    self.rect_start.h.saturating_add(dy),
                )
                    .clamped(limits.min, limits.max);
                WindowRect {
                    w: size.width,
                    h: size.height,
                    ..self.rect_start
                }
            }
        };
    }

    /// Geometry the presentation layer should paint while the gesture is live.
    pub fn preview(&self) -> WindowRect {
        self.preview
    }

    pub fn finish(self) -> GestureCommit {
        match self.kind {
            GestureKind::Move => GestureCommit::Position {
                window_id: self.window_id,
                position: self.preview.position(),
            },
            GestureKind::Resize => GestureCommit::Size {
                window_id: self.window_id,
                size: self.preview.size(),
            },
        }
    }
}
