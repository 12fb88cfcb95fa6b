//! Test doubles for the host side of the component.

use std::cell::RefCell;
use std::rc::Rc;

use crate::component::{MountPoint, Renderer};
use crate::error::RenderError;
use crate::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface(pub u32);

/// Counts frames and keeps a copy of the last scene it drew.
pub struct RecordingRenderer {
    surface: Surface,
    frames: u32,
    fail_after: Option<u32>,
    pub last_scene: Option<Scene>,
}

impl RecordingRenderer {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            frames: 0,
            fail_after: None,
            last_scene: None,
        }
    }

    /// Renders `frames` frames, then reports a lost surface.
    pub fn failing_after(surface: Surface, frames: u32) -> Self {
        Self {
            fail_after: Some(frames),
            ..Self::new(surface)
        }
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl Renderer for RecordingRenderer {
    type Surface = Surface;

    fn surface(&self) -> Surface {
        self.surface
    }

    fn render(&mut self, scene: &Scene) -> Result<(), RenderError> {
        if self.fail_after.is_some_and(|limit| self.frames >= limit) {
            return Err(RenderError::SurfaceLost);
        }

        self.frames += 1;
        self.last_scene = Some(scene.clone());

        Ok(())
    }
}

/// A container element. The children list is shared so tests can inspect it
/// after the mount point has been moved into a [`crate::Mounted`].
#[derive(Debug, Clone, Default)]
pub struct Container {
    pub children: Rc<RefCell<Vec<Surface>>>,
}

impl MountPoint for Container {
    type Surface = Surface;

    fn attach(&mut self, surface: &Surface) {
        self.children.borrow_mut().push(*surface);
    }

    fn detach(&mut self, surface: &Surface) {
        self.children.borrow_mut().retain(|child| child != surface);
    }
}
