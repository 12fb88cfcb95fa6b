//! Bevy's side of the component contract: the window is the mount point,
//! the scene root entity is the surface and frames are pumped from `Update`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use bevy::prelude::*;
use orbit_scene::animation::QueuedScheduler;
use orbit_scene::component::{MountPoint, Renderer};
use orbit_scene::error::RenderError;
use orbit_scene::{Mounted, NodeId, Scene, SystemClock};

pub type Scheduler = Rc<RefCell<QueuedScheduler>>;

pub fn new_scheduler() -> Scheduler {
    Rc::new(RefCell::new(QueuedScheduler::new()))
}

/// Local transforms written by the last rendered frame, waiting to be
/// copied onto entities.
#[derive(Default, Clone)]
pub struct FrameOutbox(Rc<RefCell<HashMap<NodeId, orbit_scene::Transform>>>);

impl FrameOutbox {
    pub fn drain(&self) -> HashMap<NodeId, orbit_scene::Transform> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// "Renders" by publishing the moving nodes' transforms; bevy's own render
/// graph draws the entities afterwards.
pub struct SceneSync {
    root: Entity,
    outbox: FrameOutbox,
}

impl SceneSync {
    pub fn new(root: Entity, outbox: FrameOutbox) -> Self {
        Self { root, outbox }
    }
}

impl Renderer for SceneSync {
    type Surface = Entity;

    fn surface(&self) -> Entity {
        self.root
    }

    fn render(&mut self, scene: &Scene) -> Result<(), RenderError> {
        let mut outbox = self.outbox.0.borrow_mut();

        outbox.clear();
        outbox.extend(
            scene
                .moving_nodes()
                .filter_map(|id| scene.local_transform(id).map(|t| (id, t))),
        );

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOp {
    Show(Entity),
    Remove(Entity),
}

#[derive(Default, Clone)]
pub struct MountQueue(Rc<RefCell<Vec<MountOp>>>);

impl MountQueue {
    pub fn drain(&self) -> Vec<MountOp> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// The primary window. Attaching reveals the scene root, detaching
/// despawns it.
pub struct WindowMount {
    queue: MountQueue,
}

impl WindowMount {
    pub fn new(queue: MountQueue) -> Self {
        Self { queue }
    }
}

impl MountPoint for WindowMount {
    type Surface = Entity;

    fn attach(&mut self, root: &Entity) {
        self.queue.0.borrow_mut().push(MountOp::Show(*root));
    }

    fn detach(&mut self, root: &Entity) {
        self.queue.0.borrow_mut().push(MountOp::Remove(*root));
    }
}

pub type ActiveSolarSystem = Mounted<WindowMount, QueuedScheduler, SystemClock, SceneSync>;

/// Holds the mounted component. Lives as a non-send resource since
/// everything inside is `Rc`-shared with the frame loop.
#[derive(Default)]
pub struct ActiveComponent(pub Option<ActiveSolarSystem>);

pub fn to_bevy(transform: &orbit_scene::Transform) -> Transform {
    Transform {
        translation: transform.translation,
        rotation: transform.rotation,
        scale: transform.scale,
    }
}
