use bevy::app::AppExit;
use bevy::prelude::*;
use bevy::window::WindowCloseRequested;
use orbit_scene::animation::QueuedScheduler;

use crate::host::{self, ActiveComponent, FrameOutbox, MountOp, MountQueue, Scheduler};
use crate::planet::SceneNode;

/// Runs the frames the animation requested, then copies the new positions
/// onto the matching entities.
pub fn frames(
    scheduler: NonSend<Scheduler>,
    outbox: NonSend<FrameOutbox>,
    mut nodes: Query<(&SceneNode, &mut Transform)>,
) {
    QueuedScheduler::run_pending(&scheduler);

    let moved = outbox.drain();
    if moved.is_empty() {
        return;
    }

    for (node, mut transform) in nodes.iter_mut() {
        if let Some(local) = moved.get(&node.0) {
            *transform = host::to_bevy(local);
        }
    }
}

/// A failed frame is fatal: log it and shut the app down.
pub fn render_failures(component: NonSend<ActiveComponent>, mut exit: EventWriter<AppExit>) {
    let Some(mounted) = &component.0 else {
        return;
    };

    if let Some(err) = mounted.handle().take_error() {
        error!("Solar system stopped: {err}");
        exit.send(AppExit);
    }
}

pub fn mount_ops(mut commands: Commands, queue: NonSend<MountQueue>) {
    for op in queue.drain() {
        match op {
            MountOp::Show(root) => {
                commands.entity(root).insert(Visibility::Inherited);
            }
            MountOp::Remove(root) => {
                if let Some(entity) = commands.get_entity(root) {
                    entity.despawn_recursive();
                }
            }
        }
    }
}

pub fn teardown_on_close(
    mut close_requests: EventReader<WindowCloseRequested>,
    mut exits: EventReader<AppExit>,
    mut component: NonSendMut<ActiveComponent>,
) {
    let closing = close_requests.read().count() > 0;
    let exiting = exits.read().count() > 0;

    if !(closing || exiting) {
        return;
    }

    if let Some(mut mounted) = component.0.take() {
        info!("Window closing, tearing down");
        mounted.teardown();
    }
}
