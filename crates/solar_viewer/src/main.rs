use std::rc::Rc;

use bevy::prelude::*;
use bevy::render::mesh::Indices;
use bevy::render::render_resource::{Face, PrimitiveTopology};
use bevy::window::PrimaryWindow;
use bevy_egui::EguiPlugin;
use orbit_scene::component::{HostContext, Viewport};
use orbit_scene::geometry::{Material, RingGeometry, SphereGeometry};
use orbit_scene::scene::Viewpoint;
use orbit_scene::{NodeId, Rgb, Scene, SolarSystem, SystemClock};
use smooth_bevy_cameras::{LookTransform, LookTransformBundle, LookTransformPlugin, Smoother};

use crate::host::{ActiveComponent, FrameOutbox, MountQueue, Scheduler, SceneSync, WindowMount};
use crate::planet::{LabelText, SceneNode};

const FALLBACK_VIEWPORT: Viewport = Viewport {
    width: 1280,
    height: 720,
};

mod host;
mod planet;
mod ui;
mod update;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Solar System".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(LookTransformPlugin)
        .add_plugins(EguiPlugin)
        .insert_non_send_resource(host::new_scheduler())
        .insert_non_send_resource(FrameOutbox::default())
        .insert_non_send_resource(MountQueue::default())
        .insert_non_send_resource(ActiveComponent::default())
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                update::teardown_on_close,
                update::frames,
                update::render_failures,
                update::mount_ops,
            )
                .chain(),
        )
        .add_systems(Update, ui::labels)
        .run();
}

#[derive(Resource)]
struct ViewerSettings {
    /// Labels never shrink below this, in logical pixels
    min_label_size: f32,
}

#[allow(clippy::too_many_arguments)]
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    scheduler: NonSend<Scheduler>,
    outbox: NonSend<FrameOutbox>,
    mounts: NonSend<MountQueue>,
    mut component: NonSendMut<ActiveComponent>,
) {
    commands.insert_resource(ClearColor(Color::BLACK));

    commands.insert_resource(ViewerSettings {
        min_label_size: 8.0,
    });

    let window = windows.get_single().ok();
    let viewport = window
        .map(|w| Viewport::new(w.width() as u32, w.height() as u32))
        .unwrap_or(FALLBACK_VIEWPORT);

    // Stays hidden until the window mount attaches it
    let root = commands
        .spawn(SpatialBundle {
            visibility: Visibility::Hidden,
            ..default()
        })
        .insert(Name::new("Solar System"))
        .id();

    let context = HostContext {
        mount: window.map(|_| WindowMount::new(mounts.clone())),
        viewport,
        scheduler: Rc::clone(&*scheduler),
    };
    let outbox = outbox.clone();

    let Some(mounted) =
        SolarSystem::default().activate(context, SystemClock, |_| SceneSync::new(root, outbox))
    else {
        debug!("No primary window, nothing to draw into");
        commands.entity(root).despawn();
        return;
    };

    mounted.with_scene(|scene| {
        spawn_scene(&mut commands, root, scene, &mut meshes, &mut materials);
        spawn_camera(&mut commands, &scene.viewpoint);
    });

    component.0 = Some(mounted);
}

fn spawn_scene(
    commands: &mut Commands,
    root: Entity,
    scene: &Scene,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let mut material = |m: &Material| {
        materials.add(StandardMaterial {
            base_color: rgb(m.color),
            unlit: true,
            double_sided: m.double_sided,
            cull_mode: if m.double_sided { None } else { Some(Face::Back) },
            ..Default::default()
        })
    };

    commands.entity(root).with_children(|parent| {
        parent
            .spawn(PbrBundle {
                mesh: meshes.add(sphere(&scene.central.geometry)),
                material: material(&scene.central.material),
                transform: host::to_bevy(&scene.central.transform),
                ..Default::default()
            })
            .insert(SceneNode(NodeId::Central))
            .insert(Name::new(scene.central.name.clone()));

        for (i, orbiting) in scene.bodies.iter().enumerate() {
            let body = &orbiting.body;

            parent
                .spawn(PbrBundle {
                    mesh: meshes.add(sphere(&body.geometry)),
                    material: material(&body.material),
                    transform: host::to_bevy(&body.transform),
                    ..Default::default()
                })
                .insert(SceneNode(NodeId::Body(i)))
                .insert(Name::new(body.name.clone()))
                .with_children(|children| {
                    children
                        .spawn(SpatialBundle::from_transform(host::to_bevy(
                            &orbiting.label.transform,
                        )))
                        .insert(SceneNode(NodeId::Label(i)))
                        .insert(LabelText::new(&orbiting.label));

                    for (index, satellite) in orbiting.satellites.iter().enumerate() {
                        children
                            .spawn(PbrBundle {
                                mesh: meshes.add(sphere(&satellite.body.geometry)),
                                material: material(&satellite.body.material),
                                transform: host::to_bevy(&satellite.body.transform),
                                ..Default::default()
                            })
                            .insert(SceneNode(NodeId::Satellite { body: i, index }))
                            .insert(Name::new(satellite.body.name.clone()));
                    }
                });
        }

        for (i, ring) in scene.rings.iter().enumerate() {
            parent
                .spawn(PbrBundle {
                    mesh: meshes.add(ring_mesh(&ring.geometry)),
                    material: material(&ring.material),
                    transform: host::to_bevy(&ring.transform),
                    ..Default::default()
                })
                .insert(SceneNode(NodeId::Ring(i)));
        }
    });
}

fn spawn_camera(commands: &mut Commands, viewpoint: &Viewpoint) {
    commands
        .spawn(Camera3dBundle {
            projection: Projection::Perspective(PerspectiveProjection {
                fov: viewpoint.fov_degrees.to_radians(),
                aspect_ratio: viewpoint.aspect,
                near: viewpoint.near,
                far: viewpoint.far,
            }),
            ..Default::default()
        })
        .insert(LookTransformBundle {
            transform: LookTransform::new(viewpoint.eye, viewpoint.target, viewpoint.up),
            // The camera never moves, there is nothing to smooth
            smoother: Smoother::new(0.0),
        });
}

fn sphere(geometry: &SphereGeometry) -> Mesh {
    Mesh::from(shape::UVSphere {
        radius: geometry.radius,
        sectors: geometry.width_segments as usize,
        stacks: geometry.height_segments as usize,
    })
}

fn ring_mesh(geometry: &RingGeometry) -> Mesh {
    let data = geometry.mesh();

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, data.positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, data.normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, data.uvs);
    mesh.set_indices(Some(Indices::U32(data.indices)));

    mesh
}

fn rgb(color: Rgb) -> Color {
    Color::rgb_u8(color.r(), color.g(), color.b())
}
