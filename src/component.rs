use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use crate::animation::{start_animation, FrameLoop};
use crate::error::{ConfigError, RenderError};
use crate::{
    AnimationDriver, AnimationHandle, FrameScheduler, Num, Scene, SceneBuilder, SceneConfig,
    SimulationClock,
};

/// Host-provided container the drawing surface is inserted into.
pub trait MountPoint {
    type Surface;

    fn attach(&mut self, surface: &Self::Surface);
    fn detach(&mut self, surface: &Self::Surface);
}

/// Draws a scene onto the surface it owns.
pub trait Renderer {
    type Surface;

    fn surface(&self) -> Self::Surface;
    fn render(&mut self, scene: &Scene) -> Result<(), RenderError>;
}

/// Display size, read once at activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height, or 1.0 while either side is zero (a minimised
    /// window).
    pub fn aspect(&self) -> Num {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as Num / self.height as Num
        }
    }
}

/// What the host hands over when the view becomes visible.
pub struct HostContext<M, S> {
    /// `None` when the container element does not exist
    pub mount: Option<M>,
    pub viewport: Viewport,
    pub scheduler: Rc<RefCell<S>>,
}

/// The solar system component, ready to be activated.
#[derive(Debug, Clone, Default)]
pub struct SolarSystem {
    config: SceneConfig,
}

impl SolarSystem {
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self { config })
    }

    /// Builds the scene, inserts the renderer's surface into the mount
    /// point and starts the frame loop.
    ///
    /// Without a mount point nothing is built or scheduled and `None` is
    /// returned.
    pub fn activate<M, S, C, R>(
        &self,
        host: HostContext<M, S>,
        clock: C,
        create_renderer: impl FnOnce(Viewport) -> R,
    ) -> Option<Mounted<M, S, C, R>>
    where
        M: MountPoint<Surface = R::Surface>,
        S: FrameScheduler + 'static,
        C: SimulationClock + 'static,
        R: Renderer + 'static,
    {
        let HostContext {
            mount,
            viewport,
            scheduler,
        } = host;

        let Some(mut mount) = mount else {
            debug!("No mount point, skipping activation");
            return None;
        };

        let renderer = create_renderer(viewport);
        let scene = SceneBuilder::new(&self.config)
            .aspect(viewport.aspect())
            .build();

        let surface = renderer.surface();
        mount.attach(&surface);

        let frame_loop = Rc::new(RefCell::new(FrameLoop::new(
            AnimationDriver::new(clock),
            scene,
            renderer,
        )));
        let handle = start_animation(&scheduler, Rc::clone(&frame_loop));

        info!(
            "Solar system mounted ({}x{})",
            viewport.width,
            viewport.height
        );

        Some(Mounted {
            mount,
            surface,
            scheduler,
            frame_loop,
            handle,
            mounted: true,
        })
    }
}

/// An active component. Dropping it tears it down.
pub struct Mounted<M, S, C, R>
where
    M: MountPoint<Surface = R::Surface>,
    S: FrameScheduler,
    C: SimulationClock,
    R: Renderer,
{
    mount: M,
    surface: R::Surface,
    scheduler: Rc<RefCell<S>>,
    frame_loop: Rc<RefCell<FrameLoop<C, R>>>,
    handle: AnimationHandle,
    mounted: bool,
}

impl<M, S, C, R> Mounted<M, S, C, R>
where
    M: MountPoint<Surface = R::Surface>,
    S: FrameScheduler,
    C: SimulationClock,
    R: Renderer,
{
    pub fn handle(&self) -> &AnimationHandle {
        &self.handle
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn with_scene<T>(&self, f: impl FnOnce(&Scene) -> T) -> T {
        f(self.frame_loop.borrow().scene())
    }

    pub fn with_renderer<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(self.frame_loop.borrow().renderer())
    }

    /// Stops scheduling frames, then removes the surface from the mount
    /// point. Later calls do nothing.
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }

        self.handle.cancel(&mut *self.scheduler.borrow_mut());
        self.mount.detach(&self.surface);
        self.mounted = false;

        info!(
            "Solar system unmounted after {} frames",
            self.handle.frames_rendered()
        );
    }
}

impl<M, S, C, R> Drop for Mounted<M, S, C, R>
where
    M: MountPoint<Surface = R::Surface>,
    S: FrameScheduler,
    C: SimulationClock,
    R: Renderer,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::QueuedScheduler;
    use crate::testing::{Container, RecordingRenderer, Surface};
    use crate::{vec3, ManualClock};

    type TestMounted = Mounted<Container, QueuedScheduler, Rc<ManualClock>, RecordingRenderer>;

    struct Host {
        container: Container,
        scheduler: Rc<RefCell<QueuedScheduler>>,
        clock: Rc<ManualClock>,
    }

    impl Host {
        fn new() -> Self {
            Self {
                container: Container::default(),
                scheduler: Rc::new(RefCell::new(QueuedScheduler::new())),
                clock: Rc::new(ManualClock::new(0.0)),
            }
        }

        fn context(&self, with_mount: bool) -> HostContext<Container, QueuedScheduler> {
            HostContext {
                mount: with_mount.then(|| self.container.clone()),
                viewport: Viewport::new(1920, 1080),
                scheduler: Rc::clone(&self.scheduler),
            }
        }

        fn activate(&self) -> TestMounted {
            SolarSystem::default()
                .activate(self.context(true), Rc::clone(&self.clock), |_| {
                    RecordingRenderer::new(Surface(7))
                })
                .expect("mount point is available")
        }

        fn pump(&self) -> usize {
            QueuedScheduler::run_pending(&self.scheduler)
        }

        fn pending(&self) -> usize {
            self.scheduler.borrow().pending()
        }

        fn children(&self) -> Vec<Surface> {
            self.container.children.borrow().clone()
        }
    }

    #[test]
    fn missing_mount_point_aborts_quietly() {
        let host = Host::new();
        let mut created = false;

        let mounted = SolarSystem::default().activate(
            host.context(false),
            Rc::clone(&host.clock),
            |_| {
                created = true;
                RecordingRenderer::new(Surface(7))
            },
        );

        assert!(mounted.is_none());
        assert!(!created);
        assert_eq!(host.pending(), 0);
        assert!(host.children().is_empty());
    }

    #[test]
    fn activation_attaches_the_surface_and_schedules_a_frame() {
        let host = Host::new();
        let mounted = host.activate();

        assert!(mounted.is_mounted());
        assert_eq!(host.children(), vec![Surface(7)]);
        assert_eq!(host.pending(), 1);
        assert!(mounted.handle().is_alive());
    }

    #[test]
    fn renderer_sees_the_viewport() {
        let host = Host::new();
        let mut seen = None;

        let mounted = SolarSystem::default()
            .activate(host.context(true), Rc::clone(&host.clock), |viewport| {
                seen = Some(viewport);
                RecordingRenderer::new(Surface(7))
            })
            .unwrap();

        assert_eq!(seen, Some(Viewport::new(1920, 1080)));
        mounted.with_scene(|scene| {
            assert!((scene.viewpoint.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        });
    }

    #[test]
    fn frames_move_the_planets() {
        let host = Host::new();
        let mounted = host.activate();

        host.clock.set(std::f64::consts::PI / 0.00030);
        host.pump();

        mounted.with_renderer(|renderer| {
            assert_eq!(renderer.frames(), 1);
            let scene = renderer.last_scene.as_ref().unwrap();
            let earth = scene.bodies[2].body.transform.translation;
            assert!(earth.abs_diff_eq(vec3(-6.0, 0.0, 0.0), 1e-4));
        });
    }

    #[test]
    fn teardown_leaves_no_scheduled_frames() {
        let host = Host::new();
        let mut mounted = host.activate();
        host.pump();
        host.pump();

        mounted.teardown();

        assert_eq!(host.pending(), 0);
        assert!(!mounted.is_mounted());
        assert!(!mounted.handle().is_alive());
        assert!(host.children().is_empty());

        assert_eq!(host.pump(), 0);
        assert_eq!(mounted.handle().frames_rendered(), 2);
    }

    #[test]
    fn teardown_before_the_first_frame() {
        let host = Host::new();
        let mut mounted = host.activate();

        mounted.teardown();

        assert_eq!(host.pending(), 0);
        assert_eq!(mounted.with_renderer(|r| r.frames()), 0);
    }

    #[test]
    fn dropping_tears_down() {
        let host = Host::new();
        let handle = {
            let mounted = host.activate();
            host.pump();
            mounted.handle().clone()
        };

        assert!(!handle.is_alive());
        assert_eq!(host.pending(), 0);
        assert!(host.children().is_empty());
    }

    #[test]
    fn teardown_is_idempotent() {
        let host = Host::new();
        let mut mounted = host.activate();

        mounted.teardown();
        mounted.teardown();
        drop(mounted);

        assert!(host.children().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let mut config = SceneConfig::default();
        config.bodies.clear();

        assert!(matches!(
            SolarSystem::new(config),
            Err(ConfigError::UnknownSatelliteParent { .. })
        ));
    }

    #[test]
    fn empty_viewport_falls_back_to_square() {
        assert_eq!(Viewport::new(800, 0).aspect(), 1.0);
        assert_eq!(Viewport::new(0, 600).aspect(), 1.0);
        assert_eq!(Viewport::new(0, 0).aspect(), 1.0);
        assert!((Viewport::new(800, 600).aspect() - 4.0 / 3.0).abs() < 1e-6);
    }
}
