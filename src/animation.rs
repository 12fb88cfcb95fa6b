//! The per-frame half of the component.
//!
//! Every displayed frame the [`AnimationDriver`] reads the clock and moves
//! each orbiting body to where its orbit puts it at that instant. Positions
//! are a pure function of time, so a frame never depends on the frames
//! before it.
//!
//! Frames are requested from a [`FrameScheduler`] one at a time: each frame
//! asks for the next one after it has rendered. The loop stops as soon as
//! its [`AnimationHandle`] is cancelled, and the check happens at the start
//! of every frame, not only at teardown.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use log::{debug, error, trace};

use crate::component::Renderer;
use crate::error::RenderError;
use crate::{Scene, SimulationClock};

/// Identifies one requested frame so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

pub type FrameCallback = Box<dyn FnOnce()>;

/// The host's "call me before the next repaint" service.
///
/// Implementations must not hold a borrow of themselves while running a
/// callback: the callback requests the next frame from the same scheduler.
pub trait FrameScheduler {
    fn request_frame(&mut self, callback: FrameCallback) -> FrameId;

    /// Drops a requested frame. Unknown or already-run ids are ignored.
    fn cancel_frame(&mut self, id: FrameId);
}

/// A FIFO scheduler for hosts that pump frames themselves, once per refresh.
#[derive(Default)]
pub struct QueuedScheduler {
    next_id: u64,
    queue: VecDeque<(FrameId, FrameCallback)>,
}

impl QueuedScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Runs every frame requested before this call. Frames requested while
    /// running wait for the next call.
    pub fn run_pending(this: &Rc<RefCell<Self>>) -> usize {
        let batch = std::mem::take(&mut this.borrow_mut().queue);
        let count = batch.len();

        for (_, callback) in batch {
            callback();
        }

        count
    }
}

impl FrameScheduler for QueuedScheduler {
    fn request_frame(&mut self, callback: FrameCallback) -> FrameId {
        let id = FrameId(self.next_id);
        self.next_id += 1;
        self.queue.push_back((id, callback));
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.queue.retain(|(queued, _)| *queued != id);
    }
}

/// Moves a scene to the clock's current time.
pub struct AnimationDriver<C> {
    clock: C,
}

impl<C: SimulationClock> AnimationDriver<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Updates every orbiting body and satellite and returns the time used.
    pub fn tick(&self, scene: &mut Scene) -> f64 {
        let now = self.clock.now_millis();
        scene.update(now);
        now
    }
}

/// What one frame does: move the scene, then draw it.
pub struct FrameLoop<C, R> {
    driver: AnimationDriver<C>,
    scene: Scene,
    renderer: R,
}

impl<C: SimulationClock, R: Renderer> FrameLoop<C, R> {
    pub fn new(driver: AnimationDriver<C>, scene: Scene, renderer: R) -> Self {
        Self {
            driver,
            scene,
            renderer,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn step(&mut self) -> Result<f64, RenderError> {
        let now = self.driver.tick(&mut self.scene);
        self.renderer.render(&self.scene)?;
        Ok(now)
    }
}

#[derive(Debug, Default)]
struct HandleState {
    alive: Cell<bool>,
    pending: Cell<Option<FrameId>>,
    frames: Cell<u64>,
    error: RefCell<Option<RenderError>>,
}

/// Owned by the host; keeps the frame loop going until cancelled.
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    state: Rc<HandleState>,
}

impl AnimationHandle {
    fn new() -> Self {
        let state = HandleState::default();
        state.alive.set(true);

        Self {
            state: Rc::new(state),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state.alive.get()
    }

    /// Whether a frame is currently requested from the scheduler.
    pub fn has_pending_frame(&self) -> bool {
        self.state.pending.get().is_some()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.state.frames.get()
    }

    /// The render failure that stopped the loop, if any.
    pub fn take_error(&self) -> Option<RenderError> {
        self.state.error.borrow_mut().take()
    }

    /// Stops the loop and withdraws the frame it has requested. Safe to call
    /// more than once.
    pub fn cancel<S: FrameScheduler + ?Sized>(&self, scheduler: &mut S) {
        if self.state.alive.replace(false) {
            debug!(
                "Animation cancelled after {} frames",
                self.frames_rendered()
            );
        }

        if let Some(id) = self.state.pending.take() {
            scheduler.cancel_frame(id);
        }
    }
}

/// Requests the first frame and returns the handle that controls the loop.
pub fn start_animation<S, C, R>(
    scheduler: &Rc<RefCell<S>>,
    frame_loop: Rc<RefCell<FrameLoop<C, R>>>,
) -> AnimationHandle
where
    S: FrameScheduler + 'static,
    C: SimulationClock + 'static,
    R: Renderer + 'static,
{
    let handle = AnimationHandle::new();

    debug!("Starting animation");
    request_next(scheduler, frame_loop, handle.clone());

    handle
}

fn request_next<S, C, R>(
    scheduler: &Rc<RefCell<S>>,
    frame_loop: Rc<RefCell<FrameLoop<C, R>>>,
    handle: AnimationHandle,
) where
    S: FrameScheduler + 'static,
    C: SimulationClock + 'static,
    R: Renderer + 'static,
{
    let next_scheduler = Rc::clone(scheduler);
    let state = Rc::clone(&handle.state);

    let id = scheduler.borrow_mut().request_frame(Box::new(move || {
        run_frame(next_scheduler, frame_loop, handle)
    }));

    state.pending.set(Some(id));
}

fn run_frame<S, C, R>(
    scheduler: Rc<RefCell<S>>,
    frame_loop: Rc<RefCell<FrameLoop<C, R>>>,
    handle: AnimationHandle,
) where
    S: FrameScheduler + 'static,
    C: SimulationClock + 'static,
    R: Renderer + 'static,
{
    handle.state.pending.set(None);

    if !handle.is_alive() {
        trace!("Dropping frame of a cancelled animation");
        return;
    }

    let result = frame_loop.borrow_mut().step();

    match result {
        Ok(time) => {
            let state = &handle.state;
            state.frames.set(state.frames.get() + 1);
            trace!("Rendered frame {} at t = {time}", state.frames.get());

            request_next(&scheduler, frame_loop, handle);
        }
        Err(err) => {
            error!("Rendering failed, stopping animation: {err}");
            handle.state.alive.set(false);
            *handle.state.error.borrow_mut() = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingRenderer, Surface};
    use crate::{vec3, ManualClock, SceneBuilder, SceneConfig};

    struct Rig {
        scheduler: Rc<RefCell<QueuedScheduler>>,
        clock: Rc<ManualClock>,
        frame_loop: Rc<RefCell<FrameLoop<Rc<ManualClock>, RecordingRenderer>>>,
    }

    impl Rig {
        fn new(renderer: RecordingRenderer) -> Self {
            let clock = Rc::new(ManualClock::new(0.0));
            let scene = SceneBuilder::new(&SceneConfig::default()).build();
            let driver = AnimationDriver::new(Rc::clone(&clock));

            Self {
                scheduler: Rc::new(RefCell::new(QueuedScheduler::new())),
                clock,
                frame_loop: Rc::new(RefCell::new(FrameLoop::new(driver, scene, renderer))),
            }
        }

        fn start(&self) -> AnimationHandle {
            start_animation(&self.scheduler, Rc::clone(&self.frame_loop))
        }

        fn pump(&self) -> usize {
            QueuedScheduler::run_pending(&self.scheduler)
        }

        fn pending(&self) -> usize {
            self.scheduler.borrow().pending()
        }
    }

    #[test]
    fn tick_is_idempotent_for_a_fixed_time() {
        let clock = ManualClock::new(42_000.0);
        let driver = AnimationDriver::new(&clock);
        let mut a = SceneBuilder::new(&SceneConfig::default()).build();
        let mut b = a.clone();

        driver.tick(&mut a);
        driver.tick(&mut b);
        driver.tick(&mut b);

        assert_eq!(a, b);
    }

    #[test]
    fn tick_uses_the_clock() {
        let t = std::f64::consts::PI / 0.00030;
        let clock = ManualClock::new(t);
        let driver = AnimationDriver::new(&clock);
        let mut scene = SceneBuilder::new(&SceneConfig::default()).build();

        assert_eq!(driver.tick(&mut scene), t);

        let earth = scene.bodies[2].body.transform.translation;
        assert!(earth.abs_diff_eq(vec3(-6.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn each_frame_requests_exactly_one_more() {
        let rig = Rig::new(RecordingRenderer::new(Surface(1)));
        let handle = rig.start();

        assert_eq!(rig.pending(), 1);
        assert_eq!(handle.frames_rendered(), 0);

        for expected in 1..=5 {
            rig.clock.advance(16.0);
            assert_eq!(rig.pump(), 1);
            assert_eq!(rig.pending(), 1);
            assert_eq!(handle.frames_rendered(), expected);
        }

        assert_eq!(rig.frame_loop.borrow().renderer().frames(), 5);
    }

    #[test]
    fn frames_see_the_latest_clock_value() {
        let rig = Rig::new(RecordingRenderer::new(Surface(1)));
        let _handle = rig.start();

        rig.clock.set(std::f64::consts::PI / 2.0 / 0.00030);
        rig.pump();

        let earth = rig.frame_loop.borrow().scene().bodies[2].body.transform.translation;
        assert!(earth.abs_diff_eq(vec3(0.0, 0.0, 6.0), 1e-4));
    }

    #[test]
    fn cancel_withdraws_the_pending_frame() {
        let rig = Rig::new(RecordingRenderer::new(Surface(1)));
        let handle = rig.start();
        rig.pump();

        handle.cancel(&mut *rig.scheduler.borrow_mut());

        assert!(!handle.is_alive());
        assert!(!handle.has_pending_frame());
        assert_eq!(rig.pending(), 0);
        assert_eq!(rig.pump(), 0);
        assert_eq!(handle.frames_rendered(), 1);
    }

    #[test]
    fn frame_already_in_flight_checks_liveness() {
        // A scheduler that ignores cancellation still cannot revive the loop
        #[derive(Default)]
        struct Stubborn(QueuedScheduler);

        impl FrameScheduler for Stubborn {
            fn request_frame(&mut self, callback: FrameCallback) -> FrameId {
                self.0.request_frame(callback)
            }

            fn cancel_frame(&mut self, _id: FrameId) {}
        }

        let scheduler = Rc::new(RefCell::new(Stubborn::default()));
        let scene = SceneBuilder::new(&SceneConfig::default()).build();
        let renderer = RecordingRenderer::new(Surface(1));
        let frame_loop = Rc::new(RefCell::new(FrameLoop::new(
            AnimationDriver::new(ManualClock::default()),
            scene,
            renderer,
        )));

        let handle = start_animation(&scheduler, Rc::clone(&frame_loop));
        handle.cancel(&mut *scheduler.borrow_mut());

        let batch = std::mem::take(&mut scheduler.borrow_mut().0.queue);
        assert_eq!(batch.len(), 1);
        for (_, callback) in batch {
            callback();
        }

        assert_eq!(frame_loop.borrow().renderer().frames(), 0);
        assert_eq!(scheduler.borrow().0.pending(), 0);
    }

    #[test]
    fn render_failure_stops_the_loop() {
        let rig = Rig::new(RecordingRenderer::failing_after(Surface(1), 2));
        let handle = rig.start();

        rig.pump();
        rig.pump();
        assert!(handle.is_alive());

        rig.pump();

        assert!(!handle.is_alive());
        assert_eq!(rig.pending(), 0);
        assert_eq!(handle.frames_rendered(), 2);
        assert_eq!(handle.take_error(), Some(RenderError::SurfaceLost));
        assert_eq!(handle.take_error(), None);
    }

    #[test]
    fn cancel_twice_is_harmless() {
        let rig = Rig::new(RecordingRenderer::new(Surface(1)));
        let handle = rig.start();

        handle.cancel(&mut *rig.scheduler.borrow_mut());
        handle.cancel(&mut *rig.scheduler.borrow_mut());

        assert_eq!(rig.pending(), 0);
    }
}
