use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the monotonically increasing time the animation is driven by.
pub trait SimulationClock {
    /// Milliseconds since an arbitrary but fixed origin.
    fn now_millis(&self) -> f64;
}

/// Wall-clock time in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SimulationClock for SystemClock {
    fn now_millis(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: Cell<f64>,
}

impl ManualClock {
    pub fn new(millis: f64) -> Self {
        Self {
            millis: Cell::new(millis),
        }
    }

    pub fn set(&self, millis: f64) {
        self.millis.set(millis);
    }

    pub fn advance(&self, millis: f64) {
        self.millis.set(self.millis.get() + millis);
    }
}

impl SimulationClock for ManualClock {
    fn now_millis(&self) -> f64 {
        self.millis.get()
    }
}

impl<C: SimulationClock + ?Sized> SimulationClock for Rc<C> {
    fn now_millis(&self) -> f64 {
        (**self).now_millis()
    }
}

impl<C: SimulationClock + ?Sized> SimulationClock for &C {
    fn now_millis(&self) -> f64 {
        (**self).now_millis()
    }
}
