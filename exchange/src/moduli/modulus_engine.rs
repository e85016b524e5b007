use crate::{DelayWindow, Step};

/// Lookup tables used to address delay ring buffers by time offset.
///
/// `moduli[d]` is `(T + d) mod W` and `slice_moduli[d]` is
/// `((T + d) / min_delay) mod nbuff`, where `T` is the step count at the
/// start of the current slice, `W = min_delay + max_delay` and
/// `nbuff = ceil(W / min_delay)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModulusEngine {
    window: DelayWindow,
    origin: Step,
    moduli: Vec<usize>,
    slice_moduli: Vec<usize>,
}

impl ModulusEngine {
    pub fn new(window: DelayWindow, steps: Step) -> Self {
        let mut engine = Self {
            window,
            origin: steps,
            moduli: Vec::new(),
            slice_moduli: Vec::new(),
        };
        engine.init(window, steps);
        engine
    }

    /// Computes both tables directly for a slice starting at `steps`
    pub fn init(&mut self, window: DelayWindow, steps: Step) {
        self.window = window;
        self.origin = steps;

        let len = window.len() as Step;
        self.moduli.clear();
        self.moduli
            .extend((0..len).map(|d| ((steps + d) % len) as usize));

        self.compute_slice_moduli();
    }

    /// Moves the tables forward by one slice (`min_delay` steps).
    ///
    /// Shifting the origin by `min_delay` turns `(T + d) mod W` into a left
    /// rotation of the same table, so the ring buffer moduli are rotated
    /// in place. The slice moduli are recomputed, because W need not be a
    /// multiple of min_delay.
    pub fn advance_slice(&mut self) {
        let min_delay = self.window.min_delay_steps();
        self.origin += Step::from(self.window.min_delay());
        let shift = min_delay % self.moduli.len();
        self.moduli.rotate_left(shift);
        self.compute_slice_moduli();
    }

    fn compute_slice_moduli(&mut self) {
        let len = self.window.len() as Step;
        let min_delay = Step::from(self.window.min_delay());
        let nbuff = self.window.slice_buffer_count() as Step;
        let origin = self.origin;

        self.slice_moduli.clear();
        self.slice_moduli
            .extend((0..len).map(|d| (((origin + d) / min_delay) % nbuff) as usize));
    }

    pub fn window(&self) -> &DelayWindow {
        &self.window
    }

    /// Step count at the start of the slice the tables refer to
    pub fn origin(&self) -> Step {
        self.origin
    }

    pub fn modulo(&self, offset: usize) -> usize {
        self.moduli[offset]
    }

    pub fn slice_modulo(&self, offset: usize) -> usize {
        self.slice_moduli[offset]
    }

    pub fn moduli(&self) -> &[usize] {
        &self.moduli
    }

    pub fn slice_moduli(&self) -> &[usize] {
        &self.slice_moduli
    }
}
