/// Owed time within this much of a whole step counts as a whole step, so
/// that `n * dt` of elapsed time always yields exactly `n` steps.
const STEP_TOLERANCE: f64 = 1e-9;

/// Whether the accumulator currently owes any partial step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestepState {
    /// No time owed.
    Idle,
    /// A partial step is owed and will be paid by a later frame.
    Accumulating,
}

/// Fixed timestep accumulator.
/// Ensures simulation steps run at a consistent rate regardless of frame time.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per step (seconds).
    dt: f64,
    /// Time owed from variable frame deltas.
    accumulator: f64,
    /// Cap on steps per frame; excess owed time is dropped.
    max_steps: u32,
    /// Timestamp of the previous frame, once one has been seen.
    last_time: Option<f64>,
}

impl FixedTimestep {
    pub fn new(dt: f64, max_steps: u32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps,
            last_time: None,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f64) -> u32 {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return 0;
        }
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death
        let cap = self.dt * self.max_steps as f64;
        if self.accumulator > cap + STEP_TOLERANCE {
            log::warn!(
                "frame owed {:.3}s, dropping {:.3}s beyond {} steps",
                self.accumulator,
                self.accumulator - cap,
                self.max_steps
            );
            self.accumulator = cap;
        }
        let mut steps = 0;
        while self.accumulator + STEP_TOLERANCE >= self.dt {
            self.accumulator -= self.dt;
            steps += 1;
        }
        self.accumulator = self.accumulator.max(0.0);
        steps
    }

    /// Accumulate the time elapsed since the previous call's `now` (seconds).
    /// The first call only records the timestamp.
    pub fn advance_to(&mut self, now: f64) -> u32 {
        let elapsed = self.last_time.map_or(0.0, |last| now - last);
        self.last_time = Some(now);
        self.accumulate(elapsed)
    }

    /// Interpolation alpha for rendering between steps (0.0 to 1.0).
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.dt
    }

    pub fn state(&self) -> TimestepState {
        if self.accumulator > STEP_TOLERANCE {
            TimestepState::Accumulating
        } else {
            TimestepState::Idle
        }
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f64 {
        self.dt
    }
}
