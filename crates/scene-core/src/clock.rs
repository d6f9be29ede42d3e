use instant::Instant;

/// Per-frame timing snapshot.
#[derive(Clone, Copy, Debug)]
pub struct FrameTiming {
    /// Seconds since the clock was created.
    pub elapsed: f32,
    /// Seconds since the previous tick.
    pub dt: f32,
}

/// Owns the start/last instants the frame loop needs.
pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self { start: now, last: now }
    }

    pub fn tick(&mut self) -> FrameTiming {
        let now = Instant::now();
        let timing = FrameTiming {
            elapsed: (now - self.start).as_secs_f32(),
            dt: (now - self.last).as_secs_f32(),
        };
        self.last = now;
        timing
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
