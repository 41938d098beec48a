/// Fixed timestep accumulator: the tick source for sprite updates.
///
/// Converts variable frame deltas into whole logical ticks and exposes the
/// tick rate that animation speeds are measured against.
pub struct FixedTimestep {
    ticks_per_second: f32,
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    max_ticks: u32,
}

impl FixedTimestep {
    /// A timestep running at `ticks_per_second`, capped at 10 ticks per frame.
    pub fn from_rate(ticks_per_second: f32) -> Self {
        Self::with_cap(ticks_per_second, 10)
    }

    pub fn with_cap(ticks_per_second: f32, max_ticks: u32) -> Self {
        let ticks_per_second = if ticks_per_second > 0.0 { ticks_per_second } else { 60.0 };
        Self {
            ticks_per_second,
            dt: 1.0 / ticks_per_second,
            accumulator: 0.0,
            max_ticks: max_ticks.max(1),
        }
    }

    /// Add frame time to the accumulator. Returns the number of ticks to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Drop backlog beyond the cap instead of spiralling.
        self.accumulator = self.accumulator.min(self.dt * self.max_ticks as f32);
        let ticks = (self.accumulator / self.dt) as u32;
        self.accumulator -= ticks as f32 * self.dt;
        ticks
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn ticks_per_second(&self) -> f32 {
        self.ticks_per_second
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::from_rate(60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_tick_exact() {
        let mut ts = FixedTimestep::from_rate(60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::from_rate(60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn caps_backlog() {
        let mut ts = FixedTimestep::with_cap(60.0, 4);
        assert_eq!(ts.accumulate(1.0), 4);
    }

    #[test]
    fn invalid_rate_falls_back() {
        let ts = FixedTimestep::from_rate(0.0);
        assert_eq!(ts.ticks_per_second(), 60.0);
    }

    #[test]
    fn alpha_is_between_zero_and_one() {
        let mut ts = FixedTimestep::from_rate(60.0);
        ts.accumulate(0.008);
        let a = ts.alpha();
        assert!((0.0..=1.0).contains(&a), "alpha was {}", a);
    }
}
