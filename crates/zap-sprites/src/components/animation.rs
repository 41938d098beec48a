//! Per-sprite animation clock.
//!
//! The clock advances in whole logical ticks. A sequence playing at
//! `frame_speed` frames per second on a `ticks_per_second` clock advances one
//! frame every `ticks_per_second / frame_speed` ticks; the fractional
//! remainder carries over so playback does not drift.

use serde::{Deserialize, Serialize};

/// Frame speed given to a clock before any sequence is played.
pub const DEFAULT_FRAME_SPEED: f32 = 10.0;
/// Tick rate assumed until a clock is bound to a context.
pub const DEFAULT_TICKS_PER_SECOND: f32 = 60.0;

/// How a sequence behaves at its ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    /// Play forward once and hold the last frame.
    Once,
    /// Wrap back to the first frame.
    #[default]
    Loop,
    /// Bounce between the ends.
    PingPong,
    /// Play backward, wrapping to the last frame.
    Reverse,
}

/// A named, reusable frame range played by sprites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSequence {
    pub name: String,
    /// First frame index into the sprite's group.
    pub start_frame: usize,
    /// Last frame index, inclusive.
    pub end_frame: usize,
    /// Frames per second, > 0.
    pub frame_speed: f32,
    pub mode: PlayMode,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickEvents {
    /// At least one frame advance happened.
    pub frame_changed: bool,
    /// A Once sequence reached its end, or a PingPong cycle returned to its start.
    pub completed: bool,
}

impl TickEvents {
    pub fn any(&self) -> bool {
        self.frame_changed || self.completed
    }
}

/// Frame-advance state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClock {
    current_frame: usize,
    first_frame: usize,
    last_frame: usize,
    /// +1 or -1.
    direction: i32,
    mode: PlayMode,
    frame_speed: f32,
    frames_per_tick: f32,
    /// Ticks accumulated toward the next advance.
    frame_timer: f32,
    finished: bool,
    playing: bool,
    sequence: Option<String>,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self {
            current_frame: 0,
            first_frame: 0,
            last_frame: 0,
            direction: 1,
            mode: PlayMode::Loop,
            frame_speed: DEFAULT_FRAME_SPEED,
            frames_per_tick: DEFAULT_TICKS_PER_SECOND / DEFAULT_FRAME_SPEED,
            frame_timer: 0.0,
            finished: false,
            playing: true,
            sequence: None,
        }
    }
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock over `first..=last`, already running.
    pub fn with_range(first: usize, last: usize, frame_speed: f32, mode: PlayMode, ticks_per_second: f32) -> Self {
        let mut clock = Self::default();
        clock.set_frame_range(first, last);
        clock.set_frame_speed(frame_speed, ticks_per_second);
        clock.mode = mode;
        clock
    }

    // -- Accessors --

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn first_frame(&self) -> usize {
        self.first_frame
    }

    pub fn last_frame(&self) -> usize {
        self.last_frame
    }

    pub fn direction(&self) -> i32 {
        self.direction
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    pub fn frame_speed(&self) -> f32 {
        self.frame_speed
    }

    pub fn frames_per_tick(&self) -> f32 {
        self.frames_per_tick
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Name of the sequence last started with [`play`](Self::play).
    pub fn sequence(&self) -> Option<&str> {
        self.sequence.as_deref()
    }

    // -- Control --

    /// Back to the first frame, moving forward, with the timer cleared.
    pub fn reset(&mut self) {
        self.current_frame = self.first_frame;
        self.direction = 1;
        self.finished = false;
        self.frame_timer = 0.0;
    }

    /// Start `sequence` over a group holding `frame_count` frames.
    /// Returns false and leaves the clock untouched if it does not fit.
    pub fn play(&mut self, sequence: &AnimationSequence, ticks_per_second: f32, frame_count: usize) -> bool {
        if sequence.start_frame > sequence.end_frame || sequence.end_frame >= frame_count {
            return false;
        }
        let Some(frames_per_tick) = ticks_per_frame(sequence.frame_speed, ticks_per_second) else {
            return false;
        };
        self.first_frame = sequence.start_frame;
        self.last_frame = sequence.end_frame;
        self.frame_speed = sequence.frame_speed;
        self.frames_per_tick = frames_per_tick;
        self.mode = sequence.mode;
        self.sequence = Some(sequence.name.clone());
        self.playing = true;
        self.reset();
        true
    }

    /// Change playback speed. Non-positive or non-finite speeds and rates are rejected.
    pub fn set_frame_speed(&mut self, frame_speed: f32, ticks_per_second: f32) -> bool {
        let Some(frames_per_tick) = ticks_per_frame(frame_speed, ticks_per_second) else {
            return false;
        };
        self.frame_speed = frame_speed;
        self.frames_per_tick = frames_per_tick;
        true
    }

    /// Restrict playback to `first..=last`, pulling the current frame inside.
    pub fn set_frame_range(&mut self, first: usize, last: usize) -> bool {
        if first > last {
            return false;
        }
        self.first_frame = first;
        self.last_frame = last;
        self.current_frame = self.current_frame.clamp(first, last);
        true
    }

    /// Jump to `frame` inside the current range.
    pub fn set_frame(&mut self, frame: usize) -> bool {
        if frame < self.first_frame || frame > self.last_frame {
            return false;
        }
        self.current_frame = frame;
        self.frame_timer = 0.0;
        true
    }

    pub fn set_mode(&mut self, mode: PlayMode) {
        self.mode = mode;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn resume(&mut self) {
        self.playing = true;
    }

    // -- Tick --

    /// Advance by one logical tick.
    ///
    /// A fast sequence may owe many frames in one tick. Only the steps that
    /// change the outcome are run: at most one full cycle plus the leftover.
    pub fn tick(&mut self) -> TickEvents {
        let mut events = TickEvents::default();
        if !self.playing || self.finished {
            return events;
        }

        self.frame_timer += 1.0;
        if self.frame_timer < self.frames_per_tick {
            return events;
        }
        let due = (self.frame_timer / self.frames_per_tick).floor() as u64;
        self.frame_timer = self.frame_timer.rem_euclid(self.frames_per_tick);

        let cycle = self.cycle_len();
        let steps = if due > cycle { cycle + due % cycle } else { due };
        for _ in 0..steps {
            self.advance(&mut events);
            if self.finished {
                self.frame_timer = 0.0;
                break;
            }
        }
        events
    }

    /// Advances after which position and direction repeat.
    fn cycle_len(&self) -> u64 {
        let frames = (self.last_frame - self.first_frame) as u64 + 1;
        match self.mode {
            PlayMode::PingPong => (2 * (frames - 1)).max(2),
            PlayMode::Once | PlayMode::Loop | PlayMode::Reverse => frames,
        }
    }

    fn advance(&mut self, events: &mut TickEvents) {
        let first = self.first_frame as isize;
        let last = self.last_frame as isize;
        let current = self.current_frame as isize;

        let next = match self.mode {
            PlayMode::Once => {
                let next = current + self.direction as isize;
                if next >= last || next <= first {
                    self.finished = true;
                    events.completed = true;
                }
                next
            }
            PlayMode::Loop => {
                let next = current + self.direction as isize;
                if next > last {
                    first
                } else if next < first {
                    last
                } else {
                    next
                }
            }
            PlayMode::PingPong => {
                let next = current + self.direction as isize;
                if self.direction > 0 && next >= last {
                    self.direction = -1;
                    last
                } else if self.direction < 0 && next <= first {
                    self.direction = 1;
                    events.completed = true;
                    first
                } else {
                    next
                }
            }
            PlayMode::Reverse => {
                let next = current - 1;
                if next < first {
                    last
                } else {
                    next
                }
            }
        };

        self.current_frame = next.clamp(first, last) as usize;
        events.frame_changed = true;
    }
}

/// Ticks between frame advances, if both rates are usable.
fn ticks_per_frame(frame_speed: f32, ticks_per_second: f32) -> Option<f32> {
    if !(frame_speed > 0.0 && frame_speed.is_finite() && ticks_per_second > 0.0 && ticks_per_second.is_finite()) {
        return None;
    }
    let ticks = ticks_per_second / frame_speed;
    (ticks > 0.0).then_some(ticks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(mode: PlayMode, start: usize, end: usize, speed: f32) -> AnimationSequence {
        AnimationSequence {
            name: format!("{mode:?}"),
            start_frame: start,
            end_frame: end,
            frame_speed: speed,
            mode,
        }
    }

    fn playing(mode: PlayMode) -> AnimationClock {
        let mut clock = AnimationClock::new();
        assert!(clock.play(&sequence(mode, 0, 3, 4.0), 60.0, 4));
        clock
    }

    /// Tick `n` times, collecting the frame after each tick and whether anything completed.
    fn run(clock: &mut AnimationClock, n: usize) -> (Vec<usize>, usize) {
        let mut frames = Vec::with_capacity(n);
        let mut completions = 0;
        for _ in 0..n {
            if clock.tick().completed {
                completions += 1;
            }
            frames.push(clock.current_frame());
        }
        (frames, completions)
    }

    #[test]
    fn loop_advances_every_fifteen_ticks() {
        let mut clock = playing(PlayMode::Loop);
        assert_eq!(clock.frames_per_tick(), 15.0);

        let (frames, completions) = run(&mut clock, 200);
        assert_eq!(completions, 0);
        for (i, frame) in frames.iter().enumerate() {
            let tick = i + 1;
            assert_eq!(*frame, (tick / 15) % 4, "tick {tick}");
        }
        assert!(!clock.is_finished());
    }

    #[test]
    fn once_finishes_on_last_frame() {
        let mut clock = playing(PlayMode::Once);

        let (frames, completions) = run(&mut clock, 45);
        assert_eq!(frames[44], 3);
        assert_eq!(frames[43], 2);
        assert_eq!(completions, 1);
        assert!(clock.is_finished());

        let (frames, completions) = run(&mut clock, 15);
        assert!(frames.iter().all(|&f| f == 3));
        assert_eq!(completions, 0);
    }

    #[test]
    fn single_frame_once_completes_on_first_advance() {
        let mut clock = AnimationClock::new();
        assert!(clock.play(&sequence(PlayMode::Once, 2, 2, 60.0), 60.0, 4));
        let events = clock.tick();
        assert!(events.completed);
        assert_eq!(clock.current_frame(), 2);
    }

    #[test]
    fn ping_pong_bounces_and_completes_on_return() {
        let mut clock = AnimationClock::new();
        // One advance per tick.
        assert!(clock.play(&sequence(PlayMode::PingPong, 0, 3, 60.0), 60.0, 4));

        let (frames, completions) = run(&mut clock, 6);
        assert_eq!(frames, vec![1, 2, 3, 2, 1, 0]);
        assert_eq!(completions, 1);
        assert_eq!(clock.direction(), 1);

        // Playback continues after the cycle.
        let (frames, _) = run(&mut clock, 2);
        assert_eq!(frames, vec![1, 2]);
        assert!(!clock.is_finished());
    }

    #[test]
    fn ping_pong_does_not_complete_at_far_end() {
        let mut clock = AnimationClock::new();
        clock.play(&sequence(PlayMode::PingPong, 0, 3, 60.0), 60.0, 4);
        for _ in 0..3 {
            assert!(!clock.tick().completed);
        }
        assert_eq!(clock.current_frame(), 3);
        assert_eq!(clock.direction(), -1);
    }

    #[test]
    fn reverse_wraps_to_last() {
        let mut clock = AnimationClock::new();
        clock.play(&sequence(PlayMode::Reverse, 1, 3, 60.0), 60.0, 4);
        let (frames, completions) = run(&mut clock, 5);
        assert_eq!(frames, vec![3, 2, 1, 3, 2]);
        assert_eq!(completions, 0);
    }

    #[test]
    fn fractional_rate_carries_remainder() {
        let mut clock = AnimationClock::new();
        // 60 / 24 = 2.5 ticks per frame: advances land on ticks 3, 5, 8, 10.
        clock.play(&sequence(PlayMode::Loop, 0, 9, 24.0), 60.0, 10);
        let (frames, _) = run(&mut clock, 10);
        assert_eq!(frames, vec![0, 0, 1, 1, 2, 2, 2, 3, 3, 4]);
    }

    #[test]
    fn fast_sequence_advances_several_frames_per_tick() {
        let mut clock = AnimationClock::new();
        clock.play(&sequence(PlayMode::Loop, 0, 9, 120.0), 60.0, 10);
        clock.tick();
        assert_eq!(clock.current_frame(), 2);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut clock = playing(PlayMode::PingPong);
        run(&mut clock, 70);

        clock.reset();
        let once = clock.clone();
        clock.reset();
        assert_eq!(clock, once);
        assert_eq!(clock.current_frame(), 0);
        assert_eq!(clock.direction(), 1);
    }

    #[test]
    fn play_rejects_out_of_range_sequence() {
        let mut clock = playing(PlayMode::Loop);
        run(&mut clock, 20);
        let before = clock.clone();

        assert!(!clock.play(&sequence(PlayMode::Once, 2, 6, 4.0), 60.0, 4));
        assert!(!clock.play(&sequence(PlayMode::Once, 3, 1, 4.0), 60.0, 4));
        assert_eq!(clock, before);
    }

    #[test]
    fn play_restarts_finished_sequence() {
        let mut clock = playing(PlayMode::Once);
        run(&mut clock, 60);
        assert!(clock.is_finished());

        assert!(clock.play(&sequence(PlayMode::Once, 0, 3, 4.0), 60.0, 4));
        assert!(!clock.is_finished());
        assert_eq!(clock.current_frame(), 0);
    }

    #[test]
    fn paused_clock_holds_frame() {
        let mut clock = playing(PlayMode::Loop);
        clock.pause();
        run(&mut clock, 30);
        assert_eq!(clock.current_frame(), 0);
        clock.resume();
        run(&mut clock, 15);
        assert_eq!(clock.current_frame(), 1);
    }

    #[test]
    fn set_frame_speed_rejects_non_positive() {
        let mut clock = AnimationClock::new();
        assert!(!clock.set_frame_speed(0.0, 60.0));
        assert!(!clock.set_frame_speed(-2.0, 60.0));
        assert_eq!(clock.frame_speed(), DEFAULT_FRAME_SPEED);
        assert!(clock.set_frame_speed(30.0, 60.0));
        assert_eq!(clock.frames_per_tick(), 2.0);
    }

    #[test]
    fn huge_frame_speed_ticks_in_bounded_steps() {
        let mut clock = AnimationClock::new();
        assert!(clock.play(&sequence(PlayMode::Loop, 0, 3, 1e10), 60.0, 4));
        let events = clock.tick();
        assert!(events.frame_changed);
        assert!(!events.completed);
        assert!(clock.current_frame() <= 3);
        assert!(clock.frame_timer < clock.frames_per_tick());

        let mut once = AnimationClock::new();
        assert!(once.play(&sequence(PlayMode::Once, 0, 3, f32::MAX), 60.0, 4));
        assert!(once.tick().completed);
        assert_eq!(once.current_frame(), 3);
    }

    #[test]
    fn many_owed_frames_land_where_single_steps_would() {
        // 8 advances per tick over 4 frames.
        let mut fast = AnimationClock::new();
        assert!(fast.play(&sequence(PlayMode::PingPong, 0, 3, 480.0), 60.0, 4));
        let mut slow = AnimationClock::new();
        assert!(slow.play(&sequence(PlayMode::PingPong, 0, 3, 60.0), 60.0, 4));

        let events = fast.tick();
        let (_, completions) = run(&mut slow, 8);
        assert_eq!(fast.current_frame(), slow.current_frame());
        assert_eq!(fast.direction(), slow.direction());
        assert!(events.completed);
        assert_eq!(completions, 1);
    }

    #[test]
    fn non_finite_speed_is_rejected() {
        let mut clock = AnimationClock::new();
        assert!(!clock.set_frame_speed(f32::INFINITY, 60.0));
        assert!(!clock.set_frame_speed(f32::NAN, 60.0));
        assert!(!clock.play(&sequence(PlayMode::Loop, 0, 3, f32::INFINITY), 60.0, 4));
        assert_eq!(clock.frame_speed(), DEFAULT_FRAME_SPEED);
    }
}
