//! Frame-index state machine with drag stepping and timed autoplay
//!
//! **Architecture**: ViewerState does NOT own the FrameSet. It only knows the
//! frame count; the renderer maps `current_index()` to `frames[index]`.
//! When a new FrameSet arrives the app calls `reset(len)`.
//!
//! # States
//!
//! - **Idle(auto_playing)**: timer advances the index while `auto_playing`
//! - **Dragging**: pointer movement steps the index, autoplay forced off
//!
//! Drag start always turns autoplay off and drag end never turns it back on.
//! Only `set_auto_playing()` / `toggle_auto_playing()` re-enable it.
//!
//! # Drag Model
//!
//! Each pointer move is compared against the anchor X. Once the distance
//! reaches `DRAG_THRESHOLD` the index moves one frame and the anchor jumps
//! to the pointer, so a long drag produces one step per threshold crossing.
//! Positive X (pointer moving right) goes to the NEXT frame.
//!
//! # Timing Model
//!
//! The autoplay timer is plain state owned by ViewerState. It is re-armed
//! whenever autoplay, interval or frame count changes, and switched off
//! when autoplay stops or the frame count drops to zero. `tick(now)` is
//! called from the UI loop; time is never read inside this module.
//! A late tick advances one frame per whole elapsed period.

use log::{debug, trace};
use std::time::{Duration, Instant};

/// Minimum horizontal pointer travel (logical points) for one frame step
pub const DRAG_THRESHOLD: f32 = 20.0;

/// Default autoplay period
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// Shortest accepted autoplay period
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Interaction phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dragging,
}

/// Autoplay timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    /// No timer
    Off,
    /// Armed, period starts at next tick
    Armed,
    /// Next advance due at this instant
    Due(Instant),
}

/// Viewer state: current frame, autoplay flag and drag tracking.
#[derive(Debug, Clone)]
pub struct ViewerState {
    frame_count: usize,
    current: usize,
    auto_playing: bool,
    interval: Duration,
    drag_active: bool,
    drag_anchor_x: f32,
    timer: Timer,
}

impl ViewerState {
    /// Create state for `frame_count` frames, starting at frame 0.
    pub fn new(frame_count: usize, auto_play: bool, interval: Duration) -> Self {
        let mut state = Self {
            frame_count,
            current: 0,
            auto_playing: auto_play,
            interval: interval.max(MIN_INTERVAL),
            drag_active: false,
            drag_anchor_x: 0.0,
            timer: Timer::Off,
        };
        state.rearm();
        debug!(
            "ViewerState created: {} frames, autoplay={}, interval={:?}",
            frame_count, auto_play, state.interval
        );
        state
    }

    // === Queries ===

    /// Number of frames in the current FrameSet
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Index to render, or None while there is nothing to show
    pub fn current_index(&self) -> Option<usize> {
        (self.frame_count > 0).then_some(self.current)
    }

    pub fn is_auto_playing(&self) -> bool {
        self.auto_playing
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_active
    }

    pub fn phase(&self) -> Phase {
        if self.drag_active {
            Phase::Dragging
        } else {
            Phase::Idle
        }
    }

    /// Autoplay period
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True iff autoplay is on and there is at least one frame
    pub fn timer_active(&self) -> bool {
        self.timer != Timer::Off
    }

    /// Instant of the next autoplay advance, if the period has started
    pub fn next_due(&self) -> Option<Instant> {
        match self.timer {
            Timer::Due(at) => Some(at),
            _ => None,
        }
    }

    // === FrameSet lifecycle ===

    /// New FrameSet identity: back to frame 0, drag dropped, timer re-armed.
    pub fn reset(&mut self, frame_count: usize) {
        self.frame_count = frame_count;
        self.current = 0;
        self.drag_active = false;
        self.rearm();
        debug!("ViewerState reset: {} frames", frame_count);
    }

    // === Drag ===

    /// Pointer pressed on the image. Suspends autoplay.
    pub fn drag_start(&mut self, pointer_x: f32) {
        if self.frame_count == 0 {
            return;
        }
        self.drag_active = true;
        self.drag_anchor_x = pointer_x;
        self.set_auto_playing(false);
        trace!("Drag start at x={}", pointer_x);
    }

    /// Pointer moved anywhere while dragging.
    /// Returns Some(new_index) if the move crossed the threshold.
    pub fn drag_move(&mut self, pointer_x: f32) -> Option<usize> {
        if !self.drag_active || self.frame_count == 0 {
            return None;
        }
        let delta = pointer_x - self.drag_anchor_x;
        if delta.abs() < DRAG_THRESHOLD {
            return None;
        }
        let dir = if delta > 0.0 { 1 } else { -1 };
        self.current = wrap_index(self.current, dir, self.frame_count);
        self.drag_anchor_x = pointer_x;
        trace!("Drag step {:+} -> frame {}", dir, self.current);
        Some(self.current)
    }

    /// Pointer released. Autoplay stays as it is.
    pub fn drag_end(&mut self) {
        if self.drag_active {
            trace!("Drag end at frame {}", self.current);
        }
        self.drag_active = false;
    }

    // === Stepping ===

    /// Step by `delta` frames (keyboard). Suspends autoplay.
    pub fn step(&mut self, delta: i32) -> Option<usize> {
        if self.frame_count == 0 || delta == 0 {
            return None;
        }
        self.set_auto_playing(false);
        self.current = wrap_index(self.current, delta as isize, self.frame_count);
        Some(self.current)
    }

    // === Autoplay ===

    pub fn set_auto_playing(&mut self, flag: bool) {
        // Nothing to play: the toggle is inert until frames arrive
        if self.frame_count == 0 || self.auto_playing == flag {
            return;
        }
        self.auto_playing = flag;
        self.rearm();
        debug!("Autoplay {}", if flag { "on" } else { "off" });
    }

    pub fn toggle_auto_playing(&mut self) {
        self.set_auto_playing(!self.auto_playing);
    }

    /// Change the autoplay period (re-arms the timer)
    pub fn set_interval(&mut self, interval: Duration) {
        let interval = interval.max(MIN_INTERVAL);
        if self.interval == interval {
            return;
        }
        self.interval = interval;
        self.rearm();
    }

    /// Advance the timer to `now`.
    /// Returns Some(new_index) if at least one period elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        match self.timer {
            Timer::Off => None,
            Timer::Armed => {
                self.timer = Timer::Due(now + self.interval);
                None
            }
            Timer::Due(due) => {
                if now < due {
                    return None;
                }
                let late = now.duration_since(due);
                let periods = 1 + (late.as_nanos() / self.interval.as_nanos()) as usize;
                let steps = periods % self.frame_count;
                self.current = wrap_index(self.current, steps as isize, self.frame_count);
                self.timer = Timer::Due(due + self.interval * periods as u32);
                trace!("Autoplay advanced {} period(s) -> frame {}", periods, self.current);
                Some(self.current)
            }
        }
    }

    fn rearm(&mut self) {
        self.timer = if self.auto_playing && self.frame_count > 0 {
            Timer::Armed
        } else {
            Timer::Off
        };
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(0, false, DEFAULT_INTERVAL)
    }
}

/// `(index + delta) mod len`, always in `[0, len)`. `len` must be non-zero.
fn wrap_index(index: usize, delta: isize, len: usize) -> usize {
    let len = len as isize;
    ((index as isize + delta % len).rem_euclid(len)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_initial_state() {
        let v = ViewerState::new(4, true, ms(300));
        assert_eq!(v.current_index(), Some(0));
        assert!(v.is_auto_playing());
        assert_eq!(v.phase(), Phase::Idle);
        assert!(v.timer_active());
    }

    #[test]
    fn test_empty_frame_set_is_inert() {
        let mut v = ViewerState::new(0, true, ms(100));
        assert_eq!(v.current_index(), None);
        assert!(!v.timer_active());

        v.drag_start(10.0);
        assert!(!v.is_dragging());
        assert_eq!(v.drag_move(100.0), None);
        assert_eq!(v.step(1), None);

        let t0 = Instant::now();
        assert_eq!(v.tick(t0), None);
        assert_eq!(v.tick(t0 + ms(1000)), None);
        assert_eq!(v.current_index(), None);
    }

    #[test]
    fn test_autoplay_toggle_ignored_without_frames() {
        let mut v = ViewerState::new(0, false, DEFAULT_INTERVAL);
        v.toggle_auto_playing();
        assert!(!v.is_auto_playing());
        v.set_auto_playing(true);
        assert!(!v.is_auto_playing());
        assert!(!v.timer_active());

        // Configured flag survives until frames arrive
        let mut v = ViewerState::new(0, true, DEFAULT_INTERVAL);
        v.toggle_auto_playing();
        assert!(v.is_auto_playing());
        v.reset(3);
        assert!(v.timer_active());
    }

    #[test]
    fn test_drag_scenario_four_frames() {
        let mut v = ViewerState::new(4, false, DEFAULT_INTERVAL);
        v.drag_start(100.0);
        assert_eq!(v.drag_move(125.0), Some(1));
        // Anchor moved to 125, so going back to 100 is delta -25
        assert_eq!(v.drag_move(100.0), Some(0));
        assert_eq!(v.current_index(), Some(0));
    }

    #[test]
    fn test_dead_zone() {
        let mut v = ViewerState::new(10, false, DEFAULT_INTERVAL);
        v.drag_start(50.0);
        for x in [51.0, 60.0, 69.9, 30.1, 50.0] {
            assert_eq!(v.drag_move(x), None);
        }
        assert_eq!(v.current_index(), Some(0));

        // Exactly on the threshold steps
        assert_eq!(v.drag_move(70.0), Some(1));
    }

    #[test]
    fn test_one_step_per_move_and_anchor_reset() {
        let mut v = ViewerState::new(10, false, DEFAULT_INTERVAL);
        v.drag_start(0.0);
        // A large jump is still a single step
        assert_eq!(v.drag_move(95.0), Some(1));
        // 95 -> 110 is below threshold from the new anchor
        assert_eq!(v.drag_move(110.0), None);
        assert_eq!(v.drag_move(115.0), Some(2));
    }

    #[test]
    fn test_wraparound_both_directions() {
        let mut v = ViewerState::new(3, false, DEFAULT_INTERVAL);
        v.drag_start(0.0);
        assert_eq!(v.drag_move(-20.0), Some(2));
        assert_eq!(v.drag_move(0.0), Some(0));
        assert_eq!(v.drag_move(20.0), Some(1));
        assert_eq!(v.drag_move(40.0), Some(2));
        assert_eq!(v.drag_move(60.0), Some(0));
    }

    #[test]
    fn test_index_stays_in_range_for_any_moves() {
        for n in 1..=7usize {
            let mut v = ViewerState::new(n, false, DEFAULT_INTERVAL);
            v.drag_start(0.0);
            let mut x = 0.0f32;
            // Deterministic zig-zag walk with mixed step sizes
            for i in 0..200u32 {
                let dx = ((i * 37 % 61) as f32 - 30.0) * 1.7;
                x += dx;
                v.drag_move(x);
                let idx = v.current_index().unwrap();
                assert!(idx < n, "index {} out of range for n={}", idx, n);
            }
        }
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut v = ViewerState::new(5, false, DEFAULT_INTERVAL);
        assert_eq!(v.drag_move(500.0), None);
        v.drag_start(0.0);
        v.drag_end();
        assert_eq!(v.drag_move(500.0), None);
        assert_eq!(v.current_index(), Some(0));
    }

    #[test]
    fn test_drag_start_stops_autoplay() {
        let mut v = ViewerState::new(5, true, ms(100));
        v.drag_start(0.0);
        assert!(!v.is_auto_playing());
        assert!(!v.timer_active());
        assert_eq!(v.phase(), Phase::Dragging);

        // Already off stays off
        v.drag_end();
        v.drag_start(0.0);
        assert!(!v.is_auto_playing());
    }

    #[test]
    fn test_drag_end_does_not_resume_autoplay() {
        let mut v = ViewerState::new(5, true, ms(100));
        v.drag_start(0.0);
        v.drag_end();
        assert_eq!(v.phase(), Phase::Idle);
        assert!(!v.is_auto_playing());
        assert!(!v.timer_active());
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        for initial in [false, true] {
            let mut v = ViewerState::new(3, initial, ms(100));
            v.toggle_auto_playing();
            assert_eq!(v.is_auto_playing(), !initial);
            assert_eq!(v.timer_active(), !initial);
            v.toggle_auto_playing();
            assert_eq!(v.is_auto_playing(), initial);
            assert_eq!(v.timer_active(), initial);
        }
    }

    #[test]
    fn test_timer_active_iff_playing_and_nonempty() {
        let mut v = ViewerState::new(0, true, ms(100));
        assert!(v.is_auto_playing());
        assert!(!v.timer_active());

        v.reset(2);
        assert!(v.timer_active());

        v.set_auto_playing(false);
        assert!(!v.timer_active());

        v.set_auto_playing(true);
        v.reset(0);
        assert!(!v.timer_active());
    }

    #[test]
    fn test_autoplay_sequence_three_frames() {
        let mut v = ViewerState::new(3, true, ms(300));
        let t0 = Instant::now();
        assert_eq!(v.tick(t0), None); // starts the period
        assert_eq!(v.tick(t0 + ms(299)), None);
        assert_eq!(v.tick(t0 + ms(300)), Some(1));
        assert_eq!(v.tick(t0 + ms(600)), Some(2));
        assert_eq!(v.tick(t0 + ms(900)), Some(0));
    }

    #[test]
    fn test_late_tick_catches_up_whole_periods() {
        let mut v = ViewerState::new(10, true, ms(100));
        let t0 = Instant::now();
        v.tick(t0);
        // 350ms late: 3 whole periods (100, 200, 300)
        assert_eq!(v.tick(t0 + ms(350)), Some(3));
        assert_eq!(v.next_due(), Some(t0 + ms(400)));
        assert_eq!(v.tick(t0 + ms(399)), None);
        assert_eq!(v.tick(t0 + ms(400)), Some(4));
    }

    #[test]
    fn test_stopping_autoplay_cancels_timer() {
        let mut v = ViewerState::new(4, true, ms(100));
        let t0 = Instant::now();
        v.tick(t0);
        v.set_auto_playing(false);
        assert_eq!(v.next_due(), None);
        assert_eq!(v.tick(t0 + ms(1000)), None);
        assert_eq!(v.current_index(), Some(0));
    }

    #[test]
    fn test_interval_change_rearms() {
        let mut v = ViewerState::new(4, true, ms(100));
        let t0 = Instant::now();
        v.tick(t0);
        assert_eq!(v.next_due(), Some(t0 + ms(100)));

        v.set_interval(ms(500));
        assert_eq!(v.next_due(), None);
        v.tick(t0 + ms(50));
        assert_eq!(v.next_due(), Some(t0 + ms(550)));
        assert_eq!(v.tick(t0 + ms(500)), None);
        assert_eq!(v.tick(t0 + ms(550)), Some(1));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let v = ViewerState::new(2, true, Duration::ZERO);
        assert_eq!(v.interval(), MIN_INTERVAL);
    }

    #[test]
    fn test_reset_returns_to_first_frame() {
        let mut v = ViewerState::new(5, false, DEFAULT_INTERVAL);
        v.step(3);
        v.drag_start(0.0);
        v.reset(8);
        assert_eq!(v.current_index(), Some(0));
        assert_eq!(v.frame_count(), 8);
        assert!(!v.is_dragging());
    }

    #[test]
    fn test_step_wraps_and_stops_autoplay() {
        let mut v = ViewerState::new(4, true, ms(100));
        assert_eq!(v.step(-1), Some(3));
        assert!(!v.is_auto_playing());
        assert_eq!(v.step(1), Some(0));
        assert_eq!(v.step(9), Some(1));
        assert_eq!(v.step(0), None);
    }

    #[test]
    fn test_wrap_index() {
        assert_eq!(wrap_index(0, -1, 5), 4);
        assert_eq!(wrap_index(4, 1, 5), 0);
        assert_eq!(wrap_index(2, -12, 5), 0);
        assert_eq!(wrap_index(0, 0, 1), 0);
        assert_eq!(wrap_index(0, -1, 1), 0);
    }
}
