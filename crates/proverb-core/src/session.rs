use glam::Vec2;

use crate::reveal::Teardown;

/// Progress gained per accepted erase event, in percent.
pub const ERASE_STEP: f32 = 0.8;
/// Progress value at which the card counts as fully scratched.
pub const FULL_PROGRESS: f32 = 100.0;
/// Erase events needed to reach full progress (125 × 0.8 = 100).
pub const FULL_ERASE_COUNT: u32 = (FULL_PROGRESS / ERASE_STEP) as u32;
/// Seconds a decorative stroke mark stays alive.
pub const MARK_TTL: f32 = 1.0;
/// Pause between the final stroke and the start of the teardown, so the
/// user perceives the stroke that finished the card.
pub const REVEAL_DELAY: f32 = 0.3;

/// Lifecycle phase of one quote display cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Phase {
    /// Nothing fetched yet.
    Idle = 0,
    /// A quote request is in flight.
    Loading = 1,
    /// A quote arrived; the opaque overlay waits for the first stroke.
    Armed = 2,
    /// The user is (or was) scratching; progress accumulates.
    Scratching = 3,
    /// The timed teardown animation is running.
    Revealing = 4,
    /// The quote is fully visible.
    Revealed = 5,
    /// The quote request failed; user may retry.
    Error = 6,
}

/// A transient erase mark, kept only for decorative stroke feedback.
#[derive(Debug, Clone, Copy)]
pub struct StrokeMark {
    pub pos: Vec2,
    /// Seconds since the mark was created.
    pub age: f32,
}

/// Notable transition produced by a session tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    None,
    /// Full progress was reached 300 ms ago; the teardown just started.
    TeardownStarted,
    /// The teardown finished; the quote is now fully visible.
    Revealed,
}

/// Mutable interaction state attached to one displayed quote.
///
/// Progress is derived from a counter of accepted erase events, so
/// `progress() == min(100, n × 0.8)` holds exactly for every n. All timers
/// are dt countdowns advanced by [`ScratchSession::tick`]; re-arming clears
/// marks and timers wholesale, so an expiry from a previous session can
/// never touch a newer one.
#[derive(Debug, Clone)]
pub struct ScratchSession {
    phase: Phase,
    erase_count: u32,
    active_pointer: bool,
    marks: Vec<StrokeMark>,
    /// Countdown to the teardown once full progress is reached. Set once.
    reveal_delay: Option<f32>,
    teardown: Option<Teardown>,
}

impl ScratchSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            erase_count: 0,
            active_pointer: false,
            marks: Vec::with_capacity(64),
            reveal_delay: None,
            teardown: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Cumulative erased progress in [0, 100].
    pub fn progress(&self) -> f32 {
        (self.erase_count as f32 * ERASE_STEP).min(FULL_PROGRESS)
    }

    pub fn active_pointer(&self) -> bool {
        self.active_pointer
    }

    pub fn marks(&self) -> &[StrokeMark] {
        &self.marks
    }

    pub fn teardown(&self) -> Option<&Teardown> {
        self.teardown.as_ref()
    }

    /// Enter `Loading` for a new request, dropping any leftover overlay state.
    pub fn set_loading(&mut self) {
        self.phase = Phase::Loading;
        self.active_pointer = false;
        self.marks.clear();
        self.reveal_delay = None;
        self.teardown = None;
    }

    /// Arm the scratch overlay for a freshly received quote.
    pub fn arm(&mut self) {
        self.phase = Phase::Armed;
        self.erase_count = 0;
        self.active_pointer = false;
        self.marks.clear();
        self.reveal_delay = None;
        self.teardown = None;
    }

    /// Jump straight to `Revealed` (shared links and direct-reveal mode).
    pub fn set_revealed(&mut self) {
        self.phase = Phase::Revealed;
        self.erase_count = FULL_ERASE_COUNT;
        self.active_pointer = false;
        self.marks.clear();
        self.reveal_delay = None;
        self.teardown = None;
    }

    pub fn set_error(&mut self) {
        self.phase = Phase::Error;
        self.active_pointer = false;
    }

    /// An erasing gesture began. Valid from `Armed` or `Scratching`; applies
    /// one increment immediately so a single tap gives visible feedback.
    pub fn begin_erase(&mut self, point: Vec2) {
        if self.phase != Phase::Armed && self.phase != Phase::Scratching {
            return;
        }
        self.active_pointer = true;
        self.phase = Phase::Scratching;
        self.apply_erase(point);
    }

    /// A held gesture moved. Ignored without a preceding [`begin_erase`] and
    /// once the teardown has started, so progress can never change during
    /// or after the reveal.
    ///
    /// [`begin_erase`]: ScratchSession::begin_erase
    pub fn continue_erase(&mut self, point: Vec2) {
        if !self.active_pointer || self.phase != Phase::Scratching {
            return;
        }
        self.apply_erase(point);
    }

    /// The gesture ended. Phase is kept so a partly scratched card can be
    /// resumed later. No-op when no gesture is active.
    pub fn end_erase(&mut self) {
        self.active_pointer = false;
    }

    fn apply_erase(&mut self, point: Vec2) {
        self.marks.push(StrokeMark { pos: point, age: 0.0 });
        if self.progress() < FULL_PROGRESS {
            self.erase_count += 1;
            if self.progress() >= FULL_PROGRESS && self.reveal_delay.is_none() {
                // Completion fires exactly once.
                self.reveal_delay = Some(REVEAL_DELAY);
            }
        }
    }

    /// Advance timers: mark expiry (oldest first), the 300 ms pre-teardown
    /// delay, and the teardown itself.
    pub fn tick(&mut self, dt: f32) -> SessionEvent {
        for mark in &mut self.marks {
            mark.age += dt;
        }
        while self.marks.first().is_some_and(|m| m.age >= MARK_TTL) {
            self.marks.remove(0);
        }

        if let Some(left) = self.reveal_delay {
            let left = left - dt;
            if left <= 0.0 {
                self.reveal_delay = None;
                self.phase = Phase::Revealing;
                self.active_pointer = false;
                self.marks.clear();
                self.teardown = Some(Teardown::new());
                return SessionEvent::TeardownStarted;
            }
            self.reveal_delay = Some(left);
            return SessionEvent::None;
        }

        if self.phase == Phase::Revealing {
            if let Some(td) = &mut self.teardown {
                if !td.tick(dt) {
                    self.teardown = None;
                    self.phase = Phase::Revealed;
                    return SessionEvent::Revealed;
                }
            }
        }

        SessionEvent::None
    }
}

impl Default for ScratchSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed() -> ScratchSession {
        let mut s = ScratchSession::new();
        s.arm();
        s
    }

    fn scratch_to_full(s: &mut ScratchSession) {
        s.begin_erase(Vec2::ZERO);
        for _ in 1..FULL_ERASE_COUNT {
            s.continue_erase(Vec2::new(5.0, 5.0));
        }
    }

    #[test]
    fn progress_matches_event_count() {
        let mut s = armed();
        s.begin_erase(Vec2::ZERO);
        for n in 1..=130u32 {
            if n > 1 {
                s.continue_erase(Vec2::new(n as f32, 0.0));
            }
            let expected = (n as f32 * ERASE_STEP).min(FULL_PROGRESS);
            assert_eq!(s.progress(), expected, "after {n} events");
        }
        assert_eq!(s.progress(), 100.0);
    }

    #[test]
    fn single_tap_gives_feedback() {
        let mut s = armed();
        s.begin_erase(Vec2::new(40.0, 60.0));
        assert_eq!(s.phase(), Phase::Scratching);
        assert_eq!(s.marks().len(), 1);
        assert_eq!(s.progress(), ERASE_STEP);
    }

    #[test]
    fn move_without_down_is_ignored() {
        let mut s = armed();
        s.continue_erase(Vec2::ZERO);
        assert_eq!(s.phase(), Phase::Armed);
        assert_eq!(s.progress(), 0.0);
        assert!(s.marks().is_empty());
    }

    #[test]
    fn end_erase_is_idempotent() {
        let mut s = armed();
        s.begin_erase(Vec2::ZERO);
        s.end_erase();
        assert!(!s.active_pointer());
        s.end_erase();
        assert!(!s.active_pointer());
        // Card stays Scratching so the user can resume.
        assert_eq!(s.phase(), Phase::Scratching);
    }

    #[test]
    fn resume_after_lift() {
        let mut s = armed();
        s.begin_erase(Vec2::ZERO);
        s.end_erase();
        s.continue_erase(Vec2::ZERO); // dead without a new down
        assert_eq!(s.progress(), ERASE_STEP);
        s.begin_erase(Vec2::ZERO);
        assert_eq!(s.progress(), ERASE_STEP * 2.0);
    }

    #[test]
    fn full_scratch_runs_delay_then_teardown() {
        let mut s = armed();
        scratch_to_full(&mut s);
        assert_eq!(s.progress(), 100.0);
        assert_eq!(s.phase(), Phase::Scratching);

        assert_eq!(s.tick(0.2), SessionEvent::None);
        assert_eq!(s.tick(0.2), SessionEvent::TeardownStarted);
        assert_eq!(s.phase(), Phase::Revealing);
        assert!(!s.active_pointer());
        assert!(s.marks().is_empty());

        assert_eq!(s.tick(1.0), SessionEvent::None);
        assert_eq!(s.tick(0.3), SessionEvent::Revealed);
        assert_eq!(s.phase(), Phase::Revealed);
    }

    #[test]
    fn completion_fires_once_despite_extra_strokes() {
        let mut s = armed();
        scratch_to_full(&mut s);
        // Extra strokes delivered before the 300 ms delay elapses.
        for _ in 0..10 {
            s.continue_erase(Vec2::ZERO);
        }
        assert_eq!(s.progress(), 100.0);

        let mut teardown_starts = 0;
        for _ in 0..40 {
            if s.tick(0.1) == SessionEvent::TeardownStarted {
                teardown_starts += 1;
            }
        }
        assert_eq!(teardown_starts, 1);
        assert_eq!(s.phase(), Phase::Revealed);
    }

    #[test]
    fn erase_ignored_once_revealing() {
        let mut s = armed();
        scratch_to_full(&mut s);
        s.tick(0.3);
        assert_eq!(s.phase(), Phase::Revealing);

        s.begin_erase(Vec2::ZERO);
        s.continue_erase(Vec2::ZERO);
        assert_eq!(s.phase(), Phase::Revealing);
        assert_eq!(s.progress(), 100.0);
        assert!(s.marks().is_empty());
    }

    #[test]
    fn continue_after_revealed_never_changes_progress() {
        let mut s = armed();
        scratch_to_full(&mut s);
        s.tick(0.3);
        s.tick(1.2);
        assert_eq!(s.phase(), Phase::Revealed);
        s.continue_erase(Vec2::ZERO);
        assert_eq!(s.progress(), 100.0);
    }

    #[test]
    fn marks_expire_oldest_first() {
        let mut s = armed();
        s.begin_erase(Vec2::new(1.0, 0.0));
        s.continue_erase(Vec2::new(2.0, 0.0));
        s.tick(0.5);
        s.continue_erase(Vec2::new(3.0, 0.0));
        assert_eq!(s.marks().len(), 3);

        s.tick(0.6); // first two cross the 1 s TTL
        assert_eq!(s.marks().len(), 1);
        assert_eq!(s.marks()[0].pos.x, 3.0);
    }

    #[test]
    fn arming_resets_everything() {
        let mut s = armed();
        scratch_to_full(&mut s);
        s.arm();
        assert_eq!(s.phase(), Phase::Armed);
        assert_eq!(s.progress(), 0.0);
        assert!(s.marks().is_empty());
        assert!(!s.active_pointer());
        // The old completion delay must be gone.
        assert_eq!(s.tick(0.5), SessionEvent::None);
        assert_eq!(s.phase(), Phase::Armed);
    }

    #[test]
    fn set_revealed_satisfies_progress_invariant() {
        let mut s = ScratchSession::new();
        s.set_revealed();
        assert_eq!(s.phase(), Phase::Revealed);
        assert_eq!(s.progress(), 100.0);
    }

    #[test]
    fn loading_clears_overlay_state() {
        let mut s = armed();
        s.begin_erase(Vec2::ZERO);
        s.set_loading();
        assert_eq!(s.phase(), Phase::Loading);
        assert!(s.marks().is_empty());
        assert!(!s.active_pointer());
        // Erase input means nothing while loading.
        s.begin_erase(Vec2::ZERO);
        assert_eq!(s.phase(), Phase::Loading);
    }
}
