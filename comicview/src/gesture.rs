//! Gesture classification for the reader
//!
//! Touch-style input is normalized into release events: every click-up,
//! drag-end and wheel tick goes through one classifier, so exactly one
//! gesture can come out of one physical event. The classifier owns the
//! manual double-tap timer; nothing else inspects timing.

/// Horizontal displacement, in points, beyond which a drag release
/// counts as a swipe instead of a tap.
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Longest gap, in seconds, between two releases that still counts as a
/// double tap.
pub const DOUBLE_TAP_WINDOW: f64 = 0.3;

/// Wheel direction for release events synthesized from scroll input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// A click-up, drag-end or wheel tick, normalized for classification.
#[derive(Clone, Copy, Debug)]
pub struct ReleaseEvent {
    /// Horizontal displacement since the press, right-positive.
    pub dx: f32,
    /// Double tap as reported by the toolkit.
    pub double_tap: bool,
    /// Set when the event is a wheel tick rather than a pointer release.
    pub scroll: Option<ScrollDirection>,
    /// Seconds since app start.
    pub time: f64,
}

impl ReleaseEvent {
    pub fn tap(time: f64) -> Self {
        Self { dx: 0.0, double_tap: false, scroll: None, time }
    }

    pub fn drag(dx: f32, time: f64) -> Self {
        Self { dx, double_tap: false, scroll: None, time }
    }

    pub fn wheel(direction: ScrollDirection, time: f64) -> Self {
        Self { dx: 0.0, double_tap: false, scroll: Some(direction), time }
    }

    pub fn flagged_double_tap(time: f64) -> Self {
        Self { dx: 0.0, double_tap: true, scroll: None, time }
    }
}

/// What a release event meant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    /// Two taps in quick succession. `flagged` marks a pair the toolkit
    /// reported itself rather than one caught by the manual timer; the
    /// two kinds zoom differently.
    DoubleTap { flagged: bool },
    /// Advance one page (wheel down, or right-to-left swipe).
    NextPage,
    /// Go back one page (wheel up, or left-to-right swipe).
    PrevPage,
}

/// Turns release events into gestures.
///
/// Priority is fixed: toolkit double-tap flag, then wheel direction,
/// then the manual double-tap window, then the swipe threshold. A
/// release consumed by the flag, a wheel tick or the manual window
/// clears the tap timer; plain taps and swipes arm it. One physical
/// double tap therefore never fires twice.
#[derive(Debug, Default)]
pub struct GestureClassifier {
    /// Time of the last timer-arming release.
    last_release: Option<f64>,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&mut self, event: ReleaseEvent) -> Option<Gesture> {
        if event.double_tap {
            self.last_release = None;
            return Some(Gesture::DoubleTap { flagged: true });
        }

        if let Some(direction) = event.scroll {
            self.last_release = None;
            return Some(match direction {
                ScrollDirection::Down => Gesture::NextPage,
                ScrollDirection::Up => Gesture::PrevPage,
            });
        }

        if let Some(last) = self.last_release.take() {
            if event.time - last < DOUBLE_TAP_WINDOW {
                return Some(Gesture::DoubleTap { flagged: false });
            }
        }
        self.last_release = Some(event.time);

        if event.dx > SWIPE_THRESHOLD {
            return Some(Gesture::PrevPage);
        }
        if event.dx < -SWIPE_THRESHOLD {
            return Some(Gesture::NextPage);
        }

        None
    }
}
