//! Shift and layout tracking.
//!
//! A single shift tap capitalises the next letter; two taps within the
//! double-tap window lock caps. Any other key forgets the last tap, so a
//! double tap is only recognised across two consecutive shift presses.
//!
//! Time is injected through [`Clock`] so the double-tap logic can be tested
//! without sleeping.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Default double-tap window.
pub const DEFAULT_DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Which key layout is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutKind {
    #[default]
    Letters,
    Symbols,
    SymbolsShifted,
}

impl LayoutKind {
    /// Layout after the mode-change key: letters ↔ symbols.
    pub fn after_mode_change(self) -> Self {
        match self {
            Self::Letters => Self::Symbols,
            Self::Symbols | Self::SymbolsShifted => Self::Letters,
        }
    }
}

/// Pick the layout variant for `current` given the shift state.
///
/// Letters stay letters (shift only affects case there); the symbol layouts
/// switch between their plain and shifted variants.
pub fn determine_active_layout(current: LayoutKind, is_shifted: bool) -> LayoutKind {
    match current {
        LayoutKind::Letters => LayoutKind::Letters,
        LayoutKind::Symbols | LayoutKind::SymbolsShifted => {
            if is_shifted {
                LayoutKind::SymbolsShifted
            } else {
                LayoutKind::Symbols
            }
        }
    }
}

/// Effect of a shift press on the letters layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutAction {
    /// Capitalise the next letter only
    CapitalizeNext,
    /// Sticky caps switched on by a double tap
    LockCaps,
    /// Sticky caps switched off by a single tap
    ReleaseCaps,
}

/// Capitalisation state driven by shift presses.
#[derive(Debug, Clone)]
pub struct ShiftTracker {
    caps_locked: bool,
    one_shot: bool,
    last_shift: Option<Instant>,
    window: Duration,
}

impl ShiftTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            caps_locked: false,
            one_shot: false,
            last_shift: None,
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn is_caps_locked(&self) -> bool {
        self.caps_locked
    }

    /// Whether the next letter will be capitalised.
    pub fn is_shifted(&self) -> bool {
        self.caps_locked || self.one_shot
    }

    pub fn last_shift(&self) -> Option<Instant> {
        self.last_shift
    }

    /// Register a shift press at `now`.
    pub fn on_shift_pressed(&mut self, now: Instant) -> LayoutAction {
        let double_tap = self
            .last_shift
            .is_some_and(|last| now.saturating_duration_since(last) <= self.window);

        if double_tap {
            // A recognised double tap starts a fresh sequence.
            self.last_shift = None;
            self.one_shot = false;
            self.caps_locked = true;
            return LayoutAction::LockCaps;
        }

        self.last_shift = Some(now);
        if self.caps_locked {
            self.caps_locked = false;
            self.one_shot = false;
            LayoutAction::ReleaseCaps
        } else {
            self.one_shot = true;
            LayoutAction::CapitalizeNext
        }
    }

    /// Forget the last shift press; called for every non-shift key.
    pub fn on_other_key(&mut self) {
        self.last_shift = None;
    }

    /// Whether the letter being typed should be capitalised. Consumes a
    /// one-shot capitalisation; sticky caps persist.
    pub fn take_capitalization(&mut self) -> bool {
        let shifted = self.is_shifted();
        self.one_shot = false;
        shifted
    }

    pub fn reset(&mut self) {
        self.caps_locked = false;
        self.one_shot = false;
        self.last_shift = None;
    }
}

impl Default for ShiftTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_TAP_WINDOW)
    }
}
