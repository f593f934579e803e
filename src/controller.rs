//! Scroll-driven progress controller.
//!
//! The controller turns a stream of wheel and touch deltas into the single
//! progress scalar that drives the whole scene. While the splash is running
//! every scroll input is consumed (the host must not scroll the page); once
//! progress reaches 1 the controller latches and passes every further input
//! through untouched.
//!
//! ```ignore
//! let mut controller = SplashController::new(DEFAULT_DURATION)?;
//! if controller.handle(ScrollInput::wheel(120.0)) == Disposition::Consumed {
//!     // suppress default scrolling
//! }
//! let progress = controller.progress();
//! ```

use crate::error::SplashError;
use crate::kinematics::Progress;

/// Scroll magnitude, in pixels, that completes the splash by default.
pub const DEFAULT_DURATION: f64 = 2500.0;

/// Source of a scroll input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Wheel,
    TouchMove,
}

/// One scroll-like input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollInput {
    pub kind: InputKind,
    /// Signed delta in pixels. Only the magnitude advances progress.
    pub delta: f64,
}

impl ScrollInput {
    pub fn wheel(delta: f64) -> Self {
        Self {
            kind: InputKind::Wheel,
            delta,
        }
    }

    pub fn touch_move(delta: f64) -> Self {
        Self {
            kind: InputKind::TouchMove,
            delta,
        }
    }
}

/// What the host should do with an input after the controller saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The splash used the input; suppress default scrolling.
    Consumed,
    /// The splash is done; let the host scroll normally.
    PassThrough,
}

/// Lifecycle of the splash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplashState {
    #[default]
    Idle,
    Animating,
    Complete,
}

/// Accumulates scroll magnitude into progress.
#[derive(Debug, Clone)]
pub struct SplashController {
    duration: f64,
    accumulated: f64,
    progress: Progress,
    state: SplashState,
}

impl SplashController {
    /// Create a controller that completes after `duration` pixels of scrolling.
    pub fn new(duration: f64) -> Result<Self, SplashError> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(SplashError::InvalidArgument(format!(
                "duration must be a positive number, got {duration}"
            )));
        }
        Ok(Self {
            duration,
            accumulated: 0.0,
            progress: Progress::ZERO,
            state: SplashState::Idle,
        })
    }

    /// Feed one input.
    pub fn handle(&mut self, input: ScrollInput) -> Disposition {
        if self.state == SplashState::Complete {
            return Disposition::PassThrough;
        }
        if !input.delta.is_finite() {
            log::debug!("ignoring non-finite {:?} delta", input.kind);
            return Disposition::Consumed;
        }

        self.accumulated += input.delta.abs();
        let ratio = self.accumulated / self.duration;

        if ratio >= 1.0 {
            self.progress = Progress::ONE;
            self.state = SplashState::Complete;
            log::info!("splash complete after {:.0}px of scrolling", self.accumulated);
        } else {
            self.progress = Progress::clamped(ratio as f32);
            if self.state == SplashState::Idle && self.accumulated > 0.0 {
                self.state = SplashState::Animating;
                log::debug!("splash started by {:?}", input.kind);
            }
        }

        Disposition::Consumed
    }

    #[inline]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    #[inline]
    pub fn state(&self) -> SplashState {
        self.state
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state == SplashState::Complete
    }

    /// Total scroll magnitude consumed so far.
    #[inline]
    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

impl Default for SplashController {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            accumulated: 0.0,
            progress: Progress::ZERO,
            state: SplashState::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_duration() {
        for duration in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                SplashController::new(duration),
                Err(SplashError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_starts_idle() {
        let controller = SplashController::default();
        assert_eq!(controller.state(), SplashState::Idle);
        assert_eq!(controller.progress(), Progress::ZERO);
        assert_eq!(controller.duration(), DEFAULT_DURATION);
    }

    #[test]
    fn test_accumulates_magnitude() {
        let mut controller = SplashController::new(1000.0).unwrap();
        assert_eq!(controller.handle(ScrollInput::wheel(100.0)), Disposition::Consumed);
        assert_eq!(controller.handle(ScrollInput::touch_move(-150.0)), Disposition::Consumed);
        assert_eq!(controller.accumulated(), 250.0);
        assert!((controller.progress().get() - 0.25).abs() < 1e-6);
        assert_eq!(controller.state(), SplashState::Animating);
    }

    #[test]
    fn test_zero_delta_stays_idle() {
        let mut controller = SplashController::new(1000.0).unwrap();
        assert_eq!(controller.handle(ScrollInput::wheel(0.0)), Disposition::Consumed);
        assert_eq!(controller.state(), SplashState::Idle);
    }

    #[test]
    fn test_completing_event_is_consumed() {
        let mut controller = SplashController::new(300.0).unwrap();
        controller.handle(ScrollInput::wheel(100.0));
        controller.handle(ScrollInput::wheel(100.0));
        assert_eq!(controller.handle(ScrollInput::wheel(100.0)), Disposition::Consumed);
        assert!(controller.is_complete());
        assert_eq!(controller.progress(), Progress::ONE);
    }

    #[test]
    fn test_latches_after_complete() {
        let mut controller = SplashController::new(100.0).unwrap();
        controller.handle(ScrollInput::wheel(5000.0));
        assert_eq!(controller.progress(), Progress::ONE);

        let before = controller.accumulated();
        assert_eq!(controller.handle(ScrollInput::wheel(-40.0)), Disposition::PassThrough);
        assert_eq!(controller.handle(ScrollInput::touch_move(40.0)), Disposition::PassThrough);
        assert_eq!(controller.accumulated(), before);
        assert_eq!(controller.state(), SplashState::Complete);
    }

    #[test]
    fn test_ignores_non_finite_delta() {
        let mut controller = SplashController::new(100.0).unwrap();
        controller.handle(ScrollInput::wheel(f64::NAN));
        controller.handle(ScrollInput::wheel(f64::INFINITY));
        assert_eq!(controller.accumulated(), 0.0);
        assert_eq!(controller.state(), SplashState::Idle);
    }

    #[test]
    fn test_progress_is_monotonic() {
        let mut controller = SplashController::new(500.0).unwrap();
        let mut last = controller.progress();
        for delta in [10.0, -35.0, 0.0, 80.0, -5.0, 200.0, 400.0, 3.0] {
            controller.handle(ScrollInput::wheel(delta));
            assert!(controller.progress() >= last);
            last = controller.progress();
        }
        assert!(controller.is_complete());
    }
}
