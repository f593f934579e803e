//! Translation of window events into scroll inputs.
//!
//! The tracker turns winit wheel and touch events into [`ScrollInput`]s for
//! the [`SplashController`](crate::controller::SplashController). Wheel line
//! deltas are converted to pixels; touch drags report how far the finger
//! moved since the last event.
//!
//! ```ignore
//! if let Some(input) = tracker.handle_event(&event) {
//!     controller.handle(input);
//! }
//! ```

use crate::controller::ScrollInput;
use std::collections::HashMap;
use winit::event::{MouseScrollDelta, TouchPhase, WindowEvent};

/// Pixels per wheel line.
pub const LINE_HEIGHT_PX: f64 = 100.0;

/// Tracks active touches between events.
#[derive(Debug, Default)]
pub struct ScrollInputTracker {
    // Last y of each finger, keyed by touch id.
    touches: HashMap<u64, f64>,
}

impl ScrollInputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a winit window event.
    ///
    /// Returns `None` for events that carry no scroll.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<ScrollInput> {
        match event {
            WindowEvent::MouseWheel { delta, .. } => Some(Self::wheel_input(*delta)),
            WindowEvent::Touch(touch) => self.touch(touch.id, touch.phase, touch.location.y),
            _ => None,
        }
    }

    /// Convert a wheel delta to a pixel scroll input.
    pub fn wheel_input(delta: MouseScrollDelta) -> ScrollInput {
        let pixels = match delta {
            MouseScrollDelta::LineDelta(_, y) => y as f64 * LINE_HEIGHT_PX,
            MouseScrollDelta::PixelDelta(pos) => pos.y,
        };
        ScrollInput::wheel(pixels)
    }

    /// Feed one touch event.
    pub fn touch(&mut self, id: u64, phase: TouchPhase, y: f64) -> Option<ScrollInput> {
        match phase {
            TouchPhase::Started => {
                self.touches.insert(id, y);
                None
            }
            TouchPhase::Moved => {
                // A move for a finger we never saw start becomes its origin.
                let origin = self.touches.insert(id, y)?;
                Some(ScrollInput::touch_move(origin - y))
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.remove(&id);
                None
            }
        }
    }

    /// Number of fingers currently down.
    pub fn active_touches(&self) -> usize {
        self.touches.len()
    }
}
