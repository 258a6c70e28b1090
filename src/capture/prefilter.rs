//! Live-stream prefilter
//!
//! A debounce/cooldown gate consumed by a capture loop before it submits a
//! frame to the full recognition pipeline. Recognition is expensive relative
//! to a video feed; the gate waits for a run of consecutive frames that look
//! like an invoice, fires once, then suppresses further triggers while the
//! caller processes the frozen frame.
//!
//! The gate is a pure single-owner state machine: two counters, no interior
//! synchronization. Sharing one instance across threads requires external
//! locking.

use tracing::debug;

use crate::capture::frame::PixelBuffer;
use crate::config::PrefilterSettings;

/// Frame-stability gate with an injected invoice-likeness heuristic.
///
/// The heuristic is deliberately external: what "looks like an invoice" means
/// depends on the caller's capture conditions (edge density, aspect ratio,
/// a cheap detector pass) and is not part of this crate.
pub struct StreamPrefilter<F>
where
    F: Fn(&PixelBuffer) -> bool,
{
    settings: PrefilterSettings,
    looks_like_invoice: F,
    hit_count: u32,
    cooldown: u32,
}

impl<F> StreamPrefilter<F>
where
    F: Fn(&PixelBuffer) -> bool,
{
    /// Create a gate with the given thresholds and heuristic predicate.
    pub fn new(settings: PrefilterSettings, looks_like_invoice: F) -> Self {
        Self {
            settings,
            looks_like_invoice,
            hit_count: 0,
            cooldown: 0,
        }
    }

    /// Feed one frame. Returns `true` exactly when the frame is stable enough
    /// to freeze and submit to recognition.
    ///
    /// While cooling down after a trigger the gate returns `false` regardless
    /// of frame content, for `cooldown_frames` calls.
    pub fn feed(&mut self, frame: &PixelBuffer) -> bool {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return false;
        }

        if !frame.is_well_formed() {
            self.hit_count = 0;
            return false;
        }

        if (self.looks_like_invoice)(frame) {
            self.hit_count += 1;
        } else {
            self.hit_count = 0;
        }

        if self.hit_count >= self.settings.stable_frames {
            debug!(
                "Prefilter triggered after {} stable frame(s), cooling down for {}",
                self.hit_count, self.settings.cooldown_frames
            );
            self.cooldown = self.settings.cooldown_frames;
            self.hit_count = 0;
            return true;
        }

        false
    }

    /// Clear both counters and return to the counting state.
    pub fn reset(&mut self) {
        self.hit_count = 0;
        self.cooldown = 0;
    }

    /// True while the gate is suppressing frames after a trigger.
    pub fn in_cooldown(&self) -> bool {
        self.cooldown > 0
    }
}
