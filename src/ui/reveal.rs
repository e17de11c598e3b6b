/// Delay added per card so a row of cards fades in one after another.
pub const STAGGER_MS: u32 = 100;

/// One-shot "has this element been seen" flag. Fires on the first
/// intersection and never resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealLatch {
    has_animated: bool,
}

impl RevealLatch {
    pub fn has_animated(&self) -> bool {
        self.has_animated
    }

    /// Feed a visibility sample. Returns true only for the sample that starts the animation.
    pub fn observe(&mut self, intersecting: bool) -> bool {
        if self.has_animated || !intersecting {
            return false;
        }
        self.has_animated = true;
        true
    }
}

/// Fade-in settings for one rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reveal {
    pub delay_ms: u32,
    pub latch: RevealLatch,
}

impl Reveal {
    pub fn staggered(index: usize) -> Self {
        let steps = u32::try_from(index).unwrap_or(u32::MAX);
        Self {
            delay_ms: steps.saturating_mul(STAGGER_MS),
            latch: RevealLatch::default(),
        }
    }

    /// Already visible, e.g. for visitors who asked for reduced motion.
    pub fn shown(mut self) -> Self {
        self.latch.observe(true);
        self
    }

    pub fn class(&self) -> &'static str {
        if self.latch.has_animated() {
            "reveal is-visible"
        } else {
            "reveal"
        }
    }
}
