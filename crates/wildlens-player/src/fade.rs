//! Full-screen black overlay used to hide viewpoint switches.

use wildlens_ecs::Tween;

/// Overlay opacity in `[0, 1]` plus the ramp currently driving it, if any.
#[derive(Clone, Debug, Default)]
pub struct FadeOverlay {
    opacity: f32,
    ramp: Option<Tween>,
}

impl FadeOverlay {
    /// A transparent overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ramping from the current opacity to `target` over `duration`.
    /// Replaces any ramp in progress.
    pub fn start(&mut self, target: f32, duration: f32) {
        self.ramp = Some(Tween::new(self.opacity, target.clamp(0.0, 1.0), duration));
    }

    /// Advance the ramp. Returns true on the frame the ramp lands on its
    /// target, at which point opacity equals the target exactly.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(ramp) = self.ramp.as_mut() else {
            return false;
        };
        self.opacity = ramp.tick(dt);
        if ramp.is_finished() {
            self.opacity = ramp.target();
            self.ramp = None;
            return true;
        }
        false
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_ramping(&self) -> bool {
        self.ramp.is_some()
    }
}
