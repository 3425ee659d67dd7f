//! Time-driven interpolation of a single scalar.

/// Shape of the interpolation between `from` and `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Curve {
    #[default]
    Linear,
    /// Cubic ease in/out (`3t² − 2t³`).
    Cubic,
}

impl Curve {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Cubic => t * t * (3.0 - 2.0 * t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionMode {
    /// Runs once and holds `to`.
    Once,
    /// Restarts from `from` every `duration`.
    Loop,
    /// `from -> to` over `duration`, then back over the next `duration`.
    BackAndForth,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: f32,
    pub to: f32,
    pub curve: Curve,
    pub duration: f32,
    pub mode: TransitionMode,
    elapsed: f32,
}

impl Transition {
    pub fn new(from: f32, to: f32, curve: Curve, duration: f32, mode: TransitionMode) -> Self {
        assert!(
            duration.is_finite() && duration > 0.0,
            "transition duration must be positive, got {duration}"
        );
        Self {
            from,
            to,
            curve,
            duration,
            mode,
            elapsed: 0.0,
        }
    }

    /// Full period after which the value repeats.
    #[inline]
    pub fn period(&self) -> f32 {
        match self.mode {
            TransitionMode::BackAndForth => self.duration * 2.0,
            _ => self.duration,
        }
    }

    /// Value after `t` seconds, independent of any accumulated state.
    pub fn value_at(&self, t: f32) -> f32 {
        let t = t.max(0.0);
        let progress = match self.mode {
            TransitionMode::Once => (t / self.duration).min(1.0),
            TransitionMode::Loop => t.rem_euclid(self.duration) / self.duration,
            TransitionMode::BackAndForth => {
                let phase = t.rem_euclid(self.duration * 2.0);
                if phase <= self.duration {
                    phase / self.duration
                } else {
                    2.0 - phase / self.duration
                }
            }
        };
        self.from + (self.to - self.from) * self.curve.apply(progress)
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value_at(self.elapsed)
    }

    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt.max(0.0);
        if self.mode != TransitionMode::Once {
            // keep the accumulator small; value_at is periodic in `period`
            self.elapsed = self.elapsed.rem_euclid(self.period());
        }
        self.value()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.mode == TransitionMode::Once && self.elapsed >= self.duration
    }
}
