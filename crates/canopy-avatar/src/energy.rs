/// Energy pool clamped to `[0, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Energy {
    value: f32,
    max: f32,
}

impl Energy {
    pub fn full(max: f32) -> Self {
        assert!(max.is_finite() && max >= 0.0, "energy max must be >= 0, got {max}");
        Self { value: max, max }
    }

    pub fn with_value(value: f32, max: f32) -> Self {
        let mut e = Self::full(max);
        e.set(value);
        e
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    #[inline]
    pub fn set(&mut self, value: f32) {
        self.value = value.clamp(0.0, self.max);
    }

    /// Debits `cost` if the pool covers it; otherwise leaves it untouched.
    pub fn try_spend(&mut self, cost: f32) -> bool {
        if self.value < cost {
            return false;
        }
        self.set(self.value - cost);
        true
    }

    pub fn credit(&mut self, amount: f32) {
        self.set(self.value + amount);
    }
}
