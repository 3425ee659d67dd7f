use std::sync::RwLock;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use hashbrown::HashMap;

// Cache is dropped wholesale once it grows past this many samples.
const CACHE_LIMIT: usize = 1 << 16;
const OCTAVES: u32 = 2;

/// Seeded 1D height noise.
///
/// `noise(x, smoothing)` sums octaves of OpenSimplex2 sampled along a fixed
/// row. The coarsest octave has period `smoothing` (in x units), so neighbouring
/// samples much closer than `smoothing` interpolate smoothly between coarse
/// features; the next octave halves period and weight. The result is
/// normalized to roughly `[-amplitude, amplitude]`.
pub struct HeightField {
    seed: i32,
    amplitude: f32,
    base: FastNoiseLite,
    cache: RwLock<HashMap<(u32, u32), f32>>,
}

impl HeightField {
    pub fn new(seed: i32, amplitude: f32) -> Self {
        assert!(
            amplitude.is_finite(),
            "noise amplitude must be finite, got {amplitude}"
        );
        let mut base = FastNoiseLite::with_seed(seed);
        base.set_noise_type(Some(NoiseType::OpenSimplex2));
        base.set_frequency(Some(1.0));
        Self {
            seed,
            amplitude,
            base,
            cache: RwLock::new(HashMap::new()),
        }
    }

    #[inline]
    pub fn seed(&self) -> i32 {
        self.seed
    }

    #[inline]
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn noise(&self, x: f32, smoothing: f32) -> f32 {
        assert!(x.is_finite(), "noise sampled at non-finite x={x}");
        assert!(
            smoothing.is_finite() && smoothing > 0.0,
            "smoothing factor must be positive, got {smoothing}"
        );
        let key = (x.to_bits(), smoothing.to_bits());
        if let Ok(cache) = self.cache.read() {
            if let Some(v) = cache.get(&key) {
                return *v;
            }
        }
        let v = self.sample(x, smoothing);
        if let Ok(mut cache) = self.cache.write() {
            if cache.len() >= CACHE_LIMIT {
                cache.clear();
            }
            cache.insert(key, v);
        }
        v
    }

    fn sample(&self, x: f32, smoothing: f32) -> f32 {
        let mut period = smoothing;
        let mut value = 0.0_f32;
        let mut weight = 0.0_f32;
        for octave in 0..OCTAVES {
            // each octave reads its own row so octaves stay decorrelated
            value += self.base.get_noise_2d(x / period, octave as f32 * 31.7) * period;
            weight += period;
            period *= 0.5;
        }
        value / weight * self.amplitude
    }

    #[cfg(test)]
    fn cached_len(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_values() {
        let a = HeightField::new(7, 140.0);
        let b = HeightField::new(7, 140.0);
        for i in -50..50 {
            let x = i as f32 * 20.0;
            assert_eq!(a.noise(x, 140.0), b.noise(x, 140.0));
        }
    }

    #[test]
    fn memoized_value_is_stable() {
        let f = HeightField::new(1, 140.0);
        let first = f.noise(123.0, 140.0);
        assert_eq!(f.cached_len(), 1);
        assert_eq!(f.noise(123.0, 140.0), first);
        assert_eq!(f.cached_len(), 1);
    }

    #[test]
    fn bounded_by_amplitude() {
        let f = HeightField::new(99, 50.0);
        for i in 0..2000 {
            let v = f.noise(i as f32 * 3.0, 140.0);
            assert!(v.abs() <= 50.0 * 1.05, "v={v}");
        }
    }

    #[test]
    fn gentle_between_adjacent_blocks() {
        // larger smoothing means smaller steps between neighbouring columns
        let f = HeightField::new(3, 140.0);
        let max_step = |s: f32| {
            (0..500)
                .map(|i| {
                    let x = i as f32 * 20.0;
                    (f.noise(x + 20.0, s) - f.noise(x, s)).abs()
                })
                .fold(0.0_f32, f32::max)
        };
        assert!(max_step(280.0) < max_step(20.0));
    }

    #[test]
    #[should_panic]
    fn rejects_non_finite_x() {
        HeightField::new(1, 10.0).noise(f32::NAN, 140.0);
    }
}
