//! Seeded xorshift32, used for spawn jitter.

const FALLBACK_SEED: u32 = 12345;

/// Random number generator (xorshift32)
#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

#[derive(Clone, Debug)]
pub struct Rng {
    state: u32,
}

impl Rng {
    /// xorshift has a fixed point at zero, so a zero seed is replaced.
    pub fn new(seed: u32) -> Self {
        Self { state: if seed == 0 { FALLBACK_SEED } else { seed } }
    }

    /// Seed from the host clock/entropy source.
    pub fn from_entropy() -> Self {
        Self::new(entropy_seed())
    }

    pub fn next_u32(&mut self) -> u32 {
        xorshift32(&mut self.state)
    }

    /// Uniform in `[0, 1)`
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}

#[cfg(target_arch = "wasm32")]
fn entropy_seed() -> u32 {
    (js_sys::Math::random() * u32::MAX as f64) as u32
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy_seed() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(FALLBACK_SEED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_floats_stay_in_half_open_range() {
        let mut rng = Rng::new(7);
        for _ in 0..10_000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn zero_seed_does_not_stall() {
        let mut rng = Rng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Rng::new(99);
        let mut b = Rng::new(99);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }
}
