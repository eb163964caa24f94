use rand::rngs::StdRng;
use rand::SeedableRng;

/// Row sampler; seeded for reproducible charts, entropy-backed otherwise.
pub struct RowSampler {
    rng: StdRng,
}

impl RowSampler {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Up to `amount` distinct indices below `len`, without replacement,
    /// in ascending order. Takes every row when `amount >= len`.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        if amount >= len {
            return (0..len).collect();
        }
        let mut indices = rand::seq::index::sample(&mut self.rng, len, amount).into_vec();
        indices.sort_unstable();
        indices
    }
}
