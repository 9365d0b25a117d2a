//! # Datagen - synthetic segments
//!
//! Produces segment sets for benchmarks, demos and property tests. A pool of
//! random lowercase keys is drawn once; every segment then takes a random
//! contiguous window of that pool, sorts it and tags each key with the
//! segment's index as its value (`key:<segment>`), so the winning segment of
//! any key is visible in the merged output.
//!
//! ```rust
//! use config::GeneratorConfig;
//! use datagen::SegmentGenerator;
//!
//! let cfg = GeneratorConfig { seed: Some(42), ..GeneratorConfig::default() };
//! let segments = SegmentGenerator::new(cfg).generate();
//! assert_eq!(segments.len(), 15);
//! ```
use config::GeneratorConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

pub struct SegmentGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl SegmentGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Draws `key_pool` random keys of `key_len` lowercase ASCII letters.
    ///
    /// The pool may contain duplicates; windows are deduplicated when cut.
    pub fn key_pool(&mut self) -> Vec<String> {
        (0..self.config.key_pool)
            .map(|_| random_key(&mut self.rng, self.config.key_len))
            .collect()
    }

    /// Generates `segments` sorted segments of `key:<segment index>` entries.
    pub fn generate(&mut self) -> Vec<Vec<String>> {
        let pool = self.key_pool();
        let segments: Vec<Vec<String>> = (0..self.config.segments)
            .map(|segment_id| self.segment(&pool, segment_id))
            .collect();

        debug!(
            segments = segments.len(),
            records = segments.iter().map(Vec::len).sum::<usize>(),
            "generated synthetic segments"
        );
        segments
    }

    fn segment(&mut self, pool: &[String], segment_id: usize) -> Vec<String> {
        if pool.is_empty() || self.config.max_window == 0 {
            return Vec::new();
        }

        let start = self.rng.gen_range(0..pool.len());
        let max_end = start.saturating_add(self.config.max_window).min(pool.len());
        let end = self.rng.gen_range(start + 1..=max_end);

        let mut keys: Vec<&str> = pool[start..end].iter().map(String::as_str).collect();
        keys.sort_unstable();
        keys.dedup();
        keys.into_iter()
            .map(|key| format!("{}:{}", key, segment_id))
            .collect()
    }
}

/// Convenience wrapper: one generator, one segment set.
pub fn generate_segments(config: GeneratorConfig) -> Vec<Vec<String>> {
    SegmentGenerator::new(config).generate()
}

fn random_key(rng: &mut StdRng, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'a' + rng.gen_range(0..26u8)))
        .collect()
}

#[cfg(test)]
mod tests;
