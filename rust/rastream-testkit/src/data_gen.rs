//! Random byte generation for tests.

/// Returns `len` random bytes.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = fastrand::Rng::new();
    fill_bytes(&mut rng, len)
}

/// Returns `len` pseudo-random bytes, reproducible for a given `seed`.
pub fn random_bytes_with_seed(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = fastrand::Rng::with_seed(seed);
    fill_bytes(&mut rng, len)
}

fn fill_bytes(rng: &mut fastrand::Rng, len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        assert!(random_bytes(0).is_empty());
        assert_eq!(random_bytes(1000).len(), 1000);
        assert_eq!(
            random_bytes_with_seed(256, 42),
            random_bytes_with_seed(256, 42)
        );
        assert_ne!(
            random_bytes_with_seed(256, 42),
            random_bytes_with_seed(256, 43)
        );
    }
}
