#![allow(dead_code)]

/// Generate `len` deterministic bytes using a simple LCG.
pub fn pseudo_random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = seed;
    (0..len)
        .map(|_| {
            rng = rng
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (rng >> 56) as u8
        })
        .collect()
}

/// Generate `len` highly compressible bytes (repeating pattern).
pub fn compressible_bytes(len: usize) -> Vec<u8> {
    let pattern = b"the quick brown fox jumps over the lazy dog. ";
    (0..len).map(|i| pattern[i % pattern.len()]).collect()
}

/// Text with some repetition but not a single pattern.
pub fn mixed_bytes(len: usize) -> Vec<u8> {
    let noise = pseudo_random_bytes(len, 7);
    compressible_bytes(len)
        .into_iter()
        .zip(noise)
        .enumerate()
        .map(|(i, (text, noise))| if i % 11 == 0 { noise } else { text })
        .collect()
}
