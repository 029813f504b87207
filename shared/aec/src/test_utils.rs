//! Deterministic signal generators for tests.

/// White noise in `[-amplitude, amplitude]` from a seeded LCG.
pub fn noise(len: usize, amplitude: i16, seed: u64) -> Vec<i16> {
    let span = 2 * amplitude as i64 + 1;
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) as i64 % span - amplitude as i64) as i16
        })
        .collect()
}

/// Feed `reference`/`mic` through `algo` in `block`-sized chunks, in order.
pub fn run_blocks<A: crate::EchoCanceller>(
    algo: &mut A,
    reference: &[i16],
    mic: &[i16],
    block: usize,
) -> Vec<i16> {
    let mut out = vec![0i16; reference.len().min(mic.len())];
    for ((o, r), m) in out
        .chunks_exact_mut(block)
        .zip(reference.chunks_exact(block))
        .zip(mic.chunks_exact(block))
    {
        algo.process(o, r, m).unwrap();
    }
    out
}
