//! Benchmark inputs for resfw-util.
//!
//! Provides deterministic identifier corpora so codec benchmarks measure
//! the bit arithmetic, not RNG overhead.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Generate a deterministic corpus of `n` packed resource identifiers.
///
/// Mixes valid, internal, and unassigned shapes: every fourth ID has a
/// zero type byte and every eighth a zero package byte, matching the mix
/// a resource compiler sees mid-assignment.
pub fn id_corpus(n: usize, seed: u64) -> Vec<u32> {
    let mut state = seed | 1;
    (0..n)
        .map(|i| {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let mut id = state as u32;
            if i % 4 == 0 {
                id &= 0xff00_ffff;
            }
            if i % 8 == 0 {
                id &= 0x00ff_ffff;
            }
            id
        })
        .collect()
}
