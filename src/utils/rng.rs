use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Default generator. A fixed seed plus a fixed sequence of sampler calls
/// reproduces every configuration bit for bit.
pub type SimRng = ChaCha20Rng;

/// Generator for a single chain.
pub fn seeded_rng(seed: u64) -> SimRng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Independent per-stream generator (e.g. one per replica or parameter
/// point) derived from a master seed via SplitMix64 mixing.
pub fn stream_rng(master: u64, stream_id: usize) -> SimRng {
    ChaCha20Rng::seed_from_u64(mix_seed(master, stream_id as u64))
}

fn mix_seed(master: u64, stream_id: u64) -> u64 {
    let mut x = master ^ stream_id.wrapping_mul(0x9E3779B97F4A7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}
