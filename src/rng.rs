//! Game RNG seeding.

use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Seed a `SmallRng` from the platform entropy source (`crypto.getRandomValues`
/// in the browser). Falls back to the performance clock if that is missing.
pub fn fresh_rng() -> SmallRng {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => SmallRng::seed_from_u64(u64::from_le_bytes(buf)),
        Err(err) => {
            log::warn!("entropy unavailable ({err}), seeding from clock");
            SmallRng::seed_from_u64(clock_seed())
        }
    }
}

fn clock_seed() -> u64 {
    let now = crate::performance_now();
    (now * 1_000.0) as u64 ^ 0x9E37_79B9_7F4A_7C15
}
