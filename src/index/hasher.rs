//! Name hashing for the directory index

/// Polynomial rolling hash over the name's bytes: `h = h * 31 + byte`.
///
/// 32-bit wraparound, no seed. Deterministic across runs and not collision
/// resistant: `"Aa"` and `"BB"` hash to the same value, and the index is
/// expected to cope with that structurally.
pub fn name_hash(name: &str) -> u32 {
    name.bytes()
        .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(u32::from(b)))
}
