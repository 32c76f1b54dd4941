//! # Name Hashing
//!
//! Deterministic FNV-1a hashing used to derive component-type ids from
//! human-readable names. The digests are stable across runs, processes and
//! platforms, so configuration that references components by name keeps
//! resolving to the same ids.
//!
//! No collision detection is performed anywhere in the crate: two distinct
//! names that hash identically silently share a pool. With 32-bit ids this
//! is a documented constraint, not a corrected one.

/// FNV-1a 32-bit offset basis.
pub const FNV32_OFFSET_BASIS: u32 = 0x811c_9dc5;

/// FNV-1a 32-bit prime.
pub const FNV32_PRIME: u32 = 0x0100_0193;

/// FNV-1a 64-bit offset basis.
pub const FNV64_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime.
pub const FNV64_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Hashes a byte sequence with 32-bit FNV-1a.
///
/// Usable in const context, so ids for well-known component names can be
/// computed at compile time.
#[inline]
#[must_use]
pub const fn fnv1a_32(bytes: &[u8]) -> u32 {
    let mut hash = FNV32_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash = (hash ^ bytes[i] as u32).wrapping_mul(FNV32_PRIME);
        i += 1;
    }
    hash
}

/// Hashes a byte sequence with 64-bit FNV-1a.
#[inline]
#[must_use]
pub const fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash = FNV64_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash = (hash ^ bytes[i] as u64).wrapping_mul(FNV64_PRIME);
        i += 1;
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    // Known-answer vectors, computed with an independent implementation.
    #[test]
    fn test_fnv32_known_answers() {
        assert_eq!(fnv1a_32(b""), 0x811c_9dc5);
        assert_eq!(fnv1a_32(b"a"), 0xe40c_292c);
        assert_eq!(fnv1a_32(b"foobar"), 0xbf9c_f968);
        assert_eq!(fnv1a_32(b"Position"), 0xe27f_342a);
        assert_eq!(fnv1a_32(b"Velocity"), 0xba40_8252);
    }

    #[test]
    fn test_fnv64_known_answers() {
        assert_eq!(fnv1a_64(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a_64(b"a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(fnv1a_64(b"foobar"), 0x8594_4171_f739_67e8);
    }

    #[test]
    fn test_const_evaluation() {
        const POSITION: u32 = fnv1a_32(b"Position");
        assert_eq!(POSITION, fnv1a_32("Position".as_bytes()));
    }

    #[test]
    fn test_distinct_names_distinct_digests() {
        // Not a guarantee, just a sanity check on the vectors we care about.
        assert_ne!(fnv1a_32(b"Position"), fnv1a_32(b"Velocity"));
        assert_ne!(fnv1a_64(b"Position"), fnv1a_64(b"Velocity"));
    }
}
