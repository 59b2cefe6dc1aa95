//! 64-bit FNV-1a content fingerprint. Not a security primitive.

pub const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
pub const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Xor each byte in, then multiply by the prime.
#[inline]
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
    })
}

/// Lowercase, zero-padded 16 digit hex fingerprint of `input`'s UTF-8 bytes.
pub fn fnv1a64_hex(input: &str) -> String {
    format!("{:016x}", fnv1a64(input.as_bytes()))
}

/// Fingerprint of `"state:" + state`, as stored in every epoch result.
pub fn state_hash(state: i64) -> String {
    fnv1a64_hex(&format!("state:{}", state))
}
