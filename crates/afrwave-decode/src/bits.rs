//! Bit tests against a mask.

/// Returns true when every bit set in `mask` is also set in `byte`.
#[inline]
pub fn match_ones(byte: u8, mask: u8) -> bool {
    byte & mask == mask
}

/// Returns true when every bit set in `mask` is clear in `byte`.
#[inline]
pub fn match_zeroes(byte: u8, mask: u8) -> bool {
    byte & mask == 0
}
