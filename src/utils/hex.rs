/// Encode a byte as a two-character lowercase hex pair.
///
/// Nibbles are mapped directly to character codes: 0-9 land on `'0'..'9'`,
/// 10-15 on `'a'..'f'`.
pub fn bin_to_hex(bin: u8) -> String {
    let mut hi = bin / 16;
    hi += if hi >= 10 { 87 } else { 48 };
    let mut lo = bin % 16;
    lo += if lo >= 10 { 87 } else { 48 };

    let mut out = String::with_capacity(2);
    out.push(hi as char);
    out.push(lo as char);
    out
}

/// Decode the first two characters of `hex` as a lowercase hex pair.
///
/// NOTE: This is the inverse of `bin_to_hex` and nothing more. No validation
/// is performed: each character code is shifted by 87 (codes >= 97, i.e.
/// `'a'..'f'`) or by 48 (everything below, i.e. `'0'..'9'`), with wrapping
/// arithmetic. Characters outside the lowercase hex alphabet (including
/// uppercase `'A'..'F'`) produce a deterministic but meaningless byte.
/// Callers must only pass pairs produced by `bin_to_hex`.
///
/// Panics if `hex` is shorter than two bytes.
pub fn hex_to_bin(hex: &str) -> u8 {
    let bytes = hex.as_bytes();
    let hi = bytes[0].wrapping_sub(if bytes[0] >= 97 { 87 } else { 48 });
    let lo = bytes[1].wrapping_sub(if bytes[1] >= 97 { 87 } else { 48 });
    hi.wrapping_mul(16).wrapping_add(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_low_and_high_nibbles() {
        assert_eq!(bin_to_hex(0x00), "00");
        assert_eq!(bin_to_hex(0x2f), "2f");
        assert_eq!(bin_to_hex(0x5f), "5f");
        assert_eq!(bin_to_hex(0xff), "ff");
    }

    #[test]
    fn encoding_matches_hex_crate() {
        for b in 0..=u8::MAX {
            assert_eq!(bin_to_hex(b), hex::encode([b]));
        }
    }

    #[test]
    fn round_trips_every_byte() {
        for b in 0..=u8::MAX {
            assert_eq!(hex_to_bin(&bin_to_hex(b)), b);
        }
    }

    #[test]
    fn ignores_trailing_characters() {
        assert_eq!(hex_to_bin("20b_2fc"), 0x20);
    }

    #[test]
    fn uppercase_decodes_to_garbage() {
        // Uppercase digits are not part of the contract: 'F' (70) falls into
        // the -48 branch and yields nibble 22, not 15.
        assert_eq!(hex_to_bin("1f"), 31);
        assert_eq!(hex_to_bin("1F"), 38);
    }

    #[test]
    #[should_panic]
    fn panics_on_short_input() {
        hex_to_bin("a");
    }
}
