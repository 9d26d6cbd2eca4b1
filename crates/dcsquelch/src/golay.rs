//! Golay (23,12) codec
//!
//! DCS frames are systematic Golay (23,12,7) codewords: bits 22…11
//! carry the 12 data bits and bits 10…0 carry the 11 check bits.
//! The code is perfect, so every 23-bit word lies within Hamming
//! distance 3 of exactly one codeword. [`correct()`] exploits this
//! with a 2048-entry syndrome → error-pattern table: one table
//! lookup and one XOR recover the nearest codeword, fixing up to
//! three bit errors.
//!
//! The table is built once, on first use, behind a process-wide
//! initializer. Construction visits the `1 + C(23,1) + C(23,2) +
//! C(23,3) = 2048` correctable error patterns in order of increasing
//! weight, which guarantees minimum-weight correction.

use lazy_static::lazy_static;

/// Generator polynomial, `g(x) = x¹¹ + x¹⁰ + x⁶ + x⁵ + x⁴ + x² + 1`
///
/// Per EIA/TIA-603 for DCS subaudible coding. The 12-bit value
/// includes the x¹¹ term.
const GEN_POLY: u32 = 0xC75;

/// Mask covering one 23-bit codeword
pub(crate) const WORD_MASK: u32 = 0x7FFFFF;

/// Mask covering one 11-bit syndrome
const SYNDROME_MASK: u32 = 0x7FF;

lazy_static! {
    static ref SYNDROME_TABLE: SyndromeTable = SyndromeTable::new();
}

/// Compute the 11-bit syndrome of a 23-bit word
///
/// Long division by the generator polynomial: scan from bit 22 down
/// to bit 11 and cancel each set bit with a shifted copy of `g(x)`.
/// The residue in the low 11 bits is the syndrome, which is zero
/// if and only if `word` is a codeword.
pub(crate) fn syndrome(word: u32) -> u32 {
    let mut reg = word & WORD_MASK;
    for i in (11..=22).rev() {
        if reg >> i & 1 != 0 {
            reg ^= GEN_POLY << (i - 11);
        }
    }
    reg & SYNDROME_MASK
}

/// Encode 12 data bits into a systematic 23-bit codeword
///
/// The data occupies bits 22…11 of the result; the check bits are
/// the syndrome of the shifted data, which makes the overall word
/// divide evenly by `g(x)`.
pub(crate) fn encode(data: u16) -> u32 {
    debug_assert!(data >> 12 == 0);
    let shifted = u32::from(data) << 11;
    shifted | syndrome(shifted)
}

/// Correct up to three bit errors in a 23-bit word
///
/// Returns the unique codeword within Hamming distance 3 of `word`.
pub(crate) fn correct(word: u32) -> u32 {
    let word = word & WORD_MASK;
    word ^ SYNDROME_TABLE.error_pattern(syndrome(word))
}

// Syndrome → error-pattern lookup
//
// One entry per possible 11-bit syndrome. Every entry holds a
// 23-bit error pattern of weight ≤ 3 whose syndrome is the entry's
// index; the (23,12,7) code is perfect, so the 2048 correctable
// patterns fill the table exactly.
struct SyndromeTable {
    patterns: [u32; 2048],
}

impl SyndromeTable {
    // placeholder used only during construction
    const UNSET: u32 = u32::MAX;

    fn new() -> Self {
        let mut patterns = [Self::UNSET; 2048];

        // 0 errors
        patterns[0] = 0;

        // 1-bit errors
        for i in 0..23 {
            let e = 1u32 << i;
            let s = syndrome(e) as usize;
            if patterns[s] == Self::UNSET {
                patterns[s] = e;
            }
        }

        // 2-bit errors
        for i in 0..23 {
            for j in i + 1..23 {
                let e = (1u32 << i) | (1u32 << j);
                let s = syndrome(e) as usize;
                if patterns[s] == Self::UNSET {
                    patterns[s] = e;
                }
            }
        }

        // 3-bit errors
        for i in 0..23 {
            for j in i + 1..23 {
                for k in j + 1..23 {
                    let e = (1u32 << i) | (1u32 << j) | (1u32 << k);
                    let s = syndrome(e) as usize;
                    if patterns[s] == Self::UNSET {
                        patterns[s] = e;
                    }
                }
            }
        }

        debug_assert!(patterns.iter().all(|&p| p != Self::UNSET));
        Self { patterns }
    }

    #[inline]
    fn error_pattern(&self, syndrome: u32) -> u32 {
        self.patterns[(syndrome & SYNDROME_MASK) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::codes::STANDARD_CODES;

    #[test]
    fn test_syndrome_zero_word() {
        assert_eq!(0, syndrome(0));
    }

    #[test]
    fn test_all_ones_is_a_codeword() {
        // the complement of any codeword is therefore also a codeword
        assert_eq!(0, syndrome(WORD_MASK));
    }

    #[test]
    fn test_encode_divides_evenly() {
        for &code in STANDARD_CODES.iter() {
            assert_eq!(0, syndrome(encode(code)));
        }
    }

    #[test]
    fn test_roundtrip_all_standard_codes() {
        for &code in STANDARD_CODES.iter() {
            let word = encode(code);
            assert_eq!(word, correct(word));
            assert_eq!(u32::from(code), word >> 11);
        }
    }

    #[test]
    fn test_table_is_complete_and_consistent() {
        let table = SyndromeTable::new();
        for (s, &pattern) in table.patterns.iter().enumerate() {
            assert_ne!(SyndromeTable::UNSET, pattern);
            assert!(pattern.count_ones() <= 3);
            assert_eq!(s as u32, syndrome(pattern));
        }
    }

    #[test]
    fn test_corrects_up_to_three_errors() {
        let word = encode(19);

        // all single-bit errors
        for i in 0..23 {
            assert_eq!(word, correct(word ^ (1 << i)));
        }

        // a spread of double- and triple-bit errors
        for i in 0..23u32 {
            let j = (i + 7) % 23;
            let k = (i + 15) % 23;
            assert_eq!(word, correct(word ^ (1 << i) ^ (1 << j)));
            assert_eq!(word, correct(word ^ (1 << i) ^ (1 << j) ^ (1 << k)));
        }
    }

    #[test]
    fn test_four_errors_decode_elsewhere() {
        // beyond the correction radius the nearest codeword is a
        // different one; the result is still a codeword
        let word = encode(19);
        let corrupted = word ^ 0b1111;
        let corrected = correct(corrupted);
        assert_eq!(0, syndrome(corrected));
        assert_ne!(word, corrected);
    }
}
