//! Standard DCS codes
//!
//! The EIA/TIA-603 code plan defines 105 standard codes. Users write
//! them in octal with a `D` prefix (`D023`) and an optional `N`
//! suffix for inverted-polarity transmissions. Internally a code is
//! its decimal value: `D023` is 19.
//!
//! Because DCS is a continuous repetition of one 23-bit Golay
//! codeword and the Golay code is cyclic, some standard codes are
//! rotations of one another and produce the same transmission (for
//! example `D023`, `D114`, and `D462` share one rotation class).
//! The [`classify()`] table maps every rotation of every standard
//! codeword to the lowest-numbered code of its class, and
//! [`DcsCode::canonical()`] reduces any code (including inverted
//! codes whose complement lands in another standard class) to the
//! identity the decoder will actually report.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use thiserror::Error;

use crate::golay;

/// Standard DCS code numbers, decimal, ascending
///
/// Converted from the EIA/TIA-603 octal table.
pub(crate) const STANDARD_CODES: [u16; 105] = [
    19, 21, 22, 25, 26, 30, 35, 39, 41, 43, 44, 53, 57, 58, 59, 60, 76, 77, 78, 82, 85, 89, 90,
    92, 99, 101, 106, 109, 110, 114, 117, 122, 124, 133, 138, 140, 147, 149, 150, 163, 164, 165,
    166, 169, 170, 173, 177, 179, 181, 182, 185, 188, 198, 201, 205, 213, 217, 218, 227, 230, 233,
    238, 244, 245, 249, 265, 266, 267, 275, 281, 282, 293, 294, 298, 300, 301, 306, 308, 309, 310,
    323, 326, 334, 339, 342, 346, 358, 373, 390, 394, 404, 407, 409, 410, 428, 434, 436, 451, 458,
    467, 473, 474, 476, 483, 492,
];

lazy_static! {
    static ref CODEWORD_CLASSES: Vec<(u32, u16)> = build_classes();
}

/// Is `number` one of the 105 standard code numbers?
pub fn is_standard(number: u16) -> bool {
    STANDARD_CODES.binary_search(&number).is_ok()
}

/// Classify a 23-bit codeword by rotation class
///
/// If `codeword` is any cyclic rotation of a standard code's
/// codeword, returns the lowest-numbered standard code of that
/// class. Returns `None` for codewords outside the standard plan.
pub(crate) fn classify(codeword: u32) -> Option<u16> {
    CODEWORD_CLASSES
        .binary_search_by_key(&codeword, |&(word, _)| word)
        .ok()
        .map(|idx| CODEWORD_CLASSES[idx].1)
}

// Build the rotation-class table: every cyclic rotation of every
// standard codeword, tagged with the class representative. Codes are
// visited in ascending order, so the representative is the lowest
// member. 23 is prime, so each class contributes exactly 23 words.
fn build_classes() -> Vec<(u32, u16)> {
    let mut entries: Vec<(u32, u16)> = Vec::with_capacity(STANDARD_CODES.len() * 23);
    for &code in STANDARD_CODES.iter() {
        let codeword = golay::encode(code);
        if entries.iter().any(|&(word, _)| word == codeword) {
            // rotation alias of a lower-numbered code
            continue;
        }
        let mut word = codeword;
        for _i in 0..23 {
            entries.push((word, code));
            word = ((word << 1) | (word >> 22)) & golay::WORD_MASK;
        }
    }
    entries.sort_unstable_by_key(|&(word, _)| word);
    entries
}

/// Error constructing or parsing a [`DcsCode`]
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidCodeErr {
    /// The input string is not octal-digits-plus-optional-N
    #[error("DCS codes are up to three octal digits with an optional N suffix, like \"023\" or \"754N\"")]
    Malformed,

    /// The number is not in the standard code plan
    #[error("D{0:03o} is not a standard DCS code")]
    NotStandard(u16),
}

/// A validated DCS code with polarity
///
/// Carries the decimal code number and the inverted ("N") flag.
/// Parse one from the conventional octal notation, or build one from
/// a decimal number:
///
/// ```
/// use dcsquelch::DcsCode;
///
/// let code: DcsCode = "D023".parse().unwrap();
/// assert_eq!(19, code.number());
/// assert!(!code.is_inverted());
/// assert_eq!("D023", &format!("{}", code));
///
/// let inverted: DcsCode = "754n".parse().unwrap();
/// assert_eq!(DcsCode::new(0o754, true).unwrap(), inverted);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DcsCode {
    number: u16,
    inverted: bool,
}

impl DcsCode {
    /// New code from a decimal number and polarity
    ///
    /// `number` must be one of the 105 standard code numbers, in
    /// decimal: `D023` is 19. `inverted` selects the "N"-suffix
    /// polarity.
    pub fn new(number: u16, inverted: bool) -> Result<Self, InvalidCodeErr> {
        if is_standard(number) {
            Ok(Self { number, inverted })
        } else {
            Err(InvalidCodeErr::NotStandard(number))
        }
    }

    // Construct without validation. For decoder-internal use with
    // numbers that come out of the classification table.
    pub(crate) fn from_parts(number: u16, inverted: bool) -> Self {
        Self { number, inverted }
    }

    /// Decimal code number
    pub fn number(&self) -> u16 {
        self.number
    }

    /// Is this the inverted ("N"-suffix) polarity?
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// The identity this code's transmission is detected as
    ///
    /// Rotation-aliased codes reduce to the lowest-numbered member
    /// of their class (`D114` → `D023`). An inverted code whose
    /// complemented codeword falls in another standard class reduces
    /// to that class at normal polarity (`D047N` → `D116`); the
    /// two transmissions are bit-for-bit identical on the air.
    ///
    /// Two codes whose canonical forms are equal cannot be told
    /// apart by any receiver, so the squelch gate matches canonical
    /// forms.
    pub fn canonical(&self) -> DcsCode {
        let codeword = golay::encode(self.number);
        if self.inverted {
            // the all-ones word is a codeword, so the complement of a
            // codeword is always a codeword too
            if let Some(number) = classify(!codeword & golay::WORD_MASK) {
                return DcsCode {
                    number,
                    inverted: false,
                };
            }
        }
        DcsCode {
            number: classify(codeword).unwrap_or(self.number),
            inverted: self.inverted,
        }
    }
}

impl fmt::Display for DcsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{:03o}", self.number)?;
        if self.inverted {
            write!(f, "N")?;
        }
        Ok(())
    }
}

impl FromStr for DcsCode {
    type Err = InvalidCodeErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = if s.starts_with('D') || s.starts_with('d') {
            &s[1..]
        } else {
            s
        };
        let (digits, inverted) = if s.ends_with('N') || s.ends_with('n') {
            (&s[..s.len() - 1], true)
        } else {
            (s, false)
        };
        if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| (b'0'..=b'7').contains(&b))
        {
            return Err(InvalidCodeErr::Malformed);
        }
        let number = u16::from_str_radix(digits, 8).map_err(|_e| InvalidCodeErr::Malformed)?;
        DcsCode::new(number, inverted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_code_table() {
        assert_eq!(105, STANDARD_CODES.len());
        assert!(STANDARD_CODES.windows(2).all(|w| w[0] < w[1]));
        assert!(is_standard(19));
        assert!(is_standard(492));
        assert!(!is_standard(20));
        assert!(!is_standard(0));
    }

    #[test]
    fn test_class_table() {
        // 105 codes collapse into 71 rotation classes of 23 words each
        assert_eq!(71 * 23, CODEWORD_CLASSES.len());

        // every standard codeword classifies, at every rotation
        for &code in STANDARD_CODES.iter() {
            let mut word = golay::encode(code);
            for _i in 0..23 {
                assert!(classify(word).is_some(), "D{:03o} rotation missing", code);
                word = ((word << 1) | (word >> 22)) & golay::WORD_MASK;
            }
        }

        // the all-zeros codeword is not in the plan, nor is data 13
        assert_eq!(None, classify(0));
        assert_eq!(None, classify(golay::encode(13)));
    }

    #[test]
    fn test_rotation_aliases() {
        // D023 (19), D114 (76), and D462 (306) share one class
        assert_eq!(Some(19), classify(golay::encode(19)));
        assert_eq!(Some(19), classify(golay::encode(76)));
        assert_eq!(Some(19), classify(golay::encode(306)));

        let d114 = DcsCode::new(76, false).unwrap();
        assert_eq!(19, d114.canonical().number());
        assert!(!d114.canonical().is_inverted());
    }

    #[test]
    fn test_inverted_canonical() {
        // D047N (39 inverted) is on-air identical to D116 (78) normal
        let code = DcsCode::new(39, true).unwrap();
        let canon = code.canonical();
        assert_eq!(78, canon.number());
        assert!(!canon.is_inverted());

        // D023N has no normal-polarity twin and stays inverted
        let code = DcsCode::new(19, true).unwrap();
        assert_eq!(DcsCode::from_parts(19, true), code.canonical());

        // normal-polarity codes canonicalize within their class only
        let code = DcsCode::new(19, false).unwrap();
        assert_eq!(code, code.canonical());
    }

    #[test]
    fn test_new_rejects_nonstandard() {
        assert!(DcsCode::new(19, false).is_ok());
        assert_eq!(
            Err(InvalidCodeErr::NotStandard(20)),
            DcsCode::new(20, false)
        );
    }

    #[test]
    fn test_parse_and_display() {
        let code: DcsCode = "023".parse().unwrap();
        assert_eq!(19, code.number());
        assert!(!code.is_inverted());
        assert_eq!("D023", &format!("{}", code));

        let code: DcsCode = "D023N".parse().unwrap();
        assert_eq!(19, code.number());
        assert!(code.is_inverted());
        assert_eq!("D023N", &format!("{}", code));

        let code: DcsCode = " d754n ".parse().unwrap();
        assert_eq!(0o754, code.number());
        assert!(code.is_inverted());

        assert_eq!(Err(InvalidCodeErr::Malformed), "".parse::<DcsCode>());
        assert_eq!(Err(InvalidCodeErr::Malformed), "D08".parse::<DcsCode>());
        assert_eq!(Err(InvalidCodeErr::Malformed), "0233".parse::<DcsCode>());
        assert_eq!(Err(InvalidCodeErr::Malformed), "two".parse::<DcsCode>());
        assert_eq!(
            Err(InvalidCodeErr::NotStandard(0o024)),
            "024".parse::<DcsCode>()
        );
    }
}
