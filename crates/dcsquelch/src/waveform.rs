//! DCS signaling parameters

/// DCS bit rate (Bd)
pub const BAUD_HZ: f64 = 134.4;

/// Upper edge of the DCS sub-audio band (Hz)
///
/// The code tone occupies the spectrum below roughly 300 Hz; the
/// decoder's low-pass cutoff sits here.
pub const TONE_CUTOFF_HZ: f32 = 300.0;

/// DCS bit period at the given sampling rate, in fractional samples
pub fn samples_per_bit(input_rate: u32) -> f64 {
    f64::from(input_rate) / BAUD_HZ
}

/// Bits of the repeating frame for `code`, in transmission order
///
/// `msb_first` selects which end of the 23-bit codeword is sent
/// first; both orderings occur in the wild.
#[cfg(test)]
pub fn code_bits(code: u16, msb_first: bool, count: usize) -> Vec<bool> {
    let codeword = crate::golay::encode(code);
    (0..count)
        .map(|i| {
            let k = (i % 23) as u32;
            let shift = if msb_first { 22 - k } else { k };
            codeword >> shift & 1 != 0
        })
        .collect()
}

/// NRZ-modulate a bit sequence at ±1.0
///
/// Produces baseband samples at `input_rate`, one bit per fractional
/// bit period. Set `invert` for "N"-suffix polarity.
#[cfg(test)]
pub fn modulate(bits: &[bool], input_rate: u32, invert: bool) -> Vec<f32> {
    let period = samples_per_bit(input_rate);
    let total = (bits.len() as f64 * period) as usize;
    (0..total)
        .map(|n| {
            let idx = usize::min((n as f64 / period) as usize, bits.len() - 1);
            let sample = if bits[idx] { 1.0f32 } else { -1.0f32 };
            if invert {
                -sample
            } else {
                sample
            }
        })
        .collect()
}
