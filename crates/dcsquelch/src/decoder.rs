//! Streaming DCS decoder
//!
//! The [`DcsDecoder`] consumes FM-demodulated audio samples and
//! emits a [`DcsCode`] event for every bit period in which a code
//! is confirmed on the air. Per sample, the pipeline is:
//!
//! 1. Single-pole low-pass at 300 Hz isolates the sub-audio tone.
//! 2. The bit clock integrates the filtered signal and makes one
//!    hard decision per 134.4 Bd bit period, steered by zero
//!    crossings.
//! 3. Each new bit shifts into two 23-bit windows, one per possible
//!    transmission bit order. Both windows and both polarities are
//!    Golay-corrected and classified against the standard code
//!    plan, in a fixed order, first match wins.
//! 4. A decoded code must repeat on consecutive bits before the
//!    first event is emitted; after that, every further bit with
//!    the same code emits again, giving downstream consumers a
//!    keepalive at the bit rate. Bits without a decode wind the
//!    confirmation back down.
//!
//! Events accumulate in an internal queue; drain it with
//! [`events()`](DcsDecoder::events) after each call to
//! [`process()`](DcsDecoder::process).

use std::collections::vec_deque::{Drain, VecDeque};

use thiserror::Error;

#[cfg(not(test))]
use log::debug;

#[cfg(test)]
use std::println as debug;

use crate::bitsync::BitSync;
use crate::codes::{classify, DcsCode};
use crate::filter::LowPass;
use crate::golay;
use crate::waveform;

/// Sampling rate too low for the DCS bit rate
///
/// Bit recovery needs more than two samples per 134.4 Bd bit,
/// so rates of 268 Hz and below are rejected.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
#[error("input rate {0} Hz is too low to recover the 134.4 Bd DCS bitstream")]
pub struct InvalidRateErr(pub u32);

/// Streaming DCS decoder
///
/// Create one per audio session with the fixed input sampling rate,
/// feed it sample batches with [`process()`](DcsDecoder::process),
/// and drain confirmed detections from
/// [`events()`](DcsDecoder::events). See the
/// [module documentation](self) for the signal path.
///
/// ```
/// use dcsquelch::DcsDecoder;
///
/// let mut decoder = DcsDecoder::new(16000).unwrap();
/// decoder.process(&[0.0f32; 512]);
/// assert_eq!(0, decoder.events().count());
/// ```
///
/// A decoder is exclusively owned; processing never blocks and
/// never fails. All allocation happens at construction.
#[derive(Clone, Debug)]
pub struct DcsDecoder {
    lowpass: LowPass,
    bitsync: BitSync,

    // sliding windows over the last 23 bits.
    // window_a: newest bit enters at the MSB
    // window_b: newest bit enters at the LSB
    // Keeping both accommodates the two transmission bit orders
    // seen across vendors.
    window_a: u32,
    window_b: u32,

    confirm: Confirmer,
    events: VecDeque<DcsCode>,

    input_rate: u32,
    sample_counter: u64,
}

impl DcsDecoder {
    /// New decoder for audio sampled at `input_rate` Hz
    ///
    /// The input must be FM discriminator output after de-emphasis
    /// and before any voice high-pass filtering, so that the
    /// sub-300 Hz code tone is still present. Rates that provide
    /// fewer than two samples per bit are rejected.
    pub fn new(input_rate: u32) -> Result<Self, InvalidRateErr> {
        let samples_per_bit = waveform::samples_per_bit(input_rate);
        if samples_per_bit <= 2.0 {
            return Err(InvalidRateErr(input_rate));
        }
        Ok(Self {
            lowpass: LowPass::new(waveform::TONE_CUTOFF_HZ, input_rate),
            bitsync: BitSync::new(samples_per_bit),
            window_a: 0,
            window_b: 0,
            confirm: Confirmer::new(),
            events: VecDeque::new(),
            input_rate,
            sample_counter: 0,
        })
    }

    /// Input sampling rate (Hz)
    pub fn input_rate(&self) -> u32 {
        self.input_rate
    }

    /// Lifetime count of processed input samples
    pub fn sample_counter(&self) -> u64 {
        self.sample_counter
    }

    /// Reset all DSP state to zero initial conditions
    ///
    /// Pending events are discarded.
    pub fn reset(&mut self) {
        self.lowpass.reset();
        self.bitsync.reset();
        self.window_a = 0;
        self.window_b = 0;
        self.confirm.reset();
        self.events.clear();
        self.sample_counter = 0;
    }

    /// Process a batch of audio samples
    ///
    /// Consumes the whole batch, appending any confirmed detections
    /// to the event queue in order. Never fails: non-finite or
    /// saturated samples degrade detection but cannot crash or
    /// poison the filter state.
    pub fn process(&mut self, samples: &[f32]) {
        for &sample in samples {
            let filtered = self.lowpass.input(sample);
            self.sample_counter = self.sample_counter.wrapping_add(1);

            if let Some(bit) = self.bitsync.input(filtered) {
                self.shift_bit(bit);
                let decode = self.try_windows();
                if let Some(event) = self.confirm.input(decode) {
                    if self.confirm.count() == 2 {
                        debug!(
                            "decoder: confirmed {} at sample {}",
                            event, self.sample_counter
                        );
                    }
                    self.events.push_back(event);
                }
            }
        }
    }

    /// Drain pending detection events, oldest first
    ///
    /// One event is queued for every bit period in which a code was
    /// confirmed, so a held transmission yields a steady stream of
    /// identical events at 134.4 Hz. The queue grows until drained;
    /// call this after every [`process()`](DcsDecoder::process).
    pub fn events(&mut self) -> Drain<'_, DcsCode> {
        self.events.drain(..)
    }

    // Shift one bit into both sliding windows
    fn shift_bit(&mut self, bit: bool) {
        let bit = u32::from(bit);
        self.window_a = (self.window_a >> 1) | (bit << 22);
        self.window_b = ((self.window_b << 1) | bit) & golay::WORD_MASK;
    }

    // Attempt to decode both windows at both polarities, in a fixed
    // order, stopping at the first success
    fn try_windows(&self) -> Option<DcsCode> {
        try_word(self.window_a, false)
            .or_else(|| try_word(!self.window_a & golay::WORD_MASK, true))
            .or_else(|| try_word(self.window_b, false))
            .or_else(|| try_word(!self.window_b & golay::WORD_MASK, true))
    }
}

// Golay-correct one 23-bit window and classify the result
//
// Succeeds when the corrected word is a rotation of a standard
// code's codeword; the event carries the class representative.
fn try_word(word: u32, inverted: bool) -> Option<DcsCode> {
    classify(golay::correct(word)).map(|number| DcsCode::from_parts(number, inverted))
}

// Consecutive-decode confirmation
//
// A code must be decoded on two consecutive bits before anything is
// emitted; from then on, every bit that decodes to the same code
// emits again. A bit without a decode decrements the counter (to a
// floor of zero) rather than resetting it, so brief dropouts do not
// force a full reconfirmation.
#[derive(Clone, Debug)]
struct Confirmer {
    last: Option<DcsCode>,
    count: u32,
}

impl Confirmer {
    fn new() -> Self {
        Self {
            last: None,
            count: 0,
        }
    }

    fn reset(&mut self) {
        self.last = None;
        self.count = 0;
    }

    fn count(&self) -> u32 {
        self.count
    }

    // Advance by one bit period; `decode` is this bit's decode
    // outcome. Returns the event to emit, if any.
    fn input(&mut self, decode: Option<DcsCode>) -> Option<DcsCode> {
        match decode {
            Some(code) if self.last == Some(code) => {
                self.count = self.count.saturating_add(1);
                if self.count >= 2 {
                    return Some(code);
                }
            }
            Some(code) => {
                self.last = Some(code);
                self.count = 1;
            }
            None => {
                self.count = self.count.saturating_sub(1);
            }
        }
        None
    }
}
