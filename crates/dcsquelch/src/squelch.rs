//! DCS-gated audio squelch
//!
//! The [`DcsSquelch`] owns a [`DcsDecoder`] and gates audio on its
//! detections: samples pass through unchanged while the configured
//! code is on the air (and for a tail period afterwards), and are
//! replaced with silence otherwise.

#[cfg(not(test))]
use log::debug;

#[cfg(test)]
use std::println as debug;

use crate::codes::DcsCode;
use crate::decoder::{DcsDecoder, InvalidRateErr};

/// Squelch gate keyed by a DCS code
///
/// For each batch, the decoder first consumes the entire input,
/// then the gate runs sample-by-sample. A matching detection
/// anywhere in a batch therefore arms the gate for that whole
/// batch; this slight anticipatory bias avoids clipping the first
/// syllable when the squelch opens.
///
/// Matching is by canonical code identity
/// ([`DcsCode::canonical()`]): targets that are rotation aliases of
/// the same transmission all open the gate.
///
/// ```
/// use dcsquelch::{DcsCode, DcsSquelch};
///
/// let target: DcsCode = "023".parse().unwrap();
/// let mut gate = DcsSquelch::new(16000, target, 250.0).unwrap();
///
/// let input = vec![0.25f32; 512];
/// let mut output = vec![0.0f32; 512];
/// gate.process(&input, &mut output);
///
/// // no DCS tone in that input: all output is silence
/// assert!(!gate.is_open());
/// assert!(output.iter().all(|&sample| sample == 0.0));
/// ```
#[derive(Clone, Debug)]
pub struct DcsSquelch {
    decoder: DcsDecoder,

    // configured target and its canonical identity for matching
    target: DcsCode,
    target_canonical: DcsCode,

    open: bool,

    // remaining tail, in samples
    tail: u32,

    // tail restart value, in samples
    tail_max: u32,
}

impl DcsSquelch {
    /// New squelch gate
    ///
    /// `input_rate` is the audio sampling rate in Hz, `target` the
    /// code that opens the gate, and `tail_ms` the grace period the
    /// gate stays open after the code disappears. The gate starts
    /// closed.
    pub fn new(input_rate: u32, target: DcsCode, tail_ms: f32) -> Result<Self, InvalidRateErr> {
        let decoder = DcsDecoder::new(input_rate)?;
        let tail_max = (input_rate as f32 * f32::max(tail_ms, 0.0) / 1000.0) as u32;
        Ok(Self {
            decoder,
            target,
            target_canonical: target.canonical(),
            open: false,
            tail: 0,
            tail_max,
        })
    }

    /// Process one batch of audio
    ///
    /// Copies `input` to `output`, muting the stretches where the
    /// gate is closed. Both slices must be the same length; this
    /// method panics if they differ.
    pub fn process(&mut self, input: &[f32], output: &mut [f32]) {
        assert_eq!(input.len(), output.len());

        // decode pass first: any matching code in this batch arms
        // the gate before a single sample is gated
        self.decoder.process(input);
        for event in self.decoder.events() {
            if event == self.target_canonical {
                if !self.open {
                    debug!("squelch: {} detected, opening", self.target);
                }
                self.open = true;
                self.tail = self.tail_max;
            }
        }

        for (out, sample) in output.iter_mut().zip(input.iter()) {
            if self.open {
                *out = *sample;
                if self.tail > 0 {
                    self.tail -= 1;
                    if self.tail == 0 {
                        self.open = false;
                        debug!("squelch: tail expired, closing");
                    }
                }
            } else {
                *out = 0.0f32;
            }
        }
    }

    /// Replace the target code
    ///
    /// The gate closes immediately and stays closed until the new
    /// target is detected.
    pub fn set_target(&mut self, target: DcsCode) {
        debug!("squelch: target changed to {}", target);
        self.target = target;
        self.target_canonical = target.canonical();
        self.open = false;
        self.tail = 0;
    }

    /// Configured target code
    pub fn target(&self) -> DcsCode {
        self.target
    }

    /// Is the gate currently passing audio?
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Input sampling rate (Hz)
    pub fn input_rate(&self) -> u32 {
        self.decoder.input_rate()
    }
}
