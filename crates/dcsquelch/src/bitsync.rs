//! Bit clock recovery and bit decisions
//!
//! DCS runs at 134.4 Bd, far below any practical audio sampling
//! rate, so there are plenty of samples per bit and no need for
//! interpolation. The [`BitSync`] integrates the filtered signal
//! over each bit period and thresholds the sum: an
//! integrate-and-dump detector with a free-running fractional bit
//! clock.
//!
//! Zero crossings of the filtered signal nudge the clock phase by
//! ±5% of a bit period, steering the integration windows onto the
//! received bit timing. A signal with no crossings at all (pure DC)
//! leaves the clock free-running, which is fine: a DC input carries
//! no information. A sample of exactly 0.0 counts as non-negative
//! for the crossing comparison.

/// Bit timing recovery for the DCS bitstream
///
/// Feed filtered samples to [`input()`](BitSync::input); roughly
/// every `samples_per_bit` samples it emits one hard bit decision.
///
/// The clock phase is kept in double precision so that rounding
/// does not accumulate over arbitrarily long runs.
#[derive(Clone, Debug)]
pub struct BitSync {
    // fractional samples per bit, fs / 134.4
    samples_per_bit: f64,

    // fractional sample position within the current bit period
    phase: f64,

    // integrated signal over the current bit period
    accum: f32,

    // previous sample, for zero-crossing detection
    prev: f32,
}

/// Phase correction per zero crossing, as a fraction of a bit period
const PHASE_NUDGE: f64 = 0.05;

impl BitSync {
    /// New bit clock
    ///
    /// `samples_per_bit` is the (fractional) number of input samples
    /// per 134.4 Bd bit and must exceed 2.
    pub fn new(samples_per_bit: f64) -> Self {
        Self {
            samples_per_bit,
            phase: 0.0,
            accum: 0.0f32,
            prev: 0.0f32,
        }
    }

    /// Reset to zero initial conditions
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.accum = 0.0f32;
        self.prev = 0.0f32;
    }

    /// Track one sample
    ///
    /// Accepts one low-pass-filtered sample. Returns a hard bit
    /// decision when a bit period ends, or `None` mid-bit.
    #[inline]
    pub fn input(&mut self, sample: f32) -> Option<bool> {
        // a crossing before mid-bit means the clock is early; one
        // after mid-bit means it is late
        if (self.prev < 0.0f32) != (sample < 0.0f32) {
            if self.phase < self.samples_per_bit * 0.5 {
                self.phase += self.samples_per_bit * PHASE_NUDGE;
            } else {
                self.phase -= self.samples_per_bit * PHASE_NUDGE;
            }
        }
        self.prev = sample;

        self.accum += sample;
        self.phase += 1.0;

        if self.phase >= self.samples_per_bit {
            self.phase -= self.samples_per_bit;
            let bit = self.accum > 0.0f32;
            self.accum = 0.0f32;
            Some(bit)
        } else {
            None
        }
    }
}
