//! Builds a DCS squelch gate

use crate::codes::DcsCode;
use crate::decoder::InvalidRateErr;
use crate::squelch::DcsSquelch;

/// Builds a [`DcsSquelch`]
///
/// The only mandatory parameters are the input sampling rate and
/// the target code; everything else has a sensible default. The
/// builder API is stable, but the default values are not and may be
/// revised in any minor release.
///
/// ```
/// use dcsquelch::{DcsCode, DcsSquelchBuilder};
///
/// let target: DcsCode = "023".parse().unwrap();
/// let gate = DcsSquelchBuilder::new(16000, target)
///     .with_tail_ms(400.0)
///     .build()
///     .unwrap();
/// assert_eq!(16000, gate.input_rate());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DcsSquelchBuilder {
    input_rate: u32,
    target: DcsCode,
    tail_ms: f32,
}

impl DcsSquelchBuilder {
    /// New builder with default options
    ///
    /// `input_rate` is the audio sampling rate in Hz. It must
    /// provide more than two samples per 134.4 Bd bit (i.e. be at
    /// least 269 Hz), or [`build()`](DcsSquelchBuilder::build) will
    /// fail. `target` is the code that opens the gate.
    pub fn new(input_rate: u32, target: DcsCode) -> Self {
        Self {
            input_rate,
            target,
            tail_ms: 250.0,
        }
    }

    /// Squelch tail (milliseconds)
    ///
    /// How long the gate stays open after the target code
    /// disappears. Too short a tail chops the end of
    /// transmissions; too long a tail passes noise after them.
    /// Negative values are clamped to zero. The default is 250 ms.
    pub fn with_tail_ms(&mut self, tail_ms: f32) -> &mut Self {
        self.tail_ms = f32::max(tail_ms, 0.0);
        self
    }

    /// Build the squelch gate
    ///
    /// Once built, the gate is immediately ready to process
    /// samples. It starts closed.
    pub fn build(&self) -> Result<DcsSquelch, InvalidRateErr> {
        DcsSquelch::new(self.input_rate, self.target, self.tail_ms)
    }
}
