//! # dcsquelch: DCS decoding and code squelch
//!
//! This crate decodes
//! [Digital Coded Squelch](https://en.wikipedia.org/wiki/Continuous_Tone-Coded_Squelch_System#Digital-Coded_Squelch)
//! (DCS) signaling in FM-demodulated audio and gates audio on it.
//! DCS is a continuous 134.4 Bd NRZ bitstream below ~300 Hz in
//! which every 23-bit frame is a systematic Golay (23,12) codeword
//! carrying a 9-bit code number.
//!
//! ## Example
//!
//! You will first need FM discriminator audio: the demodulated
//! signal *after* de-emphasis but *before* any voice high-pass
//! filtering or decimation, so that the sub-300 Hz code tone is
//! still present. Obtaining that audio, whether from a radio's
//! discriminator tap or a software-defined radio, is beyond the
//! scope of this crate.
//!
//! ```
//! use dcsquelch::{DcsCode, DcsSquelchBuilder};
//!
//! // the code your station listens for, in the usual octal notation
//! let target: DcsCode = "D023".parse().expect("valid DCS code");
//!
//! let mut gate = DcsSquelchBuilder::new(16000, target)
//!     .with_tail_ms(250.0)     // hold-open time after the code stops
//!     .build()
//!     .expect("sampling rate too low");
//!
//! // per audio batch: input and output are the same length
//! let input = vec![0.0f32; 1024];
//! let mut output = vec![0.0f32; 1024];
//! gate.process(&input, &mut output);
//!
//! if gate.is_open() {
//!     // the target code is on the air; output carries the audio
//! }
//! ```
//!
//! The gate copies input to output while the target code is being
//! received (plus the configured tail) and emits silence otherwise.
//! For access to the raw detections (every code heard, with
//! polarity) use [`DcsDecoder`] directly and drain
//! [`events()`](DcsDecoder::events) after each `process()` call.
//!
//! ## Codes, polarity, and aliases
//!
//! Users write DCS codes in octal with an optional `N` suffix for
//! inverted polarity: `D023`, `D754N`. [`DcsCode`] parses and
//! validates this notation against the 105-code EIA/TIA-603
//! standard plan.
//!
//! Because the transmission is a codeword repeated end-to-end and
//! the Golay code is cyclic, some codes are indistinguishable on
//! the air: rotations of one another, or inversions whose
//! complement lands on another code. Detections are reported under
//! a canonical identity and the gate matches canonically, so
//! targeting any alias of a transmission opens the gate. See
//! [`DcsCode::canonical()`].
//!
//! ## Concurrency
//!
//! A decoder/gate pair is single-threaded and exclusively owned by
//! the caller of `process`. Distinct instances are independent and
//! may run on distinct threads without coordination. No heap
//! allocation occurs after construction; processing never blocks.

mod bitsync;
mod builder;
mod codes;
mod decoder;
mod filter;
mod golay;
mod squelch;
mod waveform;

pub use builder::DcsSquelchBuilder;
pub use codes::{is_standard, DcsCode, InvalidCodeErr};
pub use decoder::{DcsDecoder, InvalidRateErr};
pub use squelch::DcsSquelch;
