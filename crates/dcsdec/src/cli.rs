use clap::Parser;

/// Standard input filename
pub const STDIN_FILE: &str = "-";

const USAGE: &str = r#"
This program accepts raw PCM samples in signed 16-bit (i16) format, at the given sampling --rate, and gates them on the configured DCS --code. While the code is being received, samples pass through to standard output unchanged; otherwise silence is emitted.

The input must be FM discriminator audio with the sub-300 Hz band intact: after de-emphasis, before any voice high-pass filtering.

You can pipe in an audio file with sox

    sox input.wav -t raw -r 16k -e signed -b 16 -c 1 - \
        | dcsdec -r 16000 -c 023 > gated.raw

Codes are written in octal, with an optional N suffix for inverted polarity: 023, D023, 754N.
"#;

/// Top-level program arguments
#[derive(Parser, Clone, Debug)]
#[command(version)]
#[command(about, long_about = None)]
#[command(after_help = USAGE, after_long_help = USAGE)]
#[command(max_term_width = 100)]
pub struct Args {
    /// Verbosity level (-vvv for more)
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print nothing but gated samples
    #[arg(short, long)]
    pub quiet: bool,

    /// Sampling rate (Hz)
    ///
    /// Set to the sampling rate of your audio source. The rate must
    /// be at least 269 Hz; ordinary audio rates are all fine.
    #[arg(short, long, default_value_t = 16000)]
    pub rate: u32,

    /// Target DCS code (octal, optional N suffix)
    #[arg(short, long)]
    pub code: String,

    /// Squelch tail (milliseconds)
    ///
    /// How long the gate stays open after the code disappears.
    #[arg(short, long, default_value_t = 250.0)]
    pub tail_ms: f32,

    /// Input file (or "-" for stdin)
    ///
    /// The input must be one-channel (mono), signed 16-bit
    /// native-endian at --rate.
    #[arg(default_value = STDIN_FILE)]
    pub file: String,
}
