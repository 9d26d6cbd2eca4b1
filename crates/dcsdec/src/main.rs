use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::Context;
use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt};
use clap::Parser;
use log::{info, LevelFilter};

use dcsquelch::{DcsCode, DcsSquelch, DcsSquelchBuilder};

mod cli;

use cli::{Args, STDIN_FILE};

/// Samples per processing batch
const CHUNK: usize = 1024;

/// Full-scale value for i16 ↔ f32 conversion
const SCALE: f32 = 32767.0;

fn main() -> anyhow::Result<()> {
    // Parse options and start logging
    let args = Args::parse();
    log_setup(&args);

    // create the squelch gate
    let target: DcsCode = args
        .code
        .parse()
        .with_context(|| format!("invalid --code \"{}\"", args.code))?;
    let mut gate = DcsSquelchBuilder::new(args.rate, target)
        .with_tail_ms(args.tail_ms)
        .build()
        .context("invalid --rate")?;

    info!(
        "dcsdec: target {}, tail {} ms, rate {} Hz",
        target, args.tail_ms, args.rate
    );

    // file setup: locks stdin in case we need it
    let input = file_setup(&args, io::stdin().lock())?;

    run(&mut gate, input, io::stdout().lock())
}

// Configure the log facility
//
// --quiet suppresses logging entirely, and a RUST_LOG environment
// variable overrides the -v flags. Otherwise each -v raises the
// level one notch, starting from warnings-only.
fn log_setup(args: &Args) {
    if args.quiet {
        return;
    }
    if std::env::var_os("RUST_LOG").is_some() {
        pretty_env_logger::init();
        return;
    }

    const LADDER: [LevelFilter; 4] = [
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];
    let level = LADDER[usize::min(args.verbose as usize, LADDER.len() - 1)];

    let mut builder = pretty_env_logger::formatted_builder();
    for module in ["dcsquelch", "dcsdec"] {
        builder.filter_module(module, level);
    }
    builder.init();
}

// Open the input source: stdin for "-", a file otherwise
fn file_setup(args: &Args, stdin: io::StdinLock<'static>) -> anyhow::Result<Box<dyn BufRead>> {
    if args.file == STDIN_FILE {
        Ok(Box::new(stdin))
    } else {
        let file =
            File::open(&args.file).with_context(|| format!("unable to open \"{}\"", args.file))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

// Pump samples: read i16 PCM, gate, write i16 PCM
//
// Reads until the input is exhausted. Gate transitions are logged
// at info level.
fn run<R, W>(gate: &mut DcsSquelch, mut input: R, output: W) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut writer = io::BufWriter::new(output);
    let mut inbuf: Vec<f32> = Vec::with_capacity(CHUNK);
    let mut outbuf = vec![0.0f32; CHUNK];
    let mut was_open = false;

    loop {
        inbuf.clear();
        while inbuf.len() < CHUNK {
            match input.read_i16::<NativeEndian>() {
                Ok(sample) => inbuf.push(f32::from(sample) / SCALE),
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(err) => return Err(err).context("error reading input samples"),
            }
        }
        if inbuf.is_empty() {
            break;
        }

        let gated = &mut outbuf[..inbuf.len()];
        gate.process(&inbuf, gated);

        if gate.is_open() != was_open {
            was_open = gate.is_open();
            if was_open {
                info!("squelch open: {}", gate.target());
            } else {
                info!("squelch closed");
            }
        }

        for &sample in gated.iter() {
            writer
                .write_i16::<NativeEndian>((sample * SCALE) as i16)
                .context("error writing output samples")?;
        }
    }

    writer.flush().context("error writing output samples")
}
