//! `postings-roundtrip`: reads a list of integers from a text file, runs it
//! through a codec, writes the encoded words to a file, decodes them back and
//! verifies the result. With `--analyze`, compares the encoded size of every
//! codec over a file of posting lists instead.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use log::LevelFilter;

use postings_codec::io::{format_sequence, read_integers_from_path, read_lists_from_path};
use postings_codec::{
    CodecRegistry, FileArtifact, OutputSizing, RoundTripConfig, RoundTripDriver,
};

/// Round-trips a sorted integer list through a compression codec.
#[derive(Parser, Debug)]
#[command(name = "postings-roundtrip")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Text file of whitespace/newline-delimited unsigned integers
    #[arg(required_unless_present = "list")]
    input: Option<PathBuf>,

    /// Where to write the encoded words (raw, native-endian, no header)
    #[arg(required_unless_present_any = ["list", "analyze"])]
    output: Option<PathBuf>,

    /// Codec name (overrides the config file)
    #[arg(short, long)]
    codec: Option<String>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Size the encode buffer as N + MARGIN words instead of the codec's bound
    #[arg(long, value_name = "MARGIN")]
    margin: Option<usize>,

    /// List the registered codecs and exit
    #[arg(long)]
    list: bool,

    /// Treat INPUT as one posting list per line and compare every codec's sizes
    #[arg(long, conflicts_with = "list")]
    analyze: bool,

    /// Print the report as JSON instead of the sequences
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });
    builder.parse_default_env();

    // Custom formatter: just print the level and message
    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(buf, "[{}] {}", record.level(), record.args())
    });

    let _ = builder.try_init();
}

fn load_config(cli: &Cli) -> Result<RoundTripConfig> {
    let mut config = match &cli.config {
        Some(path) => RoundTripConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RoundTripConfig::default(),
    };
    if let Some(codec) = &cli.codec {
        config.codec = codec.clone();
    }
    if let Some(margin) = cli.margin {
        config.output_sizing = OutputSizing::FixedMargin;
        config.margin_words = margin;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let registry = Arc::new(CodecRegistry::from_config(&config)?);

    if cli.list {
        for descriptor in registry.descriptors() {
            let note = if descriptor.mutates_input() {
                " (encodes in place)"
            } else {
                ""
            };
            println!("{}{}", descriptor.name(), note);
        }
        return Ok(());
    }

    if cli.analyze {
        let Some(input_path) = &cli.input else {
            anyhow::bail!("INPUT is required with --analyze");
        };
        let lists = read_lists_from_path(input_path)
            .with_context(|| format!("reading posting lists from {}", input_path.display()))?;
        let report = postings_codec::analyze(&registry, &lists).context("analysis failed")?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{report}");
        }
        return Ok(());
    }

    let (Some(input_path), Some(output_path)) = (&cli.input, &cli.output) else {
        anyhow::bail!("INPUT and OUTPUT are required unless --list is given");
    };

    let data = read_integers_from_path(input_path)
        .with_context(|| format!("reading integers from {}", input_path.display()))?;
    if !cli.json {
        println!("Retrieved data:{}", format_sequence(&data));
    }

    let mut driver = RoundTripDriver::new(registry, Arc::new(config));
    let mut store = FileArtifact::new(output_path);
    let codec_name = driver.config().codec.clone();
    let report = driver
        .run(data, &mut store)
        .with_context(|| format!("{} codec '{}'", "round trip failed:".red().bold(), codec_name))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Decoded data:{}", format_sequence(&report.recovered));
        println!(
            "{} {} integers -> {} words ({:.2} bits/int) with '{}'",
            "ok:".green().bold(),
            report.input_len,
            report.encoded_words,
            report.bits_per_integer,
            report.codec
        );
    }
    Ok(())
}
