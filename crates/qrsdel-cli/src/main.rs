use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use qrsdel_lib::{
    characterize::{characterize_window, Record},
    io::{csv as csv_io, text as text_io, wfdb as wfdb_io},
    Delineator, LeadMap, QrsTag, ScaleConfig,
};
use serde::Serialize;
use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

#[derive(Parser)]
#[command(
    name = "qrsdel",
    version,
    about = "Multi-lead QRS delineation of annotated ECG records"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Delineate every annotated beat of a record, one JSON object per line
    Delineate {
        /// Multi-lead CSV record, one column per lead
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        wfdb_header: Option<PathBuf>,
        /// Beat annotations: MIT annotation file (.atr) or newline-delimited indices
        #[arg(long)]
        annotations: PathBuf,
        /// Sampling frequency, overrides the record and the config file
        #[arg(long)]
        fs: Option<f64>,
        /// ADC gain (units per mV), overrides the record and the config file
        #[arg(long)]
        adc_gain: Option<f64>,
        /// TOML file with the acquisition and drawing scales
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the delineation thresholds derived from the active configuration
    Constants {
        #[arg(long)]
        fs: Option<f64>,
        #[arg(long)]
        adc_gain: Option<f64>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Delineation of one beat, in absolute sample positions.
#[derive(Serialize)]
struct BeatRecord {
    beat: usize,
    start: usize,
    peak: usize,
    end: usize,
    paced: bool,
    shape: LeadMap<QrsTag>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Delineate {
            input,
            wfdb_header,
            annotations,
            fs,
            adc_gain,
            config,
            out,
        } => cmd_delineate(
            input.as_deref(),
            wfdb_header.as_deref(),
            &annotations,
            fs,
            adc_gain,
            config.as_deref(),
            out.as_deref(),
        )?,
        Commands::Constants {
            fs,
            adc_gain,
            config,
        } => cmd_constants(fs, adc_gain, config.as_deref())?,
    }
    Ok(())
}

fn load_scale(path: Option<&Path>) -> Result<ScaleConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
        }
        None => Ok(ScaleConfig::default()),
    }
}

fn load_record(
    input: Option<&Path>,
    wfdb_header: Option<&Path>,
    fs: Option<f64>,
    scale: &ScaleConfig,
) -> Result<Record> {
    match (input, wfdb_header) {
        (Some(_), Some(_)) => Err(anyhow!("use either --input or --wfdb-header, not both")),
        (Some(path), None) => csv_io::load_csv_record(path, fs.unwrap_or(scale.sampling_freq)),
        (None, Some(header)) => wfdb_io::load_wfdb_record(header),
        (None, None) => Err(anyhow!("a record is required (--input or --wfdb-header)")),
    }
}

fn load_beats(path: &Path) -> Result<Vec<usize>> {
    let is_mit = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("atr"));
    if is_mit {
        wfdb_io::load_wfdb_beats(path)
    } else {
        text_io::read_beat_indices(path)
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_delineate(
    input: Option<&Path>,
    wfdb_header: Option<&Path>,
    annotations: &Path,
    fs: Option<f64>,
    adc_gain: Option<f64>,
    config: Option<&Path>,
    out: Option<&Path>,
) -> Result<()> {
    let mut scale = load_scale(config)?;
    let record = load_record(input, wfdb_header, fs, &scale)?;
    scale.sampling_freq = fs.unwrap_or(record.fs);
    if let Some(gain) = adc_gain.or(record.adc_gain) {
        scale.adc_gain = gain;
    }
    let beats = load_beats(annotations)?;
    info!(
        "{} leads, {} samples, {} beats at {} Hz",
        record.leads.len(),
        record.len(),
        beats.len(),
        scale.sampling_freq
    );

    let delineator = Delineator::new(scale);
    let mut writer: Box<dyn Write> = match out {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    let mut delineated = 0;
    for &beat in &beats {
        let Some(window) = characterize_window(&record, beat, delineator.constants()) else {
            warn!("beat at {beat} has no complete analysis window");
            continue;
        };
        let qrs = match delineator.delineate(&window.leads) {
            Ok(qrs) => qrs,
            Err(err) => {
                warn!("beat at {beat} not delineated: {err}");
                continue;
            }
        };
        let mut shape = LeadMap::new();
        for (lead, s) in qrs.shape.iter() {
            shape.insert(lead, s.tag);
        }
        let rec = BeatRecord {
            beat,
            start: window.offset + qrs.start,
            peak: window.offset + qrs.peak,
            end: window.offset + qrs.end,
            paced: qrs.paced,
            shape,
        };
        writeln!(writer, "{}", serde_json::to_string(&rec)?)?;
        delineated += 1;
    }
    writer.flush()?;
    info!("{delineated} of {} beats delineated", beats.len());
    Ok(())
}

fn cmd_constants(fs: Option<f64>, adc_gain: Option<f64>, config: Option<&Path>) -> Result<()> {
    let mut scale = load_scale(config)?;
    if let Some(fs) = fs {
        scale.sampling_freq = fs;
    }
    if let Some(gain) = adc_gain {
        scale.adc_gain = gain;
    }
    let delineator = Delineator::new(scale);
    println!("{}", serde_json::to_string(delineator.constants())?);
    Ok(())
}
