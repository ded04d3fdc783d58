//! ninecrunch CLI - PNG cruncher for UI resources
//!
//! Decodes each input PNG, crunches it to the most compact lossless color
//! mode, and writes the result. Files named `*.9.png` are treated as
//! 9-patches: their guide frame becomes `npTc`/`npLb` chunks.

use std::fmt;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, ValueEnum};
use log::{debug, info};

use ninecrunch::color::{from_rgba, pack_rgba8};
use ninecrunch::{
    crunch_with_scratch, is_nine_patch_name, ColorMode, CrunchOptions, Error, PixelBuffer,
    Scratch,
};

/// Crunch PNG images (and 9-patches) into their most compact lossless form.
#[derive(Parser, Debug)]
#[command(name = "ninecrunch")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PNG files
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Output file path (single input only)
    #[arg(short, long, value_name = "OUTPUT", conflicts_with = "out_dir")]
    output: Option<PathBuf>,

    /// Directory to write crunched files into, keeping their names
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Deflate level (0-9, higher = smaller file); overrides the preset
    #[arg(short = 'c', long, value_parser = clap::value_parser!(u8).range(0..=9))]
    compression: Option<u8>,

    /// Compression preset
    #[arg(long, value_enum, default_value = "max")]
    preset: PresetArg,

    /// Treat every input as a 9-patch regardless of its name
    #[arg(long)]
    nine_patch: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    /// Level 1
    Fast,
    /// Level 6
    Balanced,
    /// Level 9
    Max,
}

impl PresetArg {
    fn to_options(self) -> CrunchOptions {
        match self {
            PresetArg::Fast => CrunchOptions::fast(),
            PresetArg::Balanced => CrunchOptions::balanced(),
            PresetArg::Max => CrunchOptions::max_compression(),
        }
    }
}

/// One input and where its output goes.
#[derive(Debug)]
struct Job {
    input: PathBuf,
    output: PathBuf,
    nine_patch: bool,
}

/// A successfully crunched file.
#[derive(Debug)]
struct Outcome {
    color_mode: ColorMode,
    input_size: u64,
    output_size: u64,
}

/// A failed input, printed as `<input>: <message>`.
#[derive(Debug)]
struct Failure {
    input: PathBuf,
    message: String,
}

impl Failure {
    fn new(input: &Path, err: impl fmt::Display) -> Self {
        Self {
            input: input.to_path_buf(),
            message: err.to_string(),
        }
    }

    fn from_crunch(input: &Path, err: Error) -> Self {
        match err {
            // Already carries the image name; keep only the located cause.
            Error::NinePatch { error, .. } => Self::new(input, error),
            other => Self::new(input, other),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.input.display(), self.message)
    }
}

/// Decoded image as packed ARGB pixels.
struct DecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

/// Decode a PNG file, expanding every color type to 8-bit ARGB.
fn decode_png(path: &Path) -> Result<DecodedImage, Box<dyn std::error::Error + Send + Sync>> {
    let file = BufReader::new(File::open(path)?);
    let mut decoder = png::Decoder::new(file);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut bytes = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut bytes)?;
    bytes.truncate(info.buffer_size());

    let pixels = match info.color_type {
        png::ColorType::Grayscale => bytes.iter().map(|&g| from_rgba([g, g, g, 0xFF])).collect(),
        png::ColorType::GrayscaleAlpha => bytes
            .chunks_exact(2)
            .map(|p| from_rgba([p[0], p[0], p[0], p[1]]))
            .collect(),
        png::ColorType::Rgb => bytes
            .chunks_exact(3)
            .map(|p| from_rgba([p[0], p[1], p[2], 0xFF]))
            .collect(),
        png::ColorType::Rgba => pack_rgba8(&bytes),
        png::ColorType::Indexed => return Err("indexed PNG was not expanded".into()),
    };

    Ok(DecodedImage {
        width: info.width,
        height: info.height,
        pixels,
    })
}

fn crunch_file(
    scratch: &mut Scratch,
    job: &Job,
    options: &CrunchOptions,
) -> Result<Outcome, Failure> {
    let start = Instant::now();
    let decoded = decode_png(&job.input).map_err(|e| Failure::new(&job.input, e))?;
    let image = PixelBuffer::new(&decoded.pixels, decoded.width, decoded.height)
        .map_err(|e| Failure::from_crunch(&job.input, e))?;

    let name = job.input.display().to_string();
    let crunched = crunch_with_scratch(scratch, &name, &image, job.nine_patch, options)
        .map_err(|e| Failure::from_crunch(&job.input, e))?;

    let png_bytes = crunched.to_png();
    fs::write(&job.output, &png_bytes).map_err(|e| Failure::new(&job.output, e))?;

    let input_size = fs::metadata(&job.input)
        .map(|m| m.len())
        .unwrap_or_default();
    debug!(
        "{}: {}x{} {:?}, nine-patch={}, {:.2?}",
        name,
        decoded.width,
        decoded.height,
        crunched.color_mode(),
        job.nine_patch,
        start.elapsed()
    );

    Ok(Outcome {
        color_mode: crunched.color_mode(),
        input_size,
        output_size: png_bytes.len() as u64,
    })
}

#[cfg(feature = "parallel")]
fn crunch_all(jobs: &[Job], options: &CrunchOptions) -> Vec<Result<Outcome, Failure>> {
    use rayon::prelude::*;

    jobs.par_iter()
        .map_init(Scratch::new, |scratch, job| crunch_file(scratch, job, options))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn crunch_all(jobs: &[Job], options: &CrunchOptions) -> Vec<Result<Outcome, Failure>> {
    let mut scratch = Scratch::new();
    jobs.iter()
        .map(|job| crunch_file(&mut scratch, job, options))
        .collect()
}

/// `<stem>.crunched.png` next to the input.
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}.crunched.png"))
}

/// True if both paths name the same existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn plan_jobs(args: &Args) -> Result<Vec<Job>, Box<dyn std::error::Error>> {
    if args.output.is_some() && args.inputs.len() > 1 {
        return Err("--output takes a single input; use --out-dir for several".into());
    }
    if let Some(dir) = &args.out_dir {
        fs::create_dir_all(dir)?;
    }

    args.inputs
        .iter()
        .map(|input| -> Result<Job, Box<dyn std::error::Error>> {
            let file_name = input
                .file_name()
                .ok_or_else(|| format!("{}: not a file", input.display()))?;
            let output = match (&args.output, &args.out_dir) {
                (Some(output), _) => output.clone(),
                (None, Some(dir)) => dir.join(file_name),
                (None, None) => default_output(input),
            };
            if output == *input || same_file(input, &output) {
                let message = format!("{}: output would overwrite the input", input.display());
                return Err(message.into());
            }
            Ok(Job {
                input: input.clone(),
                output,
                nine_patch: args.nine_patch || is_nine_patch_name(&file_name.to_string_lossy()),
            })
        })
        .collect()
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

/// Crunch every input; `Ok(false)` if any of them failed.
fn run(args: &Args) -> Result<bool, Box<dyn std::error::Error>> {
    let mut options = args.preset.to_options();
    if let Some(level) = args.compression {
        options.compression_level = level;
    }

    let jobs = plan_jobs(args)?;
    info!("crunching {} file(s) at level {}", jobs.len(), options.compression_level);

    let start = Instant::now();
    let results = crunch_all(&jobs, &options);

    let mut ok = true;
    for (job, result) in jobs.iter().zip(results) {
        match result {
            Ok(outcome) => {
                let ratio = if outcome.input_size > 0 {
                    (outcome.output_size as f64 / outcome.input_size as f64) * 100.0
                } else {
                    0.0
                };
                println!(
                    "{} -> {} [{:?}] {} -> {} ({:.1}%)",
                    job.input.display(),
                    job.output.display(),
                    outcome.color_mode,
                    format_size(outcome.input_size),
                    format_size(outcome.output_size),
                    ratio
                );
            }
            Err(failure) => {
                eprintln!("error: {failure}");
                ok = false;
            }
        }
    }
    debug!("done in {:.2?}", start.elapsed());

    Ok(ok)
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
