use anyhow::{bail, Context, Result};
use clap::Parser;
use dicom_stem::config::{Config, ConfigBuilder};
use dicom_stem::processor::{FileProcessor, FileReport, Processor};
use env_logger::Builder;
use log::{info, Level, LevelFilter};
use rayon::prelude::*;
use std::{
    env,
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Extract DICOM tags and build output file stems from them
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input DICOM file or directory
    #[arg(short, long, value_name = "INPUT_PATH")]
    input: PathBuf,

    /// Output file stem template, e.g. "%PatientID-%_md5|7_StudyInstanceUID"
    #[arg(short = 's', long, value_name = "TEMPLATE")]
    output_file_stem: Option<String>,

    /// Tags to extract, e.g. "PatientID,StudyDate" (default: all)
    #[arg(short, long, value_name = "TAGS", value_delimiter = ',')]
    tags: Vec<String>,

    /// Only process files with this extension, e.g. "dcm"
    #[arg(short, long)]
    extension: Option<String>,

    /// Number of worker threads (default: number of CPUs)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// JSON config file; command line options override its values
    #[arg(long, value_name = "CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Output file for the JSON report ('-' for stdout)
    #[arg(short, long, value_name = "OUTPUT_PATH", default_value = "-")]
    output: PathBuf,

    /// Recursively look for files in input directory
    #[arg(short, long)]
    recursive: bool,

    /// Continue when file found is not DICOM
    #[arg(short, long = "continue")]
    r#continue: bool,

    /// Show more verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(path: &Path) -> Result<Config> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let config = serde_json::from_reader(file)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(config)
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config_builder = match &args.config {
        Some(path) => ConfigBuilder::from_config(load_config(path)?),
        None => ConfigBuilder::default(),
    };

    if let Some(template) = &args.output_file_stem {
        config_builder = config_builder.output_file_stem(template);
    }
    if !args.tags.is_empty() {
        config_builder = config_builder.tags(args.tags.clone());
    }
    if let Some(extension) = &args.extension {
        config_builder = config_builder.extension(extension);
    }
    if let Some(threads) = args.threads {
        config_builder = config_builder.threads(threads);
    }

    Ok(config_builder.build())
}

fn check_environment(input_path: &Path, output_path: &Path) -> Result<()> {
    if !input_path.exists() {
        bail!("input path {} does not exist", input_path.display());
    }

    if output_path != Path::new("-") {
        if let Some(parent_dir) = output_path.parent() {
            if !parent_dir.as_os_str().is_empty() && !parent_dir.is_dir() {
                bail!("output directory {} does not exist", parent_dir.display());
            }
        }
    }

    Ok(())
}

fn collect_files(input_path: &Path, recurse: bool, config: &Config) -> Vec<PathBuf> {
    let mut walk_dir = WalkDir::new(input_path);
    if !recurse {
        walk_dir = walk_dir.max_depth(1);
    }

    walk_dir
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| config.accepts_file_name(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.into_path())
        .collect()
}

fn write_reports(reports: &[FileReport], output_path: &Path) -> Result<()> {
    let output_target: Box<dyn Write> = if output_path == Path::new("-") {
        Box::new(io::stdout().lock())
    } else {
        Box::new(
            File::create(output_path)
                .with_context(|| format!("failed to create {}", output_path.display()))?,
        )
    };

    let mut writer = BufWriter::new(output_target);
    serde_json::to_writer_pretty(&mut writer, reports)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Error
    };

    let mut builder = Builder::from_default_env();
    builder.format(|buf, record| {
        let level = match record.level() {
            Level::Error => "Error",
            Level::Warn => "Warning",
            Level::Info => "Info",
            Level::Debug => "Debug",
            Level::Trace => "Trace",
        };
        writeln!(buf, "{}: {}", level, record.args())
    });
    // RUST_LOG, when set, takes precedence over --verbose
    if env::var_os("RUST_LOG").is_none() {
        builder.filter(None, log_level);
    }
    builder.init();

    check_environment(&args.input, &args.output)?;

    let config = build_config(&args)?;
    let processor = FileProcessor::new(config)?;

    let reports = if args.input.is_file() {
        vec![processor.process_file(&args.input)]
    } else if args.input.is_dir() {
        let files = collect_files(&args.input, args.recursive, processor.config());
        info!("found {} file(s) in {}", files.len(), args.input.display());

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(processor.config().get_threads().unwrap_or(0))
            .build()?;

        let mut reports: Vec<FileReport> = pool.install(|| {
            files
                .into_iter()
                .par_bridge() // convert to a parallel iterator
                .map(|path_buf| processor.process_file(&path_buf))
                .collect()
        });
        reports.sort_by(|a, b| {
            (&a.input_path, &a.input_filename).cmp(&(&b.input_path, &b.input_filename))
        });
        reports
    } else {
        bail!("Input should either be a file or a directory");
    };

    write_reports(&reports, &args.output)?;

    let failed = reports.iter().filter(|report| !report.status).count();
    info!("processed {} file(s), {} failed", reports.len(), failed);
    if failed > 0 && !args.r#continue {
        bail!("{} file(s) could not be read as DICOM", failed);
    }

    Ok(())
}
