use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use picturedb_core::codec::parse_timestamp;
use picturedb_core::config;
use picturedb_core::{DecodeError, Picture, PictureStore, StoreError};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "picturedb", about = "Flat-file picture record store")]
struct Args {
    /// Backing data file (one record per line)
    #[arg(short, long, env = "PICTUREDB_FILE", default_value = config::DEFAULT_DATA_FILE)]
    file: PathBuf,

    /// Create the data file (and its directory) if it does not exist
    #[arg(long, default_value_t = false)]
    create: bool,

    /// Emit logs as JSON instead of human-readable text
    #[arg(long, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append a picture (duplicate ids are allowed)
    Insert(PictureArgs),
    /// Replace the picture with the given id
    Update(PictureArgs),
    /// Delete the picture with the given id
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Print the number of stored lines
    Count,
    /// Print the picture with the given id
    Get { id: String },
    /// Print all pictures, one JSON object per line
    List,
    /// Print pictures strictly inside lon±deviation x lat±deviation
    Near {
        #[arg(long, allow_negative_numbers = true)]
        lon: f32,
        #[arg(long, allow_negative_numbers = true)]
        lat: f32,
        #[arg(long)]
        deviation: f32,
    },
}

#[derive(clap::Args, Debug)]
struct PictureArgs {
    #[arg(long)]
    id: String,

    /// Local time, `YYYY-MM-DD HH:MM:SS` (default: now)
    #[arg(long, value_parser = parse_timestamp)]
    timestamp: Option<NaiveDateTime>,

    #[arg(long, allow_negative_numbers = true)]
    lon: f32,

    #[arg(long, allow_negative_numbers = true)]
    lat: f32,

    #[arg(long)]
    title: String,

    #[arg(long)]
    url: Url,
}

impl PictureArgs {
    fn into_picture(self) -> Picture {
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Local::now().naive_local());
        Picture::new(self.id, timestamp, self.lon, self.lat, self.title, self.url)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_json);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Log directives used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "picturedb=info,picturedb_core=info";

fn init_tracing(json: bool) {
    let filter = log_filter(std::env::var("RUST_LOG").ok().as_deref());
    // Logs go to stderr; stdout carries command output.
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
}

/// `RUST_LOG` replaces the defaults entirely when it parses.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn run(args: Args) -> Result<(), StoreError> {
    if args.create {
        ensure_file(&args.file)?;
    }
    let store = PictureStore::open(&args.file)?;
    let mut out = io::stdout().lock();

    match args.command {
        Command::Insert(p) => store.insert(&p.into_picture())?,
        Command::Update(p) => store.update(&p.into_picture())?,
        Command::Delete { id } => store.delete_by_id(&id)?,
        Command::Count => writeln!(out, "{}", store.count()?)?,
        Command::Get { id } => print_json(&mut out, &store.find_by_id(&id)?)?,
        Command::List => {
            for picture in store.find_all()? {
                print_json(&mut out, &picture)?;
            }
        }
        Command::Near {
            lon,
            lat,
            deviation,
        } => {
            for picture in store.find_by_position(lon, lat, deviation)? {
                print_json(&mut out, &picture)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn ensure_file(path: &Path) -> io::Result<()> {
    if path.is_file() {
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)?;
    tracing::info!("Created data file {:?}", path);
    Ok(())
}

fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)
}

/// Distinct exit status per error kind.
fn exit_code(err: &StoreError) -> u8 {
    match err {
        StoreError::Io(_) => 1,
        StoreError::NotFound(_) => 2,
        StoreError::Parse { .. } => 3,
        StoreError::FileNotFound(_) => 4,
    }
}
