use clap::{Parser, ValueEnum};
use fielddiagnostics::errors::*;
use fielddiagnostics::pipeline;
use fielddiagnostics::render::FigureFile;
use fielddiagnostics::settings::{read_parameter_file, OutputFormat, Settings};
use log::info;
use std::path::PathBuf;

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Cbor,
    Msgpack,
    Bincode,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> OutputFormat {
        match f {
            Format::Cbor => OutputFormat::CBOR,
            Format::Msgpack => OutputFormat::MsgPack,
            Format::Bincode => OutputFormat::Bincode,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "fielddiagnostics",
    version,
    about = "Checks a solver dump with curl(grad(u)) and div(grad(u)) and writes contour plots"
)]
struct Cli {
    /// Binary dump written by the solver
    dump: PathBuf,
    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of filled contour bands
    #[arg(short, long)]
    levels: Option<usize>,
    /// Destination of the figure file
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Encoding of the figure file
    #[arg(short, long, value_enum)]
    format: Option<Format>,
}

fn run(cli: Cli) -> Result<()> {
    let settings = match cli.config {
        Some(ref p) => {
            info!("Reading settings from '{}'", p.display());
            read_parameter_file(p)?
        }
        None => Settings::default(),
    };

    // command line takes precedence over the settings file
    let settings = settings.with_overrides(cli.levels, cli.output, cli.format.map(OutputFormat::from))?;

    let mut sink = FigureFile::new(&settings.output.destination(), &cli.dump, &settings);
    let report = pipeline::run(&cli.dump, &settings, &mut sink)?;

    if let Some(c) = report.curl {
        info!("Largest |curl(grad(u))|: {:e}", c.max_abs);
    }
    info!("Done, {} plots in '{}'", sink.number_of_plots(), sink.path().display());

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(ref e) = run(cli) {
        eprintln!("Error: {}", e);
        for e in e.iter().skip(1) {
            eprintln!("caused by: {}", e);
        }

        std::process::exit(1);
    }
}
