use featmatch::PipelineConfig;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Pipeline(featmatch::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Pipeline(err) => write!(f, "{err}"),
        }
    }
}

impl From<featmatch::Error> for CliError {
    fn from(value: featmatch::Error) -> Self {
        Self::Pipeline(value)
    }
}

#[derive(Debug)]
struct Args {
    config: PipelineConfig,
    open: bool,
}

fn usage() -> &'static str {
    "featmatch\n\
\n\
USAGE:\n\
  featmatch [--workpiece <path>] [--feature <path>] [--out-dir <dir>] [--seed <n>] [--scale <n>] [--no-open]\n\
\n\
NOTES:\n\
  - Inputs default to ./workpiece_graph.json and ./feature_graph.json.\n\
  - Results are written below --out-dir (default ./Results) in Graphs/, HTML/ and Tables/.\n\
  - The summary report HTML/results_summary.html is opened in the default viewer unless --no-open is given.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        config: PipelineConfig::default(),
        open: true,
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--no-open" => args.open = false,
            "--workpiece" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config.workpiece_path = PathBuf::from(path);
            }
            "--feature" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config.feature_path = PathBuf::from(path);
            }
            "--out-dir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config.out_dir = PathBuf::from(dir);
            }
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config.seed = seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.config.raster_scale = scale;
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// Hands the report to the system viewer. Failing to launch one does not fail the run.
fn open_in_viewer(path: &Path) {
    let path = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    match viewer_command(&path).spawn() {
        Ok(_) => tracing::info!(path = %path.display(), "opened results summary"),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "could not open results summary")
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let outcome = featmatch::run(&args.config)?;
    if outcome.match_count > 0 {
        println!(
            "found {} matching subgraph(s); report: {}",
            outcome.match_count,
            outcome.report_path.display()
        );
    } else {
        println!(
            "no matching subgraphs found; report: {}",
            outcome.report_path.display()
        );
    }
    if args.open {
        open_in_viewer(&outcome.report_path);
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
