// Command-line entry point for exprgraph.

use clap::Parser;
use exprgraph::application::{ExtractUsecase, OutputTargets};
use exprgraph::infrastructure::concurrency::init_thread_pool;
use exprgraph::infrastructure::{DotExporter, JsonAstLoader, JsonExporter, PngExporter};
use exprgraph::ports::GraphExporter;
use log::{error, info, warn, LevelFilter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract expressions from C source ASTs.", long_about = None)]
struct Cli {
    /// AST files exported by pycparser as JSON
    #[arg(required = true)]
    sources: Vec<PathBuf>,

    /// Output AST graph to this file (extension added per format)
    #[arg(short = 't', long = "ast", value_name = "OUTPUT_FILE")]
    ast: Option<PathBuf>,

    /// Output expression graphs to this file (extension added per format)
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    expressions: Option<PathBuf>,

    /// Output PNG file (requires Graphviz)
    #[arg(short, long)]
    png: bool,

    /// Output DOT file
    #[arg(short, long)]
    dot: bool,

    /// Output JSON graph dump
    #[arg(short, long)]
    json: bool,

    /// Verbose output (repeat for per-node output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Worker threads when several sources are given
    #[arg(long)]
    jobs: Option<usize>,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut exporters: Vec<&dyn GraphExporter> = Vec::new();
    if cli.dot {
        exporters.push(&DotExporter);
    }
    if cli.png {
        exporters.push(&PngExporter);
    }
    if cli.json {
        exporters.push(&JsonExporter);
    }
    if exporters.is_empty() {
        exporters.push(&DotExporter);
    }

    let targets = OutputTargets {
        ast: cli.ast.clone(),
        expressions: cli.expressions.clone(),
    };
    if targets.ast.is_none() && targets.expressions.is_none() {
        warn!("No --ast or --expressions output given; graphs are built but not written");
    }

    if cli.sources.len() > 1 {
        if let Err(e) = init_thread_pool(cli.jobs) {
            warn!("Using default thread pool: {}", e);
        }
    }

    let usecase = ExtractUsecase {
        loader: &JsonAstLoader,
        exporters,
    };

    let mut failed = false;
    for (source, result) in cli.sources.iter().zip(usecase.run_all(&cli.sources, &targets)) {
        match result {
            Ok(report) => info!(
                "{}: {} nodes, {} expressions, {} files written",
                source.display(),
                report.node_count,
                report.expression_count,
                report.written.len()
            ),
            Err(e) => {
                error!("{}: {:#}", source.display(), e);
                failed = true;
            }
        }
    }

    info!("Done.");
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
