use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::info;

use eddy_core::{TriangleStream, Variant};
use eddy_mining::loaders::edge_list::EdgeListLoader;

/// Streams an edge-list file through the triangle estimator and prints the
/// global estimate together with the heaviest local counters.
#[derive(Parser)]
#[command(name = "triangles", version, about)]
struct Args {
    /// Edge-list file: one `u v` pair per line, `%`/`#` comments, optionally
    /// gzip- or bzip2-compressed
    path: PathBuf,

    /// Reservoir capacity
    #[arg(short = 'm', long, default_value_t = 1000)]
    capacity: usize,

    /// Counting variant
    #[arg(long, value_enum, default_value = "impr")]
    variant: VariantArg,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// How many of the largest local counters to print
    #[arg(long, default_value_t = 10)]
    top: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantArg {
    Base,
    Impr,
}

impl From<VariantArg> for Variant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Base => Variant::Base,
            VariantArg::Impr => Variant::Impr,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let stream = match args.seed {
        Some(seed) => TriangleStream::from_seed(args.capacity, args.variant.into(), seed),
        None => TriangleStream::new(args.capacity, args.variant.into()),
    };
    let mut stream = match stream {
        Ok(s) => s,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let report = match EdgeListLoader::new(&args.path).load_into(&mut stream) {
        Ok(r) => r,
        Err(err) => {
            eprintln!("failed to load {}: {err}", args.path.display());
            return ExitCode::FAILURE;
        }
    };
    info!(
        "processed {} stream items, skipped {}",
        report.processed, report.skipped
    );

    println!("edges processed: {}", report.processed);
    println!("sampled edges:   {}", stream.sample_size());
    println!("global estimate: {:.2}", stream.estimate());

    let mut locals: Vec<_> = stream.local_counts().collect();
    locals.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (vertex, count) in locals.into_iter().take(args.top) {
        println!("  vertex {vertex}: {count:.2}");
    }

    ExitCode::SUCCESS
}
