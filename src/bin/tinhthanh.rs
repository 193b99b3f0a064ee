//! tinhthanh CLI
//!
//! 命令行入口：提取省份、比较两个地址、批量比对 CSV。

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tinhthanh::batch::{read_pairs, run_batch, write_json};
use tinhthanh::{fold, AddressComparator, GroundTruth, UNRESOLVED};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tinhthanh")]
#[command(author, version, about = "Vietnamese province extraction and comparison")]
#[command(long_about = "Extract the province from Vietnamese addresses and compare provinces \
across the 2025 administrative mergers.

Examples:
  tinhthanh extract '123 Lê Lợi, P. Bến Thành, Q.1, TPHCM'
  tinhthanh extract --explain '12 Thừa Thiên Huế, Q. Ba Đình, Hà Nội'
  tinhthanh compare '170 Hùng Vương, Bến Tre' 'Vĩnh Long'
  tinhthanh batch -i pairs.csv -o results.json")]
struct Cli {
    /// Ground-truth JSON file (official name -> variants); defaults to the bundled dataset
    #[arg(long, global = true, env = "TINHTHANH_GROUND_TRUTH")]
    ground_truth: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the province from an address
    Extract {
        address: String,

        /// Print every candidate with its score
        #[arg(long)]
        explain: bool,
    },

    /// Compare the provinces of two addresses
    Compare { address1: String, address2: String },

    /// Compare address pairs from a headerless CSV (index,address1,address2[,label])
    Batch {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the derived merge relation
    Merges,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tinhthanh=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let comparator = load_comparator(cli.ground_truth.as_ref())?;

    match cli.command {
        Commands::Extract { address, explain } => extract(&comparator, &address, explain),
        Commands::Compare { address1, address2 } => compare(&comparator, &address1, &address2),
        Commands::Batch { input, output } => batch(&comparator, &input, output.as_ref()),
        Commands::Merges => merges(&comparator),
    }
}

fn load_comparator(path: Option<&PathBuf>) -> Result<AddressComparator> {
    let truth = match path {
        Some(path) => GroundTruth::from_path(path)
            .with_context(|| format!("Failed to load ground truth from {}", path.display()))?,
        None => GroundTruth::embedded().context("Bundled ground truth is invalid")?,
    };
    Ok(AddressComparator::new(&truth))
}

fn extract(comparator: &AddressComparator, address: &str, explain: bool) -> Result<()> {
    let province = comparator.extract_province(address);
    println!("{}", province.unwrap_or(UNRESOLVED));

    if explain {
        let address_chars = fold(address).chars().count();
        let mut scored: Vec<_> = comparator
            .matcher()
            .candidates(address)
            .into_iter()
            .map(|c| (c.score(address_chars), c))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        for (score, c) in scored {
            println!(
                "  {:>8.2}  {} <- {:?} at {}{}",
                score,
                c.official,
                c.variant,
                c.position,
                if c.is_word_boundary { "" } else { " (substring)" }
            );
        }
    }
    Ok(())
}

fn compare(comparator: &AddressComparator, address1: &str, address2: &str) -> Result<()> {
    let record = comparator.compare_address_pair(address1, address2, 1);
    println!("{} | {}", record.province1, record.province2);
    println!("{}: {}", if record.is_match { "MATCH" } else { "NO MATCH" }, record.reason);
    Ok(())
}

fn batch(
    comparator: &AddressComparator,
    input: &PathBuf,
    output: Option<&PathBuf>,
) -> Result<()> {
    let file = File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let pairs = read_pairs(BufReader::new(file))
        .with_context(|| format!("Failed to read address pairs from {}", input.display()))?;
    info!("Loaded {} address pairs from {}", pairs.len(), input.display());

    let report = run_batch(comparator, &pairs);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_json(&mut writer, &report.records)?;
            writer.flush()?;
            info!("Results written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_json(&mut writer, &report.records)?;
            writeln!(writer)?;
        }
    }

    let summary = report.summary;
    eprintln!("Total: {}", summary.total);
    match summary.match_rate() {
        Some(rate) => {
            eprintln!("Matched: {} ({:.1}%)", summary.matched, rate);
            eprintln!("Mismatched: {} ({:.1}%)", summary.mismatched, 100.0 - rate);
        }
        None => eprintln!("No data to compare"),
    }
    Ok(())
}

fn merges(comparator: &AddressComparator) -> Result<()> {
    for (old, new) in comparator.merges().iter() {
        println!("{} -> {}", old, new);
    }
    Ok(())
}
