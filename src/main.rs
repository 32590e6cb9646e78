//! dijkstra-heaps CLI: compare priority queues on a weighted graph.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dijkstra_heaps::experiment::{run_experiment, write_csv, ExperimentRow};
use dijkstra_heaps::generate::{random_graph, Density, GeneratorConfig};
use dijkstra_heaps::harness::{compare, ComparisonReport, HarnessConfig, QueueKind};
use dijkstra_heaps::loader::{load_json, save_json};
use dijkstra_heaps::shortest_path::reachable_count;
use dijkstra_heaps::{Weight, INFINITY};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dijkstra-heaps")]
#[command(about = "Benchmark Dijkstra's algorithm with binary, d-ary, Fibonacci and radix heaps")]
#[command(version)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time every queue on a JSON graph and check that they agree
    Run {
        /// Graph file ({"nodes": [...], "edges": [[u, v, w], ...]})
        graph: PathBuf,

        /// Source vertex
        #[arg(short, long, default_value = "0")]
        source: usize,

        /// d-ary branching factor (default: max(2, 2E/V))
        #[arg(short = 'd', long)]
        arity: Option<usize>,

        /// Untimed runs per queue
        #[arg(long, default_value = "3")]
        warmup: usize,

        /// Timed runs per queue
        #[arg(short, long, default_value = "5")]
        iterations: usize,

        /// Write the comparison as JSON
        #[arg(long)]
        report: Option<PathBuf>,

        /// Number of leading vertices whose distances are printed
        #[arg(long, default_value = "10")]
        sample: usize,
    },

    /// Write a random undirected graph as JSON
    Generate {
        /// Number of vertices
        #[arg(short, long, default_value = "100")]
        nodes: usize,

        /// Number of distinct edges (default: the density preset)
        #[arg(short, long, conflicts_with = "density")]
        edges: Option<usize>,

        /// Edge-count preset: sparse (2n), typical (5n), middle or dense (n(n-1)/2)
        #[arg(long)]
        density: Option<Density>,

        /// Smallest edge weight
        #[arg(long, default_value = "1")]
        min_weight: Weight,

        /// Largest edge weight
        #[arg(long, default_value = "10")]
        max_weight: Weight,

        /// Random seed for reproducibility
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Time every queue on each *.json graph in a directory
    Experiment {
        /// Directory of graph files
        dir: PathBuf,

        /// Write one row per graph as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Source vertex
        #[arg(short, long, default_value = "0")]
        source: usize,

        /// d-ary branching factor (default: max(2, 2E/V) per graph)
        #[arg(short = 'd', long)]
        arity: Option<usize>,

        /// Untimed runs per queue
        #[arg(long, default_value = "3")]
        warmup: usize,

        /// Timed runs per queue
        #[arg(short, long, default_value = "5")]
        iterations: usize,
    },
}

/// `RUST_LOG` wins when set; otherwise this crate logs at info, or debug
/// with `--verbose`.
fn log_filter(rust_log: Option<&str>, verbose: bool) -> Result<EnvFilter, ParseError> {
    match rust_log {
        Some(directives) => EnvFilter::try_new(directives),
        None => {
            let level = if verbose { "debug" } else { "info" };
            EnvFilter::try_new(format!("dijkstra_heaps={level}"))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), cli.verbose)?)
        .init();

    match cli.command {
        Commands::Run {
            graph,
            source,
            arity,
            warmup,
            iterations,
            report,
            sample,
        } => {
            let config = HarnessConfig {
                source,
                arity,
                warmup,
                iterations,
            };
            cmd_run(&graph, &config, report.as_deref(), sample)
        }
        Commands::Generate {
            nodes,
            edges,
            min_weight,
            max_weight,
            density,
            seed,
            output,
        } => {
            let config = GeneratorConfig {
                nodes,
                edges: edges.unwrap_or_else(|| density.unwrap_or_default().edge_count(nodes)),
                min_weight,
                max_weight,
                seed,
            };
            cmd_generate(&config, &output)
        }
        Commands::Experiment {
            dir,
            csv,
            source,
            arity,
            warmup,
            iterations,
        } => {
            let config = HarnessConfig {
                source,
                arity,
                warmup,
                iterations,
            };
            cmd_experiment(&dir, &config, csv.as_deref())
        }
    }
}

fn cmd_run(
    path: &Path,
    config: &HarnessConfig,
    report_path: Option<&Path>,
    sample: usize,
) -> Result<()> {
    let graph = load_json(path).with_context(|| format!("loading {}", path.display()))?;
    println!(
        "Graph: {} vertices, {} edges (d = {})",
        graph.vertex_count(),
        graph.edge_count(),
        config.arity_for(&graph)
    );

    let report = compare(&graph, config).context("running shortest paths")?;
    print_report(&report, sample);

    if let Some(out) = report_path {
        let json = report.to_json().context("serializing report")?;
        std::fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
        println!("\nReport written to {}", out.display());
    }

    if !report.consistent {
        anyhow::bail!("queues returned different distances");
    }
    Ok(())
}

fn print_report(report: &ComparisonReport, sample: usize) {
    println!("\nPerformance Results");
    println!("===================");
    for r in &report.reports {
        let name = match r.arity {
            Some(d) => format!("{} (d={d})", r.kind.label()),
            None => r.kind.label().to_string(),
        };
        println!(
            "{name:<20} {:>10.3} ms  (min {:.3}, max {:.3}, sd {:.3})",
            r.timings.mean_ms, r.timings.min_ms, r.timings.max_ms, r.timings.std_dev_ms
        );
    }

    println!("\nSpeed Ratios (binary / other)");
    for ratio in &report.speed_ratios {
        match ratio.ratio {
            Some(x) => println!("  {:<18} {x:.2}x", ratio.kind.label()),
            None => println!("  {:<18} n/a", ratio.kind.label()),
        }
    }

    println!(
        "\nResults match: {}",
        if report.consistent { "YES" } else { "NO" }
    );

    let Some(binary) = report.get(QueueKind::Binary) else {
        return;
    };
    println!(
        "Reachable from {}: {} of {}",
        report.source,
        reachable_count(&binary.distances),
        report.vertices
    );

    let shown = sample.min(report.vertices);
    if shown == 0 {
        return;
    }
    println!("\nSample distances (first {shown} vertices)");
    for v in 0..shown {
        let row: Vec<String> = report
            .reports
            .iter()
            .map(|r| {
                let d = r.distances[v];
                let text = if d == INFINITY {
                    "inf".to_string()
                } else {
                    d.to_string()
                };
                format!("{}={text}", short_name(r.kind))
            })
            .collect();
        println!("  Vertex {v}: {}", row.join(", "));
    }
}

fn short_name(kind: QueueKind) -> &'static str {
    match kind {
        QueueKind::Binary => "BH",
        QueueKind::DAry => "DH",
        QueueKind::Fibonacci => "FH",
        QueueKind::Radix => "RH",
    }
}

fn cmd_experiment(dir: &Path, config: &HarnessConfig, csv_path: Option<&Path>) -> Result<()> {
    let rows = run_experiment(dir, config)?;
    if rows.is_empty() {
        println!("No *.json graphs in {}", dir.display());
        return Ok(());
    }
    print_rows(&rows);

    if let Some(out) = csv_path {
        write_csv(&rows, out)?;
        println!("\nResults written to {}", out.display());
    }

    if rows.iter().any(|r| !r.consistent) {
        anyhow::bail!("queues returned different distances on at least one graph");
    }
    Ok(())
}

fn print_rows(rows: &[ExperimentRow]) {
    println!(
        "{:<32} {:>8} {:>9} {:>4} {:>10} {:>10} {:>10} {:>10}  match",
        "graph", "vertices", "edges", "d", "BH ms", "DH ms", "FH ms", "RH ms"
    );
    for r in rows {
        println!(
            "{:<32} {:>8} {:>9} {:>4} {:>10.3} {:>10.3} {:>10.3} {:>10.3}  {}",
            r.graph,
            r.vertices,
            r.edges,
            r.arity,
            r.binary_ms,
            r.d_ary_ms,
            r.fibonacci_ms,
            r.radix_ms,
            if r.consistent { "YES" } else { "NO" }
        );
    }
}

fn cmd_generate(config: &GeneratorConfig, output: &Path) -> Result<()> {
    let description = random_graph(config).context("generating graph")?;
    save_json(&description, output).with_context(|| format!("writing {}", output.display()))?;
    println!(
        "Generated {} vertices, {} edges -> {}",
        description.nodes.len(),
        description.edges.len(),
        output.display()
    );
    Ok(())
}
