use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use walkjoin::{Adjacency, CandidateStrategy, EnumerationConfig, Enumerator, MaskMode, Pattern};

#[derive(Parser)]
#[command(name = "walkjoin")]
#[command(about = "Enumerate subgraph pattern matches level by level", long_about = None)]
struct Cli {
    /// Edge list, one `u v` pair per line; `#` starts a comment
    #[arg(long)]
    graph: PathBuf,

    /// `path:K`, `clique:K`, `cycle:K`, `star:K`, or a JSON pattern file
    #[arg(long)]
    pattern: String,

    /// Vertex count (default: largest vertex id + 1)
    #[arg(long)]
    nodes: Option<usize>,

    /// Worker count, 0 for hardware parallelism
    #[arg(long)]
    threads: Option<usize>,

    #[arg(long, value_enum)]
    mask: Option<MaskArg>,

    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Add the reverse of every edge
    #[arg(long, default_value_t = false)]
    symmetric: bool,

    /// Print only the number of matches
    #[arg(long, default_value_t = false)]
    count_only: bool,

    /// JSON enumeration config; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum MaskArg {
    None,
    ExcludeVisited,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Intersect,
    Count,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt().with_env_filter(filter).with_writer(io::stderr).try_init();

    let config = load_config(&cli)?;
    let pattern = load_pattern(&cli.pattern)?;
    let mut graph = load_graph(&cli.graph, cli.nodes)?;
    if cli.symmetric {
        graph = graph.symmetrize()?;
    }
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        pattern_size = pattern.size(),
        "inputs loaded"
    );

    let enumerator = Enumerator::new(config)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if cli.count_only {
        let counted = enumerator.count(&graph, &pattern)?;
        writeln!(out, "{}", counted.count)?;
    } else {
        let matches = enumerator.enumerate(&graph, &pattern)?;
        for tuple in &matches {
            let line: Vec<String> = tuple.iter().map(usize::to_string).collect();
            writeln!(out, "{}", line.join(" "))?;
        }
    }
    out.flush()?;
    Ok(())
}

fn load_config(cli: &Cli) -> Result<EnumerationConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EnumerationConfig::default(),
    };

    if let Some(threads) = cli.threads {
        config = config.with_threads(threads);
    }
    if let Some(mask) = cli.mask {
        config = config.with_mask_mode(match mask {
            MaskArg::None => MaskMode::None,
            MaskArg::ExcludeVisited => MaskMode::ExcludeVisited,
        });
    }
    if let Some(strategy) = cli.strategy {
        config = config.with_strategy(match strategy {
            StrategyArg::Intersect => CandidateStrategy::Intersect,
            StrategyArg::Count => CandidateStrategy::Count,
        });
    }
    Ok(config)
}

fn load_pattern(arg: &str) -> Result<Pattern> {
    if let Some((kind, size)) = arg.split_once(':') {
        let presets = ["path", "clique", "cycle", "star"];
        if presets.contains(&kind) {
            let k: usize = size
                .parse()
                .with_context(|| format!("pattern size in {arg:?}"))?;
            let pattern = match kind {
                "path" => Pattern::path(k),
                "clique" => Pattern::clique(k),
                "cycle" => Pattern::cycle(k),
                _ => Pattern::star(k),
            };
            return pattern.with_context(|| format!("building pattern {arg}"));
        }
    }

    let text = fs::read_to_string(arg).with_context(|| format!("reading pattern {arg}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing pattern {arg}"))
}

fn load_graph(path: &Path, nodes: Option<usize>) -> Result<Adjacency> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading graph {}", path.display()))?;
    let edges = parse_edges(&text).with_context(|| format!("parsing graph {}", path.display()))?;

    let n = match nodes {
        Some(n) => n,
        None => edges.iter().map(|&(u, v)| u.max(v) + 1).max().unwrap_or(0),
    };
    Ok(Adjacency::from_edges(n, edges)?)
}

fn parse_edges(text: &str) -> Result<Vec<(usize, usize)>> {
    let mut edges = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(u), Some(v), None) = (fields.next(), fields.next(), fields.next()) else {
            bail!("line {}: expected `u v`, got {line:?}", lineno + 1);
        };
        let u = u.parse::<usize>().with_context(|| format!("line {}: source vertex", lineno + 1))?;
        let v = v.parse::<usize>().with_context(|| format!("line {}: target vertex", lineno + 1))?;
        edges.push((u, v));
    }
    Ok(edges)
}
