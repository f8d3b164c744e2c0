//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{
    parse_backend, parse_criterion, parse_log_level, require, validate_evaluation_config,
};
use crate::domain::criterion::CriterionKind;
use crate::domain::error::TradescoreError;
use crate::domain::evaluation::{self, Evaluation, EvaluationConfig};
use crate::domain::position::Direction;
use crate::domain::ranking::{self, Candidate, RankedCandidate};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(name = "tradescore", about = "Score backtest order streams with analysis criteria")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score a single order stream
    Evaluate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        orders: String,
        #[arg(long)]
        criterion: Option<String>,
    },
    /// Rank order streams best first (all streams in the data dir by default)
    Rank {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        orders: Vec<String>,
        #[arg(long)]
        criterion: Option<String>,
        #[arg(long)]
        sequential: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List order streams available in the data dir
    ListOrders {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Evaluate {
            config,
            orders,
            criterion,
        } => run_evaluate(&config, &orders, criterion.as_deref()),
        Command::Rank {
            config,
            orders,
            criterion,
            sequential,
        } => run_rank(&config, &orders, criterion.as_deref(), sequential),
        Command::Validate { config } => run_validate(&config),
        Command::ListOrders { config } => run_list_orders(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = TradescoreError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_evaluation_config(
    adapter: &dyn ConfigPort,
) -> Result<EvaluationConfig, TradescoreError> {
    validate_evaluation_config(adapter)?;
    Ok(EvaluationConfig {
        data_dir: PathBuf::from(require(adapter, "data", "dir")?),
        series: require(adapter, "data", "series")?,
        backend: parse_backend(adapter)?,
        criterion: parse_criterion(adapter)?,
        parallel: adapter.get_bool("evaluation", "parallel", true),
        log_level: parse_log_level(adapter)?,
    })
}

pub fn resolve_criterion(
    criterion_override: Option<&str>,
    config: &EvaluationConfig,
) -> Result<CriterionKind, TradescoreError> {
    match criterion_override {
        None => Ok(config.criterion),
        Some(name) => name.parse().map_err(|reason| TradescoreError::ConfigInvalid {
            section: "evaluation".into(),
            key: "criterion".into(),
            reason,
        }),
    }
}

/// Installs the env_logger backend. `RUST_LOG` takes precedence over the
/// configured level; a second call is a no-op.
pub fn init_logging(level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn prepare(config_path: &Path) -> Result<EvaluationConfig, ExitCode> {
    let adapter = load_config(config_path)?;
    let config = build_evaluation_config(&adapter).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })?;
    init_logging(config.log_level);
    info!("loaded config from {}", config_path.display());
    Ok(config)
}

fn fail(err: TradescoreError) -> ExitCode {
    eprintln!("error: {err}");
    (&err).into()
}

fn run_evaluate(config_path: &Path, orders: &str, criterion: Option<&str>) -> ExitCode {
    let config = match prepare(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let kind = match resolve_criterion(criterion, &config) {
        Ok(k) => k,
        Err(e) => return fail(e),
    };
    let data_port = CsvAdapter::new(config.data_dir.clone());
    match evaluate_orders(&data_port, &config, orders, kind) {
        Ok(eval) => {
            print_evaluation(orders, &eval);
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

/// Loads the configured series and one order stream, then scores it.
pub fn evaluate_orders(
    data_port: &dyn DataPort,
    config: &EvaluationConfig,
    orders: &str,
    kind: CriterionKind,
) -> Result<Evaluation, TradescoreError> {
    let series = data_port.fetch_series(&config.series, config.backend)?;
    let requests = data_port.fetch_orders(orders, config.backend)?;
    let criterion = kind.build();
    evaluation::evaluate(&series, &requests, criterion.as_ref())
}

fn print_evaluation(orders: &str, eval: &Evaluation) {
    println!("orders:    {}", orders);
    println!("criterion: {}", eval.criterion);
    for (i, position) in eval.record.positions().iter().enumerate() {
        let direction = match position.direction() {
            Direction::Long => "long",
            Direction::Short => "short",
        };
        match (position.exit(), position.profit_loss()) {
            (Some(exit), Ok(pnl)) => println!(
                "  #{:<3} {:<5} {:>5} -> {:<5} amount {}  p&l {}",
                i + 1,
                direction,
                position.entry().index(),
                exit.index(),
                position.entry().amount(),
                pnl
            ),
            _ => println!(
                "  #{:<3} {:<5} {:>5} -> open  amount {}",
                i + 1,
                direction,
                position.entry().index(),
                position.entry().amount()
            ),
        }
    }
    println!("score:     {}", eval.score);
}

fn run_rank(
    config_path: &Path,
    orders: &[String],
    criterion: Option<&str>,
    sequential: bool,
) -> ExitCode {
    let config = match prepare(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let kind = match resolve_criterion(criterion, &config) {
        Ok(k) => k,
        Err(e) => return fail(e),
    };
    let data_port = CsvAdapter::new(config.data_dir.clone());
    let parallel = config.parallel && !sequential;
    match rank_orders(&data_port, &config, orders, kind, parallel) {
        Ok(ranked) => {
            print_ranking(kind, &ranked);
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

/// Ranks the named order streams, or every stream the port knows of when
/// `orders` is empty.
pub fn rank_orders(
    data_port: &dyn DataPort,
    config: &EvaluationConfig,
    orders: &[String],
    kind: CriterionKind,
    parallel: bool,
) -> Result<Vec<RankedCandidate>, TradescoreError> {
    let names = if orders.is_empty() {
        data_port.list_order_sets()?
    } else {
        orders.to_vec()
    };
    if names.is_empty() {
        warn!("no order streams to rank in {}", config.data_dir.display());
    }

    let series = data_port.fetch_series(&config.series, config.backend)?;
    let candidates = names
        .into_iter()
        .map(|name| -> Result<Candidate, TradescoreError> {
            let requests = data_port.fetch_orders(&name, config.backend)?;
            Ok(Candidate { name, requests })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let criterion = kind.build();
    ranking::rank(criterion.as_ref(), &series, &candidates, parallel)
}

fn print_ranking(kind: CriterionKind, ranked: &[RankedCandidate]) {
    println!("criterion: {}", kind);
    for (i, candidate) in ranked.iter().enumerate() {
        println!(
            "{:>3}. {:<20} {:>14}  ({} closed)",
            i + 1,
            candidate.name,
            candidate.score.to_string(),
            candidate.closed_positions
        );
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    match build_evaluation_config(&adapter) {
        Ok(config) => {
            eprintln!(
                "Config valid: series {} in {}, {} backend, criterion {}",
                config.series,
                config.data_dir.display(),
                config.backend,
                config.criterion
            );
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn run_list_orders(config_path: &Path) -> ExitCode {
    let config = match prepare(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let data_port = CsvAdapter::new(config.data_dir.clone());
    match data_port.list_order_sets() {
        Ok(names) => {
            for name in names {
                println!("{}", name);
            }
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}
