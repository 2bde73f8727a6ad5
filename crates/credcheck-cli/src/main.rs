mod display;
mod interactive;
mod output;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use credcheck_client::http::DEFAULT_ENDPOINT;
use credcheck_client::{Analyzer, HttpAnalyzer, HttpAnalyzerConfig, SimulatedAnalyzer};
use credcheck_core::{InputStore, RequestState};
use credcheck_demo::RequestStateMachine;
use tokio::sync::broadcast::error::RecvError;
use tracing::{Level, debug, info, warn};

use crate::output::{Output, print_state};

/// Check news text for likely misinformation.
#[derive(Parser, Debug)]
#[command(name = "credcheck", version, about)]
struct Cli {
    #[command(flatten)]
    service: ServiceArgs,

    /// Print settled states as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log debug output (including state transitions) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ServiceArgs {
    /// Analysis service endpoint
    #[arg(long, env = "CREDCHECK_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    endpoint: String,

    /// Give up on a request after this many seconds
    #[arg(long, env = "CREDCHECK_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,

    /// Use the offline simulated analyzer instead of the service
    #[arg(long, global = true)]
    simulate: bool,

    /// Artificial latency of the simulated analyzer, in milliseconds
    #[arg(long, default_value_t = 2000, global = true)]
    simulate_delay_ms: u64,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one piece of text
    Analyze {
        /// Headline, article text, or URL
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Interactive demo reading one text per line from stdin
    Demo,
    /// List the built-in sample headlines
    Samples,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn build_analyzer(args: &ServiceArgs) -> anyhow::Result<Arc<dyn Analyzer>> {
    if args.simulate {
        let delay = Duration::from_millis(args.simulate_delay_ms);
        return Ok(Arc::new(SimulatedAnalyzer::new(delay)));
    }
    let config = HttpAnalyzerConfig {
        endpoint: args.endpoint.clone(),
        timeout: args.timeout_secs.map(Duration::from_secs),
    };
    let analyzer = HttpAnalyzer::new(config).context("building HTTP client")?;
    info!(endpoint = analyzer.endpoint(), "using analysis service");
    Ok(Arc::new(analyzer))
}

/// Log every state transition at debug level.
fn spawn_transition_log(machine: &RequestStateMachine) {
    let mut transitions = machine.subscribe();
    tokio::spawn(async move {
        loop {
            match transitions.recv().await {
                Ok(t) => debug!(
                    from = t.from.name(),
                    to = t.to.name(),
                    at = %t.at.to_rfc3339(),
                    "state transition"
                ),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "transition log lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    info!("credcheck v{}", env!("CARGO_PKG_VERSION"));

    let output = Output {
        json: cli.json,
        simulated: cli.service.simulate,
    };

    match cli.command {
        Command::Samples => {
            print!("{}", display::render_samples());
            Ok(ExitCode::SUCCESS)
        }
        Command::Analyze { text } => {
            let machine = RequestStateMachine::new(build_analyzer(&cli.service)?);
            spawn_transition_log(&machine);

            let mut input = InputStore::new();
            input.set_text(text.join(" "));
            let settled = machine.run(&input).await?;
            print_state(&mut std::io::stdout(), &settled, output)?;

            Ok(match settled {
                RequestState::Failed { .. } => ExitCode::FAILURE,
                _ => ExitCode::SUCCESS,
            })
        }
        Command::Demo => {
            let machine = RequestStateMachine::new(build_analyzer(&cli.service)?);
            spawn_transition_log(&machine);
            interactive::run(&machine, output).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
