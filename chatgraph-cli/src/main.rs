//! `chatgraph` binary: one message with `-m`, otherwise an interactive session.

use chatgraph_cli::{build_runner, run_repl, run_turn, CliArgs, Error, RunConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so replies on stdout stay clean.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,chatgraph=debug,chatgraph_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = CliArgs::parse();
    dotenv::dotenv().ok();
    init_tracing(args.verbose);

    let mut config = RunConfig::from_env()?;
    config.apply_args(&args);
    if config.verbose {
        eprintln!("config: {}", config.summary());
    }

    let mut runner = build_runner(&config).await?;
    let mut stdout = std::io::stdout();

    match args.message.as_deref() {
        Some(text) => {
            if let Err(e) = run_turn(&runner, &config.thread_id, text, &mut stdout).await {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            run_repl(&mut runner, &config.thread_id, stdin, &mut stdout).await?;
        }
    }
    Ok(())
}
