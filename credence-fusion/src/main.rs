//! Credence CLI - verify claim evidence bundles
//!
//! Reads one `VerificationInput` JSON document per path (`-` for stdin),
//! verifies them concurrently and prints one JSON line per input, in the
//! order the inputs were given.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use credence_common::config::ConfigPathResolver;
use credence_common::logging::init_tracing;
use credence_fusion::{AppConfig, FusionError, VerificationInput, Verifier};
use serde_json::json;
use tokio::io::AsyncReadExt;
use tokio::task::JoinSet;
use tracing::{error, info, Instrument};
use uuid::Uuid;

/// Command-line arguments for credence
#[derive(Parser, Debug)]
#[command(name = "credence")]
#[command(about = "Fuse claim verification evidence into an explainable verdict")]
#[command(version)]
struct Args {
    /// Config file (overrides CREDENCE_CONFIG and the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level or filter directive; overrides the config file
    #[arg(short, long, env = "CREDENCE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Pretty-print each JSON result
    #[arg(long)]
    pretty: bool,

    /// Input JSON files, `-` for stdin
    #[arg(required = true)]
    inputs: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config: AppConfig = ConfigPathResolver::new("credence")
        .load(args.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }

    init_tracing(&config.logging).context("Failed to initialize logging")?;

    let verifier = Arc::new(Verifier::new(config.fusion).context("Invalid fusion configuration")?);
    info!("Verifying {} input(s)", args.inputs.len());

    let mut tasks = JoinSet::new();
    for (index, input) in args.inputs.iter().enumerate() {
        let verifier = Arc::clone(&verifier);
        let input = input.clone();
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("verify", %request_id, input = %input);

        tasks.spawn(
            async move {
                let outcome = verify_input(&verifier, &input).await;
                (index, input, outcome)
            }
            .instrument(span),
        );
    }

    let mut outcomes = Vec::with_capacity(args.inputs.len());
    while let Some(joined) = tasks.join_next().await {
        outcomes.push(joined.context("Verification task panicked")?);
    }
    outcomes.sort_by_key(|(index, _, _)| *index);

    let mut failures = 0;
    for (_, input, outcome) in outcomes {
        let line = match outcome {
            Ok(result) => json!({ "input": input, "result": result }),
            Err(e) => {
                failures += 1;
                error!("{}: {:#}", input, e);
                json!({ "input": input, "error": describe_error(&e) })
            }
        };
        let rendered = if args.pretty {
            serde_json::to_string_pretty(&line)?
        } else {
            serde_json::to_string(&line)?
        };
        println!("{}", rendered);
    }

    if failures > 0 {
        anyhow::bail!("{} of {} input(s) failed", failures, args.inputs.len());
    }
    Ok(())
}

async fn verify_input(verifier: &Verifier, input: &str) -> Result<credence_fusion::FusionResult> {
    let text = read_input(input).await?;
    let request: VerificationInput =
        serde_json::from_str(&text).with_context(|| format!("Invalid input JSON in {}", input))?;
    Ok(verifier.verify(&request)?)
}

async fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    tokio::fs::read_to_string(Path::new(input))
        .await
        .with_context(|| format!("Failed to read {}", input))
}

/// Error text for the JSON output; a request with no evidence is reported as
/// not verifiable rather than as a failed or uncertain verification
fn describe_error(e: &anyhow::Error) -> String {
    match e.downcast_ref::<FusionError>() {
        Some(FusionError::NoEvidence) => "verification not possible: no evidence source present".to_string(),
        _ => format!("{:#}", e),
    }
}
