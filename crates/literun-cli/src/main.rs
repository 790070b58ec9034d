use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use literun_core::domain::{CommMessage, Command, ErrorKind};
use literun_core::impls::{ChannelTransport, JsonLinesTransport};
use literun_core::ports::{CommTransport, TransportError};
use literun_core::{Notebook, RunnerConfig, StageError, StagerBuilder};
use tokio::sync::mpsc;

/// Stage notebooks for the browser notebook runtime.
///
/// Comm messages are written to stdout as JSON lines; logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "literun", version)]
struct Cli {
    /// JSON config file (LITERUN_* env vars override it)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Inject bootstrap/teardown cells, write to the shared drive, request a run
    Stage {
        notebook: PathBuf,
        /// Directory the notebook should run in (defaults to the current one)
        #[arg(long)]
        cwd: Option<PathBuf>,
        #[arg(long)]
        allow_errors: bool,
    },
    /// Request a run of a notebook already on the shared drive
    Run { path: PathBuf },
    /// Print the encoded command without sending it
    Encode {
        operation: String,
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))
}

/// ホストへの転送タスク：受け取ったメッセージを sink に 1 行ずつ書く
async fn forward<W: Write + Send>(
    mut rx: mpsc::UnboundedReceiver<CommMessage>,
    sink: JsonLinesTransport<W>,
) -> Result<W, TransportError> {
    while let Some(message) = rx.recv().await {
        sink.send(message)?;
    }
    Ok(sink.into_inner())
}

/// 終了コード（sysexits.h に合わせる）
///
/// Staging failures map by kind; anything else (config, bad notebook file) is 1.
fn exit_status(err: &(dyn Error + 'static)) -> u8 {
    match err.downcast_ref::<StageError>().map(StageError::kind) {
        Some(ErrorKind::Usage) => 64,
        Some(ErrorKind::Infrastructure) => 74,
        Some(ErrorKind::Transport) => 69,
        None => 1,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env は任意
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match try_main(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "literun failed");
            ExitCode::from(exit_status(err.as_ref()))
        }
    }
}

async fn try_main(cli: Cli) -> Result<(), Box<dyn Error>> {
    // (A) 設定：ファイル → 環境変数
    let config = match &cli.config {
        Some(path) => RunnerConfig::from_json_file(path)?,
        None => RunnerConfig::default(),
    }
    .with_env_overrides()?;

    // (B) チャネルと転送タスク
    let (transport, rx) = ChannelTransport::new();
    let forwarder = tokio::spawn(forward(rx, JsonLinesTransport::new(std::io::stdout())));

    // (C) stage / run / encode
    let result = run(cli.command, config, transport);

    // stager（= sender）が drop 済みなので、転送タスクは残りを書いて終了する
    forwarder.await??;
    result
}

fn run(
    cmd: Cmd,
    mut config: RunnerConfig,
    transport: ChannelTransport,
) -> Result<(), Box<dyn Error>> {
    if let Cmd::Stage { allow_errors, .. } = &cmd {
        config.allow_errors |= *allow_errors;
    }
    let stager = StagerBuilder::new(config).transport(transport).build()?;

    match cmd {
        Cmd::Stage { notebook, cwd, .. } => {
            let file = std::fs::File::open(&notebook)
                .map_err(|e| format!("cannot open {}: {e}", notebook.display()))?;
            let nb = Notebook::from_reader(std::io::BufReader::new(file))?;
            let cwd = match cwd {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let staged = stager.stage(&nb, &cwd)?;
            tracing::info!(
                shared_path = %staged.shared_path,
                cells = staged.notebook.len(),
                allow_errors = stager.allow_errors(),
                "staged"
            );
        }
        Cmd::Run { path } => {
            let shared = stager.run_notebook(&path)?;
            tracing::info!(shared_path = %shared, "run requested");
        }
        Cmd::Encode { operation, params } => {
            let wire = stager.channel().wire();
            let command = params
                .iter()
                .fold(Command::new(operation), |cmd, (k, v)| cmd.param(k.as_str(), v));
            wire.validate(&command)?;
            println!("{}", wire.encode(&command));
        }
    }
    Ok(())
}
