use anyhow::{bail, Context as _, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

use skillsim::gateway::{BodyPayload, Gateway, MockBackend, ReqwestTransport, RequestConfig};
use skillsim::{badges, FileStore, SimConfig, SkillStore};

#[derive(Parser)]
#[command(
    name = "skillsim",
    about = "Simulated skills-tracker backend — dispatch requests without a server",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Data directory for the skill slot and config.toml
    #[arg(long, env = "SKILLSIM_DATA_DIR", global = true)]
    data_dir: Option<std::path::PathBuf>,

    /// Path prefix the simulator claims (default: /api)
    #[arg(long, env = "SKILLSIM_API_PREFIX", global = true)]
    api_prefix: Option<String>,

    /// Artificial response latency in milliseconds (default: 200)
    #[arg(long, env = "SKILLSIM_LATENCY_MS", global = true)]
    latency_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SKILLSIM_LOG", global = true)]
    log: Option<String>,

    /// Write logs to this file path (rotated daily). Optional.
    #[arg(long, env = "SKILLSIM_LOG_FILE", global = true)]
    log_file: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Dispatch one request through the gateway and print the response.
    ///
    /// Paths under the API prefix are answered locally from the skill slot.
    /// Anything else needs --upstream (or the `upstream` config key) to
    /// reach a real server.
    ///
    /// Examples:
    ///   skillsim request GET /api/skills
    ///   skillsim request POST /api/skills --json '{"name":"Go","level":5}'
    ///   skillsim request PATCH /api/skills/<id> --form level=4
    ///   skillsim request DELETE /api/skills/<id>
    ///   skillsim request GET /api/badges
    Request {
        /// HTTP method: GET, POST, PATCH, DELETE, ...
        method: String,
        /// Request path or full URL
        path: String,
        /// Structured JSON body
        #[arg(long, conflicts_with_all = ["text", "form"])]
        json: Option<String>,
        /// Raw text body (JSON parse is attempted at interpretation)
        #[arg(long, conflicts_with = "form")]
        text: Option<String>,
        /// Form field, repeatable: --form name=Go --form level=5
        #[arg(long, value_name = "KEY=VALUE")]
        form: Vec<String>,
        /// Base URL for passthrough of non-API requests
        #[arg(long, env = "SKILLSIM_UPSTREAM")]
        upstream: Option<String>,
    },
    /// Print the badge catalog with earned status.
    ///
    /// Examples:
    ///   skillsim badges
    ///   skillsim badges --json
    Badges {
        /// Print the earned set as a JSON array instead of the table
        #[arg(long)]
        json: bool,
    },
    /// Delete the persisted skill slot.
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = SimConfig::new(
        args.data_dir.clone(),
        args.api_prefix.clone(),
        args.latency_ms,
        args.log.clone(),
    );
    let _log_guard = init_tracing(&config.log, &config.log_format, args.log_file.clone());

    match args.command {
        Command::Request {
            method,
            path,
            json,
            text,
            form,
            upstream,
        } => run_request(&config, method, path, json, text, form, upstream).await,
        Command::Badges { json } => run_badges(&config, json).await,
        Command::Reset => run_reset(&config).await,
    }
}

async fn run_request(
    config: &SimConfig,
    method: String,
    path: String,
    json: Option<String>,
    text: Option<String>,
    form: Vec<String>,
    upstream: Option<String>,
) -> Result<()> {
    let body = parse_body(json, text, form)?;

    let store = Arc::new(FileStore::new(&config.data_dir));
    let backend = MockBackend::new(store)
        .with_api_prefix(config.api_prefix.clone())
        .with_latency(config.latency());

    let mut gateway = Gateway::new(backend);
    if let Some(base) = upstream.or_else(|| config.upstream.clone()) {
        gateway = gateway.with_transport(Arc::new(ReqwestTransport::new(base)));
    }

    let request = RequestConfig::new(method, path).with_body(body);
    let response = gateway.dispatch(request).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn parse_body(
    json: Option<String>,
    text: Option<String>,
    form: Vec<String>,
) -> Result<BodyPayload> {
    if let Some(raw) = json {
        let value = serde_json::from_str(&raw).context("--json body is not valid JSON")?;
        return Ok(BodyPayload::Json(value));
    }
    if let Some(raw) = text {
        return Ok(BodyPayload::Text(raw));
    }
    if form.is_empty() {
        return Ok(BodyPayload::Empty);
    }
    let mut pairs = Vec::with_capacity(form.len());
    for field in form {
        let Some((key, value)) = field.split_once('=') else {
            bail!("--form expects KEY=VALUE, got {field:?}");
        };
        pairs.push((key.to_string(), value.to_string()));
    }
    Ok(BodyPayload::Form(pairs))
}

async fn run_badges(config: &SimConfig, as_json: bool) -> Result<()> {
    let store = FileStore::new(&config.data_dir);
    let skills = store.load().await;
    let earned = badges::compute_badges(&skills);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&earned)?);
        return Ok(());
    }

    let earned_ids: Vec<&str> = earned.iter().map(|b| b.id.as_str()).collect();
    println!(
        "{} skills tracked — {} of {} badges earned",
        skills.len(),
        earned.len(),
        badges::all_definitions().len()
    );
    for (id, name, description) in badges::all_definitions() {
        let mark = if earned_ids.contains(&id) { "*" } else { " " };
        println!("  [{mark}] {id:<4} {name:<14} {description}");
    }
    Ok(())
}

async fn run_reset(config: &SimConfig) -> Result<()> {
    let store = FileStore::new(&config.data_dir);
    match tokio::fs::remove_file(store.path()).await {
        Ok(()) => {
            info!(path = %store.path().display(), "skill slot removed");
            println!("removed {}", store.path().display());
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            println!("nothing to reset — {} does not exist", store.path().display());
        }
        Err(e) => return Err(e).context("failed to remove skill slot"),
    }
    Ok(())
}

/// Initialise the tracing subscriber.
///
/// Returns the non-blocking writer guard when logging to a file; the guard
/// must stay alive for the duration of the process.
fn init_tracing(
    log_level: &str,
    log_format: &str,
    log_file: Option<std::path::PathBuf>,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let use_json = log_format == "json";

    if let Some(path) = log_file {
        let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let filename = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("skillsim.log"));

        // Ensure the directory exists before tracing-appender tries to open it.
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!(
                "warn: could not create log directory '{}': {e} — falling back to stderr",
                dir.display()
            );
            init_stderr_tracing(log_level, use_json);
            return None;
        }

        let appender = tracing_appender::rolling::daily(dir, filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        if use_json {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().json().with_writer(non_blocking))
                .init();
        } else {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().with_writer(non_blocking))
                .init();
        }
        Some(guard)
    } else {
        init_stderr_tracing(log_level, use_json);
        None
    }
}

fn init_stderr_tracing(log_level: &str, use_json: bool) {
    use tracing_subscriber::EnvFilter;

    if use_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(EnvFilter::new(log_level))
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(log_level))
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}
