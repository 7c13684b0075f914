//! Door opener server: main entry point.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                  │
//! │                                                           │
//! │  RpiGpio / SimBoard   SystemClock   LogEventSink   axum   │
//! │  (GpioBackend)        (Clock)       (EventSink)    (HTTP) │
//! │                                                           │
//! │  ────────────────── Port Trait Boundary ───────────────   │
//! │                                                           │
//! │  ┌─────────────────────────────────────────────────────┐  │
//! │  │  DoorService: HardwareLifecycle · FSM · StatusCache │  │
//! │  │  TokenService                                       │  │
//! │  └─────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────┘
//! ```

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use door_opener::adapters::log_sink::LogEventSink;
use door_opener::adapters::time::SystemClock;
use door_opener::api::{AppState, HttpServer};
use door_opener::app::ports::{Clock, DoorHardware};
use door_opener::app::service::DoorService;
use door_opener::auth::TokenService;
use door_opener::config::{DoorConfig, FileConfig};
use door_opener::drivers::hw_init::HardwareLifecycle;
use door_opener::error::ConfigError;

#[derive(Parser)]
#[command(name = "door-opener")]
#[command(version)]
#[command(about = "Authenticated motorized door controller", long_about = None)]
struct Args {
    /// Shared secret for the rotating API token
    #[arg(long, env = "API_SECRET_KEY", hide_env_values = true)]
    secret: Option<String>,

    /// JSON config file; flags and environment override its values
    #[arg(short, long, env = "DOOR_CONFIG")]
    config: Option<PathBuf>,

    /// Host to bind to [default: 0.0.0.0]
    #[arg(short = 'H', long, env = "DOOR_HOST")]
    host: Option<String>,

    /// Port to listen on [default: 4000]
    #[arg(short, long, env = "DOOR_PORT")]
    port: Option<u16>,

    /// Token window length in seconds [default: 60]
    #[arg(long, env = "DOOR_TOKEN_WINDOW_SECS")]
    token_window_secs: Option<u64>,

    /// Confirmation timeout in seconds [default: 10]
    #[arg(long, env = "DOOR_CONFIRM_TIMEOUT_SECS")]
    confirm_timeout_secs: Option<u64>,

    /// Sensor poll interval in milliseconds [default: 20]
    #[arg(long, env = "DOOR_POLL_MS")]
    poll_ms: Option<u64>,

    /// Network label reported by /api/status [default: staff-net]
    #[arg(long, env = "DOOR_WIFI_NETWORK")]
    wifi_network: Option<String>,

    /// Mirror all log output into this file (read by `door-logs`)
    #[arg(long, env = "DOOR_LOG_FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn load_config(&self) -> Result<FileConfig> {
        let mut cfg = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str::<FileConfig>(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => FileConfig::default(),
        };

        if let Some(host) = &self.host {
            cfg.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            cfg.server.port = port;
        }
        if let Some(secs) = self.token_window_secs {
            cfg.door.token_window_secs = secs;
        }
        if let Some(secs) = self.confirm_timeout_secs {
            cfg.door.confirm_timeout_ms = secs.saturating_mul(1000);
        }
        if let Some(ms) = self.poll_ms {
            cfg.door.poll_interval_ms = ms;
        }
        if let Some(net) = &self.wifi_network {
            cfg.door.wifi_network.clone_from(net);
        }

        cfg.door.validate().context("invalid configuration")?;
        Ok(cfg)
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "door_opener=info,access=info,tower_http=info".into());

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .context("installing log subscriber")?;
    Ok(())
}

#[cfg(feature = "rpi")]
fn build_hardware(config: &DoorConfig, _clock: Arc<dyn Clock>) -> Result<Box<dyn DoorHardware>> {
    use door_opener::adapters::rpi::RpiGpio;

    let gpio = RpiGpio::open().context("opening Raspberry Pi GPIO")?;
    info!("hardware: Raspberry Pi GPIO");
    Ok(Box::new(HardwareLifecycle::new(
        gpio,
        config.pins,
        config.pwm_frequency_hz,
    )))
}

#[cfg(not(feature = "rpi"))]
fn build_hardware(config: &DoorConfig, clock: Arc<dyn Clock>) -> Result<Box<dyn DoorHardware>> {
    use door_opener::adapters::sim_board::SimBoard;

    tracing::warn!("hardware: built without the `rpi` feature, driving a simulated board");
    let board = SimBoard::new(config.pins, clock);
    Ok(Box::new(HardwareLifecycle::new(
        board,
        config.pins,
        config.pwm_frequency_hz,
    )))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    info!("door-opener v{}", env!("CARGO_PKG_VERSION"));

    let cfg = args.load_config()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());

    let secret = args.secret.clone().unwrap_or_default();
    let tokens = TokenService::new(secret, cfg.door.token_window_secs, clock.clone())
        .map_err(|e| match e {
            ConfigError::MissingSecret => anyhow::anyhow!("API_SECRET_KEY is not set"),
            other => anyhow::Error::new(other),
        })?;

    let hw = build_hardware(&cfg.door, clock.clone())?;
    let door = Arc::new(DoorService::new(
        hw,
        Box::new(LogEventSink::new()),
        clock,
        cfg.door.timing(),
    ));

    let reading = door
        .initialize()
        .context("startup hardware initialization failed")?;
    info!(
        "door: ready, sensor reads {:?}, timeout {} ms, poll {} ms",
        reading, cfg.door.confirm_timeout_ms, cfg.door.poll_interval_ms
    );

    let state = AppState {
        door: door.clone(),
        tokens: Arc::new(tokens),
        config: Arc::new(cfg.door),
    };
    let server = HttpServer::new(cfg.server, state);
    info!("http: binding {}", server.socket_addr());
    server.run(shutdown_signal()).await.context("HTTP server failed")?;

    door.shutdown();
    info!("door-opener stopped");
    Ok(())
}
