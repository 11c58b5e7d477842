mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use rfmodel::client::http::{format_redfish_error, Credentials, HttpClient, HttpConfig};
use rfmodel::client::ClientHandle;
use rfmodel::redfish::{get_service_root, get_update_service, SoftwareInventory, UpdateService};
use rfmodel::resource::list_referenced_concurrent;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;

/// Inspect the update service of a Redfish BMC
#[derive(Parser, Debug)]
#[command(name = "rfinspect", version, about, long_about = None)]
struct Args {
    /// BMC endpoint, e.g. https://10.0.0.2
    #[arg(short, long)]
    endpoint: Option<String>,

    /// BMC username
    #[arg(short, long)]
    username: Option<String>,

    /// BMC password
    #[arg(long, env = "RFINSPECT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Accept self-signed certificates
    #[arg(short = 'k', long)]
    insecure: bool,

    /// UpdateService URI (discovered from the service root when omitted)
    #[arg(long)]
    update_service: Option<String>,

    /// Remember endpoint and username for next time
    #[arg(long)]
    save: bool,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show UpdateService fields and actions
    Service,
    /// List firmware inventory
    Firmware {
        /// Fetch members concurrently
        #[arg(long)]
        concurrent: bool,
    },
    /// List software inventory
    Software {
        /// Fetch members concurrently
        #[arg(long)]
        concurrent: bool,
    },
    /// Report whether the UpdateService changed between two reads
    Changed,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(max_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = log_path();
    if let Some(dir) = log_path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    // Logs go to the file only; stdout carries command output
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(writer)
        .with_ansi(false)
        .with_line_number(true)
        .init();

    tracing::info!("logging {:?} to {}", level, log_path.display());
    Ok(Some(guard))
}

/// `<config dir>/rfinspect/rfinspect.log`, or the working directory when the
/// platform has no config dir
fn log_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("rfinspect"))
        .unwrap_or_default()
        .join("rfinspect.log")
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _log_guard = match setup_logging(args.log_level) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Warning: {err:#}");
            None
        }
    };

    if let Err(err) = run(args).await {
        let message = match err.downcast_ref::<rfmodel::Error>() {
            Some(redfish_error) => format!("{err:#}\n{}", format_redfish_error(redfish_error)),
            None => format!("{err:#}"),
        };
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load();

    let endpoint = config
        .effective_endpoint(args.endpoint.as_deref())
        .context("No BMC endpoint configured. Use --endpoint or set RFINSPECT_ENDPOINT")?;
    let username = config.effective_username(args.username.as_deref());
    let insecure = args.insecure || config.insecure;

    tracing::info!("Using endpoint: {}", endpoint);

    let mut http_config = HttpConfig::new(&endpoint).accept_invalid_certs(insecure);
    if let Some(username) = &username {
        let password = args.password.clone().unwrap_or_default();
        http_config = http_config.with_credentials(Credentials::new(username, &password));
    }
    let client: ClientHandle = Arc::new(HttpClient::new(http_config).context("Failed to create HTTP client")?);

    if args.save {
        if let Err(e) = config.remember(&endpoint, username.as_deref(), insecure) {
            tracing::warn!("Failed to save config: {}", e);
        }
    }

    let service = load_update_service(&client, args.update_service.as_deref()).await?;

    match args.command {
        Command::Service => print_service(&service),
        Command::Firmware { concurrent } => {
            let inventories: Vec<SoftwareInventory> = if concurrent {
                list_referenced_concurrent(&client, &service.firmware_inventory).await?
            } else {
                service.firmware_inventories().await?
            };
            print_inventories("firmware", &inventories);
        }
        Command::Software { concurrent } => {
            let inventories: Vec<SoftwareInventory> = if concurrent {
                list_referenced_concurrent(&client, &service.software_inventory).await?
            } else {
                service.software_inventories().await?
            };
            print_inventories("software", &inventories);
        }
        Command::Changed => {
            let changed = service
                .entity
                .has_changed()
                .await
                .context("Failed to re-read UpdateService")?;
            if changed {
                println!("{} changed", service.entity.odata_id);
            } else {
                println!("{} unchanged", service.entity.odata_id);
            }
        }
    }

    Ok(())
}

async fn load_update_service(client: &ClientHandle, uri: Option<&str>) -> Result<UpdateService> {
    if let Some(uri) = uri {
        return get_update_service(client, uri)
            .await
            .with_context(|| format!("Failed to read UpdateService at {}", uri));
    }

    let root = get_service_root(client)
        .await
        .context("Failed to read service root")?;
    tracing::info!(
        "Service root: Redfish {} ({} {})",
        root.redfish_version,
        root.vendor,
        root.product
    );

    root.update_service()
        .await
        .context("Failed to read UpdateService")?
        .with_context(|| format!("{} links no UpdateService", root.entity.odata_id))
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn print_service(service: &UpdateService) {
    println!("{} ({})", or_dash(&service.entity.name), service.entity.odata_id);
    println!("  Enabled:              {}", service.service_enabled);
    if let Some(health) = service.status.health {
        println!("  Health:               {}", health);
    }
    println!("  FirmwareInventory:    {}", or_dash(&service.firmware_inventory));
    println!("  SoftwareInventory:    {}", or_dash(&service.software_inventory));
    println!("  HttpPushUri:          {}", or_dash(&service.http_push_uri));
    println!("  MultipartHttpPushUri: {}", or_dash(&service.multipart_http_push_uri));
    println!("  SimpleUpdate:         {}", or_dash(&service.update_service_target));
    if !service.transfer_protocol.is_empty() {
        println!("    TransferProtocol:   {}", service.transfer_protocol.join(", "));
    }
    println!("  StartUpdate:          {}", or_dash(&service.start_update_target));
    if let Some(oem_actions) = &service.oem_actions {
        println!("  OEM actions:          {} bytes", oem_actions.as_bytes().len());
    }
    if let Some(vendor_actions) = &service.vendor_actions {
        println!("  Vendor actions:       {} bytes", vendor_actions.as_bytes().len());
    }
}

fn print_inventories(kind: &str, inventories: &[SoftwareInventory]) {
    if inventories.is_empty() {
        println!("No {} inventory", kind);
        return;
    }

    println!("{:<24} {:<24} {:<12} {}", "ID", "VERSION", "UPDATEABLE", "RELEASED");
    for inventory in inventories {
        let released = inventory
            .release_date()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:<24} {:<12} {}",
            or_dash(&inventory.entity.id),
            or_dash(&inventory.version),
            inventory.updateable,
            released
        );
    }
}
