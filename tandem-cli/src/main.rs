use anyhow::{Context, Result};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use tandem_server::{DEFAULT_COMMAND_BUFFER, DEFAULT_MAX_MESSAGE_SIZE, DEFAULT_PORT, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Pairs two clients per room and relays their call negotiation.
#[derive(Parser, Debug)]
#[command(name = "tandem", version, about)]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "TANDEM_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    #[arg(short, long, env = "TANDEM_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Queue depth between connections and the relay.
    #[arg(long, env = "TANDEM_COMMAND_BUFFER", default_value_t = DEFAULT_COMMAND_BUFFER)]
    command_buffer: usize,

    /// Largest accepted WebSocket frame in bytes.
    #[arg(long, env = "TANDEM_MAX_MESSAGE_SIZE", default_value_t = DEFAULT_MAX_MESSAGE_SIZE)]
    max_message_size: usize,

    /// Log filter, e.g. `info` or `tandem_server=debug`. `RUST_LOG` wins if set.
    #[arg(long, env = "TANDEM_LOG", default_value = "info")]
    log: String,
}

impl Cli {
    fn server_config(&self) -> ServerConfig {
        ServerConfig::new(SocketAddr::new(self.host, self.port))
            .with_command_buffer(self.command_buffer)
            .with_max_message_size(self.max_message_size)
    }
}

fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("Invalid log filter '{}'", default_filter))?,
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log)?;

    let config = cli.server_config();
    info!("Starting tandem signaling relay on {}", config.bind_addr);

    tandem_server::serve(config)
        .await
        .context("Signaling relay failed")?;

    Ok(())
}
