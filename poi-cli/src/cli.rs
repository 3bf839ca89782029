use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::Text;
use poi_core::{
    Config, Coordinate, Endpoint, HttpTransport, PointOfInterest, PointsOfInterest, RequestLoader,
    TransportClient,
};
use tracing::{debug, info};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "poi", version, about = "Points of interest near a coordinate")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set the service endpoint and request timeout.
    Configure,

    /// List points of interest near a coordinate.
    Nearby {
        /// Latitude in decimal degrees, [-90, 90].
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees, [-180, 180].
        #[arg(long, allow_hyphen_values = true)]
        long: f64,

        /// Override the configured endpoint for this call.
        #[arg(long)]
        endpoint: Option<String>,

        /// Print the raw result as pretty JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print where the config file lives.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Nearby {
                lat,
                long,
                endpoint,
                json,
            } => {
                let loader = loader_from_config(&Config::load()?, endpoint.as_deref())?;
                let points = nearby(&loader, Coordinate::new(lat, long)).await?;
                println!("{}", render(&points, json)?);
                Ok(())
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let current = config
        .endpoint
        .clone()
        .unwrap_or_else(|| Endpoint::DEFAULT_URL.to_string());
    let endpoint = Text::new("Endpoint URL:")
        .with_default(&current)
        .prompt()
        .context("Failed to read endpoint")?;
    config.set_endpoint(endpoint.trim())?;

    let current = config.timeout_secs.map(|s| s.to_string()).unwrap_or_default();
    let timeout = Text::new("Request timeout in seconds (empty for none):")
        .with_default(&current)
        .prompt()
        .context("Failed to read timeout")?;
    config.set_timeout_secs(parse_timeout(&timeout)?)?;

    config.save()?;

    let path = Config::config_file_path()?;
    info!(path = %path.display(), "configuration saved");
    println!("Saved configuration to {}", path.display());

    Ok(())
}

/// Loader for the configured endpoint, or `endpoint` when given.
fn loader_from_config(
    config: &Config,
    endpoint: Option<&str>,
) -> Result<RequestLoader<PointsOfInterest, HttpTransport>> {
    let endpoint = match endpoint {
        Some(raw) => Endpoint::parse(raw)?,
        None => config.endpoint()?,
    };
    debug!(%endpoint, "resolved endpoint");

    let transport = match config.timeout() {
        Some(timeout) => HttpTransport::with_timeout(timeout)?,
        None => HttpTransport::shared(),
    };

    Ok(RequestLoader::with_transport(PointsOfInterest::new(endpoint), transport))
}

async fn nearby<T: TransportClient>(
    loader: &RequestLoader<PointsOfInterest, T>,
    coordinate: Coordinate,
) -> Result<Vec<PointOfInterest>> {
    loader.load(&coordinate).await.with_context(|| {
        format!(
            "Failed to load points of interest near ({}, {})",
            coordinate.latitude, coordinate.longitude
        )
    })
}

fn parse_timeout(raw: &str) -> Result<Option<u64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let secs = raw
        .parse::<u64>()
        .with_context(|| format!("Timeout '{raw}' is not a whole number of seconds"))?;
    Ok(Some(secs))
}

fn render(points: &[PointOfInterest], json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(points).context("Failed to serialize results");
    }

    if points.is_empty() {
        return Ok("No points of interest found.".to_string());
    }

    Ok(points
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join("\n"))
}
