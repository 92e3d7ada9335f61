//! CLI runner - executes commands

use crate::catalog::{self, TimeUnit};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::decode::Record;
use crate::error::{Error, Result};
use crate::session::ApiSession;
use crate::sink::{energy_rows, telemetry_rows, JsonLinesSink, LineProtocolSink, Row, Sink};
use crate::types::{JsonValue, OptionStringExt};
use serde_json::json;
use std::io::{self, Write};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Endpoints => self.endpoints(),
            Commands::Sites => self.sites().await,
            Commands::Inventory => self.inventory().await,
            Commands::Versions => self.versions().await,
            Commands::Energy {
                from,
                to,
                unit,
                site,
                measurement,
            } => {
                self.energy(*from, *to, *unit, site.as_deref(), measurement.as_deref())
                    .await
            }
            Commands::Telemetry { from, to, serial } => {
                self.telemetry(*from, *to, serial.as_deref()).await
            }
            Commands::Call {
                endpoint,
                site,
                serial,
            } => self.call(endpoint, site.as_deref(), serial.as_deref()).await,
        }
    }

    /// Configuration with command-line overrides applied
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::load(self.cli.config.as_deref())?;
        if let Some(key) = self.cli.api_key.clone().none_if_blank() {
            config.api_key = Some(key);
        }
        if let Some(url) = self.cli.base_url.clone().none_if_blank() {
            config.base_url = url;
        }
        Ok(config)
    }

    async fn open(&self) -> Result<ApiSession> {
        let config = self.client_config()?;
        ApiSession::connect(&config).await
    }

    // ========================================================================
    // Commands
    // ========================================================================

    fn endpoints(&self) -> Result<()> {
        let registry = catalog::registry()?;
        let mut out = io::stdout().lock();
        for endpoint in registry.endpoints() {
            let params: Vec<&str> = endpoint
                .optional_parameters
                .iter()
                .map(|p| p.as_str())
                .collect();
            writeln!(
                out,
                "{:<20} {:<48} {}",
                endpoint.id,
                endpoint.url_template,
                params.join(",")
            )?;
        }
        Ok(())
    }

    async fn sites(&self) -> Result<()> {
        let mut session = self.open().await?;
        let sites = session.sites().await?;
        session.close();
        print_records(&sites)
    }

    async fn inventory(&self) -> Result<()> {
        let mut session = self.open().await?;
        session.close();
        print_records(session.inventories())
    }

    async fn versions(&self) -> Result<()> {
        let mut session = self.open().await?;
        let current = session.current_version().await?;
        let supported = session.supported_versions().await?;
        session.close();

        let supported: Vec<JsonValue> = supported.iter().map(Record::to_json).collect();
        print_json(&json!({
            "current": current.to_json(),
            "supported": supported,
        }))
    }

    async fn energy(
        &self,
        from: u64,
        to: u64,
        unit: TimeUnit,
        site: Option<&str>,
        measurement: Option<&str>,
    ) -> Result<()> {
        check_range(from, to)?;
        let mut session = self.open().await?;
        session.set_dates(from, to);
        session.set_time_unit(unit);

        let sites = match site {
            Some(site) => vec![site.to_string()],
            None => session.site_list(),
        };
        let measurement = measurement.map_or_else(|| energy_measurement(unit), str::to_string);

        let mut rows = Vec::new();
        for site in &sites {
            let energy = session.energy(Some(site.as_str())).await?;
            let site_rows = energy_rows(site, unit, &measurement, &energy);
            info!(site = %site, rows = site_rows.len(), "Collected energy samples");
            rows.extend(site_rows);
        }
        session.close();
        self.write_rows(&rows)
    }

    async fn telemetry(&self, from: u64, to: u64, serial: Option<&str>) -> Result<()> {
        check_range(from, to)?;
        let mut session = self.open().await?;
        session.set_datetimes(from, to);

        let site = session
            .parameters()
            .site_id()
            .map(str::to_string)
            .ok_or_else(|| Error::missing_argument("inverter_data", "siteid"))?;
        let telemetries = session.inverter_telemetry(serial).await?;
        session.close();

        let rows = telemetry_rows(&site, &telemetries);
        info!(site = %site, rows = rows.len(), "Collected inverter telemetry");
        self.write_rows(&rows)
    }

    async fn call(&self, endpoint: &str, site: Option<&str>, serial: Option<&str>) -> Result<()> {
        // Fail on a typo before any network traffic
        catalog::registry()?.endpoint(endpoint)?;

        let mut session = self.open().await?;
        if let Some(site) = site {
            session.parameters_mut().set_site_id(site);
        }
        if let Some(serial) = serial {
            session.parameters_mut().set_serial_number(serial);
        }
        let decoded = session.call(endpoint).await?;
        session.close();

        if !decoded.report.is_clean() {
            info!(
                unexpected = decoded.report.unexpected_fields.len(),
                unknown_enums = decoded.report.unknown_enums.len(),
                "Response did not fully match its schema"
            );
        }
        print_json(&decoded.value.to_json())
    }

    fn write_rows(&self, rows: &[Row]) -> Result<()> {
        let out = io::stdout().lock();
        match self.cli.format {
            OutputFormat::Json => JsonLinesSink::new(out).write(rows),
            OutputFormat::Line => LineProtocolSink::new(out).write(rows),
        }
    }
}

/// Measurement name for an energy series, e.g. `hourly_energy`
pub(crate) fn energy_measurement(unit: TimeUnit) -> String {
    let period = match unit {
        TimeUnit::QuarterOfAnHour => "quarter_hourly",
        TimeUnit::Hour => "hourly",
        TimeUnit::Day => "daily",
        TimeUnit::Week => "weekly",
        TimeUnit::Month => "monthly",
        TimeUnit::Year => "yearly",
    };
    format!("{period}_energy")
}

/// Ranges count days back from today, so the start must not be after the end
pub(crate) fn check_range(from: u64, to: u64) -> Result<()> {
    if from < to {
        return Err(Error::config(format!(
            "--from ({from} days ago) must not be later than --to ({to} days ago)"
        )));
    }
    Ok(())
}

fn print_records(records: &[Record]) -> Result<()> {
    let mut out = io::stdout().lock();
    for record in records {
        serde_json::to_writer(&mut out, &record.to_json())?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

fn print_json(value: &JsonValue) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}
