//! The API session façade

use crate::catalog::{self, TimeUnit};
use crate::config::ClientConfig;
use crate::decode::{DecodeReport, Decoded, Decoder, Record, TypedValue};
use crate::error::{Error, Result};
use crate::http::{HttpTransport, Transport};
use crate::params::{ArgumentBuilder, ParameterStore};
use crate::schema::{Arg, EndpointDescriptor, Registry};
use chrono::Local;
use tracing::{debug, info};
use url::Url;

/// Field added to records to say which site they were fetched for
pub const SITE_FIELD: &str = "site";

/// One authenticated series of calls against the monitoring API
///
/// A session only exists in the ready state: construction checks the API
/// key, then fetches the site list and every site's inventory. Operations
/// take `&mut self` because they merge target overrides into the shared
/// [`ParameterStore`]; callers needing concurrency wrap the session in a
/// lock or open one session per caller.
pub struct ApiSession {
    registry: &'static Registry,
    base_url: Url,
    transport: Option<Box<dyn Transport>>,
    params: ParameterStore,
    sites: Vec<Record>,
    inventories: Vec<Record>,
    last_report: DecodeReport,
}

impl ApiSession {
    /// Open a session over HTTP
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        require_api_key(config)?;
        let transport = HttpTransport::with_config(config.http_config())?;
        Self::with_transport(config, transport).await
    }

    /// Open a session over the given transport
    pub async fn with_transport(
        config: &ClientConfig,
        transport: impl Transport + 'static,
    ) -> Result<Self> {
        let api_key = require_api_key(config)?;
        let mut params = ParameterStore::local_defaults();
        params.set_api_key(api_key);

        let mut session = Self {
            registry: catalog::registry()?,
            base_url: config.base_url()?,
            transport: Some(Box::new(transport)),
            params,
            sites: Vec::new(),
            inventories: Vec::new(),
            last_report: DecodeReport::default(),
        };
        session.discover().await?;
        Ok(session)
    }

    /// Cache sites and inventories; the first site and the first inverter
    /// found become the default arguments
    async fn discover(&mut self) -> Result<()> {
        info!("Initialising SolarEdge API session");
        let sites = self.sites().await?;

        let mut inventories = Vec::with_capacity(sites.len());
        for site in &sites {
            let Some(id) = site.id("id") else { continue };
            info!(site = %id, "Found a site");
            inventories.push(self.site_inventory(Some(&id)).await?);
        }

        self.params.clear_argument(Arg::SiteId);
        if let Some(first) = sites.iter().find_map(|s| s.id("id")) {
            self.params.set_site_id(first);
        }

        let serials: Vec<String> = inventories
            .iter()
            .flat_map(|inventory| inventory.records("inverters"))
            .filter_map(|inverter| inverter.str("SN").map(str::to_string))
            .collect();
        for serial in &serials {
            info!(serial = %serial, "Found an inverter");
        }
        if let Some(first) = serials.first() {
            self.params.set_serial_number(first.clone());
        }

        self.sites = sites;
        self.inventories = inventories;
        Ok(())
    }

    // ========================================================================
    // Lifecycle and cached state
    // ========================================================================

    /// Release the transport; later calls fail with `SessionClosed`
    pub fn close(&mut self) {
        if self.transport.take().is_some() {
            debug!("SolarEdge API session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.transport.is_none()
    }

    /// Ids of the sites found when the session opened
    pub fn site_list(&self) -> Vec<String> {
        self.sites.iter().filter_map(|site| site.id("id")).collect()
    }

    /// Serial numbers of every inverter found when the session opened
    pub fn inverter_list(&self) -> Vec<String> {
        self.inventories
            .iter()
            .flat_map(|inventory| inventory.records("inverters"))
            .filter_map(|inverter| inverter.str("SN").map(str::to_string))
            .collect()
    }

    /// Inventories fetched when the session opened, one per site
    pub fn inventories(&self) -> &[Record] {
        &self.inventories
    }

    pub fn parameters(&self) -> &ParameterStore {
        &self.params
    }

    pub fn parameters_mut(&mut self) -> &mut ParameterStore {
        &mut self.params
    }

    /// Report of the most recent decode
    pub fn last_report(&self) -> &DecodeReport {
        &self.last_report
    }

    /// Date range in days before today
    pub fn set_dates(&mut self, start_days_ago: u64, end_days_ago: u64) {
        let today = Local::now().date_naive();
        self.params.set_days_back(today, start_days_ago, end_days_ago);
    }

    /// Time range covering whole days before today
    pub fn set_datetimes(&mut self, start_days_ago: u64, end_days_ago: u64) {
        let today = Local::now().date_naive();
        self.params
            .set_whole_days_back(today, start_days_ago, end_days_ago);
    }

    pub fn set_time_unit(&mut self, unit: TimeUnit) {
        self.params.set_time_unit(unit);
    }

    // ========================================================================
    // Generic call
    // ========================================================================

    /// Call an endpoint by id and decode the whole response, envelope included
    pub async fn call(&mut self, endpoint_id: &str) -> Result<Decoded<Record>> {
        let endpoint = self.registry.endpoint(endpoint_id)?;
        self.call_endpoint(endpoint).await
    }

    async fn call_endpoint(&mut self, endpoint: &'static EndpointDescriptor) -> Result<Decoded<Record>> {
        let transport = self.transport.as_ref().ok_or(Error::SessionClosed)?;
        let request = ArgumentBuilder::new(&self.base_url, &self.params).build(endpoint)?;
        info!(endpoint = endpoint.id, "Calling API endpoint: {}", endpoint.name);

        let body = transport.get_json(request.url()).await?;

        let decoded = Decoder::new(self.registry).decode(endpoint.response_schema, &body)?;
        self.last_report = decoded.report.clone();
        Ok(decoded)
    }

    /// Call an endpoint and return the payload inside its envelope
    async fn payload(&mut self, endpoint_id: &str) -> Result<TypedValue> {
        let endpoint = self.registry.endpoint(endpoint_id)?;
        let mut decoded = self.call_endpoint(endpoint).await?;
        decoded
            .value
            .take(endpoint.envelope)
            .ok_or_else(|| Error::decode(endpoint.envelope, "response envelope is missing"))
    }

    async fn record(&mut self, endpoint_id: &str) -> Result<Record> {
        let payload = self.payload(endpoint_id).await?;
        payload
            .into_record()
            .ok_or_else(|| Error::decode(endpoint_id, "envelope does not hold a record"))
    }

    /// Records of a list field inside the payload record
    async fn listed(&mut self, endpoint_id: &str, field: &str) -> Result<Vec<Record>> {
        let mut payload = self.record(endpoint_id).await?;
        Ok(payload.take(field).map(TypedValue::into_records).unwrap_or_default())
    }

    fn target_site(&mut self, site: Option<&str>) {
        if let Some(site) = site {
            self.params.set_site_id(site);
        }
    }

    fn current_site(&self) -> TypedValue {
        TypedValue::String(self.params.site_id().unwrap_or_default().to_string())
    }

    // ========================================================================
    // Endpoint operations
    // ========================================================================

    pub async fn current_version(&mut self) -> Result<Record> {
        self.record("current_version").await
    }

    pub async fn supported_versions(&mut self) -> Result<Vec<Record>> {
        Ok(self.payload("supported_versions").await?.into_records())
    }

    /// Every site of the account
    pub async fn sites(&mut self) -> Result<Vec<Record>> {
        self.listed("sites", "site").await
    }

    pub async fn site_details(&mut self, site: Option<&str>) -> Result<Record> {
        self.target_site(site);
        self.record("site_details").await
    }

    pub async fn data_period(&mut self, site: Option<&str>) -> Result<Record> {
        self.target_site(site);
        self.record("data_period").await
    }

    pub async fn site_overview(&mut self, site: Option<&str>) -> Result<Record> {
        self.target_site(site);
        self.record("site_overview").await
    }

    /// Energy series for the current date range and time unit
    pub async fn energy(&mut self, site: Option<&str>) -> Result<Record> {
        self.target_site(site);
        self.record("energy").await
    }

    /// Per-meter energy for the current time range
    pub async fn energy_details(&mut self, site: Option<&str>) -> Result<Record> {
        self.target_site(site);
        self.record("energy_details").await
    }

    pub async fn power(&mut self, site: Option<&str>) -> Result<Record> {
        self.target_site(site);
        self.record("power").await
    }

    pub async fn power_details(&mut self, site: Option<&str>) -> Result<Record> {
        self.target_site(site);
        self.record("power_details").await
    }

    pub async fn power_flow(&mut self, site: Option<&str>) -> Result<Record> {
        self.target_site(site);
        self.record("power_flow").await
    }

    pub async fn storage(&mut self, site: Option<&str>) -> Result<Record> {
        self.target_site(site);
        self.record("storage").await
    }

    pub async fn env_benefits(&mut self, site: Option<&str>) -> Result<Record> {
        self.target_site(site);
        self.record("env_benefits").await
    }

    pub async fn timeframe_energy(&mut self, site: Option<&str>) -> Result<Record> {
        self.target_site(site);
        self.record("timeframe_energy").await
    }

    /// Components of a site, each annotated with the site id
    pub async fn site_components(&mut self, site: Option<&str>) -> Result<Vec<Record>> {
        self.target_site(site);
        let mut components = self.listed("components", "list").await?;
        let site = self.current_site();
        for component in &mut components {
            component.annotate(SITE_FIELD, site.clone());
        }
        Ok(components)
    }

    /// Inventory of a site, annotated with the site id
    pub async fn site_inventory(&mut self, site: Option<&str>) -> Result<Record> {
        self.target_site(site);
        let mut inventory = self.record("inventory").await?;
        inventory.annotate(SITE_FIELD, self.current_site());
        Ok(inventory)
    }

    /// Inverters of a site, each annotated with the site id
    pub async fn inverters(&mut self, site: Option<&str>) -> Result<Vec<Record>> {
        let mut inventory = self.site_inventory(site).await?;
        let site = self.current_site();
        let mut inverters = inventory
            .take("inverters")
            .map(TypedValue::into_records)
            .unwrap_or_default();
        for inverter in &mut inverters {
            inverter.annotate(SITE_FIELD, site.clone());
        }
        Ok(inverters)
    }

    /// Technical data samples of one inverter for the current time range
    pub async fn inverter_telemetry(&mut self, serial: Option<&str>) -> Result<Vec<Record>> {
        if let Some(serial) = serial {
            self.params.set_serial_number(serial);
        }
        self.listed("inverter_data", "telemetries").await
    }
}

impl std::fmt::Debug for ApiSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSession")
            .field("base_url", &self.base_url.as_str())
            .field("closed", &self.is_closed())
            .field("sites", &self.site_list())
            .field("inverters", &self.inverter_list())
            .finish_non_exhaustive()
    }
}

fn require_api_key(config: &ClientConfig) -> Result<&str> {
    config
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or(Error::MissingCredential)
}
