//! Session-wide argument and parameter values

use crate::catalog::{MeterType, SiteStatus, SortOrder, SortProperty, SystemUnits, TimeUnit};
use crate::schema::{Arg, Param};
use chrono::{Days, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Wire format of date parameters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format of datetime parameters
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current values for every path argument and query parameter
///
/// Setters mutate in place and return `&mut Self` so calls chain. The store
/// is read, never written, while a request is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterStore {
    api_key: Option<String>,
    site_id: Option<String>,
    serial_number: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    start_time: Option<NaiveDateTime>,
    end_time: Option<NaiveDateTime>,
    time_unit: Option<TimeUnit>,
    size: Option<u32>,
    start_index: Option<u32>,
    search_text: Option<String>,
    sort_property: Option<SortProperty>,
    sort_order: Option<SortOrder>,
    status: Option<SiteStatus>,
    meters: Vec<MeterType>,
    serials: Vec<String>,
    system_units: Option<SystemUnits>,
}

impl ParameterStore {
    /// Store with nothing set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Store with the session defaults relative to `now`: hourly granularity,
    /// dates from yesterday to today and times from 24 hours ago to now
    pub fn with_defaults(now: NaiveDateTime) -> Self {
        let yesterday = now - chrono::Duration::days(1);
        Self {
            start_date: Some(yesterday.date()),
            end_date: Some(now.date()),
            start_time: Some(yesterday),
            end_time: Some(now),
            time_unit: Some(TimeUnit::Hour),
            ..Self::default()
        }
    }

    /// Session defaults relative to the local clock
    pub fn local_defaults() -> Self {
        Self::with_defaults(Local::now().naive_local())
    }

    // ========================================================================
    // Arguments
    // ========================================================================

    pub fn set_api_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn set_site_id(&mut self, site_id: impl Into<String>) -> &mut Self {
        self.site_id = Some(site_id.into());
        self
    }

    pub fn set_serial_number(&mut self, serial: impl Into<String>) -> &mut Self {
        self.serial_number = Some(serial.into());
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn site_id(&self) -> Option<&str> {
        self.site_id.as_deref()
    }

    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }

    /// Value substituted for a path placeholder
    pub fn argument(&self, arg: Arg) -> Option<&str> {
        match arg {
            Arg::SiteId => self.site_id(),
            Arg::SerialNumber => self.serial_number(),
        }
    }

    pub fn clear_argument(&mut self, arg: Arg) -> &mut Self {
        match arg {
            Arg::SiteId => self.site_id = None,
            Arg::SerialNumber => self.serial_number = None,
        }
        self
    }

    // ========================================================================
    // Date ranges
    // ========================================================================

    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) -> &mut Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn set_time_range(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> &mut Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    /// Dates counted back from `today`
    pub fn set_days_back(&mut self, today: NaiveDate, start: u64, end: u64) -> &mut Self {
        self.set_date_range(days_before(today, start), days_before(today, end))
    }

    /// Whole days counted back from `today`: the start day from midnight,
    /// the end day up to 23:59:59
    pub fn set_whole_days_back(&mut self, today: NaiveDate, start: u64, end: u64) -> &mut Self {
        let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        self.set_time_range(
            days_before(today, start).and_time(NaiveTime::MIN),
            days_before(today, end).and_time(last_second),
        )
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn start_time(&self) -> Option<NaiveDateTime> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.end_time
    }

    // ========================================================================
    // Filters
    // ========================================================================

    pub fn set_time_unit(&mut self, unit: TimeUnit) -> &mut Self {
        self.time_unit = Some(unit);
        self
    }

    pub fn time_unit(&self) -> Option<TimeUnit> {
        self.time_unit
    }

    pub fn set_page(&mut self, size: u32, start_index: u32) -> &mut Self {
        self.size = Some(size);
        self.start_index = Some(start_index);
        self
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn set_sort(&mut self, property: SortProperty, order: SortOrder) -> &mut Self {
        self.sort_property = Some(property);
        self.sort_order = Some(order);
        self
    }

    pub fn set_status(&mut self, status: SiteStatus) -> &mut Self {
        self.status = Some(status);
        self
    }

    pub fn set_meters(&mut self, meters: impl IntoIterator<Item = MeterType>) -> &mut Self {
        self.meters = meters.into_iter().collect();
        self
    }

    pub fn set_serials<S: Into<String>>(&mut self, serials: impl IntoIterator<Item = S>) -> &mut Self {
        self.serials = serials.into_iter().map(Into::into).collect();
        self
    }

    pub fn set_system_units(&mut self, units: SystemUnits) -> &mut Self {
        self.system_units = Some(units);
        self
    }

    /// Unset a query parameter so it is no longer sent
    pub fn unset(&mut self, param: Param) -> &mut Self {
        match param {
            Param::ApiKey => self.api_key = None,
            Param::Size => self.size = None,
            Param::StartIndex => self.start_index = None,
            Param::SearchText => self.search_text = None,
            Param::SortProperty => self.sort_property = None,
            Param::SortOrder => self.sort_order = None,
            Param::Status => self.status = None,
            Param::StartDate => self.start_date = None,
            Param::EndDate => self.end_date = None,
            Param::StartTime => self.start_time = None,
            Param::EndTime => self.end_time = None,
            Param::TimeUnit => self.time_unit = None,
            Param::Meters => self.meters.clear(),
            Param::Serials => self.serials.clear(),
            Param::SystemUnits => self.system_units = None,
        }
        self
    }

    /// Wire value of a query parameter, `None` when unset
    pub fn parameter(&self, param: Param) -> Option<String> {
        match param {
            Param::ApiKey => self.api_key.clone(),
            Param::Size => self.size.map(|v| v.to_string()),
            Param::StartIndex => self.start_index.map(|v| v.to_string()),
            Param::SearchText => self.search_text.clone(),
            Param::SortProperty => self.sort_property.map(|v| v.as_str().to_string()),
            Param::SortOrder => self.sort_order.map(|v| v.as_str().to_string()),
            Param::Status => self.status.map(|v| v.as_str().to_string()),
            Param::StartDate => self.start_date.map(|d| d.format(DATE_FORMAT).to_string()),
            Param::EndDate => self.end_date.map(|d| d.format(DATE_FORMAT).to_string()),
            Param::StartTime => self.start_time.map(|t| t.format(DATETIME_FORMAT).to_string()),
            Param::EndTime => self.end_time.map(|t| t.format(DATETIME_FORMAT).to_string()),
            Param::TimeUnit => self.time_unit.map(|v| v.as_str().to_string()),
            Param::Meters => join(self.meters.iter().map(MeterType::as_str)),
            Param::Serials => join(self.serials.iter().map(String::as_str)),
            Param::SystemUnits => self.system_units.map(|v| v.as_str().to_string()),
        }
    }

    pub fn is_set(&self, param: Param) -> bool {
        self.parameter(param).is_some()
    }
}

fn days_before(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// Comma-separated list, `None` when empty
fn join<'a>(items: impl Iterator<Item = &'a str>) -> Option<String> {
    let joined = items.collect::<Vec<_>>().join(",");
    (!joined.is_empty()).then_some(joined)
}
