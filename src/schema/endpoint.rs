//! Endpoint descriptors
//!
//! An endpoint couples a URL template with the arguments it substitutes, the
//! optional query parameters it accepts and the schema of its response.

use std::fmt;

/// Path arguments substituted into URL templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arg {
    SiteId,
    SerialNumber,
}

impl Arg {
    pub const ALL: &'static [Arg] = &[Arg::SiteId, Arg::SerialNumber];

    /// Placeholder name used in templates
    pub fn as_str(&self) -> &'static str {
        match self {
            Arg::SiteId => "siteid",
            Arg::SerialNumber => "serialnumber",
        }
    }

    /// Reverse of [`Arg::as_str`]
    pub fn from_placeholder(name: &str) -> Option<Arg> {
        Self::ALL.iter().copied().find(|a| a.as_str() == name)
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters accepted by endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    ApiKey,
    Size,
    StartIndex,
    SearchText,
    SortProperty,
    SortOrder,
    Status,
    StartDate,
    EndDate,
    StartTime,
    EndTime,
    TimeUnit,
    Meters,
    Serials,
    SystemUnits,
}

impl Param {
    /// Name on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Param::ApiKey => "api_key",
            Param::Size => "size",
            Param::StartIndex => "startIndex",
            Param::SearchText => "searchText",
            Param::SortProperty => "sortProperty",
            Param::SortOrder => "sortOrder",
            Param::Status => "Status",
            Param::StartDate => "startDate",
            Param::EndDate => "endDate",
            Param::StartTime => "startTime",
            Param::EndTime => "endTime",
            Param::TimeUnit => "timeUnit",
            Param::Meters => "meters",
            Param::Serials => "serials",
            Param::SystemUnits => "systemUnits",
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one REST call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Stable identifier, e.g. `energy`
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Path relative to the API base URL with `{placeholder}`s
    pub url_template: &'static str,
    /// Arguments substituted into the template, in template order
    pub required_arguments: &'static [Arg],
    /// Query parameters, in the order they are emitted
    pub optional_parameters: &'static [Param],
    /// Schema of the whole response body
    pub response_schema: &'static str,
    /// Top-level field of the response that wraps the payload
    pub envelope: &'static str,
}

impl EndpointDescriptor {
    /// Whether the endpoint needs this argument
    pub fn requires(&self, arg: Arg) -> bool {
        self.required_arguments.contains(&arg)
    }

    /// Whether the endpoint accepts this parameter
    pub fn accepts(&self, param: Param) -> bool {
        self.optional_parameters.contains(&param)
    }
}
