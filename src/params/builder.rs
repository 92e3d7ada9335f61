//! Request URL construction

use super::store::ParameterStore;
use crate::error::{Error, Result};
use crate::schema::{Arg, EndpointDescriptor, Param};
use crate::template;
use url::Url;

/// Placeholder shown instead of the API key in logs
const REDACTED: &str = "***";

/// A fully built request for one endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    endpoint: &'static EndpointDescriptor,
    url: Url,
}

impl Request {
    pub fn endpoint(&self) -> &'static EndpointDescriptor {
        self.endpoint
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// URL with the API key masked, for logging
    pub fn redacted(&self) -> String {
        redact(&self.url)
    }
}

/// Mask the `api_key` query value of a URL
pub fn redact(url: &Url) -> String {
    if !url.query_pairs().any(|(name, _)| name == Param::ApiKey.as_str()) {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == Param::ApiKey.as_str() {
                REDACTED.to_string()
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();
    let mut masked = url.clone();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

/// Builds request URLs from endpoint descriptors and the current store
#[derive(Debug, Clone, Copy)]
pub struct ArgumentBuilder<'a> {
    base_url: &'a Url,
    store: &'a ParameterStore,
}

impl<'a> ArgumentBuilder<'a> {
    pub fn new(base_url: &'a Url, store: &'a ParameterStore) -> Self {
        Self { base_url, store }
    }

    /// Build the request URL for `endpoint`
    ///
    /// Fails with `MissingArgument` when a required path argument is unset.
    /// Unset query parameters are left out; the rest follow the endpoint's
    /// declared order.
    pub fn build(&self, endpoint: &'static EndpointDescriptor) -> Result<Request> {
        let store = self.store;
        // A blank argument would render an empty path segment
        let argument = |arg: Arg| store.argument(arg).filter(|v| !v.trim().is_empty());
        for arg in endpoint.required_arguments {
            if argument(*arg).is_none() {
                return Err(Error::missing_argument(endpoint.id, arg.as_str()));
            }
        }

        let lookup = |name: &str| Arg::from_placeholder(name).and_then(argument);
        let mut segments = Vec::new();
        for segment in endpoint.url_template.split('/').filter(|s| !s.is_empty()) {
            segments.push(template::render(segment, lookup)?);
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("base URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(&segments);

        let query: Vec<(&'static str, String)> = endpoint
            .optional_parameters
            .iter()
            .filter_map(|param| Some((param.as_str(), self.store.parameter(*param)?)))
            .collect();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(Request { endpoint, url })
    }
}
