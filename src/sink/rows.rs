//! Conversion of decoded records into sink rows

use super::types::Row;
use crate::catalog::TimeUnit;
use crate::decode::Record;
use chrono::Timelike;
use tracing::warn;

/// Tag carrying the site id
pub const SITE_TAG: &str = "site_number";

/// Measurement name of inverter telemetry rows
pub const TELEMETRY_MEASUREMENT: &str = "inverter_telemetry";

const MONTH_FORMAT: &str = "%b %Y";

/// Rows for the samples of an energy record
///
/// Each sample becomes `generated` plus its `month`; hourly series also
/// carry the `hour` of the sample.
pub fn energy_rows(site: &str, time_unit: TimeUnit, measurement: &str, energy: &Record) -> Vec<Row> {
    energy
        .records("values")
        .into_iter()
        .filter_map(|sample| {
            let date = sample.datetime("date")?;
            let mut row = Row::new(measurement, date)
                .tag(SITE_TAG, site)
                .field("generated", sample.float("value").unwrap_or(0.0))
                .field("month", date.format(MONTH_FORMAT).to_string());
            if time_unit == TimeUnit::Hour {
                row = row.field("hour", i64::from(date.hour()));
            }
            Some(row)
        })
        .collect()
}

/// Rows for inverter telemetry samples
///
/// Phase values come from the first phase and are left out when the
/// sample has none.
pub fn telemetry_rows(site: &str, telemetries: &[Record]) -> Vec<Row> {
    telemetries
        .iter()
        .filter_map(|sample| {
            let Some(date) = sample.datetime("date") else {
                warn!("Skipping telemetry sample without a date");
                return None;
            };
            let mut row = Row::new(TELEMETRY_MEASUREMENT, date)
                .tag(SITE_TAG, site)
                .field("dcvoltage", sample.float("dcVoltage").unwrap_or(0.0))
                .field("month", date.format(MONTH_FORMAT).to_string());
            if let Some(temperature) = sample.float("temperature") {
                row = row.field("temperature", temperature);
            }
            if let Some(phase) = sample.record("L1Data") {
                for (field, source) in [
                    ("accurrent", "acCurrent"),
                    ("acvoltage", "acVoltage"),
                    ("acfrequency", "acFrequency"),
                ] {
                    if let Some(value) = phase.float(source) {
                        row = row.field(field, value);
                    }
                }
            }
            Some(row)
        })
        .collect()
}
