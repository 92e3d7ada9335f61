use super::runner::{check_range, energy_measurement};
use super::*;
use crate::catalog::TimeUnit;
use clap::Parser;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test]
fn test_parse_energy_defaults() {
    let cli = Cli::try_parse_from(["solaredge-etl", "energy"]).unwrap();
    assert_eq!(cli.format, OutputFormat::Json);
    match cli.command {
        Commands::Energy {
            from,
            to,
            unit,
            site,
            measurement,
        } => {
            assert_eq!((from, to), (1, 0));
            assert_eq!(unit, TimeUnit::Hour);
            assert_eq!(site, None);
            assert_eq!(measurement, None);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_energy_unit_and_global_flags() {
    let cli = Cli::try_parse_from([
        "solaredge-etl",
        "energy",
        "--unit",
        "day",
        "--site",
        "42",
        "--format",
        "line",
        "--api-key",
        "KEY",
    ])
    .unwrap();
    assert_eq!(cli.format, OutputFormat::Line);
    assert_eq!(cli.api_key.as_deref(), Some("KEY"));
    let Commands::Energy { unit, site, .. } = cli.command else {
        panic!("expected energy");
    };
    assert_eq!(unit, TimeUnit::Day);
    assert_eq!(site.as_deref(), Some("42"));
}

#[test]
fn test_parse_rejects_unknown_unit() {
    assert!(Cli::try_parse_from(["solaredge-etl", "energy", "--unit", "FORTNIGHT"]).is_err());
}

#[test]
fn test_parse_call() {
    let cli = Cli::try_parse_from(["solaredge-etl", "call", "inverter_data", "--serial", "SN-1"]).unwrap();
    let Commands::Call {
        endpoint,
        site,
        serial,
    } = cli.command
    else {
        panic!("expected call");
    };
    assert_eq!(endpoint, "inverter_data");
    assert_eq!(site, None);
    assert_eq!(serial.as_deref(), Some("SN-1"));
}

#[test_case(TimeUnit::QuarterOfAnHour, "quarter_hourly_energy")]
#[test_case(TimeUnit::Hour, "hourly_energy")]
#[test_case(TimeUnit::Day, "daily_energy")]
#[test_case(TimeUnit::Year, "yearly_energy")]
fn test_energy_measurement(unit: TimeUnit, expected: &str) {
    assert_eq!(energy_measurement(unit), expected);
}

#[test]
fn test_check_range() {
    assert!(check_range(7, 0).is_ok());
    assert!(check_range(1, 1).is_ok());
    assert!(check_range(0, 3).is_err());
}

#[test]
fn test_endpoints_needs_no_credentials() {
    let cli = Cli::try_parse_from(["solaredge-etl", "endpoints"]).unwrap();
    let runtime = tokio::runtime::Runtime::new().unwrap();
    runtime.block_on(Runner::new(cli).run()).unwrap();
}
