//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: config → session discovery → HTTP
//! requests → decoded records → sink rows

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use solaredge_etl::catalog::{InverterMode, TimeUnit};
use solaredge_etl::sink::{energy_rows, telemetry_rows, JsonLinesSink, LineProtocolSink, Sink};
use solaredge_etl::{ApiSession, ClientConfig, Error};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Fixtures
// ============================================================================

fn site(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Site {id}"),
        "accountId": 77,
        "status": "Active",
        "peakPower": 4.2,
        "lastUpdateTime": "2024-03-02 09:15:00",
        "installationDate": "2021-06-10 00:00:00",
        "type": "Optimizers & Inverters",
        "location": {
            "country": "United Kingdom",
            "city": "York",
            "address": "2 Panel Row",
            "timeZone": "Europe/London"
        },
        "primaryModule": {"manufacturerName": "Acme", "modelName": "A-400", "maximumPower": 400.0}
    })
}

fn config(server: &MockServer) -> ClientConfig {
    let mut config = ClientConfig::with_api_key("KEY");
    config.base_url = server.uri();
    config
}

/// One site with one inverter, mounted on the server
async fn mount_account(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/sites/list"))
        .and(query_param("api_key", "KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sites": {"count": 1, "site": [site(1)]}
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/site/1/inventory"))
        .and(query_param("api_key", "KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Inventory": {
                "meters": [],
                "sensors": [],
                "gateways": [],
                "batteries": [],
                "inverters": [{
                    "SN": "7F123456-AB",
                    "name": "Inverter 1",
                    "manufacturer": "SolarEdge",
                    "model": "SE4000H",
                    "communicationMethod": "WIFI",
                    "cpuVersion": "4.14.105",
                    "connectedOptimizers": 12
                }]
            }
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Session discovery
// ============================================================================

#[tokio::test]
async fn test_connect_discovers_account() {
    let server = MockServer::start().await;
    mount_account(&server).await;

    let session = ApiSession::connect(&config(&server)).await.unwrap();

    assert_eq!(session.site_list(), vec!["1".to_string()]);
    assert_eq!(session.inverter_list(), vec!["7F123456-AB".to_string()]);
    assert_eq!(session.parameters().site_id(), Some("1"));
    assert_eq!(session.parameters().serial_number(), Some("7F123456-AB"));

    let inventory = &session.inventories()[0];
    let inverter = inventory.records("inverters")[0];
    assert_eq!(inverter.integer("connectedOptimizers"), Some(12));
    assert_eq!(inventory.str("site"), Some("1"));
}

#[tokio::test]
async fn test_connect_rejected_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sites/list"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Invalid token"))
        .expect(1)
        .mount(&server)
        .await;

    let err = ApiSession::connect(&config(&server)).await.unwrap_err();
    match err {
        Error::HttpStatus { status, ref body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "Invalid token");
        }
        other => panic!("expected HTTP status error, got {other:?}"),
    }
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_connect_without_key_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = ClientConfig::default();
    config.base_url = server.uri();
    let err = ApiSession::connect(&config).await.unwrap_err();
    assert!(matches!(err, Error::MissingCredential));
}

// ============================================================================
// Energy to rows
// ============================================================================

#[tokio::test]
async fn test_daily_energy_to_line_protocol() {
    let server = MockServer::start().await;
    mount_account(&server).await;

    Mock::given(method("GET"))
        .and(path("/site/1/energy"))
        .and(query_param("api_key", "KEY"))
        .and(query_param("timeUnit", "DAY"))
        .and(query_param("startDate", "2024-03-01"))
        .and(query_param("endDate", "2024-03-02"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "energy": {
                "timeUnit": "DAY",
                "unit": "Wh",
                "measuredBy": "INVERTER",
                "values": [
                    {"date": "2024-03-01 00:00:00", "value": 1234.5},
                    {"date": "2024-03-02 00:00:00", "value": null}
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = ApiSession::connect(&config(&server)).await.unwrap();
    let start = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let end = chrono::NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
    session.parameters_mut().set_date_range(start, end);
    session.set_time_unit(TimeUnit::Day);

    let energy = session.energy(None).await.unwrap();
    assert!(session.last_report().is_clean());

    let rows = energy_rows("1", TimeUnit::Day, "daily_energy", &energy);
    let mut sink = LineProtocolSink::new(Vec::new());
    sink.write(&rows).unwrap();
    let output = String::from_utf8(sink.into_inner()).unwrap();

    assert_eq!(
        output,
        "daily_energy,site_number=1 generated=1234.5,month=\"Mar 2024\" 1709251200000000000\n\
         daily_energy,site_number=1 generated=0,month=\"Mar 2024\" 1709337600000000000\n"
    );
}

// ============================================================================
// Telemetry to rows
// ============================================================================

#[tokio::test]
async fn test_inverter_telemetry_to_json_lines() {
    let server = MockServer::start().await;
    mount_account(&server).await;

    Mock::given(method("GET"))
        .and(path("/equipment/1/7F123456-AB/data"))
        .and(query_param("api_key", "KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "count": 1,
                "telemetries": [{
                    "date": "2024-03-01 12:05:00",
                    "totalActivePower": 2100.0,
                    "dcVoltage": 380.5,
                    "groundFaultResistance": 2700.0,
                    "powerLimit": 100.0,
                    "totalEnergy": 5900000.0,
                    "temperature": 41.25,
                    "inverterMode": "MPPT",
                    "operationMode": 0,
                    "L1Data": {
                        "acCurrent": 9.1,
                        "acVoltage": 239.4,
                        "acFrequency": 50.01,
                        "apparentPower": 2180.0,
                        "activePower": 2100.0,
                        "reactivePower": 310.0,
                        "cosPhi": 1.0
                    }
                }]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = ApiSession::connect(&config(&server)).await.unwrap();
    session.set_datetimes(1, 0);
    let telemetries = session.inverter_telemetry(None).await.unwrap();

    assert_eq!(telemetries.len(), 1);
    let mode = telemetries[0].enumeration("inverterMode").unwrap();
    assert_eq!(InverterMode::from_decoded(mode), Some(InverterMode::Mppt));
    // operation mode 0 is not a documented value
    assert!(telemetries[0].enumeration("operationMode").unwrap().is_unknown());
    assert_eq!(session.last_report().unknown_enums.len(), 1);

    let rows = telemetry_rows("1", &telemetries);
    let mut sink = JsonLinesSink::new(Vec::new());
    sink.write(&rows).unwrap();
    let output = String::from_utf8(sink.into_inner()).unwrap();
    let line: Value = serde_json::from_str(output.trim_end()).unwrap();

    assert_eq!(
        line,
        json!({
            "measurement": "inverter_telemetry",
            "time": "2024-03-01T12:05Z",
            "tags": {"site_number": "1"},
            "fields": {
                "dcvoltage": 380.5,
                "month": "Mar 2024",
                "temperature": 41.25,
                "accurrent": 9.1,
                "acvoltage": 239.4,
                "acfrequency": 50.01
            }
        })
    );
}

// ============================================================================
// Other endpoints
// ============================================================================

#[tokio::test]
async fn test_power_flow_and_site_override() {
    let server = MockServer::start().await;
    mount_account(&server).await;

    Mock::given(method("GET"))
        .and(path("/site/9/currentPowerFlow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "siteCurrentPowerFlow": {
                "updateRefreshRate": 3,
                "unit": "kW",
                "connections": [{"from": "PV", "to": "Load"}],
                "LOAD": {"status": "Active", "currentPower": 0.8},
                "PV": {"status": "Active", "currentPower": 2.3}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = ApiSession::connect(&config(&server)).await.unwrap();
    let flow = session.power_flow(Some("9")).await.unwrap();

    assert_eq!(flow.record("PV").and_then(|pv| pv.float("currentPower")), Some(2.3));
    assert!(!flow.is_set("GRID"));
    assert_eq!(flow.records("connections")[0].str("to"), Some("Load"));
    assert_eq!(session.parameters().site_id(), Some("9"));
}

#[tokio::test]
async fn test_generic_call_reports_unexpected_fields() {
    let server = MockServer::start().await;
    mount_account(&server).await;

    Mock::given(method("GET"))
        .and(path("/version/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": {"release": "1.0.0", "build": "2024-01"}
        })))
        .mount(&server)
        .await;

    let mut session = ApiSession::connect(&config(&server)).await.unwrap();
    let decoded = session.call("current_version").await.unwrap();

    assert_eq!(decoded.value.record("version").and_then(|v| v.str("release")), Some("1.0.0"));
    assert_eq!(decoded.report.unexpected_fields, vec!["version.build".to_string()]);
}

#[tokio::test]
async fn test_closed_session_refuses_calls() {
    let server = MockServer::start().await;
    mount_account(&server).await;

    let mut session = ApiSession::connect(&config(&server)).await.unwrap();
    session.close();
    assert!(matches!(session.site_overview(None).await, Err(Error::SessionClosed)));
}
