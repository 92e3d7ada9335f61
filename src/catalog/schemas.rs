//! Record schemas of the monitoring API
//!
//! Field names are the vendor's JSON keys. Fields the API leaves out for
//! some installations (no battery, no meter, missing address lines) are
//! optional; the numeric sample fields that the API reports as `null` for
//! empty intervals default to zero.

use crate::schema::{DefaultValue, FieldDescriptor as Field, SchemaDescriptor, TypeTag};

const STRING: TypeTag = TypeTag::STRING;
const INTEGER: TypeTag = TypeTag::INTEGER;
const FLOAT: TypeTag = TypeTag::FLOAT;
const BOOLEAN: TypeTag = TypeTag::BOOLEAN;
const DATE: TypeTag = TypeTag::DATE;
const DATETIME: TypeTag = TypeTag::DATETIME;

const ZERO: DefaultValue = DefaultValue::Float(0.0);

/// Every record schema in the catalogue
pub static SCHEMAS: &[SchemaDescriptor] = &[
    // ------------------------------------------------------------------
    // Sites
    // ------------------------------------------------------------------
    SchemaDescriptor {
        id: "Location",
        fields: &[
            Field::required("country", STRING),
            Field::optional("state", STRING),
            Field::required("city", STRING),
            Field::required("address", STRING),
            Field::optional("address2", STRING),
            Field::optional("zip", STRING),
            Field::required("timeZone", STRING),
            Field::optional("countryCode", STRING),
            Field::optional("stateCode", STRING),
        ],
    },
    SchemaDescriptor {
        id: "PrimaryModule",
        fields: &[
            Field::required("manufacturerName", STRING),
            Field::required("modelName", STRING),
            Field::required("maximumPower", FLOAT),
            Field::optional("temperatureCoef", FLOAT),
        ],
    },
    SchemaDescriptor {
        id: "Uris",
        fields: &[
            Field::optional("SITE_IMAGE", STRING),
            Field::optional("DATA_PERIOD", STRING),
            Field::optional("DETAILS", STRING),
            Field::optional("OVERVIEW", STRING),
        ],
    },
    SchemaDescriptor {
        id: "PublicSettings",
        fields: &[
            Field::required("isPublic", BOOLEAN),
            Field::optional("name", STRING),
        ],
    },
    SchemaDescriptor {
        id: "Site",
        fields: &[
            Field::required("id", INTEGER),
            Field::required("name", STRING),
            Field::required("accountId", INTEGER),
            Field::required("status", TypeTag::Enum("SiteStatus")),
            Field::required("peakPower", FLOAT),
            Field::optional("lastUpdateTime", DATETIME),
            Field::optional("currency", STRING),
            Field::optional("installationDate", DATETIME),
            Field::optional("ptoDate", STRING),
            Field::optional("notes", STRING),
            Field::required("type", STRING),
            Field::required("location", TypeTag::Record("Location")),
            Field::optional("primaryModule", TypeTag::Record("PrimaryModule")),
            Field::optional("uris", TypeTag::Record("Uris")),
            Field::optional("publicSettings", TypeTag::Record("PublicSettings")),
            Field::defaulted("alertQuantity", INTEGER, DefaultValue::Integer(0)),
            Field::optional("alertSeverity", STRING),
        ],
    },
    SchemaDescriptor {
        id: "SiteList",
        fields: &[
            Field::required("count", INTEGER),
            Field::required("site", TypeTag::Sequence(&TypeTag::Record("Site"))),
        ],
    },
    SchemaDescriptor {
        id: "SitesResponse",
        fields: &[Field::required("sites", TypeTag::Record("SiteList"))],
    },
    SchemaDescriptor {
        id: "SiteDetailsResponse",
        fields: &[Field::required("details", TypeTag::Record("Site"))],
    },
    // ------------------------------------------------------------------
    // Environmental benefits
    // ------------------------------------------------------------------
    SchemaDescriptor {
        id: "GasEmissionSaved",
        fields: &[
            Field::required("units", STRING),
            Field::required("co2", FLOAT),
            Field::required("so2", FLOAT),
            Field::required("nox", FLOAT),
        ],
    },
    SchemaDescriptor {
        id: "EnvBenefits",
        fields: &[
            Field::required("gasEmissionSaved", TypeTag::Record("GasEmissionSaved")),
            Field::required("treesPlanted", FLOAT),
            Field::required("lightBulbs", FLOAT),
        ],
    },
    SchemaDescriptor {
        id: "EnvBenefitsResponse",
        fields: &[Field::required("envBenefits", TypeTag::Record("EnvBenefits"))],
    },
    // ------------------------------------------------------------------
    // Overview and data period
    // ------------------------------------------------------------------
    SchemaDescriptor {
        id: "SummaryData",
        fields: &[
            Field::required("energy", FLOAT),
            Field::optional("revenue", FLOAT),
        ],
    },
    SchemaDescriptor {
        id: "CurrentPower",
        fields: &[Field::required("power", FLOAT)],
    },
    SchemaDescriptor {
        id: "Overview",
        fields: &[
            Field::required("lastUpdateTime", DATETIME),
            Field::required("lifeTimeData", TypeTag::Record("SummaryData")),
            Field::required("lastYearData", TypeTag::Record("SummaryData")),
            Field::required("lastMonthData", TypeTag::Record("SummaryData")),
            Field::required("lastDayData", TypeTag::Record("SummaryData")),
            Field::required("currentPower", TypeTag::Record("CurrentPower")),
            Field::optional("measuredBy", STRING),
        ],
    },
    SchemaDescriptor {
        id: "OverviewResponse",
        fields: &[Field::required("overview", TypeTag::Record("Overview"))],
    },
    SchemaDescriptor {
        id: "DataPeriod",
        fields: &[
            Field::optional("startDate", DATE),
            Field::optional("endDate", DATE),
        ],
    },
    SchemaDescriptor {
        id: "DataPeriodResponse",
        fields: &[Field::required("dataPeriod", TypeTag::Record("DataPeriod"))],
    },
    // ------------------------------------------------------------------
    // Energy and power series
    // ------------------------------------------------------------------
    SchemaDescriptor {
        id: "Value",
        fields: &[
            Field::required("date", DATETIME),
            Field::defaulted("value", FLOAT, ZERO),
        ],
    },
    SchemaDescriptor {
        id: "EnergyData",
        fields: &[
            Field::required("timeUnit", TypeTag::Enum("TimeUnit")),
            Field::required("unit", TypeTag::Enum("Unit")),
            Field::optional("measuredBy", STRING),
            Field::required("values", TypeTag::Sequence(&TypeTag::Record("Value"))),
        ],
    },
    SchemaDescriptor {
        id: "EnergyResponse",
        fields: &[Field::required("energy", TypeTag::Record("EnergyData"))],
    },
    SchemaDescriptor {
        id: "EnergyValue",
        fields: &[
            Field::required("date", DATETIME),
            Field::required("energy", FLOAT),
            Field::optional("unit", STRING),
        ],
    },
    SchemaDescriptor {
        id: "TimeFrameEnergy",
        fields: &[
            Field::required("energy", FLOAT),
            Field::required("unit", STRING),
            Field::optional("measuredBy", STRING),
            Field::optional("startLifetimeEnergy", TypeTag::Record("EnergyValue")),
            Field::optional("endLifetimeEnergy", TypeTag::Record("EnergyValue")),
        ],
    },
    SchemaDescriptor {
        id: "TimeFrameEnergyResponse",
        fields: &[Field::required("timeFrameEnergy", TypeTag::Record("TimeFrameEnergy"))],
    },
    SchemaDescriptor {
        id: "MeterData",
        fields: &[
            Field::required("type", TypeTag::Enum("Meters")),
            Field::required("values", TypeTag::Sequence(&TypeTag::Record("Value"))),
        ],
    },
    SchemaDescriptor {
        id: "EnergyDetails",
        fields: &[
            Field::required("timeUnit", TypeTag::Enum("TimeUnit")),
            Field::required("unit", TypeTag::Enum("Unit")),
            Field::required("meters", TypeTag::Sequence(&TypeTag::Record("MeterData"))),
        ],
    },
    SchemaDescriptor {
        id: "EnergyDetailsResponse",
        fields: &[Field::required("energyDetails", TypeTag::Record("EnergyDetails"))],
    },
    SchemaDescriptor {
        id: "PowerData",
        fields: &[
            Field::required("timeUnit", TypeTag::Enum("TimeUnit")),
            Field::required("unit", TypeTag::Enum("Unit")),
            Field::optional("measuredBy", STRING),
            Field::required("values", TypeTag::Sequence(&TypeTag::Record("Value"))),
        ],
    },
    SchemaDescriptor {
        id: "PowerResponse",
        fields: &[Field::required("power", TypeTag::Record("PowerData"))],
    },
    SchemaDescriptor {
        id: "PowerDetails",
        fields: &[
            Field::required("timeUnit", TypeTag::Enum("TimeUnit")),
            Field::required("unit", TypeTag::Enum("Unit")),
            Field::required("meters", TypeTag::Sequence(&TypeTag::Record("MeterData"))),
        ],
    },
    SchemaDescriptor {
        id: "PowerDetailsResponse",
        fields: &[Field::required("powerDetails", TypeTag::Record("PowerDetails"))],
    },
    // ------------------------------------------------------------------
    // Current power flow
    // ------------------------------------------------------------------
    SchemaDescriptor {
        id: "Connection",
        fields: &[
            Field::required("from", STRING),
            Field::required("to", STRING),
        ],
    },
    SchemaDescriptor {
        id: "PowerFlowNode",
        fields: &[
            Field::required("status", STRING),
            Field::required("currentPower", FLOAT),
            Field::optional("chargeLevel", INTEGER),
            Field::optional("critical", BOOLEAN),
        ],
    },
    SchemaDescriptor {
        id: "PowerFlow",
        fields: &[
            Field::optional("updateRefreshRate", INTEGER),
            Field::required("unit", STRING),
            Field::required("connections", TypeTag::Sequence(&TypeTag::Record("Connection"))),
            Field::optional("GRID", TypeTag::Record("PowerFlowNode")),
            Field::optional("LOAD", TypeTag::Record("PowerFlowNode")),
            Field::optional("PV", TypeTag::Record("PowerFlowNode")),
            Field::optional("STORAGE", TypeTag::Record("PowerFlowNode")),
        ],
    },
    SchemaDescriptor {
        id: "PowerFlowResponse",
        fields: &[Field::required("siteCurrentPowerFlow", TypeTag::Record("PowerFlow"))],
    },
    // ------------------------------------------------------------------
    // Storage
    // ------------------------------------------------------------------
    SchemaDescriptor {
        id: "BatteryTelemetry",
        fields: &[
            Field::required("timeStamp", DATETIME),
            Field::optional("power", FLOAT),
            Field::optional("batteryState", INTEGER),
            Field::optional("lifeTimeEnergyCharged", FLOAT),
            Field::optional("lifeTimeEnergyDischarged", FLOAT),
            Field::optional("fullPackEnergyAvailable", FLOAT),
            Field::optional("internalTemp", FLOAT),
            Field::optional("ACGridCharging", FLOAT),
            Field::optional("batteryPercentageState", FLOAT),
        ],
    },
    SchemaDescriptor {
        id: "StorageBattery",
        fields: &[
            Field::required("nameplate", FLOAT),
            Field::required("serialNumber", STRING),
            Field::optional("modelNumber", STRING),
            Field::required("telemetryCount", INTEGER),
            Field::required(
                "telemetries",
                TypeTag::Sequence(&TypeTag::Record("BatteryTelemetry")),
            ),
        ],
    },
    SchemaDescriptor {
        id: "StorageData",
        fields: &[
            Field::required("batteryCount", INTEGER),
            Field::required("batteries", TypeTag::Sequence(&TypeTag::Record("StorageBattery"))),
        ],
    },
    SchemaDescriptor {
        id: "StorageResponse",
        fields: &[Field::required("storageData", TypeTag::Record("StorageData"))],
    },
    // ------------------------------------------------------------------
    // Inventory and components
    // ------------------------------------------------------------------
    SchemaDescriptor {
        id: "Meter",
        fields: &[
            Field::required("name", STRING),
            Field::optional("manufacturer", STRING),
            Field::optional("model", STRING),
            Field::optional("firmwareVersion", STRING),
            Field::optional("connectedSolaredgeDeviceSN", STRING),
            Field::optional("type", STRING),
            Field::optional("form", STRING),
            Field::optional("SN", STRING),
        ],
    },
    SchemaDescriptor {
        id: "Sensor",
        fields: &[
            Field::optional("connectedSolaredgeDeviceSN", STRING),
            Field::optional("connectedTo", STRING),
            Field::required("id", STRING),
            Field::required("category", STRING),
            Field::required("type", STRING),
        ],
    },
    SchemaDescriptor {
        id: "Gateway",
        fields: &[
            Field::required("name", STRING),
            Field::required("serialNumber", STRING),
            Field::optional("firmwareVersion", STRING),
        ],
    },
    SchemaDescriptor {
        id: "InventoryBattery",
        fields: &[
            Field::required("name", STRING),
            Field::optional("manufacturer", STRING),
            Field::optional("model", STRING),
            Field::optional("firmwareVersion", STRING),
            Field::optional("connectedInverterSn", STRING),
            Field::optional("nameplateCapacity", FLOAT),
            Field::required("SN", STRING),
        ],
    },
    SchemaDescriptor {
        id: "Inverter",
        fields: &[
            Field::required("SN", STRING),
            Field::required("name", STRING),
            Field::required("manufacturer", STRING),
            Field::required("model", STRING),
            Field::optional("communicationMethod", STRING),
            Field::optional("cpuVersion", STRING),
            Field::optional("dsp1Version", STRING),
            Field::optional("dsp2Version", STRING),
            Field::defaulted("connectedOptimizers", INTEGER, DefaultValue::Integer(0)),
        ],
    },
    SchemaDescriptor {
        id: "Inventory",
        fields: &[
            Field::optional("meters", TypeTag::Sequence(&TypeTag::Record("Meter"))),
            Field::optional("sensors", TypeTag::Sequence(&TypeTag::Record("Sensor"))),
            Field::optional("gateways", TypeTag::Sequence(&TypeTag::Record("Gateway"))),
            Field::optional(
                "batteries",
                TypeTag::Sequence(&TypeTag::Record("InventoryBattery")),
            ),
            Field::optional("inverters", TypeTag::Sequence(&TypeTag::Record("Inverter"))),
        ],
    },
    SchemaDescriptor {
        id: "InventoryResponse",
        fields: &[Field::required("Inventory", TypeTag::Record("Inventory"))],
    },
    SchemaDescriptor {
        id: "Component",
        fields: &[
            Field::required("name", STRING),
            Field::optional("manufacturer", STRING),
            Field::optional("model", STRING),
            Field::required("serialNumber", STRING),
            Field::optional("kWpDC", FLOAT),
        ],
    },
    SchemaDescriptor {
        id: "ComponentList",
        fields: &[
            Field::required("count", INTEGER),
            Field::required("list", TypeTag::Sequence(&TypeTag::Record("Component"))),
        ],
    },
    SchemaDescriptor {
        id: "ComponentsResponse",
        fields: &[Field::required("reporters", TypeTag::Record("ComponentList"))],
    },
    // ------------------------------------------------------------------
    // Inverter technical data
    // ------------------------------------------------------------------
    SchemaDescriptor {
        id: "PhaseData",
        fields: &[
            Field::required("acCurrent", FLOAT),
            Field::required("acVoltage", FLOAT),
            Field::required("acFrequency", FLOAT),
            Field::optional("apparentPower", FLOAT),
            Field::optional("activePower", FLOAT),
            Field::optional("reactivePower", FLOAT),
            Field::optional("cosPhi", FLOAT),
        ],
    },
    SchemaDescriptor {
        id: "Telemetry",
        fields: &[
            Field::required("date", DATETIME),
            Field::required("totalActivePower", FLOAT),
            Field::optional("powerLimit", FLOAT),
            Field::required("totalEnergy", FLOAT),
            Field::required("temperature", FLOAT),
            Field::required("inverterMode", TypeTag::Enum("InverterMode")),
            Field::required("operationMode", TypeTag::Enum("OperationMode")),
            Field::defaulted("groundFaultResistance", FLOAT, ZERO),
            Field::defaulted("vL1To2", FLOAT, ZERO),
            Field::defaulted("vL2To3", FLOAT, ZERO),
            Field::defaulted("vL3To1", FLOAT, ZERO),
            Field::defaulted("dcVoltage", FLOAT, ZERO),
            Field::optional("L1Data", TypeTag::Record("PhaseData")),
            Field::optional("L2Data", TypeTag::Record("PhaseData")),
            Field::optional("L3Data", TypeTag::Record("PhaseData")),
        ],
    },
    SchemaDescriptor {
        id: "InverterData",
        fields: &[
            Field::required("count", INTEGER),
            Field::required("telemetries", TypeTag::Sequence(&TypeTag::Record("Telemetry"))),
        ],
    },
    SchemaDescriptor {
        id: "InverterDataResponse",
        fields: &[Field::required("data", TypeTag::Record("InverterData"))],
    },
    // ------------------------------------------------------------------
    // API versions
    // ------------------------------------------------------------------
    SchemaDescriptor {
        id: "Version",
        fields: &[Field::required("release", STRING)],
    },
    SchemaDescriptor {
        id: "VersionResponse",
        fields: &[Field::required("version", TypeTag::Record("Version"))],
    },
    SchemaDescriptor {
        id: "SupportedVersionsResponse",
        fields: &[Field::required("supported", TypeTag::Sequence(&TypeTag::Record("Version")))],
    },
];
