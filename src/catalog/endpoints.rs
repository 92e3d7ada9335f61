//! Endpoint table of the monitoring API

use crate::schema::{Arg, EndpointDescriptor, Param};

const SITE: &[Arg] = &[Arg::SiteId];
const KEY_ONLY: &[Param] = &[Param::ApiKey];

/// Every endpoint in the catalogue
pub static ENDPOINTS: &[EndpointDescriptor] = &[
    EndpointDescriptor {
        id: "sites",
        name: "Site List",
        url_template: "sites/list",
        required_arguments: &[],
        optional_parameters: &[
            Param::ApiKey,
            Param::Size,
            Param::StartIndex,
            Param::SearchText,
            Param::SortProperty,
            Param::SortOrder,
            Param::Status,
        ],
        response_schema: "SitesResponse",
        envelope: "sites",
    },
    EndpointDescriptor {
        id: "site_details",
        name: "Site Details",
        url_template: "site/{siteid}/details",
        required_arguments: SITE,
        optional_parameters: KEY_ONLY,
        response_schema: "SiteDetailsResponse",
        envelope: "details",
    },
    EndpointDescriptor {
        id: "env_benefits",
        name: "Environmental Benefits",
        url_template: "site/{siteid}/envBenefits",
        required_arguments: SITE,
        optional_parameters: &[Param::ApiKey, Param::SystemUnits],
        response_schema: "EnvBenefitsResponse",
        envelope: "envBenefits",
    },
    EndpointDescriptor {
        id: "site_overview",
        name: "Site Overview",
        url_template: "site/{siteid}/overview",
        required_arguments: SITE,
        optional_parameters: KEY_ONLY,
        response_schema: "OverviewResponse",
        envelope: "overview",
    },
    EndpointDescriptor {
        id: "data_period",
        name: "Site Data: Start and End Dates",
        url_template: "site/{siteid}/dataPeriod",
        required_arguments: SITE,
        optional_parameters: KEY_ONLY,
        response_schema: "DataPeriodResponse",
        envelope: "dataPeriod",
    },
    EndpointDescriptor {
        id: "energy",
        name: "Site Energy",
        url_template: "site/{siteid}/energy",
        required_arguments: SITE,
        optional_parameters: &[
            Param::ApiKey,
            Param::StartDate,
            Param::EndDate,
            Param::TimeUnit,
        ],
        response_schema: "EnergyResponse",
        envelope: "energy",
    },
    EndpointDescriptor {
        id: "timeframe_energy",
        name: "Site Energy for a Time Period",
        url_template: "site/{siteid}/timeFrameEnergy",
        required_arguments: SITE,
        optional_parameters: &[Param::ApiKey, Param::StartDate, Param::EndDate],
        response_schema: "TimeFrameEnergyResponse",
        envelope: "timeFrameEnergy",
    },
    EndpointDescriptor {
        id: "energy_details",
        name: "Site Energy Details",
        url_template: "site/{siteid}/energyDetails",
        required_arguments: SITE,
        optional_parameters: &[
            Param::ApiKey,
            Param::StartTime,
            Param::EndTime,
            Param::TimeUnit,
            Param::Meters,
        ],
        response_schema: "EnergyDetailsResponse",
        envelope: "energyDetails",
    },
    EndpointDescriptor {
        id: "power",
        name: "Site Power",
        url_template: "site/{siteid}/power",
        required_arguments: SITE,
        optional_parameters: &[Param::ApiKey, Param::StartTime, Param::EndTime],
        response_schema: "PowerResponse",
        envelope: "power",
    },
    EndpointDescriptor {
        id: "power_details",
        name: "Site Power Details",
        url_template: "site/{siteid}/powerDetails",
        required_arguments: SITE,
        optional_parameters: &[
            Param::ApiKey,
            Param::StartTime,
            Param::EndTime,
            Param::Meters,
        ],
        response_schema: "PowerDetailsResponse",
        envelope: "powerDetails",
    },
    EndpointDescriptor {
        id: "power_flow",
        name: "Site Current Power Flow",
        url_template: "site/{siteid}/currentPowerFlow",
        required_arguments: SITE,
        optional_parameters: KEY_ONLY,
        response_schema: "PowerFlowResponse",
        envelope: "siteCurrentPowerFlow",
    },
    EndpointDescriptor {
        id: "storage",
        name: "Storage Information",
        url_template: "site/{siteid}/storageData",
        required_arguments: SITE,
        optional_parameters: &[
            Param::ApiKey,
            Param::StartTime,
            Param::EndTime,
            Param::Serials,
        ],
        response_schema: "StorageResponse",
        envelope: "storageData",
    },
    EndpointDescriptor {
        id: "inventory",
        name: "Inventory",
        url_template: "site/{siteid}/inventory",
        required_arguments: SITE,
        optional_parameters: KEY_ONLY,
        response_schema: "InventoryResponse",
        envelope: "Inventory",
    },
    EndpointDescriptor {
        id: "components",
        name: "Components List",
        url_template: "equipment/{siteid}/list",
        required_arguments: SITE,
        optional_parameters: KEY_ONLY,
        response_schema: "ComponentsResponse",
        envelope: "reporters",
    },
    EndpointDescriptor {
        id: "inverter_data",
        name: "Inverter Technical Data",
        url_template: "equipment/{siteid}/{serialnumber}/data",
        required_arguments: &[Arg::SiteId, Arg::SerialNumber],
        optional_parameters: &[Param::ApiKey, Param::StartTime, Param::EndTime],
        response_schema: "InverterDataResponse",
        envelope: "data",
    },
    EndpointDescriptor {
        id: "current_version",
        name: "Current Version",
        url_template: "version/current",
        required_arguments: &[],
        optional_parameters: KEY_ONLY,
        response_schema: "VersionResponse",
        envelope: "version",
    },
    EndpointDescriptor {
        id: "supported_versions",
        name: "Supported Versions",
        url_template: "version/supported",
        required_arguments: &[],
        optional_parameters: KEY_ONLY,
        response_schema: "SupportedVersionsResponse",
        envelope: "supported",
    },
];
