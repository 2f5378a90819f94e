use super::enums::{CommunicationProtocol, DeviceState, DeviceType, OnboardingMode};
use crate::{
    core::{
        field::{FieldDescriptor, FieldType, RecordSchema},
        value::Value,
    },
    records::record::{FieldError, FromValue, Record},
};
use serde::{Deserialize, Serialize};

/// A power device as reported by the inventory query.
///
/// Devices compare equal when their names match ignoring case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerDevice {
    pub device_name: String,
    pub dc_name: String,
    pub dc_code: i64,
    pub onboarding_mode: OnboardingMode,
    pub device_type: DeviceType,
    pub device_state: DeviceState,
    pub hierarchy: String,
    pub colo_name: String,
    pub colo_id: i64,
    pub amp_rating: Option<f64>,
    pub voltage_rating: Option<f64>,
    pub kw_rating: Option<f64>,
    pub kva_rating: Option<f64>,
    pub x_coordination: i32,
    pub y_coordination: i32,
    pub primary_parent: String,
    pub secondary_parent: String,
    pub maintenance_parent: String,
    pub redundant_device_names: String,
    pub power_factor: Option<f64>,
    pub de_rating_factor: Option<f64>,
    pub panel_name: String,
    pub copa_config_type: CommunicationProtocol,
    pub location: String,
    pub is_monitorable: bool,
    pub amperage: Option<f64>,
    pub voltage: Option<f64>,
    pub rated_capacity: Option<f64>,
    pub de_rated_capacity: Option<f64>,
    pub data_type: String,
    pub driver_name: String,
    pub ip_address: String,
    pub port_number: i32,
    pub project_name: String,
    pub unit_id: i32,
}

static FIELDS: [FieldDescriptor; 35] = [
    FieldDescriptor::new("DeviceName", FieldType::String),
    FieldDescriptor::new("DcName", FieldType::String),
    FieldDescriptor::new("DcCode", FieldType::Int64),
    FieldDescriptor::new("OnboardingMode", FieldType::Enum(&OnboardingMode::DESCRIPTOR)),
    FieldDescriptor::new("DeviceType", FieldType::Enum(&DeviceType::DESCRIPTOR)),
    FieldDescriptor::new("DeviceState", FieldType::Enum(&DeviceState::DESCRIPTOR)),
    FieldDescriptor::new("Hierarchy", FieldType::String),
    FieldDescriptor::new("ColoName", FieldType::String),
    FieldDescriptor::new("ColoId", FieldType::Int64),
    FieldDescriptor::new("AmpRating", FieldType::Float64).optional(),
    FieldDescriptor::new("VoltageRating", FieldType::Float64).optional(),
    FieldDescriptor::new("KwRating", FieldType::Float64).optional(),
    FieldDescriptor::new("KvaRating", FieldType::Float64).optional(),
    FieldDescriptor::new("XCoordination", FieldType::Int32),
    FieldDescriptor::new("YCoordination", FieldType::Int32),
    FieldDescriptor::new("PrimaryParent", FieldType::String),
    FieldDescriptor::new("SecondaryParent", FieldType::String),
    FieldDescriptor::new("MaintenanceParent", FieldType::String),
    FieldDescriptor::new("RedundantDeviceNames", FieldType::String),
    FieldDescriptor::new("PowerFactor", FieldType::Float64).optional(),
    FieldDescriptor::new("DeRatingFactor", FieldType::Float64).optional(),
    FieldDescriptor::new("PanelName", FieldType::String),
    FieldDescriptor::new(
        "CopaConfigType",
        FieldType::Enum(&CommunicationProtocol::DESCRIPTOR),
    ),
    FieldDescriptor::new("Location", FieldType::String),
    FieldDescriptor::new("IsMonitorable", FieldType::Bool),
    FieldDescriptor::new("Amperage", FieldType::Float64).optional(),
    FieldDescriptor::new("Voltage", FieldType::Float64).optional(),
    FieldDescriptor::new("RatedCapacity", FieldType::Float64).optional(),
    FieldDescriptor::new("DeRatedCapacity", FieldType::Float64).optional(),
    FieldDescriptor::new("DataType", FieldType::String),
    FieldDescriptor::new("DriverName", FieldType::String),
    FieldDescriptor::new("IpAddress", FieldType::String),
    FieldDescriptor::new("PortNumber", FieldType::Int32),
    FieldDescriptor::new("ProjectName", FieldType::String),
    FieldDescriptor::new("UnitId", FieldType::Int32),
];

static SCHEMA: RecordSchema = RecordSchema {
    name: "PowerDevice",
    fields: &FIELDS,
};

impl Record for PowerDevice {
    fn schema() -> &'static RecordSchema {
        &SCHEMA
    }

    fn new_empty() -> Option<Self> {
        Some(Self::default())
    }

    fn set_field(&mut self, field: &str, value: Value) -> Result<(), FieldError> {
        match field {
            "DeviceName" => self.device_name = FromValue::from_value(value)?,
            "DcName" => self.dc_name = FromValue::from_value(value)?,
            "DcCode" => self.dc_code = FromValue::from_value(value)?,
            "OnboardingMode" => self.onboarding_mode = FromValue::from_value(value)?,
            "DeviceType" => self.device_type = FromValue::from_value(value)?,
            "DeviceState" => self.device_state = FromValue::from_value(value)?,
            "Hierarchy" => self.hierarchy = FromValue::from_value(value)?,
            "ColoName" => self.colo_name = FromValue::from_value(value)?,
            "ColoId" => self.colo_id = FromValue::from_value(value)?,
            "AmpRating" => self.amp_rating = FromValue::from_value(value)?,
            "VoltageRating" => self.voltage_rating = FromValue::from_value(value)?,
            "KwRating" => self.kw_rating = FromValue::from_value(value)?,
            "KvaRating" => self.kva_rating = FromValue::from_value(value)?,
            "XCoordination" => self.x_coordination = FromValue::from_value(value)?,
            "YCoordination" => self.y_coordination = FromValue::from_value(value)?,
            "PrimaryParent" => self.primary_parent = FromValue::from_value(value)?,
            "SecondaryParent" => self.secondary_parent = FromValue::from_value(value)?,
            "MaintenanceParent" => self.maintenance_parent = FromValue::from_value(value)?,
            "RedundantDeviceNames" => {
                self.redundant_device_names = FromValue::from_value(value)?
            }
            "PowerFactor" => self.power_factor = FromValue::from_value(value)?,
            "DeRatingFactor" => self.de_rating_factor = FromValue::from_value(value)?,
            "PanelName" => self.panel_name = FromValue::from_value(value)?,
            "CopaConfigType" => self.copa_config_type = FromValue::from_value(value)?,
            "Location" => self.location = FromValue::from_value(value)?,
            "IsMonitorable" => self.is_monitorable = FromValue::from_value(value)?,
            "Amperage" => self.amperage = FromValue::from_value(value)?,
            "Voltage" => self.voltage = FromValue::from_value(value)?,
            "RatedCapacity" => self.rated_capacity = FromValue::from_value(value)?,
            "DeRatedCapacity" => self.de_rated_capacity = FromValue::from_value(value)?,
            "DataType" => self.data_type = FromValue::from_value(value)?,
            "DriverName" => self.driver_name = FromValue::from_value(value)?,
            "IpAddress" => self.ip_address = FromValue::from_value(value)?,
            "PortNumber" => self.port_number = FromValue::from_value(value)?,
            "ProjectName" => self.project_name = FromValue::from_value(value)?,
            "UnitId" => self.unit_id = FromValue::from_value(value)?,
            other => return Err(FieldError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}

impl PartialEq for PowerDevice {
    fn eq(&self, other: &Self) -> bool {
        self.device_name.eq_ignore_ascii_case(&other.device_name)
    }
}

impl Eq for PowerDevice {}

impl std::hash::Hash for PowerDevice {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.device_name.to_ascii_lowercase().hash(state);
    }
}
