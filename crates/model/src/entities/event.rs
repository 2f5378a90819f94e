use crate::{
    core::{
        field::{FieldDescriptor, FieldType, RecordSchema},
        value::Value,
    },
    records::record::{FieldError, FromValue, Record},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A telemetry reading for one data point of a device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerDeviceEvent {
    #[serde(rename = "timestamp")]
    pub time_stamp: DateTime<Utc>,
    pub data_center_name: String,
    pub device_name: String,
    pub data_point: String,
    pub status: i64,
    pub value: Option<f64>,
}

static FIELDS: [FieldDescriptor; 6] = [
    FieldDescriptor::new("TimeStamp", FieldType::DateTime).alias("timestamp"),
    FieldDescriptor::new("DataCenterName", FieldType::String),
    FieldDescriptor::new("DeviceName", FieldType::String),
    FieldDescriptor::new("DataPoint", FieldType::String),
    FieldDescriptor::new("Status", FieldType::Int64),
    FieldDescriptor::new("Value", FieldType::Float64).optional(),
];

static SCHEMA: RecordSchema = RecordSchema {
    name: "PowerDeviceEvent",
    fields: &FIELDS,
};

impl Record for PowerDeviceEvent {
    fn schema() -> &'static RecordSchema {
        &SCHEMA
    }

    fn new_empty() -> Option<Self> {
        Some(Self::default())
    }

    fn set_field(&mut self, field: &str, value: Value) -> Result<(), FieldError> {
        match field {
            "TimeStamp" => self.time_stamp = FromValue::from_value(value)?,
            "DataCenterName" => self.data_center_name = FromValue::from_value(value)?,
            "DeviceName" => self.device_name = FromValue::from_value(value)?,
            "DataPoint" => self.data_point = FromValue::from_value(value)?,
            "Status" => self.status = FromValue::from_value(value)?,
            "Value" => self.value = FromValue::from_value(value)?,
            other => return Err(FieldError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}
