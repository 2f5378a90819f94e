use crate::{
    core::{
        field::{FieldDescriptor, FieldType, RecordSchema},
        value::Value,
    },
    records::record::{FieldError, FromValue, Record},
};
use serde::{Deserialize, Serialize};

/// Where a device sits, including the racks it feeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceLocation {
    #[serde(rename = "id")]
    pub device_name: String,
    pub dc_name: String,
    pub dc_code: i64,
    pub device_id: String,
    pub colo_name: String,
    pub device_type: String,
    pub racks: Vec<String>,
}

static FIELDS: [FieldDescriptor; 7] = [
    FieldDescriptor::new("DeviceName", FieldType::String).alias("id"),
    FieldDescriptor::new("DcName", FieldType::String),
    FieldDescriptor::new("DcCode", FieldType::Int64),
    FieldDescriptor::new("DeviceId", FieldType::String),
    FieldDescriptor::new("ColoName", FieldType::String),
    FieldDescriptor::new("DeviceType", FieldType::String),
    FieldDescriptor::new("Racks", FieldType::StringList),
];

static SCHEMA: RecordSchema = RecordSchema {
    name: "DeviceLocation",
    fields: &FIELDS,
};

impl Record for DeviceLocation {
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
            "DeviceId" => self.device_id = FromValue::from_value(value)?,
            "ColoName" => self.colo_name = FromValue::from_value(value)?,
            "DeviceType" => self.device_type = FromValue::from_value(value)?,
            "Racks" => self.racks = FromValue::from_value(value)?,
            other => return Err(FieldError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}
