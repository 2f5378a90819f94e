use crate::{
    core::{
        field::{FieldDescriptor, FieldType, RecordSchema},
        value::Value,
    },
    records::record::{FieldError, FromValue, Record},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataCenter {
    #[serde(rename = "dcName")]
    pub dc_short_name: String,
    #[serde(rename = "dcLongName")]
    pub dc_name: String,
    pub region: String,
    pub campus_name: String,
    pub owner: String,
    pub class: String,
    pub phase_name: String,
    pub cooling_type: String,
    pub hvac_type: String,
    #[serde(rename = "msAssetID")]
    pub ms_asset_id: f64,
    pub dc_generation: String,
}

static DATA_CENTER_FIELDS: [FieldDescriptor; 11] = [
    FieldDescriptor::new("DcShortName", FieldType::String).alias("dcName"),
    FieldDescriptor::new("DcName", FieldType::String).alias("dcLongName"),
    FieldDescriptor::new("Region", FieldType::String),
    FieldDescriptor::new("CampusName", FieldType::String),
    FieldDescriptor::new("Owner", FieldType::String),
    FieldDescriptor::new("Class", FieldType::String),
    FieldDescriptor::new("PhaseName", FieldType::String),
    FieldDescriptor::new("CoolingType", FieldType::String),
    FieldDescriptor::new("HVACType", FieldType::String),
    FieldDescriptor::new("MSAssetID", FieldType::Float64),
    FieldDescriptor::new("DcGeneration", FieldType::String),
];

static DATA_CENTER_SCHEMA: RecordSchema = RecordSchema {
    name: "DataCenter",
    fields: &DATA_CENTER_FIELDS,
};

impl Record for DataCenter {
    fn schema() -> &'static RecordSchema {
        &DATA_CENTER_SCHEMA
    }

    fn new_empty() -> Option<Self> {
        Some(Self::default())
    }

    fn set_field(&mut self, field: &str, value: Value) -> Result<(), FieldError> {
        match field {
            "DcShortName" => self.dc_short_name = FromValue::from_value(value)?,
            "DcName" => self.dc_name = FromValue::from_value(value)?,
            "Region" => self.region = FromValue::from_value(value)?,
            "CampusName" => self.campus_name = FromValue::from_value(value)?,
            "Owner" => self.owner = FromValue::from_value(value)?,
            "Class" => self.class = FromValue::from_value(value)?,
            "PhaseName" => self.phase_name = FromValue::from_value(value)?,
            "CoolingType" => self.cooling_type = FromValue::from_value(value)?,
            "HVACType" => self.hvac_type = FromValue::from_value(value)?,
            "MSAssetID" => self.ms_asset_id = FromValue::from_value(value)?,
            "DcGeneration" => self.dc_generation = FromValue::from_value(value)?,
            other => return Err(FieldError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}

/// Position of a node within a data center's colocation/row/rack layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DcRank {
    #[serde(rename = "DcName")]
    pub data_center_code: String,
    pub colocation: String,
    pub row: String,
    pub rack: String,
    pub node: String,
    pub node_asset_tag: String,
}

static DC_RANK_FIELDS: [FieldDescriptor; 6] = [
    FieldDescriptor::new("DataCenterCode", FieldType::String).alias("DcName"),
    FieldDescriptor::new("Colocation", FieldType::String),
    FieldDescriptor::new("Row", FieldType::String),
    FieldDescriptor::new("Rack", FieldType::String),
    FieldDescriptor::new("Node", FieldType::String),
    FieldDescriptor::new("NodeAssetTag", FieldType::String),
];

static DC_RANK_SCHEMA: RecordSchema = RecordSchema {
    name: "DcRank",
    fields: &DC_RANK_FIELDS,
};

impl Record for DcRank {
    fn schema() -> &'static RecordSchema {
        &DC_RANK_SCHEMA
    }

    fn new_empty() -> Option<Self> {
        Some(Self::default())
    }

    fn set_field(&mut self, field: &str, value: Value) -> Result<(), FieldError> {
        match field {
            "DataCenterCode" => self.data_center_code = FromValue::from_value(value)?,
            "Colocation" => self.colocation = FromValue::from_value(value)?,
            "Row" => self.row = FromValue::from_value(value)?,
            "Rack" => self.rack = FromValue::from_value(value)?,
            "Node" => self.node = FromValue::from_value(value)?,
            "NodeAssetTag" => self.node_asset_tag = FromValue::from_value(value)?,
            other => return Err(FieldError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}
