use super::enums::AssociationType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A link from a device to another device, typically one of its parents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceAssociation {
    pub device_name: String,
    #[serde(default)]
    pub association_type: AssociationType,
}

impl fmt::Display for DeviceAssociation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.device_name, self.association_type)
    }
}

/// Direct upstream and downstream neighbours of one device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRelation {
    pub device_name: String,
    #[serde(default)]
    pub dc_name: String,
    #[serde(default)]
    pub direct_upstream_device_list: Option<Vec<DeviceAssociation>>,
    #[serde(default)]
    pub direct_downstream_device_list: Option<Vec<DeviceAssociation>>,
}

impl DeviceRelation {
    pub fn upstream(&self) -> &[DeviceAssociation] {
        self.direct_upstream_device_list.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_deserializes_with_missing_lists() {
        let json = r#"[
            {"deviceName": "PDU-1", "directUpstreamDeviceList": [
                {"deviceName": "UPS-1", "associationType": "Secondary"}
            ]},
            {"deviceName": "UPS-1"}
        ]"#;
        let relations: Vec<DeviceRelation> = serde_json::from_str(json).unwrap();

        assert_eq!(relations[0].upstream().len(), 1);
        assert_eq!(
            relations[0].upstream()[0].association_type,
            AssociationType::Secondary
        );
        assert!(relations[1].upstream().is_empty());
        assert!(relations[1].direct_downstream_device_list.is_none());
    }
}
