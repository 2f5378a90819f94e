use crate::entities::{AssociationType, PowerDevice};
use serde::{Deserialize, Serialize};

/// A device placed in the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceVertex {
    pub id: String,
    pub partition_key: String,
    pub label: String,
    pub device: PowerDevice,
}

impl DeviceVertex {
    pub fn new(device: PowerDevice) -> Self {
        DeviceVertex {
            id: device.device_name.clone(),
            partition_key: device.dc_name.clone(),
            label: device.device_name.clone(),
            device,
        }
    }
}

/// Directed link from a device to one of its upstream parents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceEdge {
    pub id: String,
    pub label: String,
    pub from: String,
    pub to: String,
    pub association: AssociationType,
}

impl DeviceEdge {
    pub fn new(from: &DeviceVertex, to: &DeviceVertex, association: AssociationType) -> Self {
        DeviceEdge {
            id: format!("{}-{}", from.id, to.id),
            label: association.to_string(),
            from: from.id.clone(),
            to: to.id.clone(),
            association,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceGraph {
    pub vertices: Vec<DeviceVertex>,
    pub edges: Vec<DeviceEdge>,
}

impl DeviceGraph {
    pub fn vertex(&self, id: &str) -> Option<&DeviceVertex> {
        self.vertices.iter().find(|v| v.id.eq_ignore_ascii_case(id))
    }

    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a DeviceEdge> + 'a {
        self.edges
            .iter()
            .filter(move |edge| edge.from.eq_ignore_ascii_case(id))
    }
}
