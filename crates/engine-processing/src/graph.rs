use model::{
    entities::{DeviceRelation, PowerDevice},
    graph::{DeviceEdge, DeviceGraph, DeviceVertex},
};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Builds the power topology: one vertex per device and one edge from each
/// device to every upstream parent that is itself a known device.
///
/// Device names are matched ignoring case. Relations for unknown devices and
/// associations to unknown parents are skipped.
pub fn build_device_graph(devices: Vec<PowerDevice>, relations: &[DeviceRelation]) -> DeviceGraph {
    let mut relations_by_device: HashMap<String, Vec<&DeviceRelation>> = HashMap::new();
    for relation in relations {
        relations_by_device
            .entry(relation.device_name.to_ascii_lowercase())
            .or_default()
            .push(relation);
    }

    let mut vertices = Vec::with_capacity(devices.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(devices.len());
    for device in devices {
        let key = device.device_name.to_ascii_lowercase();
        if index.contains_key(&key) {
            warn!(device = %device.device_name, "Duplicate device, keeping the first one.");
            continue;
        }
        index.insert(key, vertices.len());
        vertices.push(DeviceVertex::new(device));
    }

    let mut edges = Vec::new();
    for vertex in &vertices {
        let Some(owned) = relations_by_device.get(&vertex.id.to_ascii_lowercase()) else {
            continue;
        };

        for association in owned.iter().flat_map(|relation| relation.upstream()) {
            match index.get(&association.device_name.to_ascii_lowercase()) {
                Some(&parent) => {
                    edges.push(DeviceEdge::new(
                        vertex,
                        &vertices[parent],
                        association.association_type,
                    ));
                }
                None => {
                    debug!(
                        device = %vertex.id,
                        parent = %association.device_name,
                        "Upstream device is not in the graph."
                    );
                }
            }
        }
    }

    info!(
        vertices = vertices.len(),
        edges = edges.len(),
        "Built device graph."
    );

    DeviceGraph { vertices, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::entities::{AssociationType, DeviceAssociation};
    use tracing_test::traced_test;

    fn device(name: &str) -> PowerDevice {
        PowerDevice {
            device_name: name.to_string(),
            dc_name: "AMS01".to_string(),
            ..Default::default()
        }
    }

    fn relation(name: &str, upstream: &[(&str, AssociationType)]) -> DeviceRelation {
        DeviceRelation {
            device_name: name.to_string(),
            direct_upstream_device_list: Some(
                upstream
                    .iter()
                    .map(|(parent, kind)| DeviceAssociation {
                        device_name: parent.to_string(),
                        association_type: *kind,
                    })
                    .collect(),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn test_edges_point_to_known_upstream_devices() {
        let devices = vec![device("UPS-1"), device("UPS-2"), device("PDU-1")];
        let relations = vec![
            relation(
                "pdu-1",
                &[
                    ("UPS-1", AssociationType::Primary),
                    ("ups-2", AssociationType::Redundant),
                    ("GEN-9", AssociationType::Maintenance),
                ],
            ),
            relation("RPP-7", &[("PDU-1", AssociationType::Primary)]),
        ];

        let graph = build_device_graph(devices, &relations);

        assert_eq!(graph.vertices.len(), 3);
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.edges[0].id, "PDU-1-UPS-1");
        assert_eq!(graph.edges[0].label, "Primary");
        assert_eq!(graph.edges[1].to, "UPS-2");
        assert_eq!(graph.edges[1].association, AssociationType::Redundant);

        for edge in &graph.edges {
            assert!(graph.vertex(&edge.from).is_some());
            assert!(graph.vertex(&edge.to).is_some());
        }
    }

    #[test]
    fn test_devices_without_relations_have_no_edges() {
        let relations = vec![DeviceRelation {
            device_name: "UPS-1".into(),
            ..Default::default()
        }];
        let graph = build_device_graph(vec![device("UPS-1"), device("PDU-1")], &relations);

        assert_eq!(graph.vertices.len(), 2);
        assert!(graph.edges.is_empty());
        assert_eq!(graph.vertices[0].partition_key, "AMS01");
    }

    #[traced_test]
    #[test]
    fn test_duplicate_devices_keep_first() {
        let mut second = device("ups-1");
        second.dc_name = "DUB02".into();

        let graph = build_device_graph(vec![device("UPS-1"), second], &[]);

        assert_eq!(graph.vertices.len(), 1);
        assert_eq!(graph.vertices[0].partition_key, "AMS01");
        assert!(logs_contain("Duplicate device, keeping the first one."));
    }

    #[test]
    fn test_relations_split_across_entries_are_merged() {
        let relations = vec![
            relation("PDU-1", &[("UPS-1", AssociationType::Primary)]),
            relation("PDU-1", &[("UPS-2", AssociationType::Secondary)]),
        ];
        let graph = build_device_graph(
            vec![device("PDU-1"), device("UPS-1"), device("UPS-2")],
            &relations,
        );

        assert_eq!(graph.edges_from("PDU-1").count(), 2);
    }
}
