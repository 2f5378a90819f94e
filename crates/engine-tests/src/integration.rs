#[cfg(test)]
mod tests {
    use crate::{
        Workspace,
        utils::{
            DATA_CENTERS_CSV, DEVICES_CSV, EVENTS_AMS_CSV, EVENTS_DUB_CSV, LOCATIONS_CSV,
            RELATIONS_JSON, UNTYPED_DEVICES_CSV, find_by, read_collection,
        },
        worker_for,
    };
    use connectors::file::csv::CsvResult;
    use engine_config::settings::{SettingsError, SettingsLoader};
    use engine_processing::{
        error::SyncError, graph::build_device_graph, producer::BatchStreamer,
    };
    use model::entities::{
        AssociationType, DeviceRelation, DeviceType, PowerDevice, PowerDeviceEvent,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use tokio_util::sync::CancellationToken;
    use tracing_test::traced_test;

    // Scenario: A typed device export is synced into a collection.
    // Expected Outcome:
    // - Enum columns given as text in any case map onto the enum fields.
    // - The sbyte monitor flag becomes a boolean.
    // - Columns without a field are reported, not fatal.
    #[traced_test]
    #[tokio::test]
    async fn tc01() {
        let ws = Workspace::new();
        ws.query("devices.csv", DEVICES_CSV);
        let settings = ws.settings(
            "sync.json",
            json!({
                "batchSize": 2,
                "tables": [{ "query": "devices.csv", "model": "PowerDevice", "collection": "devices" }]
            }),
        );

        let worker = worker_for(&settings, None, &[]);
        let reports = worker.run(&CancellationToken::new()).await.unwrap();

        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.batches, 2);
        assert_eq!(report.found, 3);
        assert_eq!(report.ingested, 3);
        assert_eq!(report.unmapped, vec!["Vendor".to_string()]);
        assert_eq!(report.conversion_failures, 0);

        let docs = read_collection(&ws.output("devices"));
        assert_eq!(docs.len(), 3);

        let ups = find_by(&docs, "deviceName", "UPS-01");
        assert_eq!(ups["deviceType"], "Ups");
        assert_eq!(ups["deviceState"], "Active");
        assert_eq!(ups["copaConfigType"], "Modbus");
        assert_eq!(ups["isMonitorable"], true);
        assert_eq!(ups["ampRating"], 400.5);
        assert_eq!(ups["dcCode"], 7);
        assert_eq!(ups["xCoordination"], 3);

        let pdu = find_by(&docs, "deviceName", "PDU-01");
        assert_eq!(pdu["isMonitorable"], false);
        assert!(pdu["ampRating"].is_null());

        let planned = find_by(&docs, "deviceName", "PDU-02");
        assert_eq!(planned["deviceState"], "Planned");
        assert_eq!(planned["copaConfigType"], "Unknown");
    }

    // Scenario: Every column arrives as text and one value cannot be read as a number.
    // Expected Outcome: Values are parsed into the field types; the bad value leaves
    // the field at its default and is counted as a conversion failure.
    #[traced_test]
    #[tokio::test]
    async fn tc02() {
        let ws = Workspace::new();
        ws.query("devices.csv", UNTYPED_DEVICES_CSV);
        let settings = ws.settings(
            "sync.json",
            json!({
                "tables": [{ "query": "devices.csv", "model": "PowerDevice", "collection": "devices" }]
            }),
        );

        let worker = worker_for(&settings, None, &[]);
        let reports = worker.run(&CancellationToken::new()).await.unwrap();
        assert_eq!(reports[0].found, 2);
        assert_eq!(reports[0].conversion_failures, 1);
        assert_eq!(worker.metrics().snapshot().conversion_failures, 1);

        let docs = read_collection(&ws.output("devices"));
        let ups = find_by(&docs, "deviceName", "UPS-01");
        assert_eq!(ups["dcCode"], 7);
        assert_eq!(ups["ampRating"], 400.5);
        assert_eq!(ups["isMonitorable"], true);

        let generator = find_by(&docs, "deviceName", "GEN-01");
        assert_eq!(generator["dcCode"], 0);
        assert_eq!(generator["ampRating"], 12.0);
    }

    // Scenario: An event table is split by data center.
    // Expected Outcome: The query runs once per data center, in configured order,
    // and the lower-case timestamp column binds through its alias.
    #[traced_test]
    #[tokio::test]
    async fn tc03() {
        let ws = Workspace::new();
        ws.query("events_AMS01.csv", EVENTS_AMS_CSV)
            .query("events_DUB02.csv", EVENTS_DUB_CSV);
        let settings = ws.settings(
            "sync.json",
            json!({
                "batchSize": 2,
                "dataCenters": ["AMS01", "DUB02"],
                "tables": [{
                    "query": "events_{dc}.csv",
                    "model": "PowerDeviceEvent",
                    "collection": "events",
                    "splitByDc": true
                }]
            }),
        );

        let worker = worker_for(&settings, None, &[]);
        let reports = worker.run(&CancellationToken::new()).await.unwrap();
        assert_eq!(reports[0].queries, 2);
        assert_eq!(reports[0].batches, 3);
        assert_eq!(reports[0].found, 4);

        let docs = read_collection(&ws.output("events"));
        assert_eq!(docs.len(), 4);
        assert_eq!(docs[0]["dataCenterName"], "AMS01");
        assert_eq!(docs[3]["dataCenterName"], "DUB02");

        let first: PowerDeviceEvent = serde_json::from_value(docs[0].clone()).unwrap();
        assert_eq!(first.time_stamp.to_rfc3339(), "2024-03-01T10:00:00+00:00");
        assert_eq!(first.value, Some(41.5));
        assert!(docs[2]["value"].is_null());
        assert_eq!(docs[2]["status"], 1);
    }

    // Scenario: Location and data center tables use column aliases and a rack list.
    // Expected Outcome: Aliased columns fill the right fields and the rack list is
    // split into separate names.
    #[traced_test]
    #[tokio::test]
    async fn tc04() {
        let ws = Workspace::new();
        ws.query("locations.csv", LOCATIONS_CSV)
            .query("datacenters.csv", DATA_CENTERS_CSV);
        let settings = ws.settings(
            "sync.json",
            json!({
                "tables": [
                    { "query": "locations.csv", "model": "DeviceLocation", "collection": "locations" },
                    { "query": "datacenters.csv", "model": "Models.DataCenter", "collection": "datacenters" }
                ]
            }),
        );

        let worker = worker_for(&settings, None, &[]);
        let reports = worker.run(&CancellationToken::new()).await.unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].model, "DataCenter");

        let locations = read_collection(&ws.output("locations"));
        let pdu = find_by(&locations, "id", "PDU-01");
        assert_eq!(pdu["racks"], json!(["R01", "R02"]));
        assert_eq!(find_by(&locations, "id", "PDU-02")["racks"], json!([]));

        let dcs = read_collection(&ws.output("datacenters"));
        let ams = find_by(&dcs, "dcName", "AMS01");
        assert_eq!(ams["dcLongName"], "Amsterdam 01");
        assert_eq!(ams["region"], "EU West");
        assert_eq!(ams["msAssetID"], 1001.0);
    }

    // Scenario: The same table is synced twice, with and without clearing the target.
    // Expected Outcome: Without clearing the documents accumulate; with clearing only
    // the latest run remains.
    #[traced_test]
    #[tokio::test]
    async fn tc05() {
        let ws = Workspace::new();
        ws.query("devices.csv", DEVICES_CSV);

        let appending = ws.settings(
            "append.json",
            json!({
                "tables": [{ "query": "devices.csv", "model": "PowerDevice", "collection": "devices" }]
            }),
        );
        let worker = worker_for(&appending, None, &[]);
        worker.run(&CancellationToken::new()).await.unwrap();
        worker.run(&CancellationToken::new()).await.unwrap();
        assert_eq!(read_collection(&ws.output("devices")).len(), 6);

        let clearing = ws.settings(
            "clear.json",
            json!({
                "tables": [{
                    "query": "devices.csv",
                    "model": "PowerDevice",
                    "collection": "devices",
                    "clearTarget": true
                }]
            }),
        );
        worker_for(&clearing, None, &[])
            .run(&CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(read_collection(&ws.output("devices")).len(), 3);
    }

    // Scenario: An environment overlay and an environment variable both set the batch size.
    // Expected Outcome: The overlay replaces the base value and the variable wins over both.
    #[traced_test]
    #[tokio::test]
    async fn tc06() {
        let ws = Workspace::new();
        ws.query("devices.csv", DEVICES_CSV);
        let settings = ws.settings(
            "sync.json",
            json!({
                "batchSize": 100,
                "tables": [{ "query": "devices.csv", "model": "PowerDevice", "collection": "devices" }]
            }),
        );
        std::fs::write(ws.path().join("sync.test.json"), r#"{ "batchSize": 1 }"#).unwrap();

        let reports = worker_for(&settings, Some("test"), &[])
            .run(&CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(reports[0].batches, 3);

        let reports = worker_for(&settings, Some("test"), &[("SYNC_BATCH_SIZE", "2")])
            .run(&CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(reports[0].batches, 2);
    }

    // Scenario: Settings name a model that does not exist.
    // Expected Outcome: Loading fails before anything runs.
    #[test]
    fn tc07() {
        let ws = Workspace::new();
        let settings = ws.settings(
            "sync.json",
            json!({
                "tables": [{ "query": "racks.csv", "model": "Rack", "collection": "racks" }]
            }),
        );

        let err = SettingsLoader::with_vars(&settings, HashMap::new())
            .load()
            .unwrap_err();
        assert!(matches!(err, SettingsError::UnknownModel(model) if model == "Rack"));
    }

    // Scenario: A configured query file is missing.
    // Expected Outcome: The sync fails naming the query and writes nothing.
    #[traced_test]
    #[tokio::test]
    async fn tc08() {
        let ws = Workspace::new();
        let settings = ws.settings(
            "sync.json",
            json!({
                "tables": [{ "query": "missing.csv", "model": "DcRank", "collection": "ranks" }]
            }),
        );

        let err = worker_for(&settings, None, &[])
            .run(&CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Query { query, .. } if query == "missing.csv"));
        assert!(read_collection(&ws.output("ranks")).is_empty());
    }

    // Scenario: The run is cancelled before it starts.
    // Expected Outcome: No table is synced and no collection is written.
    #[traced_test]
    #[tokio::test]
    async fn tc09() {
        let ws = Workspace::new();
        ws.query("devices.csv", DEVICES_CSV);
        let settings = ws.settings(
            "sync.json",
            json!({
                "tables": [{ "query": "devices.csv", "model": "PowerDevice", "collection": "devices" }]
            }),
        );

        let cancel = CancellationToken::new();
        cancel.cancel();
        let reports = worker_for(&settings, None, &[]).run(&cancel).await.unwrap();

        assert!(reports.is_empty());
        assert!(!ws.output("devices").exists());
    }

    // Scenario: Devices are streamed from CSV and combined with relation data.
    // Expected Outcome: One vertex per device and one edge per known upstream parent,
    // matched ignoring case; parents outside the device list are skipped.
    #[traced_test]
    #[tokio::test]
    async fn tc10() {
        let mut result = CsvResult::from_reader(DEVICES_CSV.as_bytes(), "devices").unwrap();
        let (devices, summary) = BatchStreamer::new(2)
            .unwrap()
            .collect::<PowerDevice, _>(&mut result, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(summary.batches, 2);
        assert!(result.is_closed());

        let relations: Vec<DeviceRelation> = serde_json::from_str(RELATIONS_JSON).unwrap();
        let graph = build_device_graph(devices, &relations);

        assert_eq!(graph.vertices.len(), 3);
        assert_eq!(graph.vertex("ups-01").unwrap().device.device_type, DeviceType::Ups);
        assert_eq!(graph.edges.len(), 2);

        let from_pdu: Vec<_> = graph.edges_from("PDU-01").collect();
        assert_eq!(from_pdu.len(), 1);
        assert_eq!(from_pdu[0].id, "PDU-01-UPS-01");
        assert_eq!(from_pdu[0].association, AssociationType::Primary);

        let from_spare: Vec<_> = graph.edges_from("PDU-02").collect();
        assert_eq!(from_spare[0].association, AssociationType::Redundant);
        assert_eq!(graph.edges_from("UPS-01").count(), 0);
    }
}
