use std::{fs, path::Path};

/// Inventory export with typed headers. `IsMonitorable` comes through as a
/// signed byte and the enum columns as free text.
pub const DEVICES_CSV: &str = "\
DeviceName,DcName,DcCode:long,DeviceType,DeviceState,IsMonitorable:sbyte,AmpRating:real,XCoordination:int,CopaConfigType,Vendor
UPS-01,AMS01,7,ups,ACTIVE,1,400.5,3,modbus,Acme
PDU-01,AMS01,7,PDU,active,0,,4,Snmp,Acme
PDU-02,AMS01,7,pdu,Planned,1,125,5,,Acme
";

/// Same devices with no declared types; every column arrives as text.
pub const UNTYPED_DEVICES_CSV: &str = "\
DeviceName,DcName,DcCode,AmpRating,IsMonitorable
UPS-01,AMS01,7,400.5,true
GEN-01,AMS01,seven,12,false
";

pub const EVENTS_AMS_CSV: &str = "\
timestamp:datetime,DataCenterName,DeviceName,DataPoint,Status:long,Value:real
2024-03-01T10:00:00Z,AMS01,UPS-01,Load,0,41.5
2024-03-01T10:01:00Z,AMS01,UPS-01,Load,0,42
2024-03-01T10:02:00Z,AMS01,UPS-01,Load,1,
";

pub const EVENTS_DUB_CSV: &str = "\
timestamp:datetime,DataCenterName,DeviceName,DataPoint,Status:long,Value:real
2024-03-01T10:00:00Z,DUB02,PDU-09,Current,0,12.25
";

pub const LOCATIONS_CSV: &str = "\
id,DcName,DcCode:long,ColoName,Racks
PDU-01,AMS01,7,Colo-1,\"[\"\"R01\"\", \"\"R02\"\"]\"
PDU-02,AMS01,7,Colo-1,
";

pub const DATA_CENTERS_CSV: &str = "\
dcName,dcLongName,Region,MSAssetID:real
AMS01,Amsterdam 01,EU West,1001
DUB02,Dublin 02,EU North,1002
";

pub const RELATIONS_JSON: &str = r#"[
  {
    "deviceName": "PDU-01",
    "dcName": "AMS01",
    "directUpstreamDeviceList": [
      { "deviceName": "ups-01", "associationType": "Primary" },
      { "deviceName": "GEN-99", "associationType": "Secondary" }
    ]
  },
  {
    "deviceName": "PDU-02",
    "dcName": "AMS01",
    "directUpstreamDeviceList": [
      { "deviceName": "UPS-01", "associationType": "Redundant" }
    ]
  },
  { "deviceName": "UPS-01", "dcName": "AMS01" }
]"#;

/// Reads a JSON lines collection, one document per line.
pub fn read_collection(path: &Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("valid JSON line"))
        .collect()
}

pub fn find_by<'a>(docs: &'a [serde_json::Value], key: &str, value: &str) -> &'a serde_json::Value {
    docs.iter()
        .find(|doc| doc[key] == value)
        .unwrap_or_else(|| panic!("no document with {key} = {value}"))
}
