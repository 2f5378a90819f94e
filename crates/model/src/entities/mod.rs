pub mod datacenter;
pub mod enums;
pub mod event;
pub mod location;
pub mod power_device;
pub mod relation;

pub use datacenter::{DataCenter, DcRank};
pub use enums::{AssociationType, CommunicationProtocol, DeviceState, DeviceType, OnboardingMode};
pub use event::PowerDeviceEvent;
pub use location::DeviceLocation;
pub use power_device::PowerDevice;
pub use relation::{DeviceAssociation, DeviceRelation};

use crate::{core::field::RecordSchema, records::record::Record};
use lazy_static::lazy_static;
use std::{collections::HashMap, fmt, str::FromStr};

/// Record types a table sync can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    PowerDevice,
    PowerDeviceEvent,
    DcRank,
    DeviceLocation,
    DataCenter,
}

lazy_static! {
    static ref MODEL_KEYS: HashMap<String, ModelKind> = ModelKind::ALL
        .iter()
        .map(|kind| (kind.key().to_ascii_lowercase(), *kind))
        .collect();
}

impl ModelKind {
    pub const ALL: [ModelKind; 5] = [
        ModelKind::PowerDevice,
        ModelKind::PowerDeviceEvent,
        ModelKind::DcRank,
        ModelKind::DeviceLocation,
        ModelKind::DataCenter,
    ];

    /// Looks a model up by configuration key, ignoring case. Namespaced keys
    /// such as `Models.PowerDevice` resolve by their last segment.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        let name = key.rsplit('.').next().unwrap_or(key);
        MODEL_KEYS.get(&name.to_ascii_lowercase()).copied()
    }

    pub fn key(&self) -> &'static str {
        self.schema().name
    }

    pub fn schema(&self) -> &'static RecordSchema {
        match self {
            ModelKind::PowerDevice => PowerDevice::schema(),
            ModelKind::PowerDeviceEvent => PowerDeviceEvent::schema(),
            ModelKind::DcRank => DcRank::schema(),
            ModelKind::DeviceLocation => DeviceLocation::schema(),
            ModelKind::DataCenter => DataCenter::schema(),
        }
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelKind::from_key(s).ok_or_else(|| format!("Unknown model: {s}"))
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
