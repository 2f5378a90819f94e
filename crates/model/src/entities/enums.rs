use crate::record_enum;

record_enum! {
    pub enum DeviceType {
        Unknown,
        Utility,
        Generator,
        Transformer,
        Switchgear,
        Ups,
        Pdu,
        Rpp,
        Sts,
        Busway,
        Panel,
        Breaker,
    }
}

record_enum! {
    pub enum DeviceState {
        Unknown,
        Active,
        Inactive,
        Planned,
        Maintenance,
        Decommissioned,
    }
}

record_enum! {
    /// How telemetry is collected from a device.
    pub enum CommunicationProtocol {
        Unknown,
        Modbus,
        Bacnet,
        Snmp,
        Sql,
        Opc,
    }
}

record_enum! {
    pub enum OnboardingMode {
        Unknown,
        Manual,
        Automated,
    }
}

record_enum! {
    /// Kind of link between a device and one of its upstream parents.
    pub enum AssociationType {
        Primary,
        Secondary,
        Maintenance,
        Redundant,
    }
}
