//! Interface object types
//!
//! Object types identify the kind of an interface object exposed by a KNX
//! device. Together with an instance number they form the wire-level address
//! of an object in a device management frame.

/// Device Object
pub const DEVICE: u16 = 0;
/// Address Table Object
pub const ADDRESS_TABLE: u16 = 1;
/// Association Table Object
pub const ASSOCIATION_TABLE: u16 = 2;
/// Application Program Object
pub const APPLICATION_PROGRAM: u16 = 3;
/// Interface Program Object
pub const INTERFACE_PROGRAM: u16 = 4;
/// EIB Object Association Table Object
pub const EIB_OBJECT_ASSOCIATION_TABLE: u16 = 5;
/// Router Object
pub const ROUTER: u16 = 6;
/// LTE Address Routing Table Object
pub const LTE_ADDRESS_ROUTING_TABLE: u16 = 7;
/// cEMI Server Object
pub const CEMI_SERVER: u16 = 8;
/// Group Object Table Object
pub const GROUP_OBJECT_TABLE: u16 = 9;
/// Polling Master
pub const POLLING_MASTER: u16 = 10;
/// KNXnet/IP Parameter Object
pub const KNXNETIP_PARAMETER: u16 = 11;
/// File Server Object
pub const FILE_SERVER: u16 = 13;
/// Security Object
pub const SECURITY: u16 = 17;
/// RF Medium Object
pub const RF_MEDIUM: u16 = 19;

/// Get a human readable name of a system interface object type
///
/// # Returns
/// The object name, or `None` for application or unknown object types
pub fn name(object_type: u16) -> Option<&'static str> {
    let name = match object_type {
        DEVICE => "Device Object",
        ADDRESS_TABLE => "Address Table Object",
        ASSOCIATION_TABLE => "Association Table Object",
        APPLICATION_PROGRAM => "Application Program Object",
        INTERFACE_PROGRAM => "Interface Program Object",
        EIB_OBJECT_ASSOCIATION_TABLE => "EIB Object Association Table Object",
        ROUTER => "Router Object",
        LTE_ADDRESS_ROUTING_TABLE => "LTE Address Routing Table Object",
        CEMI_SERVER => "cEMI Server Object",
        GROUP_OBJECT_TABLE => "Group Object Table Object",
        POLLING_MASTER => "Polling Master",
        KNXNETIP_PARAMETER => "KNXnet/IP Parameter Object",
        FILE_SERVER => "File Server Object",
        SECURITY => "Security Object",
        RF_MEDIUM => "RF Medium Object",
        _ => return None,
    };
    Some(name)
}
