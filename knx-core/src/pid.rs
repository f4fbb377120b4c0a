//! Well-known property identifiers

/// Interface object type (all objects)
pub const OBJECT_TYPE: u8 = 1;
/// Interface object name (all objects)
pub const OBJECT_NAME: u8 = 2;
/// Load state control
pub const LOAD_STATE_CONTROL: u8 = 5;
/// Serial number (Device Object)
pub const SERIAL_NUMBER: u8 = 11;
/// Manufacturer identifier (Device Object)
pub const MANUFACTURER_ID: u8 = 12;
/// Device control (Device Object)
pub const DEVICE_CONTROL: u8 = 14;
/// Maximum APDU length (Device Object)
pub const MAX_APDU_LENGTH: u8 = 56;
/// Interface object index list (Device Object)
///
/// Element 0 holds the number of interface objects, elements 1..=N the
/// object type of each interface object in index order.
pub const IO_LIST: u8 = 71;
/// Device descriptor (Device Object)
pub const DEVICE_DESCRIPTOR: u8 = 83;
/// Medium type (cEMI Server Object)
pub const MEDIUM_TYPE: u8 = 51;
/// Communication mode (cEMI Server Object)
pub const COMM_MODE: u8 = 52;
