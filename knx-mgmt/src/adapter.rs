//! Property access adapter trait
//!
//! This trait provides a unified interface for accessing the properties of
//! the interface objects of a KNX device, independent of how the device is
//! reached.
//!
//! # Lifecycle
//! 1. **Create**: an adapter is open once it is constructed
//! 2. **Use**: read, write and describe properties
//! 3. **Close**: explicitly, or on a reset of the device
//!
//! Property operations on a closed adapter fail with `IllegalState` and do
//! not touch the link. Property operations must not overlap; `is_open()` and
//! `close()` may be called at any time from any task.

use async_trait::async_trait;
use knx_core::KnxResult;

#[async_trait]
pub trait PropertyAdapter: Send + Sync {
    /// Write property elements
    ///
    /// # Arguments
    /// * `object_index` - Index of the interface object
    /// * `pid` - Property identifier
    /// * `start` - Index of the first element
    /// * `elements` - Number of elements to write
    /// * `data` - Element data
    async fn set_property(
        &self,
        object_index: u16,
        pid: u8,
        start: u16,
        elements: u8,
        data: &[u8],
    ) -> KnxResult<()>;

    /// Read property elements
    ///
    /// # Returns
    /// The element data
    async fn get_property(
        &self,
        object_index: u16,
        pid: u8,
        start: u16,
        elements: u8,
    ) -> KnxResult<Vec<u8>>;

    /// Get the description of a property
    ///
    /// The property is selected by `pid`, or by its position
    /// `property_index` within the object if `pid` is 0.
    ///
    /// # Returns
    /// The property description, see [`knx_core::PropertyDescription`]
    async fn get_description(
        &self,
        object_index: u16,
        pid: u8,
        property_index: u16,
    ) -> KnxResult<Vec<u8>>;

    /// Get the adapter name
    fn name(&self) -> String;

    /// Check if the adapter is open
    fn is_open(&self) -> bool;

    /// Close the adapter and release the link
    ///
    /// Closing a closed adapter has no effect.
    async fn close(&self);
}
