//! Local device management
//!
//! [`DeviceManagement`] implements [`PropertyAdapter`] on top of a
//! [`ManagementLink`]. On construction it discovers the interface objects of
//! the device; afterwards object indices are resolved to the object type and
//! instance carried in the frames.
//!
//! # Description Emulation
//!
//! The local device management services have no property description
//! service. Descriptions are synthesized by reading property ids one after
//! the other and counting the properties found. A [`DescriptionCursor`]
//! keeps the position, so querying increasing property indices of the same
//! object reads every property id at most once. The datatype, element count
//! and access level fields of emulated descriptions are always 0.
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use knx_mgmt::{DeviceManagement, DeviceMgmtConfig, PropertyAdapter};
//!
//! // `link` is any knx_transport::DeviceLink
//! let mgmt = DeviceManagement::local_bus(link, DeviceMgmtConfig::default()).await?;
//! let serial = mgmt.get_property(0, knx_core::pid::SERIAL_NUMBER, 1, 1).await?;
//! mgmt.close().await;
//! ```

use crate::adapter::PropertyAdapter;
use crate::cursor::DescriptionCursor;
use crate::directory::{self, Directory, InterfaceObject};
use crate::inbox;
use crate::lifecycle::Lifecycle;
use crate::link::{LocalBusLink, ManagementLink, NetworkLink};
use crate::listener::MgmtListener;
use crate::session::MgmtSession;
use async_trait::async_trait;
use knx_core::description::WRITE_ENABLED;
use knx_core::{KnxError, KnxResult};
use knx_transport::{CloseListener, DeviceLink};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Device management configuration
#[derive(Clone, Default, Deserialize)]
pub struct DeviceMgmtConfig {
    /// Probe write access when emulating property descriptions
    ///
    /// The probe writes the current value back to the property.
    #[serde(default)]
    pub query_write_enable: bool,
    /// Receiver of the adapter's close notifications
    #[serde(skip)]
    pub close_listener: Option<Arc<dyn CloseListener>>,
}

impl DeviceMgmtConfig {
    /// Set the receiver of close notifications
    pub fn with_close_listener(mut self, listener: Arc<dyn CloseListener>) -> Self {
        self.close_listener = Some(listener);
        self
    }

    /// Enable or disable the write access probe
    pub fn with_query_write_enable(mut self, enable: bool) -> Self {
        self.query_write_enable = enable;
        self
    }
}

impl fmt::Debug for DeviceMgmtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceMgmtConfig")
            .field("query_write_enable", &self.query_write_enable)
            .field("close_listener", &self.close_listener.is_some())
            .finish()
    }
}

/// Device management adapter for KNX devices
pub struct DeviceManagement<L: ManagementLink> {
    session: MgmtSession<L>,
    directory: Directory,
    cursor: Mutex<DescriptionCursor>,
    query_write_enable: bool,
}

impl<D: DeviceLink> DeviceManagement<LocalBusLink<D>> {
    /// Open device management for a locally attached device
    pub async fn local_bus(link: D, config: DeviceMgmtConfig) -> KnxResult<Self> {
        Self::open(LocalBusLink::new(link), config).await
    }
}

impl<D: DeviceLink> DeviceManagement<NetworkLink<D>> {
    /// Open device management over a KNXnet/IP device management connection
    pub async fn network(link: D, config: DeviceMgmtConfig) -> KnxResult<Self> {
        Self::open(NetworkLink::new(link), config).await
    }
}

impl<L: ManagementLink> DeviceManagement<L> {
    /// Open device management over a management link
    ///
    /// Registers with the link and discovers the interface objects of the
    /// device. If discovery fails, the link is released before the error is
    /// returned.
    pub async fn open(link: L, config: DeviceMgmtConfig) -> KnxResult<Self> {
        let (sender, inbox) = inbox::channel();
        let inbox = Arc::new(inbox);
        let lifecycle = Arc::new(Lifecycle::new());
        link.set_listener(Arc::new(MgmtListener::new(
            sender,
            inbox.clone(),
            lifecycle.clone(),
            config.close_listener.clone(),
        )));
        let session = MgmtSession::new(link, inbox, lifecycle);

        let directory = match directory::discover(&session).await {
            Ok(directory) => directory,
            Err(e) => {
                log::debug!("{}: discovery failed: {}", session.link().name(), e);
                session.close().await;
                return Err(e);
            }
        };
        log::info!(
            "{}: opened with {} interface objects",
            session.link().name(),
            directory.objects().len()
        );

        Ok(Self {
            session,
            directory,
            cursor: Mutex::new(DescriptionCursor::new()),
            query_write_enable: config.query_write_enable,
        })
    }

    /// Get the interface objects of the device in index order
    pub fn interface_objects(&self) -> &[InterfaceObject] {
        self.directory.objects()
    }

    /// Check if the adapter was closed by a reset of the device
    pub fn was_reset(&self) -> bool {
        self.session.lifecycle().was_reset()
    }

    /// Request a reset of the device
    ///
    /// The request is not confirmed. The reset indication sent by the
    /// restarting device closes the adapter with the next request.
    pub async fn reset(&self) -> KnxResult<()> {
        self.session.reset_device().await
    }

    async fn read(&self, object_index: u16, pid: u8, start: u16, elements: u8) -> KnxResult<Vec<u8>> {
        self.session.ensure_open()?;
        let (object_type, instance) = self.directory.resolve(object_index)?;
        let data = self
            .session
            .read(object_type, instance, pid, start, elements)
            .await?;
        Ok(data.to_vec())
    }

    async fn write(
        &self,
        object_index: u16,
        pid: u8,
        start: u16,
        elements: u8,
        data: &[u8],
    ) -> KnxResult<()> {
        self.session.ensure_open()?;
        let (object_type, instance) = self.directory.resolve(object_index)?;
        self.session
            .write(object_type, instance, pid, start, elements, data)
            .await
    }

    /// Find the property at `property_index` by reading property ids
    ///
    /// Continues from the cursor position. Property ids answered with a
    /// negative response do not exist and are skipped.
    ///
    /// # Returns
    /// The property id and, if a read was necessary, its first element
    async fn probe(
        &self,
        cursor: &mut DescriptionCursor,
        object_index: u16,
        property_index: u16,
    ) -> KnxResult<(u8, Option<Vec<u8>>)> {
        let mut index = cursor.property_index();
        let mut pid = cursor.pid();
        let mut value = None;

        while index != Some(property_index) && pid < u8::MAX {
            pid += 1;
            match self.read(object_index, pid, 1, 1).await {
                Ok(data) => {
                    index = Some(index.map_or(0, |i| i + 1));
                    value = Some(data);
                }
                Err(KnxError::Remote(_)) => {}
                Err(e) => return Err(e),
            }
        }

        if index != Some(property_index) {
            cursor.reset();
            return Err(KnxError::Remote(format!(
                "can't deduce property index in object (object {}, property index {})",
                object_index, property_index
            )));
        }
        cursor.advance(object_index, property_index, pid);
        Ok((pid, value))
    }

    /// Probe write access by writing back the current value
    async fn probe_write_enable(&self, object_index: u16, pid: u8, value: &[u8]) -> KnxResult<u8> {
        match self.write(object_index, pid, 1, 1, value).await {
            Ok(()) => Ok(WRITE_ENABLED),
            Err(KnxError::Remote(reason)) => {
                log::trace!("object {} PID {} not writable: {}", object_index, pid, reason);
                Ok(0)
            }
            Err(e) => Err(e),
        }
    }
}

impl<L: ManagementLink> fmt::Debug for DeviceManagement<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceManagement")
            .field("name", &self.session.link().name())
            .field("state", &self.session.lifecycle().state())
            .field("directory", &self.directory)
            .field("query_write_enable", &self.query_write_enable)
            .finish()
    }
}

#[async_trait]
impl<L: ManagementLink> PropertyAdapter for DeviceManagement<L> {
    async fn set_property(
        &self,
        object_index: u16,
        pid: u8,
        start: u16,
        elements: u8,
        data: &[u8],
    ) -> KnxResult<()> {
        self.write(object_index, pid, start, elements, data).await
    }

    async fn get_property(
        &self,
        object_index: u16,
        pid: u8,
        start: u16,
        elements: u8,
    ) -> KnxResult<Vec<u8>> {
        self.read(object_index, pid, start, elements).await
    }

    async fn get_description(
        &self,
        object_index: u16,
        pid: u8,
        property_index: u16,
    ) -> KnxResult<Vec<u8>> {
        self.session.ensure_open()?;

        let mut cursor = self.cursor.lock().await;
        if !cursor.continues(object_index, pid, property_index) {
            cursor.reset();
        }

        let (pid, value) = if pid == 0 {
            self.probe(&mut cursor, object_index, property_index).await?
        } else {
            (pid, Some(self.read(object_index, pid, 1, 1).await?))
        };
        drop(cursor);

        let mut write_flag = 0;
        if self.query_write_enable {
            let value = match value {
                Some(value) => value,
                None => self.read(object_index, pid, 1, 1).await?,
            };
            write_flag = self.probe_write_enable(object_index, pid, &value).await?;
        }

        // description fields are single octets
        Ok(vec![
            object_index as u8,
            pid,
            property_index as u8,
            write_flag,
            0,
            0,
            0,
        ])
    }

    fn name(&self) -> String {
        self.session.link().name()
    }

    fn is_open(&self) -> bool {
        self.session.lifecycle().is_open()
    }

    async fn close(&self) {
        if self.session.close().await {
            log::debug!("{}: closed", self.name());
        }
    }
}
