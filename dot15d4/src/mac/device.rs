//! Device registry: tracks associated peers and per-peer keys (§4.2).

use crate::phy::FrameBuffer;
use crate::time::Instant;
use dot15d4_frame::Address;

/// Maximum number of keys held by a single device record.
pub const MAX_KEYS_PER_DEVICE: usize = 4;
/// Maximum number of devices tracked by a single registry.
pub const MAX_DEVICES: usize = 32;

/// A 16-octet symmetric key plus its index.
#[derive(Clone, Copy, Debug)]
pub struct Key {
    pub index: u8,
    pub bytes: [u8; 16],
}

/// Coordinator-side association sub-state for a device record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceState {
    Associating,
    Associated,
}

/// Role-specific extension held by devices registered by a coordinator.
pub struct CoordinatorExt {
    /// Buffer queued for delivery on the device's next Data-Request.
    pub pending_data: Option<FrameBuffer>,
    pub state: DeviceState,
    pub device_type: u8,
}

/// Per-peer device record.
pub struct Device {
    pub short_address: u16,
    pub extended_address: [u8; 8],
    pub last_sent_sqn: u8,
    pub last_seen: Instant,
    pub last_frame_counter: u32,
    pub keys: heapless::Vec<Key, MAX_KEYS_PER_DEVICE>,
    pub coord: Option<CoordinatorExt>,
}

impl Device {
    fn new(extended_address: [u8; 8], short_address: u16) -> Self {
        Self {
            short_address,
            extended_address,
            last_sent_sqn: 0,
            last_seen: Instant::from_us(0),
            last_frame_counter: 0,
            keys: heapless::Vec::new(),
            coord: None,
        }
    }

    /// Returns the key stored at `index`, if any.
    pub fn key(&self, index: u8) -> Option<&Key> {
        self.keys.iter().find(|k| k.index == index)
    }
}

/// Error returned by registry operations.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry cannot hold any more device records.
    Full,
    /// No device record exists for the given address.
    NotFound,
}

/// Bounded, linearly-scanned registry of device records, keyed by extended
/// address. At most one record per extended address exists at any time.
pub struct DeviceRegistry {
    devices: heapless::Vec<Device, MAX_DEVICES>,
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self {
            devices: heapless::Vec::new(),
        }
    }

    pub fn get_by_short(&self, short: u16) -> Option<&Device> {
        self.devices.iter().find(|d| d.short_address == short)
    }

    pub fn get_by_short_mut(&mut self, short: u16) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.short_address == short)
    }

    pub fn get_by_extended(&self, extended: [u8; 8]) -> Option<&Device> {
        self.devices
            .iter()
            .find(|d| d.extended_address == extended)
    }

    pub fn get_by_extended_mut(&mut self, extended: [u8; 8]) -> Option<&mut Device> {
        self.devices
            .iter_mut()
            .find(|d| d.extended_address == extended)
    }

    /// Dispatches the lookup on the address tag, as spec.md §4.2 describes.
    pub fn get_by_addr(&self, addr: Address) -> Option<&Device> {
        match addr {
            Address::Short(bytes) => self.get_by_short(u16::from_le_bytes(bytes)),
            Address::Extended(bytes) => self.get_by_extended(bytes),
            Address::Absent => None,
        }
    }

    /// Updates (or inserts) the key at `index` for the device identified by
    /// `extended`.
    pub fn set_key(
        &mut self,
        extended: [u8; 8],
        index: u8,
        bytes: [u8; 16],
    ) -> Result<(), RegistryError> {
        let dev = self
            .get_by_extended_mut(extended)
            .ok_or(RegistryError::NotFound)?;
        if let Some(existing) = dev.keys.iter_mut().find(|k| k.index == index) {
            existing.bytes = bytes;
            return Ok(());
        }
        dev.keys
            .push(Key { index, bytes })
            .map_err(|_| RegistryError::Full)
    }

    pub fn remove_key(&mut self, extended: [u8; 8], index: u8) -> Result<(), RegistryError> {
        let dev = self
            .get_by_extended_mut(extended)
            .ok_or(RegistryError::NotFound)?;
        if let Some(pos) = dev.keys.iter().position(|k| k.index == index) {
            dev.keys.swap_remove(pos);
        }
        Ok(())
    }

    /// Allocates (or re-uses) a device record with a coordinator extension,
    /// placing it in the `Associating` sub-state. Re-association of a known
    /// device clears any pending data while preserving its short address
    /// (§4.2, §S6).
    pub fn create_coord_device(&mut self, extended: [u8; 8]) -> Result<&mut Device, RegistryError> {
        if let Some(pos) = self.devices.iter().position(|d| d.extended_address == extended) {
            let dev = &mut self.devices[pos];
            match dev.coord.as_mut() {
                Some(ext) => {
                    ext.pending_data = None;
                    ext.state = DeviceState::Associating;
                }
                None => {
                    dev.coord = Some(CoordinatorExt {
                        pending_data: None,
                        state: DeviceState::Associating,
                        device_type: 0,
                    });
                }
            }
            return Ok(&mut self.devices[pos]);
        }

        // Admission policy: short address = count + 1 (placeholder for random
        // assignment, per spec.md §4.2).
        let short_address = self.devices.len() as u16 + 1;
        let mut dev = Device::new(extended, short_address);
        dev.coord = Some(CoordinatorExt {
            pending_data: None,
            state: DeviceState::Associating,
            device_type: 0,
        });
        self.devices.push(dev).map_err(|_| RegistryError::Full)?;
        Ok(self.devices.last_mut().expect("just pushed"))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Device> {
        self.devices.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admission_assigns_incrementing_short_address() {
        let mut reg = DeviceRegistry::new();
        let a = reg.create_coord_device([1; 8]).unwrap().short_address;
        let b = reg.create_coord_device([2; 8]).unwrap().short_address;
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[test]
    fn reassociation_preserves_short_address_and_clears_pending() {
        let mut reg = DeviceRegistry::new();
        let short = reg.create_coord_device([9; 8]).unwrap().short_address;
        reg.get_by_extended_mut([9; 8]).unwrap().coord.as_mut().unwrap().pending_data =
            Some(FrameBuffer::default());

        let dev = reg.create_coord_device([9; 8]).unwrap();
        assert_eq!(dev.short_address, short);
        assert!(dev.coord.as_ref().unwrap().pending_data.is_none());
        assert_eq!(dev.coord.as_ref().unwrap().state, DeviceState::Associating);
    }

    #[test]
    fn duplicate_detection_uses_extended_address() {
        let mut reg = DeviceRegistry::new();
        reg.create_coord_device([1; 8]).unwrap();
        reg.create_coord_device([1; 8]).unwrap();
        assert_eq!(reg.iter().count(), 1);
    }

    #[test]
    fn set_key_inserts_then_updates() {
        let mut reg = DeviceRegistry::new();
        reg.create_coord_device([1; 8]).unwrap();
        reg.set_key([1; 8], 0, [7; 16]).unwrap();
        reg.set_key([1; 8], 0, [8; 16]).unwrap();
        let dev = reg.get_by_extended([1; 8]).unwrap();
        assert_eq!(dev.keys.len(), 1);
        assert_eq!(dev.key(0).unwrap().bytes, [8; 16]);
    }
}
