//! Coordinator role: periodic beacon transmission and MAC command handling
//! for associating/polling devices (§4.5).
//!
//! Grounded on `mac::mlme::beacon`'s existing beacon-frame construction
//! pattern (`FrameBuilder::new_beacon()` + `DataFrame` emission) and on
//! `mac::device::DeviceRegistry` for admission/indirect-transmission
//! bookkeeping.

use dot15d4_frame::{Address, DataFrame, FrameBuilder};
use embedded_hal_async::delay::DelayNs;
use rand_core::RngCore;

use crate::mac::command::{
    build_association_response, command_id, parse_association_request, parse_data_request,
    AssociationStatus, CommandId,
};
use crate::mac::device::DeviceState;
use crate::mac::MacService;
use crate::phy::radio::{Radio, RadioFrameMut};
use crate::phy::FrameBuffer;
use crate::upper::UpperLayer;

#[allow(dead_code)]
impl<Rng, U, TIMER, R> MacService<'_, Rng, U, TIMER, R>
where
    Rng: RngCore,
    U: UpperLayer,
    TIMER: DelayNs + Clone,
    R: Radio,
    for<'a> R::RadioFrame<&'a mut [u8]>: RadioFrameMut<&'a mut [u8]>,
    for<'a> R::TxToken<'a>: From<&'a mut [u8]>,
{
    /// Builds and transmits a Beacon frame carrying the superframe
    /// specification and the pending-address list (spec.md §4.5). Called
    /// on slot 0 of every superframe while coordinating, and immediately in
    /// response to a Beacon-Request command.
    pub(crate) async fn request_beacon(&mut self) {
        let mut payload = [0u8; 4 + 7 * 2];
        let payload_len = self.build_beacon_payload(&mut payload);

        let short_address = self.pib.short_address.to_le_bytes();
        let Some(frame_repr) = FrameBuilder::new_beacon()
            .set_sequence_number(self.pib.next_sqn())
            .set_src_pan_id(self.pib.pan_id)
            .set_src_address(Address::Short(short_address))
            .set_payload(&payload[..payload_len])
            .finalize()
            .ok()
        else {
            warn!("Failed to build beacon frame");
            return;
        };

        let mut tx = FrameBuffer::default();
        frame_repr.emit(&mut DataFrame::new_unchecked(&mut tx.buffer));
        self.phy_send(tx).await;
    }

    /// Encodes the superframe specification (beacon/superframe order, final
    /// CAP slot, PAN-coordinator/association-permit bits), an empty GTS
    /// specification (GTS is out of scope, per spec.md Non-goals), and the
    /// pending-address list drawn from devices with buffered indirect data.
    fn build_beacon_payload(&self, buf: &mut [u8]) -> usize {
        use crate::mac::scheduler::CAP_END_SLOT;

        let sf_spec: u16 = (self.pib.beacon_order as u16)
            | ((self.pib.superframe_order as u16) << 4)
            | ((CAP_END_SLOT as u16) << 8)
            | (1 << 14) // this device is the PAN coordinator
            | ((self.pib.association_permit as u16) << 15);
        buf[0..2].copy_from_slice(&sf_spec.to_le_bytes());
        buf[2] = 0; // GTS specification: no GTS slots

        let mut count = 0u8;
        let mut offset = 4usize;
        for device in self.devices.iter() {
            if count >= 7 {
                break;
            }
            if let Some(coord) = &device.coord {
                if coord.pending_data.is_some() {
                    buf[offset..offset + 2].copy_from_slice(&device.short_address.to_le_bytes());
                    offset += 2;
                    count += 1;
                }
            }
        }
        buf[3] = count; // pending address specification: `count` short addresses
        offset
    }

    /// Handles an inbound MAC command frame addressed to this coordinator.
    pub(crate) async fn handle_command_frame(&mut self, buffer: &FrameBuffer) {
        let data = &buffer.buffer[..];
        match command_id(data) {
            Some(CommandId::AssociationRequest) => self.handle_association_request(data).await,
            Some(CommandId::DataRequest) => self.handle_data_request(data).await,
            Some(CommandId::BeaconRequest) => self.request_beacon().await,
            _ => {}
        }
    }

    async fn handle_association_request(&mut self, data: &[u8]) {
        let Some(request) = parse_association_request(data) else {
            return;
        };

        if !self.pib.association_permit {
            return;
        }

        let status = match self.devices.create_coord_device(request.src_extended_address) {
            Ok(device) => {
                let mut buffer = FrameBuffer::default();
                let sqn = self.pib.next_sqn();
                build_association_response(
                    &mut buffer.buffer,
                    sqn,
                    self.pib.pan_id,
                    request.src_extended_address,
                    self.pib.short_address,
                    device.short_address,
                    AssociationStatus::Successful,
                );
                device.coord.as_mut().expect("just created").pending_data = Some(buffer);
                AssociationStatus::Successful
            }
            Err(_) => AssociationStatus::PanAtCapacity,
        };

        if status != AssociationStatus::Successful {
            info!("Association request rejected: PAN at capacity");
        }
    }

    async fn handle_data_request(&mut self, data: &[u8]) {
        let Some(request) = parse_data_request(data) else {
            return;
        };

        let Some(device) = self.devices.get_by_extended_mut(request.src_extended_address) else {
            return;
        };
        let Some(coord) = device.coord.as_mut() else {
            return;
        };

        let Some(pending) = coord.pending_data.take() else {
            return;
        };
        coord.state = DeviceState::Associated;
        self.phy_send(pending).await;
    }
}
