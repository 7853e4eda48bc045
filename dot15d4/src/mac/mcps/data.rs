use dot15d4_frame::{Address, DataFrame, FrameBuilder};

use crate::mac::pib::MacMode;
use crate::mac::security::AUX_SECURITY_HEADER_LEN;
use crate::phy::radio::{Radio, RadioFrameMut};
use crate::{mac::MacService, phy::FrameBuffer, upper::UpperLayer};
use embedded_hal_async::delay::DelayNs;
use rand_core::RngCore;

/// Maximum data-service payload: a 127-octet PHY frame minus the largest MHR
/// this stack builds (2 FCF + 1 SQN + 2 dst PAN + 2 dst addr + 2 src addr)
/// minus the 4-octet MIC the security supplicant appends.
pub const MAX_DATA_PAYLOAD_LEN: usize = 127 - 9 - 4;

/// Status reported back to the caller of [`MacService::mcps_send_data`]
/// (spec.md §4.8).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataStatus {
    Success,
    NoAck,
    ChannelAccessFailure,
    UnsupportedSecurity,
    NotAllowed,
}

pub enum DataError {
    // TODO: not supported
    TransactionOverlflow,
    // TODO: not supported
    TransactionExpired,
    // TODO: not supported
    ChannelAccesFailure,
    // TODO: not supported
    InvalidAddress,
    // TODO: not supported
    NoAck,
    // TODO: not supported
    CounterError,
    // TODO: not supported
    FrameTooLong,
    // TODO: not supported
    InvalidParameter,
}

pub struct DataConfirm {
    /// Timestamp of frame transmission
    pub timestamp: u32,
    /// Wheiter the frame has been acknowledge or not
    pub acked: bool,
}

#[derive(Default)]
pub struct DataIndication {
    /// buffer containing the received frame
    pub buffer: FrameBuffer,
    /// Timestamp of frame reception
    pub timestamp: u32,
}

impl<Rng, U, TIMER, R> MacService<'_, Rng, U, TIMER, R>
where
    Rng: RngCore,
    U: UpperLayer,
    TIMER: DelayNs + Clone,
    R: Radio,
    for<'a> R::RadioFrame<&'a mut [u8]>: RadioFrameMut<&'a mut [u8]>,
    for<'a> R::TxToken<'a>: From<&'a mut [u8]>,
{
    /// Requests the transfer of data to another device
    pub async fn mcps_data_request(
        &self,
        frame: &mut FrameBuffer,
    ) -> Result<DataConfirm, DataError> {
        let sequence_number = Self::set_ack(frame);

        self.phy_send(core::mem::take(frame)).await;
        let acked = match sequence_number {
            Some(sequence_number) => self.wait_for_ack(sequence_number).await,
            _ => true,
        };
        Ok(DataConfirm {
            // TODO: support timestamp
            timestamp: 0,
            acked,
        })
    }

    pub async fn mcps_data_indication(&self, indication: &mut DataIndication) {
        self.upper_layer
            .received_frame(core::mem::take(&mut indication.buffer))
            .await;
    }

    /// `send_data(data, len, dest, secure) -> handle` (spec.md §4.8). Refuses
    /// with [`DataStatus::NotAllowed`] unless the MAC is `Coordinating` or
    /// `Associated`. The returned handle is the SQN allocated for the frame,
    /// returned regardless of outcome.
    ///
    /// Confirmation is modeled synchronously — this stack resolves MLME/MCPS
    /// requests as plain `async fn` calls rather than via a registered
    /// callback, so the status this function returns on resolution plays the
    /// role the source's `confirm_callback(handle, status)` played.
    pub async fn mcps_send_data(&mut self, data: &[u8], dest: u16, secure: bool) -> (u8, DataStatus) {
        if !matches!(self.pib.mode, MacMode::Coordinating | MacMode::Associated) {
            return (0, DataStatus::NotAllowed);
        }

        let handle = self.pib.next_sqn();
        // A secure frame additionally needs room for the auxiliary security
        // header between the MHR and the (now-ciphertext) payload.
        let max_payload_len = if secure {
            MAX_DATA_PAYLOAD_LEN - AUX_SECURITY_HEADER_LEN
        } else {
            MAX_DATA_PAYLOAD_LEN
        };
        let payload_len = data.len().min(max_payload_len);
        let payload = &data[..payload_len];

        let Ok(frame_repr) = FrameBuilder::new_data(payload)
            .set_sequence_number(handle)
            .set_dst_pan_id(self.pib.pan_id)
            .set_dst_address(Address::Short(dest.to_le_bytes()))
            .set_src_address(Address::Short(self.pib.short_address.to_le_bytes()))
            .finalize()
        else {
            return (handle, DataStatus::NotAllowed);
        };

        let header_len = frame_repr.buffer_len() - payload_len;
        let mut tx = FrameBuffer::default();
        frame_repr.emit(&mut DataFrame::new_unchecked(&mut tx.buffer));
        DataFrame::new_unchecked(&mut tx.buffer)
            .frame_control_mut()
            .set_ack_request(true);

        if secure {
            // `encrypt` writes the auxiliary security header at `header_len`
            // and expects the plaintext already shifted past it.
            tx.buffer
                .copy_within(header_len..header_len + payload_len, header_len + AUX_SECURITY_HEADER_LEN);
            DataFrame::new_unchecked(&mut tx.buffer)
                .frame_control_mut()
                .set_security_enabled(true);
            let own_extended = self.pib.extended_address.unwrap_or([0; 8]);
            if self
                .supplicant
                .encrypt(
                    &mut tx.buffer,
                    header_len,
                    payload_len,
                    own_extended,
                    &mut self.pib.outbound_frame_counter,
                )
                .is_err()
            {
                return (handle, DataStatus::UnsupportedSecurity);
            }

            if self.pib.mode == MacMode::Coordinating {
                let Some(device) = self.devices.get_by_short_mut(dest) else {
                    return (handle, DataStatus::NotAllowed);
                };
                let Some(coord) = device.coord.as_mut() else {
                    return (handle, DataStatus::NotAllowed);
                };
                coord.pending_data = Some(tx);
                return (handle, DataStatus::Success);
            }
        }

        match self.csma_ca_transmit(tx).await {
            Err(_) => (handle, DataStatus::ChannelAccessFailure),
            Ok(()) => {
                let acked = self.wait_for_ack(handle).await;
                (handle, if acked { DataStatus::Success } else { DataStatus::NoAck })
            }
        }
    }
}
