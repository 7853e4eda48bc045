use crate::phy::radio::{Radio, RadioFrameMut};
use crate::{phy::FrameBuffer, upper::UpperLayer};
use embedded_hal_async::delay::DelayNs;
use rand_core::RngCore;

use crate::mac::command::build_beacon_request;
use super::MacService;

pub struct BeaconRequest {}

pub struct BeaconConfirm {}

pub struct BeaconNotifyIndication {
    /// buffer containing the received frame
    pub buffer: FrameBuffer,
    /// Timestamp of frame reception
    pub timestamp: u32,
}

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
    /// Broadcasts a Beacon-Request command, soliciting an immediate Beacon
    /// from any coordinator listening on the current channel (used during
    /// an active scan, spec.md §4.6).
    pub(crate) async fn mlme_beacon_request(
        &mut self,
        _request: &BeaconRequest,
    ) -> Result<BeaconConfirm, ()> {
        let mut tx = FrameBuffer::default();
        let sqn = self.pib.next_sqn();
        build_beacon_request(&mut tx.buffer, sqn);
        self.csma_ca_transmit(tx).await.map_err(|_| ())?;
        Ok(BeaconConfirm {})
    }

    /// Handles an inbound Beacon frame. Scan results are accumulated by
    /// `mlme_scan_request` directly off the PHY channel; this indication
    /// path only logs reception for beacon-tracking outside of an active
    /// scan (loss-of-sync detection is out of scope, per spec.md Non-goals).
    pub(crate) async fn mlme_beacon_notify_indication(
        &self,
        _indication: &mut BeaconNotifyIndication,
    ) {
        info!("Received Beacon Notification");
    }
}
