//! PAN coordinator startup (§4.5).

use crate::mac::pib::MacMode;
use crate::phy::radio::{Radio, RadioFrameMut};
use crate::upper::UpperLayer;
use embedded_hal_async::delay::DelayNs;
use rand_core::RngCore;

use super::MacService;

pub struct StartRequest {
    pub pan_id: u16,
    pub channel: u8,
    pub beacon_order: u8,
    pub superframe_order: u8,
    pub pan_coordinator: bool,
}

pub struct StartConfirm {}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    InvalidParameter,
    NoShortAddress,
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
    /// Used by PAN coordinator to initiate a new PAN or to begin using a new
    /// configuration. Also used by a device already associated with an
    /// existing PAN to begin using a new configuration.
    pub(crate) async fn mlme_start_request(
        &mut self,
        request: StartRequest,
    ) -> Result<StartConfirm, StartError> {
        if !(11..=26).contains(&request.channel) {
            return Err(StartError::InvalidParameter);
        }
        if request.beacon_order > 15 || request.superframe_order > request.beacon_order {
            return Err(StartError::InvalidParameter);
        }
        if request.pan_id == 0xffff {
            return Err(StartError::InvalidParameter);
        }
        if self.pib.short_address == 0xffff {
            return Err(StartError::NoShortAddress);
        }

        self.pib.pan_id = request.pan_id;
        self.pib.current_channel = request.channel;
        self.pib.beacon_order = request.beacon_order;
        self.pib.superframe_order = request.superframe_order;
        if request.pan_coordinator {
            self.pib.coord_short_address = self.pib.short_address;
            self.pib.associated_pan_coord = true;
        }
        self.pib.mode = MacMode::Coordinating;
        self.scheduler = crate::mac::scheduler::Scheduler::default();

        Ok(StartConfirm {})
    }
}
