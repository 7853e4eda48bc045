//! Association with a coordinator (§4.7).

use embedded_hal_async::delay::DelayNs;
use rand_core::RngCore;

use crate::mac::command::{
    build_association_request, build_data_request, parse_association_response, AssociationStatus,
    CAPABILITY_ALLOCATE_SHORT_ADDRESS,
};
use crate::mac::pib::MacMode;
use crate::mac::MacService;
use crate::phy::radio::{Radio, RadioFrame, RadioFrameMut};
use crate::phy::FrameBuffer;
use crate::sync::{select, Either};
use crate::upper::UpperLayer;
use dot15d4_frame::{FrameControl, FrameType};

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociateStatus {
    Successful,
    PanAtCapacity,
    PanAccessDenied,
    NoData,
}

pub struct AssociateConfirm {
    pub short_address: u16,
    pub status: AssociateStatus,
}

pub enum AssociateError {
    ChannelAccessFailure,
    NoAck,
    NoResponse,
}

impl From<AssociationStatus> for AssociateStatus {
    fn from(value: AssociationStatus) -> Self {
        match value {
            AssociationStatus::Successful => Self::Successful,
            AssociationStatus::PanAtCapacity => Self::PanAtCapacity,
            AssociationStatus::PanAccessDenied => Self::PanAccessDenied,
        }
    }
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
    /// Requests association with the coordinator identified by
    /// `(coord_pan_id, coord_short_address)`, following the
    /// AssocReqSent -> AssocReqAcked -> DataReqSent -> WaitAssocResp chain
    /// (spec.md §4.7).
    pub(crate) async fn mlme_associate_request(
        &mut self,
        coord_pan_id: u16,
        coord_short_address: u16,
        extended_address: [u8; 8],
    ) -> Result<AssociateConfirm, AssociateError> {
        self.pib.mode = MacMode::Associating;

        let mut tx = FrameBuffer::default();
        let sqn = self.pib.next_sqn();
        build_association_request(
            &mut tx.buffer,
            sqn,
            coord_pan_id,
            coord_short_address,
            extended_address,
            CAPABILITY_ALLOCATE_SHORT_ADDRESS,
        );
        self.csma_ca_transmit(tx)
            .await
            .map_err(|_| AssociateError::ChannelAccessFailure)?;
        if !self.wait_for_ack(sqn).await {
            self.pib.mode = MacMode::Idle;
            return Err(AssociateError::NoAck);
        }

        // macResponseWaitTime: poll the coordinator for the association
        // response with a Data-Request once it has had time to process.
        let mut tx = FrameBuffer::default();
        let sqn = self.pib.next_sqn();
        build_data_request(
            &mut tx.buffer,
            sqn,
            coord_pan_id,
            coord_short_address,
            extended_address,
        );
        self.csma_ca_transmit(tx)
            .await
            .map_err(|_| AssociateError::ChannelAccessFailure)?;
        if !self.wait_for_ack(sqn).await {
            self.pib.mode = MacMode::Idle;
            return Err(AssociateError::NoAck);
        }

        let response = self.wait_for_association_response().await;
        match response {
            Some((short_address, status)) => {
                if let AssociateStatus::Successful = status {
                    self.pib.mode = MacMode::Associated;
                    self.pib.short_address = short_address;
                    self.pib.coord_short_address = coord_short_address;
                    self.pib.pan_id = coord_pan_id;
                    self.pib.associated_pan_coord = true;
                } else {
                    self.pib.mode = MacMode::Idle;
                }
                Ok(AssociateConfirm {
                    short_address,
                    status,
                })
            }
            None => {
                self.pib.mode = MacMode::Idle;
                Err(AssociateError::NoResponse)
            }
        }
    }

    async fn wait_for_association_response(&self) -> Option<(u16, AssociateStatus)> {
        let mut timer = self.timer.clone();
        let window = self.pib.response_wait_time;
        match select::select(
            async {
                loop {
                    let mut rx = self.phy_receive().await;
                    let frame = R::RadioFrame::new_checked(&mut rx.buffer[..]).unwrap();
                    let data = frame.data();
                    if data.len() < 2 {
                        continue;
                    }
                    let frame_type = FrameControl::new_unchecked(&data[..2]).frame_type();
                    if frame_type != FrameType::Command {
                        continue;
                    }
                    let Some(info) = parse_association_response(data) else {
                        continue;
                    };
                    break (info.assigned_short_address, info.status.into());
                }
            },
            async {
                timer.delay_us(window as u32 * 20).await;
            },
        )
        .await
        {
            Either::First(result) => Some(result),
            Either::Second(_) => None,
        }
    }
}
