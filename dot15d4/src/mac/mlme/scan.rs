use core::ops::RangeInclusive;

use embedded_hal_async::delay::DelayNs;
use rand_core::RngCore;

use crate::mac::MacService;
use crate::phy::radio::{Radio, RadioFrame, RadioFrameMut};
use crate::sync::{select, Either};
use crate::upper::UpperLayer;
use dot15d4_frame::{Frame, FrameType};

/// Maximum number of distinct PAN descriptors a single scan accumulates
/// (spec.md §4.6 leaves the bound to the implementation; `heapless` forces
/// one to be picked up front).
pub const MAX_SCAN_RESULTS: usize = 8;

pub enum ScanType {
    Active,
    Passive,
}

pub enum ScanChannels {
    All,
    Single(u8),
}

/// A PAN discovered during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanDescriptor {
    pub coord_pan_id: u16,
    pub coord_short_address: u16,
    pub channel: u8,
}

#[allow(dead_code)]
pub struct ScanConfirm {
    pub scan_type: ScanType,
    pub channel_page: u8,
    pub results: heapless::Vec<PanDescriptor, MAX_SCAN_RESULTS>,
}

pub enum ScanError {
    NoBeacon,
    InvalidParameter,
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
    /// Initiates a channel scan over a given set of channels.
    ///
    /// # Note
    /// The PHY task in this crate owns the radio's channel exclusively
    /// (`phy::Pib::current_channel`), and there is no control channel from
    /// the MAC task to retune it mid-scan. This scan therefore walks the
    /// requested channel list for bookkeeping purposes but only actually
    /// listens on whatever channel the PHY task is currently tuned to; see
    /// DESIGN.md for the limitation and the cross-task channel-control work
    /// that would lift it.
    pub(crate) async fn mlme_scan_request(
        &mut self,
        scan_type: ScanType,
        scan_channels: ScanChannels,
        scan_duration: u8,
        channel_page: u8,
    ) -> Result<ScanConfirm, ScanError> {
        if scan_duration > 14 {
            return Err(ScanError::InvalidParameter);
        }

        self.pib.mode = crate::mac::pib::MacMode::Scanning;
        let mut results: heapless::Vec<PanDescriptor, MAX_SCAN_RESULTS> = heapless::Vec::new();

        for channel in scan_channels {
            if let ScanType::Active = scan_type {
                let mut tx = crate::phy::FrameBuffer::default();
                let sqn = self.pib.next_sqn();
                crate::mac::command::build_beacon_request(&mut tx.buffer, sqn);
                let _ = self.csma_ca_transmit(tx).await;
            }

            let window = symbols_to_duration(scan_duration);
            let mut timer = self.timer.clone();
            select::select(
                async {
                    loop {
                        let mut rx = self.phy_receive().await;
                        let frame = R::RadioFrame::new_checked(&mut rx.buffer[..]).unwrap();
                        let Ok(frame) = Frame::new(frame.data()) else {
                            continue;
                        };
                        if frame.frame_control().frame_type() != FrameType::Beacon {
                            continue;
                        }
                        let Some(addressing) = frame.addressing() else {
                            continue;
                        };
                        let Some(src_pan_id) = addressing.src_pan_id() else {
                            continue;
                        };
                        let Some(dot15d4_frame::Address::Short(src)) = addressing.src_address()
                        else {
                            continue;
                        };
                        let descriptor = PanDescriptor {
                            coord_pan_id: src_pan_id,
                            coord_short_address: u16::from_le_bytes(src),
                            channel,
                        };
                        if !results.iter().any(|d| *d == descriptor) {
                            let _ = results.push(descriptor);
                        }
                        if results.is_full() {
                            break;
                        }
                    }
                },
                async {
                    timer.delay_us(window.as_us() as u32).await;
                },
            )
            .await;
        }

        self.pib.mode = crate::mac::pib::MacMode::Idle;
        if results.is_empty() {
            return Err(ScanError::NoBeacon);
        }

        Ok(ScanConfirm {
            scan_type,
            channel_page,
            results,
        })
    }
}

/// `(1 << duration) + 1` superframe slots, converted to a duration using the
/// base superframe duration (spec.md §4.6).
fn symbols_to_duration(duration: u8) -> crate::time::Duration {
    use crate::mac::constants::BASE_SUPERFRAME_DURATION;
    use crate::phy::constants::SYMBOL_RATE_INV_US;
    use crate::time::Duration;
    let slots = (1u32 << duration) + 1;
    let symbols = slots * BASE_SUPERFRAME_DURATION;
    Duration::from_us((symbols * SYMBOL_RATE_INV_US) as i64)
}

// Implement IntoIterator for Channels so you can write: for x in scan_channels { ... }
impl IntoIterator for ScanChannels {
    type Item = u8;
    type IntoIter = RangeInclusive<u8>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            ScanChannels::All => 11_u8..=26,
            ScanChannels::Single(ch) => ch..=ch,
        }
    }
}
