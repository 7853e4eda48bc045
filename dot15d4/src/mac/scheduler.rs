//! Packet scheduler: superframe slot tracking and slotted CSMA-CA (§4.4).
//!
//! Grounded on the orphaned `mac::csma` backoff routine this student found in
//! the teacher tree (since removed: it targeted a `phy::driver` abstraction
//! that no longer exists) and on `mac::acknowledgment`'s existing
//! `phy_send`/`wait_for_ack` pattern, which this module reuses rather than
//! reimplementing channel access from scratch.

use embedded_hal_async::delay::DelayNs;
use rand_core::RngCore;

use crate::mac::constants::{MAC_MAX_BE, MAC_MAX_CSMA_BACKOFFS, MAC_MIN_BE, MAC_UNIT_BACKOFF_DURATION};
use crate::mac::pib::MacMode;
use crate::mac::MacService;
use crate::phy::constants::{BASE_SLOT_DURATION, SYMBOL_RATE_INV_US};
use crate::phy::radio::{Radio, RadioFrameMut};
use crate::phy::FrameBuffer;
use crate::time::Duration;
use crate::upper::UpperLayer;

/// Number of slots making up one superframe (beacon slot, CAP, inactive tail).
pub const SUPERFRAME_SLOTS: u32 = 16;
/// Wall-clock duration of a single superframe slot at superframe order 0
/// (spec.md §4.4's slot timing, resolved to microseconds via the PHY's
/// symbol rate).
pub const SLOT_DURATION: Duration =
    Duration::from_us((BASE_SLOT_DURATION * SYMBOL_RATE_INV_US) as i64);
/// Last CAP slot in which CSMA-CA contention is permitted (spec.md §4.4);
/// slot 15 is left inactive, mirroring the inactive portion a GTS-capable
/// superframe would otherwise use (GTS itself is out of scope, per
/// Non-goals).
pub const CAP_END_SLOT: u32 = 14;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    /// The CSMA-CA algorithm exhausted its backoff budget without a clear
    /// channel.
    ChannelAccessFailure,
}

/// What a given superframe slot is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAction {
    /// Slot 0: the coordinator transmits its beacon, unslotted/uncontended
    /// (Open Question (b), resolved in DESIGN.md).
    Beacon,
    /// Slots 1..=[`CAP_END_SLOT`]: contention access period.
    Cap,
    /// Remaining slots: inactive period.
    Inactive,
}

/// Per-instance scheduler state: position within the current superframe.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scheduler {
    slot_count: u32,
}

impl Scheduler {
    /// Advances to the next slot, wrapping at the end of the superframe.
    pub fn tick(&mut self) -> u32 {
        self.slot_count = (self.slot_count + 1) % SUPERFRAME_SLOTS;
        self.slot_count
    }

    pub fn slot_count(&self) -> u32 {
        self.slot_count
    }

    /// Classifies the current slot.
    pub fn action(&self) -> SlotAction {
        match self.slot_count {
            0 => SlotAction::Beacon,
            n if n <= CAP_END_SLOT => SlotAction::Cap,
            _ => SlotAction::Inactive,
        }
    }
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
    /// Submits `tx` to the PHY sublayer using the slotted CSMA-CA algorithm:
    /// up to `MAC_MAX_CSMA_BACKOFFS` attempts, each preceded (after the
    /// first) by a random backoff of `(random >> (8 - BE)) * 20` symbols, BE
    /// starting at `MAC_MIN_BE` and incrementing (capped at `MAC_MAX_BE`) on
    /// every failed CCA. Returns once the frame has actually left the radio;
    /// the caller is responsible for any subsequent ACK wait.
    ///
    /// Note: `Radio::transmit` fuses CCA and transmission into a single
    /// operation (there is no standalone CCA-only primitive in this crate's
    /// radio trait), so the two-CCA contention window the standard describes
    /// collapses to a single combined CCA/transmit attempt per backoff; see
    /// DESIGN.md.
    pub(crate) async fn csma_ca_transmit(&self, tx: FrameBuffer) -> Result<(), SchedulerError> {
        let mut backoff_exponent = MAC_MIN_BE;

        for attempt in 1..=MAC_MAX_CSMA_BACKOFFS {
            let sent = self.phy_send(tx.clone()).await;
            if sent {
                return Ok(());
            }

            if attempt == MAC_MAX_CSMA_BACKOFFS {
                warn!("Channel access failure after {} backoffs", attempt);
                return Err(SchedulerError::ChannelAccessFailure);
            }

            backoff_exponent = core::cmp::min(backoff_exponent + 1, MAC_MAX_BE);
            let random_byte = (self.rng.lock().await.next_u32() & 0xFF) as u8;
            let periods = (random_byte >> (8 - backoff_exponent)) as usize;
            let mut timer = self.timer.clone();
            timer
                .delay_us((MAC_UNIT_BACKOFF_DURATION * periods).as_us() as u32)
                .await;
        }

        Err(SchedulerError::ChannelAccessFailure)
    }

    /// Advances the superframe slot counter by one slot, returning the
    /// resulting slot's action. Called by the MAC task's timer tick.
    pub(crate) fn scheduler_tick(&mut self) -> SlotAction {
        self.scheduler.tick();
        self.scheduler.action()
    }

    /// Waits out one slot period. Split from the scheduler mutation/beacon
    /// transmission below so it can run concurrently with `&self` methods
    /// inside `select` without conflicting with their borrow of `self`.
    pub(crate) async fn slot_wait(&self) {
        let mut timer = self.timer.clone();
        timer.delay_us(SLOT_DURATION.as_us() as u32).await;
    }

    /// Advances the superframe slot counter and transmits the periodic
    /// beacon on slot 0 while coordinating (spec.md §4.5/§4.4, Open Question
    /// (b): beacon transmission is unslotted and timed from this tick rather
    /// than itself contending for the channel). Called after [`slot_wait`]
    /// resolves, once the run loop again has exclusive access to `self`.
    pub(crate) async fn on_slot_tick(&mut self) {
        if self.scheduler_tick() == SlotAction::Beacon && self.pib.mode == MacMode::Coordinating {
            self.request_beacon().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_classification() {
        let mut sched = Scheduler::default();
        assert_eq!(sched.action(), SlotAction::Beacon);
        sched.tick();
        assert_eq!(sched.action(), SlotAction::Cap);
        for _ in 0..(CAP_END_SLOT - 1) {
            sched.tick();
        }
        assert_eq!(sched.action(), SlotAction::Cap);
        sched.tick();
        assert_eq!(sched.action(), SlotAction::Inactive);
    }

    #[test]
    fn wraps_around_superframe() {
        let mut sched = Scheduler::default();
        for _ in 0..SUPERFRAME_SLOTS {
            sched.tick();
        }
        assert_eq!(sched.slot_count(), 0);
        assert_eq!(sched.action(), SlotAction::Beacon);
    }
}
