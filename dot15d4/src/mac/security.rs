//! Security supplicant: CCM* authenticated encryption/decryption (§4.3).
//!
//! Grounded on the CCM* parameters and nonce construction spec.md §3 (I5) and
//! §4.3 spell out exactly. No AES/CCM crate exists in the example pack this
//! student examined, so this module reaches for RustCrypto's `aes` + `ccm`
//! crates, the `no_std`-compatible, ecosystem-standard choice for CCM* (see
//! DESIGN.md).

use aes::Aes128;
use ccm::aead::{AeadInPlace, KeyInit};
use ccm::consts::{U13, U4};
use ccm::Ccm;

use crate::mac::device::Key;

/// CCM* with L=2 (13-octet nonce) and M=4 (4-octet MIC), as mandated by
/// IEEE 802.15.4-2011 and spec.md §4.3/§GLOSSARY.
type Aes128Ccm = Ccm<Aes128, U4, U13>;

/// Security level, security control field bits 0..2. Only `EncMic32` (value
/// 5) is supported; all others fail to parse per spec.md §4.1.
pub const SECURITY_LEVEL_ENC_MIC_32: u8 = 5;
/// Key-id-mode, security control field bits 3..4. Only `Implicit` (value 0)
/// is supported.
pub const KEY_ID_MODE_IMPLICIT: u8 = 0;

/// Octets of auxiliary security header this module writes/reads: one
/// security-control octet followed by a 4-octet frame counter.
pub const AUX_SECURITY_HEADER_LEN: usize = 5;
/// Length of the CCM* authentication tag (MIC).
pub const MIC_LEN: usize = 4;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityError {
    /// The supplicant is already busy encrypting or decrypting a frame.
    Busy,
    /// No key is available to perform the operation.
    NoKey,
    /// The security control field uses an unsupported level or key-id-mode.
    UnsupportedSecurity,
    /// CCM* authentication/decryption failed (tag mismatch or hardware fault).
    AesError,
    /// The destination buffer does not have enough room for ciphertext + MIC.
    BufferTooSmall,
}

/// Single-slot state machine: {Idle, Encrypting, Decrypting}. Owned
/// exclusively by the MAC task; per spec.md §9 the AES-done transition is
/// modeled as the immediate resolution of the encrypt/decrypt call (see
/// SPEC_FULL.md §6 for the rationale), so this crate never observes an
/// interrupt context re-entering the supplicant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupplicantState {
    Idle,
    Encrypting,
    Decrypting,
}

/// Key derivation from a pre-shared secret is explicitly a placeholder per
/// spec.md §4.3: copy up to 16 octets, zero-padded. A real deployment must
/// replace this with a proper KDF.
fn derive_key(psk: &[u8]) -> [u8; 16] {
    let mut bytes = [0u8; 16];
    let n = psk.len().min(16);
    bytes[..n].copy_from_slice(&psk[..n]);
    bytes
}

fn reverse(addr: [u8; 8]) -> [u8; 8] {
    let mut out = addr;
    out.reverse();
    out
}

/// Builds the 13-octet CCM* nonce per I5:
/// `reverse(extended_address) ‖ frame_counter(BE) ‖ security_level`.
fn build_nonce(extended_address: [u8; 8], frame_counter: u32, security_level: u8) -> [u8; 13] {
    let mut nonce = [0u8; 13];
    nonce[..8].copy_from_slice(&reverse(extended_address));
    nonce[8..12].copy_from_slice(&frame_counter.to_be_bytes());
    nonce[12] = security_level;
    nonce
}

/// The security supplicant: per-MAC-instance own key plus the busy/idle
/// state machine.
pub struct Supplicant {
    state: SupplicantState,
    own_key: Option<Key>,
}

impl Default for Supplicant {
    fn default() -> Self {
        Self::new()
    }
}

impl Supplicant {
    pub fn new() -> Self {
        Self {
            state: SupplicantState::Idle,
            own_key: None,
        }
    }

    pub fn state(&self) -> SupplicantState {
        self.state
    }

    /// `security_add_own_key`: provisions the local device's own key, used
    /// when encrypting outbound frames.
    pub fn security_add_own_key(&mut self, psk: &[u8]) {
        self.own_key = Some(Key {
            index: 0,
            bytes: derive_key(psk),
        });
    }

    /// `security_add_device_key`: provisions a peer device's key (stored on
    /// its device record by the caller, not here — this helper only derives
    /// the key bytes from the pre-shared secret).
    pub fn derive_device_key(psk: &[u8]) -> [u8; 16] {
        derive_key(psk)
    }

    /// Encrypts `buf[header_len..header_len+payload_len]` in place,
    /// appending the security control octet, frame counter, ciphertext and
    /// 4-octet MIC starting at `header_len`. Returns the total length of the
    /// secured frame (header + aux security header + ciphertext + MIC).
    ///
    /// `buf` must have room up to `header_len + AUX_SECURITY_HEADER_LEN +
    /// payload_len + MIC_LEN`; the caller is responsible for shifting the
    /// plaintext payload to leave room for the auxiliary security header
    /// before calling this.
    pub fn encrypt(
        &mut self,
        buf: &mut [u8],
        header_len: usize,
        payload_len: usize,
        own_extended_address: [u8; 8],
        frame_counter: &mut u32,
    ) -> Result<usize, SecurityError> {
        if self.state != SupplicantState::Idle {
            return Err(SecurityError::Busy);
        }
        let key = self.own_key.ok_or(SecurityError::NoKey)?;
        self.state = SupplicantState::Encrypting;

        let total_len = header_len + AUX_SECURITY_HEADER_LEN + payload_len + MIC_LEN;
        if buf.len() < total_len {
            self.state = SupplicantState::Idle;
            return Err(SecurityError::BufferTooSmall);
        }

        let counter = *frame_counter;
        buf[header_len] =
            SECURITY_LEVEL_ENC_MIC_32 | (KEY_ID_MODE_IMPLICIT << 3);
        buf[header_len + 1..header_len + 5].copy_from_slice(&counter.to_be_bytes());

        let nonce = build_nonce(own_extended_address, counter, SECURITY_LEVEL_ENC_MIC_32);
        // Frame counter is incremented exactly once per secured transmit,
        // after nonce construction (spec.md §4.3).
        *frame_counter = frame_counter.wrapping_add(1);

        let aad_end = header_len + AUX_SECURITY_HEADER_LEN;
        let payload_start = aad_end;
        let payload_end = payload_start + payload_len;

        let cipher = Aes128Ccm::new((&key.bytes).into());
        let (aad, rest) = buf.split_at_mut(aad_end);
        let payload = &mut rest[..payload_len];
        let tag = cipher
            .encrypt_in_place_detached(&nonce.into(), aad, payload)
            .map_err(|_| SecurityError::AesError)?;
        buf[payload_end..payload_end + MIC_LEN].copy_from_slice(&tag);

        self.state = SupplicantState::Idle;
        Ok(total_len)
    }

    /// Decrypts `buf[header_len+AUX_SECURITY_HEADER_LEN..]` (ciphertext of
    /// `ciphertext_len` octets followed by a 4-octet MIC) in place, using
    /// `peer_extended_address` and `peer_key` (index 0 of the peer device,
    /// per spec.md §4.3). On success the plaintext replaces the ciphertext;
    /// the trailing MIC is left in place but unused.
    pub fn decrypt(
        &mut self,
        buf: &mut [u8],
        header_len: usize,
        ciphertext_len: usize,
        peer_extended_address: [u8; 8],
        peer_key: Key,
    ) -> Result<usize, SecurityError> {
        if self.state != SupplicantState::Idle {
            return Err(SecurityError::Busy);
        }
        self.state = SupplicantState::Decrypting;

        let security_control = buf[header_len];
        let level = security_control & 0b111;
        let key_id_mode = (security_control >> 3) & 0b11;
        if level != SECURITY_LEVEL_ENC_MIC_32 || key_id_mode != KEY_ID_MODE_IMPLICIT {
            self.state = SupplicantState::Idle;
            return Err(SecurityError::UnsupportedSecurity);
        }

        let mut counter_bytes = [0u8; 4];
        counter_bytes.copy_from_slice(&buf[header_len + 1..header_len + 5]);
        let frame_counter = u32::from_be_bytes(counter_bytes);

        let nonce = build_nonce(peer_extended_address, frame_counter, level);
        let aad_end = header_len + AUX_SECURITY_HEADER_LEN;
        let payload_end = aad_end + ciphertext_len;
        if buf.len() < payload_end + MIC_LEN {
            self.state = SupplicantState::Idle;
            return Err(SecurityError::BufferTooSmall);
        }
        let mut tag_bytes = [0u8; MIC_LEN];
        tag_bytes.copy_from_slice(&buf[payload_end..payload_end + MIC_LEN]);

        let cipher = Aes128Ccm::new((&peer_key.bytes).into());
        let (aad, rest) = buf.split_at_mut(aad_end);
        let ciphertext = &mut rest[..ciphertext_len];
        let result = cipher.decrypt_in_place_detached(
            &nonce.into(),
            aad,
            ciphertext,
            (&tag_bytes).into(),
        );

        self.state = SupplicantState::Idle;
        result.map_err(|_| SecurityError::AesError)?;
        Ok(ciphertext_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let mut supplicant = Supplicant::new();
        supplicant.security_add_own_key(b"cheddar");
        let own_key = Key {
            index: 0,
            bytes: derive_key(b"cheddar"),
        };

        let header: [u8; 9] = [0x41, 0x88, 0x00, 0xdc, 0x01, 0x00, 0x02, 0x00, 0xdc];
        let mut buf = [0u8; 64];
        buf[..header.len()].copy_from_slice(&header);
        let payload = [0xAA, 0x01, 0x00, 0x00];
        buf[header.len() + AUX_SECURITY_HEADER_LEN..header.len() + AUX_SECURITY_HEADER_LEN + payload.len()]
            .copy_from_slice(&payload);

        let mut counter = 0u32;
        let ext = [1, 2, 3, 4, 5, 6, 7, 8];
        let total = supplicant
            .encrypt(&mut buf, header.len(), payload.len(), ext, &mut counter)
            .unwrap();
        assert_eq!(counter, 1);
        assert_eq!(total, header.len() + AUX_SECURITY_HEADER_LEN + payload.len() + MIC_LEN);

        let n = supplicant
            .decrypt(&mut buf, header.len(), payload.len(), ext, own_key)
            .unwrap();
        assert_eq!(n, payload.len());
        let start = header.len() + AUX_SECURITY_HEADER_LEN;
        assert_eq!(&buf[start..start + payload.len()], &payload);
    }

    #[test]
    fn corrupted_tag_fails() {
        let mut supplicant = Supplicant::new();
        supplicant.security_add_own_key(b"cheddar");
        let own_key = Key {
            index: 0,
            bytes: derive_key(b"cheddar"),
        };

        let header = [0u8; 9];
        let mut buf = [0u8; 64];
        let payload = [1, 2, 3, 4];
        buf[header.len() + AUX_SECURITY_HEADER_LEN..header.len() + AUX_SECURITY_HEADER_LEN + payload.len()]
            .copy_from_slice(&payload);
        let mut counter = 0u32;
        let ext = [0; 8];
        let total = supplicant
            .encrypt(&mut buf, header.len(), payload.len(), ext, &mut counter)
            .unwrap();
        buf[total - 1] ^= 0xFF; // corrupt MIC

        let err = supplicant
            .decrypt(&mut buf, header.len(), payload.len(), ext, own_key)
            .unwrap_err();
        assert_eq!(err, SecurityError::AesError);
    }
}
