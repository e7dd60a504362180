//! Spectral channel snapshot types.
//!
//! The device streams all measurement channels as 18 consecutive
//! little-endian 16-bit words starting at `DATA0`. With 18-channel auto-SMUX
//! the device fills them over three read-out cycles; each cycle contributes
//! four spectral elements plus a clear (VIS) and a flicker slot.

/// Number of 16-bit data channels delivered per acquisition.
pub const CHANNEL_COUNT: usize = 18;

/// Number of raw bytes covering all data channels.
pub const SNAPSHOT_BYTES: usize = CHANNEL_COUNT * 2;

/// Named data slots for the fixed 18-channel auto-SMUX read-out order.
///
/// The discriminant is the slot index within the snapshot. Slot meaning is a
/// device-side routing convention; in 6- or 12-channel modes only the leading
/// cycles carry fresh data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SpectralChannel {
    /// FZ, 450 nm (blue), cycle 1.
    Fz = 0,
    /// FY, 555 nm (green), cycle 1.
    Fy = 1,
    /// FXL, 600 nm (orange), cycle 1.
    Fxl = 2,
    /// NIR, 855 nm, cycle 1.
    Nir = 3,
    /// Clear/VIS slot of cycle 1.
    Clear1 = 4,
    /// Flicker slot of cycle 1.
    Flicker1 = 5,
    /// F2, 425 nm (indigo), cycle 2.
    F2 = 6,
    /// F3, 475 nm (blue), cycle 2.
    F3 = 7,
    /// F4, 515 nm (cyan), cycle 2.
    F4 = 8,
    /// F6, 640 nm (red), cycle 2.
    F6 = 9,
    /// Clear/VIS slot of cycle 2.
    Clear0 = 10,
    /// Flicker slot of cycle 2.
    Flicker0 = 11,
    /// F1, 405 nm (violet), cycle 3.
    F1 = 12,
    /// F7, 690 nm (dark red), cycle 3.
    F7 = 13,
    /// F8, 745 nm (dark red), cycle 3.
    F8 = 14,
    /// F5, 550 nm (green), cycle 3.
    F5 = 15,
    /// Clear/VIS slot of cycle 3.
    Clear = 16,
    /// Flicker slot of cycle 3.
    Flicker = 17,
}

impl SpectralChannel {
    /// Returns the snapshot slot index of this channel.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// In-memory snapshot of the 18 spectral data channels.
///
/// Overwritten in full by each successful acquisition; a failed acquisition
/// leaves the previous values untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSnapshot {
    counts: [u16; CHANNEL_COUNT],
}

impl ChannelSnapshot {
    /// Creates an empty snapshot with all channels at zero.
    pub const fn new() -> Self {
        Self {
            counts: [0; CHANNEL_COUNT],
        }
    }

    /// Replaces every channel with values decoded from a raw burst read.
    pub(crate) fn refresh(&mut self, raw: &[u8; SNAPSHOT_BYTES]) {
        for (slot, bytes) in self.counts.iter_mut().zip(raw.chunks_exact(2)) {
            *slot = u16::from_le_bytes([bytes[0], bytes[1]]);
        }
    }

    /// Returns the raw count of the channel at `index`.
    ///
    /// Out-of-range indices return 0 rather than an error. Use
    /// [`As7343::try_channel`](crate::As7343::try_channel) for a checked
    /// variant.
    pub fn channel(&self, index: usize) -> u16 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Returns the raw count of a named channel.
    pub fn get(&self, channel: SpectralChannel) -> u16 {
        self.counts[channel.index()]
    }

    /// Returns all channel counts in snapshot order.
    pub fn counts(&self) -> &[u16; CHANNEL_COUNT] {
        &self.counts
    }

    /// Violet count (F1, 405 nm).
    pub fn violet(&self) -> u16 {
        self.get(SpectralChannel::F1)
    }

    /// Blue count (FZ, 450 nm).
    pub fn blue(&self) -> u16 {
        self.get(SpectralChannel::Fz)
    }

    /// Green count (FY, 555 nm).
    pub fn green(&self) -> u16 {
        self.get(SpectralChannel::Fy)
    }

    /// Orange count (FXL, 600 nm).
    pub fn orange(&self) -> u16 {
        self.get(SpectralChannel::Fxl)
    }

    /// Red count (F6, 640 nm).
    pub fn red(&self) -> u16 {
        self.get(SpectralChannel::F6)
    }

    /// Dark red count (F8, 745 nm).
    pub fn dark_red(&self) -> u16 {
        self.get(SpectralChannel::F8)
    }

    /// Near-infrared count (855 nm).
    pub fn nir(&self) -> u16 {
        self.get(SpectralChannel::Nir)
    }

    /// Clear (VIS) count of the last read-out cycle.
    pub fn clear(&self) -> u16 {
        self.get(SpectralChannel::Clear)
    }
}

impl Default for ChannelSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_raw() -> [u8; SNAPSHOT_BYTES] {
        let mut raw = [0u8; SNAPSHOT_BYTES];
        for (i, chunk) in raw.chunks_exact_mut(2).enumerate() {
            let value = 0x0100u16 * (i as u16) + 0x42;
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        raw
    }

    /// Raw bytes decode little-endian into their channel slots.
    #[test]
    fn refresh_decodes_little_endian_words() {
        let mut snapshot = ChannelSnapshot::new();
        snapshot.refresh(&sample_raw());

        for index in 0..CHANNEL_COUNT {
            assert_eq!(snapshot.channel(index), 0x0100 * (index as u16) + 0x42);
        }
    }

    /// Out-of-range channel indices yield zero, never an error.
    #[test]
    fn out_of_range_channel_reads_zero() {
        let mut snapshot = ChannelSnapshot::new();
        snapshot.refresh(&sample_raw());

        assert_eq!(snapshot.channel(CHANNEL_COUNT), 0);
        assert_eq!(snapshot.channel(usize::MAX), 0);
    }

    /// Named accessors resolve to the documented slot indices.
    #[test]
    fn named_accessors_use_fixed_slots() {
        let mut snapshot = ChannelSnapshot::new();
        snapshot.refresh(&sample_raw());

        assert_eq!(snapshot.blue(), snapshot.channel(0));
        assert_eq!(snapshot.green(), snapshot.channel(1));
        assert_eq!(snapshot.orange(), snapshot.channel(2));
        assert_eq!(snapshot.nir(), snapshot.channel(3));
        assert_eq!(snapshot.red(), snapshot.channel(9));
        assert_eq!(snapshot.violet(), snapshot.channel(12));
        assert_eq!(snapshot.dark_red(), snapshot.channel(14));
        assert_eq!(snapshot.clear(), snapshot.channel(16));
    }
}
