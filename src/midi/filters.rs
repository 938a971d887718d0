use std::ops::{BitOr, BitOrAssign};

/// Selects which MIDI channels an input device admits.
///
/// Channels are numbered 0 to 15. OR single-channel masks together to
/// admit more than one; the default empty mask leaves the device
/// untouched, which admits all channels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMask(i32);

impl ChannelMask {
    pub fn channel(ch: u8) -> Self {
        Self(1 << ch)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ChannelMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ChannelMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<ChannelMask> for i32 {
    fn from(mask: ChannelMask) -> Self {
        mask.0
    }
}

/// Bitmask of message kinds an input device discards before they reach
/// the stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Filter(i32);

impl Filter {
    /// Active sensing messages (0xFE).
    pub const ACTIVE: Self = Self(1 << 0x0E);
    /// System exclusive messages (0xF0).
    pub const SYSEX: Self = Self(1 << 0x00);
    /// MIDI clock messages (0xF8).
    pub const CLOCK: Self = Self(1 << 0x08);
    /// Play messages: start (0xFA), stop (0xFC), continue (0xFB).
    pub const PLAY: Self = Self((1 << 0x0A) | (1 << 0x0C) | (1 << 0x0B));
    /// Tick messages.
    pub const TICK: Self = Self(1 << 0x09);
    /// Undefined FD messages.
    pub const FD: Self = Self(1 << 0x0D);
    /// Undefined real-time messages.
    pub const UNDEFINED: Self = Self::FD;
    /// Reset messages.
    pub const RESET: Self = Self(1 << 0x0F);
    /// All real-time messages.
    pub const REALTIME: Self = Self(Self::ACTIVE.0
        | Self::SYSEX.0
        | Self::CLOCK.0
        | Self::PLAY.0
        | Self::UNDEFINED.0
        | Self::RESET.0
        | Self::TICK.0);
    /// Note-on and note-off (0x90-0x9F and 0x80-0x8F).
    pub const NOTE: Self = Self((1 << 0x19) | (1 << 0x18));
    /// Channel aftertouch (0xD0-0xDF).
    pub const CHANNEL_AFTERTOUCH: Self = Self(1 << 0x1D);
    /// Per-note aftertouch (0xA0-0xAF).
    pub const POLY_AFTERTOUCH: Self = Self(1 << 0x1A);
    /// Both channel and poly aftertouch.
    pub const AFTERTOUCH: Self = Self(Self::CHANNEL_AFTERTOUCH.0 | Self::POLY_AFTERTOUCH.0);
    /// Program changes (0xC0-0xCF).
    pub const PROGRAM: Self = Self(1 << 0x1C);
    /// Control changes (0xB0-0xBF).
    pub const CONTROL: Self = Self(1 << 0x1B);
    /// Pitch bends (0xE0-0xEF).
    pub const PITCHBEND: Self = Self(1 << 0x1E);
    /// MIDI time code (0xF1).
    pub const MTC: Self = Self(1 << 0x01);
    /// Song position (0xF2).
    pub const SONG_POSITION: Self = Self(1 << 0x02);
    /// Song select (0xF3).
    pub const SONG_SELECT: Self = Self(1 << 0x03);
    /// Tuning request (0xF6).
    pub const TUNE: Self = Self(1 << 0x06);
    /// All system common messages (mtc, song position, song select, tune request).
    pub const SYSTEM_COMMON: Self =
        Self(Self::MTC.0 | Self::SONG_POSITION.0 | Self::SONG_SELECT.0 | Self::TUNE.0);

    /// ORs a set of filters into one mask.
    pub fn join(filters: &[Filter]) -> Self {
        filters.iter().fold(Self::default(), |joined, &f| joined | f)
    }
}

impl BitOr for Filter {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Filter {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<Filter> for i32 {
    fn from(filter: Filter) -> Self {
        filter.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn channel_masks_compose_with_or() {
        let mask = ChannelMask::channel(0) | ChannelMask::channel(9) | ChannelMask::channel(15);
        assert_eq!(i32::from(mask), (1 << 0) | (1 << 9) | (1 << 15));
        assert!(!mask.is_empty());
        assert!(ChannelMask::default().is_empty());
    }

    #[test]
    fn join_folds_filters_into_one_mask() {
        let joined = Filter::join(&[Filter::CLOCK, Filter::ACTIVE, Filter::TICK]);
        assert_eq!(joined, Filter::CLOCK | Filter::ACTIVE | Filter::TICK);
        assert_eq!(Filter::join(&[]), Filter::default());
    }

    #[test]
    fn realtime_covers_its_component_filters() {
        for component in [
            Filter::ACTIVE,
            Filter::SYSEX,
            Filter::CLOCK,
            Filter::PLAY,
            Filter::UNDEFINED,
            Filter::RESET,
            Filter::TICK,
        ] {
            assert_eq!(Filter::REALTIME | component, Filter::REALTIME);
        }
    }
}
