/// A short MIDI message packed into one 32-bit word: status in the low
/// byte, data1 and data2 in the bytes above it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Message(i32);

impl Message {
    /// Encodes a short MIDI message. Pass zero for data bytes the message
    /// does not carry.
    pub fn new(status: u8, data1: u8, data2: u8) -> Self {
        Self(((data2 as i32) << 16) | ((data1 as i32) << 8) | status as i32)
    }

    pub fn status(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub fn data1(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub fn data2(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }
}

impl From<i32> for Message {
    fn from(word: i32) -> Self {
        Self(word)
    }
}

impl From<Message> for i32 {
    fn from(message: Message) -> Self {
        message.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::Rng;

    #[test]
    fn packs_status_and_data_bytes_into_one_word() {
        assert_eq!(i32::from(Message::new(0x90, 0x3C, 0x7F)), 0x7F_3C90);
    }

    #[test]
    fn round_trips_every_status_byte_with_edge_data_bytes() {
        for status in 0..=u8::MAX {
            for data in [0x00, 0x01, 0x7F, 0x80, 0xFF] {
                let message = Message::new(status, data, !data);
                assert_eq!(message.status(), status);
                assert_eq!(message.data1(), data);
                assert_eq!(message.data2(), !data);
            }
        }
    }

    #[test]
    fn round_trips_random_byte_triples() {
        let mut rng = rand::thread_rng();

        for _ in 0..10_000 {
            let (status, data1, data2) = rng.gen::<(u8, u8, u8)>();
            let message = Message::new(status, data1, data2);
            assert_eq!(
                (message.status(), message.data1(), message.data2()),
                (status, data1, data2)
            );
        }
    }

    #[test]
    fn round_trips_through_the_raw_word() {
        let message = Message::new(0xF8, 0x00, 0x00);
        assert_eq!(Message::from(i32::from(message)), message);
    }
}
