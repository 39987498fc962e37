//! Frame encoding and decoding for the companion link.
//!
//! Frame format:
//! - START (1 byte): 0xA5 synchronization byte
//! - LENGTH (1 byte): payload length (0-250)
//! - TYPE (1 byte): message type identifier
//! - PAYLOAD (0-250 bytes): type-specific data
//! - CRC (1 byte): CRC-8 (poly 0x07, init 0x00) over LENGTH, TYPE and PAYLOAD
//!
//! The bridge relays BLE notifications, which arrive in bursts and can lose
//! or reorder bytes at the UART boundary. A CRC catches transposed and
//! doubled bytes that a plain XOR sum lets through.

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xA5;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 250;

/// Bytes around the payload: START, LENGTH, TYPE, CRC
pub const FRAME_OVERHEAD: usize = 4;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD_SIZE + FRAME_OVERHEAD;

/// CRC-8 polynomial (x^8 + x^2 + x + 1)
const CRC_POLY: u8 = 0x07;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// CRC mismatch
    BadCrc,
    /// Invalid frame structure
    InvalidFrame,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Running CRC-8 over `bytes`, continuing from `crc`
pub fn crc8(mut crc: u8, bytes: &[u8]) -> u8 {
    for &byte in bytes {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ CRC_POLY
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a frame with the given message type and payload
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        Self::with_header(msg_type, &[], payload)
    }

    /// Create a frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// Create a frame whose payload is a fixed header followed by a body
    pub fn with_header(msg_type: u8, header: &[u8], body: &[u8]) -> Result<Self, FrameError> {
        let mut payload = Vec::new();
        payload
            .extend_from_slice(header)
            .and_then(|_| payload.extend_from_slice(body))
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self { msg_type, payload })
    }

    /// Split the payload into a header of `len` bytes and the remaining body
    pub fn split_header(&self, len: usize) -> Result<(&[u8], &[u8]), FrameError> {
        if self.payload.len() < len {
            return Err(FrameError::InvalidFrame);
        }
        Ok(self.payload.split_at(len))
    }

    /// CRC over the length, type and payload
    fn crc(&self) -> u8 {
        let head = [self.payload.len() as u8, self.msg_type];
        crc8(crc8(0, &head), &self.payload)
    }

    /// Size of this frame on the wire
    pub fn encoded_len(&self) -> usize {
        self.payload.len() + FRAME_OVERHEAD
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.encoded_len();
        let out = buffer.get_mut(..len).ok_or(FrameError::BufferTooSmall)?;

        let (head, rest) = out.split_at_mut(3);
        head.copy_from_slice(&[FRAME_START, self.payload.len() as u8, self.msg_type]);
        let (payload, crc) = rest.split_at_mut(self.payload.len());
        payload.copy_from_slice(&self.payload);
        crc[0] = self.crc();

        Ok(len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

/// Parser position within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Hunting for START
    Idle,
    /// Got START
    Length,
    /// Got LENGTH
    Type { len: u8 },
    /// Collecting payload bytes
    Payload { len: u8, msg_type: u8 },
    /// Payload complete, CRC next
    Crc { msg_type: u8 },
}

/// Byte-at-a-time frame parser
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    crc: u8,
    dropped: u32,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::Idle,
            payload: Vec::new(),
            crc: 0,
            dropped: 0,
        }
    }

    /// Drop any partial frame and hunt for the next START
    pub fn reset(&mut self) {
        self.state = ParseState::Idle;
        self.payload.clear();
        self.crc = 0;
    }

    /// Frames discarded for a bad length or CRC since creation
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    fn reject(&mut self, err: FrameError) -> Result<Option<Frame>, FrameError> {
        self.reset();
        self.dropped = self.dropped.wrapping_add(1);
        Err(err)
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` when the frame in
    /// progress was discarded.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        self.state = match self.state {
            ParseState::Idle => {
                if byte == FRAME_START {
                    self.payload.clear();
                    self.crc = 0;
                    ParseState::Length
                } else {
                    ParseState::Idle
                }
            }
            ParseState::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    return self.reject(FrameError::InvalidFrame);
                }
                self.crc = crc8(self.crc, &[byte]);
                ParseState::Type { len: byte }
            }
            ParseState::Type { len } => {
                self.crc = crc8(self.crc, &[byte]);
                if len == 0 {
                    ParseState::Crc { msg_type: byte }
                } else {
                    ParseState::Payload { len, msg_type: byte }
                }
            }
            ParseState::Payload { len, msg_type } => {
                // Capacity covers any length accepted above
                let _ = self.payload.push(byte);
                self.crc = crc8(self.crc, &[byte]);
                if self.payload.len() == len as usize {
                    ParseState::Crc { msg_type }
                } else {
                    ParseState::Payload { len, msg_type }
                }
            }
            ParseState::Crc { msg_type } => {
                if byte != self.crc {
                    return self.reject(FrameError::BadCrc);
                }
                let frame = Frame {
                    msg_type,
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();
                return Ok(Some(frame));
            }
        };
        Ok(None)
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc8_check_value() {
        // Standard CRC-8/SMBUS check value
        assert_eq!(crc8(0, b"123456789"), 0xF4);
        assert_eq!(crc8(0, &[]), 0);
    }

    #[test]
    fn test_encode_empty_frame() {
        let frame = Frame::empty(0x01); // CONNECT
        let mut buffer = [0u8; 8];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 4);
        assert_eq!(buffer[0], FRAME_START);
        assert_eq!(buffer[1], 0); // length
        assert_eq!(buffer[2], 0x01); // type
        assert_eq!(buffer[3], crc8(0, &[0, 0x01]));
    }

    #[test]
    fn test_encode_matches_vec() {
        let frame = Frame::new(0x27, &[0x10, 0x20, 0x30]).unwrap();
        let mut buffer = [0u8; 16];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, frame.encoded_len());
        assert_eq!(&buffer[..len], frame.encode_to_vec().unwrap().as_slice());
        assert_eq!(buffer[len - 1], crc8(0, &[3, 0x27, 0x10, 0x20, 0x30]));
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let frame = Frame::new(0x24, &[1, 2, 3, 4]).unwrap();
        let mut buffer = [0u8; 6];
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_transposed_bytes_rejected() {
        let frame = Frame::new(0x24, &[0x12, 0x34]).unwrap();
        let mut bytes = frame.encode_to_vec().unwrap();
        // Same XOR sum, different order
        bytes.swap(3, 4);

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&bytes), Err(FrameError::BadCrc));
        assert_eq!(parser.dropped(), 1);
    }

    #[test]
    fn test_recovers_after_bad_frame() {
        let good = Frame::new(0x26, &[7, 8, 9]).unwrap().encode_to_vec().unwrap();
        let mut bad = good.clone();
        let last = bad.len() - 1;
        bad[last] ^= 0xFF;

        let mut parser = FrameParser::new();
        assert!(parser.feed_bytes(&bad).is_err());
        let parsed = parser.feed_bytes(&good).unwrap().unwrap();
        assert_eq!(parsed.msg_type, 0x26);
        assert_eq!(parsed.payload.as_slice(), &[7, 8, 9]);
    }

    #[test]
    fn test_parser_skips_leading_noise() {
        let encoded = Frame::empty(0x20).encode_to_vec().unwrap();
        let mut data = Vec::<u8, 20>::new();
        data.extend_from_slice(&[0x00, 0xFF, 0x12, 0x34]).unwrap();
        data.extend_from_slice(&encoded).unwrap();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&data).unwrap().unwrap();

        assert_eq!(parsed.msg_type, 0x20);
        assert_eq!(parser.dropped(), 0);
    }

    #[test]
    fn test_parser_rejects_oversized_length() {
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed(FRAME_START), Ok(None));
        assert_eq!(parser.feed(0xFF), Err(FrameError::InvalidFrame));
        assert_eq!(parser.dropped(), 1);
    }

    #[test]
    fn test_payload_too_large() {
        let large_payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        let result = Frame::new(0x24, &large_payload);
        assert_eq!(result, Err(FrameError::PayloadTooLarge));
        assert_eq!(
            Frame::with_header(0x24, &[1, 2], &[0u8; MAX_PAYLOAD_SIZE - 1]),
            Err(FrameError::PayloadTooLarge)
        );
    }

    #[test]
    fn test_split_header() {
        let frame = Frame::with_header(0x25, &[1, 2], &[3, 4, 5]).unwrap();
        let (header, body) = frame.split_header(2).unwrap();
        assert_eq!(header, &[1, 2]);
        assert_eq!(body, &[3, 4, 5]);
        assert_eq!(frame.split_header(6), Err(FrameError::InvalidFrame));
    }
}
