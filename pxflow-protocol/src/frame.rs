//! Frame assembly for the MAVLink v1 link.
//!
//! Frame format:
//! - STX (1 byte): 0xFE synchronization byte
//! - LEN (1 byte): payload length (0-255)
//! - SEQ, SYS, COMP (3 bytes): sequence, system id, component id
//! - MSGID (1 byte): message type identifier
//! - PAYLOAD (LEN bytes): message-specific data
//! - CK_A, CK_B (2 bytes): checksum, consumed but not verified

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xFE;

/// Maximum payload size in bytes (LEN is a single byte)
pub const MAX_PAYLOAD_SIZE: usize = 255;

/// Header bytes before the payload (STX + LEN + SEQ + SYS + COMP + MSGID)
pub const HEADER_SIZE: usize = 6;

/// Maximum complete frame size (header + payload + two checksum bytes)
pub const MAX_FRAME_SIZE: usize = HEADER_SIZE + MAX_PAYLOAD_SIZE + 2;

/// A complete frame as seen on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Packet sequence number
    pub seq: u8,
    /// Sending system id
    pub sys_id: u8,
    /// Sending component id
    pub comp_id: u8,
    /// Message type identifier
    pub msg_id: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    /// Trailing checksum, CK_A in the low byte (never validated)
    pub checksum: u16,
}

impl Frame {
    /// Create a frame with zeroed header ids and checksum
    ///
    /// Returns `None` if the payload is longer than [`MAX_PAYLOAD_SIZE`].
    pub fn new(msg_id: u8, payload: &[u8]) -> Option<Self> {
        let mut payload_vec = Vec::new();
        payload_vec.extend_from_slice(payload).ok()?;

        Some(Self {
            seq: 0,
            sys_id: 0,
            comp_id: 0,
            msg_id,
            payload: payload_vec,
            checksum: 0,
        })
    }

    /// Declared payload length as carried in the LEN byte
    pub fn len(&self) -> u8 {
        self.payload.len() as u8
    }

    /// Check if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Encode this frame into a byte buffer
    ///
    /// The stored checksum is written as-is. Returns the number of bytes
    /// written, or `None` if `buffer` is too small.
    pub fn encode(&self, buffer: &mut [u8]) -> Option<usize> {
        let payload_len = self.payload.len();
        let frame_len = HEADER_SIZE + payload_len + 2;
        if buffer.len() < frame_len {
            return None;
        }

        buffer[0] = FRAME_START;
        buffer[1] = payload_len as u8;
        buffer[2] = self.seq;
        buffer[3] = self.sys_id;
        buffer[4] = self.comp_id;
        buffer[5] = self.msg_id;
        buffer[HEADER_SIZE..HEADER_SIZE + payload_len].copy_from_slice(&self.payload);
        let [ck_a, ck_b] = self.checksum.to_le_bytes();
        buffer[HEADER_SIZE + payload_len] = ck_a;
        buffer[HEADER_SIZE + payload_len + 1] = ck_b;

        Some(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Vec<u8, MAX_FRAME_SIZE> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        // MAX_FRAME_SIZE always fits a frame with a bounded payload
        let len = self.encode(&mut buffer).unwrap_or(0);
        let mut vec = Vec::new();
        let _ = vec.extend_from_slice(&buffer[..len]);
        vec
    }
}

/// Framing state
///
/// Each variant names the last field consumed, so `GotLen` means the length
/// byte has been read and the sequence byte is next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseState {
    /// Waiting for STX
    Idle,
    /// Got STX, waiting for LEN
    GotStx,
    /// Got LEN, waiting for SEQ
    GotLen,
    /// Got SEQ, waiting for SYS
    GotSeq,
    /// Got SYS, waiting for COMP
    GotSys,
    /// Got COMP, waiting for MSGID
    GotComp,
    /// Reading payload bytes
    InPayload,
    /// Payload complete, waiting for CK_A
    GotCkA,
    /// Got CK_A, waiting for CK_B
    ///
    /// A frame for another message id leaves the parser parked here: it does
    /// not fall back to `Idle`, and every following byte is handled by this
    /// state (and ignored) until the next STX.
    GotCkB,
}

/// Running totals kept by the parser
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParserStats {
    /// Complete frames carrying the target message id
    pub frames_accepted: u32,
    /// Complete frames for any other message id
    pub frames_ignored: u32,
    /// STX bytes that cut a partially assembled frame short
    pub resyncs: u32,
}

/// State machine for reassembling frames of one target message type
#[derive(Debug, Clone)]
pub struct FrameParser {
    target_id: u8,
    state: ParseState,
    buffer: Vec<u8, MAX_PAYLOAD_SIZE>,
    expected_length: u8,
    seq: u8,
    sys_id: u8,
    comp_id: u8,
    msg_id: u8,
    ck_a: u8,
    stats: ParserStats,
}

impl FrameParser {
    /// Create a parser that accepts frames with the given message id
    pub fn new(target_id: u8) -> Self {
        Self {
            target_id,
            state: ParseState::Idle,
            buffer: Vec::new(),
            expected_length: 0,
            seq: 0,
            sys_id: 0,
            comp_id: 0,
            msg_id: 0,
            ck_a: 0,
            stats: ParserStats::default(),
        }
    }

    /// Message id this parser accepts
    pub fn target_id(&self) -> u8 {
        self.target_id
    }

    /// Current framing state
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Frame counters since construction
    pub fn stats(&self) -> ParserStats {
        self.stats
    }

    /// Drop any partial frame and wait for the next STX
    pub fn reset(&mut self) {
        self.state = ParseState::Idle;
        self.buffer.clear();
        self.expected_length = 0;
        self.msg_id = 0;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Some(frame)` when the byte completes a frame whose message
    /// id matches the target.
    pub fn feed(&mut self, byte: u8) -> Option<Frame> {
        // STX restarts framing from any state
        if byte == FRAME_START {
            if !matches!(self.state, ParseState::Idle | ParseState::GotCkB) {
                self.stats.resyncs = self.stats.resyncs.wrapping_add(1);
            }
            self.state = ParseState::GotStx;
            return None;
        }

        match self.state {
            ParseState::Idle => None,
            ParseState::GotStx => {
                self.expected_length = byte;
                self.state = ParseState::GotLen;
                None
            }
            ParseState::GotLen => {
                self.seq = byte;
                self.state = ParseState::GotSeq;
                None
            }
            ParseState::GotSeq => {
                self.sys_id = byte;
                self.state = ParseState::GotSys;
                None
            }
            ParseState::GotSys => {
                self.comp_id = byte;
                self.state = ParseState::GotComp;
                None
            }
            ParseState::GotComp => {
                self.msg_id = byte;
                self.buffer.clear();
                self.state = ParseState::InPayload;
                None
            }
            ParseState::InPayload => {
                // A zero LEN never matches after a push; the buffer fills
                // up and further bytes are dropped until the next STX.
                let _ = self.buffer.push(byte);
                if self.buffer.len() == self.expected_length as usize {
                    self.state = ParseState::GotCkA;
                }
                None
            }
            ParseState::GotCkA => {
                self.ck_a = byte;
                self.state = ParseState::GotCkB;
                None
            }
            ParseState::GotCkB => self.finish_frame(byte),
        }
    }

    /// Handle a byte in the `GotCkB` state
    fn finish_frame(&mut self, ck_b: u8) -> Option<Frame> {
        if self.msg_id != self.target_id {
            // Stay parked in GotCkB; only count the frame once
            if !self.buffer.is_empty() {
                self.stats.frames_ignored = self.stats.frames_ignored.wrapping_add(1);
                self.buffer.clear();
            }
            return None;
        }

        let frame = Frame {
            seq: self.seq,
            sys_id: self.sys_id,
            comp_id: self.comp_id,
            msg_id: self.msg_id,
            payload: self.buffer.clone(),
            checksum: u16::from_le_bytes([self.ck_a, ck_b]),
        };

        self.stats.frames_accepted = self.stats.frames_accepted.wrapping_add(1);
        self.buffer.clear();
        self.state = ParseState::Idle;
        Some(frame)
    }

    /// Feed a run of bytes, handing every accepted frame to `on_frame`
    ///
    /// Runs may be any length, including empty, and a frame may span any
    /// number of calls.
    pub fn process<F>(&mut self, bytes: &[u8], mut on_frame: F)
    where
        F: FnMut(Frame),
    {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte) {
                on_frame(frame);
            }
        }
    }
}
