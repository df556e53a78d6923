//! PX4Flow MAVLink protocol
//!
//! This crate decodes the MAVLink v1 stream that the PX4Flow optical flow
//! sensor emits over its USB/UART link. Only reading is supported, and only
//! one message type (OPTICAL_FLOW) is ever handed on.
//!
//! # Protocol Overview
//!
//! Every message is wrapped in the same frame:
//! ```text
//! ┌──────┬─────┬─────┬─────┬──────┬───────┬───────────┬──────┬──────┐
//! │ STX  │ LEN │ SEQ │ SYS │ COMP │ MSGID │ PAYLOAD   │ CK_A │ CK_B │
//! │ 0xFE │ 1B  │ 1B  │ 1B  │ 1B   │ 1B    │ LEN bytes │ 1B   │ 1B   │
//! └──────┴─────┴─────┴─────┴──────┴───────┴───────────┴──────┴──────┘
//! ```
//!
//! The checksum bytes are consumed but NOT verified. Any 0xFE byte restarts
//! framing, so a corrupted frame can never wedge the parser.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod fields;
pub mod frame;
pub mod messages;

pub use fields::{decode, DecodeError, FieldSpec, FieldType, FieldValue};
pub use frame::{Frame, FrameParser, ParseState, ParserStats, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::MSG_OPTICAL_FLOW;
