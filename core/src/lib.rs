//! Acoustic software modem library
//!
//! Turns a byte buffer into an audio waveform and recovers a byte
//! buffer from a recorded waveform over a lossy acoustic channel.
//! The built-in scheme is on/off-keyed amplitude modulation (ASK)
//! with fixed-rate packet framing and a per-packet CRC-8.
//!
//! The codec is synchronous and stateless between calls: `modulate`
//! and `demodulate` are pure functions of their inputs and
//! configuration, with no I/O in the hot path. Audio capture,
//! playback and persistence belong to the calling layer.

pub mod assembler;
pub mod bits;
pub mod config;
pub mod demodulator_ask;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod framing;
pub mod modem;
pub mod modulator_ask;
pub mod sector;
pub mod spectrum;

pub use bits::BitBuffer;
pub use config::{CommConfig, ModeConfig};
pub use demodulator_ask::AskDemodulator;
pub use error::{ModemError, Result};
pub use framing::Framer;
pub use modem::{DemodResult, Demodulator, ModemRegistry, ModulatedSignal, Modulator};
pub use modulator_ask::AskModulator;
pub use sector::Sector;
