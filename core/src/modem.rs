use std::collections::HashMap;

use crate::bits::BitBuffer;
use crate::config::{CommConfig, ModeConfig};
use crate::demodulator_ask::AskDemodulator;
use crate::error::{ModemError, Result};
use crate::modulator_ask::AskModulator;
use crate::sector::Sector;

/// Waveform produced by a modulator: a continuous time axis, samples
/// in roughly [-1, 1] and the bit sequence it encodes.
#[derive(Debug, Clone)]
pub struct ModulatedSignal {
    pub times: Vec<f64>,
    pub samples: Vec<f64>,
    pub sample_rate: u32,
    pub bits: BitBuffer,
}

/// Outcome of one demodulation call. Always produced, even for
/// undecodable input; `bit_sectors` carries per-bit timing metadata
/// for diagnostics.
#[derive(Debug, Clone)]
pub struct DemodResult {
    pub digital_samples: Vec<u8>,
    pub payload: Vec<u8>,
    pub bit_sectors: Vec<Sector>,
    pub crc_ok: bool,
}

/// Turns a framed bit sequence into an audio waveform.
pub trait Modulator {
    fn modulate(&self, bits: &BitBuffer) -> Result<ModulatedSignal>;
}

/// Recovers payload bytes from a recorded waveform. Must always
/// return a result; decode trouble is reported through the result,
/// never as a panic.
pub trait Demodulator {
    fn demodulate(&self, samples: &[f64], sample_rate: u32) -> DemodResult;
}

type ModulatorCtor = fn(CommConfig, ModeConfig) -> Box<dyn Modulator>;
type DemodulatorCtor = fn(CommConfig, ModeConfig) -> Box<dyn Demodulator>;

/// Explicit mode-name registry.
///
/// New modulation schemes are added by registering a constructor under
/// a name, not by scanning the filesystem for implementations.
pub struct ModemRegistry {
    modulators: HashMap<&'static str, ModulatorCtor>,
    demodulators: HashMap<&'static str, DemodulatorCtor>,
}

impl ModemRegistry {
    pub fn new() -> Self {
        Self {
            modulators: HashMap::new(),
            demodulators: HashMap::new(),
        }
    }

    /// Registry with all built-in modes.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register_modulator("ask", |comm, mode| Box::new(AskModulator::new(comm, mode)));
        registry.register_demodulator("ask", |comm, mode| {
            Box::new(AskDemodulator::new(comm, mode))
        });
        registry
    }

    pub fn register_modulator(&mut self, name: &'static str, ctor: ModulatorCtor) {
        self.modulators.insert(name, ctor);
    }

    pub fn register_demodulator(&mut self, name: &'static str, ctor: DemodulatorCtor) {
        self.demodulators.insert(name, ctor);
    }

    pub fn modulator(
        &self,
        name: &str,
        comm: CommConfig,
        mode: ModeConfig,
    ) -> Result<Box<dyn Modulator>> {
        self.modulators
            .get(name)
            .map(|ctor| ctor(comm, mode))
            .ok_or_else(|| ModemError::UnknownModulator(name.to_string()))
    }

    pub fn demodulator(
        &self,
        name: &str,
        comm: CommConfig,
        mode: ModeConfig,
    ) -> Result<Box<dyn Demodulator>> {
        self.demodulators
            .get(name)
            .map(|ctor| ctor(comm, mode))
            .ok_or_else(|| ModemError::UnknownDemodulator(name.to_string()))
    }

    pub fn modulator_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.modulators.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn demodulator_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.demodulators.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for ModemRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
