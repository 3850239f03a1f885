use std::f64::consts::TAU;

use crate::bits::BitBuffer;
use crate::config::{CommConfig, ModeConfig};
use crate::error::Result;
use crate::filter::{band_isolate, BAND_OFFSET_HZ};
use crate::modem::{ModulatedSignal, Modulator};
use log::debug;

/// Amplitude-shift keying modulator.
///
/// Synthesizes a fixed-frequency carrier and scales each bit period by
/// `one_symbol_amplitude` or `zero_symbol_amplitude` (on/off keying
/// when the zero amplitude is 0, soft keying otherwise). Optional
/// band-limiting uses zero-phase Butterworth sections so that keying
/// harmonics are removed without shifting bit boundaries.
pub struct AskModulator {
    comm: CommConfig,
    mode: ModeConfig,
}

impl AskModulator {
    pub fn new(comm: CommConfig, mode: ModeConfig) -> Self {
        Self { comm, mode }
    }
}

impl Modulator for AskModulator {
    fn modulate(&self, bits: &BitBuffer) -> Result<ModulatedSignal> {
        let fs = f64::from(self.mode.sample_rate);
        let samples_per_bit = fs / f64::from(self.comm.baud_rate);
        let data_len = (bits.len() as f64 * samples_per_bit).ceil() as usize;

        debug!(
            "ASK modulate: {} bits at {} baud, {:.1} samples/bit, carrier {} Hz",
            bits.len(),
            self.comm.baud_rate,
            samples_per_bit,
            self.mode.carrier_freq
        );

        // base carrier over [0, n/baud)
        let mut keyed: Vec<f64> = (0..data_len)
            .map(|i| (TAU * self.mode.carrier_freq * i as f64 / fs).sin())
            .collect();

        // amplitude-key each bit band; ceil boundaries clamped to the
        // buffer so rounding cannot leave trailing unassigned samples
        for (i, &bit) in bits.as_slice().iter().enumerate() {
            let start = (i as f64 * samples_per_bit).ceil() as usize;
            let end = (((i + 1) as f64 * samples_per_bit).ceil() as usize).min(data_len);
            let amplitude = if bit != 0 {
                self.mode.one_symbol_amplitude
            } else {
                self.mode.zero_symbol_amplitude
            };
            for sample in &mut keyed[start..end] {
                *sample *= amplitude;
            }
        }

        let pre = (self.mode.silence_at_start * fs).round() as usize;
        let post = (self.mode.silence_at_end * fs).round() as usize;
        let mut samples = Vec::with_capacity(pre + data_len + post);
        samples.resize(pre, 0.0);
        samples.extend_from_slice(&keyed);
        samples.resize(pre + data_len + post, 0.0);

        if self.mode.apply_frequency_cut && !samples.is_empty() {
            debug!(
                "band-limiting to {} +/- {} Hz",
                self.mode.carrier_freq, BAND_OFFSET_HZ
            );
            samples = band_isolate(&samples, self.mode.carrier_freq, self.mode.sample_rate);
        }

        let times: Vec<f64> = (0..samples.len()).map(|i| i as f64 / fs).collect();

        Ok(ModulatedSignal {
            times,
            samples,
            sample_rate: self.mode.sample_rate,
            bits: bits.clone(),
        })
    }
}
