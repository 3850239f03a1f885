use crate::assembler::PacketAssembler;
use crate::config::{CommConfig, ModeConfig};
use crate::envelope::analytic_envelope;
use crate::filter::{band_isolate, median_filter};
use crate::modem::{DemodResult, Demodulator};
use crate::sector::{find_level_sectors, slice_into_bits};
use crate::spectrum::find_main_frequency;
use log::{debug, warn};

const MEDIAN_WINDOW: usize = 5;

/// ASK demodulator: a chain of pure signal transforms.
///
/// estimate carrier -> optional band isolation -> envelope ->
/// optional median denoise -> threshold -> sectors -> bit sectors ->
/// packet assembly.
///
/// Every stage is total; demodulation always yields a [`DemodResult`]
/// and records decode trouble in `crc_ok` instead of propagating it.
pub struct AskDemodulator {
    comm: CommConfig,
    mode: ModeConfig,
}

impl AskDemodulator {
    pub fn new(comm: CommConfig, mode: ModeConfig) -> Self {
        Self { comm, mode }
    }

    fn failed(digital_samples: Vec<u8>) -> DemodResult {
        DemodResult {
            digital_samples,
            payload: Vec::new(),
            bit_sectors: Vec::new(),
            crc_ok: false,
        }
    }
}

impl Demodulator for AskDemodulator {
    fn demodulate(&self, samples: &[f64], sample_rate: u32) -> DemodResult {
        if samples.is_empty() || sample_rate == 0 || self.comm.baud_rate == 0 {
            warn!("nothing to demodulate: empty audio or zero rate");
            return Self::failed(Vec::new());
        }

        debug!(
            "ASK demodulate: {} samples at {} Hz ({:.2}s)",
            samples.len(),
            sample_rate,
            samples.len() as f64 / f64::from(sample_rate)
        );

        let main_freq = find_main_frequency(samples, sample_rate);
        debug!("estimated main frequency: {:.1} Hz", main_freq);

        let conditioned = if self.mode.apply_frequency_cut && main_freq > 0.0 {
            band_isolate(samples, main_freq, sample_rate)
        } else {
            samples.to_vec()
        };

        let mut envelope = analytic_envelope(&conditioned);
        if self.mode.apply_filters {
            envelope = median_filter(&envelope, MEDIAN_WINDOW);
        }

        let threshold = self.mode.one_symbol_amplitude_threshold;
        let digital_samples: Vec<u8> = envelope.iter().map(|&e| (e > threshold) as u8).collect();

        let samples_per_bit = f64::from(sample_rate) / f64::from(self.comm.baud_rate);
        let sectors = find_level_sectors(&digital_samples);
        let bit_sectors = slice_into_bits(&sectors, samples_per_bit);
        debug!(
            "{} level sectors -> {} bit sectors at {:.1} samples/bit",
            sectors.len(),
            bit_sectors.len(),
            samples_per_bit
        );

        let (payload, crc_ok) = PacketAssembler::assemble(&bit_sectors, &self.comm);
        if !crc_ok {
            warn!("demodulated payload failed integrity check");
        }

        DemodResult {
            digital_samples,
            payload,
            bit_sectors,
            crc_ok,
        }
    }
}
