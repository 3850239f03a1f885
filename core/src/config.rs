use serde::Deserialize;

/// Protocol parameters shared by both ends of the link.
///
/// Loaded once at startup and read-only afterwards; transmitter and
/// receiver must agree on identical values out-of-band. The JSON key
/// names keep the unit-suffixed vocabulary of the original config
/// files (`packet_len[bytes]`, `baud_rate[bps]`).
#[derive(Debug, Clone, Deserialize)]
pub struct CommConfig {
    pub start_byte: u8,
    pub stop_byte: u8,
    #[serde(rename = "packet_len[bytes]")]
    pub packet_len: u32,
    #[serde(rename = "crc8_sum")]
    pub use_crc: bool,
    #[serde(rename = "baud_rate[bps]")]
    pub baud_rate: u32,
}

impl Default for CommConfig {
    fn default() -> Self {
        Self {
            start_byte: 0x7E,
            stop_byte: 0x7F,
            packet_len: 8,
            use_crc: true,
            baud_rate: 30,
        }
    }
}

/// Per-mode tunables. One record serves both directions: the
/// amplitude/silence fields drive modulation, the threshold and
/// filter toggles drive demodulation.
#[derive(Debug, Clone, Deserialize)]
pub struct ModeConfig {
    #[serde(rename = "sample_rate[Hz]")]
    pub sample_rate: u32,
    #[serde(rename = "carrier_freq[Hz]")]
    pub carrier_freq: f64,
    pub one_symbol_amplitude: f64,
    pub zero_symbol_amplitude: f64,
    #[serde(rename = "silence_at_start[s]", default)]
    pub silence_at_start: f64,
    #[serde(rename = "silence_at_end[s]", default)]
    pub silence_at_end: f64,
    /// Butterworth band isolation around the carrier, both directions.
    #[serde(default)]
    pub apply_frequency_cut: bool,
    /// Median denoise of the envelope on receive.
    #[serde(default)]
    pub apply_filters: bool,
    #[serde(default = "default_threshold")]
    pub one_symbol_amplitude_threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            carrier_freq: 1_200.0,
            one_symbol_amplitude: 1.0,
            zero_symbol_amplitude: 0.0,
            silence_at_start: 0.0,
            silence_at_end: 0.0,
            apply_frequency_cut: false,
            apply_filters: false,
            one_symbol_amplitude_threshold: default_threshold(),
        }
    }
}
