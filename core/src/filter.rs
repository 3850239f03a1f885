use std::f64::consts::PI;

/// Cutoff offset around the carrier for band isolation, in Hz.
pub const BAND_OFFSET_HZ: f64 = 100.0;

/// One second-order section, Direct Form II Transposed.
///
/// Transfer function: H(z) = (b0 + b1 z^-1 + b2 z^-2) / (1 + a1 z^-1 + a2 z^-2)
#[derive(Debug, Clone)]
pub struct Biquad {
    b: [f64; 3],
    a: [f64; 2],
}

impl Biquad {
    /// 2nd-order Butterworth low-pass via the bilinear transform.
    pub fn lowpass(cutoff_hz: f64, sample_rate: f64) -> Self {
        let wc = (PI * cutoff_hz / sample_rate).tan();
        let k1 = std::f64::consts::SQRT_2 * wc;
        let k2 = wc * wc;
        let norm = 1.0 / (1.0 + k1 + k2);
        Self {
            b: [k2 * norm, 2.0 * k2 * norm, k2 * norm],
            a: [2.0 * (k2 - 1.0) * norm, (1.0 - k1 + k2) * norm],
        }
    }

    /// 2nd-order Butterworth high-pass via the bilinear transform.
    pub fn highpass(cutoff_hz: f64, sample_rate: f64) -> Self {
        let wc = (PI * cutoff_hz / sample_rate).tan();
        let k1 = std::f64::consts::SQRT_2 * wc;
        let k2 = wc * wc;
        let norm = 1.0 / (1.0 + k1 + k2);
        Self {
            b: [norm, -2.0 * norm, norm],
            a: [2.0 * (k2 - 1.0) * norm, (1.0 - k1 + k2) * norm],
        }
    }

    /// Single forward pass with zero initial state.
    pub fn filter(&self, input: &[f64]) -> Vec<f64> {
        let mut state = [0.0f64; 2];
        input
            .iter()
            .map(|&x| {
                let y = self.b[0] * x + state[0];
                state[0] = self.b[1] * x - self.a[0] * y + state[1];
                state[1] = self.b[2] * x - self.a[1] * y;
                y
            })
            .collect()
    }
}

/// Zero-phase (forward-backward) filtering.
///
/// Filters the signal twice, once reversed, cancelling the group
/// delay so that sample index stays aligned with bit index.
pub fn filtfilt(section: &Biquad, input: &[f64]) -> Vec<f64> {
    let mut forward = section.filter(input);
    forward.reverse();
    let mut backward = section.filter(&forward);
    backward.reverse();
    backward
}

/// Isolate the band around `center_hz`: zero-phase low-pass at
/// `center + BAND_OFFSET_HZ` cascaded with a zero-phase high-pass at
/// `center - BAND_OFFSET_HZ`, then peak normalisation.
pub fn band_isolate(samples: &[f64], center_hz: f64, sample_rate: u32) -> Vec<f64> {
    let fs = f64::from(sample_rate);
    let low = Biquad::lowpass(center_hz + BAND_OFFSET_HZ, fs);
    let high = Biquad::highpass((center_hz - BAND_OFFSET_HZ).max(1.0), fs);

    let mut out = filtfilt(&low, samples);
    out = filtfilt(&high, &out);
    normalize(&mut out);
    out
}

/// Scale so the maximum absolute sample is 1. A silent buffer is left
/// untouched.
pub fn normalize(samples: &mut [f64]) {
    let peak = samples.iter().fold(0.0f64, |m, &x| m.max(x.abs()));
    if peak > 0.0 {
        for sample in samples.iter_mut() {
            *sample /= peak;
        }
    }
}

/// Median filter with an odd window, zero-padded at the edges.
/// Suppresses impulse noise without smearing level transitions.
pub fn median_filter(samples: &[f64], window: usize) -> Vec<f64> {
    debug_assert!(window % 2 == 1, "median window must be odd");
    if samples.is_empty() || window <= 1 {
        return samples.to_vec();
    }

    let half = window / 2;
    let mut scratch = Vec::with_capacity(window);
    (0..samples.len())
        .map(|i| {
            scratch.clear();
            for k in 0..window {
                let idx = i as isize + k as isize - half as isize;
                if idx < 0 || idx as usize >= samples.len() {
                    scratch.push(0.0);
                } else {
                    scratch.push(samples[idx as usize]);
                }
            }
            scratch.sort_by(|a, b| a.total_cmp(b));
            scratch[half]
        })
        .collect()
}
