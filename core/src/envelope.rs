use num_complex::Complex64;
use rustfft::FftPlanner;

/// Instantaneous envelope of a real signal: the magnitude of its
/// analytic signal (FFT-based Hilbert transform).
///
/// Carrier phase and frequency are discarded on purpose; for ASK only
/// the amplitude carries information.
pub fn analytic_envelope(samples: &[f64]) -> Vec<f64> {
    let n = samples.len();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![samples[0].abs()];
    }

    let mut buffer: Vec<Complex64> = samples.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut buffer);

    // analytic signal: keep DC (and Nyquist for even n), double the
    // positive frequencies, zero the negative ones
    let half = n / 2;
    if n % 2 == 0 {
        for bin in buffer.iter_mut().take(half).skip(1) {
            *bin *= 2.0;
        }
        for bin in buffer.iter_mut().skip(half + 1) {
            *bin = Complex64::new(0.0, 0.0);
        }
    } else {
        for bin in buffer.iter_mut().take(half + 1).skip(1) {
            *bin *= 2.0;
        }
        for bin in buffer.iter_mut().skip(half + 1) {
            *bin = Complex64::new(0.0, 0.0);
        }
    }

    planner.plan_fft_inverse(n).process(&mut buffer);

    let scale = 1.0 / n as f64;
    buffer.iter().map(|c| c.norm() * scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    #[test]
    fn test_constant_tone_envelope() {
        let fs = 44_100.0;
        let samples: Vec<f64> = (0..44_100)
            .map(|i| 0.8 * (TAU * 1200.0 * i as f64 / fs).sin())
            .collect();
        let env = analytic_envelope(&samples);

        // away from the edges the envelope tracks the amplitude
        for &e in &env[1000..43_000] {
            assert!((e - 0.8).abs() < 0.05, "envelope sample {e}");
        }
    }

    #[test]
    fn test_keyed_tone_envelope() {
        let fs = 44_100.0;
        let mut samples: Vec<f64> = (0..8820)
            .map(|i| (TAU * 1200.0 * i as f64 / fs).sin())
            .collect();
        samples.extend(std::iter::repeat(0.0).take(8820));

        let env = analytic_envelope(&samples);
        assert!(env[2000..7000].iter().all(|&e| e > 0.5));
        assert!(env[10_000..16_000].iter().all(|&e| e < 0.5));
    }

    #[test]
    fn test_empty_input() {
        assert!(analytic_envelope(&[]).is_empty());
    }
}
