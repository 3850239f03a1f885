use num_complex::Complex64;
use rustfft::FftPlanner;

/// Estimate the dominant frequency of a real signal in Hz.
///
/// Takes the FFT power spectrum, finds the strongest bin excluding DC,
/// then refines it with parabolic interpolation on the log power of
/// the three bins around the peak for sub-bin resolution. When the
/// peak lands on the last bin, or a neighbouring bin carries no power,
/// the bin frequency is returned directly.
pub fn find_main_frequency(samples: &[f64], sample_rate: u32) -> f64 {
    let n = samples.len();
    if n < 4 {
        return 0.0;
    }

    let mut buffer: Vec<Complex64> = samples.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut buffer);

    // one-sided power spectrum, bins 0..=n/2
    let half = n / 2;
    let power: Vec<f64> = buffer[..=half].iter().map(|c| c.norm_sqr()).collect();

    let peak = power
        .iter()
        .enumerate()
        .skip(1)
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap_or(1);

    let bin_freq = f64::from(sample_rate) / n as f64;
    if peak + 1 >= power.len() {
        return peak as f64 * bin_freq;
    }

    let (p0, p1, p2) = (power[peak - 1], power[peak], power[peak + 1]);
    if p0 <= 0.0 || p1 <= 0.0 || p2 <= 0.0 {
        return peak as f64 * bin_freq;
    }

    let (y0, y1, y2) = (p0.ln(), p1.ln(), p2.ln());
    let denom = 2.0 * y1 - y2 - y0;
    if denom.abs() < f64::EPSILON {
        return peak as f64 * bin_freq;
    }
    let delta = 0.5 * (y2 - y0) / denom;

    (peak as f64 + delta) * bin_freq
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    fn sine(freq: f64, sample_rate: u32, seconds: f64) -> Vec<f64> {
        let n = (seconds * f64::from(sample_rate)) as usize;
        (0..n)
            .map(|i| (TAU * freq * i as f64 / f64::from(sample_rate)).sin())
            .collect()
    }

    #[test]
    fn test_pure_sine_on_bin() {
        let samples = sine(1000.0, 44_100, 1.0);
        let freq = find_main_frequency(&samples, 44_100);
        assert!((freq - 1000.0).abs() < 1.0, "estimated {freq} Hz");
    }

    #[test]
    fn test_pure_sine_between_bins() {
        // 0.25 s window gives 4 Hz bins; 1201 Hz falls between them
        let samples = sine(1201.0, 44_100, 0.25);
        let freq = find_main_frequency(&samples, 44_100);
        assert!((freq - 1201.0).abs() < 1.5, "estimated {freq} Hz");
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(find_main_frequency(&[], 44_100), 0.0);
        assert_eq!(find_main_frequency(&[0.0, 1.0], 44_100), 0.0);
    }
}
