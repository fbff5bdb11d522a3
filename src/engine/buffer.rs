//! Single-precision sample buffer handed to playback and rendering

/// Finished mono audio at a known sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Wrap already-converted samples
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Narrow a double-precision signal to single precision
    pub fn from_f64(samples: &[f64], sample_rate: u32) -> Self {
        Self::new(samples.iter().map(|&s| s as f32).collect(), sample_rate)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value (NaN if any sample is NaN)
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |peak, &s| {
            if s.is_nan() || peak.is_nan() {
                f32::NAN
            } else {
                peak.max(s.abs())
            }
        })
    }

    /// Root-mean-square level, 0 for an empty buffer
    pub fn rms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self.samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
        (sum_sq / self.samples.len() as f64).sqrt() as f32
    }

    /// True if every sample is finite
    pub fn is_finite(&self) -> bool {
        self.samples.iter().all(|s| s.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_basics() {
        let buffer = SampleBuffer::new(vec![0.0; 22050], 44100);
        assert_eq!(buffer.len(), 22050);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.sample_rate(), 44100);
        assert!((buffer.duration_secs() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_from_f64_narrows() {
        let buffer = SampleBuffer::from_f64(&[0.1, -0.5], 8000);
        assert_eq!(buffer.samples(), &[0.1f32, -0.5f32]);
    }

    #[test]
    fn test_peak_and_rms() {
        let buffer = SampleBuffer::new(vec![1.0, -1.0, 1.0, -1.0], 4);
        assert_eq!(buffer.peak(), 1.0);
        assert_eq!(buffer.rms(), 1.0);

        let buffer = SampleBuffer::new(vec![0.25, -0.75], 4);
        assert_eq!(buffer.peak(), 0.75);
    }

    #[test]
    fn test_empty_buffer_levels() {
        let buffer = SampleBuffer::new(Vec::new(), 44100);
        assert!(buffer.is_empty());
        assert_eq!(buffer.peak(), 0.0);
        assert_eq!(buffer.rms(), 0.0);
        assert_eq!(buffer.duration_secs(), 0.0);
    }

    #[test]
    fn test_non_finite_detection() {
        let buffer = SampleBuffer::new(vec![0.0, f32::INFINITY], 44100);
        assert!(!buffer.is_finite());

        let buffer = SampleBuffer::new(vec![0.0, f32::NAN], 44100);
        assert!(buffer.peak().is_nan());
    }
}
