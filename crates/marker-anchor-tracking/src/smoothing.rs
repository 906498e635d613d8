//! Fixed-window moving averages.
//!
//! The two filters ramp up differently and are kept as separate types.

use std::collections::VecDeque;

use nalgebra::Vector3;

/// Window length of both filters, frames.
pub const SMOOTHING_WINDOW: usize = 10;

/// Mean of the last `SMOOTHING_WINDOW` samples, over however many are held.
#[derive(Clone, Debug, Default)]
pub struct RampAverage {
    samples: VecDeque<Vector3<f32>>,
}

impl RampAverage {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(SMOOTHING_WINDOW),
        }
    }

    /// Append, evicting the oldest when full, and return the new mean.
    pub fn push(&mut self, sample: Vector3<f32>) -> Vector3<f32> {
        if self.samples.len() == SMOOTHING_WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        let sum: Vector3<f32> = self.samples.iter().sum();
        sum / self.samples.len() as f32
    }

    /// `None` before the first sample.
    pub fn average(&self) -> Option<Vector3<f32>> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: Vector3<f32> = self.samples.iter().sum();
        Some(sum / self.samples.len() as f32)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Ring of `SMOOTHING_WINDOW` samples seeded entirely by the first one.
#[derive(Clone, Debug, Default)]
pub struct PrefilledAverage {
    ring: Option<[Vector3<f32>; SMOOTHING_WINDOW]>,
    next: usize,
}

impl PrefilledAverage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the oldest slot and return the mean of all slots.
    pub fn push(&mut self, sample: Vector3<f32>) -> Vector3<f32> {
        match self.ring.as_mut() {
            Some(ring) => {
                ring[self.next] = sample;
                self.next = (self.next + 1) % SMOOTHING_WINDOW;
            }
            None => {
                self.ring = Some([sample; SMOOTHING_WINDOW]);
                self.next = 0;
            }
        }
        self.average().unwrap_or(sample)
    }

    /// `None` before the first sample.
    pub fn average(&self) -> Option<Vector3<f32>> {
        self.ring
            .as_ref()
            .map(|ring| ring.iter().sum::<Vector3<f32>>() / SMOOTHING_WINDOW as f32)
    }

    pub fn is_primed(&self) -> bool {
        self.ring.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn x(v: f32) -> Vector3<f32> {
        Vector3::new(v, 0.0, 0.0)
    }

    #[test]
    fn ramp_average_ramps_then_slides() {
        let mut f = RampAverage::new();
        assert!(f.average().is_none());
        assert_abs_diff_eq!(f.push(x(10.0)).x, 10.0);
        assert_abs_diff_eq!(f.push(x(20.0)).x, 15.0);

        for _ in 0..20 {
            f.push(x(1.0));
        }
        assert_eq!(f.len(), SMOOTHING_WINDOW);
        assert_abs_diff_eq!(f.average().expect("avg").x, 1.0);
    }

    #[test]
    fn ramp_average_evicts_oldest() {
        let mut f = RampAverage::new();
        for i in 1..=10 {
            f.push(x(i as f32));
        }
        assert_abs_diff_eq!(f.average().expect("avg").x, 5.5);
        // drops 1, adds 11
        assert_abs_diff_eq!(f.push(x(11.0)).x, 6.5);
    }

    #[test]
    fn ramp_average_keeps_last_ten_of_twelve() {
        let mut f = RampAverage::new();
        let mut last = Vector3::zeros();
        for i in 1..=12 {
            last = f.push(x(i as f32));
        }
        assert_eq!(f.len(), 10);
        // mean of 3..=12
        assert_abs_diff_eq!(last, x(7.5), epsilon = 1e-6);
        assert_abs_diff_eq!(f.average().expect("avg"), x(7.5), epsilon = 1e-6);
    }

    #[test]
    fn prefilled_average_starts_at_first_sample() {
        let mut f = PrefilledAverage::new();
        assert!(f.average().is_none());
        assert_abs_diff_eq!(f.push(x(10.0)).x, 10.0);
        // one of ten slots replaced
        assert_abs_diff_eq!(f.push(x(20.0)).x, 11.0, epsilon = 1e-5);
    }

    #[test]
    fn prefilled_average_overwrites_round_robin() {
        let mut f = PrefilledAverage::new();
        f.push(x(0.0));
        for _ in 0..SMOOTHING_WINDOW {
            f.push(x(5.0));
        }
        assert_abs_diff_eq!(f.average().expect("avg").x, 5.0, epsilon = 1e-5);
        f.push(x(15.0));
        assert_abs_diff_eq!(f.average().expect("avg").x, 6.0, epsilon = 1e-5);
    }

    #[test]
    fn filters_differ_on_second_sample() {
        let mut ramp = RampAverage::new();
        let mut pre = PrefilledAverage::new();
        ramp.push(x(0.0));
        pre.push(x(0.0));
        assert!(ramp.push(x(10.0)).x > pre.push(x(10.0)).x);
    }
}
