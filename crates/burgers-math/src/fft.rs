//! 1D FFT wrappers around rustfft.
//!
//! Convention matches numpy:
//! - Forward FFT (fft): unnormalized
//! - Inverse FFT (ifft): normalized by 1/n
//!
//! [`Fft1D`] holds planned transforms for one length so the time steppers
//! don't re-plan on every sub-step.

use ndarray::Array1;
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::fmt;
use std::sync::Arc;

/// Forward and inverse plans for a fixed transform length.
#[derive(Clone)]
pub struct Fft1D {
    n: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl fmt::Debug for Fft1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fft1D").field("n", &self.n).finish()
    }
}

impl Fft1D {
    pub fn new(n: usize) -> Self {
        let mut planner = FftPlanner::new();
        Fft1D {
            n,
            forward: planner.plan_fft_forward(n),
            inverse: planner.plan_fft_inverse(n),
        }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Forward transform of a real signal. Matches `numpy.fft.fft()`.
    pub fn forward(&self, input: &Array1<f64>) -> Array1<Complex64> {
        let mut buffer: Vec<Complex64> = input.iter().map(|&v| Complex64::new(v, 0.0)).collect();
        self.forward.process(&mut buffer);
        Array1::from(buffer)
    }

    /// Inverse transform, real part only. Matches `numpy.fft.ifft().real`.
    pub fn inverse_real(&self, input: &Array1<Complex64>) -> Array1<f64> {
        let norm = 1.0 / self.n as f64;
        let mut buffer = input.to_vec();
        self.inverse.process(&mut buffer);
        buffer.iter().map(|c| c.re * norm).collect()
    }

    /// ∂ₓu via `F⁻¹[i k F[u]]`.
    ///
    /// The Nyquist mode of an even-length signal has no odd partner, so its
    /// derivative is set to zero to keep the result real.
    pub fn derivative(&self, u: &Array1<f64>, k: &Array1<f64>) -> Array1<f64> {
        let mut spectrum = self.forward(u);
        let iu = Complex64::new(0.0, 1.0);
        for (c, &kv) in spectrum.iter_mut().zip(k.iter()) {
            *c *= iu * kv;
        }
        if self.n % 2 == 0 {
            spectrum[self.n / 2] = Complex64::new(0.0, 0.0);
        }
        self.inverse_real(&spectrum)
    }
}

/// Forward 1D FFT. Matches `numpy.fft.fft()`.
pub fn fft(input: &Array1<f64>) -> Array1<Complex64> {
    Fft1D::new(input.len()).forward(input)
}

/// Inverse 1D FFT, real part. Matches `numpy.fft.ifft().real`.
pub fn ifft(input: &Array1<Complex64>) -> Array1<f64> {
    Fft1D::new(input.len()).inverse_real(input)
}

/// Sample frequencies in cycles per unit. Matches `numpy.fft.fftfreq(n, d)`.
/// `Grid1D::new` builds its wavenumbers with the same ordering.
pub fn fftfreq(n: usize, d: f64) -> Array1<f64> {
    let scale = 1.0 / (n as f64 * d);
    let half = n.div_ceil(2);
    Array1::from_shape_fn(n, |j| {
        if j < half {
            j as f64 * scale
        } else {
            (j as f64 - n as f64) * scale
        }
    })
}
