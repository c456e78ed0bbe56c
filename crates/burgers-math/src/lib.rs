//! Mathematical primitives for the Burgers solvers.

pub mod fft;
pub mod linalg;
pub mod norms;
