//! Quantum-inspired tensor-network compression for solution snapshots.
//!
//! A dense field of length `Nx = d₁·d₂·…·dₙ` is viewed as an n-index tensor
//! and split into a matrix product state (tensor train) by sequential SVD.

pub mod mps;
pub mod sites;
pub mod truncation;
