//! QuorumSim Environment Abstraction Layer
//!
//! This crate provides the seam that lets the QuorumSim engine draw its
//! randomness from either **Production** (OS entropy) or **Simulation**
//! (seeded) sources.
//!
//! # Core Concept
//!
//! The engine never touches an ambient global generator. Every run receives
//! a context handle and draws through `with_rng`, which serializes access so
//! that one run's draws are a contiguous slice of the stream. Seeding the
//! context makes any result reproducible from its seed number.
//!
//! # Example
//!
//! ```ignore
//! use quorumsim_env::{EntropyContext, SimulationContext};
//! use rand::Rng;
//!
//! let ctx = EntropyContext::new();
//! let coin = ctx.with_rng(|rng| rng.gen_bool(0.5));
//! ```

mod context;
mod entropy_impl;

pub use context::SimulationContext;
pub use entropy_impl::EntropyContext;
