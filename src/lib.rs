//! Material and light case combinatorics for the r1 renderer, and the
//! synthesizer that turns each case into a Parasol shader module.

pub mod cases;
pub mod config;
pub mod features;
pub mod naming;
pub mod output;
pub mod shader_gen;
pub mod validation;
