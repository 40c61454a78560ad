//! The domain simulation: bodies, formulas, generation, and orbital motion.

pub mod atmosphere;
pub mod body;
pub mod formulas;
pub mod generator;
pub mod integrator;
pub mod names;
pub mod position;
pub mod system;
pub mod units;
