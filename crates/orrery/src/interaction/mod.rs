pub mod picking;
pub mod sync;
