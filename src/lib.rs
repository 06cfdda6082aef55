pub mod msd;
pub mod output;
pub mod trajectory;

pub use msd::{accumulate_msd, MsdAccumulator};
pub use trajectory::{Frame, Trajectory};
