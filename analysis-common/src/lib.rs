pub mod config;
pub mod vecmath;

// Re-export key types for easier use by dependent crates
pub use config::{AnalysisConfig, OutputConfig, TrajectoryConfig};
pub use vecmath::{min_image_dist_sq, SimBox, Vec3};
