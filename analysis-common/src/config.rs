use crate::vecmath::SimBox;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

// Configuration for the trajectory input
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TrajectoryConfig {
    #[serde(default = "default_trajectory_path")]
    pub path: String,
    #[serde(default = "default_num_frames")]
    pub num_frames: usize,
    #[serde(default = "default_num_atoms")]
    pub num_atoms: usize,
    /// Edge length of the cubic simulation cell, constant over the run.
    #[serde(default = "default_box_length")]
    pub box_length: f64,
}

// Configuration for output settings
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_msd_filename")]
    pub msd_filename: String,
    #[serde(default = "default_base_filename")]
    pub base_filename: String,
    #[serde(default)]
    pub save_csv: bool,
    #[serde(default)]
    pub save_summary: bool,
}

fn default_trajectory_path() -> String {
    "trajectory.xyz".to_string()
}

fn default_num_frames() -> usize {
    100
}

fn default_num_atoms() -> usize {
    4000
}

fn default_box_length() -> f64 {
    16.796
}

fn default_msd_filename() -> String {
    "msd.dat".to_string()
}

fn default_base_filename() -> String {
    "analysis".to_string()
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        TrajectoryConfig {
            path: default_trajectory_path(),
            num_frames: default_num_frames(),
            num_atoms: default_num_atoms(),
            box_length: default_box_length(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            msd_filename: default_msd_filename(),
            base_filename: default_base_filename(),
            save_csv: false,
            save_summary: false,
        }
    }
}

// Main analysis configuration structure, loaded from analysis.toml.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub trajectory: TrajectoryConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AnalysisConfig {
    /// Loads the analysis configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path_ref.display(), e)
        })?;
        let config: AnalysisConfig = toml::from_str(&config_str).map_err(|e| {
            anyhow::anyhow!("Failed to parse TOML from '{}': {}", path_ref.display(), e)
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration if the file exists, otherwise falls back to
    /// the built-in defaults. A present but malformed file is still a
    /// fatal error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.trajectory.num_frames == 0 {
            anyhow::bail!("num_frames must be greater than 0.");
        }
        if self.trajectory.num_atoms == 0 {
            anyhow::bail!("num_atoms must be greater than 0.");
        }
        if self.trajectory.box_length <= 0.0 {
            anyhow::bail!("box_length must be positive.");
        }
        Ok(())
    }

    /// The simulation cell described by this configuration.
    pub fn sim_box(&self) -> SimBox {
        SimBox::cubic(self.trajectory.box_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_run() {
        let config = AnalysisConfig::default();
        assert_eq!(config.trajectory.path, "trajectory.xyz");
        assert_eq!(config.trajectory.num_frames, 100);
        assert_eq!(config.trajectory.num_atoms, 4000);
        assert_eq!(config.trajectory.box_length, 16.796);
        assert_eq!(config.output.msd_filename, "msd.dat");
        assert!(!config.output.save_csv);
        assert!(!config.output.save_summary);
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: AnalysisConfig = toml::from_str(
            "[trajectory]\nnum_frames = 5\nnum_atoms = 2\n\n[output]\nsave_csv = true\n",
        )
        .expect("parse");
        assert_eq!(config.trajectory.num_frames, 5);
        assert_eq!(config.trajectory.num_atoms, 2);
        assert_eq!(config.trajectory.box_length, 16.796);
        assert!(config.output.save_csv);
        assert!(!config.output.save_summary);
    }

    #[test]
    fn rejects_zero_atom_count() {
        let config: AnalysisConfig =
            toml::from_str("[trajectory]\nnum_atoms = 0\n").expect("parse");
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_nonpositive_box_length() {
        let config: AnalysisConfig =
            toml::from_str("[trajectory]\nbox_length = -1.0\n").expect("parse");
        assert!(config.validate().is_err());
    }

    #[test]
    fn cubic_box_uses_configured_length() {
        let config = AnalysisConfig::default();
        assert_eq!(config.sim_box().lengths, [16.796; 3]);
    }
}
