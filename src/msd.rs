use crate::trajectory::Trajectory;
use analysis_common::{min_image_dist_sq, SimBox};
use log::{debug, info};
use std::time::Instant;

/// Running sums for one time lag: total of per-pair mean squared
/// displacements and the number of frame pairs that contributed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LagBin {
    pub sum: f64,
    pub count: u32,
}

/// Per-lag accumulator for the all-pairs MSD scan. Owned by the caller,
/// passed through the scan, and consumed by `finalize`.
#[derive(Debug, Clone)]
pub struct MsdAccumulator {
    bins: Vec<LagBin>,
}

impl MsdAccumulator {
    /// Creates an accumulator with one bin per lag 0..num_frames-1.
    pub fn new(num_frames: usize) -> Self {
        MsdAccumulator {
            bins: vec![LagBin::default(); num_frames],
        }
    }

    pub fn num_lags(&self) -> usize {
        self.bins.len()
    }

    /// Adds one frame pair's mean squared displacement to the given lag.
    pub fn record(&mut self, lag: usize, mean_sq_disp: f64) {
        let bin = &mut self.bins[lag];
        bin.sum += mean_sq_disp;
        bin.count += 1;
    }

    pub fn bin(&self, lag: usize) -> LagBin {
        self.bins[lag]
    }

    /// Averages each lag over its sample count. Lags that collected no
    /// samples keep their initial 0.0; lag 0 always lands here because the
    /// scan only visits pairs with t2 > t1.
    pub fn finalize(self) -> Vec<f64> {
        self.bins
            .into_iter()
            .map(|bin| {
                if bin.count > 0 {
                    bin.sum / bin.count as f64
                } else {
                    0.0
                }
            })
            .collect()
    }
}

/// Scans every ordered frame pair (t1, t2) with t2 > t1 and accumulates the
/// minimum-image mean squared displacement per time lag.
///
/// This is the literal O(nFrames^2 * nAtoms) reduction; every pair is
/// visited exactly once and contributes to exactly one lag.
pub fn accumulate_msd(trajectory: &Trajectory, sim_box: &SimBox) -> MsdAccumulator {
    let num_frames = trajectory.num_frames();
    let num_atoms = trajectory.num_atoms();
    let mut acc = MsdAccumulator::new(num_frames);

    let scan_start = Instant::now();
    let mut previous_print_time = scan_start;
    let print_interval_secs = 5.0;

    for t1 in 0..num_frames {
        let origin = &trajectory.frames[t1];
        for t2 in (t1 + 1)..num_frames {
            let target = &trajectory.frames[t2];
            let dt = t2 - t1;

            let mut sq_dis = 0.0;
            for atom in 0..num_atoms {
                sq_dis += min_image_dist_sq(target.positions[atom], origin.positions[atom], sim_box);
            }
            acc.record(dt, sq_dis / num_atoms as f64);
        }

        debug!("Scanned origin frame {}/{}", t1 + 1, num_frames);
        let now = Instant::now();
        if now.duration_since(previous_print_time).as_secs_f64() >= print_interval_secs {
            info!(
                "Origin frame [{}/{}] | Elapsed: {:.2} s",
                t1 + 1,
                num_frames,
                scan_start.elapsed().as_secs_f64()
            );
            previous_print_time = now;
        }
    }

    acc
}
