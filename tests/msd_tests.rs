use std::fs;

use analysis_common::SimBox;
use msd_analysis::msd::accumulate_msd;
use msd_analysis::output::write_msd_table;
use msd_analysis::trajectory::Trajectory;

mod common;
use common::{temp_path, write_text};

/// Full pipeline on the smallest meaningful input: 2 frames, 1 atom,
/// box [10,10,10], atom moving from the origin to (1,0,0).
#[test]
fn end_to_end_two_frames_one_atom() {
    let traj_path = temp_path("e2e.xyz");
    write_text(
        &traj_path,
        "1\nSnapshot #0\nA\t0.0\t0.0\t0.0\n1\nSnapshot #1\nA\t1.0\t0.0\t0.0\n",
    );
    let out_path = temp_path("e2e_msd.dat");

    let trajectory = Trajectory::read_xyz(&traj_path, 2, 1).expect("read trajectory");
    let msd = accumulate_msd(&trajectory, &SimBox::cubic(10.0)).finalize();
    write_msd_table(&out_path, &msd).expect("write table");

    let contents = fs::read_to_string(&out_path).expect("read back");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "0\t0.0");
    assert_eq!(lines[1], "1\t1.0");

    let _ = fs::remove_file(&traj_path);
    let _ = fs::remove_file(&out_path);
}

/// The output table always has one row per lag, lags in ascending order,
/// even when upper lags collected only a single sample.
#[test]
fn output_covers_every_lag_in_order() {
    let traj_path = temp_path("lags.xyz");
    let mut contents = String::new();
    for frame in 0..6 {
        contents.push_str(&format!("1\nSnapshot #{frame}\nA\t{frame}.0\t0.0\t0.0\n"));
    }
    write_text(&traj_path, &contents);
    let out_path = temp_path("lags_msd.dat");

    let trajectory = Trajectory::read_xyz(&traj_path, 6, 1).expect("read trajectory");
    let msd = accumulate_msd(&trajectory, &SimBox::cubic(1000.0)).finalize();
    write_msd_table(&out_path, &msd).expect("write table");

    let written = fs::read_to_string(&out_path).expect("read back");
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 6);
    for (lag, line) in lines.iter().enumerate() {
        let mut cols = line.split('\t');
        assert_eq!(cols.next().unwrap(), lag.to_string());
        assert!(cols.next().unwrap().parse::<f64>().is_ok());
        assert!(cols.next().is_none());
    }

    let _ = fs::remove_file(&traj_path);
    let _ = fs::remove_file(&out_path);
}

/// Fast-diffusing atoms can move more than a box length between distant
/// frames; the repeated wrap must still find the nearest image.
#[test]
fn multi_box_displacement_wraps_through_pipeline() {
    let traj_path = temp_path("fast.xyz");
    write_text(
        &traj_path,
        "1\nSnapshot #0\nA\t0.0\t0.0\t0.0\n1\nSnapshot #1\nA\t23.0\t0.0\t0.0\n",
    );

    let trajectory = Trajectory::read_xyz(&traj_path, 2, 1).expect("read trajectory");
    let msd = accumulate_msd(&trajectory, &SimBox::cubic(10.0)).finalize();
    assert_eq!(msd[1], 9.0);

    let _ = fs::remove_file(&traj_path);
}

/// Extra frames beyond the configured count are ignored; the read is
/// configuration-driven, not file-driven.
#[test]
fn reads_exactly_the_configured_frame_count() {
    let traj_path = temp_path("extra.xyz");
    write_text(
        &traj_path,
        "1\nSnapshot #0\nA\t0.0\t0.0\t0.0\n\
         1\nSnapshot #1\nA\t1.0\t0.0\t0.0\n\
         1\nSnapshot #2\nA\t2.0\t0.0\t0.0\n",
    );

    let trajectory = Trajectory::read_xyz(&traj_path, 2, 1).expect("read trajectory");
    assert_eq!(trajectory.num_frames(), 2);

    let _ = fs::remove_file(&traj_path);
}

/// A trajectory shorter than the configured frame count is a fatal
/// configuration error, not a silently truncated result.
#[test]
fn short_trajectory_is_fatal() {
    let traj_path = temp_path("short.xyz");
    write_text(&traj_path, "1\nSnapshot #0\nA\t0.0\t0.0\t0.0\n");

    assert!(Trajectory::read_xyz(&traj_path, 2, 1).is_err());

    let _ = fs::remove_file(&traj_path);
}
