//! Main navigation executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logger and modules
//!     - Main loop:
//!         - Synthesise the obstacle point cloud for this cycle
//!         - Latency-compensated command generation
//!         - Advance the simulated scene using the issued command
//!
//! The scene is a synthetic wall ahead of the vehicle: the controller
//! accelerates in open space, steers around the wall where it can, and
//! decelerates to a stop as the remaining free path shrinks. Sensor
//! acquisition and messaging are external concerns; this binary only
//! demonstrates the per-cycle controller flow.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::info;
use nalgebra::{Isometry2, Point2, Vector2};
use std::thread;
use std::time::Duration;

// Internal
use nav_lib::{lat_comp::LatCtrl, vehicle::VehicleModel};
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
    time::{Clock, SystemClock},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of control cycles to run the demonstration for.
const NUM_CYCLES: usize = 100;

/// Forward distance of the synthetic wall at the start of the run.
///
/// Units: meters
const WALL_RANGE_M: f64 = 8.0;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("nav_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Navigation Core Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let vehicle: VehicleModel =
        util::params::load("vehicle.toml").wrap_err("Could not load vehicle params")?;

    info!("Vehicle parameters loaded");

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let clock = SystemClock;

    let mut lat_ctrl = LatCtrl::init(
        "lat_comp.toml",
        "toc_ctrl.toml",
        vehicle,
        Box::new(clock),
    )
    .wrap_err("Failed to initialise LatCtrl")?;

    info!("LatCtrl init complete\n");

    let control_interval_s = lat_ctrl.control_interval_s();
    let straight_threshold_m = lat_ctrl.straight_curvature_threshold_m();

    // ---- MAIN LOOP ----

    info!("Beginning main loop\n");

    // Synthetic wall of points ahead of the vehicle, expressed in the world
    // frame and re-expressed in the vehicle frame each cycle
    let wall_m: Vec<Vector2<f64>> = (-20..=20)
        .map(|i| Vector2::new(WALL_RANGE_M, f64::from(i) * 0.05))
        .collect();

    // Simulated vehicle pose in the world frame
    let mut pose = Isometry2::new(Vector2::new(0.0, 0.0), 0.0);
    let mut speed_ms = 0.0;

    for cycle in 0..NUM_CYCLES {
        // Express the wall in the current vehicle frame
        let cloud: Vec<Vector2<f64>> = wall_m
            .iter()
            .map(|p| pose.inverse_transform_point(&Point2::new(p[0], p[1])).coords)
            .collect();

        // Latency-compensated command generation
        let cmd = lat_ctrl.generate_command(&cloud, speed_ms, clock.now_s());

        info!(
            "Cycle {:3}: speed {:.3} m/s, curvature {:+.3} 1/m",
            cycle, cmd.velocity_ms, cmd.curvature_m
        );

        // Advance the simulated pose by one interval of the issued command
        let distance_m = cmd.velocity_ms * control_interval_s;
        let step = if cmd.curvature_m.abs() > straight_threshold_m {
            let angle_rad = distance_m * cmd.curvature_m;
            Isometry2::new(
                Vector2::new(distance_m * angle_rad.cos(), distance_m * angle_rad.sin()),
                angle_rad,
            )
        } else {
            Isometry2::new(Vector2::new(distance_m, 0.0), 0.0)
        };
        pose *= step;
        speed_ms = cmd.velocity_ms;

        thread::sleep(Duration::from_secs_f64(control_interval_s));
    }

    info!("Demonstration complete");

    Ok(())
}
