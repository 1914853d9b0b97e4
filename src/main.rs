use std::error::Error;
use std::path::Path;

use stardust::io::csv;
use stardust::io::json::{self, MissionSummary};
use stardust::sim::{self, EventKind};
use stardust::WorldConfig;

const DEFAULT_TICKS: u64 = 6_000; // ~96 s, a little over two orbits

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Usage: stardust [ticks] [export_dir]
    let mut args = std::env::args().skip(1);
    let ticks = match args.next() {
        Some(arg) => arg.parse::<u64>()?,
        None => DEFAULT_TICKS,
    };
    let export_dir = args.next();

    let world = WorldConfig::default();
    let (trajectory, events) = sim::simulate(&world, ticks)?;
    let summary = MissionSummary::from_run(&world, &trajectory, &events);

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  PROJECT STARDUST — satellite deployment mission");
    println!("====================================================================");
    println!();
    println!("  World");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  G:             {:>8.1}       dt:           {:>8.3} s",
        world.gravity, world.dt
    );
    println!(
        "  Booster thrust:{:>8.1}       Upper thrust: {:>8.1}",
        world.booster_thrust, world.upper_stage_thrust
    );
    println!(
        "  Planet radius: {:>8.1}       Orbit target: {:>8.1}  (v = {:.3})",
        world.collision_radius,
        world.orbit_altitude,
        world.circular_speed()
    );
    println!();

    println!("  Mission Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for e in &events {
        let t = e.tick as f32 * world.dt;
        let note = match e.kind {
            EventKind::BoosterCrash => "  (booster lost)",
            _ => "",
        };
        println!(
            "  tick {:>6}  t={:>7.2}s  {:<32} -> {}{}",
            e.tick,
            t,
            e.kind.to_string(),
            e.phase,
            note
        );
    }
    println!();

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Final phase:   {}", summary.final_phase);
    println!("  Booster peak:  {:>8.2}  above center", summary.booster_peak_height);
    println!("  Upper peak:    {:>8.2}  above center", summary.upper_peak_height);
    match &summary.orbit {
        Some(o) => {
            println!(
                "  Orbit:         r={:.2}  v={:.3}  a={:.2}  e={:.4}",
                o.radius, o.speed, o.sma, o.ecc
            );
            if let Some(p) = summary.orbit_period {
                println!("  Period:        {:>8.2} s", p);
            }
        }
        None => println!("  Orbit:         not reached"),
    }
    println!();

    // -----------------------------------------------------------------------
    // Trajectory table (sampled)
    // -----------------------------------------------------------------------
    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>6}  {:>7}  {:>10}  {:>9}  {:>9}  {:>9}",
        "tick", "t (s)", "phase", "boost h", "upper h", "sat r"
    );
    println!("  {}", "─".repeat(62));

    let sample_interval = (trajectory.len() / 30).max(1);
    for (i, s) in trajectory.iter().enumerate() {
        if i % sample_interval != 0 && i != trajectory.len() - 1 {
            continue;
        }
        let height = |visible: bool, y: f32| {
            if visible {
                format!("{:.2}", y - world.center.y)
            } else {
                "-".to_string()
            }
        };
        let sat_r = if s.satellite.visible {
            format!("{:.2}", (s.satellite.pos - world.center).xy().norm())
        } else {
            "-".to_string()
        };
        println!(
            "  {:>6}  {:>7.2}  {:>10}  {:>9}  {:>9}  {:>9}",
            s.tick,
            s.time,
            s.phase.label(),
            height(s.booster.visible, s.booster.pos.y),
            height(s.upper_stage.visible, s.upper_stage.pos.y),
            sat_r,
        );
    }
    println!();
    println!("  Simulation: {} ticks, dt={} s", ticks, world.dt);
    println!("====================================================================");
    println!();

    if let Some(dir) = export_dir {
        let dir = Path::new(&dir);
        std::fs::create_dir_all(dir)?;
        let csv_path = dir.join("stardust_trajectory.csv");
        let json_path = dir.join("stardust_summary.json");
        csv::write_trajectory_file(&csv_path.to_string_lossy(), &trajectory)?;
        json::write_summary_file(&json_path.to_string_lossy(), &summary)?;
        log::info!("exported {} and {}", csv_path.display(), json_path.display());
    }

    Ok(())
}
