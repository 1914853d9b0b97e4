use std::io::{self, Write};

use crate::dynamics::state::WorldConfig;
use crate::orbital::OrbitElements;
use crate::sim::event::{first_tick, EventKind, SimEvent};
use crate::sim::{MissionPhase, Snapshot};

/// Summary of one mission run.
#[derive(Debug, Clone)]
pub struct MissionSummary {
    pub final_phase: MissionPhase,
    pub ticks: u64,
    pub flight_time: f32,
    pub separation_tick: Option<u64>,
    pub insertion_tick: Option<u64>,
    pub deployment_tick: Option<u64>,
    pub booster_crash_tick: Option<u64>,
    pub booster_peak_height: f32,
    pub upper_peak_height: f32,
    pub orbit: Option<OrbitElements>,
    pub orbit_period: Option<f32>,
}

impl MissionSummary {
    /// Compute summary from a recorded run.
    pub fn from_run(world: &WorldConfig, trajectory: &[Snapshot], events: &[SimEvent]) -> Self {
        let peak = |f: fn(&Snapshot) -> Option<f32>| {
            trajectory
                .iter()
                .filter_map(f)
                .fold(f32::NEG_INFINITY, f32::max)
        };
        let booster_peak_height =
            peak(|s| s.booster.visible.then(|| s.booster.pos.y)) - world.center.y;
        let upper_peak_height =
            peak(|s| s.upper_stage.visible.then(|| s.upper_stage.pos.y)) - world.center.y;

        let last = trajectory.last();
        let orbit = last
            .filter(|s| s.satellite.visible)
            .and_then(|s| OrbitElements::from_body(&s.satellite, &world.center, world.gravity));

        MissionSummary {
            final_phase: last.map_or(MissionPhase::PreLaunch, |s| s.phase),
            ticks: last.map_or(0, |s| s.tick),
            flight_time: last.map_or(0.0, |s| s.time),
            separation_tick: first_tick(events, |k| *k == EventKind::StageSeparation),
            insertion_tick: first_tick(events, |k| matches!(k, EventKind::OrbitalInsertion { .. })),
            deployment_tick: first_tick(events, |k| *k == EventKind::SatelliteDeployment),
            booster_crash_tick: first_tick(events, |k| *k == EventKind::BoosterCrash),
            booster_peak_height,
            upper_peak_height,
            orbit_period: orbit.and_then(|o| o.period(world.gravity)),
            orbit,
        }
    }
}

fn opt_tick(t: Option<u64>) -> String {
    t.map_or_else(|| "null".to_string(), |t| t.to_string())
}

fn opt_num(v: Option<f32>) -> String {
    match v {
        Some(v) if v.is_finite() => format!("{v:.4}"),
        _ => "null".to_string(),
    }
}

/// Write mission summary as JSON to a writer.
pub fn write_summary<W: Write>(writer: &mut W, summary: &MissionSummary) -> io::Result<()> {
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"mission\": {{")?;
    writeln!(writer, "    \"final_phase\": \"{}\",", summary.final_phase.label())?;
    writeln!(writer, "    \"ticks\": {},", summary.ticks)?;
    writeln!(writer, "    \"flight_time_s\": {:.3}", summary.flight_time)?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"events\": {{")?;
    writeln!(writer, "    \"stage_separation\": {},", opt_tick(summary.separation_tick))?;
    writeln!(writer, "    \"orbital_insertion\": {},", opt_tick(summary.insertion_tick))?;
    writeln!(writer, "    \"satellite_deployment\": {},", opt_tick(summary.deployment_tick))?;
    writeln!(writer, "    \"booster_crash\": {}", opt_tick(summary.booster_crash_tick))?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"performance\": {{")?;
    writeln!(writer, "    \"booster_peak_height\": {},", opt_num(Some(summary.booster_peak_height)))?;
    writeln!(writer, "    \"upper_peak_height\": {}", opt_num(Some(summary.upper_peak_height)))?;
    writeln!(writer, "  }},")?;
    match &summary.orbit {
        Some(o) => {
            writeln!(writer, "  \"orbit\": {{")?;
            writeln!(writer, "    \"radius\": {},", opt_num(Some(o.radius)))?;
            writeln!(writer, "    \"speed\": {},", opt_num(Some(o.speed)))?;
            writeln!(writer, "    \"semi_major_axis\": {},", opt_num(Some(o.sma)))?;
            writeln!(writer, "    \"eccentricity\": {},", opt_num(Some(o.ecc)))?;
            writeln!(writer, "    \"period_s\": {}", opt_num(summary.orbit_period))?;
            writeln!(writer, "  }}")?;
        }
        None => writeln!(writer, "  \"orbit\": null")?,
    }
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write mission summary JSON to a file.
pub fn write_summary_file(path: &str, summary: &MissionSummary) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, summary)
}
