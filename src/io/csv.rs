use std::io::{self, Write};

use crate::dynamics::state::Body;
use crate::sim::Snapshot;
use crate::vehicle::BodyKind;

/// Write trajectory data to CSV format.
///
/// Columns: tick, time, phase, then for each of booster / upper / satellite:
///          x, y, z, vx, vy, vz, spin, visible, thrusting
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &[Snapshot]) -> io::Result<()> {
    write!(writer, "tick,time,phase")?;
    for kind in BodyKind::ALL {
        let k = kind.key();
        write!(
            writer,
            ",{k}_x,{k}_y,{k}_z,{k}_vx,{k}_vy,{k}_vz,{k}_spin,{k}_visible,{k}_thrusting"
        )?;
    }
    writeln!(writer)?;

    for s in trajectory {
        write!(writer, "{},{:.4},{}", s.tick, s.time, s.phase.label())?;
        for body in [&s.booster, &s.upper_stage, &s.satellite] {
            write_body(writer, body)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn write_body<W: Write>(writer: &mut W, b: &Body) -> io::Result<()> {
    write!(
        writer,
        ",{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.2},{},{}",
        b.pos.x, b.pos.y, b.pos.z,
        b.vel.x, b.vel.y, b.vel.z,
        b.spin,
        u8::from(b.visible),
        u8::from(b.thrusting),
    )
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: &str, trajectory: &[Snapshot]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_trajectory(&mut file, trajectory)
}
