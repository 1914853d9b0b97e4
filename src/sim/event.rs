use std::fmt;

use super::phase::MissionPhase;

// ---------------------------------------------------------------------------
// Mission events
// ---------------------------------------------------------------------------

/// Kinds of mission events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Launch,
    StageSeparation,
    OrbitalInsertion { speed: f32 },
    SatelliteDeployment,
    BoosterCrash,
    Reset,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Launch => f.write_str("launch"),
            EventKind::StageSeparation => f.write_str("stage separation"),
            EventKind::OrbitalInsertion { speed } => {
                write!(f, "orbital insertion (v = {speed:.3})")
            }
            EventKind::SatelliteDeployment => f.write_str("satellite deployment"),
            EventKind::BoosterCrash => f.write_str("booster crash"),
            EventKind::Reset => f.write_str("reset"),
        }
    }
}

/// A discrete event, stamped with the tick it happened on and the phase
/// the mission was in once that tick's transitions resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct SimEvent {
    pub tick: u64,
    pub kind: EventKind,
    pub phase: MissionPhase,
}

/// First tick at which an event of the given kind was recorded.
pub fn first_tick(events: &[SimEvent], matches: impl Fn(&EventKind) -> bool) -> Option<u64> {
    events.iter().find(|e| matches(&e.kind)).map(|e| e.tick)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_finds_earliest() {
        let events = vec![
            SimEvent { tick: 0, kind: EventKind::Launch, phase: MissionPhase::Liftoff },
            SimEvent {
                tick: 80,
                kind: EventKind::StageSeparation,
                phase: MissionPhase::OrbitalInsertion,
            },
            SimEvent { tick: 90, kind: EventKind::BoosterCrash, phase: MissionPhase::OrbitalInsertion },
        ];
        assert_eq!(first_tick(&events, |k| *k == EventKind::StageSeparation), Some(80));
        assert_eq!(
            first_tick(&events, |k| matches!(k, EventKind::OrbitalInsertion { .. })),
            None
        );
    }

    #[test]
    fn display_includes_speed() {
        let k = EventKind::OrbitalInsertion { speed: 7.4536 };
        assert_eq!(k.to_string(), "orbital insertion (v = 7.454)");
    }
}
