use std::fmt;

// ---------------------------------------------------------------------------
// Mission phases
// ---------------------------------------------------------------------------

/// Discrete mission phase. Progress is strictly forward; only a reset
/// returns to `PreLaunch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissionPhase {
    PreLaunch,
    Liftoff,
    StageSeparation,
    OrbitalInsertion,
    SatelliteDeployment,
    MissionSuccess,
}

impl MissionPhase {
    /// Phases in mission order.
    pub const ORDER: [MissionPhase; 6] = [
        MissionPhase::PreLaunch,
        MissionPhase::Liftoff,
        MissionPhase::StageSeparation,
        MissionPhase::OrbitalInsertion,
        MissionPhase::SatelliteDeployment,
        MissionPhase::MissionSuccess,
    ];

    /// Position in [`MissionPhase::ORDER`].
    pub fn rank(self) -> usize {
        match self {
            MissionPhase::PreLaunch => 0,
            MissionPhase::Liftoff => 1,
            MissionPhase::StageSeparation => 2,
            MissionPhase::OrbitalInsertion => 3,
            MissionPhase::SatelliteDeployment => 4,
            MissionPhase::MissionSuccess => 5,
        }
    }

    /// Physics runs in every phase after the launch command.
    pub fn is_launched(self) -> bool {
        !matches!(self, MissionPhase::PreLaunch)
    }

    /// Booster and upper stage fly independently from staging onward.
    pub fn is_separated(self) -> bool {
        matches!(
            self,
            MissionPhase::StageSeparation
                | MissionPhase::OrbitalInsertion
                | MissionPhase::SatelliteDeployment
                | MissionPhase::MissionSuccess
        )
    }

    /// Entered and left within a single tick.
    pub fn is_pass_through(self) -> bool {
        matches!(
            self,
            MissionPhase::StageSeparation | MissionPhase::SatelliteDeployment
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, MissionPhase::MissionSuccess)
    }

    /// Status line shown to the viewer.
    pub fn status(self) -> &'static str {
        match self {
            MissionPhase::PreLaunch => "Mission: Deploy Satellite. Press 'L' to Launch.",
            MissionPhase::Liftoff => "Liftoff! Overcoming gravity's pull.",
            MissionPhase::StageSeparation => "Main Booster Separation. Igniting Upper Stage.",
            MissionPhase::OrbitalInsertion => "Orbital Insertion Burn. Pushing to apogee.",
            MissionPhase::SatelliteDeployment => "Apogee reached. Deploying satellite.",
            MissionPhase::MissionSuccess => "Mission Successful. Satellite is in stable orbit.",
        }
    }

    /// Short label for tables and CSV.
    pub fn label(self) -> &'static str {
        match self {
            MissionPhase::PreLaunch => "PRE_LAUNCH",
            MissionPhase::Liftoff => "LIFTOFF",
            MissionPhase::StageSeparation => "STAGE_SEP",
            MissionPhase::OrbitalInsertion => "INSERTION",
            MissionPhase::SatelliteDeployment => "DEPLOY",
            MissionPhase::MissionSuccess => "SUCCESS",
        }
    }
}

impl fmt::Display for MissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
