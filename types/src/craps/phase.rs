use std::fmt;

/// Lifecycle of a wager. Moves from `Unresolved` to `Won` or `Lost` exactly
/// once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BetStatus {
    #[default]
    Unresolved,
    Won,
    Lost,
}

impl BetStatus {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, BetStatus::Unresolved)
    }
}

/// Table phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No point established.
    #[default]
    ComeOut,
    /// Rolling for the point (one of 4, 5, 6, 8, 9, 10).
    Point(u8),
}

impl Phase {
    pub fn is_come_out(&self) -> bool {
        matches!(self, Phase::ComeOut)
    }

    /// The established point, or 0 during the come-out.
    pub fn point(&self) -> u8 {
        match self {
            Phase::ComeOut => 0,
            Phase::Point(point) => *point,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::ComeOut => write!(f, "come-out"),
            Phase::Point(point) => write!(f, "point {point}"),
        }
    }
}
