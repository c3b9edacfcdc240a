//! Score weights for position evaluation

/// Evaluation weights
pub struct Score;

impl Score {
    /// Big board decided. Only a decided game may score this magnitude.
    pub const DECISIVE: i32 = 10;
    /// Per sub-board won
    pub const SUB_BOARD: i32 = 3;
    /// Per big-board line with two won sub-boards and an open third
    pub const META_THREAT: i32 = 1;
    /// Bound on the magnitude of any undecided position
    pub const POSITIONAL_LIMIT: i32 = Self::DECISIVE - 1;

    /// Is this the score of a decided game?
    #[inline]
    pub fn is_decisive(score: i32) -> bool {
        score.abs() == Self::DECISIVE
    }
}
