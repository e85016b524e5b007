/// Completion flags of one round, recomputed every round
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct RoundState {
    /// No thread of this rank wrote a record this round
    pub me_completed: bool,
    /// Every received slot signals that its sender is done
    pub others_completed: bool,
}

impl RoundState {
    pub fn is_finished(&self) -> bool {
        self.me_completed && self.others_completed
    }
}
