mod rank_assignment;
mod vp_layout;

pub use rank_assignment::RankAssignment;
pub use vp_layout::VpLayout;
