pub mod aggregate;
pub mod badges;

pub use aggregate::{all_history, averages, count_this_week, count_week_of, streak_days, Averages};
pub use badges::{badges, badges_at, Badge, BadgeId};
