pub mod game;
pub mod input;
pub mod record;
pub mod trial;

pub use game::{AgeGroup, GameId, LevelId, Mode};
pub use input::{InputEvent, Key, ResponseEvent, ResponseKind};
pub use record::SessionRecord;
pub use trial::{evaluate, Direction, Evaluation, Trial};
