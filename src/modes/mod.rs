pub mod control;
pub mod robot;

pub use control::{Mode, ModeEvent};
pub use robot::RoboUi;
