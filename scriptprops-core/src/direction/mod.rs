//! Script direction detection

pub mod category;
pub mod classifier;
pub mod delimiters;

pub use category::{BidiCategory, BidiCounts};
pub use classifier::{
    string_direction, AnomalyCallback, Direction, DirectionAnomaly, DirectionClassifier,
    DirectionMonitor,
};
pub use delimiters::{contains_switchable, switch_open_close_for_rtl, SWITCHABLE_RTL_DELIMITERS};
