//! Mission execution estimation
//!
//! [`MissionSegmenter`] reconstructs the trajectory segments of a mission;
//! [`estimate_progress`] and [`summarize`] consume those segments for
//! progress bars and distance/duration displays.

pub mod progress;
pub mod segmenter;
pub mod totals;

pub use progress::*;
pub use segmenter::*;
pub use totals::*;
