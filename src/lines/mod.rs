//! Rule-line families: axis types, ordered line sets, and Hough detection.

pub mod axis;
pub mod detect;
pub mod set;

pub use axis::{Axis, Horizontal, Vertical};
pub use detect::{polar_to_segment, GridLineDetector};
pub use set::{EdgePolicy, LineSet};
