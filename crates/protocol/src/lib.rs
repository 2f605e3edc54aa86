pub mod breakpoint;
pub mod types;

pub use breakpoint::{BREAKPOINTS, BreakpointRange};
pub use types::{Orientation, ScreenMetrics};
