pub mod availability;
pub mod grid;
pub mod planner;
pub mod render;
