pub mod blocks;
pub mod hour;
pub mod model;
pub mod ranges;
pub mod selection;
