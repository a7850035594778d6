pub mod location;
pub mod orientation;
