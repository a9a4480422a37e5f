pub mod geometry;
pub mod layout;
