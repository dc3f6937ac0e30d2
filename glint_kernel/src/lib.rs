pub mod core;
pub mod shared;
pub mod surface;
