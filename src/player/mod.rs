pub mod controller;
pub mod fps;
pub mod offline;
pub mod surface;
