pub mod convert;
pub mod draw;
pub mod font;
pub mod surface;
