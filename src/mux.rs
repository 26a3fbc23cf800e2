pub mod container;
pub mod elementary;
pub mod muxer;
