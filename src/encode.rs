pub mod codec;
pub mod driver;
pub mod frame;
pub mod packet;
