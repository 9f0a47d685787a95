pub mod buffers;
pub mod describe;
pub mod model;
pub mod normalize;
