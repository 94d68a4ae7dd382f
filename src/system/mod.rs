pub mod collector;
pub mod network;
pub mod sampler;
