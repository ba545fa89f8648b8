//! Image dataset utilities.

pub mod batcher;
pub mod cyclic;

pub use batcher::{MnistBatch, MnistBatcher, MnistItem};
pub use burn::tensor::{backend::Backend, Int, Tensor};
pub use cyclic::CyclicLoader;
