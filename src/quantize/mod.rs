//! Vector quantization bottleneck.

pub mod vector;

pub use burn::{
    config::Config,
    module::{Module, Param},
    tensor::{backend::Backend, Int, Tensor},
};
pub use vector::{VectorQuantize, VectorQuantizeConfig, VectorQuantizeOutput};
