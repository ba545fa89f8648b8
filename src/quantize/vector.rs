//! Vector quantization.

pub use super::*;

use burn::nn::Initializer;
use std::collections::HashSet;

/// The configuration for [`VectorQuantize`].
#[derive(Config, Debug)]
pub struct VectorQuantizeConfig {
    /// Number of codebook entries.
    pub codebook_size: usize,
    /// Dimension of each codebook entry.
    pub dim: usize,
    /// Weight of the commitment term in the quantization loss.
    #[config(default = 0.25)]
    pub commitment_weight: f32,
    /// Codebook initializer.
    #[config(default = "Initializer::Normal{mean:0.0, std:1.0}")]
    pub initializer: Initializer,
}

/// Maps feature vectors to the nearest entries of a learned codebook.
///
/// ## Details
///
/// The assignment itself is not differentiable, so the quantized output is
/// routed through a straight-through estimator:
/// `output = input + (quantized - input).detach()`.
///
/// The codebook size is fixed at construction.
#[derive(Debug, Module)]
pub struct VectorQuantize<B: Backend> {
    /// The codebook. `[K, D]`
    pub codebook: Param<Tensor<B, 2>>,
    /// Weight of the commitment term in the quantization loss.
    pub commitment_weight: f32,
}

/// The output of [`VectorQuantize::forward`].
#[derive(Clone, Debug)]
pub struct VectorQuantizeOutput<B: Backend> {
    /// Quantized feature map. `[B, D, H, W]`
    pub quantized: Tensor<B, 4>,
    /// Selected codebook entries. `[B, H, W]`
    pub indices: Tensor<B, 3, Int>,
    /// Commitment loss. `[1]`
    pub loss: Tensor<B, 1>,
}

impl VectorQuantizeConfig {
    /// Initialize from the configuration.
    pub fn init<B: Backend>(
        &self,
        device: &B::Device,
    ) -> VectorQuantize<B> {
        let codebook = self
            .initializer
            .init([self.codebook_size, self.dim], device);
        VectorQuantize {
            codebook,
            commitment_weight: self.commitment_weight,
        }
    }
}

impl<B: Backend> VectorQuantize<B> {
    /// Number of codebook entries.
    #[inline]
    pub fn codebook_size(&self) -> usize {
        self.codebook.dims()[0]
    }

    /// Applies the forward pass on the input feature map.
    ///
    /// ## Shapes
    ///
    /// * `input` - `[B, D, H, W]`
    /// * [`quantized`](VectorQuantizeOutput::quantized) - `[B, D, H, W]`
    /// * [`indices`](VectorQuantizeOutput::indices) - `[B, H, W]`
    pub fn forward(
        &self,
        input: Tensor<B, 4>,
    ) -> VectorQuantizeOutput<B> {
        let [batch_size, channels, height, width] = input.dims();

        // [B * H * W, D]
        let features = input
            .permute([0, 2, 3, 1])
            .reshape([-1, channels as i32]);

        let (entries, indices) = self.nearest(features.to_owned());

        let loss_codebook = (entries.to_owned() - features.to_owned().detach())
            .powf_scalar(2.0)
            .mean();
        let loss_commit = (entries.to_owned().detach() - features.to_owned())
            .powf_scalar(2.0)
            .mean();
        let loss = loss_codebook + loss_commit.mul_scalar(self.commitment_weight);

        // Straight-through estimator.
        let quantized = features.to_owned() + (entries - features).detach();

        // [B, D, H, W]
        let quantized = quantized
            .reshape([batch_size, height, width, channels])
            .permute([0, 3, 1, 2]);

        // [B, H, W]
        let indices = indices.reshape([batch_size, height, width]);

        VectorQuantizeOutput {
            quantized,
            indices,
            loss,
        }
    }

    /// Nearest codebook entries by squared Euclidean distance.
    ///
    /// ## Shapes
    ///
    /// * `input` - `[N, D]`
    /// * output - (`[N, D]`, `[N]`)
    pub fn nearest(
        &self,
        input: Tensor<B, 2>,
    ) -> (Tensor<B, 2>, Tensor<B, 1, Int>) {
        // [K, D]
        let codebook = self.codebook.val();

        // [N, 1]
        let input_norm = input.to_owned().powf_scalar(2.0).sum_dim(1);
        // [1, K]
        let codebook_norm = codebook.to_owned().powf_scalar(2.0).sum_dim(1).transpose();
        // [N, K]
        let product = input.matmul(codebook.to_owned().transpose());
        // [N, K]
        let distances = input_norm + codebook_norm - product.mul_scalar(2.0);

        // [N]
        let indices: Tensor<B, 1, Int> = distances.argmin(1).squeeze(1);
        // [N, D]
        let entries = codebook.select(0, indices.to_owned());

        (entries, indices)
    }

    /// Share of the codebook referenced by `indices`, in percent.
    ///
    /// The result ranges from `0.0` to `100.0`.
    pub fn usage(
        &self,
        indices: Tensor<B, 3, Int>,
    ) -> f64 {
        let distinct = indices
            .into_data()
            .convert::<i64>()
            .iter::<i64>()
            .collect::<HashSet<_>>()
            .len();
        distinct as f64 / self.codebook_size() as f64 * 100.0
    }
}
