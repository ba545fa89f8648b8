//! Vector-quantized autoencoder.

pub mod decoder;
pub mod encoder;

pub use crate::quantize::{VectorQuantize, VectorQuantizeConfig};
pub use burn::{
    config::Config,
    module::{Module, Param},
    tensor::{backend::Backend, Int, Tensor},
};
pub use decoder::{Decoder, DecoderConfig};
pub use encoder::{Encoder, EncoderConfig};

use humansize::{format_size, BINARY};

/// The configuration for [`VqAutoEncoder`].
#[derive(Config, Copy, Debug)]
pub struct VqAutoEncoderConfig {
    /// Image channels.
    #[config(default = 1)]
    pub channels_image: usize,
    /// Hidden feature channels.
    #[config(default = 16)]
    pub channels_hidden: usize,
    /// Latent feature channels, matching the codebook entry dimension.
    #[config(default = 32)]
    pub channels_latent: usize,
    /// Number of codebook entries.
    #[config(default = 256)]
    pub codebook_size: usize,
    /// Weight of the commitment term in the quantization loss.
    #[config(default = 0.25)]
    pub commitment_weight: f32,
}

/// Autoencoder with a vector-quantization bottleneck.
#[derive(Debug, Module)]
pub struct VqAutoEncoder<B: Backend> {
    /// Downsampling encoder.
    pub encoder: Encoder<B>,
    /// Quantization bottleneck.
    pub quantizer: VectorQuantize<B>,
    /// Upsampling decoder.
    pub decoder: Decoder<B>,
}

/// The output of [`VqAutoEncoder::forward`].
#[derive(Clone, Debug)]
pub struct VqAutoEncoderOutput<B: Backend> {
    /// Reconstructed images in `[-1.0, 1.0]`. `[B, C, H, W]`
    pub reconstruction: Tensor<B, 4>,
    /// Selected codebook entries. `[B, H / 4, W / 4]`
    pub indices: Tensor<B, 3, Int>,
    /// Commitment loss. `[1]`
    pub loss_commit: Tensor<B, 1>,
}

impl VqAutoEncoderConfig {
    /// Initialize from the configuration.
    pub fn init<B: Backend>(
        &self,
        device: &B::Device,
    ) -> VqAutoEncoder<B> {
        let encoder = EncoderConfig::new()
            .with_channels_image(self.channels_image)
            .with_channels_hidden(self.channels_hidden)
            .with_channels_latent(self.channels_latent)
            .init(device);
        let quantizer =
            VectorQuantizeConfig::new(self.codebook_size, self.channels_latent)
                .with_commitment_weight(self.commitment_weight)
                .init(device);
        let decoder = DecoderConfig::new()
            .with_channels_latent(self.channels_latent)
            .with_channels_hidden(self.channels_hidden)
            .with_channels_image(self.channels_image)
            .init(device);
        VqAutoEncoder {
            encoder,
            quantizer,
            decoder,
        }
    }
}

impl<B: Backend> VqAutoEncoder<B> {
    /// Applies the forward pass on the input images.
    ///
    /// ## Shapes
    ///
    /// * `images` - `[B, C, H, W]`
    /// * [`reconstruction`](VqAutoEncoderOutput::reconstruction) - `[B, C, H, W]`
    /// * [`indices`](VqAutoEncoderOutput::indices) - `[B, H / 4, W / 4]`
    pub fn forward(
        &self,
        images: Tensor<B, 4>,
    ) -> VqAutoEncoderOutput<B> {
        let features = self.encoder.forward(images);
        let quantized = self.quantizer.forward(features);
        let reconstruction = self
            .decoder
            .forward(quantized.quantized)
            .clamp(-1.0, 1.0);

        VqAutoEncoderOutput {
            reconstruction,
            indices: quantized.indices,
            loss_commit: quantized.loss,
        }
    }

    /// Size of the parameters in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.num_params() * size_of::<B::FloatElem>()
    }

    /// Readable size of the parameters.
    #[inline]
    pub fn size_readable(&self) -> String {
        format_size(self.size(), BINARY.decimal_places(1))
    }
}

impl Default for VqAutoEncoderConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn forward() {
        use super::*;
        use burn::{backend::NdArray, tensor::Distribution};

        type B = NdArray<f32>;
        let device = &Default::default();

        let model = VqAutoEncoderConfig::new()
            .with_codebook_size(16)
            .init::<B>(device);
        let images = Tensor::<B, 4>::random(
            [3, 1, 28, 28],
            Distribution::Uniform(-1.0, 1.0),
            device,
        );
        let output = model.forward(images);

        assert_eq!(output.reconstruction.dims(), [3, 1, 28, 28]);
        assert_eq!(output.indices.dims(), [3, 7, 7]);
        assert_eq!(output.loss_commit.dims(), [1]);

        let max = output.reconstruction.to_owned().max().into_scalar();
        let min = output.reconstruction.min().into_scalar();
        assert!(max <= 1.0);
        assert!(min >= -1.0);
    }

    #[test]
    fn size() {
        use super::*;
        use burn::backend::NdArray;

        type B = NdArray<f32>;
        let device = &Default::default();

        let model = VqAutoEncoderConfig::default().init::<B>(device);

        assert_eq!(model.size(), model.num_params() * 4);
        assert!(!model.size_readable().is_empty());
    }
}
