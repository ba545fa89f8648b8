//! Downsampling encoder.

pub use super::*;
pub use burn::nn::{conv::Conv2d, pool::MaxPool2d, Gelu};

use burn::nn::{conv::Conv2dConfig, pool::MaxPool2dConfig, PaddingConfig2d};

/// The configuration for [`Encoder`].
#[derive(Config, Copy, Debug)]
pub struct EncoderConfig {
    /// Image channels.
    #[config(default = 1)]
    pub channels_image: usize,
    /// Hidden feature channels.
    #[config(default = 16)]
    pub channels_hidden: usize,
    /// Latent feature channels.
    #[config(default = 32)]
    pub channels_latent: usize,
}

/// Convolutional encoder using two convolution and max-pool blocks.
///
/// Each block halves the spatial sides.
#[derive(Debug, Module)]
pub struct Encoder<B: Backend> {
    /// The 1st convolution.
    pub conv1: Conv2d<B>,
    /// The 1st max-pool.
    pub pool1: MaxPool2d,
    /// The activation.
    pub ac1: Gelu,
    /// The 2nd convolution.
    pub conv2: Conv2d<B>,
    /// The 2nd max-pool.
    pub pool2: MaxPool2d,
}

impl EncoderConfig {
    /// Initialize from the configuration.
    pub fn init<B: Backend>(
        &self,
        device: &B::Device,
    ) -> Encoder<B> {
        let conv1 =
            Conv2dConfig::new([self.channels_image, self.channels_hidden], [3, 3])
                .with_padding(PaddingConfig2d::Explicit(1, 1))
                .init(device);
        let pool1 = MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init();
        let ac1 = Gelu::new();
        let conv2 =
            Conv2dConfig::new([self.channels_hidden, self.channels_latent], [3, 3])
                .with_padding(PaddingConfig2d::Explicit(1, 1))
                .init(device);
        let pool2 = MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init();
        Encoder {
            conv1,
            pool1,
            ac1,
            conv2,
            pool2,
        }
    }
}

impl<B: Backend> Encoder<B> {
    /// Applies the forward pass on the input tensor.
    ///
    /// ## Shapes
    ///
    /// * `input` - `[B, C_image, H, W]`
    /// * `output` - `[B, C_latent, H / 4, W / 4]`
    pub fn forward(
        &self,
        mut input: Tensor<B, 4>,
    ) -> Tensor<B, 4> {
        input = self.conv1.forward(input);
        input = self.pool1.forward(input);
        input = self.ac1.forward(input);
        input = self.conv2.forward(input);
        input = self.pool2.forward(input);
        input
    }
}

impl Default for EncoderConfig {
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

        let encoder = EncoderConfig::default().init::<B>(device);
        let input =
            Tensor::<B, 4>::random([2, 1, 28, 28], Distribution::Default, device);
        let output = encoder.forward(input);

        assert_eq!(output.dims(), [2, 32, 7, 7]);
    }
}
