//! Upsampling decoder.

pub use super::*;
pub use burn::nn::{conv::Conv2d, interpolate::Interpolate2d, Gelu};

use burn::nn::{
    conv::Conv2dConfig,
    interpolate::{Interpolate2dConfig, InterpolateMode},
    PaddingConfig2d,
};

/// The configuration for [`Decoder`].
#[derive(Config, Copy, Debug)]
pub struct DecoderConfig {
    /// Latent feature channels.
    #[config(default = 32)]
    pub channels_latent: usize,
    /// Hidden feature channels.
    #[config(default = 16)]
    pub channels_hidden: usize,
    /// Image channels.
    #[config(default = 1)]
    pub channels_image: usize,
}

/// Convolutional decoder using two nearest-upsample and convolution blocks.
///
/// Each block doubles the spatial sides.
#[derive(Debug, Module)]
pub struct Decoder<B: Backend> {
    /// The 1st upsample.
    pub up1: Interpolate2d,
    /// The 1st convolution.
    pub conv1: Conv2d<B>,
    /// The activation.
    pub ac1: Gelu,
    /// The 2nd upsample.
    pub up2: Interpolate2d,
    /// The 2nd convolution.
    pub conv2: Conv2d<B>,
}

impl DecoderConfig {
    /// Initialize from the configuration.
    pub fn init<B: Backend>(
        &self,
        device: &B::Device,
    ) -> Decoder<B> {
        let up1 = Interpolate2dConfig::new()
            .with_scale_factor(Some([2.0, 2.0]))
            .with_mode(InterpolateMode::Nearest)
            .init();
        let conv1 =
            Conv2dConfig::new([self.channels_latent, self.channels_hidden], [3, 3])
                .with_padding(PaddingConfig2d::Explicit(1, 1))
                .init(device);
        let ac1 = Gelu::new();
        let up2 = Interpolate2dConfig::new()
            .with_scale_factor(Some([2.0, 2.0]))
            .with_mode(InterpolateMode::Nearest)
            .init();
        let conv2 =
            Conv2dConfig::new([self.channels_hidden, self.channels_image], [3, 3])
                .with_padding(PaddingConfig2d::Explicit(1, 1))
                .init(device);
        Decoder {
            up1,
            conv1,
            ac1,
            up2,
            conv2,
        }
    }
}

impl<B: Backend> Decoder<B> {
    /// Applies the forward pass on the input tensor.
    ///
    /// ## Shapes
    ///
    /// * `input` - `[B, C_latent, H / 4, W / 4]`
    /// * `output` - `[B, C_image, H, W]`
    pub fn forward(
        &self,
        mut input: Tensor<B, 4>,
    ) -> Tensor<B, 4> {
        input = self.up1.forward(input);
        input = self.conv1.forward(input);
        input = self.ac1.forward(input);
        input = self.up2.forward(input);
        input = self.conv2.forward(input);
        input
    }
}

impl Default for DecoderConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
