//! Image batching.

pub use super::*;
pub use burn::data::dataset::vision::MnistItem;

use burn::{
    data::dataloader::batcher::Batcher,
    tensor::{ElementConversion, TensorData},
};

/// Collates raw image items into normalized batches.
#[derive(Clone, Copy, Debug, Default)]
pub struct MnistBatcher;

/// A batch of images with their labels.
#[derive(Clone, Debug)]
pub struct MnistBatch<B: Backend> {
    /// Images normalized to `[-1.0, 1.0]`. `[B, 1, 28, 28]`
    pub images: Tensor<B, 4>,
    /// Digit labels. `[B]`
    pub targets: Tensor<B, 1, Int>,
}

impl<B: Backend> Batcher<B, MnistItem, MnistBatch<B>> for MnistBatcher {
    fn batch(
        &self,
        items: Vec<MnistItem>,
        device: &B::Device,
    ) -> MnistBatch<B> {
        // [B, 1, 28, 28]
        let images = items
            .iter()
            .map(|item| TensorData::from(item.image).convert::<B::FloatElem>())
            .map(|data| Tensor::<B, 2>::from_data(data, device))
            .map(|tensor| tensor.reshape([1, 1, 28, 28]))
            .map(|tensor| tensor.div_scalar(255.0).sub_scalar(0.5).div_scalar(0.5))
            .collect::<Vec<_>>();
        let images = Tensor::cat(images, 0);

        // [B]
        let targets = items
            .iter()
            .map(|item| {
                Tensor::<B, 1, Int>::from_data(
                    [(item.label as i64).elem::<B::IntElem>()],
                    device,
                )
            })
            .collect::<Vec<_>>();
        let targets = Tensor::cat(targets, 0);

        MnistBatch { images, targets }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn batch() {
        use super::*;
        use burn::{backend::NdArray, data::dataloader::batcher::Batcher};

        type B = NdArray<f32>;
        let device = Default::default();

        let items = vec![
            MnistItem {
                image: [[0.0; 28]; 28],
                label: 3,
            },
            MnistItem {
                image: [[255.0; 28]; 28],
                label: 7,
            },
        ];
        let batch: MnistBatch<B> = MnistBatcher.batch(items, &device);

        assert_eq!(batch.images.dims(), [2, 1, 28, 28]);
        assert_eq!(batch.targets.dims(), [2]);

        let min = batch.images.to_owned().min().into_scalar();
        let max = batch.images.max().into_scalar();
        assert_eq!(min, -1.0);
        assert_eq!(max, 1.0);

        batch.targets.into_data().assert_eq(
            &Tensor::<B, 1, Int>::from_data([3, 7], &device).into_data(),
            true,
        );
    }
}
