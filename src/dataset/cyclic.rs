//! Cyclic batch stream.

pub use super::*;

use burn::data::dataloader::{DataLoader, DataLoaderIterator};

/// Endless batch stream over a data loader.
///
/// Iteration silently restarts from the beginning whenever the underlying
/// iterator is exhausted. There is no epoch boundary.
pub struct CyclicLoader<'l, B: Backend, O> {
    loader: &'l dyn DataLoader<B, O>,
    batches: Box<dyn DataLoaderIterator<O> + 'l>,
}

impl<'l, B: Backend, O> CyclicLoader<'l, B, O> {
    /// Start streaming from the first batch.
    pub fn new(loader: &'l dyn DataLoader<B, O>) -> Self {
        let batches = loader.iter();
        Self { loader, batches }
    }

    /// The next batch, wrapping around at the end of the dataset.
    ///
    /// Returns `None` only if the loader yields no batches at all.
    pub fn next_batch(&mut self) -> Option<O> {
        match self.batches.next() {
            Some(batch) => Some(batch),
            None => {
                self.batches = self.loader.iter();
                self.batches.next()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn wraparound() {
        use super::*;
        use burn::{
            backend::NdArray,
            data::{
                dataloader::{DataLoader, DataLoaderBuilder},
                dataset::InMemDataset,
            },
        };
        use rand::{rngs::StdRng, SeedableRng};
        use rand_distr::{Distribution, Normal};
        use std::sync::Arc;

        type B = NdArray<f32>;

        let mut rng = StdRng::seed_from_u64(0x5EED);
        let noise =
            Normal::new(127.5, 40.0).expect("The standard deviation is finite");
        let items = (0..5)
            .map(|index| {
                let mut image = [[0.0_f32; 28]; 28];
                for row in image.iter_mut() {
                    for pixel in row.iter_mut() {
                        *pixel = noise.sample(&mut rng).clamp(0.0, 255.0);
                    }
                }
                MnistItem {
                    image,
                    label: index as u8,
                }
            })
            .collect::<Vec<_>>();

        let loader: Arc<dyn DataLoader<B, MnistBatch<B>>> =
            DataLoaderBuilder::new(MnistBatcher)
                .batch_size(2)
                .build(InMemDataset::new(items));

        let mut batches = CyclicLoader::new(&*loader);

        // 5 items in batches of 2 give 3 batches per pass.
        for _ in 0..8 {
            let batch = batches.next_batch().expect("The dataset is not empty");
            assert!(batch.images.dims()[0] > 0);
        }
    }
}
