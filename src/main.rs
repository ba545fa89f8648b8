//! Trains a vector-quantized autoencoder on handwritten digit images.
//!
//! Every hyperparameter is a fixed constant below. Progress is reported
//! once per optimization step:
//!
//! ```text
//! iteration   42: rec loss 0.213 | commit loss 0.035 | active 48.438%
//! ```

use burn::{
    data::{dataloader::DataLoaderBuilder, dataset::vision::MnistDataset},
    module::Module,
};
use vq_autoencoder::{
    backend::{Autodiff, Backend, Wgpu},
    dataset::MnistBatcher,
    error::Error,
    model::VqAutoEncoderConfig,
    train::{train, TrainConfig},
};

type B = Autodiff<Wgpu>;

const ALPHA: f32 = 10.0;
const BATCH_SIZE: usize = 256;
const CODEBOOK_SIZE: usize = 256;
const LEARNING_RATE: f64 = 3e-4;
const SEED: u64 = 1234;
const TRAIN_ITERATIONS: usize = 1000;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("vq_autoencoder=info")
        .init();

    B::seed(SEED);
    let device = Default::default();

    let loader = DataLoaderBuilder::new(MnistBatcher)
        .batch_size(BATCH_SIZE)
        .shuffle(SEED)
        .build(MnistDataset::train());

    let model = VqAutoEncoderConfig::new()
        .with_codebook_size(CODEBOOK_SIZE)
        .init::<B>(&device);
    log::info!(
        target: "vq_autoencoder::main",
        "model parameters: {} ({})",
        model.num_params(),
        model.size_readable(),
    );

    let config = TrainConfig::new()
        .with_iterations(TRAIN_ITERATIONS)
        .with_learning_rate(LEARNING_RATE)
        .with_alpha(ALPHA);
    train(model, &*loader, &config)?;

    Ok(())
}
