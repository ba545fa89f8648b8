//! Training loop.

pub use crate::{
    dataset::{CyclicLoader, MnistBatch},
    error::Error,
    model::VqAutoEncoder,
};
pub use burn::{
    config::Config,
    tensor::backend::AutodiffBackend,
};

use burn::{
    data::dataloader::DataLoader,
    optim::{AdamWConfig, GradientsParams, Optimizer},
    tensor::{backend::Backend, ElementConversion, Tensor},
};

/// The configuration for [`train`].
#[derive(Config, Copy, Debug)]
pub struct TrainConfig {
    /// Number of optimization steps.
    #[config(default = 1000)]
    pub iterations: usize,
    /// AdamW learning rate.
    #[config(default = 3e-4)]
    pub learning_rate: f64,
    /// Weight of the commitment loss in the total loss.
    #[config(default = 10.0)]
    pub alpha: f32,
}

/// `loss_rec + alpha * loss_commit`
pub fn total_loss<B: Backend>(
    loss_rec: Tensor<B, 1>,
    loss_commit: Tensor<B, 1>,
    alpha: f32,
) -> Tensor<B, 1> {
    loss_rec + loss_commit.mul_scalar(alpha)
}

/// Optimizes the model on batches drawn endlessly from the data loader.
///
/// Each step minimizes the L1 reconstruction loss plus the weighted
/// commitment loss, then reports both losses and the codebook utilization
/// of the batch.
///
/// ## Details
///
/// The model is returned unchanged when
/// [`iterations`](TrainConfig::iterations) is zero.
pub fn train<B: AutodiffBackend>(
    mut model: VqAutoEncoder<B>,
    loader: &dyn DataLoader<B, MnistBatch<B>>,
    config: &TrainConfig,
) -> Result<VqAutoEncoder<B>, Error> {
    if config.learning_rate <= 0.0 {
        return Err(Error::Validation(
            "learning_rate".to_owned(),
            "positive".to_owned(),
        ));
    }
    if config.alpha < 0.0 {
        return Err(Error::Validation(
            "alpha".to_owned(),
            "non-negative".to_owned(),
        ));
    }

    let mut optim = AdamWConfig::new().init();
    let mut batches = CyclicLoader::new(loader);

    for iteration in 1..=config.iterations {
        let batch = batches.next_batch().ok_or(Error::EmptyDataLoader)?;

        let output = model.forward(batch.images.to_owned());
        let loss_rec = (output.reconstruction - batch.images).abs().mean();
        let loss = total_loss(
            loss_rec.to_owned(),
            output.loss_commit.to_owned(),
            config.alpha,
        );

        let grads = GradientsParams::from_grads(loss.backward(), &model);
        model = optim.step(config.learning_rate, model, grads);

        let usage = model.quantizer.usage(output.indices);
        log::info!(
            target: "vq_autoencoder::train",
            "iteration {iteration:>4}: rec loss {:.3} | commit loss {:.3} | active {usage:.3}%",
            loss_rec.into_scalar().elem::<f32>(),
            output.loss_commit.into_scalar().elem::<f32>(),
        );
    }

    Ok(model)
}
