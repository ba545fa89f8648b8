#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Data Loader Error: no batches were yielded")]
    EmptyDataLoader,

    #[error("Validation Error: {0} should be {1}")]
    Validation(String, String),
}
