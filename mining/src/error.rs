use thiserror::Error;

#[derive(Error, Debug)]
pub enum MiningError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed csv record: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Graph(#[from] eddy_core::GraphError),

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
}
