use thiserror::Error;

#[derive(Error, Debug)]
pub enum BurgersError {
    #[error("Invalid grid: nx={nx} (need >= 4), length={length} (need > 0)")]
    InvalidGrid { nx: usize, length: f64 },

    #[error("Factorization error: {0}")]
    Factorization(String),

    #[error("Invalid solver parameters: {0}")]
    InvalidParams(String),

    #[error("Field is not periodic-integrable: {0}")]
    NonPeriodic(String),

    #[error("Linear algebra error: {0}")]
    LinAlg(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type BurgersResult<T> = Result<T, BurgersError>;
