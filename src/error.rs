use thiserror::Error;

pub type PieResult<T> = Result<T, PieError>;

#[derive(Debug, Error)]
pub enum PieError {
    #[error("invalid plot area: width={width}, height={height}")]
    InvalidPlotArea { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
