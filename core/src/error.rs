use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Invalid grid dimensions: {rows}x{cols}")]
    InvalidGrid { rows: usize, cols: usize },

    #[error("tick() called on paused engine at tick {tick}")]
    EnginePaused { tick: u64 },
}

pub type SimResult<T> = Result<T, SimError>;
