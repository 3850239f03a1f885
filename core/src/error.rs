use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModemError {
    #[error("no modulator registered under '{0}'")]
    UnknownModulator(String),

    #[error("no demodulator registered under '{0}'")]
    UnknownDemodulator(String),

    #[error("bit buffer length {0} is not a multiple of 8")]
    BitLength(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ModemError>;
