use std::path::PathBuf;

use thiserror::Error;

use crate::momentum::FourMomentum;

/// Invalid producer parameters, detected before any event is processed
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Jet radius parameter must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("Mass drop cut must be in (0, 1), got {0}")]
    MassDropCutOutOfRange(f64),

    #[error("Asymmetry cut must be in [0, 1), got {0}")]
    AsymmetryCutOutOfRange(f64),

    #[error("Input cut {name} must be non-negative, got {value}")]
    NegativeInputCut { name: &'static str, value: f64 },

    #[error("Minimum jet transverse momentum must be non-negative, got {0}")]
    NegativeJetPtMin(f64),

    #[error("Unknown jet algorithm: {0}")]
    UnknownJetAlgorithm(String),

    #[error("Jet algorithm {0} is not supported for subjet filtering")]
    UnsupportedJetAlgorithm(String),

    #[error("Unknown parameter preset: {0}")]
    UnknownPreset(String),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Malformed event input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Constituent {index} has non-finite momentum {momentum}")]
    NonFiniteMomentum { index: usize, momentum: FourMomentum },
}

/// Malformed event file
#[derive(Error, Debug)]
pub enum EventFileError {
    #[error("Line {line}: expected four momentum components `px py pz E`, got {content:?}")]
    WrongComponentCount { line: usize, content: String },

    #[error("Line {line}: failed to parse {content:?} as a number")]
    BadNumber { line: usize, content: String },

    #[error("Failed to read event file: {0}")]
    Io(#[from] std::io::Error),
}
