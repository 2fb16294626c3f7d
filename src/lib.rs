//! Cambridge/Aachen fat jets with mass-drop subjet filtering
//!
//! Events are clustered into large-radius "fat" jets with the
//! Cambridge/Aachen algorithm. Each fat jet is then decomposed by
//! walking down its clustering history until a splitting with a
//! significant mass drop and a not too asymmetric momentum sharing
//! is found. The two prongs of that splitting are the subjets.
//!
//! ```
//! use subjet_filter::{FourMomentum, Parameters, SubjetFilterJetProducer};
//!
//! let producer = SubjetFilterJetProducer::new(
//!     Parameters::preset("caSubjetFilterPFJets")?
//! )?;
//! let event = [
//!     FourMomentum::from_pt_eta_phi(100., 0., 0.),
//!     FourMomentum::from_pt_eta_phi(100., 0., 0.5),
//! ];
//! let subjets = producer.produce(&event)?;
//! assert_eq!(subjets.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![warn(clippy::all, rust_2018_idioms)]

pub mod cluster_sequence;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod jets;
pub mod momentum;
pub mod producer;

pub use cluster_sequence::{ClusterNode, ClusterSequence};
pub use config::Parameters;
pub use error::{ConfigurationError, EventFileError, InputError};
pub use event::Event;
pub use filter::{Split, Subjet, SubjetFilter};
pub use jets::{extract_fat_jets, FatJet, FatJetExtractor, JetAlgorithm, JetDefinition};
pub use momentum::FourMomentum;
pub use producer::{FilteredJets, SubjetFilterJetProducer};
