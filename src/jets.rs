use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::cluster_sequence::ClusterSequence;
use crate::error::ConfigurationError;
use crate::momentum::FourMomentum;

#[derive(
    Display,
    EnumIter,
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Deserialize,
    Serialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum JetAlgorithm {
    /// The [Cambridge](https://arxiv.org/abs/hep-ph/9707323)/[Aachen](https://arxiv.org/abs/hep-ph/9907280) algorithm
    #[default]
    #[strum(to_string = "CambridgeAachen")]
    CambridgeAachen,
}

impl FromStr for JetAlgorithm {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CambridgeAachen" | "Cambridge/Aachen" | "Cambridge-Aachen"
            | "Cambridge_Aachen" | "cambridge/aachen" | "cambridge-aachen"
            | "cambridge_aachen" | "ca" | "CA" => Ok(Self::CambridgeAachen),
            "AntiKt" | "anti-kt" | "antikt" | "anti_kt" | "Kt" | "kt" => Err(
                ConfigurationError::UnsupportedJetAlgorithm(s.to_string()),
            ),
            _ => Err(ConfigurationError::UnknownJetAlgorithm(s.to_string())),
        }
    }
}

impl TryFrom<String> for JetAlgorithm {
    type Error = ConfigurationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<JetAlgorithm> for String {
    fn from(algo: JetAlgorithm) -> Self {
        algo.to_string()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct JetDefinition {
    pub algorithm: JetAlgorithm,
    pub radius: f64,
}

/// A jet found by the clustering, with a reference to its node in
/// the cluster sequence
#[derive(Clone, Debug, PartialEq)]
pub struct FatJet {
    pub momentum: FourMomentum,
    /// Index of the corresponding node in the [ClusterSequence]
    pub node: usize,
    /// Indices of the clustered inputs
    pub constituents: Vec<usize>,
}

impl FatJet {
    pub fn from_node(seq: &ClusterSequence, node: usize) -> Option<Self> {
        let momentum = *seq.node(node)?.momentum();
        Some(Self {
            momentum,
            node,
            constituents: seq.constituents(node),
        })
    }
}

/// Selects the fat jets passed on to subjet filtering
#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct FatJetExtractor {
    /// Minimum transverse momentum
    pub pt_min: f64,
    /// Maximum number of jets, 0 means no limit
    pub n_fat_max: usize,
}

impl FatJetExtractor {
    pub fn new(pt_min: f64, n_fat_max: usize) -> Self {
        Self { pt_min, n_fat_max }
    }

    /// Inclusive jets ordered by decreasing transverse momentum
    ///
    /// At most `n_fat_max` jets are returned if it is non-zero,
    /// softer jets are dropped.
    pub fn extract(&self, seq: &ClusterSequence) -> Vec<FatJet> {
        let mut nodes = seq.inclusive_jets(self.pt_min);
        if self.n_fat_max > 0 && nodes.len() > self.n_fat_max {
            debug!(
                "Keeping {} of {} fat jets",
                self.n_fat_max,
                nodes.len()
            );
            nodes.truncate(self.n_fat_max);
        }
        nodes
            .into_iter()
            .filter_map(|node| FatJet::from_node(seq, node))
            .collect()
    }
}

/// All inclusive jets, truncated to the `n_fat_max` hardest ones if
/// `n_fat_max` is non-zero
pub fn extract_fat_jets(seq: &ClusterSequence, n_fat_max: usize) -> Vec<FatJet> {
    FatJetExtractor::new(0., n_fat_max).extract(seq)
}
