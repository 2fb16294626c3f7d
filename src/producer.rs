use log::{debug, trace};

use crate::cluster_sequence::ClusterSequence;
use crate::config::Parameters;
use crate::error::{ConfigurationError, InputError};
use crate::filter::Subjet;
use crate::jets::FatJet;
use crate::momentum::FourMomentum;

/// Fat jets and their subjets found in one event
///
/// Constituent indices refer to the input slice passed to the producer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilteredJets {
    pub fat_jets: Vec<FatJet>,
    pub subjets: Vec<Subjet>,
}

/// Clusters fat jets and decomposes them into subjets
///
/// The producer holds no per-event state and can be shared between
/// threads.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SubjetFilterJetProducer {
    params: Parameters,
}

impl SubjetFilterJetProducer {
    pub fn new(params: Parameters) -> Result<Self, ConfigurationError> {
        params.validate()?;
        debug!("Subjet filter parameters: {params:?}");
        Ok(Self { params })
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Subjets of all selected fat jets
    pub fn produce(&self, constituents: &[FourMomentum]) -> Result<Vec<Subjet>, InputError> {
        self.produce_jets(constituents).map(|jets| jets.subjets)
    }

    pub fn produce_jets(&self, constituents: &[FourMomentum]) -> Result<FilteredJets, InputError> {
        if let Some(index) = constituents.iter().position(|p| !p.is_finite()) {
            return Err(InputError::NonFiniteMomentum {
                index,
                momentum: constituents[index],
            });
        }
        let selected = self.select_inputs(constituents);
        let inputs = Vec::from_iter(selected.iter().map(|&i| constituents[i]));

        let seq = ClusterSequence::new(inputs, self.params.jet_definition());
        let mut fat_jets = self.params.fat_jet_extractor().extract(&seq);
        let mut subjets = self.params.subjet_filter().filter_all(&seq, &fat_jets);
        debug!(
            "Found {} subjets in {} fat jets",
            subjets.len(),
            fat_jets.len()
        );

        // translate to indices in the original input
        for jet in &mut fat_jets {
            to_input_indices(&mut jet.constituents, &selected);
        }
        for subjet in &mut subjets {
            to_input_indices(&mut subjet.constituents, &selected);
        }
        Ok(FilteredJets { fat_jets, subjets })
    }

    // indices of the inputs passing the energy cuts, limited to
    // `max_inputs`; cuts of zero accept everything
    fn select_inputs(&self, constituents: &[FourMomentum]) -> Vec<usize> {
        let Parameters {
            input_et_min,
            input_e_min,
            max_inputs,
            ..
        } = self.params;
        let accepted = constituents
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                (input_et_min <= 0. || p.et() >= input_et_min)
                    && (input_e_min <= 0. || p.e() >= input_e_min)
            })
            .map(|(i, _)| i);
        let selected: Vec<_> = if max_inputs > 0 {
            accepted.take(max_inputs).collect()
        } else {
            accepted.collect()
        };
        if selected.len() < constituents.len() {
            trace!(
                "Selected {} of {} inputs",
                selected.len(),
                constituents.len()
            );
        }
        selected
    }
}

fn to_input_indices(constituents: &mut [usize], selected: &[usize]) {
    for idx in constituents {
        *idx = selected[*idx];
    }
}
