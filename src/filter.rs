use log::trace;
use serde::{Deserialize, Serialize};

use crate::cluster_sequence::ClusterSequence;
use crate::jets::FatJet;
use crate::momentum::FourMomentum;

/// Properties of the splitting that produced a subjet
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Split {
    /// Mass ratio `M1 / M` of the heavier child and the parent
    pub mass_drop: f64,
    /// Asymmetry `min(pt1², pt2²) ΔR² / M²`
    pub asymmetry: f64,
    /// Angular distance between the two children
    pub delta_r: f64,
    /// Whether the asymmetry cut was satisfied
    pub passed_asymmetry: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Subjet {
    pub momentum: FourMomentum,
    /// Index of the fat jet this subjet was found in
    pub fat_jet: usize,
    /// `None` if the fat jet could not be split
    pub split: Option<Split>,
    /// Indices of the clustered inputs
    pub constituents: Vec<usize>,
}

/// Mass-drop and asymmetry criteria for finding hard splittings
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SubjetFilter {
    pub mass_drop_cut: f64,
    pub asymm_cut: f64,
    /// Only check the asymmetry once the mass drop is found
    pub asymm_cut_later: bool,
}

enum Decision {
    Accept { passed_asymmetry: bool },
    Descend,
}

impl SubjetFilter {
    pub fn new(mass_drop_cut: f64, asymm_cut: f64, asymm_cut_later: bool) -> Self {
        Self {
            mass_drop_cut,
            asymm_cut,
            asymm_cut_later,
        }
    }

    /// Decompose a fat jet into subjets
    ///
    /// Walks down the clustering history of the fat jet, always
    /// following the heavier child, until a splitting passes the cuts.
    /// The two children of that splitting are returned, heavier one
    /// first. If no splitting passes, the fat jet itself is the only
    /// subjet.
    pub fn filter(
        &self,
        seq: &ClusterSequence,
        fat_jet: &FatJet,
        fat_jet_idx: usize,
    ) -> Vec<Subjet> {
        let mut node = fat_jet.node;
        while let Some((c1, c2)) = seq.children(node) {
            let m1 = seq.nodes()[c1].momentum();
            let m2 = seq.nodes()[c2].momentum();
            let (heavy, light) = if m2.m() > m1.m() { (c2, c1) } else { (c1, c2) };
            let parent = seq.nodes()[node].momentum();
            let p1 = seq.nodes()[heavy].momentum();
            let p2 = seq.nodes()[light].momentum();

            let split = split_properties(parent, p1, p2);
            let mass_drop_ok = split.mass_drop < self.mass_drop_cut;
            let asymmetry_ok = split.asymmetry > self.asymm_cut;
            trace!(
                "Node {node}: mass drop {}, asymmetry {}",
                split.mass_drop,
                split.asymmetry
            );
            match self.decide(mass_drop_ok, asymmetry_ok) {
                Decision::Accept { passed_asymmetry } => {
                    let split = Split {
                        passed_asymmetry,
                        ..split
                    };
                    return [heavy, light]
                        .into_iter()
                        .map(|idx| Subjet {
                            momentum: *seq.nodes()[idx].momentum(),
                            fat_jet: fat_jet_idx,
                            split: Some(split),
                            constituents: seq.constituents(idx),
                        })
                        .collect();
                }
                Decision::Descend => node = heavy,
            }
        }
        trace!("No hard splitting in fat jet {fat_jet_idx}");
        vec![Subjet {
            momentum: fat_jet.momentum,
            fat_jet: fat_jet_idx,
            split: None,
            constituents: fat_jet.constituents.clone(),
        }]
    }

    /// Subjets of all fat jets, concatenated in fat jet order
    pub fn filter_all(&self, seq: &ClusterSequence, fat_jets: &[FatJet]) -> Vec<Subjet> {
        fat_jets
            .iter()
            .enumerate()
            .flat_map(|(idx, jet)| self.filter(seq, jet, idx))
            .collect()
    }

    fn decide(&self, mass_drop_ok: bool, asymmetry_ok: bool) -> Decision {
        match (mass_drop_ok, asymmetry_ok) {
            (false, _) => Decision::Descend,
            (true, true) => Decision::Accept {
                passed_asymmetry: true,
            },
            (true, false) if self.asymm_cut_later => Decision::Accept {
                passed_asymmetry: false,
            },
            (true, false) => Decision::Descend,
        }
    }
}

fn split_properties(
    parent: &FourMomentum,
    heavy: &FourMomentum,
    light: &FourMomentum,
) -> Split {
    let m = parent.m();
    let delta_r2 = heavy.delta_r2(light);
    // a massless parent has no meaningful mass drop
    let (mass_drop, asymmetry) = if m > 0. {
        let min_pt2 = heavy.pt2().min(light.pt2());
        (heavy.m() / m, min_pt2 * delta_r2 / (m * m))
    } else {
        (f64::INFINITY, 0.)
    };
    Split {
        mass_drop,
        asymmetry,
        delta_r: delta_r2.sqrt(),
        passed_asymmetry: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jets::{extract_fat_jets, JetAlgorithm, JetDefinition};

    fn ca(radius: f64) -> JetDefinition {
        JetDefinition {
            algorithm: JetAlgorithm::CambridgeAachen,
            radius,
        }
    }

    fn filter_event(inputs: Vec<FourMomentum>, filter: SubjetFilter) -> Vec<Subjet> {
        let seq = ClusterSequence::new(inputs, ca(1.2));
        let fat_jets = extract_fat_jets(&seq, 0);
        filter.filter_all(&seq, &fat_jets)
    }

    #[test]
    fn single_constituent_is_not_split() {
        let p = FourMomentum::from_pt_eta_phi(50., 0.3, 1.);
        let subjets = filter_event(vec![p], SubjetFilter::new(0.667, 0.3, false));
        assert_eq!(subjets.len(), 1);
        assert_eq!(subjets[0].momentum, p);
        assert_eq!(subjets[0].split, None);
        assert_eq!(subjets[0].constituents, vec![0]);
    }

    #[test]
    fn massless_pair_is_not_split() {
        // collinear massless momenta have a massless sum
        let p1 = FourMomentum::new(10., 0., 0., 10.);
        let p2 = FourMomentum::new(20., 0., 0., 20.);
        let subjets = filter_event(vec![p1, p2], SubjetFilter::new(0.667, 0.3, false));
        assert_eq!(subjets.len(), 1);
        assert_eq!(subjets[0].split, None);
        assert_eq!(subjets[0].constituents, vec![0, 1]);
    }

    #[test]
    fn symmetric_split() {
        let p1 = FourMomentum::from_pt_eta_phi(100., 0., 0.);
        let p2 = FourMomentum::from_pt_eta_phi(100., 0., 0.5);
        let subjets = filter_event(vec![p1, p2], SubjetFilter::new(0.667, 0.3, false));
        assert_eq!(subjets.len(), 2);
        let split = subjets[0].split.unwrap();
        // massless children
        assert!(split.mass_drop.abs() < 1e-6);
        assert!(split.asymmetry > 0.3);
        assert!(split.passed_asymmetry);
        assert!((split.delta_r - 0.5).abs() < 1e-9);
    }

    #[test]
    fn soft_splitting_is_skipped() {
        // two hard massive prongs plus a soft wide-angle emission that
        // is clustered last
        let a = FourMomentum::from_pt_eta_phi_m(100., 0., 0., 10.);
        let b = FourMomentum::from_pt_eta_phi_m(100., 0., 0.4, 10.);
        let soft = FourMomentum::from_pt_eta_phi(0.5, 0., 1.1);
        let subjets = filter_event(vec![a, b, soft], SubjetFilter::new(0.667, 0.3, false));
        assert_eq!(subjets.len(), 2);
        let mut constituents = Vec::from_iter(
            subjets.iter().flat_map(|s| s.constituents.iter().copied()),
        );
        constituents.sort_unstable();
        assert_eq!(constituents, vec![0, 1]);
    }

    #[test]
    fn asymmetry_cut_later_flags() {
        // very asymmetric hard splitting
        let a = FourMomentum::from_pt_eta_phi_m(200., 0., 0., 10.);
        let b = FourMomentum::from_pt_eta_phi_m(2., 0., 0.5, 1.);

        let strict = filter_event(vec![a, b], SubjetFilter::new(0.667, 0.3, false));
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].split, None);

        let later = filter_event(vec![a, b], SubjetFilter::new(0.667, 0.3, true));
        assert_eq!(later.len(), 2);
        let split = later[0].split.unwrap();
        assert!(split.mass_drop < 0.667);
        assert!(split.asymmetry < 0.3);
        assert!(!split.passed_asymmetry);
        assert_eq!(later[0].constituents, vec![0]);
        assert_eq!(later[1].constituents, vec![1]);
    }
}
