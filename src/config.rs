//! Producer parameters
//!
//! [Parameters] uses the option names of the original jet producer
//! configuration when (de)serialised, e.g. in YAML:
//!
//! ```yaml
//! jetAlgorithm: CambridgeAachen
//! rParam: 1.2
//! massDropCut: 0.667
//! asymmCut: 0.3
//! asymmCutLater: true   # optional, default: false
//! nFatMax: 2            # optional, default: 0 (no limit)
//! inputEtMin: 0.0       # optional
//! inputEMin: 0.0        # optional
//! jetPtMin: 0.0         # optional
//! maxInputs: 0          # optional, default: 0 (no limit)
//! ```
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::filter::SubjetFilter;
use crate::jets::{FatJetExtractor, JetAlgorithm, JetDefinition};

#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    #[serde(default)]
    pub jet_algorithm: JetAlgorithm,
    /// Jet radius
    pub r_param: f64,
    pub mass_drop_cut: f64,
    pub asymm_cut: f64,
    /// Apply the asymmetry cut only after the mass drop has been found
    #[serde(default)]
    pub asymm_cut_later: bool,
    /// Maximum number of fat jets to filter, 0 means no limit
    #[serde(default)]
    pub n_fat_max: usize,
    /// Minimum transverse energy of inputs
    #[serde(default)]
    pub input_et_min: f64,
    /// Minimum energy of inputs
    #[serde(default)]
    pub input_e_min: f64,
    /// Minimum fat jet transverse momentum
    #[serde(default)]
    pub jet_pt_min: f64,
    /// Only cluster the first `max_inputs` inputs, 0 means no limit
    #[serde(default)]
    pub max_inputs: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        CA_SUBJET_FILTER_CALO_JETS
    }
}

impl Parameters {
    /// Check that all parameters are in their allowed ranges
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        use ConfigurationError::*;
        // negated comparisons also reject NaN
        if !(self.r_param > 0.) || !self.r_param.is_finite() {
            return Err(NonPositiveRadius(self.r_param));
        }
        if !(self.mass_drop_cut > 0. && self.mass_drop_cut < 1.) {
            return Err(MassDropCutOutOfRange(self.mass_drop_cut));
        }
        if !(self.asymm_cut >= 0. && self.asymm_cut < 1.) {
            return Err(AsymmetryCutOutOfRange(self.asymm_cut));
        }
        for (name, value) in [
            ("inputEtMin", self.input_et_min),
            ("inputEMin", self.input_e_min),
        ] {
            if !(value >= 0.) {
                return Err(NegativeInputCut { name, value });
            }
        }
        if !(self.jet_pt_min >= 0.) {
            return Err(NegativeJetPtMin(self.jet_pt_min));
        }
        Ok(())
    }

    /// Parameters of a named preset
    pub fn preset(name: &str) -> Result<Self, ConfigurationError> {
        PRESETS
            .get(name)
            .copied()
            .ok_or_else(|| ConfigurationError::UnknownPreset(name.to_owned()))
    }

    /// Names of all presets
    pub fn preset_names() -> impl Iterator<Item = &'static str> {
        PRESETS.keys().copied()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigurationError> {
        let params: Self = serde_yaml::from_str(yaml)?;
        params.validate()?;
        Ok(params)
    }

    /// Load and validate parameters from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigurationError> {
        debug!("Reading parameters from {path:?}");
        let file = File::open(path).map_err(|source| ConfigurationError::Io {
            path: path.to_owned(),
            source,
        })?;
        let params: Self = serde_yaml::from_reader(BufReader::new(file))?;
        params.validate()?;
        Ok(params)
    }

    pub fn jet_definition(&self) -> JetDefinition {
        JetDefinition {
            algorithm: self.jet_algorithm,
            radius: self.r_param,
        }
    }

    pub fn fat_jet_extractor(&self) -> FatJetExtractor {
        FatJetExtractor::new(self.jet_pt_min, self.n_fat_max)
    }

    pub fn subjet_filter(&self) -> SubjetFilter {
        SubjetFilter::new(self.mass_drop_cut, self.asymm_cut, self.asymm_cut_later)
    }
}

/// Subjet filtering for calorimeter tower inputs
pub const CA_SUBJET_FILTER_CALO_JETS: Parameters = Parameters {
    jet_algorithm: JetAlgorithm::CambridgeAachen,
    r_param: 1.2,
    mass_drop_cut: 0.667,
    asymm_cut: 0.3,
    asymm_cut_later: false,
    n_fat_max: 0,
    input_et_min: 0.,
    input_e_min: 0.,
    jet_pt_min: 0.,
    max_inputs: 0,
};

/// Subjet filtering for particle-flow inputs, limited to the two
/// hardest fat jets
pub const CA_SUBJET_FILTER_PF_JETS: Parameters = Parameters {
    n_fat_max: 2,
    asymm_cut_later: true,
    ..CA_SUBJET_FILTER_CALO_JETS
};

lazy_static! {
    static ref PRESETS: BTreeMap<&'static str, Parameters> = BTreeMap::from([
        ("caSubjetFilterCaloJets", CA_SUBJET_FILTER_CALO_JETS),
        ("caSubjetFilterPFJets", CA_SUBJET_FILTER_PF_JETS),
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for name in Parameters::preset_names() {
            Parameters::preset(name).unwrap().validate().unwrap();
        }
    }

    #[test]
    fn pf_preset() {
        let pf = Parameters::preset("caSubjetFilterPFJets").unwrap();
        let calo = Parameters::preset("caSubjetFilterCaloJets").unwrap();
        assert_eq!(pf.n_fat_max, 2);
        assert!(pf.asymm_cut_later);
        assert_eq!(calo.n_fat_max, 0);
        assert!(!calo.asymm_cut_later);
        for p in [pf, calo] {
            assert_eq!(p.jet_algorithm, JetAlgorithm::CambridgeAachen);
            assert_eq!(p.r_param, 1.2);
            assert_eq!(p.mass_drop_cut, 0.667);
            assert_eq!(p.asymm_cut, 0.3);
        }
    }

    #[test]
    fn unknown_preset() {
        assert!(matches!(
            Parameters::preset("kt4PFJets"),
            Err(ConfigurationError::UnknownPreset(_))
        ));
    }

    #[test]
    fn yaml_with_defaults() {
        let params = Parameters::from_yaml_str(
            "jetAlgorithm: CambridgeAachen
rParam: 0.8
massDropCut: 0.5
asymmCut: 0.1
",
        )
        .unwrap();
        assert_eq!(params.r_param, 0.8);
        assert_eq!(params.mass_drop_cut, 0.5);
        assert_eq!(params.asymm_cut, 0.1);
        assert!(!params.asymm_cut_later);
        assert_eq!(params.n_fat_max, 0);
        assert_eq!(params.max_inputs, 0);
    }

    #[test]
    fn yaml_roundtrip_uses_original_names() {
        let yaml = serde_yaml::to_string(&CA_SUBJET_FILTER_PF_JETS).unwrap();
        assert!(yaml.contains("nFatMax: 2"));
        assert!(yaml.contains("asymmCutLater: true"));
        assert!(yaml.contains("jetAlgorithm: CambridgeAachen"));
        assert_eq!(
            Parameters::from_yaml_str(&yaml).unwrap(),
            CA_SUBJET_FILTER_PF_JETS
        );
    }

    #[test]
    fn yaml_unknown_algorithm() {
        let res = Parameters::from_yaml_str(
            "jetAlgorithm: SISCone
rParam: 0.8
massDropCut: 0.5
asymmCut: 0.1
",
        );
        assert!(matches!(res, Err(ConfigurationError::Yaml(_))));
    }

    #[test]
    fn invalid_parameters() {
        use ConfigurationError::*;
        let base = CA_SUBJET_FILTER_CALO_JETS;
        let check = |params: Parameters| params.validate().unwrap_err();
        assert!(matches!(check(Parameters { r_param: 0., ..base }), NonPositiveRadius(_)));
        assert!(matches!(check(Parameters { r_param: f64::NAN, ..base }), NonPositiveRadius(_)));
        assert!(matches!(check(Parameters { mass_drop_cut: 1., ..base }), MassDropCutOutOfRange(_)));
        assert!(matches!(check(Parameters { mass_drop_cut: 0., ..base }), MassDropCutOutOfRange(_)));
        assert!(matches!(check(Parameters { asymm_cut: -0.1, ..base }), AsymmetryCutOutOfRange(_)));
        assert!(matches!(check(Parameters { asymm_cut: 1., ..base }), AsymmetryCutOutOfRange(_)));
        assert!(matches!(
            check(Parameters { input_e_min: -1., ..base }),
            NegativeInputCut { name: "inputEMin", .. }
        ));
        assert!(matches!(check(Parameters { jet_pt_min: -1., ..base }), NegativeJetPtMin(_)));
    }
}
