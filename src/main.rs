//! Find Cambridge/Aachen fat jets and their mass-drop subjets.
//!
//! # How to use
//!
//!     subjet-filter EVENTFILE
//!
//! The event file lists one constituent per line as `px py pz E`,
//! with blank lines between events. Parameters are taken from a named
//! preset (`-p caSubjetFilterCaloJets`) or a YAML file (`-c FILE`).
//!
mod opt;

use crate::opt::Opt;

use anyhow::{Context, Result};
use env_logger::Env;
use log::{debug, error, info};
use rayon::prelude::*;
use structopt::StructOpt;
use subjet_filter::event::import;
use subjet_filter::{FilteredJets, FourMomentum, Parameters, SubjetFilterJetProducer};

const DEFAULT_PRESET: &str = "caSubjetFilterPFJets";

fn main() -> Result<()> {
    let opt = Opt::from_args();

    let env = Env::default().filter_or("SUBJET_FILTER_LOG", opt.verbosity.as_str());
    env_logger::init_from_env(env);

    let params = if let Some(config) = &opt.config {
        Parameters::from_yaml_file(config)
            .with_context(|| format!("Failed to load parameters from {config:?}"))?
    } else {
        let preset = opt.preset.as_deref().unwrap_or(DEFAULT_PRESET);
        Parameters::preset(preset)?
    };
    let producer = SubjetFilterJetProducer::new(params)?;

    let mut event_nr = 0;
    for file in &opt.files {
        let events = import(file).with_context(|| format!("Failed to import {file:?}"))?;
        info!("Processing {} events from {file:?}", events.len());
        let results: Vec<_> = events
            .par_iter()
            .map(|event| producer.produce_jets(&event.constituents))
            .collect();
        for res in results {
            event_nr += 1;
            match res {
                Ok(jets) => print_jets(event_nr, &jets),
                Err(err) => error!("Skipping event {event_nr}: {err}"),
            }
        }
    }
    debug!("Processed {event_nr} events");
    Ok(())
}

fn print_jets(event_nr: usize, jets: &FilteredJets) {
    println!("# event {event_nr}");
    println!(
        "{:>8} {:>5} {:>12} {:>10} {:>10} {:>12} {:>10} {:>10}",
        "fat jet", "sub", "pt", "eta", "phi", "m", "mass drop", "asymmetry"
    );
    for (n, fat_jet) in jets.fat_jets.iter().enumerate() {
        print_row(n, "-", &fat_jet.momentum, None);
        let subjets = jets.subjets.iter().filter(|s| s.fat_jet == n);
        for (k, subjet) in subjets.enumerate() {
            let split = subjet.split.map(|s| (s.mass_drop, s.asymmetry));
            print_row(n, &k.to_string(), &subjet.momentum, split);
        }
    }
}

fn print_row(fat_jet: usize, sub: &str, p: &FourMomentum, split: Option<(f64, f64)>) {
    let (mass_drop, asymmetry) = match split {
        Some((mu, y)) => (format!("{mu:.4}"), format!("{y:.4}")),
        None => ("-".to_owned(), "-".to_owned()),
    };
    println!(
        "{:>8} {:>5} {:>12.4} {:>10.4} {:>10.4} {:>12.4} {:>10} {:>10}",
        fat_jet,
        sub,
        p.pt(),
        p.eta(),
        p.phi(),
        p.m(),
        mass_drop,
        asymmetry
    );
}
