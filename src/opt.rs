use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "subjet-filter",
    about = "Find fat jets and their mass-drop subjets"
)]
pub struct Opt {
    /// Verbosity level: 'off', 'error', 'warn', 'info', 'debug', 'trace'
    #[structopt(short, long, default_value = "info")]
    pub verbosity: String,

    /// YAML file with producer parameters
    #[structopt(short, long, parse(from_os_str), conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Named parameter preset: 'caSubjetFilterCaloJets' or
    /// 'caSubjetFilterPFJets' (default)
    #[structopt(short, long)]
    pub preset: Option<String>,

    /// Event files with one `px py pz E` line per constituent and
    /// blank lines between events
    #[structopt(parse(from_os_str), required = true)]
    pub files: Vec<PathBuf>,
}
