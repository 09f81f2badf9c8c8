use std::path::PathBuf;

use flapnet_training::TrainingConfig;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DefaultConfigArg {
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DefaultConfigArg) -> anyhow::Result<()> {
    Output::save_json(&TrainingConfig::default(), arg.output.clone())
}
