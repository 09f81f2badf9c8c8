use clap::{Parser, Subcommand};

use self::{
    default_config::DefaultConfigArg, play::PlayArg, train::TrainArg, watch::WatchArg,
};

mod default_config;
mod play;
mod session;
mod train;
mod watch;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Train controllers headlessly and save the champion
    Train(#[clap(flatten)] TrainArg),
    /// Train controllers while watching the cohort fly in the terminal
    Watch(#[clap(flatten)] WatchArg),
    /// Fly the bird yourself
    Play(#[clap(flatten)] PlayArg),
    /// Print the default training configuration as JSON
    DefaultConfig(#[clap(flatten)] DefaultConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Watch(WatchArg::default())) {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Watch(arg) => watch::run(&arg)?,
        Mode::Play(arg) => play::run(&arg)?,
        Mode::DefaultConfig(arg) => default_config::run(&arg)?,
    }
    Ok(())
}
