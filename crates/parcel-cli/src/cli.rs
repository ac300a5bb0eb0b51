use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Clone, Debug, Parser)]
#[command(author, version, about = "Encode and decode type-tagged envelopes", long_about = None)]
pub struct ParcelCli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// The path to the configuration file. Defaults apply when omitted.
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Increase output logging verbosity to DEBUG level.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress all output logging (overrides --verbose).
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Print the envelope of a demo object.
    #[command(subcommand)]
    Encode(EncodeCmd),

    /// Decode an envelope read from FILE (or stdin when FILE is `-`).
    Decode {
        #[arg(value_name = "FILE", default_value = "-")]
        input: PathBuf,
    },

    /// List registered classes and their capabilities.
    Types,
}

#[derive(Clone, Debug, Subcommand)]
pub enum EncodeCmd {
    Greeter {
        #[arg(long)]
        name: String,
    },
    Counter {
        #[arg(long)]
        value: u64,
    },
    /// Registered without `to_dict`; always fails.
    Opaque,
}
