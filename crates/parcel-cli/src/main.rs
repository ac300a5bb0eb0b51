//! parcel: encode and decode type-tagged envelopes from the command line.

mod cli;
mod config;
mod demo;

use std::error::Error;
use std::io::Read;
use std::sync::Arc;

use clap::Parser;
use parcel_core::PayloadCodec;
use serde_json::Value;
use tracing_subscriber::filter::LevelFilter;

use crate::cli::{Commands, EncodeCmd, ParcelCli};
use crate::config::{Config, load_config};

fn main() -> Result<(), Box<dyn Error>> {
    let cli = ParcelCli::parse();
    let cfg = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    let log_level = if cli.quiet {
        LevelFilter::OFF
    } else if cli.verbose {
        LevelFilter::DEBUG
    } else {
        cfg.global.log_level.clone().into()
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let codec = PayloadCodec::new(Arc::new(demo::registry(cfg.registry)?));

    match cli.command {
        Commands::Encode(cmd) => {
            let value = match cmd {
                EncodeCmd::Greeter { name } => codec.encode(&demo::Greeter { name })?,
                EncodeCmd::Counter { value } => codec.encode(&demo::Counter { value })?,
                EncodeCmd::Opaque => codec.encode(&demo::Opaque)?,
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Commands::Decode { input } => {
            let text = if input.as_os_str() == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                std::fs::read_to_string(&input)?
            };
            let value: Value = serde_json::from_str(&text)?;

            tracing::info!(input = %input.display(), "decoding envelope");
            let obj = codec.decode(&value)?;
            match demo::describe(obj.as_ref()) {
                Some(description) => println!("{description}"),
                None => println!("<decoded object without a description>"),
            }
        }
        Commands::Types => {
            for class in codec.registry().classes() {
                println!(
                    "{:<16} to_dict={:<5} from_dict={:<5} ({})",
                    class.qualified_name(),
                    class.can_encode(),
                    class.can_decode(),
                    class.rust_type_name()
                );
            }
        }
    }

    Ok(())
}
