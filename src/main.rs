// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

mod cow_json;
mod interpreter;
mod json_utils;
mod path;
mod placeholder;
mod process_template;
mod resolver;
mod server;

use std::{net::SocketAddr, path::PathBuf};

use anyhow::{Context, Error};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::{
    json_utils::{json_read_file, json_write_file},
    process_template::process_json_template_str,
    server::ServerConfig,
};

const DEFAULT_LOG_FILTER: &str = "json_reshape=info,tower_http=info";

#[derive(Parser)]
#[command(version, about = "Reshapes JSON documents using placeholder templates")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the transform endpoint over HTTP.
    Serve {
        #[arg(long, env = "JSON_RESHAPE_LISTEN", default_value = "0.0.0.0:8080")]
        listen: SocketAddr,

        /// Largest accepted request body.
        #[arg(long, env = "JSON_RESHAPE_MAX_BODY_BYTES", default_value_t = 2 * 1024 * 1024)]
        max_body_bytes: usize,
    },
    /// Evaluate a template file against a source file.
    Transform {
        #[arg(long)]
        source: PathBuf,

        #[arg(long)]
        template: PathBuf,

        /// Write the result here instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,

        #[arg(long)]
        compact: bool,
    },
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve { listen, max_body_bytes } => {
            let config = ServerConfig { listen, max_body_bytes };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))
        }
        Command::Transform {
            source,
            template,
            output,
            compact,
        } => {
            let source_string = json_read_file(&source)?;
            let template_string = json_read_file(&template)?;
            let out_str = process_json_template_str(&source_string, &template_string, compact)
                .with_context(|| format!("cannot transform {}", source.display()))?;
            match output {
                Some(output) => json_write_file(&out_str, &output),
                None => {
                    println!("{}", out_str);
                    Ok(())
                }
            }
        }
    }
}
