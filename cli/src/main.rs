use base64::{engine::general_purpose, Engine};
use clap::Parser;
use commands::{run_command, Commands};
use log::{info, LevelFilter};
use simplelog::{Config, SimpleLogger};

mod commands;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Full path to TOML collector
    #[clap(short, long, value_parser)]
    toml: Option<String>,

    /// Base64 encoded TOML file
    #[clap(short, long, value_parser)]
    data: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let args = Args::parse();

    if let Some(command) = args.command {
        let _ = SimpleLogger::init(LevelFilter::Warn, Config::default());
        if let Err(err) = run_command(&command) {
            println!("[shelllink] Failed to run command: {err}");
        }
        return;
    }

    println!("[shelllink] Starting shortcut collection!");
    if let Some(toml) = args.toml {
        if !toml.is_empty() {
            let collection_results = shelllink::parse_toml_file(&toml);
            match collection_results {
                Ok(_) => info!("[shelllink] Collection success"),
                Err(err) => {
                    println!("[shelllink] Failed to collect shortcuts: {err:?}");
                    return;
                }
            }
        }
    } else if let Some(data) = args.data {
        if !data.is_empty() {
            let toml_data_results = general_purpose::STANDARD.decode(&data);
            let toml_data = match toml_data_results {
                Ok(results) => results,
                Err(err) => {
                    println!(
                        "[shelllink] Failed to base64 decode TOML collector {data}, error: {err:?}",
                    );
                    return;
                }
            };
            let collection_results = shelllink::parse_toml_data(&toml_data);
            match collection_results {
                Ok(_) => info!("[shelllink] Collection success"),
                Err(err) => {
                    println!("[shelllink] Failed to collect shortcuts: {err:?}");
                    return;
                }
            }
        }
    } else {
        println!("[shelllink] No TOML file, data, or command provided!");
        return;
    }
    println!("[shelllink] Finished shortcut collection!");
}
