use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use minic::ast_printer::AstPrinter;
use minic::parser::Parser;
use minic::scanner::{tokenize, Scanner};

#[derive(ClapParser, Debug)]
#[command(version, about = "Front end for a tiny subset of C", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to minic.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes a C file, printing each token
    Tokenize { filename: Option<PathBuf> },

    /// Parses a C file and prints its AST
    Parse {
        filename: Option<PathBuf>,

        /// Print the AST as JSON instead of prefix form
        #[arg(long)]
        json: bool,
    },
}

/// Reads the contents of a file into a Vec<u8>
fn read_file(filename: &Path) -> Result<Vec<u8>> {
    info!("Reading file: {:?}", filename);
    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    Ok(buf)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("minic.log").context("Failed to create minic.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'minic::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("minic::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to minic.log");
    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Commands::Tokenize { filename } => match filename {
            Some(filename) => {
                info!("Running Tokenize subcommand");
                let buf = read_file(&filename)?;
                let mut tokenized = true;

                for token in Scanner::new(&buf, filename.display().to_string()) {
                    match token {
                        Ok(token) => {
                            println!("{}", token);
                        }

                        Err(e) => {
                            tokenized = false;

                            debug!("Tokenization debug: {}", e);

                            eprintln!("{}", e);
                        }
                    }
                }

                if !tokenized {
                    debug!("Tokenization failed, exiting with code 65");

                    std::process::exit(65);
                }

                info!("Tokenization completed successfully");
            }
            None => {
                info!("No filepath provided for Tokenize");

                println!("No input filepath was provided. Exiting...");

                std::process::exit(0);
            }
        },

        Commands::Parse { filename, json } => match filename {
            Some(filename) => {
                info!("Running Parse subcommand");
                let buf = read_file(&filename)?;

                let tokens = match tokenize(&buf, filename.display().to_string()) {
                    Ok(tokens) => tokens,
                    Err(e) => {
                        debug!("Tokenization debug: {}", e);
                        eprintln!("{}", e);
                        std::process::exit(65);
                    }
                };

                match Parser::new(&tokens).parse() {
                    Ok(program) => {
                        info!("Program parsed successfully");

                        if json {
                            let out = serde_json::to_string_pretty(&program)
                                .context("Failed to serialize AST")?;
                            println!("{}", out);
                        } else {
                            println!("{}", AstPrinter::print(&program));
                        }
                    }

                    Err(e) => {
                        debug!("Parse debug: {}", e);
                        eprintln!("{}", e);
                        std::process::exit(65);
                    }
                }

                info!("Parse subcommand completed");
            }
            None => {
                info!("No filepath provided for Parse");
                println!("No input filepath was provided. Exiting...");
                std::process::exit(0);
            }
        },
    }

    Ok(())
}
