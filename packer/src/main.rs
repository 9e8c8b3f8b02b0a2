//! Main packer executable, to be used as cli tool. For help run this command
//! with `-h`.

#![warn(missing_docs)]

use anyhow::{Context, Error};
use clap::{Parser, Subcommand, ValueEnum};
use fsdata_pack_packer::{
    compression::Compression, config::Config, directory, json_header, pack, source,
};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Arguments {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CompressionArgument {
    Gzip,
    Brotli,
}
impl From<CompressionArgument> for Compression {
    fn from(value: CompressionArgument) -> Self {
        match value {
            CompressionArgument::Gzip => Self::Gzip,
            CompressionArgument::Brotli => Self::Brotli,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Creates fsdata C source from recursively searching through single
    /// directory.
    ///
    /// Please note that all found files are added, including hidden files
    /// (starting with `.` on unix and with certain flags on windows).
    DirectorySingle {
        /// TOML configuration file with content types, cache control and
        /// overrides. If not set, uses built-in tables.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Whether to follow links while traversing directories. If not set,
        /// uses sane defaults.
        #[arg(long)]
        follow_links: Option<bool>,

        /// Store plain text files compressed with given encoding, if that makes
        /// them smaller. Precompressed files are kept as they are.
        #[arg(long)]
        compress: Option<CompressionArgument>,

        /// The directory to be packed.
        input_directory_path: PathBuf,

        /// Output C source path.
        output_file_path: PathBuf,
    },
    /// Creates C++ header with JSON document as byte array, private keys
    /// removed.
    JsonHeader {
        /// Name of generated array.
        #[arg(long)]
        array_name: Option<String>,

        /// Keys starting with this prefix are removed.
        #[arg(long)]
        private_prefix: Option<String>,

        /// The JSON document.
        input_file_path: PathBuf,

        /// Output header path.
        output_file_path: PathBuf,
    },
}

fn main() -> Result<(), Error> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()?;

    let arguments = Arguments::parse();

    match arguments.command {
        Command::DirectorySingle {
            config,
            follow_links,
            compress,
            input_directory_path,
            output_file_path,
        } => {
            let config = match config {
                Some(config) => Config::load(&config)?,
                None => Config::default(),
            };

            let mut directory_search_options = directory::SearchOptions::default();
            if let Some(follow_links) = follow_links {
                directory_search_options.follow_links = follow_links;
            }

            let mut build_options = config.build_options();
            build_options.compression = compress.map(Compression::from);

            let mut pack_builder = pack::Builder::new();
            pack_builder
                .entries_add(directory::search(
                    &input_directory_path,
                    &directory_search_options,
                    &build_options,
                )?)
                .with_context(|| input_directory_path.display().to_string())?;

            let fsdata = pack_builder.finalize();
            log::info!(
                "packed {} files from {}",
                fsdata.len(),
                input_directory_path.display()
            );

            source::store_file(&fsdata, &config.source_options(), &output_file_path)?;
        }
        Command::JsonHeader {
            array_name,
            private_prefix,
            input_file_path,
            output_file_path,
        } => {
            let mut options = json_header::Options::default();
            if let Some(array_name) = array_name {
                options.array_name = array_name;
            }
            if let Some(private_prefix) = private_prefix {
                options.private_prefix = private_prefix;
            }

            json_header::store_file(&input_file_path, &output_file_path, &options)?;
        }
    }

    Ok(())
}
