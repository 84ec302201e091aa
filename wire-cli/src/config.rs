use std::fs;
use std::io;
use std::path::PathBuf;

use clap::{App, Arg, ArgMatches, SubCommand};
use dagcrust_net::{MessageEncoding, Network, ProtocolVersion};
use log::Level;
use thiserror::Error;


#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("can't read config file {0}: {1}")]
    Read(PathBuf, io::Error),
    #[error("malformed config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid setting: {0}")]
    Value(#[from] dagcrust_net::Error),
    #[error("invalid protocol version {0:?}")]
    ProtocolVersion(String),
}

/// Settings read from `$HOME/.dagwire.toml` or `--config`
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct ConfigFile {
    network: Option<String>,
    protocol_version: Option<u32>,
    witness: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: Level,
    pub network: Network,
    pub protocol_version: ProtocolVersion,
    pub encoding: MessageEncoding,
}

impl<'a, 'b> Config {
    pub fn from_args(matches: &ArgMatches) -> Result<Config, ConfigError> {
        let config_file_path: PathBuf = matches.value_of("config").map(PathBuf::from).unwrap_or_else(|| {
            let mut path = dirs::home_dir().unwrap_or_default();
            path.push(".dagwire.toml");
            path
        });
        let config_from_file: ConfigFile = if config_file_path.exists() {
            let s = fs::read_to_string(&config_file_path)
                .map_err(|e| ConfigError::Read(config_file_path.clone(), e))?;
            toml::from_str(&s)?
        } else {
            debug!("no config file at {}, using defaults", config_file_path.display());
            ConfigFile::default()
        };

        let network = match matches.value_of("network").map(String::from).or(config_from_file.network) {
            Some(name) => name.parse::<Network>()?,
            None => Network::default(),
        };

        let protocol_version = match matches.value_of("pver") {
            Some(v) => Some(v.parse::<u32>().map_err(|_| ConfigError::ProtocolVersion(v.to_string()))?),
            None => config_from_file.protocol_version,
        };
        let protocol_version = match protocol_version {
            Some(v) => ProtocolVersion::try_from(v)?,
            None => ProtocolVersion::LATEST,
        };

        let encoding = if matches.is_present("witness") || config_from_file.witness.unwrap_or(false) {
            MessageEncoding::Witness
        } else {
            MessageEncoding::Base
        };

        Ok(Config {
            log_level: Config::log_level(matches),
            network,
            protocol_version,
            encoding,
        })
    }

    pub fn log_level(matches: &ArgMatches) -> Level {
        match matches.occurrences_of("debug") {
            0 => Level::Warn,
            1 => Level::Info,
            2 => Level::Debug,
            _ => Level::Trace,
        }
    }

    pub fn matches() -> App<'a, 'b> {
        App::new("dagwire")
            .version(crate_version!())
            .about("Encode and inspect dagcrust network messages")
            .arg(Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .help("Location of the config file, default: $HOME/.dagwire.toml"))
            .arg(Arg::with_name("debug")
                .short("d")
                .long("debug")
                .multiple(true)
                .help("Turn debugging information on"))
            .arg(Arg::with_name("network")
                .short("n")
                .long("network")
                .takes_value(true)
                .possible_values(&["mainnet", "regtest", "testnet3", "simnet"])
                .help("Network whose magic frames messages"))
            .arg(Arg::with_name("pver")
                .short("p")
                .long("pver")
                .takes_value(true)
                .help("Negotiated protocol version, default: latest"))
            .arg(Arg::with_name("witness")
                .long("witness")
                .help("Use the witness message encoding"))
            .subcommand(SubCommand::with_name("getheaders")
                .about("Build a getheaders message and print it as hex")
                .arg(Arg::with_name("locator")
                    .short("l")
                    .long("locator")
                    .takes_value(true)
                    .multiple(true)
                    .number_of_values(1)
                    .help("Block locator height, in order; may be repeated"))
                .arg(Arg::with_name("stop")
                    .short("s")
                    .long("stop")
                    .takes_value(true)
                    .help("Hash to stop at, default: none"))
                .arg(Arg::with_name("raw")
                    .long("raw")
                    .help("Print the payload without the message header")))
            .subcommand(SubCommand::with_name("decode")
                .about("Decode a hex encoded message")
                .arg(Arg::with_name("hex")
                    .required(true)
                    .help("Hex encoded message"))
                .arg(Arg::with_name("raw")
                    .long("raw")
                    .help("Input is a bare getheaders payload without header")))
    }
}
