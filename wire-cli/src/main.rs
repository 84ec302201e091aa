#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod config;

use std::process;
use std::str::FromStr;

use clap::ArgMatches;
use dagcrust_net::{read_message, write_message, GetheadersMessage, Hash, HashError, Message,
                   WireMessage};
use thiserror::Error;

use config::Config;

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: Vec<&str>) -> Result<String, CommandError> {
        let matches = Config::matches().get_matches_from(args);
        let config = Config::from_args(&matches).unwrap();
        match matches.subcommand() {
            ("getheaders", Some(m)) => getheaders(&config, m),
            ("decode", Some(m)) => decode(&config, m),
            _ => unreachable!(),
        }
    }

    #[test]
    fn it_prints_a_raw_getheaders_payload() {
        let out = run(vec!["dagwire", "-c", "/nonexistent/dagwire.toml", "-p", "60002",
                           "getheaders", "--raw"]).unwrap();
        assert_eq!(out, format!("62ea000000{}", "00".repeat(32)));
    }

    #[test]
    fn it_round_trips_a_framed_getheaders() {
        let stop = "00000000000002710f40c87ec93d010a6fd95f42c59a2cbacc60b18cf6b79575";
        let framed = run(vec!["dagwire", "-c", "/nonexistent/dagwire.toml", "-n", "simnet",
                              "getheaders", "-l", "99500", "-l", "99499", "-s", stop]).unwrap();
        let decoded = run(vec!["dagwire", "-c", "/nonexistent/dagwire.toml", "-n", "simnet",
                               "decode", &framed[..]]).unwrap();
        assert_eq!(decoded, format!("getheaders version=70013 locators=[99500, 99499] stop={}", stop));
    }

    #[test]
    fn it_decodes_a_framed_verack() {
        let out = run(vec!["dagwire", "-c", "/nonexistent/dagwire.toml", "decode",
                           "f9beb4d976657261636b000000000000000000005df6e0e2"]).unwrap();
        assert_eq!(out, "verack");
    }

    #[test]
    fn it_rejects_bad_locators() {
        let res = run(vec!["dagwire", "-c", "/nonexistent/dagwire.toml", "getheaders", "-l", "tip"]);
        assert!(matches!(res, Err(CommandError::Height(_))));
    }

    #[test]
    fn it_reports_protocol_violations() {
        let res = run(vec!["dagwire", "-c", "/nonexistent/dagwire.toml", "decode", "--raw",
                           "62ea0000fdf501"]);
        match res {
            Err(CommandError::Wire(e)) => assert!(e.is_protocol_violation()),
            other => panic!("unexpected {:?}", other),
        }
    }
}

#[derive(Debug, Error)]
enum CommandError {
    #[error(transparent)]
    Wire(#[from] dagcrust_net::Error),
    #[error(transparent)]
    Hash(#[from] HashError),
    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("invalid block locator height {0:?}")]
    Height(String),
}

fn main() {
    let matches = Config::matches().get_matches();

    simple_logger::init_with_level(Config::log_level(&matches)).expect("Couldn't initialize logger");

    let config = match Config::from_args(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };
    debug!("using {:?}", config);

    let result = match matches.subcommand() {
        ("getheaders", Some(getheaders_matches)) => getheaders(&config, getheaders_matches),
        ("decode", Some(decode_matches)) => decode(&config, decode_matches),
        ("", None) => {
            println!("{}", matches.usage());
            return;
        }
        _ => unreachable!(), // every subcommand is matched above
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn getheaders(config: &Config, matches: &ArgMatches) -> Result<String, CommandError> {
    let mut msg = GetheadersMessage::new();
    msg.protocol_version = u32::from(config.protocol_version);

    if let Some(heights) = matches.values_of("locator") {
        for h in heights {
            let height = i32::from_str(h).map_err(|_| CommandError::Height(h.to_string()))?;
            msg.add_block_locator_height(height)?;
        }
    }
    if let Some(stop) = matches.value_of("stop") {
        msg.hash_stop = Hash::from_str(stop)?;
    }

    let mut buf = Vec::with_capacity(msg.serialize_size());
    if matches.is_present("raw") {
        msg.encode(&mut buf, config.protocol_version, config.encoding)?;
    } else {
        let msg = Message::GetHeaders(msg);
        write_message(&mut buf, &msg, config.protocol_version, config.network, config.encoding)?;
    }
    info!("encoded {} bytes", buf.len());

    Ok(hex::encode(buf))
}

fn decode(config: &Config, matches: &ArgMatches) -> Result<String, CommandError> {
    // This unwrap is safe because we require it above
    let input = matches.value_of("hex").unwrap();
    let bytes = hex::decode(input.trim())?;
    let mut reader = &bytes[..];

    let msg = if matches.is_present("raw") {
        let mut msg = GetheadersMessage::new();
        msg.decode(&mut reader, config.protocol_version, config.encoding)?;
        Message::GetHeaders(msg)
    } else {
        read_message(&mut reader, config.protocol_version, config.network, config.encoding)?
    };
    if !reader.is_empty() {
        warn!("{} bytes left after the message", reader.len());
    }

    Ok(describe(&msg))
}

fn describe(msg: &Message) -> String {
    match *msg {
        Message::GetHeaders(ref m) => {
            let heights: Vec<String> = m.block_locator_heights()
                .iter()
                .map(|l| l.height().to_string())
                .collect();
            format!("getheaders version={} locators=[{}] stop={}",
                    m.protocol_version, heights.join(", "), m.hash_stop)
        }
        _ => msg.command().to_string(),
    }
}
