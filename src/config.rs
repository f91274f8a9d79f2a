use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "field-db", about = "Message/field document store over HTTP")]
pub struct Args {
    /// Listen address
    #[arg(long, default_value = "127.0.0.1:8000", env = "FIELD_DB_ADDR")]
    pub addr: SocketAddr,

    /// Database file, created if missing
    #[arg(long, default_value = "field_db.redb", env = "FIELD_DB_PATH")]
    pub db_path: PathBuf,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long, default_value_t = false)]
    pub in_memory: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    /// `None` means in-memory.
    pub db_path: Option<PathBuf>,
    pub log_level: String,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let log_level = if args.debug { "debug" } else { "info" };
        Config {
            addr: args.addr,
            db_path: (!args.in_memory).then_some(args.db_path),
            log_level: log_level.to_string(),
        }
    }
}

pub fn load_config() -> Config {
    Config::from(Args::parse())
}
