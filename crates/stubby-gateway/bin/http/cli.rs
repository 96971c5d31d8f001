use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use stubby_gateway::telemetry::LogFormat;

pub const LISTEN_ADDR_ENV: &str = "STUBBY_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "STUBBY_BASE_URL";
pub const GENERATOR_ENV: &str = "STUBBY_GENERATOR";
pub const ID_LENGTH_ENV: &str = "STUBBY_ID_LENGTH";
pub const GENERATOR_PREFIX_ENV: &str = "STUBBY_GENERATOR_PREFIX";
pub const MAX_ATTEMPTS_ENV: &str = "STUBBY_MAX_ATTEMPTS";
pub const CLICK_QUEUE_CAPACITY_ENV: &str = "STUBBY_CLICK_QUEUE_CAPACITY";
pub const LOG_FORMAT_ENV: &str = "STUBBY_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8888";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8888";
pub const DEFAULT_GENERATOR_PREFIX: &str = "s";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeneratorArg {
    #[value(name = "random")]
    Random,
    #[value(name = "seq")]
    Seq,
}

impl Display for GeneratorArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorArg::Random => write!(f, "random"),
            GeneratorArg::Seq => write!(f, "seq"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "stubby", about = "In-memory URL shortener with click stats")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Public base URL used to build short and stats links.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        env = GENERATOR_ENV,
        value_enum,
        default_value_t = GeneratorArg::Random
    )]
    pub generator: GeneratorArg,

    /// Length of random identifiers.
    #[arg(long, env = ID_LENGTH_ENV, default_value_t = stubby_generator::random::DEFAULT_LENGTH)]
    pub id_length: usize,

    /// Prefix of sequential identifiers.
    #[arg(long, env = GENERATOR_PREFIX_ENV, default_value = DEFAULT_GENERATOR_PREFIX)]
    pub generator_prefix: String,

    /// Identifier candidates to try before a shorten request fails.
    #[arg(
        long,
        env = MAX_ATTEMPTS_ENV,
        default_value_t = stubby_storage::memory::DEFAULT_MAX_ATTEMPTS
    )]
    pub max_attempts: u32,

    /// Click events that may wait in the queue before redirects block.
    #[arg(
        long,
        env = CLICK_QUEUE_CAPACITY_ENV,
        default_value_t = stubby_redirector::aggregator::DEFAULT_QUEUE_CAPACITY
    )]
    pub click_queue_capacity: usize,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormat::Text
    )]
    pub log_format: LogFormat,
}
