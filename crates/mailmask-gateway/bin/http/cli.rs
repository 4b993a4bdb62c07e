use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "MAILMASK_GATEWAY_LISTEN_ADDR";
pub const EMAIL_DOMAIN_ENV: &str = "MAILMASK_EMAIL_DOMAIN";
pub const RECIPIENT_ENV: &str = "MAILMASK_RECIPIENT";
pub const STORAGE_BACKEND_ENV: &str = "MAILMASK_STORAGE_BACKEND";
pub const REDIS_URL_ENV: &str = "MAILMASK_REDIS_URL";
pub const ROUTER_BACKEND_ENV: &str = "MAILMASK_ROUTER_BACKEND";
pub const MAILGUN_API_KEY_ENV: &str = "MAILMASK_MAILGUN_API_KEY";
pub const TEMPORARY_TTL_ENV: &str = "MAILMASK_TEMPORARY_TTL_HOURS";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_TEMPORARY_TTL_HOURS: i64 = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "redis")]
    Redis,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RouterBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mailgun")]
    Mailgun,
}

impl Display for RouterBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterBackendArg::InMemory => write!(f, "in-memory"),
            RouterBackendArg::Mailgun => write!(f, "mailgun"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "mailmask-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Domain the generated disposable addresses live under.
    #[arg(long, env = EMAIL_DOMAIN_ENV)]
    pub email_domain: String,

    /// Address every disposable address forwards to.
    #[arg(long, env = RECIPIENT_ENV)]
    pub recipient: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("storage", "redis"))]
    pub redis_url: Option<String>,

    #[arg(
        long,
        env = ROUTER_BACKEND_ENV,
        value_enum,
        default_value_t = RouterBackendArg::InMemory
    )]
    pub router: RouterBackendArg,

    #[arg(long, env = MAILGUN_API_KEY_ENV, required_if_eq("router", "mailgun"))]
    pub mailgun_api_key: Option<String>,

    /// Lifetime of temporary assignments, in hours.
    #[arg(long, env = TEMPORARY_TTL_ENV, default_value_t = DEFAULT_TEMPORARY_TTL_HOURS)]
    pub temporary_ttl_hours: i64,
}
