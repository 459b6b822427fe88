use std::str::FromStr;

use error_stack::{Report, ResultExt};

use kernel::KernelError;

static DATABASE_ENGINE: &str = "DATABASE_ENGINE";
static SERVER_PORT: &str = "SERVER_PORT";

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Engine {
    Postgres,
    Memory,
}

impl FromStr for Engine {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Engine::Postgres),
            "memory" => Ok(Engine::Memory),
            other => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("unknown {DATABASE_ENGINE} `{other}`"))),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    pub engine: Engine,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        let engine = match dotenvy::var(DATABASE_ENGINE) {
            Ok(engine) => engine.parse()?,
            Err(_) => Engine::Postgres,
        };
        let port = match dotenvy::var(SERVER_PORT) {
            Ok(port) => port
                .trim()
                .parse::<u16>()
                .change_context(KernelError::Internal)
                .attach_printable_lazy(|| format!("{SERVER_PORT} must be a port number"))?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self { engine, port })
    }
}
