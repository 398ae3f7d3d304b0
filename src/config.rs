use crate::application::gateway::{GatewayMode, PaymentGateway};
use crate::domain::ports::IdGeneratorBox;
use crate::infrastructure::ids::{SequentialIdGenerator, UuidIdGenerator};
use crate::infrastructure::in_memory::InMemoryTransactionStore;
use crate::infrastructure::latency::SimulatedLatency;
use clap::{ArgAction, Parser, ValueEnum};
use std::net::{IpAddr, SocketAddr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IdScheme {
    /// Process-wide counter with a random suffix.
    Sequential,
    /// Random UUID v4.
    Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Simulated point-of-sale payment gateway.
///
/// Every option can also be set through the environment or a `.env` file.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "POS_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    #[arg(long, env = "POS_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Process payments in memory. `false` selects the live gateway, which is
    /// not implemented and fails every request.
    #[arg(long, env = "NICE_SIMULATION_MODE", default_value_t = true, action = ArgAction::Set)]
    pub simulation: bool,

    /// Scale of the simulated network delay in percent; 0 disables it.
    #[arg(long, env = "POS_LATENCY_PERCENT", default_value_t = 100)]
    pub latency_percent: u32,

    #[arg(long, env = "POS_ID_SCHEME", value_enum, default_value_t = IdScheme::Sequential)]
    pub id_scheme: IdScheme,

    #[arg(long, env = "POS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Config {
    /// Reads `.env` if present, then the command line and environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn mode(&self) -> GatewayMode {
        if self.simulation {
            GatewayMode::Simulation
        } else {
            GatewayMode::Live
        }
    }

    /// Assembles a gateway backed by a fresh in-memory store.
    pub fn build_gateway(&self) -> PaymentGateway {
        let ids: IdGeneratorBox = match self.id_scheme {
            IdScheme::Sequential => Box::new(SequentialIdGenerator::new()),
            IdScheme::Uuid => Box::new(UuidIdGenerator),
        };
        PaymentGateway::new(
            self.mode(),
            Box::new(InMemoryTransactionStore::new()),
            ids,
            Box::new(SimulatedLatency::new(self.latency_percent)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["pos-gateway"]).unwrap();
        assert_eq!(config.addr(), "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.mode(), GatewayMode::Simulation);
        assert_eq!(config.latency_percent, 100);
        assert_eq!(config.id_scheme, IdScheme::Sequential);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "pos-gateway",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--simulation",
            "false",
            "--latency-percent",
            "0",
            "--id-scheme",
            "uuid",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.addr(), "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.mode(), GatewayMode::Live);
        assert_eq!(config.build_gateway().mode(), GatewayMode::Live);
        assert_eq!(config.id_scheme, IdScheme::Uuid);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_simulation_flag_env_name() {
        use clap::CommandFactory;

        let command = Config::command();
        let simulation = command
            .get_arguments()
            .find(|arg| arg.get_id() == "simulation")
            .unwrap();
        assert_eq!(
            simulation.get_env(),
            Some(std::ffi::OsStr::new("NICE_SIMULATION_MODE"))
        );
    }

    #[test]
    fn test_rejects_invalid_port() {
        assert!(Config::try_parse_from(["pos-gateway", "--port", "99999"]).is_err());
    }
}
