use clap::Parser;

/// Longest accepted token lifetime, one year.
pub const TTL_HOURS_MAX: u64 = 24 * 365;

/// Server configuration. Every flag falls back to an environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "backend", about = "Notes backend server")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: String,
    /// PostgreSQL connection string; in-memory stores when absent
    #[arg(long, env = "DB_URL")]
    pub database: Option<String>,
    /// HTTP worker threads
    #[arg(long, env = "WORKERS", default_value_t = 6)]
    pub workers: usize,
    /// Lifetime of authentication tokens issued at login, in hours
    #[arg(
        long,
        env = "TOKEN_TTL_HOURS",
        default_value_t = notes_core::TOKEN_TTL.as_secs() / 3600,
        value_parser = clap::value_parser!(u64).range(1..=TTL_HOURS_MAX),
    )]
    pub token_ttl_hours: u64,
}

impl Config {
    pub fn ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.token_ttl_hours.saturating_mul(60 * 60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override() {
        let config = Config::try_parse_from([
            "backend",
            "--bind",
            "127.0.0.1:9000",
            "--workers",
            "2",
            "--token-ttl-hours",
            "1",
        ])
        .unwrap();
        assert_eq!(config.bind, "127.0.0.1:9000");
        assert_eq!(config.workers, 2);
        assert_eq!(config.ttl(), std::time::Duration::from_secs(3600));
    }

    #[test]
    fn rejects_garbage_ttl() {
        assert!(Config::try_parse_from(["backend", "--token-ttl-hours", "soon"]).is_err());
    }

    #[test]
    fn ttl_is_bounded() {
        for hours in ["0", "-1", "8761", "18446744073709551615"] {
            assert!(
                Config::try_parse_from(["backend", "--token-ttl-hours", hours]).is_err(),
                "{}",
                hours
            );
        }
        let config = Config::try_parse_from(["backend", "--token-ttl-hours", "8760"]).unwrap();
        assert_eq!(config.ttl(), std::time::Duration::from_secs(8760 * 3600));
    }
}
