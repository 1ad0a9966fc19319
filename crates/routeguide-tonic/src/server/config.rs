use anyhow::bail;
use clap::Parser;
use std::path::PathBuf;

/// Runtime configuration for the `routeguide-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a `.env`
/// file is loaded first when present).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "routeguide-server",
    version,
    about = "A gRPC service for looking up, listing and routing between named features"
)]
pub struct CliArgs {
    /// Address to listen on (TCP or Unix socket path; use --uds for Unix socket).
    ///
    /// Example: "0.0.0.0:50051" or "/tmp/routeguide.sock"
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:50051"))]
    pub server_addr: String,

    /// Listen on a Unix socket instead of TCP. If set, `SERVER_ADDR` must be a file path.
    #[arg(short, long, default_value_t = false)]
    pub uds: bool,

    /// Path to the JSON feature database loaded at startup.
    ///
    /// Environment variable: `ROUTE_GUIDE_DB`
    #[arg(long, env = "ROUTE_GUIDE_DB", default_value = "data/route_guide_db.json")]
    pub database_path: PathBuf,

    /// Capacity of the channel between a `ListFeatures` producer and the
    /// response stream.
    ///
    /// Environment variable: `STREAM_BUFFER_SIZE`
    #[arg(long, env = "STREAM_BUFFER_SIZE", default_value_t = 8)]
    pub stream_buffer_size: usize,

    /// Capacity of the outbound channel of a `RouteChat` call.
    ///
    /// Environment variable: `CHAT_BUFFER_SIZE`
    #[arg(long, env = "CHAT_BUFFER_SIZE", default_value_t = 8)]
    pub chat_buffer_size: usize,

    /// Seconds to wait for in-flight streams to finish before cancelling them
    /// on shutdown.
    ///
    /// Environment variable: `SHUTDOWN_TIMEOUT`
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 3)]
    pub shutdown_timeout: u64,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub uds: bool,
    pub database_path: PathBuf,
    pub stream_buffer_size: usize,
    pub chat_buffer_size: usize,
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_addr: String::from("0.0.0.0:50051"),
            uds: false,
            database_path: PathBuf::from("data/route_guide_db.json"),
            stream_buffer_size: 8,
            chat_buffer_size: 8,
            shutdown_timeout: 3,
        }
    }
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.stream_buffer_size == 0 {
            bail!("STREAM_BUFFER_SIZE must be greater than 0");
        }

        if args.chat_buffer_size == 0 {
            bail!("CHAT_BUFFER_SIZE must be greater than 0");
        }

        if args.uds && args.server_addr.is_empty() {
            bail!("SERVER_ADDR must be a socket path when --uds is set");
        }

        Ok(Self {
            server_addr: args.server_addr,
            uds: args.uds,
            database_path: args.database_path,
            stream_buffer_size: args.stream_buffer_size,
            chat_buffer_size: args.chat_buffer_size,
            shutdown_timeout: args.shutdown_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<ServerConfig> {
        let args = CliArgs::try_parse_from(core::iter::once("routeguide-server").chain(args.iter().copied()))?;
        ServerConfig::try_from(args)
    }

    #[test]
    fn explicit_flags_are_carried_through() {
        let config = parse(&[
            "--server-addr",
            "127.0.0.1:6000",
            "--database-path",
            "/tmp/db.json",
            "--stream-buffer-size",
            "2",
            "--chat-buffer-size",
            "4",
            "--shutdown-timeout",
            "0",
        ])
        .unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:6000");
        assert_eq!(config.database_path, PathBuf::from("/tmp/db.json"));
        assert_eq!(config.stream_buffer_size, 2);
        assert_eq!(config.chat_buffer_size, 4);
        assert_eq!(config.shutdown_timeout, 0);
        assert!(!config.uds);
    }

    #[test]
    fn zero_buffers_are_rejected() {
        let err = parse(&["--stream-buffer-size", "0"]).unwrap_err();
        assert!(err.to_string().contains("STREAM_BUFFER_SIZE"));

        let err = parse(&["--chat-buffer-size", "0"]).unwrap_err();
        assert!(err.to_string().contains("CHAT_BUFFER_SIZE"));
    }

    #[test]
    fn uds_requires_a_path() {
        assert!(parse(&["--uds", "--server-addr", ""]).is_err());
        let config = parse(&["--uds", "--server-addr", "/tmp/routeguide.sock"]).unwrap();
        assert!(config.uds);
    }
}
