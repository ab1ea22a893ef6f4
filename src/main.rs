//! Envkit Command Line Tool
//!
//! Resolves one of the service configuration records from the environment
//! and shows where every field came from.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Args as ClapArgs, Parser, Subcommand};
use log::{debug, error, info};
use serde::Serialize;

use envkit::common::{init_logger, Result};
use envkit::config::{GrpcClientConfig, Listener, ServerConfig, ServiceConfig, ENV_PREFIX};
use envkit::env::{self, load_env_file, EnvConfig, Environment, Options, Report};
use envkit::{APP_NAME, VERSION};

/// Envkit: resolve service configuration from prefixed environment variables
#[derive(Parser, Debug)]
#[clap(author, version = VERSION, about, long_about = None)]
struct Args {
    /// Read variables from a JSON file instead of the process environment
    #[clap(long, env = "ENVKIT_ENV_FILE")]
    env_file: Option<PathBuf>,

    /// Log level
    #[clap(long, default_value = "warn")]
    log_level: String,

    /// Print the record and its sources as JSON
    #[clap(long)]
    json: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Service-wide settings (log level, secret, tracing, telemetry)
    Service(PrefixArgs),
    /// HTTP listener settings
    Http(PrefixArgs),
    /// gRPC listener settings
    Grpc(PrefixArgs),
    /// gRPC client settings
    GrpcClient(PrefixArgs),
}

/// Prefix overrides shared by every record
#[derive(ClapArgs, Debug)]
struct PrefixArgs {
    /// Primary prefix (defaults to the record's own)
    #[clap(long)]
    prefix: Option<String>,

    /// Alternate prefix (defaults to the record's own)
    #[clap(long)]
    alt_prefix: Option<String>,

    /// Fail on fields that are unset and have no default
    #[clap(long)]
    required: bool,
}

impl PrefixArgs {
    fn options(&self, environment: Environment, prefix: &str, alt_prefix: &str) -> Options {
        Options::new()
            .with_environment(environment)
            .with_prefix(self.prefix.as_deref().unwrap_or(prefix))
            .with_alt_prefix(self.alt_prefix.as_deref().unwrap_or(alt_prefix))
            .required_if_no_def(self.required)
    }
}

#[derive(Serialize)]
struct Output<'a, T: Serialize> {
    config: &'a T,
    sources: &'a Report,
}

fn print_resolved<T: Serialize, W: Write>(out: &mut W, config: &T, report: &Report, json: bool) -> Result<()> {
    if json {
        let output = Output { config, sources: report };
        serde_json::to_writer_pretty(&mut *out, &output)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{:<32} {:<10} VARIABLE", "NAME", "SOURCE")?;
    for field in &report.fields {
        writeln!(
            out,
            "{:<32} {:<10} {}",
            field.name,
            field.source.to_string(),
            field.variable.as_deref().unwrap_or("-")
        )?;
    }
    writeln!(out)?;
    serde_json::to_writer_pretty(&mut *out, config)?;
    writeln!(out)?;
    Ok(())
}

fn resolve<T: EnvConfig + Serialize>(mut config: T, options: &Options, json: bool) -> Result<()> {
    let report = env::parse_report(&mut config, options)?;
    info!("Resolved {} fields", report.fields.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_resolved(&mut out, &config, &report, json)?;
    out.flush()?;
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let environment = match &args.env_file {
        Some(path) => {
            info!("Reading variables from {}", path.display());
            Environment::Map(load_env_file(path)?)
        }
        None => Environment::Process,
    };
    debug!("Environment: {:?}", environment);

    match &args.command {
        Command::Service(prefixes) => {
            let options = prefixes.options(environment, "", "");
            resolve(ServiceConfig::default(), &options, args.json)
        }
        Command::Http(prefixes) => {
            let options = prefixes.options(environment, Listener::Http.prefix(), ENV_PREFIX);
            resolve(ServerConfig::with_port(Listener::Http.default_port()), &options, args.json)
        }
        Command::Grpc(prefixes) => {
            let options = prefixes.options(environment, Listener::Grpc.prefix(), ENV_PREFIX);
            resolve(ServerConfig::with_port(Listener::Grpc.default_port()), &options, args.json)
        }
        Command::GrpcClient(prefixes) => {
            let options = prefixes.options(environment, "", "");
            resolve(GrpcClientConfig::default(), &options, args.json)
        }
    }
}

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    init_logger(&args.log_level);

    info!("Starting {} v{}", APP_NAME, VERSION);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("{}: {}", APP_NAME, e);
        process::exit(1);
    }
}
