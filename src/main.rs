use std::io::Read;
use std::process::ExitCode;

use serde_json::Value;

pub mod config;
use config::load_config;
pub mod dns_probe;
pub mod error;
use error::ProbeError;
pub mod http_probe;
pub mod report;
use report::Prober;
pub mod request;
pub mod tcp_probe;
#[cfg(test)]
mod test_support;

/// Read the event document named on the command line: a path, `-` for stdin,
/// or nothing for the empty event. JSON and YAML are both accepted.
fn read_event(arg: Option<String>) -> Result<Value, ProbeError> {
    let raw = match arg.as_deref() {
        None => return Ok(Value::Null),
        Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)?,
    };
    parse_event(&raw)
}

fn parse_event(raw: &str) -> Result<Value, ProbeError> {
    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(raw).map_err(|e| ProbeError::InvalidEvent(e.to_string()))
}

async fn run() -> Result<String, ProbeError> {
    let config = load_config()?;
    let prober = Prober::new(config)?;
    let event = read_event(std::env::args().nth(1))?;
    let report = prober.handle_value(event).await?;
    Ok(serde_json::to_string_pretty(&report)?)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run().await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", error::report(&e));
            ExitCode::FAILURE
        }
    }
}
