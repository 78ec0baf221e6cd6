mod error;

use std::{fs, path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use lazy_format::lazy_format;
use signet::{Registry, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::Unit;

/// Greet someone.
///
/// name: who to greet
/// times: how many times to greet them
/// loud: shout the greeting
/// greeting: use this instead of "Hello"
#[signet::command]
fn greet(
    name: String,
    #[signet(default = 1)] times: u32,
    loud: bool,
    greeting: Option<String>,
) -> anyhow::Result<()> {
    let greeting = greeting.as_deref().unwrap_or("Hello");
    let line = lazy_format!(match (loud) {
        true => ("{}, {}!", greeting.to_uppercase(), name.to_uppercase()),
        false => "{greeting}, {name}.",
    });

    (0..times).for_each(|_| println!("{line}"));
    Ok(())
}

/// Count the lines in a file.
///
/// path: the file to read
/// pattern: only count lines containing this
#[signet::command(style = "positional")]
fn count(path: PathBuf, pattern: Option<String>) -> anyhow::Result<()> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let count = content
        .lines()
        .filter(|line| pattern.as_deref().is_none_or(|pattern| line.contains(pattern)))
        .count();

    info!(path = %path.display(), count, "counted lines");
    println!("{count}");
    Ok(())
}

/// Convert a length between units.
///
/// value: the length to convert
/// from: its unit (m, km, ft or mi)
/// to: the unit to convert to
/// precision: digits after the decimal point
#[signet::command(style = "keyword")]
fn convert(
    value: f64,
    #[signet(cast = "unit")] from: Unit,
    #[signet(cast = "unit", default = Unit::Meters)] to: Unit,
    #[signet(default = 2)] precision: usize,
) -> anyhow::Result<()> {
    let converted = value * from.meters() / to.meters();

    println!(
        "{value}{from} = {converted:.precision$}{to}",
        from = from.symbol(),
        to = to.symbol(),
    );
    Ok(())
}

fn build_registry() -> Result<Registry<anyhow::Result<()>>, signet::Error> {
    let mut registry = Registry::new();

    registry.special_cast("unit", |raw: &str| raw.parse::<Unit>().map(Value::custom));

    registry
        .register(greet_command())?
        .register(count_command())?
        .register(convert_command())?;

    Ok(registry)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match build_registry() {
        Ok(registry) => signet::run(&registry),
        Err(error) => {
            eprintln!("signet-demo: {error}");
            ExitCode::FAILURE
        }
    }
}
