use std::fs::File;
use std::io::Write;

use anyhow::Context;

use crate::config::LogTarget;

/// One log record as a JSON object.
pub fn json_record(asctime: &str, name: &str, levelname: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "asctime": asctime,
        "name": name,
        "levelname": levelname,
        "message": message,
    })
}

/// Install the global logger. Records are written one JSON object per line;
/// the level defaults to `info` and can be changed through `RUST_LOG`.
pub fn init(target: &LogTarget) -> anyhow::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    builder.format(|buf, record| {
        let line = json_record(
            &buf.timestamp().to_string(),
            record.target(),
            &record.level().to_string(),
            &record.args().to_string(),
        );
        writeln!(buf, "{line}")
    });

    match target {
        LogTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        LogTarget::Stderr => {
            builder.target(env_logger::Target::Stderr);
        }
    }

    builder.try_init().context("Failed to install logger")?;
    Ok(())
}
