use chrono::Local;
use std::path::PathBuf;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_logging(app_name: &str) -> Result<(), String> {
    let mut init_result: Result<(), String> = Ok(());
    INIT.call_once(|| {
        if let Err(err) = init_logging_inner(app_name) {
            init_result = Err(err);
        }
    });
    init_result
}

/// `IBAN_LOG_LEVEL` wins over `RUST_LOG`; unparsable or missing means info.
fn level_from(primary: Option<&str>, fallback: Option<&str>) -> log::LevelFilter {
    primary
        .or(fallback)
        .and_then(|value| value.trim().parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info)
}

fn log_dir_from(value: Option<&str>) -> Option<PathBuf> {
    match value.map(str::trim) {
        None | Some("") | Some("off") | Some("none") => None,
        Some(path) => Some(PathBuf::from(path)),
    }
}

fn init_logging_inner(app_name: &str) -> Result<(), String> {
    let level = level_from(
        std::env::var("IBAN_LOG_LEVEL").ok().as_deref(),
        std::env::var("RUST_LOG").ok().as_deref(),
    );
    let log_dir = log_dir_from(std::env::var("IBAN_LOG_DIR").ok().as_deref());

    let mut dispatch = fern::Dispatch::new()
        .level(level)
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} | {:<5} | {} | {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(std::io::stdout());

    if let Some(dir) = log_dir {
        std::fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
        let date = Local::now().format("%Y_%m_%d");
        let file_path = dir.join(format!("{app_name}-{date}.log"));
        dispatch = dispatch.chain(fern::log_file(file_path).map_err(|err| err.to_string())?);
    }

    dispatch.apply().map_err(|err| err.to_string())
}
