use std::fs::{self, File};
use std::path::{Path, PathBuf};

use simplelog::{Config, LevelFilter, WriteLogger};
use timetree_term::terminal::Terminal;
use timetree_term::{config, paths, sample, App, HostError};

fn init_logging() -> Result<(), HostError> {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    WriteLogger::init(LevelFilter::Debug, Config::default(), File::create(&path)?)?;
    Ok(())
}

/// `timetree-term [records.json] [options.json]`
fn run() -> Result<(), HostError> {
    init_logging()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let records = match args.first() {
        Some(path) => config::load_records(Path::new(path))?,
        None => sample::devtools().map_err(|source| HostError::Json {
            path: PathBuf::from("<built-in sample>"),
            source,
        })?,
    };
    let options_path = args
        .get(1)
        .map(PathBuf::from)
        .or_else(|| paths::options_file().filter(|p| p.exists()));
    let options = config::options(options_path.as_deref(), &records)?;

    let mut terminal = Terminal::new()?;
    App::new(records, options).run(&mut terminal)
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
