use crate::settings::DEFAULT_LOG_FILE_NAME;
use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, RwLock};

const LOG_ROTATE_BYTES: u64 = 100 * 1024;

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub level: LevelFilter,
    pub file_path: PathBuf,
}

struct FileSink {
    path: PathBuf,
    file: File,
    written: u64,
}

impl FileSink {
    fn open(path: PathBuf) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata().map(|meta| meta.len()).unwrap_or(0);
        Ok(Self { path, file, written })
    }

    /// Append one line, rotating the file to `<name>.1` once it would exceed
    /// the size cap.
    fn append(&mut self, line: &str) -> io::Result<()> {
        let bytes = line.as_bytes();
        if self.written + bytes.len() as u64 > LOG_ROTATE_BYTES {
            rotate_log_file(&self.path)?;
            self.file = OpenOptions::new().create(true).write(true).truncate(true).open(&self.path)?;
            self.written = 0;
        }
        self.file.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }
}

struct Logger {
    config: RwLock<LoggingConfig>,
    sink: Mutex<Option<FileSink>>,
}

impl Logger {
    fn new(config: LoggingConfig) -> Self {
        Self { config: RwLock::new(config), sink: Mutex::new(None) }
    }

    fn set_config(&self, config: LoggingConfig) {
        let mut guard = self.config.write().expect("logger config lock poisoned");
        let sink_stale = guard.file_path != config.file_path || guard.enabled != config.enabled;
        *guard = config;

        if sink_stale {
            let mut sink = self.sink.lock().expect("logger sink lock poisoned");
            *sink = None;
        }
    }

    fn max_level(&self) -> LevelFilter {
        let config = self.config.read().expect("logger config lock poisoned");
        if config.enabled { config.level } else { LevelFilter::Off }
    }

    fn is_app_target(target: &str) -> bool {
        target == "oxide_docdb" || target.starts_with("oxide_docdb::")
    }

    fn write_line(&self, line: &str, config: &LoggingConfig) {
        let _ = io::stderr().write_all(line.as_bytes());

        let mut guard = self.sink.lock().expect("logger sink lock poisoned");
        let sink = match guard.as_mut() {
            Some(sink) if sink.path == config.file_path => sink,
            _ => {
                *guard = FileSink::open(config.file_path.clone()).ok();
                match guard.as_mut() {
                    Some(sink) => sink,
                    None => return,
                }
            }
        };

        if sink.append(line).is_err() {
            *guard = None;
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let config = self.config.read().expect("logger config lock poisoned");
        config.enabled && metadata.level() <= config.level && Self::is_app_target(metadata.target())
    }

    fn log(&self, record: &Record) {
        let config = self.config.read().expect("logger config lock poisoned").clone();
        if !config.enabled || record.level() > config.level || !Self::is_app_target(record.target())
        {
            return;
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let line = format!(
            "{timestamp} [{level}] {message}\n",
            level = record.level(),
            message = record.args()
        );
        self.write_line(&line, &config);
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub fn apply_settings(enabled: bool, level: LevelFilter, file_path: &str) {
    let trimmed = file_path.trim();
    let path = if trimmed.is_empty() {
        PathBuf::from(DEFAULT_LOG_FILE_NAME)
    } else {
        PathBuf::from(trimmed)
    };

    let config = LoggingConfig { enabled, level, file_path: path };
    let logger = LOGGER.get_or_init(|| Logger::new(config.clone()));
    logger.set_config(config);
    let _ = log::set_logger(logger);
    log::set_max_level(logger.max_level());
}

fn rotate_log_file(path: &Path) -> io::Result<()> {
    let file_name =
        path.file_name().and_then(|name| name.to_str()).unwrap_or(DEFAULT_LOG_FILE_NAME);
    let rotated = path.with_file_name(format!("{file_name}.1"));
    if rotated.exists() {
        let _ = fs::remove_file(&rotated);
    }
    if path.exists() {
        fs::rename(path, rotated)?;
    }
    Ok(())
}
