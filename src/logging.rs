use anyhow::{Context, Result};
use lazy_static::lazy_static;
use log::{Level, LevelFilter};
use parking_lot::RwLock;

lazy_static! {
    pub static ref LOG_LEVEL: RwLock<Level> = RwLock::new(Level::Info);
}

pub fn setup() -> Result<()> {
    fern::Dispatch::new()
        .filter(|metadata| {
            match metadata.target() {
                "launch_announcement_server" => true,
                x if x.starts_with("launch_announcement_server::") => true,
                _ => false,
            }
        })
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}:{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S %Z"),
                record.level(),
                record.file().unwrap_or("?"),
                record.line().unwrap_or(0),
                message,
            ))
        })
        .chain(fern::Dispatch::new()
            .filter(|meta| {
                meta.level() <= *LOG_LEVEL.read()
            })
            .chain(std::io::stdout())
        )
        .chain(fern::Dispatch::new()
            .level(LevelFilter::Trace)
            .chain(fern::log_file("launch-announcement.log")?)
        )
        .apply()
        .context("could not set up logging facility")
}
