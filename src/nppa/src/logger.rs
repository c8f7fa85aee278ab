use slog::{Drain, Level, Logger, KV};
use std::fmt;
use std::fs::File;
use std::path::PathBuf;

/// The logging mode to use.
pub enum LoggingMode {
    /// The default mode for logging; output without any decoration, to STDERR.
    Stderr,

    /// Tee logging to a file (in addition to STDERR).
    Tee(PathBuf),

    /// Output Debug logs and up to a file, regardless of verbosity.
    File(PathBuf),
}

/// A Slog formatter that writes the level, message and key-values to a term decorator.
pub struct NppaFormat<D>
where
    D: slog_term::Decorator,
{
    decorator: D,
}

impl<D: slog_term::Decorator> NppaFormat<D> {
    pub fn new(decorator: D) -> NppaFormat<D> {
        NppaFormat { decorator }
    }
}

impl<D: slog_term::Decorator> slog::Drain for NppaFormat<D> {
    type Ok = ();
    type Err = std::io::Error;

    fn log(
        &self,
        record: &slog::Record<'_>,
        values: &slog::OwnedKVList,
    ) -> Result<Self::Ok, Self::Err> {
        self.decorator.with_record(record, values, |decorator| {
            if record.level() <= slog::Level::Warning {
                decorator.start_level()?;
                write!(decorator, "{}: ", record.level().as_str())?;
                // start_whitespace resets to normal coloring after printing the level
                decorator.start_whitespace()?;
            }

            decorator.start_msg()?;
            write!(decorator, "{}", record.msg())?;

            let mut pairs = KeyValueWriter::default();
            record.kv().serialize(record, &mut pairs)?;
            values.serialize(record, &mut pairs)?;
            write!(decorator, "{}", pairs.0)?;

            decorator.start_whitespace()?;
            writeln!(decorator)?;

            decorator.flush()?;
            Ok(())
        })
    }
}

/// Collects key-value pairs as ` key=value` text.
#[derive(Default)]
struct KeyValueWriter(String);

impl slog::Serializer for KeyValueWriter {
    fn emit_arguments(&mut self, key: slog::Key, val: &fmt::Arguments<'_>) -> slog::Result {
        self.0.push_str(&format!(" {key}={val}"));
        Ok(())
    }
}

fn create_drain(mode: LoggingMode) -> std::io::Result<Logger> {
    let logger = match mode {
        LoggingMode::Stderr => {
            let decorator = slog_term::TermDecorator::new().stderr().build();
            let drain = NppaFormat::new(decorator).fuse();
            let async_drain = slog_async::Async::new(drain).build().fuse();
            Logger::root(async_drain, slog::o!())
        }
        LoggingMode::File(out) => {
            let file = File::create(out)?;
            let decorator = slog_term::PlainDecorator::new(file);
            let drain = slog_term::FullFormat::new(decorator).build().fuse();
            Logger::root(slog_async::Async::new(drain).build().fuse(), slog::o!())
        }
        // Two drains duplicated.
        LoggingMode::Tee(out) => Logger::root(
            slog::Duplicate::new(
                create_drain(LoggingMode::Stderr)?,
                create_drain(LoggingMode::File(out))?,
            )
            .fuse(),
            slog::o!(),
        ),
    };
    Ok(logger)
}

/// Create a root logger.
/// The verbose_level can be negative, in which case it's a quiet mode which removes warnings,
/// then errors entirely.
pub fn create_root_logger(verbose_level: i64, mode: LoggingMode) -> std::io::Result<Logger> {
    let log_level = match verbose_level {
        -2 => Level::Error,
        -1 => Level::Warning,
        0 => Level::Info,
        1 => Level::Debug,
        x => {
            if x > 0 {
                Level::Trace
            } else {
                return Ok(Logger::root(slog::Discard, slog::o!()));
            }
        }
    };

    let drain = slog::LevelFilter::new(create_drain(mode)?, log_level).fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    Ok(Logger::root(
        drain,
        slog::o!("version" => env!("CARGO_PKG_VERSION")),
    ))
}

/// A logger that drops everything, for embedding without output.
pub fn discard_logger() -> Logger {
    Logger::root(slog::Discard, slog::o!())
}
