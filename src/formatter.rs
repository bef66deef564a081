//! Tracing event formatter that stamps every line with wall time and the simulation frame.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use time::macros::format_description;
use time::{format_description::FormatItem, OffsetDateTime};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Frames simulated so far, shared by every log line.
static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Frames are shown as 16-bit hex; the counter wraps visually.
const FRAME_DISPLAY_MASK: u64 = 0xFFFF;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:4]");

/// `HH:MM:SS.ffff 0xFFFF LEVEL target: fields`
pub struct CustomFormatter;

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        let stamp = OffsetDateTime::now_utc().format(&TIMESTAMP_FORMAT).map_err(|_| fmt::Error)?;
        let frame = frame_count() & FRAME_DISPLAY_MASK;
        if ansi {
            write!(writer, "\x1b[2m{stamp} 0x{frame:04X}\x1b[0m ")?;
        } else {
            write!(writer, "{stamp} 0x{frame:04X} ")?;
        }

        let (color, label) = level_style(meta.level());
        if ansi {
            write!(writer, "{color}{label}\x1b[0m \x1b[2m{}:\x1b[0m ", meta.target())?;
        } else {
            write!(writer, "{label} {}: ", meta.target())?;
        }

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_style(level: &Level) -> (&'static str, &'static str) {
    match *level {
        Level::TRACE => ("\x1b[35m", "TRACE"),
        Level::DEBUG => ("\x1b[34m", "DEBUG"),
        Level::INFO => ("\x1b[32m", " INFO"),
        Level::WARN => ("\x1b[33m", " WARN"),
        Level::ERROR => ("\x1b[31m", "ERROR"),
    }
}

/// Advance the frame counter by one; called once per simulated frame.
pub fn advance_frame() {
    FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);
}

/// Frames simulated since start-up.
pub fn frame_count() -> u64 {
    FRAME_COUNTER.load(Ordering::Relaxed)
}
