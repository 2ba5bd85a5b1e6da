//! Log output for the browser build.
//!
//! The core only emits `tracing` events. In the browser they are formatted by
//! `tracing_subscriber::fmt` and handed to the devtools console one event per
//! call, at the console level matching the event (`error`, `warn` or `log`).

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Receives one formatted event.
pub type Emit = fn(Level, &str);

/// `MakeWriter` that buffers each event and emits it when the writer drops.
#[derive(Clone, Copy)]
pub struct ConsoleWriter {
    emit: Emit,
}

impl ConsoleWriter {
    pub fn new(emit: Emit) -> Self {
        Self { emit }
    }
}

/// Buffer for a single event.
pub struct EventBuffer {
    level: Level,
    buf: Vec<u8>,
    emit: Emit,
}

impl io::Write for EventBuffer {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for EventBuffer {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let text = text.trim_end();
        if !text.is_empty() {
            (self.emit)(self.level, text);
        }
    }
}

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = EventBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        EventBuffer {
            level: Level::INFO,
            buf: Vec::new(),
            emit: self.emit,
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        EventBuffer {
            level: *meta.level(),
            buf: Vec::new(),
            emit: self.emit,
        }
    }
}

/// Send an event to the browser console.
#[cfg(target_arch = "wasm32")]
pub fn browser_console(level: Level, text: &str) {
    if level == Level::ERROR {
        web_sys::console::error_1(&text.into());
    } else if level == Level::WARN {
        web_sys::console::warn_1(&text.into());
    } else {
        web_sys::console::log_1(&text.into());
    }
}

/// Install the global subscriber for the browser build. Calling it twice is harmless.
#[cfg(target_arch = "wasm32")]
pub fn init_browser(max_level: Level) {
    // SystemTime panics on wasm32-unknown-unknown, so no timestamps.
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleWriter::new(browser_console))
        .with_max_level(max_level)
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
