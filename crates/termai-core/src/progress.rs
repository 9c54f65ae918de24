//! Progress display during blocking requests
//!
//! The indicator runs as a background task that overwrites the current
//! output line with a rotating phase label and a cycling ellipsis. Stopping
//! it blanks the line and waits for the task to finish, so subsequent
//! output is never corrupted by indicator remnants and tests can assert on
//! the byte stream deterministically.
//!
//! Failing to draw is never fatal for the request the indicator decorates;
//! all write faults are swallowed.

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Shared writer the indicator draws to. Production uses stdout; tests
/// inject a buffer.
pub type ProgressSink = Arc<Mutex<dyn Write + Send>>;

/// The default sink: process stdout
pub fn stdout_sink() -> ProgressSink {
    Arc::new(Mutex::new(io::stdout()))
}

/// Handle controlling a running progress indicator.
///
/// Must be stopped exactly once; the indicator must never outlive the
/// request it decorates.
pub struct ProgressHandle {
    running: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl ProgressHandle {
    /// Stop the indicator and wait until its final blank write completes.
    pub async fn stop(self) {
        self.running.store(false, Ordering::Relaxed);
        let _ = self.task.await;
    }
}

/// Animated status-line indicator
pub struct ProgressIndicator;

impl ProgressIndicator {
    /// Start the indicator.
    ///
    /// Every `interval` the line is redrawn as `"{phase} {dots}"`; the
    /// ellipsis cycles through one, two, three dots and the phase label
    /// advances to the next entry every full ellipsis cycle.
    pub fn start(phases: &[&str], interval: Duration, sink: ProgressSink) -> ProgressHandle {
        let phases: Vec<String> = if phases.is_empty() {
            vec!["Working".to_string()]
        } else {
            phases.iter().map(|s| (*s).to_string()).collect()
        };

        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let task = tokio::spawn(async move {
            let dots = [".", "..", "..."];
            let mut tick = 0usize;

            while flag.load(Ordering::Relaxed) {
                let phase = &phases[(tick / dots.len()) % phases.len()];
                {
                    let mut out = sink.lock();
                    let _ = write!(out, "\r{} {}{}", phase, dots[tick % dots.len()], " ".repeat(10));
                    let _ = out.flush();
                }
                sleep(interval).await;
                tick += 1;
            }

            // Final overwrite clears the line before the task terminates.
            let mut out = sink.lock();
            let _ = write!(out, "\r{}\r", " ".repeat(80));
            let _ = out.flush();
        });

        ProgressHandle { running, task }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BufSink {
        buf: Arc<Mutex<Vec<u8>>>,
    }

    impl Write for BufSink {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.buf.lock().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn buffer_sink() -> (ProgressSink, Arc<Mutex<Vec<u8>>>) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let sink: ProgressSink = Arc::new(Mutex::new(BufSink {
            buf: Arc::clone(&buf),
        }));
        (sink, buf)
    }

    fn blanking_write() -> String {
        format!("\r{}\r", " ".repeat(80))
    }

    #[tokio::test]
    async fn test_indicator_draws_phases_and_blanks_on_stop() {
        let (sink, buf) = buffer_sink();
        let handle =
            ProgressIndicator::start(&["Thinking", "Analysing"], Duration::from_millis(5), sink);
        sleep(Duration::from_millis(40)).await;
        handle.stop().await;

        let output = String::from_utf8(buf.lock().clone()).unwrap();
        assert!(output.contains("Thinking ."));
        // The blanking write is the very last thing on the stream.
        assert!(output.ends_with(&blanking_write()));
    }

    #[tokio::test]
    async fn test_immediate_stop_leaves_clean_line() {
        let (sink, buf) = buffer_sink();
        let handle = ProgressIndicator::start(&["Thinking"], Duration::from_millis(5), sink);
        handle.stop().await;

        let output = String::from_utf8(buf.lock().clone()).unwrap();
        assert!(output.ends_with(&blanking_write()));
    }

    #[tokio::test]
    async fn test_phase_advances_after_full_ellipsis_cycle() {
        let (sink, buf) = buffer_sink();
        let handle =
            ProgressIndicator::start(&["Thinking", "Analysing"], Duration::from_millis(2), sink);
        sleep(Duration::from_millis(50)).await;
        handle.stop().await;

        let output = String::from_utf8(buf.lock().clone()).unwrap();
        assert!(output.contains("Thinking"));
        assert!(output.contains("Analysing"));
    }

    #[tokio::test]
    async fn test_empty_phase_list_falls_back_to_default_label() {
        let (sink, buf) = buffer_sink();
        let handle = ProgressIndicator::start(&[], Duration::from_millis(2), sink);
        sleep(Duration::from_millis(10)).await;
        handle.stop().await;

        let output = String::from_utf8(buf.lock().clone()).unwrap();
        assert!(output.contains("Working"));
    }
}
