//! UART telemetry sink
//!
//! Writes each line with its `\r\n` terminator over any blocking
//! `embedded_io::Write` transport (9600 8N1 on the reference board).
//! A failed write drops the line and is counted; the sequence never
//! waits on the operator link.

use embedded_io::Write;
use weighloader_core::telemetry::TelemetryLine;
use weighloader_core::traits::TelemetrySink;

/// Line-oriented telemetry over a serial writer
pub struct UartTelemetry<W> {
    writer: W,
    /// Lines written in full
    sent: u32,
    /// Lines lost to transport errors
    dropped: u32,
}

impl<W: Write> UartTelemetry<W> {
    /// Wrap a serial writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            sent: 0,
            dropped: 0,
        }
    }

    /// Get the number of lines written
    pub fn sent(&self) -> u32 {
        self.sent
    }

    /// Get the number of lines dropped
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Release the writer
    pub fn release(self) -> W {
        self.writer
    }
}

impl<W: Write> TelemetrySink for UartTelemetry<W> {
    fn emit(&mut self, line: TelemetryLine) {
        let text = line.render();

        match self.writer.write_all(text.as_bytes()) {
            Ok(()) => self.sent = self.sent.wrapping_add(1),
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("telemetry line dropped: {}", line);
                self.dropped = self.dropped.wrapping_add(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_io::{ErrorKind, ErrorType};
    use weighloader_core::telemetry::Message;

    /// Writer capturing bytes, optionally failing every write
    #[derive(Default)]
    struct MockUart {
        bytes: heapless::Vec<u8, 256>,
        broken: bool,
    }

    impl ErrorType for MockUart {
        type Error = ErrorKind;
    }

    impl Write for MockUart {
        fn write(&mut self, buf: &[u8]) -> Result<usize, ErrorKind> {
            if self.broken {
                return Err(ErrorKind::BrokenPipe);
            }
            // Accept a few bytes at a time to exercise write_all
            let n = buf.len().min(7);
            self.bytes
                .extend_from_slice(&buf[..n])
                .map_err(|_| ErrorKind::OutOfMemory)?;
            Ok(n)
        }

        fn flush(&mut self) -> Result<(), ErrorKind> {
            Ok(())
        }
    }

    #[test]
    fn test_lines_written_in_order_with_terminator() {
        let mut sink = UartTelemetry::new(MockUart::default());

        sink.emit(Message::MovingUp.into());
        sink.emit(Message::LowDetect2.into());
        sink.emit(TelemetryLine::CycleCount(12));

        assert_eq!(sink.sent(), 3);
        assert_eq!(sink.dropped(), 0);
        assert_eq!(
            sink.release().bytes.as_slice(),
            b"Moving_up\r\nLow_Detect_2\r\nTotal Counts = 12 \r\n"
        );
    }

    #[test]
    fn test_broken_link_drops_lines() {
        let mut sink = UartTelemetry::new(MockUart {
            broken: true,
            ..Default::default()
        });

        sink.emit(Message::High.into());
        sink.emit(Message::UpPosition.into());

        assert_eq!(sink.sent(), 0);
        assert_eq!(sink.dropped(), 2);
    }
}
