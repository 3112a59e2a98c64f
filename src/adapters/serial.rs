//! Serial transport over a USB-UART bridge.
//!
//! Reads block across port timeouts so the packet reader sees a blocking
//! byte source.  An optional stop flag turns a timeout into an
//! `Interrupted` error, which is how a signal ends the loop cleanly.

use std::io::{self, Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::info;
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::config::LinkConfig;
use crate::protocol::transport::Transport;

/// Port read timeout; bounds how long a stop request can go unnoticed.
const READ_TIMEOUT: Duration = Duration::from_millis(200);

/// Serial link to the sensor board.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    stop: Option<Arc<AtomicBool>>,
}

impl SerialTransport {
    /// Open the port at 8N1, no flow control.
    pub fn open(config: &LinkConfig) -> Result<Self, serialport::Error> {
        let port = serialport::new(&config.port, config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(READ_TIMEOUT)
            .open()?;

        info!("Opened serial port: {} at {} baud", config.port, config.baud_rate);
        Ok(Self { port, stop: None })
    }

    /// Abort blocking reads once `flag` is set.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop = Some(flag);
        self
    }

    fn stop_requested(&self) -> bool {
        self.stop.as_ref().is_some_and(|f| f.load(Ordering::Relaxed))
    }
}

impl Transport for SerialTransport {
    type Error = io::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        loop {
            if self.stop_requested() {
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            match self.port.read(buf) {
                Ok(0) => continue,
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::TimedOut => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        self.port.write(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.port.flush()
    }
}
