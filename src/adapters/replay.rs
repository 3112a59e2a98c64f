//! In-memory transport.
//!
//! Serves a captured or synthesized byte stream to the packet reader and
//! records every byte written back (control commands).  Reads return 0
//! once the buffer is drained, which the reader treats as end of stream.

use std::collections::VecDeque;

use crate::protocol::transport::Transport;

/// Byte source backed by a buffer.
#[derive(Debug, Clone, Default)]
pub struct ReplayTransport {
    read_buffer: VecDeque<u8>,
    write_buffer: Vec<u8>,
    output_closed: bool,
}

impl ReplayTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        let mut link = Self::new();
        link.inject(data);
        link
    }

    /// Append bytes to be read.
    pub fn inject(&mut self, data: &[u8]) {
        self.read_buffer.extend(data);
    }

    /// Bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.read_buffer.len()
    }

    /// Refuse all further writes; they report 0 bytes accepted.
    pub fn close_output(&mut self) {
        self.output_closed = true;
    }

    /// Everything written so far.
    pub fn written(&self) -> &[u8] {
        &self.write_buffer
    }
}

impl Transport for ReplayTransport {
    type Error = core::convert::Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = self.read_buffer.len().min(buf.len());
        for (dst, src) in buf.iter_mut().zip(self.read_buffer.drain(..n)) {
            *dst = src;
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        if self.output_closed {
            return Ok(0);
        }
        self.write_buffer.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
