//! Fixed-layout packet reader.
//!
//! After a successful sync the reader pulls the thermistor, payload and
//! checksum fields in wire order and validates the checksum.  A packet that
//! fails validation is dropped whole and does not advance the counter.

use log::debug;

use super::sync::StreamSynchronizer;
use super::transport::{Transport, read_byte, read_exact};
use super::{MARKER, MARKER_LEN, PACKET_WIDTH, PAYLOAD_LEN, THERMISTOR_LEN};
use crate::error::{ChecksumError, ReadError};
use crate::frame::{Frame, Grid, Thermistor, encode_payload};

/// The data fields of one packet, as they came off the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPacket {
    pub thermistor: [u8; THERMISTOR_LEN],
    pub payload: [u8; PAYLOAD_LEN],
    pub checksum: u8,
}

impl RawPacket {
    /// Build a packet with a correct checksum.
    pub fn new(thermistor: [u8; THERMISTOR_LEN], payload: [u8; PAYLOAD_LEN]) -> Self {
        Self {
            thermistor,
            payload,
            checksum: checksum(&thermistor, &payload),
        }
    }

    /// Checksum recomputed from the data fields.
    pub fn computed_checksum(&self) -> u8 {
        checksum(&self.thermistor, &self.payload)
    }

    /// Full wire image, marker included.
    pub fn to_bytes(&self) -> [u8; PACKET_WIDTH] {
        let mut out = [0u8; PACKET_WIDTH];
        out[..MARKER_LEN].fill(MARKER);
        let mut at = MARKER_LEN;
        out[at..at + THERMISTOR_LEN].copy_from_slice(&self.thermistor);
        at += THERMISTOR_LEN;
        out[at..at + PAYLOAD_LEN].copy_from_slice(&self.payload);
        out[PACKET_WIDTH - 1] = self.checksum;
        out
    }
}

/// A validated packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    pub raw: RawPacket,
    /// Decoded thermistor reading.
    pub thermistor: Thermistor,
    /// Packet counter value after this packet was accepted (1-based).
    pub sequence: u64,
}

/// Sum of all data bytes, mod 256.  The marker is not covered.
pub fn checksum(thermistor: &[u8], payload: &[u8]) -> u8 {
    thermistor
        .iter()
        .chain(payload)
        .fold(0u8, |acc, b| acc.wrapping_add(*b))
}

/// Wire bytes for a packet that decodes to `grid` with thermistor `thermistor`.
pub fn encode_packet(thermistor: i16, grid: &Grid<i16>) -> [u8; PACKET_WIDTH] {
    RawPacket::new(thermistor.to_le_bytes(), encode_payload(grid)).to_bytes()
}

/// Reads and validates packets, owning the packet counter.
#[derive(Debug, Default)]
pub struct PacketReader {
    sync: StreamSynchronizer,
    count: u64,
}

impl PacketReader {
    pub fn new() -> Self {
        Self {
            sync: StreamSynchronizer::new(),
            count: 0,
        }
    }

    /// Successfully validated packets since stream start.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sync, then read one packet.
    pub fn read_packet<T: Transport>(&mut self, link: &mut T) -> Result<Packet, ReadError<T::Error>> {
        self.sync.sync(link)?;
        self.read_after_sync(link)
    }

    /// Read the packet fields from a stream already positioned past the marker.
    pub fn read_after_sync<T: Transport>(
        &mut self,
        link: &mut T,
    ) -> Result<Packet, ReadError<T::Error>> {
        let mut thermistor = [0u8; THERMISTOR_LEN];
        read_exact(link, &mut thermistor)?;

        let mut payload = [0u8; PAYLOAD_LEN];
        read_exact(link, &mut payload)?;

        let received = read_byte(link)?;
        let raw = RawPacket {
            thermistor,
            payload,
            checksum: received,
        };

        let computed = raw.computed_checksum();
        if computed != received {
            debug!(
                "discarded packet grid: {:?}",
                Frame::decode(&raw.payload).cells()
            );
            return Err(ChecksumError { received, computed }.into());
        }

        self.count += 1;
        Ok(Packet {
            raw,
            thermistor: Thermistor::from_bytes(thermistor),
            sequence: self.count,
        })
    }
}
