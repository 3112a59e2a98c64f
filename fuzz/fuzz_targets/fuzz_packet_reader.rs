//! Fuzz target: `PacketReader::read_packet`
//!
//! Drives arbitrary byte sequences through sync + packet validation until
//! the stream runs dry, and asserts that it never panics, every accepted
//! packet carries a correct checksum, and the counter only moves on
//! accepted packets.
//!
//! cargo fuzz run fuzz_packet_reader

#![no_main]

use grideye::adapters::replay::ReplayTransport;
use grideye::error::ReadError;
use grideye::protocol::packet::PacketReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut link = ReplayTransport::from_bytes(data);
    let mut reader = PacketReader::new();
    let mut accepted = 0u64;

    loop {
        let before = link.remaining();
        match reader.read_packet(&mut link) {
            Ok(packet) => {
                accepted += 1;
                assert_eq!(packet.raw.checksum, packet.raw.computed_checksum());
                assert_eq!(packet.sequence, accepted);
            }
            Err(ReadError::Sync(_)) | Err(ReadError::Checksum(_)) => {}
            Err(ReadError::Closed) => break,
            Err(ReadError::Link(never)) => match never {},
        }
        // Every read consumes input, so the loop terminates.
        assert!(link.remaining() < before);
    }

    assert_eq!(reader.count(), accepted);
});
