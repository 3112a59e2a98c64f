//! Single-byte device control commands.
//!
//! The device does not acknowledge either command.

use super::transport::{Transport, write_all};

/// Start continuous packet streaming.
pub const START_STREAM: u8 = b'*';

/// Stop packet streaming.
pub const STOP_STREAM: u8 = b'~';

/// Send one control byte and flush it onto the link.
///
/// Returns `false` if the link accepted nothing.
pub fn send_command<T: Transport>(link: &mut T, command: u8) -> Result<bool, T::Error> {
    let delivered = write_all(link, &[command])? == 1;
    link.flush()?;
    Ok(delivered)
}
