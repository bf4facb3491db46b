//! The opaque message sink the adapter delivers to.
//!
//! The real transport is a midir output connection on the first available
//! port; when MIDI is not requested the adapter talks to [`NullSink`].

use midir::{MidiOutput, MidiOutputConnection};

use crate::error::{Error, Result};

pub trait MidiSink {
    /// Deliver one `[status, data1, data2]` message.
    fn send_message(&mut self, message: [u8; 3]) -> Result<()>;
}

/// Swallows every message. Stands in for the transport when MIDI output is
/// disabled.
pub struct NullSink;

impl MidiSink for NullSink {
    fn send_message(&mut self, _message: [u8; 3]) -> Result<()> {
        Ok(())
    }
}

/// A midir-backed sink owning exactly one output connection.
pub struct MidirSink {
    connection: MidiOutputConnection,
}

impl MidirSink {
    /// Connect to the first available MIDI output port.
    pub fn open(client_name: &str) -> Result<MidirSink> {
        let output = MidiOutput::new(client_name).map_err(|e| Error::Midi(e.to_string()))?;
        let ports = output.ports();
        let port = ports
            .first()
            .ok_or_else(|| Error::Midi("no MIDI output port available".to_string()))?;
        let connection = output
            .connect(port, client_name)
            .map_err(|e| Error::Midi(e.to_string()))?;
        Ok(MidirSink { connection })
    }

    /// Names of the MIDI output ports currently available.
    pub fn list_ports(client_name: &str) -> Result<Vec<String>> {
        let output = MidiOutput::new(client_name).map_err(|e| Error::Midi(e.to_string()))?;
        let mut names = Vec::new();
        for port in output.ports() {
            names.push(
                output
                    .port_name(&port)
                    .map_err(|e| Error::Midi(e.to_string()))?,
            );
        }
        Ok(names)
    }
}

impl MidiSink for MidirSink {
    fn send_message(&mut self, message: [u8; 3]) -> Result<()> {
        self.connection
            .send(&message)
            .map_err(|e| Error::Midi(e.to_string()))
    }
}
