//! Transfer messages.
//!
//! On the wire a message is one type byte followed by its payload. Plain
//! and encrypted payloads are text (an encrypted payload is the hex
//! ciphertext as produced by the sender); a persistent harvesting
//! delegation payload is raw bytes.

use serde::Serialize;

/// Type byte of a plain message.
pub const PLAIN_MESSAGE_TYPE: u8 = 0x00;
/// Type byte of an encrypted message.
pub const ENCRYPTED_MESSAGE_TYPE: u8 = 0x01;
/// Type byte of a persistent harvesting delegation message.
pub const DELEGATION_MESSAGE_TYPE: u8 = 0xFE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Message {
    /// No message. Serializes to zero bytes.
    Empty,
    Plain(String),
    Encrypted(String),
    PersistentHarvestingDelegation(#[serde(serialize_with = "hex_upper")] Vec<u8>),
}

impl Message {
    /// Builds a message from its type byte and raw payload bytes.
    ///
    /// Returns `Ok(Message::Empty)` for an unknown type byte and `Err` with
    /// the payload when a text payload is not valid UTF-8.
    pub fn from_parts(message_type: u8, payload: Vec<u8>) -> Result<Self, Vec<u8>> {
        match message_type {
            PLAIN_MESSAGE_TYPE => String::from_utf8(payload)
                .map(Self::Plain)
                .map_err(|e| e.into_bytes()),
            ENCRYPTED_MESSAGE_TYPE => String::from_utf8(payload)
                .map(Self::Encrypted)
                .map_err(|e| e.into_bytes()),
            DELEGATION_MESSAGE_TYPE => Ok(Self::PersistentHarvestingDelegation(payload)),
            _ => Ok(Self::Empty),
        }
    }

    /// Type byte, or `None` for the empty message.
    pub fn message_type(&self) -> Option<u8> {
        match self {
            Self::Empty => None,
            Self::Plain(_) => Some(PLAIN_MESSAGE_TYPE),
            Self::Encrypted(_) => Some(ENCRYPTED_MESSAGE_TYPE),
            Self::PersistentHarvestingDelegation(_) => Some(DELEGATION_MESSAGE_TYPE),
        }
    }

    fn payload(&self) -> &[u8] {
        match self {
            Self::Empty => &[],
            Self::Plain(text) | Self::Encrypted(text) => text.as_bytes(),
            Self::PersistentHarvestingDelegation(bytes) => bytes,
        }
    }

    /// Wire bytes: type byte plus payload, or nothing for `Empty`.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self.message_type() {
            None => Vec::new(),
            Some(t) => {
                let payload = self.payload();
                let mut out = Vec::with_capacity(1 + payload.len());
                out.push(t);
                out.extend_from_slice(payload);
                out
            }
        }
    }

    /// Length of [`Message::to_bytes`] without allocating.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Empty => 0,
            _ => 1 + self.payload().len(),
        }
    }
}

fn hex_upper<S: serde::Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode_upper(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_message_bytes() {
        let message = Message::Plain("test-message".to_string());
        let bytes = message.to_bytes();
        assert_eq!(bytes[0], PLAIN_MESSAGE_TYPE);
        assert_eq!(&bytes[1..], b"test-message");
        assert_eq!(message.encoded_len(), 13);
    }

    #[test]
    fn empty_message_has_no_bytes() {
        assert!(Message::Empty.to_bytes().is_empty());
        assert_eq!(Message::Empty.encoded_len(), 0);
        assert_eq!(Message::Empty.message_type(), None);
    }

    #[test]
    fn unknown_type_is_empty() {
        assert_eq!(Message::from_parts(0x42, b"x".to_vec()), Ok(Message::Empty));
    }

    #[test]
    fn delegation_keeps_raw_bytes() {
        let message = Message::from_parts(DELEGATION_MESSAGE_TYPE, vec![0xFF, 0x00]).unwrap();
        assert_eq!(message, Message::PersistentHarvestingDelegation(vec![0xFF, 0x00]));
        assert_eq!(message.to_bytes(), vec![0xFE, 0xFF, 0x00]);
    }

    #[test]
    fn invalid_utf8_plain_is_rejected() {
        assert!(Message::from_parts(PLAIN_MESSAGE_TYPE, vec![0xFF, 0xFE]).is_err());
    }
}
