use std::fmt;

use crate::{EMAIL_OFFSET, ID_OFFSET, ID_SIZE, ROW_SIZE, USERNAME_OFFSET};

/// One record of the table.
///
/// On disk a row is `[id: u32 LE][username: 32 bytes][email: 255 bytes]`,
/// strings null-padded to the width of their slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u32,
    pub username: String,
    pub email: String,
}

impl Row {
    pub fn new(id: u32, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }

    /// Writes the row into `dst` starting at `offset`.
    ///
    /// Strings longer than their slot are cut at the slot boundary; callers
    /// are expected to have rejected them already.
    pub fn encode(&self, dst: &mut [u8], offset: usize) {
        let slot = &mut dst[offset..offset + ROW_SIZE];
        slot[ID_OFFSET..USERNAME_OFFSET].copy_from_slice(&self.id.to_le_bytes());
        write_padded(&mut slot[USERNAME_OFFSET..EMAIL_OFFSET], &self.username);
        write_padded(&mut slot[EMAIL_OFFSET..], &self.email);
    }

    /// Reads back a row written by [`Row::encode`] at `offset`.
    pub fn decode(src: &[u8], offset: usize) -> Self {
        let slot = &src[offset..offset + ROW_SIZE];
        let mut id = [0u8; ID_SIZE];
        id.copy_from_slice(&slot[ID_OFFSET..USERNAME_OFFSET]);
        Self {
            id: u32::from_le_bytes(id),
            username: read_padded(&slot[USERNAME_OFFSET..EMAIL_OFFSET]),
            email: read_padded(&slot[EMAIL_OFFSET..]),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}

fn write_padded(dst: &mut [u8], value: &str) {
    let bytes = value.as_bytes();
    let len = bytes.len().min(dst.len());
    dst[..len].copy_from_slice(&bytes[..len]);
    dst[len..].fill(0);
}

fn read_padded(src: &[u8]) -> String {
    let end = src.iter().position(|&b| b == 0).unwrap_or(src.len());
    String::from_utf8_lossy(&src[..end]).into_owned()
}
