//! The row schema and its fixed-width binary encoding.
//!
//! Every row occupies exactly [`ROW_SIZE`] bytes:
//!
//! | field      | offset              | width               | encoding               |
//! |------------|---------------------|---------------------|------------------------|
//! | `id`       | [`ID_OFFSET`]       | [`ID_SIZE`]         | `u32`, little endian   |
//! | `username` | [`USERNAME_OFFSET`] | [`USERNAME_SIZE`]   | UTF-8, zero padded     |
//! | `email`    | [`EMAIL_OFFSET`]    | [`EMAIL_SIZE`]      | UTF-8, zero padded     |
//!
//! A text field that fills its whole width has no terminating zero. Text ends
//! at the first zero byte, so a username or email must not contain NUL;
//! `Statement::prepare` rejects such input.

use std::fmt;

use crate::{EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE, ROW_SIZE, USERNAME_OFFSET, USERNAME_SIZE};

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
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}

/// Converts rows to and from their on-page representation.
pub struct RowCodec;

impl RowCodec {
    /// Encodes `row` into a freshly allocated block of [`ROW_SIZE`] bytes.
    pub fn encode(row: &Row) -> Vec<u8> {
        let mut block = vec![0u8; ROW_SIZE];
        Self::encode_into(row, &mut block);
        block
    }

    /// Encodes `row` into `dst`, which must be exactly one row slot.
    ///
    /// Text longer than its column is cut at the column width.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is not [`ROW_SIZE`] bytes long.
    pub fn encode_into(row: &Row, dst: &mut [u8]) {
        assert_eq!(dst.len(), ROW_SIZE, "row slot has the wrong size");

        dst[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&row.id.to_le_bytes());
        write_text(
            &mut dst[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE],
            &row.username,
        );
        write_text(&mut dst[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE], &row.email);
    }

    /// Decodes one row slot.
    ///
    /// # Panics
    ///
    /// Panics if `src` is shorter than [`ROW_SIZE`] bytes.
    pub fn decode(src: &[u8]) -> Row {
        let mut id = [0u8; ID_SIZE];
        id.copy_from_slice(&src[ID_OFFSET..ID_OFFSET + ID_SIZE]);

        Row {
            id: u32::from_le_bytes(id),
            username: read_text(&src[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]),
            email: read_text(&src[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]),
        }
    }
}

fn write_text(field: &mut [u8], text: &str) {
    let bytes = text.as_bytes();
    let len = bytes.len().min(field.len());
    field[..len].copy_from_slice(&bytes[..len]);
    field[len..].fill(0);
}

fn read_text(field: &[u8]) -> String {
    let len = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..len]).into_owned()
}
