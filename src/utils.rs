use crate::{FormatError, Result};

/// Converts fixed-width las byte fields into strings.
///
/// LAS string fields are ASCII, padded with nuls. Everything from the first nul on is ignored,
/// whatever it holds.
pub(crate) trait AsLasStr {
    fn as_las_str(&self) -> Result<&str>;
}

impl AsLasStr for [u8] {
    fn as_las_str(&self) -> Result<&str> {
        let bytes = if let Some(idx) = self.iter().position(|&n| n == 0) {
            &self[0..idx]
        } else {
            self
        };
        if bytes.is_ascii() {
            // ascii is always valid utf8
            std::str::from_utf8(bytes).map_err(|_| FormatError::NotAscii(bytes.to_vec()).into())
        } else {
            Err(FormatError::NotAscii(bytes.to_vec()).into())
        }
    }
}
