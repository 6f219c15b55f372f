//! Text encodings used to decode file content before rewriting and to
//! re-encode it afterwards.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Config files and `--encoding` accept the same names through [`Encoding::from_str`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Encoding {
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "ascii")]
    Ascii,
    #[serde(rename = "latin-1")]
    Latin1,
}

impl TryFrom<String> for Encoding {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Encoding::from_str(&value)
    }
}

impl Encoding {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "ascii" | "us-ascii" => Ok(Encoding::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Encoding::Latin1),
            _ => Err(Error::validation_invalid_argument(
                "encoding",
                format!("Unknown encoding '{}'. Use: utf-8, ascii, latin-1", s),
                None,
                None,
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin-1",
        }
    }

    /// Decode raw file bytes. `path` is only used for error reporting.
    pub fn decode(&self, bytes: &[u8], path: &Path) -> Result<String> {
        match self {
            Encoding::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|e| Error::rewrite_decode_failed(path, self.as_str(), e.to_string())),
            Encoding::Ascii => {
                if let Some(pos) = bytes.iter().position(|b| !b.is_ascii()) {
                    return Err(Error::rewrite_decode_failed(
                        path,
                        self.as_str(),
                        format!("byte 0x{:02x} at offset {} is not ASCII", bytes[pos], pos),
                    ));
                }
                Ok(bytes.iter().map(|&b| b as char).collect())
            }
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }

    /// Encode rewritten text back to bytes with the same encoding it was read with.
    pub fn encode(&self, text: &str, path: &Path) -> Result<Vec<u8>> {
        let limit = match self {
            Encoding::Utf8 => return Ok(text.as_bytes().to_vec()),
            Encoding::Ascii => 0x7f,
            Encoding::Latin1 => 0xff,
        };

        text.chars()
            .map(|c| {
                let code = c as u32;
                if code <= limit {
                    Ok(code as u8)
                } else {
                    Err(Error::rewrite_encode_failed(
                        path,
                        self.as_str(),
                        format!("character {:?} (U+{:04X}) is out of range", c, code),
                    ))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> &'static Path {
        Path::new("test.html")
    }

    #[test]
    fn from_str_accepts_aliases() {
        assert_eq!(Encoding::from_str("UTF-8").unwrap(), Encoding::Utf8);
        assert_eq!(Encoding::from_str("utf8").unwrap(), Encoding::Utf8);
        assert_eq!(Encoding::from_str("iso-8859-1").unwrap(), Encoding::Latin1);
        assert_eq!(Encoding::from_str("ascii").unwrap(), Encoding::Ascii);
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = Encoding::from_str("utf-16").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn utf8_decode_rejects_invalid_bytes() {
        let err = Encoding::Utf8.decode(&[0x66, 0xff, 0x6f], p()).unwrap_err();
        assert_eq!(err.code.as_str(), "rewrite.decode_failed");
    }

    #[test]
    fn utf8_keeps_bom_and_crlf() {
        let bytes = b"\xef\xbb\xbfa\r\nb";
        let text = Encoding::Utf8.decode(bytes, p()).unwrap();
        assert_eq!(Encoding::Utf8.encode(&text, p()).unwrap(), bytes.to_vec());
    }

    #[test]
    fn ascii_decode_reports_offset() {
        let err = Encoding::Ascii.decode("caf\u{e9}".as_bytes(), p()).unwrap_err();
        assert!(err.details["error"].as_str().unwrap().contains("offset 3"));
    }

    #[test]
    fn latin1_decodes_every_byte() {
        let text = Encoding::Latin1.decode(&[0x63, 0xe9], p()).unwrap();
        assert_eq!(text, "c\u{e9}");
        assert_eq!(Encoding::Latin1.encode(&text, p()).unwrap(), vec![0x63, 0xe9]);
    }

    #[test]
    fn latin1_encode_rejects_wide_chars() {
        let err = Encoding::Latin1.encode("logo\u{2192}", p()).unwrap_err();
        assert_eq!(err.code.as_str(), "rewrite.encode_failed");
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&Encoding::Latin1).unwrap();
        assert_eq!(json, "\"latin-1\"");
        let parsed: Encoding = serde_json::from_str("\"utf8\"").unwrap();
        assert_eq!(parsed, Encoding::Utf8);
    }

    #[test]
    fn serde_accepts_same_names_as_from_str() {
        for name in ["UTF-8", "Latin-1", "US-ASCII", "ISO-8859-1"] {
            let parsed: Encoding = serde_json::from_str(&format!("\"{}\"", name)).unwrap();
            assert_eq!(parsed, Encoding::from_str(name).unwrap());
        }
        assert!(serde_json::from_str::<Encoding>("\"utf-16\"").is_err());
    }
}
