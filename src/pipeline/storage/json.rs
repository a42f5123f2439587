use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::constants::OUTPUT_EXTENSION;
use crate::error::Result;

/// JSON formatter that escapes every non-ASCII character as `\uXXXX`
/// (UTF-16 surrogate pairs above the BMP) and delegates layout to `F`.
#[derive(Debug, Clone, Default)]
pub struct AsciiFormatter<F> {
    inner: F,
}

impl<F> AsciiFormatter<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F: Formatter> Formatter for AsciiFormatter<F> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..idx].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_object_value(writer)
    }
}

/// Serialize `value` to ASCII-safe JSON bytes
pub fn to_ascii_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    if pretty {
        let formatter = AsciiFormatter::new(PrettyFormatter::new());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut serializer)?;
    } else {
        let formatter = AsciiFormatter::new(CompactFormatter);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut serializer)?;
    }
    Ok(buf)
}

/// Serialize fully in memory, then write in one call; a serialization
/// failure leaves no file behind.
#[instrument(skip(value), fields(path = %path.display()))]
pub fn write_catalog<T: Serialize + ?Sized>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    let bytes = to_ascii_json(value, pretty)?;
    fs::write(path, &bytes)?;
    info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// `<epoch-seconds>_<input stem>.json`, where the stem is the file name up
/// to its first '.'. The file goes next to the input unless `directory` is set.
pub fn default_output_path(input: &Path, epoch_secs: i64, directory: Option<&Path>) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name.split('.').next().unwrap_or_default();
    let output_name = format!("{epoch_secs}_{stem}.{OUTPUT_EXTENSION}");

    let dir = directory
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(output_name)
}
