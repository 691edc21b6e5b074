//! Byte form of individual objects.

use crate::error::{PdfError, Result};
use crate::objects::{Array, Dictionary, Object, ObjectId, ObjectRegistry, PdfName, PdfString, Stream};
use crate::writer::config::{DanglingReferencePolicy, WriterConfig};
use crate::writer::number::{format_real, RealPrecision};
use std::io::Write;

/// Writes objects in their canonical byte form.
///
/// With a registry attached, every reference is checked against it and
/// dangling ones are handled per [`DanglingReferencePolicy`]. Without one,
/// references are written as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer<'r> {
    compact: bool,
    precision: RealPrecision,
    dangling: DanglingReferencePolicy,
    registry: Option<&'r ObjectRegistry>,
}

impl<'r> ObjectSerializer<'r> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &WriterConfig) -> Self {
        Self {
            compact: config.compact,
            precision: config.real_precision,
            dangling: config.dangling_references,
            registry: None,
        }
    }

    /// Checks references against `registry`.
    pub fn with_registry(mut self, registry: &'r ObjectRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn serialize(&self, object: &Object) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, object)?;
        Ok(buf)
    }

    /// Lossy text form, handy for tests and logging.
    pub fn serialize_to_string(&self, object: &Object) -> Result<String> {
        Ok(String::from_utf8_lossy(&self.serialize(object)?).into_owned())
    }

    /// Writes `object` as the body of an indirect object, so a stream is
    /// allowed at the top level.
    pub fn write_object<W: Write>(&self, w: &mut W, object: &Object) -> Result<()> {
        self.write_value(w, object, 0)
    }

    /// `N G obj\n<object>\nendobj\n`
    pub fn write_indirect<W: Write>(&self, w: &mut W, id: ObjectId, object: &Object) -> Result<()> {
        writeln!(w, "{} {} obj", id.number(), id.generation())?;
        self.write_object(w, object)?;
        w.write_all(b"\nendobj\n")?;
        Ok(())
    }

    fn write_value<W: Write>(&self, w: &mut W, object: &Object, depth: usize) -> Result<()> {
        match object {
            Object::Null => w.write_all(b"null")?,
            Object::Boolean(b) => w.write_all(if *b { b"true" } else { b"false" })?,
            Object::Number(n) => w.write_all(format_real(*n, self.precision)?.as_bytes())?,
            Object::String(s) => write_string(w, s)?,
            Object::Name(n) => write_name(w, n)?,
            Object::Array(array) => self.write_array(w, array, depth)?,
            Object::Dictionary(dict) => self.write_dictionary(w, dict, depth)?,
            Object::Stream(stream) => {
                if depth > 0 {
                    return Err(PdfError::InvalidStructure(
                        "stream objects must be indirect".to_string(),
                    ));
                }
                self.write_stream(w, stream)?
            }
            Object::Reference(id) => self.write_reference(w, *id)?,
        }
        Ok(())
    }

    fn write_array<W: Write>(&self, w: &mut W, array: &Array, depth: usize) -> Result<()> {
        w.write_all(b"[")?;
        for (i, element) in array.iter().enumerate() {
            if i > 0 {
                w.write_all(b" ")?;
            }
            self.write_value(w, element, depth + 1)?;
        }
        w.write_all(b"]")?;
        Ok(())
    }

    fn write_dictionary<W: Write>(&self, w: &mut W, dict: &Dictionary, depth: usize) -> Result<()> {
        w.write_all(b"<<")?;
        for (i, (key, value)) in dict.iter().enumerate() {
            if !self.compact {
                w.write_all(b"\n")?;
            } else if i > 0 {
                w.write_all(b" ")?;
            }
            write_name(w, key)?;
            w.write_all(b" ")?;
            self.write_value(w, value, depth + 1)?;
        }
        if !self.compact && !dict.is_empty() {
            w.write_all(b"\n")?;
        }
        w.write_all(b">>")?;
        Ok(())
    }

    fn write_stream<W: Write>(&self, w: &mut W, stream: &Stream) -> Result<()> {
        match stream.dictionary().get("Length") {
            Some(Object::Number(_)) | Some(Object::Reference(_)) => {}
            _ => return Err(PdfError::MissingStreamLength),
        }
        self.write_dictionary(w, stream.dictionary(), 1)?;
        w.write_all(b"\nstream\n")?;
        w.write_all(stream.data())?;
        w.write_all(b"\nendstream")?;
        Ok(())
    }

    fn write_reference<W: Write>(&self, w: &mut W, id: ObjectId) -> Result<()> {
        let dangling = self.registry.is_some_and(|registry| !registry.contains(id));
        if dangling {
            match self.dangling {
                DanglingReferencePolicy::WriteNull => {
                    tracing::debug!(%id, "writing null for dangling reference");
                    w.write_all(b"null")?;
                    return Ok(());
                }
                DanglingReferencePolicy::Error => {
                    return Err(PdfError::DanglingReference(id.number(), id.generation()))
                }
            }
        }
        write!(w, "{} {} R", id.number(), id.generation())?;
        Ok(())
    }
}

/// `/Name`, with `#XX` for bytes outside `!`..`~`, delimiters and `#`.
pub fn write_name<W: Write>(w: &mut W, name: &PdfName) -> Result<()> {
    let mut out = Vec::with_capacity(name.len() + 1);
    out.push(b'/');
    for &byte in name.as_bytes() {
        if needs_name_escape(byte) {
            out.extend_from_slice(format!("#{byte:02X}").as_bytes());
        } else {
            out.push(byte);
        }
    }
    w.write_all(&out)?;
    Ok(())
}

fn needs_name_escape(byte: u8) -> bool {
    !(0x21..=0x7E).contains(&byte)
        || matches!(
            byte,
            b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' | b'#'
        )
}

/// Literal `(...)` form, or `<...>` when the string asks for hex.
pub fn write_string<W: Write>(w: &mut W, string: &PdfString) -> Result<()> {
    if string.is_hex_writing() {
        let mut out = String::with_capacity(string.len() * 2 + 2);
        out.push('<');
        for byte in string.as_bytes() {
            out.push_str(&format!("{byte:02X}"));
        }
        out.push('>');
        w.write_all(out.as_bytes())?;
        return Ok(());
    }

    let mut out = Vec::with_capacity(string.len() + 2);
    out.push(b'(');
    for &byte in string.as_bytes() {
        match byte {
            b'(' | b')' | b'\\' => out.extend_from_slice(&[b'\\', byte]),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x08 => out.extend_from_slice(b"\\b"),
            0x0C => out.extend_from_slice(b"\\f"),
            0x00..=0x1F | 0x7F => out.extend_from_slice(format!("\\{byte:03o}").as_bytes()),
            _ => out.push(byte),
        }
    }
    out.push(b')');
    w.write_all(&out)?;
    Ok(())
}
