//! Protobuf text-format rendering of decoded messages.
//!
//! Output follows the layout of the reference protobuf text printer: present
//! fields in field-number order, one line per repeated element, nested messages
//! as indented blocks, strings and bytes C-escaped, enums by name.

use std::fmt;

/// A message that can print its fields in protobuf text format.
pub trait TextFormat {
    fn write_fields(&self, w: &mut TextWriter<'_, '_>) -> fmt::Result;
}

/// Writes `name: value` lines at the current nesting depth.
pub struct TextWriter<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    depth: usize,
}

impl<'a, 'b> TextWriter<'a, 'b> {
    pub fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self { f, depth: 0 }
    }

    fn indent(&mut self) -> fmt::Result {
        write!(self.f, "{:width$}", "", width = self.depth * 2)
    }

    /// Integer or boolean field. Nothing is written for `None`.
    pub fn scalar<T: fmt::Display>(&mut self, name: &str, value: Option<T>) -> fmt::Result {
        let Some(value) = value else {
            return Ok(());
        };
        self.indent()?;
        writeln!(self.f, "{}: {}", name, value)
    }

    pub fn scalars<T: fmt::Display>(&mut self, name: &str, values: &[T]) -> fmt::Result {
        for value in values {
            self.scalar(name, Some(value))?;
        }
        Ok(())
    }

    pub fn bytes(&mut self, name: &str, value: Option<&[u8]>) -> fmt::Result {
        let Some(value) = value else {
            return Ok(());
        };
        self.indent()?;
        writeln!(self.f, "{}: \"{}\"", name, Escaped(value))
    }

    pub fn string(&mut self, name: &str, value: Option<&str>) -> fmt::Result {
        self.bytes(name, value.map(str::as_bytes))
    }

    pub fn strings(&mut self, name: &str, values: &[String]) -> fmt::Result {
        for value in values {
            self.string(name, Some(value))?;
        }
        Ok(())
    }

    /// Enum field, printed by symbolic name when `E` knows the value.
    pub fn enumeration<E>(&mut self, name: &str, value: Option<i32>) -> fmt::Result
    where
        E: TryFrom<i32>,
        &'static str: From<E>,
    {
        let Some(value) = value else {
            return Ok(());
        };
        match enum_name::<E>(value) {
            Some(symbol) => self.scalar(name, Some(symbol)),
            None => self.scalar(name, Some(value)),
        }
    }

    pub fn message<M: TextFormat>(&mut self, name: &str, value: Option<&M>) -> fmt::Result {
        let Some(value) = value else {
            return Ok(());
        };
        self.indent()?;
        writeln!(self.f, "{} {{", name)?;
        self.depth += 1;
        value.write_fields(self)?;
        self.depth -= 1;
        self.indent()?;
        writeln!(self.f, "}}")
    }

    pub fn messages<M: TextFormat>(&mut self, name: &str, values: &[M]) -> fmt::Result {
        for value in values {
            self.message(name, Some(value))?;
        }
        Ok(())
    }
}

/// Symbolic name of an enum value, if `E` defines it.
pub fn enum_name<E>(value: i32) -> Option<&'static str>
where
    E: TryFrom<i32>,
    &'static str: From<E>,
{
    E::try_from(value).ok().map(<&'static str>::from)
}

/// Bytes with C-style escapes: printable ASCII as is, quotes and backslash
/// escaped, everything else as three-digit octal.
pub struct Escaped<'a>(pub &'a [u8]);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.0 {
            match byte {
                b'\n' => f.write_str("\\n")?,
                b'\r' => f.write_str("\\r")?,
                b'\t' => f.write_str("\\t")?,
                b'"' => f.write_str("\\\"")?,
                b'\'' => f.write_str("\\'")?,
                b'\\' => f.write_str("\\\\")?,
                0x20..=0x7e => write!(f, "{}", byte as char)?,
                _ => write!(f, "\\{:03o}", byte)?,
            }
        }
        Ok(())
    }
}

/// Adapter that renders any [`TextFormat`] message through `Display`.
pub struct Text<'a, M>(pub &'a M);

impl<M: TextFormat> fmt::Display for Text<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_fields(&mut TextWriter::new(f))
    }
}
