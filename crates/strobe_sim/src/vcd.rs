//! VCD (Value Change Dump) output following IEEE 1364.
//!
//! [`VcdWriter`] produces human-readable text traces viewable in GTKWave,
//! Surfer, or other waveform viewers. Signal identifier codes use printable
//! ASCII characters starting from `!` (0x21).

use std::io::Write;

use crate::error::SimError;
use crate::model::SignalId;
use crate::value::Bits;

/// Low-level VCD text writer.
///
/// Declaration calls (`begin_scope`, `declare`, `end_scope`) must all
/// happen before the first [`timestamp`](VcdWriter::timestamp); the writer
/// closes the definition section automatically when the first timestamp is
/// emitted.
pub struct VcdWriter<W: Write> {
    writer: W,
    vars: Vec<(SignalId, String, u32)>,
    next_code: u32,
    header_written: bool,
    in_value_section: bool,
}

impl<W: Write> VcdWriter<W> {
    /// Creates a new VCD writer over the given output.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            vars: Vec::new(),
            next_code: 0,
            header_written: false,
            in_value_section: false,
        }
    }

    /// Read access to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Writes the `$date`/`$version`/`$timescale` header section.
    fn write_header(&mut self) -> Result<(), SimError> {
        writeln!(self.writer, "$date")?;
        writeln!(self.writer, "  Simulation date")?;
        writeln!(self.writer, "$end")?;
        writeln!(self.writer, "$version")?;
        writeln!(self.writer, "  strobe bench driver")?;
        writeln!(self.writer, "$end")?;
        writeln!(self.writer, "$timescale")?;
        writeln!(self.writer, "  1ns")?;
        writeln!(self.writer, "$end")?;
        Ok(())
    }

    fn ensure_header(&mut self) -> Result<(), SimError> {
        if !self.header_written {
            self.write_header()?;
            self.header_written = true;
        }
        Ok(())
    }

    /// Generates an identifier code from a sequential index.
    ///
    /// Codes run through the 94 printable ASCII characters `!`..`~`,
    /// growing to multiple characters past index 93.
    fn code_for(mut index: u32) -> String {
        let mut code = String::new();
        loop {
            code.push((b'!' + (index % 94) as u8) as char);
            if index < 94 {
                return code;
            }
            index = index / 94 - 1;
        }
    }

    /// Formats a value per VCD rules: a bare character for 1-bit signals,
    /// a `b`-prefixed MSB-first string for vectors.
    fn format_value(value: &Bits) -> String {
        if value.width() == 1 {
            value.get(0).vcd_char().to_string()
        } else {
            let mut s = String::with_capacity(value.width() as usize + 1);
            s.push('b');
            for i in (0..value.width()).rev() {
                s.push(value.get(i).vcd_char());
            }
            s
        }
    }

    /// Opens a `$scope module` level.
    pub fn begin_scope(&mut self, name: &str) -> Result<(), SimError> {
        self.ensure_header()?;
        writeln!(self.writer, "$scope module {name} $end")?;
        Ok(())
    }

    /// Closes the current scope level.
    pub fn end_scope(&mut self) -> Result<(), SimError> {
        writeln!(self.writer, "$upscope $end")?;
        Ok(())
    }

    /// Declares a signal in the current scope and assigns it an ID code.
    pub fn declare(&mut self, id: SignalId, name: &str, width: u32) -> Result<(), SimError> {
        self.ensure_header()?;
        let code = Self::code_for(self.next_code);
        self.next_code += 1;
        writeln!(self.writer, "$var wire {width} {code} {name} $end")?;
        self.vars.push((id, code, width));
        Ok(())
    }

    /// Emits a `#time` marker, closing the definition section first if this
    /// is the initial timestamp.
    pub fn timestamp(&mut self, time: u64) -> Result<(), SimError> {
        self.ensure_header()?;
        if !self.in_value_section {
            writeln!(self.writer, "$enddefinitions $end")?;
            writeln!(self.writer, "$dumpvars")?;
            self.in_value_section = true;
        }
        writeln!(self.writer, "#{time}")?;
        Ok(())
    }

    /// Records a value change for a declared signal at the current time.
    pub fn change(&mut self, id: SignalId, value: &Bits) -> Result<(), SimError> {
        let (_, code, width) = self
            .vars
            .iter()
            .find(|(sid, _, _)| *sid == id)
            .ok_or(SimError::UnknownSignal(id.as_raw()))?;

        let formatted = Self::format_value(value);
        if *width == 1 {
            writeln!(self.writer, "{formatted}{code}")?;
        } else {
            writeln!(self.writer, "{formatted} {code}")?;
        }
        Ok(())
    }

    /// Finalizes the trace: completes the definition section if no value
    /// was ever dumped, then flushes the writer.
    pub fn finalize(&mut self) -> Result<(), SimError> {
        self.ensure_header()?;
        if !self.in_value_section {
            writeln!(self.writer, "$enddefinitions $end")?;
            self.in_value_section = true;
        }
        self.writer.flush()?;
        Ok(())
    }
}
