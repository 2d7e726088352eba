use std::{fmt, ops::Index, slice};

use primitive_types::U256;

use crate::Instruction;

/// What a [`TraceRecord`] describes.
#[derive(PartialEq, Eq, Debug, Clone, Hash)]
pub enum TraceTag {
    /// One of the canonical instructions.
    Instruction(Instruction),
    /// A free-form label for operations without a canonical instruction.
    Pseudo(String),
}

impl TraceTag {
    /// Name under which the record is rendered.
    pub fn name(&self) -> &str {
        match self {
            Self::Instruction(instruction) => instruction.name(),
            Self::Pseudo(label) => label,
        }
    }
}

impl From<Instruction> for TraceTag {
    fn from(instruction: Instruction) -> Self {
        Self::Instruction(instruction)
    }
}

/// Single entry of a [`Trace`].
#[derive(PartialEq, Eq, Debug, Clone, Hash)]
pub struct TraceRecord {
    /// Instruction or pseudo-instruction this record stands for.
    pub tag: TraceTag,
    /// Arguments of the operation, in order.
    pub arguments: Vec<U256>,
    /// Auxiliary data read or written by the operation. Empty if there is none.
    pub data: Vec<u8>,
}

impl TraceRecord {
    /// Creates a record tagged with a canonical instruction.
    pub fn instruction(instruction: Instruction, arguments: Vec<U256>, data: Vec<u8>) -> Self {
        Self {
            tag: TraceTag::Instruction(instruction),
            arguments,
            data,
        }
    }

    /// Creates a record tagged with a pseudo-instruction label.
    pub fn pseudo(label: impl Into<String>, arguments: Vec<U256>, data: Vec<u8>) -> Self {
        Self {
            tag: TraceTag::Pseudo(label.into()),
            arguments,
            data,
        }
    }
}

/// Renders as `NAME(0x1, 0x2) [cafe]`; the payload is omitted when empty.
impl fmt::Display for TraceRecord {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}(", self.tag.name())?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{argument:#x}")?;
        }
        formatter.write_str(")")?;
        if !self.data.is_empty() {
            formatter.write_str(" [")?;
            for byte in &self.data {
                write!(formatter, "{byte:02x}")?;
            }
            formatter.write_str("]")?;
        }
        Ok(())
    }
}

/// Ordered, append-only sequence of [`TraceRecord`]s.
///
/// Order is significant: the sequence itself is what gets compared.
#[derive(PartialEq, Eq, Debug, Clone, Default, Hash)]
pub struct Trace {
    records: Vec<TraceRecord>,
}

impl Trace {
    /// Appends a record.
    pub fn push(&mut self, record: TraceRecord) {
        self.records.push(record);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Checks whether the trace has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over records in the order they were appended.
    pub fn iter(&self) -> slice::Iter<'_, TraceRecord> {
        self.records.iter()
    }

    /// Returns the last appended record.
    pub fn last(&self) -> Option<&TraceRecord> {
        self.records.last()
    }

    /// Returns the records as a slice.
    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    /// Removes all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Index<usize> for Trace {
    type Output = TraceRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceRecord;
    type IntoIter = slice::Iter<'a, TraceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<TraceRecord> for Trace {
    fn from_iter<I: IntoIterator<Item = TraceRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// One record per line.
impl fmt::Display for Trace {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(formatter, "{record}")?;
        }
        Ok(())
    }
}
