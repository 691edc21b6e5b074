//! Classic cross-reference table.

use crate::error::Result;
use std::io::Write;

/// Generation recorded for object 0, the head of the free list.
const FREE_LIST_HEAD_GENERATION: u16 = 65535;

/// One line of the cross-reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XrefEntry {
    /// Object at `offset` bytes from the start of the file.
    InUse { offset: u64, generation: u16 },
    /// Free object number. `next_free` links to the next free number, 0 ends
    /// the list. `generation` is what the number carries when reused.
    Free { next_free: u32, generation: u16 },
}

impl XrefEntry {
    pub fn generation(&self) -> u16 {
        match *self {
            XrefEntry::InUse { generation, .. } | XrefEntry::Free { generation, .. } => generation,
        }
    }

    pub fn offset(&self) -> Option<u64> {
        match *self {
            XrefEntry::InUse { offset, .. } => Some(offset),
            XrefEntry::Free { .. } => None,
        }
    }

    pub fn is_in_use(&self) -> bool {
        matches!(self, XrefEntry::InUse { .. })
    }

    /// The fixed 20-byte line for this entry.
    fn line(&self) -> String {
        match *self {
            XrefEntry::InUse { offset, generation } => format!("{offset:010} {generation:05} n \n"),
            XrefEntry::Free {
                next_free,
                generation,
            } => format!("{next_free:010} {generation:05} f \n"),
        }
    }
}

/// Byte offsets of every object number, indexed from 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XrefTable {
    entries: Vec<XrefEntry>,
}

impl Default for XrefTable {
    fn default() -> Self {
        Self::new()
    }
}

impl XrefTable {
    pub fn new() -> Self {
        Self {
            entries: vec![XrefEntry::Free {
                next_free: 0,
                generation: FREE_LIST_HEAD_GENERATION,
            }],
        }
    }

    pub fn set_in_use(&mut self, number: u32, offset: u64, generation: u16) {
        self.set(number, XrefEntry::InUse { offset, generation });
    }

    pub fn set_free(&mut self, number: u32, generation: u16) {
        self.set(
            number,
            XrefEntry::Free {
                next_free: 0,
                generation,
            },
        );
    }

    /// Number of entries, which is also the trailer's `Size`.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, number: u32) -> Option<&XrefEntry> {
        self.entries.get(number as usize)
    }

    pub fn offset(&self, number: u32) -> Option<u64> {
        self.get(number).and_then(XrefEntry::offset)
    }

    /// Entries in object-number order, starting with object 0.
    pub fn entries(&self) -> impl Iterator<Item = (u32, &XrefEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(number, entry)| (number as u32, entry))
    }

    /// Writes the `xref` section as a single subsection.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        writeln!(w, "xref")?;
        writeln!(w, "0 {}", self.entries.len())?;
        for entry in &self.entries {
            w.write_all(entry.line().as_bytes())?;
        }
        Ok(())
    }

    fn set(&mut self, number: u32, entry: XrefEntry) {
        let index = number as usize;
        let mut relink = !entry.is_in_use();
        if index >= self.entries.len() {
            relink |= index > self.entries.len();
            self.entries.resize(
                index + 1,
                XrefEntry::Free {
                    next_free: 0,
                    generation: 0,
                },
            );
        } else {
            relink |= !self.entries[index].is_in_use();
        }
        self.entries[index] = entry;
        if relink {
            self.link_free_list();
        }
    }

    /// Points entry 0 at the lowest free number, each free entry at the next
    /// one, and the last at 0.
    fn link_free_list(&mut self) {
        let free: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.is_in_use())
            .map(|(index, _)| index)
            .collect();
        for (position, &index) in free.iter().enumerate() {
            let next = free.get(position + 1).copied().unwrap_or(0) as u32;
            if let XrefEntry::Free { next_free, .. } = &mut self.entries[index] {
                *next_free = next;
            }
        }
    }
}
