//! Item tokenizer for HID report descriptors (HID 1.11, section 6.2.2).

use std::fmt::Display;

use thiserror::Error;

/// Prefix byte that introduces a long item
const LONG_ITEM_PREFIX: u8 = 0xFE;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("Truncated item at offset {offset}: needs {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    Main,
    Global,
    Local,
    Reserved,
}

impl ItemType {
    fn from_prefix(prefix: u8) -> Self {
        match (prefix >> 2) & 0x03 {
            0 => Self::Main,
            1 => Self::Global,
            2 => Self::Local,
            _ => Self::Reserved,
        }
    }
}

/// A single item of a report descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item<'a> {
    /// Byte offset of the item prefix in the descriptor
    pub offset: usize,
    /// Raw bytes of the whole item, prefix included
    pub bytes: &'a [u8],
    /// Item data without prefix
    pub data: &'a [u8],
}

impl<'a> Item<'a> {
    pub fn prefix(&self) -> u8 {
        self.bytes[0]
    }

    pub fn is_long(&self) -> bool {
        self.prefix() == LONG_ITEM_PREFIX
    }

    /// Item tag and type with the size bits masked out (e.g. 0x28 for Usage
    /// Maximum). Long items have no short item tag.
    pub fn tag(&self) -> Option<u8> {
        if self.is_long() {
            return None;
        }
        Some(self.prefix() & 0xFC)
    }

    /// The bLongItemTag of a long item
    pub fn long_tag(&self) -> Option<u8> {
        if !self.is_long() {
            return None;
        }
        self.bytes.get(2).copied()
    }

    pub fn item_type(&self) -> ItemType {
        if self.is_long() {
            return ItemType::Reserved;
        }
        ItemType::from_prefix(self.prefix())
    }

    /// Item data as a little-endian unsigned value
    pub fn unsigned(&self) -> u32 {
        self.data
            .iter()
            .take(4)
            .enumerate()
            .fold(0, |acc, (i, byte)| acc | (*byte as u32) << (8 * i))
    }

    /// Item data as a little-endian two's complement value
    pub fn signed(&self) -> i32 {
        let value = self.unsigned();
        match self.data.len() {
            0 => 0,
            1 => value as u8 as i8 as i32,
            2 => value as u16 as i16 as i32,
            _ => value as i32,
        }
    }

    /// Returns true if the data of this item is signed (logical and physical
    /// extents, unit exponent)
    pub fn is_signed(&self) -> bool {
        matches!(self.tag(), Some(0x14 | 0x24 | 0x34 | 0x44 | 0x54))
    }

    /// Standard HID mnemonic for the item
    pub fn name(&self) -> &'static str {
        let Some(tag) = self.tag() else {
            return "Long Item";
        };
        match tag {
            // Main
            0x80 => "Input",
            0x90 => "Output",
            0xA0 => "Collection",
            0xB0 => "Feature",
            0xC0 => "End Collection",
            // Global
            0x04 => "Usage Page",
            0x14 => "Logical Minimum",
            0x24 => "Logical Maximum",
            0x34 => "Physical Minimum",
            0x44 => "Physical Maximum",
            0x54 => "Unit Exponent",
            0x64 => "Unit",
            0x74 => "Report Size",
            0x84 => "Report ID",
            0x94 => "Report Count",
            0xA4 => "Push",
            0xB4 => "Pop",
            // Local
            0x08 => "Usage",
            0x18 => "Usage Minimum",
            0x28 => "Usage Maximum",
            0x38 => "Designator Index",
            0x48 => "Designator Minimum",
            0x58 => "Designator Maximum",
            0x78 => "String Index",
            0x88 => "String Minimum",
            0x98 => "String Maximum",
            0xA8 => "Delimiter",
            _ => "Reserved",
        }
    }
}

impl Display for Item<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.name();
        if self.data.is_empty() || self.is_long() {
            return write!(f, "{name}");
        }
        if self.is_signed() {
            write!(f, "{name} ({})", self.signed())
        } else {
            write!(f, "{name} ({:#x})", self.unsigned())
        }
    }
}

/// Iterator over the items of a report descriptor. Iteration stops after the
/// first truncated item.
#[derive(Debug, Clone)]
pub struct Items<'a> {
    rdesc: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> Items<'a> {
    pub fn new(rdesc: &'a [u8]) -> Self {
        Self {
            rdesc,
            offset: 0,
            failed: false,
        }
    }

    /// Returns the (header length, data length) of the item at the current offset
    fn item_layout(&self) -> Result<(usize, usize), ItemError> {
        let remaining = &self.rdesc[self.offset..];
        let prefix = remaining[0];
        if prefix != LONG_ITEM_PREFIX {
            let size = match prefix & 0x03 {
                3 => 4,
                size => size as usize,
            };
            return Ok((1, size));
        }

        // Long item: prefix, bDataSize, bLongItemTag, data
        if remaining.len() < 3 {
            return Err(ItemError::Truncated {
                offset: self.offset,
                needed: 3,
                available: remaining.len(),
            });
        }
        Ok((3, remaining[1] as usize))
    }
}

impl<'a> Iterator for Items<'a> {
    type Item = Result<Item<'a>, ItemError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.rdesc.len() {
            return None;
        }

        let (header_len, data_len) = match self.item_layout() {
            Ok(layout) => layout,
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        };

        let available = self.rdesc.len() - self.offset;
        let needed = header_len + data_len;
        if needed > available {
            self.failed = true;
            return Some(Err(ItemError::Truncated {
                offset: self.offset,
                needed,
                available,
            }));
        }

        let bytes = &self.rdesc[self.offset..self.offset + needed];
        let item = Item {
            offset: self.offset,
            bytes,
            data: &bytes[header_len..],
        };
        self.offset += needed;

        Some(Ok(item))
    }
}
