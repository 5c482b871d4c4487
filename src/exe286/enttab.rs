//! Entry table parsing.
//!
//! The entry table is a list of bundles, each a count byte and a
//! segment indicator: 0x00 skips unused ordinals, 0xFF holds movable
//! entries carrying an embedded `int 3f` thunk, anything else holds
//! fixed entries for that segment. Ordinals run across bundles starting
//! at 1, which is why unused entries are materialized too.

use log::warn;
use std::io;

use crate::image::Image;

///
/// One exportable entry point. Unused ordinals keep a zero segment.
///
#[derive(Debug, Clone, Default)]
pub struct NeEntry {
    pub flags: u8,
    pub segment: u8,
    pub offset: u16,
    pub name: Option<String>,
}

impl NeEntry {
    /// bit 0 marks entries exported by name or ordinal
    pub fn is_exported(&self) -> bool {
        self.flags & 1 != 0
    }
}

pub fn read_entry_table(image: &Image, start: usize, length: u16) -> io::Result<Vec<NeEntry>> {
    let mut entries = Vec::new();
    let mut cursor = start;
    let end = start + length as usize;

    loop {
        if cursor >= end {
            break;
        }
        let count = image.read_u8(cursor)?;
        cursor += 1;
        if count == 0 {
            /* end of table */
            break;
        }
        let index = image.read_u8(cursor)?;
        cursor += 1;

        for _ in 0..count {
            if index == 0xff {
                /* movable entry */
                let flags = image.read_u8(cursor)?;
                let int3f = image.read_u16(cursor + 1)?;
                if int3f != 0x3fcd {
                    warn!(
                        "Entry {} has interrupt bytes {:02x} {:02x} (expected cd 3f).",
                        entries.len() + 1,
                        int3f & 0xff,
                        int3f >> 8
                    );
                }
                entries.push(NeEntry {
                    flags,
                    segment: image.read_u8(cursor + 3)?,
                    offset: image.read_u16(cursor + 4)?,
                    name: None,
                });
                cursor += 6;
            } else if index == 0x00 {
                /* no entry, just here to skip an ordinal */
                entries.push(NeEntry::default());
            } else {
                entries.push(NeEntry {
                    flags: image.read_u8(cursor)?,
                    segment: index,
                    offset: image.read_u16(cursor + 1)?,
                    name: None,
                });
                cursor += 3;
            }
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_movable_and_skipped_bundles() {
        let table = vec![
            /* bundle: 1 fixed entry in segment 2 */
            0x01, 0x02, 0x03, 0x34, 0x12,
            /* bundle: 2 unused ordinals */
            0x02, 0x00,
            /* bundle: 1 movable entry, int 3f thunk, segment 1, offset 8 */
            0x01, 0xff, 0x01, 0xcd, 0x3f, 0x01, 0x08, 0x00,
            /* end */
            0x00,
        ];
        let len = table.len() as u16;
        let image = Image::new(table);
        let entries = read_entry_table(&image, 0, len).unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].segment, 2);
        assert_eq!(entries[0].offset, 0x1234);
        assert!(entries[0].is_exported());
        assert_eq!(entries[1].segment, 0);
        assert_eq!(entries[2].segment, 0);
        assert_eq!(entries[3].segment, 1);
        assert_eq!(entries[3].offset, 8);
    }
}
