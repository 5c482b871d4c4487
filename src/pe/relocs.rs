//! Base relocation directory: a run of page blocks, each a page RVA, a
//! block size, and packed (type:4, offset:12) words.

use std::io;

use crate::image::Image;
use crate::pe::PeExecutable;

#[derive(Debug, Clone, Copy)]
pub struct PeReloc {
    /// target RVA
    pub offset: u32,
    pub reloc_type: u8,
}

pub fn read_reloc_table(pe: &mut PeExecutable, image: &Image) -> io::Result<()> {
    let Some(offset) = pe.addr_to_offset(pe.dirs[5].address as u64) else {
        return Ok(());
    };
    let end = offset + pe.dirs[5].size as usize;

    let mut relocs = Vec::new();
    let mut cursor = offset;
    while cursor + 8 <= end {
        let block_base = image.read_u32(cursor)?;
        let block_size = image.read_u32(cursor + 4)? as usize;
        if block_size < 8 {
            break;
        }
        for i in 0..(block_size - 8) / 2 {
            let word = image.read_u16(cursor + 8 + i * 2)?;
            relocs.push(PeReloc {
                offset: block_base + (word & 0xfff) as u32,
                reloc_type: (word >> 12) as u8,
            });
        }
        cursor += block_size;
    }

    pe.relocs = relocs;
    Ok(())
}

impl PeExecutable {
    pub fn reloc_at(&self, address: u64) -> Option<&PeReloc> {
        self.relocs.iter().find(|r| r.offset as u64 == address)
    }
}
