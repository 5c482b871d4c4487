//! Section table and the RVA-to-file mapping everything else leans on.
//!
//! Everything inside a PE file is laid out to be read after loading;
//! offsets are memory offsets, so each lookup walks the section table
//! to find where a virtual address lives in the file.

use bytemuck::{Pod, Zeroable};
use log::warn;
use std::io;

use crate::image::Image;
use crate::pe::PeExecutable;
use crate::region::{ByteFlags, CodeRegion, RegionArena, RegionId};
use crate::scan::scan;

pub const SEC_CODE: u32 = 0x20;
pub const SEC_DATA: u32 = 0x40;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct PeSectionHeader {
    pub name: [u8; 8],      /* 00 */
    pub min_alloc: u32,     /* 08: virtual size */
    pub address: u32,       /* 0c: RVA */
    pub length: u32,        /* 10: size of raw data */
    pub offset: u32,        /* 14: pointer to raw data */
    pub reloc_offset: u32,  /* 18 */
    pub lineno_offset: u32, /* 1c */
    pub reloc_count: u16,   /* 20 */
    pub lineno_count: u16,  /* 22 */
    pub flags: u32,         /* 24 */
}

///
/// One section plus its region in the arena.
///
pub struct PeSection {
    pub name: String,
    pub header: PeSectionHeader,
    pub region: RegionId,
}

impl PeSection {
    pub fn is_code(&self) -> bool {
        self.header.flags & SEC_CODE != 0
    }

    pub fn is_data(&self) -> bool {
        self.header.flags & SEC_DATA != 0
    }

    pub fn address(&self) -> u32 {
        self.header.address
    }

    pub fn min_alloc(&self) -> u32 {
        if self.header.min_alloc == 0 { self.header.length } else { self.header.min_alloc }
    }

    pub fn contains(&self, addr: u64) -> bool {
        addr >= self.address() as u64 && addr < self.address() as u64 + self.min_alloc() as u64
    }
}

pub fn read_section_table(
    image: &Image,
    offset: usize,
    count: u16,
    bits: u8,
    arena: &mut RegionArena,
) -> io::Result<Vec<PeSection>> {
    let mut sections = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let header: PeSectionHeader =
            bytemuck::pod_read_unaligned(image.slice(offset + i * 0x28, 0x28)?);
        let name = String::from_utf8_lossy(&header.name)
            .trim_end_matches('\0')
            .to_string();
        let min_alloc = if header.min_alloc == 0 { header.length } else { header.min_alloc };

        /* In theory nobody will ever try to jump into a data section.
         * VirtualProtect() be damned. */
        let region = arena.push(CodeRegion::new(
            name.clone(),
            header.address as u64,
            header.offset as usize,
            header.length as usize,
            min_alloc as usize,
            bits,
            header.flags & SEC_CODE != 0,
        ));
        sections.push(PeSection { name, header, region });
    }
    Ok(sections)
}

impl PeExecutable {
    pub fn addr_to_section(&self, addr: u64) -> Option<&PeSection> {
        /* some data is sensitive to which section it's in */
        self.sections.iter().find(|s| s.contains(addr))
    }

    ///
    /// Translates a virtual address into a file offset through the
    /// section that claims it.
    ///
    pub fn addr_to_offset(&self, addr: u64) -> Option<usize> {
        self.addr_to_section(addr)
            .map(|s| (addr - s.address() as u64) as usize + s.header.offset as usize)
    }
}

pub fn print_section_flags(flags: u32) {
    let mut buffer = String::new();
    let alignment = (flags & 0x00f0_0000) >> 20;

    /* Most of these shouldn't occur in an image file; print the COFF
     * names for the object-only ones. */
    if flags & 0x00000001 != 0 {
        buffer.push_str(", STYP_DSECT");
    }
    if flags & 0x00000002 != 0 {
        buffer.push_str(", STYP_NOLOAD");
    }
    if flags & 0x00000004 != 0 {
        buffer.push_str(", STYP_GROUP");
    }
    if flags & 0x00000008 != 0 {
        buffer.push_str(", STYP_PAD");
    }
    if flags & 0x00000010 != 0 {
        buffer.push_str(", STYP_COPY");
    }
    if flags & SEC_CODE != 0 {
        buffer.push_str(", code");
    }
    if flags & SEC_DATA != 0 {
        buffer.push_str(", data");
    }
    if flags & 0x00000080 != 0 {
        buffer.push_str(", bss");
    }
    if flags & 0x00000200 != 0 {
        buffer.push_str(", STYP_INFO");
    }
    if flags & 0x00001000 != 0 {
        buffer.push_str(", COMDAT");
    }
    if flags & 0x00008000 != 0 {
        buffer.push_str(", FARDATA");
    }
    if flags & 0x00020000 != 0 {
        buffer.push_str(", purgeable"); /* or 16BIT */
    }
    if flags & 0x00040000 != 0 {
        buffer.push_str(", locked");
    }
    if flags & 0x00080000 != 0 {
        buffer.push_str(", preload");
    }
    if flags & 0x01000000 != 0 {
        buffer.push_str(", extended relocations");
    }
    if flags & 0x02000000 != 0 {
        buffer.push_str(", discardable");
    }
    if flags & 0x04000000 != 0 {
        buffer.push_str(", not cached");
    }
    if flags & 0x08000000 != 0 {
        buffer.push_str(", not paged");
    }
    if flags & 0x10000000 != 0 {
        buffer.push_str(", shared");
    }
    if flags & 0x20000000 != 0 {
        buffer.push_str(", executable");
    }
    if flags & 0x40000000 != 0 {
        buffer.push_str(", readable");
    }
    if flags & 0x80000000 != 0 {
        buffer.push_str(", writable");
    }

    if buffer.is_empty() {
        println!("    Flags: 0x{:08x}", flags);
    } else {
        println!("    Flags: 0x{:08x} ({})", flags, &buffer[2..]);
    }
    if alignment != 0 {
        println!("    Alignment: {} (2**{})", 1u32 << (alignment - 1), alignment - 1);
    }
}

///
/// Seeds the flag vectors and the scanner: relocation sites first, then
/// exported functions, then the program entry point.
///
pub fn read_sections(pe: &PeExecutable, image: &Image, arena: &mut RegionArena) {
    /* relocations first */
    for reloc in pe.relocs.iter() {
        let address = reloc.offset as u64;
        let Some(sec) = pe.addr_to_section(address) else {
            warn!("Relocation at {:x} isn't in a section?", address);
            continue;
        };
        if sec.is_code() {
            match reloc.reloc_type {
                0 => {} /* padding */
                3 => {
                    /* HIGHLOW: scanning is done in the scanner proper */
                    let off = (address - sec.address() as u64) as usize;
                    arena.get_mut(sec.region).mark(off, ByteFlags::RELOC);
                }
                other => {
                    warn!(
                        "{:x}: Don't know how to handle relocation type {}",
                        reloc.offset, other
                    );
                }
            }
        }
    }

    /* exported functions are likely code */
    let export_dir = pe.dirs.first().copied().unwrap_or_default();
    for export in pe.exports.iter() {
        if export.address == 0 {
            continue;
        }
        let address = export.address as u64;
        let Some(sec) = pe.addr_to_section(address) else {
            warn!(
                "Export {} at {:x} isn't in a section?",
                export.name.as_deref().unwrap_or("<no name>"),
                export.address
            );
            continue;
        };
        /* addresses inside the export directory are forwarder strings */
        let forwarded = export.address >= export_dir.address
            && export.address < export_dir.address + export_dir.size;
        if sec.is_code() && !forwarded {
            let off = (address - sec.address() as u64) as usize;
            arena.get_mut(sec.region).mark(off, ByteFlags::FUNC);
            scan(image, arena, pe, sec.region, off);
        }
    }

    /* and the program entry point */
    let entry_point = pe.entry_point();
    if entry_point != 0 {
        match pe.addr_to_section(entry_point as u64) {
            None => warn!("Entry point {:x} isn't in a section?", entry_point),
            Some(sec) if sec.is_code() => {
                let off = (entry_point as u64 - sec.address() as u64) as usize;
                arena.get_mut(sec.region).mark(off, ByteFlags::FUNC);
                scan(image, arena, pe, sec.region, off);
            }
            Some(sec) => {
                warn!("Entry point {:x} is in non-code section {}.", entry_point, sec.name)
            }
        }
    }
}
