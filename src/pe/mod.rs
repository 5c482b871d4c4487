//! Win32/Win64 Portable Executables.
//!
//! The flat-address sibling of the segmented formats: one file header,
//! a 32- or 64-bit optional header told apart by its magic, data
//! directories, and a section table. Exports, imports and base
//! relocations come out of the directories; code sections are carved
//! into regions and scanned from the entry point and every export.

use log::warn;
use std::io::{self, ErrorKind};

use crate::context::{DumpContext, Mode, RelAddr};
use crate::image::Image;
use crate::region::RegionArena;
use crate::spec::{self, SpecExport};

pub mod disasm;
pub mod exports;
pub mod header;
pub mod imports;
pub mod relocs;
pub mod sections;

use exports::PeExport;
use header::{PeDirectory, PeFileHeader, PeOptionalHeader32, PeOptionalHeader64};
use imports::PeImportModule;
use relocs::PeReloc;
use sections::PeSection;

pub struct PeExecutable {
    /// optional header magic: 0x10b or 0x20b
    pub magic: u16,
    pub imagebase: u64,
    pub bits: u8,
    pub header: PeFileHeader,
    pub opt32: Option<PeOptionalHeader32>,
    pub opt64: Option<PeOptionalHeader64>,
    pub dirs: Vec<PeDirectory>,
    pub name: Option<String>,
    pub sections: Vec<PeSection>,
    pub exports: Vec<PeExport>,
    pub imports: Vec<PeImportModule>,
    pub relocs: Vec<PeReloc>,
    /// strip the image base from displayed addresses
    pub rel_addr: bool,
}

impl PeExecutable {
    pub fn entry_point(&self) -> u32 {
        match (&self.opt32, &self.opt64) {
            (Some(opt), _) => opt.address_of_entry_point,
            (_, Some(opt)) => opt.address_of_entry_point,
            _ => 0,
        }
    }

    pub fn read(
        image: &Image,
        offset_pe: usize,
        ctx: &DumpContext,
        arena: &mut RegionArena,
    ) -> io::Result<Self> {
        let header: PeFileHeader = bytemuck::pod_read_unaligned(image.slice(offset_pe + 4, 20)?);
        let opt_offset = offset_pe + 24;
        let magic = image.read_u16(opt_offset)?;

        let (opt32, opt64, imagebase, bits, cdirs) = match magic {
            0x10b => {
                let opt: PeOptionalHeader32 =
                    bytemuck::pod_read_unaligned(image.slice(opt_offset, 0x60)?);
                let base = opt.image_base as u64;
                let cdirs = opt.number_of_rva_and_sizes as usize;
                (Some(opt), None, base, 32u8, cdirs)
            }
            0x20b => {
                let opt: PeOptionalHeader64 =
                    bytemuck::pod_read_unaligned(image.slice(opt_offset, 0x70)?);
                let base = opt.image_base;
                let cdirs = opt.number_of_rva_and_sizes as usize;
                (None, Some(opt), base, 64u8, cdirs)
            }
            other => {
                return Err(io::Error::new(
                    ErrorKind::InvalidData,
                    format!("don't know how to read image type {:#x}", other),
                ));
            }
        };

        /* the data directories follow the fixed optional header */
        let cdirs = cdirs.min(16);
        let dirs_offset = opt_offset + if magic == 0x10b { 0x60 } else { 0x70 };
        let mut dirs = Vec::with_capacity(cdirs);
        for i in 0..cdirs {
            dirs.push(PeDirectory {
                address: image.read_u32(dirs_offset + i * 8)?,
                size: image.read_u32(dirs_offset + i * 8 + 4)?,
            });
        }

        let sections_offset = offset_pe + 24 + header.size_of_optional_header as usize;
        let sections = sections::read_section_table(
            image,
            sections_offset,
            header.number_of_sections,
            bits,
            arena,
        )?;

        /* objdump always applies the image base. That makes sense for
         * programs, which load at their preferred address, but for
         * libraries it only makes debugging more annoying, so relative
         * addressing is the default for DLLs. */
        let rel_addr = match ctx.pe_rel_addr {
            RelAddr::On => true,
            RelAddr::Off => false,
            RelAddr::Auto => header.characteristics & 0x2000 != 0,
        };

        let mut pe = PeExecutable {
            magic,
            imagebase,
            bits,
            header,
            opt32,
            opt64,
            dirs,
            name: None,
            sections,
            exports: Vec::new(),
            imports: Vec::new(),
            relocs: Vec::new(),
            rel_addr,
        };

        if pe.dirs.first().map(|d| d.size > 0).unwrap_or(false) {
            exports::read_export_table(&mut pe, image)?;
        }
        if pe.dirs.get(1).map(|d| d.size > 0).unwrap_or(false) {
            imports::read_import_table(&mut pe, image)?;
        }
        if pe.dirs.get(5).map(|d| d.size > 0).unwrap_or(false) {
            relocs::read_reloc_table(&mut pe, image)?;
        }

        /* read the code */
        if ctx.mode.contains(Mode::DISASSEMBLE) {
            sections::read_sections(&pe, image, arena);
        }

        Ok(pe)
    }

    pub fn spec_exports(&self) -> Vec<SpecExport> {
        self.exports
            .iter()
            .filter(|e| e.address != 0)
            .map(|e| SpecExport { ordinal: e.ordinal, name: e.name.clone() })
            .collect()
    }
}

///
/// Driver for a Portable Executable at `offset_pe`.
///
pub fn dump_pe(image: &Image, offset_pe: usize, ctx: &DumpContext) -> io::Result<()> {
    let mut arena = RegionArena::new();
    let pe = PeExecutable::read(image, offset_pe, ctx, &mut arena)?;

    if ctx.mode == Mode::SPECFILE {
        let name = pe.name.clone().unwrap_or_else(|| "MODULE".to_string());
        return spec::write_specfile(&name, &pe.spec_exports());
    }

    println!("Module type: PE (Portable Executable)");
    if let Some(name) = &pe.name {
        println!("Module name: {}", name);
    }

    if ctx.mode.contains(Mode::HEADER) {
        header::print_header(&pe);
    }

    if ctx.mode.contains(Mode::EXPORT) {
        println!();
        if !pe.exports.is_empty() {
            println!("Exports:");
            for export in pe.exports.iter() {
                if export.address == 0 {
                    continue;
                }
                let mut address = export.address as u64;
                if !pe.rel_addr {
                    address += pe.imagebase;
                }
                println!(
                    "\t{:5}\t{:#8x}\t{}",
                    export.ordinal,
                    address,
                    export.name.as_deref().unwrap_or("<no name>")
                );
            }
        } else {
            println!("No export table");
        }
    }

    if ctx.mode.contains(Mode::IMPORT) {
        println!();
        if !pe.imports.is_empty() {
            println!("Imported modules:");
            for module in pe.imports.iter() {
                println!("\t{}", module.module);
            }
            println!();
            println!("Imported functions:");
            for module in pe.imports.iter() {
                println!("\t{}:", module.module);
                for entry in module.nametab.iter() {
                    if entry.is_ordinal {
                        println!("\t\t<ordinal {}>", entry.ordinal);
                    } else {
                        println!("\t\t{}", entry.name);
                    }
                }
            }
        } else {
            println!("No imported module table");
        }
    }

    if ctx.mode.contains(Mode::DISASSEMBLE) {
        disasm::print_sections(&pe, image, &arena, ctx);
    }

    if ctx.mode.contains(Mode::RSRC) {
        /* the NE-era resource renderer does not apply to PE trees */
        warn!("PE resource printing is not implemented.");
    }

    Ok(())
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::region::ByteFlags;

    fn put16(file: &mut [u8], at: usize, v: u16) {
        file[at..at + 2].copy_from_slice(&v.to_le_bytes());
    }

    fn put32(file: &mut [u8], at: usize, v: u32) {
        file[at..at + 4].copy_from_slice(&v.to_le_bytes());
    }

    ///
    /// A hand-assembled 32-bit image, PE signature at offset 0.
    ///
    /// .text at RVA 0x1000 (file 0x200):
    ///   1000: jmp [0x00402044]   (import thunk, relocated at 1002)
    ///   1006: call 1000          (exported as Start, entry point)
    ///   100b: ret                (exported by ordinal only)
    /// .data at RVA 0x2000 (file 0x300): export directory, IAT,
    /// import directory, strings, base relocation block.
    ///
    pub fn minimal_pe32() -> Vec<u8> {
        let mut f = vec![0u8; 0x700];
        f[0..4].copy_from_slice(b"PE\0\0");
        /* file header */
        put16(&mut f, 0x04, 0x014c); /* i386 */
        put16(&mut f, 0x06, 2); /* sections */
        put16(&mut f, 0x14, 0xe0); /* optional header size */
        put16(&mut f, 0x16, 0x0102); /* executable, 32-bit */
        /* optional header at 0x18 */
        put16(&mut f, 0x18, 0x10b);
        put32(&mut f, 0x28, 0x1006); /* entry point */
        put32(&mut f, 0x34, 0x0040_0000); /* image base */
        put32(&mut f, 0x8c, 16); /* directory count */
        /* directories at 0x78: export, import, basereloc */
        put32(&mut f, 0x78, 0x2000);
        put32(&mut f, 0x7c, 0x30);
        put32(&mut f, 0x80, 0x2100);
        put32(&mut f, 0x84, 0x28);
        put32(&mut f, 0x78 + 5 * 8, 0x2200);
        put32(&mut f, 0x7c + 5 * 8, 12);
        /* section table at 0xf8 */
        let text = 0xf8;
        f[text..text + 5].copy_from_slice(b".text");
        put32(&mut f, text + 0x08, 0x100); /* virtual size */
        put32(&mut f, text + 0x0c, 0x1000); /* RVA */
        put32(&mut f, text + 0x10, 0x100); /* raw size */
        put32(&mut f, text + 0x14, 0x200); /* raw offset */
        put32(&mut f, text + 0x24, 0x6000_0020); /* code */
        let data = 0xf8 + 0x28;
        f[data..data + 5].copy_from_slice(b".data");
        put32(&mut f, data + 0x08, 0x400);
        put32(&mut f, data + 0x0c, 0x2000);
        put32(&mut f, data + 0x10, 0x400);
        put32(&mut f, data + 0x14, 0x300);
        put32(&mut f, data + 0x24, 0xc000_0040); /* data */
        /* .text contents */
        f[0x200..0x206].copy_from_slice(&[0xff, 0x25, 0x44, 0x20, 0x40, 0x00]);
        f[0x206..0x20b].copy_from_slice(&[0xe8, 0xf5, 0xff, 0xff, 0xff]);
        f[0x20b] = 0xc3;
        /* export directory at RVA 0x2000 / file 0x300 */
        put32(&mut f, 0x30c, 0x2050); /* module name */
        put32(&mut f, 0x310, 1); /* ordinal base */
        put32(&mut f, 0x314, 2); /* address table count */
        put32(&mut f, 0x318, 1); /* name count */
        put32(&mut f, 0x31c, 0x2030); /* address table */
        put32(&mut f, 0x320, 0x2038); /* name table */
        put32(&mut f, 0x324, 0x2040); /* ordinal table */
        /* export address table at RVA 0x2030 */
        put32(&mut f, 0x330, 0x1006);
        put32(&mut f, 0x334, 0x100b);
        /* name pointers at 0x2038, ordinal indexes at 0x2040 */
        put32(&mut f, 0x338, 0x205c);
        put16(&mut f, 0x340, 0);
        /* IAT at RVA 0x2044: one thunk pointing at the hint/name */
        put32(&mut f, 0x344, 0x2062);
        /* module name, export name, hint/name */
        f[0x350..0x359].copy_from_slice(b"TEST.dll\0");
        f[0x35c..0x362].copy_from_slice(b"Start\0");
        /* hint 0 at 0x362, then the import name */
        f[0x364..0x370].copy_from_slice(b"ExitProcess\0");
        /* import descriptor at RVA 0x2100 / file 0x400 */
        put32(&mut f, 0x400, 0x2090); /* original first thunk */
        put32(&mut f, 0x40c, 0x2080); /* module name RVA */
        put32(&mut f, 0x410, 0x2044); /* IAT */
        f[0x380..0x38d].copy_from_slice(b"KERNEL32.dll\0");
        /* original thunks at RVA 0x2090 */
        put32(&mut f, 0x390, 0x2062);
        /* base relocations at RVA 0x2200 / file 0x500 */
        put32(&mut f, 0x500, 0x1000); /* page */
        put32(&mut f, 0x504, 12); /* block size */
        put16(&mut f, 0x508, 0x3002); /* HIGHLOW at +2 */
        put16(&mut f, 0x50a, 0x0000); /* pad */
        f
    }

    pub fn read_for_test(image: &Image, ctx: &DumpContext) -> (PeExecutable, RegionArena) {
        let mut arena = RegionArena::new();
        let pe = PeExecutable::read(image, 0, ctx, &mut arena).unwrap();
        (pe, arena)
    }

    #[test]
    fn sections_map_addresses_to_file_offsets() {
        let image = Image::new(minimal_pe32());
        let (pe, _) = read_for_test(&image, &DumpContext::default());
        assert_eq!(pe.bits, 32);
        assert_eq!(pe.imagebase, 0x40_0000);
        assert!(!pe.rel_addr); /* program, not library */
        assert_eq!(pe.addr_to_offset(0x1000), Some(0x200));
        assert_eq!(pe.addr_to_offset(0x2044), Some(0x344));
        assert!(pe.addr_to_section(0x8000).is_none());
    }

    #[test]
    fn relocation_sites_are_flagged_and_scanned() {
        let image = Image::new(minimal_pe32());
        let (pe, arena) = read_for_test(&image, &DumpContext::default());
        assert_eq!(pe.relocs.len(), 2); /* one real, one pad */
        let text = arena.get(pe.sections[0].region);
        assert!(text.flags_at(2).contains(ByteFlags::RELOC));
        /* the entry point and both exports were scanned */
        assert!(text.flags_at(0x06).contains(ByteFlags::VALID | ByteFlags::FUNC));
        assert!(text.flags_at(0x0b).contains(ByteFlags::VALID | ByteFlags::FUNC));
        /* the thunk is reached through the near call */
        assert!(text.flags_at(0x00).contains(ByteFlags::VALID | ByteFlags::FUNC));
    }

    #[test]
    fn import_thunk_comment_resolves_through_the_iat() {
        let image = Image::new(minimal_pe32());
        let ctx = DumpContext::default();
        let (pe, arena) = read_for_test(&image, &ctx);

        /* the jmp through the IAT gets the import name directly */
        let (line, len) = disasm::print_pe_instr(&pe, &image, &arena, &pe.sections[0], 0, &ctx);
        assert_eq!(len, 6);
        assert!(line.contains("jmp"), "{}", line);
        assert!(line.contains("<ExitProcess>"), "{}", line);

        /* the call to the thunk is dereferenced once more */
        let (line, _) = disasm::print_pe_instr(&pe, &image, &arena, &pe.sections[0], 6, &ctx);
        assert!(line.contains("call"), "{}", line);
        assert!(line.contains("<ExitProcess>"), "{}", line);
    }

    #[test]
    fn image_base_toggle_shifts_every_absolute_address() {
        let image = Image::new(minimal_pe32());

        let ctx_abs = DumpContext { pe_rel_addr: RelAddr::Off, ..DumpContext::default() };
        let (pe, arena) = read_for_test(&image, &ctx_abs);
        let (abs_line, _) = disasm::print_pe_instr(&pe, &image, &arena, &pe.sections[0], 6, &ctx_abs);

        let ctx_rel = DumpContext { pe_rel_addr: RelAddr::On, ..DumpContext::default() };
        let (pe, arena) = read_for_test(&image, &ctx_rel);
        let (rel_line, _) = disasm::print_pe_instr(&pe, &image, &arena, &pe.sections[0], 6, &ctx_rel);

        let abs_addr = u64::from_str_radix(abs_line.split('\t').next().unwrap(), 16).unwrap();
        let rel_addr = u64::from_str_radix(rel_line.split('\t').next().unwrap(), 16).unwrap();
        assert_eq!(abs_addr - rel_addr, pe.imagebase);
    }
}
