//! Segmented 16-bit New Executables.
//!
//! Everything the Windows 2.x/3.x loader would touch is pulled apart
//! here: the NE header, the segment table with its per-segment
//! relocation chains, the entry bundles, the resident and non-resident
//! name tables, module references, and the resource tree. Code
//! segments are carved into regions and everything reachable from the
//! program entry and the exported entries is scanned.

use log::warn;
use std::io;

use crate::context::{DumpContext, Mode};
use crate::image::Image;
use crate::region::{ByteFlags, RegionArena};
use crate::scan::scan;
use crate::spec::{self, SpecExport};

pub const NE_MAGIC: u16 = 0x454e;
pub const NE_CIGAM: u16 = 0x4e45;

pub mod demangle;
pub mod disasm;
pub mod enttab;
pub mod header;
pub mod modtab;
pub mod resntab;
pub mod rsrc;
pub mod segtab;

use enttab::NeEntry;
use header::NeHeader;
use modtab::NeImportModule;
use segtab::NeSegment;

///
/// A fully parsed segmented executable.
///
pub struct NeExecutable {
    pub header: NeHeader,
    pub name: String,
    pub description: String,
    pub enttab: Vec<NeEntry>,
    pub imptab: Vec<NeImportModule>,
    pub segments: Vec<NeSegment>,
    /// file offset of the imported names pool
    pub imptab_offset: usize,
}

impl NeExecutable {
    pub fn read(
        image: &Image,
        offset_ne: usize,
        ctx: &DumpContext,
        arena: &mut RegionArena,
    ) -> io::Result<Self> {
        let header = NeHeader::read(image, offset_ne)?;
        let table = |ptr: u16| offset_ne + ptr as usize;

        let mut enttab =
            enttab::read_entry_table(image, table(header.ne_enttab), header.ne_cbenttab)?;

        let apply_demangle = ctx.opts.contains(crate::context::Opts::DEMANGLE);
        let name =
            resntab::read_name_table(image, table(header.ne_restab), &mut enttab, apply_demangle)?;
        let description = if header.ne_nrestab != 0 {
            resntab::read_name_table(
                image,
                header.ne_nrestab as usize,
                &mut enttab,
                apply_demangle,
            )?
        } else {
            String::new()
        };

        let imptab_offset = table(header.ne_imptab);
        let imptab = modtab::read_module_table(
            image,
            table(header.ne_modtab),
            imptab_offset,
            header.ne_cmod,
            ctx,
        )?;

        let segments = segtab::read_segments(
            image,
            table(header.ne_segtab),
            header.ne_cseg,
            header.ne_align,
            &enttab,
            arena,
        )?;

        let ne = NeExecutable {
            header,
            name,
            description,
            enttab,
            imptab,
            segments,
            imptab_offset,
        };
        ne.scan_all(image, arena);
        Ok(ne)
    }

    ///
    /// Seeds the scanner with every plausibly-code entry, then the
    /// program entry point.
    ///
    fn scan_all(&self, image: &Image, arena: &mut RegionArena) {
        for (i, entry) in self.enttab.iter().enumerate() {
            /* don't scan absolute values */
            if entry.segment == 0 || entry.segment == 0xfe {
                continue;
            }
            let Some(seg) = self.segments.get(entry.segment as usize - 1) else {
                warn!("Entry {} refers to nonexistent segment {}.", i + 1, entry.segment);
                continue;
            };
            /* or values that live in data segments */
            if seg.is_data() {
                continue;
            }
            /* Data can be put in code segments without any apparent
             * indication. As a dumb heuristic, only scan exported
             * entries; it may miss private entries, but it's better
             * than nothing. */
            if !entry.is_exported() {
                continue;
            }
            if (entry.offset as usize) < seg.length {
                arena.get_mut(seg.region).mark(entry.offset as usize, ByteFlags::FUNC);
                scan(image, arena, self, seg.region, entry.offset as usize);
            } else {
                warn!(
                    "Entry point {}:{:04x} exceeds segment length ({:04x})",
                    entry.segment, entry.offset, seg.length
                );
            }
        }

        /* and don't forget the program entry point */
        let cs = self.header.ne_cs;
        let ip = self.header.ne_ip;
        if cs == 0 && ip == 0 {
            return;
        }
        let Some(seg) = self.segments.get(cs as usize - 1) else {
            warn!("Entry point {}:{:04x} refers to nonexistent segment.", cs, ip);
            return;
        };
        if ip as usize >= seg.length {
            warn!("Entry point {}:{:04x} exceeds segment length ({:04x})", cs, ip, seg.length);
            return;
        }
        arena.get_mut(seg.region).mark(ip as usize, ByteFlags::FUNC);
        scan(image, arena, self, seg.region, ip as usize);
    }

    pub fn print_exports(&self) {
        for (i, entry) in self.enttab.iter().enumerate() {
            if entry.segment == 0xfe {
                /* absolute value */
                println!(
                    "\t{:5}\t   {:04x}\t{}",
                    i + 1,
                    entry.offset,
                    entry.name.as_deref().unwrap_or("<no name>")
                );
            } else if entry.segment != 0 {
                println!(
                    "\t{:5}\t{}:{:04x}\t{}",
                    i + 1,
                    entry.segment,
                    entry.offset,
                    entry.name.as_deref().unwrap_or("<no name>")
                );
            }
        }
        println!();
    }

    pub fn spec_exports(&self) -> Vec<SpecExport> {
        let mut exports = Vec::new();
        for (i, entry) in self.enttab.iter().enumerate() {
            if entry.name.is_some() {
                exports.push(SpecExport { ordinal: (i + 1) as u16, name: entry.name.clone() });
            } else if entry.segment != 0 {
                exports.push(SpecExport { ordinal: (i + 1) as u16, name: None });
            }
        }
        exports
    }
}

///
/// Driver for a segmented executable behind the MZ stub at `offset_ne`.
///
pub fn dump_ne(image: &Image, offset_ne: usize, ctx: &DumpContext) -> io::Result<()> {
    let mut arena = RegionArena::new();
    let ne = NeExecutable::read(image, offset_ne, ctx, &mut arena)?;

    if ctx.mode == Mode::SPECFILE {
        return spec::write_specfile(&ne.name, &ne.spec_exports());
    }

    println!("Module type: NE (New Executable)");
    println!("Module name: {}", ne.name);
    if !ne.description.is_empty() {
        println!("Module description: {}", ne.description);
    }

    if ctx.mode.contains(Mode::HEADER) {
        header::print_header(&ne.header);
    }

    if ctx.mode.contains(Mode::EXPORT) {
        println!();
        println!("Exports:");
        ne.print_exports();
    }

    if ctx.mode.contains(Mode::IMPORT) {
        println!();
        println!("Imported modules:");
        for module in ne.imptab.iter() {
            println!("\t{}", module.name);
        }
    }

    if ctx.mode.contains(Mode::DISASSEMBLE) {
        disasm::print_segments(&ne, image, &arena, ctx);
    }

    if ctx.mode.contains(Mode::RSRC) {
        if ne.header.ne_rsrctab != ne.header.ne_restab {
            rsrc::print_rsrc(image, offset_ne + ne.header.ne_rsrctab as usize, ctx);
        } else {
            println!("No resource table");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DumpContext;
    use crate::scan::FixupKind;

    ///
    /// Builds a minimal two-segment NE module: segment 1 holds a far
    /// call with a size-3 internal fixup targeting 2:0004, segment 2
    /// holds a ret at that offset.
    ///
    fn two_segment_module() -> Vec<u8> {
        let mut file = vec![0u8; 0x200];
        /* NE header at 0x40 */
        let ne = 0x40;
        file[ne] = 0x4e;
        file[ne + 1] = 0x45;
        /* entry table: empty (offset 0x40 rel, length 1: just the 0) */
        file[ne + 0x04] = 0x40;
        file[ne + 0x06] = 1;
        /* program entry point 1:0000 */
        file[ne + 0x14] = 0x00; /* ip */
        file[ne + 0x16] = 0x01; /* cs */
        /* segment count 2, table at +0x50 rel; alignment shift 4 */
        file[ne + 0x1c] = 2;
        file[ne + 0x22] = 0x50;
        file[ne + 0x32] = 4;
        /* resident names at +0x42 rel: "T" module name */
        file[ne + 0x26] = 0x42;
        /* entry table contents at 0x80: end marker */
        file[0x80] = 0;
        /* resident names at 0x82 */
        file[0x82] = 1;
        file[0x83] = b'T';
        /* ordinal 0 */
        file[0x86] = 0;
        /* segment table at 0x90: seg 1: sector 0x10 (-> 0x100), len 5, hasreloc, minalloc 16 */
        file[0x90] = 0x10;
        file[0x92] = 5;
        file[0x95] = 0x01;
        file[0x96] = 16;
        /* seg 2: sector 0x12 (-> 0x120), len 8, code, minalloc 8 */
        file[0x98] = 0x12;
        file[0x9a] = 8;
        file[0x9e] = 8;
        /* segment 1 bytes at 0x100: call far; chain end at offset 1 */
        file[0x100] = 0x9a;
        file[0x101] = 0xff;
        file[0x102] = 0xff;
        file[0x103] = 0x01;
        file[0x104] = 0x00;
        /* reloc table for segment 1 at 0x105 */
        file[0x105] = 1; /* count */
        file[0x107] = 3; /* size 3 */
        file[0x108] = 0; /* internal */
        file[0x109] = 1; /* chain at offset 1 */
        file[0x10b] = 2; /* target segment 2 */
        file[0x10d] = 4; /* target offset 4 */
        /* segment 2 bytes at 0x120: nops then ret at 4 */
        for b in file[0x120..0x124].iter_mut() {
            *b = 0x90;
        }
        file[0x124] = 0xc3;
        file
    }

    #[test]
    fn far_call_reaches_the_other_segment() {
        let image = Image::new(two_segment_module());
        let mut arena = RegionArena::new();
        let ctx = DumpContext::default();
        let ne = NeExecutable::read(&image, 0x40, &ctx, &mut arena).unwrap();

        assert_eq!(ne.name, "T");
        assert_eq!(ne.segments.len(), 2);
        assert_eq!(
            ne.segments[0].fixups[0].kind,
            FixupKind::InternalSegment { seg: 2, offset: 4, movable: false }
        );

        /* the call itself was scanned from the entry point */
        let seg1 = arena.get(ne.segments[0].region);
        assert!(seg1.flags_at(0).contains(ByteFlags::VALID | ByteFlags::FUNC));
        assert!(seg1.flags_at(1).contains(ByteFlags::RELOC));

        /* its target was marked far function start and scanned */
        let seg2 = arena.get(ne.segments[1].region);
        assert!(seg2.flags_at(4).contains(ByteFlags::FAR));
        assert!(seg2.flags_at(4).contains(ByteFlags::FUNC));
        assert!(seg2.flags_at(4).contains(ByteFlags::VALID));
        /* the filler before it was never touched */
        assert_eq!(seg2.flags_at(0), ByteFlags::empty());
    }
}
