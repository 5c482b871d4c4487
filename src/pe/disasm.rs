//! PE disassembly: operand annotation through the import/export/
//! relocation indices, and the section listing printer.
//!
//! PE separates two concepts the NE format folds together: imported
//! names are reached by jumping through a relocated block in .idata,
//! and relocations proper are scattered through code sections. Both
//! end up as comments on the listing.

use log::warn;

use crate::context::{DumpContext, Opts};
use crate::image::Image;
use crate::pe::sections::PeSection;
use crate::pe::PeExecutable;
use crate::region::{ByteFlags, RegionArena, RegionId};
use crate::scan::Container;
use crate::x86::decode::decode;
use crate::x86::fmt::print_instr;
use crate::x86::{ArgType, Instruction, MAX_INSTR};

impl PeExecutable {
    fn section_by_region(&self, region: RegionId) -> Option<&PeSection> {
        self.sections.iter().find(|s| s.region == region)
    }

    pub fn export_name(&self, address: u64) -> Option<String> {
        self.exports
            .iter()
            .find(|e| e.address as u64 == address)
            .and_then(|e| e.name.clone())
    }

    ///
    /// Import behind an IAT slot at this RVA, as `name` or
    /// `module.ordinal`.
    ///
    pub fn imported_name(&self, address: u64) -> Option<String> {
        let slot = if self.magic == 0x20b { 8u64 } else { 4u64 };
        for module in self.imports.iter() {
            if address < module.iat_addr as u64 {
                continue;
            }
            let index = ((address - module.iat_addr as u64) / slot) as usize;
            if let Some(entry) = module.nametab.get(index) {
                return Some(if entry.is_ordinal {
                    format!("{}.{}", module.module, entry.ordinal)
                } else {
                    entry.name.clone()
                });
            }
        }
        None
    }
}

impl Container for PeExecutable {
    fn resolve_near(
        &self,
        _arena: &RegionArena,
        _from: RegionId,
        target: u64,
    ) -> Option<(RegionId, usize)> {
        let sec = self.addr_to_section(target)?;
        Some((sec.region, (target - sec.address() as u64) as usize))
    }

    fn reloc_scan_target(
        &self,
        image: &Image,
        _arena: &RegionArena,
        region: RegionId,
        site: usize,
        instr: &Instruction,
    ) -> Option<(RegionId, usize)> {
        let sec = self.section_by_region(region)?;
        let rva = sec.address() as u64 + site as u64;
        let reloc = self.reloc_at(rva)?;
        match reloc.reloc_type {
            0 => None, /* padding */
            3 => {
                /* HIGHLOW */
                if self.magic != 0x10b {
                    warn!("HIGHLOW relocation in 64-bit image?");
                }
                let stored = image.read_u32(sec.header.offset as usize + site).ok()?;
                let target = (stored as u64).wrapping_sub(self.imagebase) & 0xffff_ffff;
                let Some(tsec) = self.addr_to_section(target) else {
                    warn!("Relocation to {:#x} isn't in a section?", stored);
                    return None;
                };
                /* only scan immediately-taken addresses; dereferencing
                 * an address inside a code section means data */
                if tsec.is_code()
                    && (instr.op.arg0 == ArgType::IMM || instr.op.arg1 == ArgType::IMM)
                {
                    Some((tsec.region, (target - tsec.address() as u64) as usize))
                } else {
                    None
                }
            }
            other => {
                warn!("{:x}: Don't know how to handle relocation type {}", rva, other);
                None
            }
        }
    }
}

///
/// Numeric rewrite for an operand whose site carries a base
/// relocation: the stored value is already rebased to the preferred
/// image base, so print it in the active addressing mode.
///
fn relocate_arg(pe: &PeExecutable, instr: &Instruction, argi: usize) -> Option<String> {
    let arg = &instr.args[argi];
    let reloc = pe.reloc_at(arg.ip)?;
    match reloc.reloc_type {
        3 => {
            if arg.arg_type == ArgType::IMM
                || (arg.arg_type == ArgType::RM && instr.modrm_reg == -1)
                || arg.arg_type == ArgType::MOFFS
            {
                let value = if pe.rel_addr {
                    arg.value.wrapping_sub(pe.imagebase)
                } else {
                    arg.value
                };
                Some(format!("0x{:x}", value))
            } else {
                None
            }
        }
        _ => None,
    }
}

///
/// Symbolic comment for one operand, or None when it is mundane.
///
fn get_arg_comment(
    pe: &PeExecutable,
    image: &Image,
    arena: &RegionArena,
    sec: &PeSection,
    end_ip: u64,
    instr: &Instruction,
    argi: usize,
) -> Option<String> {
    let arg = &instr.args[argi];
    if arg.arg_type == ArgType::NONE {
        return None;
    }

    if instr.modrm_reg == 16 && arg.arg_type >= ArgType::RM && arg.arg_type <= ArgType::MEM {
        /* RIP-relative */
        let tip = end_ip.wrapping_add(arg.value);
        let abstip = if pe.rel_addr { tip } else { tip.wrapping_add(pe.imagebase) };
        if let Some(comment) = pe.imported_name(tip) {
            return Some(comment);
        }
        if let Some(comment) = pe.export_name(tip) {
            return Some(comment);
        }
        return Some(format!("0x{:x}", abstip));
    }

    let mut rel_value = arg.value;
    if !pe.rel_addr {
        rel_value = rel_value.wrapping_sub(pe.imagebase);
    }

    /* annotate anything that points inside the image's address space
     * or that has a relocation entry */
    let tsec = pe.addr_to_section(rel_value);
    let site = (arg.ip as i64 - sec.address() as i64) as usize;
    let relocated = arena.get(sec.region).flags_at(site).contains(ByteFlags::RELOC);
    if tsec.is_none() && !relocated {
        return None;
    }

    if let Some(comment) = pe.imported_name(rel_value) {
        return Some(comment);
    }
    if let Some(comment) = pe.export_name(rel_value) {
        return Some(comment);
    }

    /* Sometimes we have TWO levels of indirection: a call to a jmp
     * through a relocated address. mingw-w64 does this. */
    if let Some(tsec) = tsec {
        if rel_value + 2 <= tsec.address() as u64 + tsec.header.length as u64 {
            if let Some(offset) = pe.addr_to_offset(rel_value) {
                if image.read_u16(offset).ok() == Some(0x25ff) {
                    if let Ok(stored) = image.read_u32(offset + 2) {
                        let mut target = stored as u64;
                        if !pe.rel_addr {
                            target = target.wrapping_sub(pe.imagebase);
                        }
                        return pe.imported_name(target);
                    }
                }
            }
        }
    }

    if let Some(comment) = relocate_arg(pe, instr, argi) {
        return Some(comment);
    }

    /* don't print any comment for mundane relative jumps and calls */
    if arg.arg_type == ArgType::REL8 || arg.arg_type == ArgType::REL {
        return None;
    }

    Some(format!("0x{:x}", rel_value))
}

///
/// Renders the instruction at section offset `relip`; returns the
/// listing line and the instruction length.
///
pub fn print_pe_instr(
    pe: &PeExecutable,
    image: &Image,
    arena: &RegionArena,
    sec: &PeSection,
    relip: usize,
    ctx: &DumpContext,
) -> (String, usize) {
    let region = arena.get(sec.region);
    let ip = sec.address() as u64 + relip as u64;
    let take = MAX_INSTR.min((sec.header.length as usize).saturating_sub(relip));
    let mut buffer = image.read_padded(sec.header.offset as usize + relip, take);
    buffer.resize(MAX_INSTR, 0);

    let (mut instr, len) = decode(ip, &buffer, pe.bits, ctx.syntax);

    let absip = if pe.rel_addr { ip } else { ip + pe.imagebase };

    /* We deal in relative addresses internally everywhere, so fix up
     * the values of relative jumps when displaying absolute ones. */
    if (instr.op.arg0 == ArgType::REL8 || instr.op.arg0 == ArgType::REL) && !pe.rel_addr {
        instr.args[0].value = instr.args[0].value.wrapping_add(pe.imagebase);
    }

    let comment = get_arg_comment(pe, image, arena, sec, ip + len as u64, &instr, 0)
        .or_else(|| get_arg_comment(pe, image, arena, sec, ip + len as u64, &instr, 1));

    let ip_text = if pe.bits == 64 {
        format!("{:016x}", absip)
    } else {
        format!("{:08x}", absip)
    };
    let line = print_instr(
        ctx,
        &ip_text,
        &buffer[..len.min(MAX_INSTR)],
        len,
        region.flags_at(relip),
        &mut instr,
        comment.as_deref(),
        pe.bits,
    );
    (line, len)
}

fn print_disassembly(
    pe: &PeExecutable,
    image: &Image,
    arena: &RegionArena,
    sec: &PeSection,
    ctx: &DumpContext,
) {
    let region = arena.get(sec.region);
    let length = sec.header.length as usize;
    let min_alloc = sec.min_alloc() as usize;
    let mut relip = 0usize;

    while relip < length && relip < min_alloc {
        /* find a valid instruction */
        if !region.flags_at(relip).contains(ByteFlags::VALID) {
            if ctx.opts.contains(Opts::DISASSEMBLE_ALL) {
                /* still skip zeroes */
                if image
                    .read_u8(sec.header.offset as usize + relip)
                    .map(|b| b == 0)
                    .unwrap_or(true)
                {
                    println!("     ...");
                    while relip < length
                        && image
                            .read_u8(sec.header.offset as usize + relip)
                            .map(|b| b == 0)
                            .unwrap_or(true)
                    {
                        relip += 1;
                    }
                }
            } else {
                println!("     ...");
                while relip < length
                    && relip < min_alloc
                    && !region.flags_at(relip).contains(ByteFlags::VALID)
                {
                    relip += 1;
                }
            }
        }

        if relip >= length || relip >= min_alloc {
            return;
        }

        if region.flags_at(relip).contains(ByteFlags::FUNC) {
            let address = sec.address() as u64 + relip as u64;
            let absip = if pe.rel_addr { address } else { address + pe.imagebase };
            let name = pe.export_name(address);
            println!();
            println!("{:x} <{}>:", absip, name.as_deref().unwrap_or("no name"));
        }

        let (line, len) = print_pe_instr(pe, image, arena, sec, relip, ctx);
        println!("{}", line);
        relip += len;
    }
    println!();
}

fn print_data(pe: &PeExecutable, image: &Image, sec: &PeSection) {
    /* page alignment means sections end with a lot of zeroes, so don't
     * read past the minimum allocation */
    let length = (sec.header.length as usize).min(sec.min_alloc() as usize);
    let mut relip = 0usize;
    while relip < length {
        let len = (length - relip).min(16);
        let address = sec.address() as u64 + relip as u64;
        let absip = if pe.rel_addr { address } else { address + pe.imagebase };
        let mut line = format!("{:08x}", absip);
        for i in 0..16 {
            if i < len {
                let b = image.read_u8(sec.header.offset as usize + relip + i).unwrap_or(0);
                line.push_str(&format!(" {:02x}", b));
            } else {
                line.push_str("   ");
            }
        }
        line.push_str("  ");
        for i in 0..len {
            let c = image.read_u8(sec.header.offset as usize + relip + i).unwrap_or(0);
            line.push(if (0x20..0x7f).contains(&c) { c as char } else { '.' });
        }
        println!("{}", line);
        relip += 16;
    }
}

pub fn print_sections(pe: &PeExecutable, image: &Image, arena: &RegionArena, ctx: &DumpContext) {
    for sec in pe.sections.iter() {
        println!();
        println!(
            "Section {} (start = 0x{:x}, length = 0x{:x}, minimum allocation = 0x{:x}):",
            sec.name, sec.header.offset, sec.header.length, sec.min_alloc()
        );
        println!("    Address: {:x}", sec.address());
        crate::pe::sections::print_section_flags(sec.header.flags);

        /* these fields should only be populated for object files */
        if sec.header.reloc_offset != 0 || sec.header.reloc_count != 0 {
            warn!(
                "Section {} has relocation data: offset = {:x}, count = {}",
                sec.name, sec.header.reloc_offset, sec.header.reloc_count
            );
        }

        /* Sometimes the .text section is marked as both code and data.
         * mingw-w64 does this, probably because of data stored in it. */
        if sec.is_code() {
            if ctx.opts.contains(Opts::FULL_CONTENTS) {
                print_data(pe, image, sec);
            }
            print_disassembly(pe, image, arena, sec, ctx);
        } else if sec.is_data() {
            /* don't print .rsrc by default; large binaries hide in it */
            if (sec.name != ".rsrc" && sec.name != ".reloc")
                || ctx.opts.contains(Opts::FULL_CONTENTS)
            {
                print_data(pe, image, sec);
            }
        }
    }
}
