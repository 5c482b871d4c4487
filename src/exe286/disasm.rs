//! NE disassembly: fixup resolution against decoded operands and the
//! segment listing printer.

use log::warn;

use crate::context::{DumpContext, Opts};
use crate::exe286::modtab::read_import_name;
use crate::exe286::segtab::NeSegment;
use crate::exe286::NeExecutable;
use crate::image::Image;
use crate::region::{ByteFlags, RegionArena, RegionId};
use crate::scan::{Container, Fixup, FixupKind};
use crate::x86::decode::decode;
use crate::x86::fmt::print_instr;
use crate::x86::{ArgType, Instruction, MAX_INSTR};

impl NeExecutable {
    pub fn segment_by_region(&self, region: RegionId) -> Option<&NeSegment> {
        self.segments.iter().find(|s| s.region == region)
    }

    /// export / entry name at a code location
    pub fn entry_name(&self, cs: u16, ip: u16) -> Option<String> {
        self.enttab
            .iter()
            .find(|e| e.segment as u16 == cs && e.offset == ip)
            .and_then(|e| e.name.clone())
    }

    /// name loaded from a specfile for module.ordinal
    fn imported_name(&self, module: u16, ordinal: u16) -> Option<String> {
        let module = self.imptab.get(module.checked_sub(1)? as usize)?;
        module.export_name(ordinal).map(str::to_string)
    }

    fn module_name(&self, module: u16) -> String {
        match module
            .checked_sub(1)
            .and_then(|i| self.imptab.get(i as usize))
        {
            Some(m) => m.name.clone(),
            None => format!("module{}", module),
        }
    }

    fn fixup_in<'a>(&self, seg: &'a NeSegment, offset: usize) -> Option<&'a Fixup> {
        seg.fixups.iter().find(|f| f.covers(offset))
    }
}

impl Container for NeExecutable {
    fn fixup_at(&self, region: RegionId, offset: usize) -> Option<&Fixup> {
        self.fixup_in(self.segment_by_region(region)?, offset)
    }

    fn resolve_far(&self, fixup: &Fixup, value: u64) -> Option<(RegionId, usize)> {
        let FixupKind::InternalSegment { seg, offset, .. } = fixup.kind else {
            return None;
        };
        let target = self.segments.get(seg.checked_sub(1)? as usize)?;
        match fixup.size {
            /* full 32-bit pointer: both halves come from the fixup */
            3 => Some((target.region, offset as usize)),
            /* segment word only: the stored offset is used verbatim */
            2 => Some((target.region, (value & 0xffff) as usize)),
            _ => None,
        }
    }
}

///
/// Rewrites one operand against the fixup covering its value bytes.
/// The slot text becomes the symbolic form; the return value is the
/// trailing comment (a resolved name) when one is known.
///
fn relocate_arg(
    ne: &NeExecutable,
    image: &Image,
    seg: &NeSegment,
    instr: &mut Instruction,
    argi: usize,
) -> Option<String> {
    let arg_ip = instr.args[argi].ip as usize;
    let arg_type = instr.args[argi].arg_type;
    let value = instr.args[argi].value;

    let mut fixup = ne.fixup_in(seg, arg_ip);
    if fixup.is_none() && arg_type == ArgType::SEGPTR {
        /* segment-only relocations sit on the selector word */
        fixup = ne.fixup_in(seg, arg_ip + 2);
    }
    let Some(fixup) = fixup else {
        warn!(
            "{}:{:04x}: Byte tagged as relocated has no fixup attached; this is a bug.",
            seg.cs, arg_ip
        );
        instr.args[argi].text = Some("?".to_string());
        return None;
    };

    if arg_type == ArgType::SEGPTR && fixup.size == 3 {
        /* 32-bit relocation on a 32-bit pointer */
        match fixup.kind {
            FixupKind::InternalSegment { seg: tseg, offset, .. } => {
                instr.args[argi].text = Some(format!("{}:{:04x}", tseg, offset));
                return fixup.label.clone();
            }
            FixupKind::ImportOrdinal { module, ordinal } => {
                instr.args[argi].text =
                    Some(format!("{}.{}", ne.module_name(module), ordinal));
                return ne.imported_name(module, ordinal);
            }
            FixupKind::ImportName { module, name_offset } => {
                let name = read_import_name(image, ne.imptab_offset + name_offset as usize)
                    .map(|n| n.to_string())
                    .unwrap_or_default();
                instr.args[argi].text = Some(format!("{}.{}", ne.module_name(module), name));
                return None;
            }
            FixupKind::OsFixup { .. } | FixupKind::Absolute => {}
        }
    } else if arg_type == ArgType::SEGPTR && fixup.size == 2 {
        if let FixupKind::InternalSegment { seg: tseg, .. } = fixup.kind {
            /* segment relocation on a 32-bit pointer; keep the offset */
            let offset = (value & 0xffff) as u16;
            instr.args[argi].text = Some(format!("{}:{:04x}", tseg, offset));
            return ne.entry_name(tseg, offset);
        }
    } else if (arg_type == ArgType::IMM || arg_type == ArgType::MEM)
        && (fixup.size == 2 || fixup.size == 5)
    {
        /* imm16 referencing a segment or offset directly; MEM with lea
         * has also been observed */
        let pfx = if fixup.size == 2 { "seg " } else { "" };
        let (open, close) = if arg_type == ArgType::IMM { ("", "") } else { ("[", "]") };
        match fixup.kind {
            FixupKind::InternalSegment { seg: tseg, .. } => {
                instr.args[argi].text = Some(format!("{}{}{}{}", open, pfx, tseg, close));
                return None;
            }
            FixupKind::ImportOrdinal { module, ordinal } => {
                instr.args[argi].text = Some(format!(
                    "{}{}{}.{}{}",
                    open,
                    pfx,
                    ne.module_name(module),
                    ordinal,
                    close
                ));
                return ne.imported_name(module, ordinal);
            }
            FixupKind::ImportName { module, name_offset } => {
                let name = read_import_name(image, ne.imptab_offset + name_offset as usize)
                    .map(|n| n.to_string())
                    .unwrap_or_default();
                instr.args[argi].text = Some(format!(
                    "{}{}{}.{}{}",
                    open,
                    pfx,
                    ne.module_name(module),
                    name,
                    close
                ));
                return None;
            }
            FixupKind::OsFixup { .. } | FixupKind::Absolute => {}
        }
    }

    warn!(
        "{}:{:04x}: unhandled relocation: size {}, type {:?}, argtype {:?}",
        seg.cs, arg_ip, fixup.size, fixup.kind, arg_type
    );
    None
}

///
/// Prints the instruction at `ip` inside `seg` and returns its length.
///
fn print_ne_instr(
    ne: &NeExecutable,
    image: &Image,
    arena: &RegionArena,
    seg: &NeSegment,
    ip: u16,
    ctx: &DumpContext,
) -> usize {
    let bits = seg.bits();
    let region = arena.get(seg.region);
    let take = MAX_INSTR.min(seg.length - ip as usize);
    let mut buffer = image.read_padded(seg.start + ip as usize, take);
    buffer.resize(MAX_INSTR, 0);

    let (mut instr, len) = decode(ip as u64, &buffer, bits, ctx.syntax);

    /* check for relocations */
    let mut comment = None;
    if region.flags_at(instr.args[0].ip as usize).contains(ByteFlags::RELOC) {
        comment = relocate_arg(ne, image, seg, &mut instr, 0);
    }
    if region.flags_at(instr.args[1].ip as usize).contains(ByteFlags::RELOC) {
        comment = relocate_arg(ne, image, seg, &mut instr, 1);
    }
    /* make sure to check for SEGPTR segment-only relocations */
    if instr.op.arg0 == ArgType::SEGPTR
        && instr.args[0].text.is_none()
        && region
            .flags_at(instr.args[0].ip as usize + 2)
            .contains(ByteFlags::RELOC)
    {
        comment = relocate_arg(ne, image, seg, &mut instr, 0);
    }

    /* check if we are referencing a named export */
    if comment.is_none() && instr.op.arg0 == ArgType::REL {
        comment = ne.entry_name(seg.cs, instr.args[0].value as u16);
    }

    let line = print_instr(
        ctx,
        &format!("{}:{:04x}", seg.cs, ip),
        &buffer[..len.min(MAX_INSTR)],
        len,
        region.flags_at(ip as usize),
        &mut instr,
        comment.as_deref(),
        bits,
    );
    println!("{}", line);
    len
}

fn print_disassembly(
    ne: &NeExecutable,
    image: &Image,
    arena: &RegionArena,
    seg: &NeSegment,
    ctx: &DumpContext,
) {
    let region = arena.get(seg.region);
    let mut ip: usize = 0;

    while ip < seg.length {
        /* find a valid instruction */
        if !region.flags_at(ip).contains(ByteFlags::VALID) {
            if ctx.opts.contains(Opts::DISASSEMBLE_ALL) {
                /* still skip zeroes */
                if image.read_u8(seg.start + ip).map(|b| b == 0).unwrap_or(true) {
                    println!("     ...");
                    while ip < seg.length
                        && image.read_u8(seg.start + ip).map(|b| b == 0).unwrap_or(true)
                    {
                        ip += 1;
                    }
                }
            } else {
                println!("     ...");
                while ip < seg.length && !region.flags_at(ip).contains(ByteFlags::VALID) {
                    ip += 1;
                }
            }
        }

        if ip >= seg.length {
            return;
        }

        if region.flags_at(ip).contains(ByteFlags::FUNC) {
            let name = ne.entry_name(seg.cs, ip as u16);
            println!();
            println!(
                "{}:{:04x} <{}>:",
                seg.cs,
                ip,
                name.as_deref().unwrap_or("no name")
            );
            /* don't mark far functions; we can't reliably detect them
             * because of "push cs", and they should be evident anyway */
        }

        ip += print_ne_instr(ne, image, arena, seg, ip as u16, ctx);
    }
    println!();
}

fn print_data(image: &Image, seg: &NeSegment) {
    /* well, not really ip */
    let mut ip = 0usize;
    while ip < seg.length {
        let len = (seg.length - ip).min(16);
        let mut line = format!("{}:{:04x}", seg.cs, ip);
        for i in 0..16 {
            if i < len {
                let b = image.read_u8(seg.start + ip + i).unwrap_or(0);
                line.push_str(&format!(" {:02x}", b));
            } else {
                line.push_str("   ");
            }
        }
        line.push_str("  ");
        for i in 0..len {
            let c = image.read_u8(seg.start + ip + i).unwrap_or(0);
            line.push(if (0x20..0x7f).contains(&c) { c as char } else { '.' });
        }
        println!("{}", line);
        ip += 16;
    }
}

pub fn print_segments(ne: &NeExecutable, image: &Image, arena: &RegionArena, ctx: &DumpContext) {
    for seg in ne.segments.iter() {
        println!();
        println!(
            "Segment {} (start = 0x{:x}, length = 0x{:x}, minimum allocation = 0x{:x}):",
            seg.cs, seg.start, seg.length, seg.min_alloc
        );
        crate::exe286::segtab::print_segment_flags(seg.flags);

        if seg.is_data() {
            /* FIXME: we should at least make a special note of entry points */
            /* FIXME #2: data segments can still have relocations */
            print_data(image, seg);
        } else {
            /* like objdump, print the whole code segment like data on request */
            if ctx.opts.contains(Opts::FULL_CONTENTS) {
                print_data(image, seg);
            }
            print_disassembly(ne, image, arena, seg, ctx);
        }
    }
}
