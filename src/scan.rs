//! Control-flow scanner.
//!
//! Starting from an entry offset the scanner decodes forward, marking
//! every consumed byte `SCANNED` and every instruction start `VALID`,
//! and queues the targets of branches it can prove: near relative
//! jumps and calls, far transfers resolved through segment fixups, and
//! absolute addresses planted by relocations inside immediate operands.
//!
//! The walk is an iterative worklist of (region, offset) pairs, so
//! mutually-referencing segments cost stack nothing and every byte is
//! visited at most once as a scan target.

use log::warn;

use crate::context::Syntax;
use crate::image::Image;
use crate::region::{ByteFlags, RegionArena, RegionId};
use crate::x86::decode::decode;
use crate::x86::{ArgType, Instruction, MAX_INSTR, OP_BRANCH, OP_STOP};

///
/// What a fixup site ultimately refers to. Modeled uniformly across
/// containers; targets are symbolic (segment numbers, module indices,
/// virtual addresses), never pointers.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixupKind {
    /// pointer into another segment of this module
    InternalSegment { seg: u16, offset: u16, movable: bool },
    /// run-time import by ordinal
    ImportOrdinal { module: u16, ordinal: u16 },
    /// run-time import by name-table offset
    ImportName { module: u16, name_offset: u16 },
    /// FPU emulation fixup; semantics undocumented, kept as read
    OsFixup { kind: u16 },
    /// absolute virtual address, rebased at load time
    Absolute,
}

///
/// One relocation entry. `offsets` lists every source site the entry
/// applies to within its code region (NE chains produce many).
///
#[derive(Debug, Clone)]
pub struct Fixup {
    /// 2 = segment word only, 3 = full 32-bit pointer, 5 = offset word
    pub size: u8,
    pub kind: FixupKind,
    pub offsets: Vec<u16>,
    /// resolved label, filled when the container can name the target
    pub label: Option<String>,
}

impl Fixup {
    pub fn covers(&self, offset: usize) -> bool {
        self.offsets.iter().any(|o| *o as usize == offset)
    }
}

///
/// The capabilities a container lends the scanner. Everything has a
/// do-nothing default so the MZ adapter, which has none of this, can
/// use the trait as-is.
///
pub trait Container {
    /// fixup whose source-offset list covers this byte
    fn fixup_at(&self, _region: RegionId, _offset: usize) -> Option<&Fixup> {
        None
    }

    ///
    /// Resolves a far fixup to a scan target. `value` is the decoded
    /// pointer operand; segment-only fixups take their offset from it.
    ///
    fn resolve_far(&self, _fixup: &Fixup, _value: u64) -> Option<(RegionId, usize)> {
        None
    }

    ///
    /// Maps a near branch target to a region and offset. Branch
    /// targets live in the same address space instructions are decoded
    /// in (the region's load address plus the offset); the default
    /// keeps the branch inside the region it came from.
    ///
    fn resolve_near(
        &self,
        arena: &RegionArena,
        from: RegionId,
        target: u64,
    ) -> Option<(RegionId, usize)> {
        target
            .checked_sub(arena.get(from).addr)
            .map(|offset| (from, offset as usize))
    }

    ///
    /// Scan target planted by a relocation at `site`: an absolute
    /// address taken as an immediate is likely code. Containers without
    /// absolute relocations leave the default.
    ///
    fn reloc_scan_target(
        &self,
        _image: &Image,
        _arena: &RegionArena,
        _region: RegionId,
        _site: usize,
        _instr: &Instruction,
    ) -> Option<(RegionId, usize)> {
        None
    }
}

///
/// Scans everything reachable from (`region`, `offset`).
///
pub fn scan(
    image: &Image,
    arena: &mut RegionArena,
    container: &impl Container,
    region: RegionId,
    offset: usize,
) {
    let mut work: Vec<(RegionId, usize)> = vec![(region, offset)];
    while let Some((rid, ip)) = work.pop() {
        scan_run(image, arena, container, rid, ip, &mut work);
    }
}

fn scan_run(
    image: &Image,
    arena: &mut RegionArena,
    container: &impl Container,
    rid: RegionId,
    entry: usize,
    work: &mut Vec<(RegionId, usize)>,
) {
    let mut ip = entry;

    {
        let region = arena.get(rid);
        if ip >= region.length {
            warn!("Attempt to scan past end of segment ({:04x}).", ip);
            return;
        }
        if region.flags_at(ip) & (ByteFlags::VALID | ByteFlags::SCANNED) == ByteFlags::SCANNED {
            warn!("Attempt to scan byte that does not begin instruction.");
        }
    }

    while ip < arena.get(rid).length {
        /* check if we already read from here */
        if arena.get(rid).flags_at(ip).contains(ByteFlags::SCANNED) {
            return;
        }

        /* read the instruction; bytes past the on-disk length decode as
         * zeroes */
        let (start, length, min_alloc, bits, addr) = {
            let r = arena.get(rid);
            (r.start, r.length, r.min_alloc, r.bits, r.addr)
        };
        let take = MAX_INSTR.min(length - ip);
        let mut buffer = image.read_padded(start + ip, take);
        buffer.resize(MAX_INSTR, 0);
        let (instr, instr_length) = decode(addr + ip as u64, &buffer, bits, Syntax::Nasm);

        /* mark the bytes */
        let mut hangs_over = false;
        {
            let r = arena.get_mut(rid);
            r.mark(ip, ByteFlags::VALID);
            for i in ip..ip + instr_length {
                if i >= min_alloc {
                    hangs_over = true;
                    break;
                }
                r.mark(i, ByteFlags::SCANNED);
            }
        }
        /* instruction which hangs over the minimum allocation */
        if hangs_over {
            break;
        }

        /* handle conditional and unconditional transfers */
        if instr.op.arg0 == ArgType::SEGPTR {
            for site in ip..ip + instr_length {
                if !arena.get(rid).flags_at(site).contains(ByteFlags::RELOC) {
                    continue;
                }
                match container.fixup_at(rid, site) {
                    None => {
                        warn!("Byte tagged as relocated has no fixup attached; this is a bug.");
                    }
                    Some(fixup) => {
                        if let Some((trid, toff)) =
                            container.resolve_far(fixup, instr.args[0].value)
                        {
                            if toff < arena.get(trid).min_alloc {
                                let t = arena.get_mut(trid);
                                t.mark(toff, ByteFlags::FAR);
                                t.mark(
                                    toff,
                                    if instr.is_call() { ByteFlags::FUNC } else { ByteFlags::JUMP },
                                );
                                work.push((trid, toff));
                            } else {
                                warn!(
                                    "Far transfer to {}:{:04x} outside the target segment.",
                                    arena.get(trid).name,
                                    toff
                                );
                            }
                        }
                    }
                }
                break;
            }
        } else if instr.op.flags & OP_BRANCH != 0 {
            /* near relative jump, loop or call */
            let target = instr.args[0].value;
            match container.resolve_near(arena, rid, target) {
                Some((trid, toff)) => {
                    let t = arena.get(trid);
                    if !t.is_code {
                        warn!(
                            "Branch '{}' to {:x} in non-code region {}.",
                            instr.op.name, target, t.name
                        );
                    } else if toff < t.min_alloc {
                        let t = arena.get_mut(trid);
                        t.mark(
                            toff,
                            if instr.is_call() { ByteFlags::FUNC } else { ByteFlags::JUMP },
                        );
                        work.push((trid, toff));
                    } else {
                        warn!(
                            "Invalid relative call or jump to {:x} (segment size {:x}).",
                            target, t.min_alloc
                        );
                    }
                }
                None => {
                    warn!("Branch '{}' to {:x} not in image.", instr.op.name, target);
                }
            }
        }

        /* relocated immediates may take the address of code */
        for site in ip..ip + instr_length {
            if !arena.get(rid).flags_at(site).contains(ByteFlags::RELOC) {
                continue;
            }
            if let Some((trid, toff)) =
                container.reloc_scan_target(image, arena, rid, site, &instr)
            {
                arena.get_mut(trid).mark(toff, ByteFlags::FUNC);
                work.push((trid, toff));
            }
            break;
        }

        if instr.op.flags & OP_STOP != 0 {
            return;
        }

        ip += instr_length;
    }

    warn!("Scan reached the end of segment {}.", arena.get(rid).name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::CodeRegion;

    struct Bare;
    impl Container for Bare {}

    fn region_over(image: &Image, bits: u8) -> (RegionArena, RegionId) {
        let mut arena = RegionArena::new();
        let len = image.len();
        let rid = arena.push(CodeRegion::new("1".into(), 0, 0, len, len, bits, true));
        (arena, rid)
    }

    #[test]
    fn marks_valid_and_scanned() {
        /* mov ah, 0x4c; int 0x21; ret */
        let image = Image::new(vec![0xb4, 0x4c, 0xcd, 0x21, 0xc3]);
        let (mut arena, rid) = region_over(&image, 16);
        scan(&image, &mut arena, &Bare, rid, 0);
        let r = arena.get(rid);
        assert!(r.flags_at(0).contains(ByteFlags::VALID | ByteFlags::SCANNED));
        assert!(r.flags_at(1).contains(ByteFlags::SCANNED));
        assert!(!r.flags_at(1).contains(ByteFlags::VALID));
        assert!(r.flags_at(2).contains(ByteFlags::VALID));
        assert!(r.flags_at(4).contains(ByteFlags::VALID)); /* ret reached */
    }

    #[test]
    fn stops_at_unconditional_transfer() {
        /* ret; then garbage that must stay unscanned */
        let image = Image::new(vec![0xc3, 0x12, 0x34]);
        let (mut arena, rid) = region_over(&image, 16);
        scan(&image, &mut arena, &Bare, rid, 0);
        let r = arena.get(rid);
        assert!(r.flags_at(0).contains(ByteFlags::VALID));
        assert_eq!(r.flags_at(1), ByteFlags::empty());
    }

    #[test]
    fn follows_near_branches_and_marks_targets() {
        /* 0: jmp +2 (to 4); 2: db 0, 0; 4: call -7? no: call 0x0002? keep simple:
         * 0: jmp short 4; 2: int3; 3: nop; 4: ret */
        let image = Image::new(vec![0xeb, 0x02, 0xcc, 0x90, 0xc3]);
        let (mut arena, rid) = region_over(&image, 16);
        scan(&image, &mut arena, &Bare, rid, 0);
        let r = arena.get(rid);
        assert!(r.flags_at(4).contains(ByteFlags::JUMP));
        assert!(r.flags_at(4).contains(ByteFlags::VALID));
        /* the skipped-over filler was never scanned */
        assert_eq!(r.flags_at(2), ByteFlags::empty());
        assert_eq!(r.flags_at(3), ByteFlags::empty());
    }

    #[test]
    fn call_targets_become_functions() {
        /* 0: call 5; 3: ret; 4: nop; 5: ret */
        let image = Image::new(vec![0xe8, 0x02, 0x00, 0xc3, 0x90, 0xc3]);
        let (mut arena, rid) = region_over(&image, 16);
        scan(&image, &mut arena, &Bare, rid, 0);
        let r = arena.get(rid);
        assert!(r.flags_at(5).contains(ByteFlags::FUNC));
        assert!(r.flags_at(3).contains(ByteFlags::VALID)); /* fallthrough after call */
    }

    #[test]
    fn branch_outside_region_is_abandoned() {
        /* jmp to 0x100 in a 4-byte region */
        let image = Image::new(vec![0xe9, 0xfd, 0x00, 0xc3]);
        let (mut arena, rid) = region_over(&image, 16);
        scan(&image, &mut arena, &Bare, rid, 0);
        let r = arena.get(rid);
        assert!(r.flags_at(0).contains(ByteFlags::VALID));
        /* nothing else marked, no panic */
        assert_eq!(r.flags_at(3), ByteFlags::empty());
    }

    #[test]
    fn rescan_terminates_immediately() {
        let image = Image::new(vec![0x90, 0xc3]);
        let (mut arena, rid) = region_over(&image, 16);
        scan(&image, &mut arena, &Bare, rid, 0);
        /* running again must settle without changing anything */
        scan(&image, &mut arena, &Bare, rid, 0);
        let r = arena.get(rid);
        assert!(r.flags_at(0).contains(ByteFlags::VALID));
        assert!(r.flags_at(1).contains(ByteFlags::VALID));
    }

    #[test]
    fn instruction_hanging_over_min_alloc_stops_the_path() {
        /* region of 2 bytes whose last instruction needs 3 */
        let image = Image::new(vec![0x90, 0xb8, 0x34]);
        let mut arena = RegionArena::new();
        let rid = arena.push(CodeRegion::new("1".into(), 0, 0, 3, 3, 16, true));
        scan(&image, &mut arena, &Bare, rid, 0);
        let r = arena.get(rid);
        assert!(r.flags_at(0).contains(ByteFlags::VALID));
        /* the mov at 1 wants bytes past min_alloc; path abandoned */
        assert!(r.flags_at(1).contains(ByteFlags::VALID));
        assert!(r.flags_at(2).contains(ByteFlags::SCANNED));
    }
}
