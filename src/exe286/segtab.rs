//! Segment table and per-segment relocations.
//!
//! Each 8-byte segment record gives a sector-shifted start, the on-disk
//! length, flags, and a minimum allocation that the bytes may validly
//! hang over into. Segments flagged 0x0100 are followed on disk by a
//! relocation table whose records do not list their sites directly:
//! the sites form a chain through the segment bytes, each word naming
//! the next site, terminated by 0xFFFF (or a zero step when the
//! additive bit 0x04 is set).

use log::warn;
use std::io;

use crate::exe286::enttab::NeEntry;
use crate::image::Image;
use crate::region::{ByteFlags, CodeRegion, RegionArena, RegionId};
use crate::scan::{Fixup, FixupKind};

pub const SEG_DATA: u16 = 0x0001;
pub const SEG_MOVABLE: u16 = 0x0010;
pub const SEG_PRELOAD: u16 = 0x0040;
pub const SEG_HASRELOC: u16 = 0x0100;
pub const SEG_DISCARD: u16 = 0x1000;
pub const SEG_32BIT: u16 = 0x2000;

///
/// One NE segment: the container-side record plus its region in the
/// arena and the relocations applying inside it.
///
pub struct NeSegment {
    /// 1-based segment number
    pub cs: u16,
    pub start: usize,
    pub length: usize,
    pub flags: u16,
    pub min_alloc: usize,
    pub region: RegionId,
    pub fixups: Vec<Fixup>,
}

impl NeSegment {
    pub fn is_data(&self) -> bool {
        self.flags & SEG_DATA != 0
    }

    pub fn bits(&self) -> u8 {
        if self.flags & SEG_32BIT != 0 { 32 } else { 16 }
    }
}

pub fn print_segment_flags(flags: u16) {
    let mut buffer = String::new();

    if flags & SEG_DATA != 0 {
        buffer.push_str("data");
    } else {
        buffer.push_str("code");
    }

    /* these three should never occur in a file */
    if flags & 0x0002 != 0 {
        buffer.push_str(", allocated");
    }
    if flags & 0x0004 != 0 {
        buffer.push_str(", loaded");
    }
    if flags & 0x0008 != 0 {
        buffer.push_str(", iterated");
    }

    if flags & SEG_MOVABLE != 0 {
        buffer.push_str(", moveable");
    }
    if flags & 0x0020 != 0 {
        buffer.push_str(", shareable");
    }
    if flags & SEG_PRELOAD != 0 {
        buffer.push_str(", preload");
    }
    if flags & 0x0080 != 0 {
        buffer.push_str(if flags & SEG_DATA != 0 { ", read-only" } else { ", execute-only" });
    }
    if flags & SEG_HASRELOC != 0 {
        buffer.push_str(", has relocation data");
    }
    if flags & 0x0800 != 0 {
        buffer.push_str(", self-loading");
    }
    if flags & SEG_DISCARD != 0 {
        buffer.push_str(", discardable");
    }
    if flags & SEG_32BIT != 0 {
        buffer.push_str(", 32-bit");
    }
    if flags & 0xc608 != 0 {
        buffer.push_str(&format!(", (unknown flags 0x{:04x})", flags & 0xc608));
    }
    println!("    Flags: 0x{:04x} ({})", flags, buffer);
}

///
/// Reads the segment table, creates one region per segment, then walks
/// every relocation chain, tagging sites in the flag vectors.
///
pub fn read_segments(
    image: &Image,
    start: usize,
    count: u16,
    align: u16,
    entries: &[NeEntry],
    arena: &mut RegionArena,
) -> io::Result<Vec<NeSegment>> {
    let align = if align == 0 { 9 } else { align };
    let mut segments = Vec::with_capacity(count as usize);

    for i in 0..count as usize {
        let record = start + i * 8;
        let sector = image.read_u16(record)? as usize;
        let length = image.read_u16(record + 2)? as usize;
        let flags = image.read_u16(record + 4)?;
        let min_alloc = match image.read_u16(record + 6)? as usize {
            0 => 0x10000,
            n => n,
        };
        let seg_start = sector << align;

        let region = arena.push(CodeRegion::new(
            format!("{}", i + 1),
            0,
            seg_start,
            length,
            min_alloc,
            if flags & SEG_32BIT != 0 { 32 } else { 16 },
            flags & SEG_DATA == 0,
        ));

        segments.push(NeSegment {
            cs: (i + 1) as u16,
            start: seg_start,
            length,
            flags,
            min_alloc,
            region,
            fixups: Vec::new(),
        });
    }

    /* relocation data follows the segment contents */
    for seg in segments.iter_mut() {
        if seg.flags & SEG_HASRELOC == 0 {
            continue;
        }
        let table = seg.start + seg.length;
        let count = match image.read_u16(table) {
            Ok(n) => n,
            Err(_) => {
                warn!("Segment {}: relocation table lies outside the file.", seg.cs);
                continue;
            }
        };
        for j in 0..count as usize {
            match read_fixup(image, seg, table + 2 + j * 8, entries, arena) {
                Ok(Some(fixup)) => seg.fixups.push(fixup),
                Ok(None) => {}
                Err(err) => {
                    warn!("Segment {}: truncated relocation record: {}", seg.cs, err);
                    break;
                }
            }
        }
    }

    Ok(segments)
}

fn read_fixup(
    image: &Image,
    seg: &NeSegment,
    record: usize,
    entries: &[NeEntry],
    arena: &mut RegionArena,
) -> io::Result<Option<Fixup>> {
    let size = image.read_u8(record)?;
    let rtype = image.read_u8(record + 1)?;
    let chain = image.read_u16(record + 2)?;
    let module = image.read_u16(record + 4)?; /* or segment */
    let ordinal = image.read_u16(record + 6)?; /* or offset */

    let mut label = None;
    let kind = match rtype & 3 {
        0 => {
            /* internal reference */
            let (tseg, toffset) = if module == 0xff {
                let Some(entry) = entries.get(ordinal.wrapping_sub(1) as usize) else {
                    warn!(
                        "{}: Internal relocation through invalid movable ordinal {}.",
                        seg.cs, ordinal
                    );
                    return Ok(None);
                };
                (entry.segment as u16, entry.offset)
            } else {
                (module, ordinal)
            };
            /* grab the name, if we can */
            label = entries
                .iter()
                .find(|e| e.segment as u16 == tseg && e.offset == toffset)
                .and_then(|e| e.name.clone());
            FixupKind::InternalSegment { seg: tseg, offset: toffset, movable: module == 0xff }
        }
        1 => FixupKind::ImportOrdinal { module, ordinal },
        2 => FixupKind::ImportName { module, name_offset: ordinal },
        _ => {
            /* OSFIXUP: parsed and retained, meaning not understood */
            return Ok(Some(Fixup {
                size,
                kind: FixupKind::OsFixup { kind: module },
                offsets: Vec::new(),
                label: None,
            }));
        }
    };

    if rtype & !7 != 0 {
        warn!("{}: Relocation with unknown type flags 0x{:x}.", seg.cs, rtype);
    }
    if size != 2 && size != 3 && size != 5 {
        warn!("{}: Relocation with unknown size {}.", seg.cs, size);
    }

    /* walk the offset chain */
    let mut offsets = Vec::new();
    let mut cursor = chain;
    loop {
        if cursor as usize >= seg.length {
            warn!(
                "{}:{:04x}: Relocation offset exceeds segment length ({:04x}).",
                seg.cs, cursor, seg.length
            );
            break;
        }
        if arena.get(seg.region).flags_at(cursor as usize).contains(ByteFlags::RELOC) {
            warn!("{}:{:04x}: Infinite loop reading relocation data.", seg.cs, cursor);
            offsets.clear();
            break;
        }
        offsets.push(cursor);
        arena.get_mut(seg.region).mark(cursor as usize, ByteFlags::RELOC);

        let next = image.read_u16(seg.start + cursor as usize)?;
        if rtype & 4 != 0 {
            /* additive chain steps by the stored word */
            if next == 0 {
                break;
            }
            cursor = cursor.wrapping_add(next);
        } else {
            cursor = next;
        }
        if next >= 0xfffb {
            break;
        }
    }

    Ok(Some(Fixup { size, kind, offsets, label }))
}

#[cfg(test)]
mod tests {
    use super::*;

    ///
    /// One 16-byte segment at sector 1 (shift 4), with a single size-3
    /// internal relocation whose chain starts at offset 1.
    ///
    fn segment_with_reloc() -> Vec<u8> {
        let mut file = vec![0u8; 0x40];
        /* segment table at 0: sector 1, length 5, flags 0x0100, minalloc 16 */
        file[0] = 1;
        file[2] = 5;
        file[5] = 0x01; /* flags 0x0100 */
        file[6] = 16;
        /* segment bytes at 0x10: call far (9a), chain word ffff at offset 1 */
        file[0x10] = 0x9a;
        file[0x11] = 0xff;
        file[0x12] = 0xff;
        file[0x13] = 0x01;
        file[0x14] = 0x00;
        /* reloc table at 0x15: count 1; size 3, type 0 (internal),
         * chain start 1, segment 2, offset 0x1234 */
        file[0x15] = 1;
        file[0x17] = 3;
        file[0x18] = 0;
        file[0x19] = 1;
        file[0x1b] = 2;
        file[0x1d] = 0x34;
        file[0x1e] = 0x12;
        file
    }

    #[test]
    fn reloc_chain_is_walked_and_flagged() {
        let image = Image::new(segment_with_reloc());
        let mut arena = RegionArena::new();
        let segs = read_segments(&image, 0, 1, 4, &[], &mut arena).unwrap();
        assert_eq!(segs.len(), 1);
        let seg = &segs[0];
        assert_eq!(seg.start, 0x10);
        assert_eq!(seg.length, 5);
        assert_eq!(seg.fixups.len(), 1);
        let fixup = &seg.fixups[0];
        assert_eq!(fixup.size, 3);
        assert_eq!(
            fixup.kind,
            FixupKind::InternalSegment { seg: 2, offset: 0x1234, movable: false }
        );
        assert_eq!(fixup.offsets, vec![1]);
        assert!(arena.get(seg.region).flags_at(1).contains(ByteFlags::RELOC));
        assert!(!arena.get(seg.region).flags_at(2).contains(ByteFlags::RELOC));
    }

    #[test]
    fn self_referencing_chain_is_detected() {
        let mut file = segment_with_reloc();
        /* make the chain word at offset 1 point at itself */
        file[0x11] = 0x01;
        file[0x12] = 0x00;
        let image = Image::new(file);
        let mut arena = RegionArena::new();
        let segs = read_segments(&image, 0, 1, 4, &[], &mut arena).unwrap();
        /* the fixup survives but with no sites */
        assert_eq!(segs[0].fixups.len(), 1);
        assert!(segs[0].fixups[0].offsets.is_empty());
    }

    #[test]
    fn zero_min_alloc_means_full_segment() {
        let mut file = vec![0u8; 0x20];
        file[0] = 1; /* sector 1 */
        file[2] = 4; /* length */
        /* flags 0, min_alloc 0 */
        let image = Image::new(file);
        let mut arena = RegionArena::new();
        let segs = read_segments(&image, 0, 1, 4, &[], &mut arena).unwrap();
        assert_eq!(segs[0].min_alloc, 0x10000);
    }
}
