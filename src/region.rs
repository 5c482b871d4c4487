use bitflags::bitflags;

bitflags! {
    ///
    /// Per-byte discovery state. One of these lives for every byte of a
    /// code region's minimum allocation.
    ///
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ByteFlags: u8 {
        /// byte has been consumed by the decoder
        const SCANNED = 0x01;
        /// byte begins an instruction
        const VALID   = 0x02;
        /// instruction is jumped to
        const JUMP    = 0x04;
        /// instruction begins a function
        const FUNC    = 0x08;
        /// instruction is the target of a far call/jmp
        const FAR     = 0x10;
        /// byte has relocation data
        const RELOC   = 0x20;
    }
}

pub type RegionId = usize;

///
/// One contiguous range of executable (or data) bytes inside a container
/// unit: an NE segment, a PE section, the single MZ code area.
///
/// `min_alloc` is the size the loader reserves for the unit and is never
/// smaller than `length`; instructions may hang over the on-disk bytes
/// into the zero-filled remainder. The flag vector spans the whole
/// minimum allocation for that reason.
///
pub struct CodeRegion {
    /// container-assigned identifier: segment number or section name
    pub name: String,
    /// load address, used only when formatting addresses
    pub addr: u64,
    /// byte offset of the contents within the image
    pub start: usize,
    /// on-disk length in bytes
    pub length: usize,
    /// virtual size, >= length
    pub min_alloc: usize,
    /// 16, 32 or 64
    pub bits: u8,
    pub is_code: bool,
    flags: Vec<ByteFlags>,
}

impl CodeRegion {
    pub fn new(
        name: String,
        addr: u64,
        start: usize,
        length: usize,
        min_alloc: usize,
        bits: u8,
        is_code: bool,
    ) -> Self {
        let min_alloc = min_alloc.max(length);
        CodeRegion {
            name,
            addr,
            start,
            length,
            min_alloc,
            bits,
            is_code,
            flags: vec![ByteFlags::empty(); min_alloc],
        }
    }

    pub fn flags_at(&self, offset: usize) -> ByteFlags {
        self.flags.get(offset).copied().unwrap_or(ByteFlags::empty())
    }

    pub fn mark(&mut self, offset: usize, add: ByteFlags) {
        if let Some(f) = self.flags.get_mut(offset) {
            *f |= add;
        }
    }
}

///
/// All regions of one module, indexed by id. Cross-region references
/// (far fixup targets and the like) carry an id and an offset rather
/// than a pointer, so mutually-referencing segments are not a problem.
///
#[derive(Default)]
pub struct RegionArena {
    regions: Vec<CodeRegion>,
}

impl RegionArena {
    pub fn new() -> Self {
        RegionArena { regions: Vec::new() }
    }

    pub fn push(&mut self, region: CodeRegion) -> RegionId {
        self.regions.push(region);
        self.regions.len() - 1
    }

    pub fn get(&self, id: RegionId) -> &CodeRegion {
        &self.regions[id]
    }

    pub fn get_mut(&mut self, id: RegionId) -> &mut CodeRegion {
        &mut self.regions[id]
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CodeRegion> {
        self.regions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_alloc_never_below_length() {
        let r = CodeRegion::new("1".into(), 0, 0x200, 0x100, 0x40, 16, true);
        assert_eq!(r.min_alloc, 0x100);
        assert_eq!(r.flags_at(0xff), ByteFlags::empty());
    }

    #[test]
    fn marks_are_sticky_and_bounded() {
        let mut r = CodeRegion::new("1".into(), 0, 0, 4, 8, 16, true);
        r.mark(2, ByteFlags::SCANNED);
        r.mark(2, ByteFlags::VALID);
        assert_eq!(r.flags_at(2), ByteFlags::SCANNED | ByteFlags::VALID);
        r.mark(100, ByteFlags::VALID); // out of range, ignored
        assert_eq!(r.flags_at(100), ByteFlags::empty());
    }
}
