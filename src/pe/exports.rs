//! Export directory.

use bytemuck::{Pod, Zeroable};
use log::warn;
use std::io;

use crate::image::Image;
use crate::pe::PeExecutable;

///
/// More headers. It's like a PE file is nothing but headers.
///
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct PeExportHeader {
    pub flags: u32,            /* 00 */
    pub timestamp: u32,        /* 04 */
    pub ver_major: u16,        /* 08 */
    pub ver_minor: u16,        /* 0a */
    pub module_name_addr: u32, /* 0c */
    pub ordinal_base: u32,     /* 10 */
    pub addr_table_count: u32, /* 14 */
    pub export_count: u32,     /* 18 */
    pub addr_table_addr: u32,  /* 1c */
    pub name_table_addr: u32,  /* 20 */
    pub ord_table_addr: u32,   /* 24 */
}

#[derive(Debug, Clone)]
pub struct PeExport {
    pub address: u32,
    pub ordinal: u16,
    pub name: Option<String>,
}

///
/// Reads the export directory into (ordinal, address, name) triples.
/// When the address table is longer than the name count, the extra
/// exports are nameless and reachable by ordinal only.
///
pub fn read_export_table(pe: &mut PeExecutable, image: &Image) -> io::Result<()> {
    let Some(dir_offset) = pe.addr_to_offset(pe.dirs[0].address as u64) else {
        warn!("Export directory at {:x} isn't in a section?", pe.dirs[0].address);
        return Ok(());
    };
    let header: PeExportHeader = bytemuck::pod_read_unaligned(image.slice(dir_offset, 0x28)?);

    /* grab the name */
    if let Some(name_offset) = pe.addr_to_offset(header.module_name_addr as u64) {
        pe.name = Some(image.read_cstring(name_offset)?);
    }

    let Some(addr_offset) = pe.addr_to_offset(header.addr_table_addr as u64) else {
        warn!("Export address table at {:x} isn't in a section?", header.addr_table_addr);
        return Ok(());
    };

    let mut exports = Vec::with_capacity(header.addr_table_count as usize);
    for i in 0..header.addr_table_count as usize {
        exports.push(PeExport {
            ordinal: (header.ordinal_base + i as u32) as u16,
            address: image.read_u32(addr_offset + i * 4)?,
            name: None,
        });
    }

    /* the name and ordinal tables run in parallel */
    for i in 0..header.export_count as usize {
        let Some(ord_offset) = pe.addr_to_offset(header.ord_table_addr as u64 + i as u64 * 2)
        else {
            break;
        };
        let Some(name_ptr_offset) = pe.addr_to_offset(header.name_table_addr as u64 + i as u64 * 4)
        else {
            break;
        };
        let index = image.read_u16(ord_offset)? as usize;
        let name_addr = image.read_u32(name_ptr_offset)?;
        let Some(name_offset) = pe.addr_to_offset(name_addr as u64) else {
            continue;
        };
        if let Some(export) = exports.get_mut(index) {
            export.name = Some(image.read_cstring(name_offset)?);
        } else {
            warn!("Export name {} given to invalid index {}.", name_addr, index);
        }
    }

    pe.exports = exports;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DumpContext;
    use crate::pe::tests::{minimal_pe32, read_for_test};

    #[test]
    fn nameless_exports_keep_their_ordinals() {
        /* the shared fixture exports one named symbol and one by
         * ordinal only */
        let image = Image::new(minimal_pe32());
        let (pe, _) = read_for_test(&image, &DumpContext::default());
        assert_eq!(pe.exports.len(), 2);
        assert_eq!(pe.exports[0].ordinal, 1);
        assert_eq!(pe.exports[0].name.as_deref(), Some("Start"));
        assert_eq!(pe.exports[1].ordinal, 2);
        assert!(pe.exports[1].name.is_none());
    }
}
