//! Import directory.
//!
//! Each 20-byte descriptor names one module and carries two parallel
//! thunk arrays: the original name table and the IAT the loader
//! rewrites. The top bit of a thunk (31 or 63 by width) flips a slot
//! from name-RVA to ordinal. The two bytes at a name RVA are a binder
//! hint and get skipped.

use std::io;

use crate::image::Image;
use crate::pe::PeExecutable;

#[derive(Debug, Clone)]
pub struct PeNameTableEntry {
    pub name: String,
    pub ordinal: u16,
    pub is_ordinal: bool,
}

#[derive(Debug, Clone)]
pub struct PeImportModule {
    pub module: String,
    /// RVA of the import address table
    pub iat_addr: u32,
    pub nametab: Vec<PeNameTableEntry>,
}

fn read_name_table(
    pe: &PeExecutable,
    image: &Image,
    nametab_addr: u32,
) -> io::Result<Vec<PeNameTableEntry>> {
    let Some(offset) = pe.addr_to_offset(nametab_addr as u64) else {
        return Ok(Vec::new());
    };
    let wide = pe.magic == 0x20b;
    let slot = if wide { 8 } else { 4 };

    let mut entries = Vec::new();
    let mut index = 0usize;
    loop {
        let address = if wide {
            image.read_u64(offset + index * slot)?
        } else {
            image.read_u32(offset + index * slot)? as u64
        };
        if address == 0 {
            break;
        }
        let is_ordinal = if wide { address & (1 << 63) != 0 } else { address & (1 << 31) != 0 };
        if is_ordinal {
            entries.push(PeNameTableEntry {
                name: String::new(),
                ordinal: address as u16,
                is_ordinal: true,
            });
        } else {
            /* skip the hint */
            let name = match pe.addr_to_offset(address + 2) {
                Some(name_offset) => image.read_cstring(name_offset)?,
                None => String::new(),
            };
            entries.push(PeNameTableEntry { name, ordinal: 0, is_ordinal: false });
        }
        index += 1;
    }
    Ok(entries)
}

pub fn read_import_table(pe: &mut PeExecutable, image: &Image) -> io::Result<()> {
    let Some(offset) = pe.addr_to_offset(pe.dirs[1].address as u64) else {
        return Ok(());
    };

    let mut imports = Vec::new();
    let mut i = 0usize;
    loop {
        let descriptor = offset + i * 20;
        /* the table ends with an all-zero descriptor */
        if image.slice(descriptor, 20)?.iter().all(|b| *b == 0) {
            break;
        }
        let nametab_addr = image.read_u32(descriptor)?;
        let module_addr = image.read_u32(descriptor + 12)?;
        let iat_addr = image.read_u32(descriptor + 16)?;

        let module = match pe.addr_to_offset(module_addr as u64) {
            Some(module_offset) => image.read_cstring(module_offset)?,
            None => format!("module{}", i),
        };
        /* bound imports overwrite the IAT; the original names live in
         * the first thunk array */
        let thunks = if nametab_addr != 0 { nametab_addr } else { iat_addr };
        let nametab = read_name_table(pe, image, thunks)?;

        imports.push(PeImportModule { module, iat_addr, nametab });
        i += 1;
    }

    pe.imports = imports;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::context::DumpContext;
    use crate::image::Image;
    use crate::pe::tests::{minimal_pe32, read_for_test};

    #[test]
    fn import_names_skip_the_hint() {
        let image = Image::new(minimal_pe32());
        let (pe, _) = read_for_test(&image, &DumpContext::default());
        assert_eq!(pe.imports.len(), 1);
        assert_eq!(pe.imports[0].module, "KERNEL32.dll");
        assert_eq!(pe.imports[0].nametab.len(), 1);
        assert!(!pe.imports[0].nametab[0].is_ordinal);
        assert_eq!(pe.imports[0].nametab[0].name, "ExitProcess");
    }
}
