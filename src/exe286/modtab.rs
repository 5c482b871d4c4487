//! Module references and imported names.
//!
//! The module reference table is an array of word offsets into the
//! imported names table; each names one module this executable links
//! against. The imported names table itself is a pool of Pascal
//! strings shared by module names and imported procedure names.

use std::io;

use crate::context::{DumpContext, Mode, Opts};
use crate::exe286::demangle::demangle;
use crate::image::Image;
use crate::spec;
use crate::types::PascalString;

///
/// One referenced module and whatever exports a specfile supplied.
///
pub struct NeImportModule {
    pub name: String,
    pub exports: Vec<(u16, String)>,
}

impl NeImportModule {
    pub fn export_name(&self, ordinal: u16) -> Option<&str> {
        self.exports
            .iter()
            .find(|(ord, _)| *ord == ordinal)
            .map(|(_, name)| name.as_str())
    }
}

/// Pascal string out of the imported names pool
pub fn read_import_name(image: &Image, offset: usize) -> io::Result<PascalString> {
    let length = image.read_u8(offset)?;
    if length == 0 {
        return Ok(PascalString::empty());
    }
    Ok(PascalString::new(length, image.slice(offset + 1, length as usize)?.to_vec()))
}

pub fn read_module_table(
    image: &Image,
    modtab: usize,
    imptab: usize,
    count: u16,
    ctx: &DumpContext,
) -> io::Result<Vec<NeImportModule>> {
    let mut modules = Vec::with_capacity(count as usize);

    for i in 0..count as usize {
        let offset = image.read_u16(modtab + i * 2)? as usize;
        let name = read_import_name(image, imptab + offset)?.to_string();

        let exports = if ctx.mode.contains(Mode::DISASSEMBLE) {
            let mut exports = spec::load_exports(&name);
            if ctx.opts.contains(Opts::DEMANGLE) {
                for (_, name) in exports.iter_mut() {
                    if name.starts_with('?') {
                        *name = demangle(name);
                    }
                }
            }
            exports
        } else {
            Vec::new()
        };

        modules.push(NeImportModule { name, exports });
    }

    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DumpContext;

    #[test]
    fn module_names_come_from_the_import_pool() {
        /* modtab at 0: offsets 2 and 9; imptab at 4 */
        let mut file = vec![0u8; 0x20];
        file[0] = 2;
        file[2] = 9;
        /* imptab + 2 = 6: "KERNEL"; imptab + 9 = 13: "GDI" */
        file[6] = 6;
        file[7..13].copy_from_slice(b"KERNEL");
        file[13] = 3;
        file[14..17].copy_from_slice(b"GDI");

        let image = Image::new(file);
        let ctx = DumpContext { mode: crate::context::Mode::HEADER, ..DumpContext::default() };
        let modules = read_module_table(&image, 0, 4, 2, &ctx).unwrap();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].name, "KERNEL");
        assert_eq!(modules[1].name, "GDI");
    }
}
