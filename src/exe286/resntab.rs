//! Resident and non-resident name tables.
//!
//! Both tables share one layout: a leading Pascal string naming the
//! module (resident) or describing it (non-resident), then name/ordinal
//! pairs until a zero-length string. The names land on the entry table
//! entries their ordinals refer to.

use log::warn;
use std::io;

use crate::exe286::demangle::demangle;
use crate::exe286::enttab::NeEntry;
use crate::image::Image;

///
/// Reads one name table at `start`, filling entry names, and returns
/// the leading module name / description string.
///
pub fn read_name_table(
    image: &Image,
    start: usize,
    entries: &mut [NeEntry],
    apply_demangle: bool,
) -> io::Result<String> {
    let mut cursor = start;

    let length = image.read_u8(cursor)? as usize;
    cursor += 1;
    let first = String::from_utf8_lossy(image.slice(cursor, length)?).into_owned();
    cursor += length + 2; /* the ordinal after the module name is 0 */

    loop {
        let length = image.read_u8(cursor)? as usize;
        cursor += 1;
        if length == 0 {
            break;
        }
        let mut name = String::from_utf8_lossy(image.slice(cursor, length)?).into_owned();
        cursor += length;

        if apply_demangle && name.starts_with('?') {
            name = demangle(&name);
        }

        let ordinal = image.read_u16(cursor)?;
        cursor += 2;

        if ordinal >= 1 && (ordinal as usize) <= entries.len() {
            entries[ordinal as usize - 1].name = Some(name);
        } else {
            warn!("Name {} given to invalid ordinal {}.", name, ordinal);
        }
    }

    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_attach_to_their_ordinals() {
        let mut table = Vec::new();
        table.push(5);
        table.extend_from_slice(b"MYLIB");
        table.extend_from_slice(&[0, 0]); /* module name ordinal 0 */
        table.push(4);
        table.extend_from_slice(b"FUNC");
        table.extend_from_slice(&[2, 0]); /* ordinal 2 */
        table.push(0);

        let image = Image::new(table);
        let mut entries = vec![NeEntry::default(), NeEntry::default()];
        let module = read_name_table(&image, 0, &mut entries, false).unwrap();
        assert_eq!(module, "MYLIB");
        assert_eq!(entries[1].name.as_deref(), Some("FUNC"));
        assert!(entries[0].name.is_none());
    }
}
