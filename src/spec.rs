//! Export specfiles.
//!
//! A specfile is an ordinals-and-names listing of a module's exports,
//! one `<ordinal>\t<name>` per line (or the bare ordinal when the name
//! is unknown). `dump -o` writes one next to the analyzed module; the
//! NE disassembler reads them back to give names to imported ordinals
//! that the importing module itself cannot supply.

use log::warn;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

///
/// One export destined for a specfile.
///
#[derive(Debug, Clone)]
pub struct SpecExport {
    pub ordinal: u16,
    pub name: Option<String>,
}

///
/// Writes `NAME.ORD` in the working directory.
///
pub fn write_specfile(module: &str, exports: &[SpecExport]) -> io::Result<()> {
    let spec_name = format!("{}.ORD", module);
    let mut specfile = File::create(&spec_name)?;

    specfile.write_all(b"# Generated by dump -o\n")?;
    for export in exports {
        match &export.name {
            Some(name) => writeln!(specfile, "{}\t{}", export.ordinal, name)?,
            None => writeln!(specfile, "{}", export.ordinal)?,
        }
    }
    specfile.flush()
}

fn parse_specfile(reader: impl BufRead, origin: &str) -> Vec<(u16, String)> {
    let mut exports = Vec::new();
    for line in reader.lines() {
        let Ok(line) = line else { break };
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (ordinal, name) = match line.split_once('\t') {
            Some((ord, name)) => (ord, Some(name)),
            None => (line.as_str(), None),
        };
        let Ok(ordinal) = ordinal.trim().parse::<u16>() else {
            warn!("Error reading specfile {} near line: `{}'", origin, line);
            continue;
        };
        if let Some(name) = name {
            exports.push((ordinal, name.to_string()));
        }
    }
    exports
}

///
/// Loads the exports of `module` from `MODULE.ORD`, then
/// `spec/MODULE.ORD`. A missing specfile is not an error; names simply
/// stay unknown and a note tells the user how to make one.
///
pub fn load_exports(module: &str) -> Vec<(u16, String)> {
    let mut name = format!("{:.8}.ORD", module);
    let file = match File::open(&name) {
        Ok(f) => Some(f),
        Err(_) => {
            name = format!("spec/{:.8}.ORD", module);
            File::open(&name).ok()
        }
    };
    let Some(file) = file else {
        warn!(
            "Note: couldn't find specfile for module {}; exported names won't be given.",
            module
        );
        warn!("      To create a specfile, run `dump -o <module.dll>'.");
        return Vec::new();
    };
    parse_specfile(BufReader::new(file), &name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_the_text_form() {
        let exports = vec![
            SpecExport { ordinal: 1, name: Some("INITTASK".to_string()) },
            SpecExport { ordinal: 5, name: None },
            SpecExport { ordinal: 680, name: Some("WAITEVENT".to_string()) },
        ];

        /* writer output, reconstructed in memory */
        let mut text = String::from("# Generated by dump -o\n");
        for e in &exports {
            match &e.name {
                Some(n) => text.push_str(&format!("{}\t{}\n", e.ordinal, n)),
                None => text.push_str(&format!("{}\n", e.ordinal)),
            }
        }

        let parsed = parse_specfile(text.as_bytes(), "TEST.ORD");
        assert_eq!(parsed.len(), 2); /* nameless ordinals carry no information */
        assert_eq!(parsed[0], (1, "INITTASK".to_string()));
        assert_eq!(parsed[1], (680, "WAITEVENT".to_string()));
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let text = "# comment\n\nnot-a-number\tNAME\n7\tGOOD\n";
        let parsed = parse_specfile(text.as_bytes(), "TEST.ORD");
        assert_eq!(parsed, vec![(7, "GOOD".to_string())]);
    }
}
