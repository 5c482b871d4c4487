use bytemuck::{Pod, Zeroable};
use log::warn;
use std::io::{self, ErrorKind};

use crate::context::{DumpContext, Mode, Opts};
use crate::image::Image;
use crate::region::{ByteFlags, CodeRegion, RegionArena, RegionId};
use crate::scan::{scan, Container};
use crate::x86::decode::decode;
use crate::x86::fmt::print_instr;
use crate::x86::MAX_INSTR;

pub const E_MAGIC: u16 = 0x5a4d;
pub const E_CIGAM: u16 = 0x4d5a;

///
/// Mark Zbikowski header of DOS programs
///
/// Only the 0x1c-byte original header is mandatory; e_lfanew and the
/// OEM area exist in files that carry a newer executable behind the
/// stub and are read separately by the format sniffer.
///
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct MzHeader {
    pub e_magic: u16,    /* 00: MZ header signature */
    pub e_cblp: u16,     /* 02: bytes on last page of file */
    pub e_cp: u16,       /* 04: pages in file */
    pub e_crlc: u16,     /* 06: relocations */
    pub e_cparhdr: u16,  /* 08: size of header in paragraphs */
    pub e_minalloc: u16, /* 0a: minimum extra paragraphs needed */
    pub e_maxalloc: u16, /* 0c: maximum extra paragraphs needed */
    pub e_ss: u16,       /* 0e: initial (relative) SS value */
    pub e_sp: u16,       /* 10: initial SP value */
    pub e_csum: u16,     /* 12: checksum */
    pub e_ip: u16,       /* 14: initial IP value */
    pub e_cs: u16,       /* 16: initial (relative) CS value */
    pub e_lfarlc: u16,   /* 18: file address of relocation table */
    pub e_ovno: u16,     /* 1a: overlay number */
}

impl MzHeader {
    pub fn read(image: &Image) -> io::Result<Self> {
        let header: MzHeader = bytemuck::pod_read_unaligned(image.slice(0, 0x1c)?);
        match header.e_magic {
            E_MAGIC | E_CIGAM => Ok(header),
            _ => Err(io::Error::new(
                ErrorKind::InvalidData,
                "missing real-mode executable header",
            )),
        }
    }
}

///
/// MZ (aka real-mode) addresses are "segmented", but not really.
/// Relative segments >= 0xfff0 point back into the PSP.
///
pub fn realaddr(segment: u16, offset: u16) -> u32 {
    if segment < 0xfff0 {
        segment as u32 * 0x10 + offset as u32
    } else {
        (segment as u32 * 0x10 + offset as u32).wrapping_sub(0x100000)
    }
}

///
/// A loaded DOS program: one implicit 16-bit code area starting after
/// the header paragraphs, no relocations that matter for scanning.
///
pub struct MzExecutable {
    pub header: MzHeader,
    pub entry_point: u32,
    pub start: u32,
    pub length: usize,
    pub region: RegionId,
}

struct MzScan;
impl Container for MzScan {}

impl MzExecutable {
    pub fn read(image: &Image, arena: &mut RegionArena) -> io::Result<Self> {
        let header = MzHeader::read(image)?;

        let entry_point = realaddr(header.e_cs, header.e_ip);
        let start = header.e_cparhdr as u32 * 16;
        let mut length = (header.e_cp.max(1) as usize - 1) * 512 + header.e_cblp as usize;
        if header.e_cblp == 0 {
            length += 512;
        }

        let region = arena.push(CodeRegion::new(
            "code".to_string(),
            0,
            start as usize,
            length,
            length,
            16,
            true,
        ));

        let mz = MzExecutable {
            header,
            entry_point,
            start,
            length,
            region,
        };

        if mz.entry_point as usize > mz.length {
            warn!(
                "Entry point {:05x} exceeds segment length ({:05x})",
                mz.entry_point, mz.length
            );
        } else {
            arena.get_mut(region).mark(entry_point as usize, ByteFlags::FUNC);
            scan(image, arena, &MzScan, region, entry_point as usize);
        }
        Ok(mz)
    }

    pub fn print_header(&self) {
        println!();
        println!(
            "Minimum extra allocation (0xa): {} bytes",
            self.header.e_minalloc as u32 * 16
        );
        println!(
            "Maximum extra allocation (0xc): {} bytes",
            self.header.e_maxalloc as u32 * 16
        );
        println!(
            "Initial stack location (0xe): {:05x}",
            realaddr(self.header.e_ss, self.header.e_sp)
        );
        println!("Program entry point (0x14): {:05x}", self.entry_point);
        println!("Overlay number (0x1a): {}", self.header.e_ovno);
    }

    fn print_mz_instr(&self, ctx: &DumpContext, image: &Image, arena: &RegionArena, ip: u32) -> usize {
        let region = arena.get(self.region);
        let take = MAX_INSTR.min(self.length - ip as usize);
        let mut buffer = image.read_padded(self.start as usize + ip as usize, take);
        buffer.resize(MAX_INSTR, 0);

        let (mut instr, len) = decode(ip as u64, &buffer, 16, ctx.syntax);
        let line = print_instr(
            ctx,
            &format!("{:05x}", ip),
            &buffer[..len.min(MAX_INSTR)],
            len,
            region.flags_at(ip as usize),
            &mut instr,
            None,
            16,
        );
        println!("{}", line);
        len
    }

    pub fn print_code(&self, ctx: &DumpContext, image: &Image, arena: &RegionArena) {
        let region = arena.get(self.region);
        let mut ip: u32 = 0;

        println!();
        println!("Code (start = 0x{:x}, length = 0x{:x}):", self.start, self.length);

        while (ip as usize) < self.length {
            /* find a valid instruction */
            if !region.flags_at(ip as usize).contains(ByteFlags::VALID) {
                if ctx.opts.contains(Opts::DISASSEMBLE_ALL) {
                    /* still skip zeroes */
                    if image
                        .read_u8(self.start as usize + ip as usize)
                        .map(|b| b == 0)
                        .unwrap_or(true)
                    {
                        println!("     ...");
                        ip += 1;
                        while (ip as usize) < self.length
                            && image
                                .read_u8(self.start as usize + ip as usize)
                                .map(|b| b == 0)
                                .unwrap_or(true)
                        {
                            ip += 1;
                        }
                    }
                } else {
                    println!("     ...");
                    while (ip as usize) < self.length
                        && !region.flags_at(ip as usize).contains(ByteFlags::VALID)
                    {
                        ip += 1;
                    }
                }
            }

            if ip as usize >= self.length {
                return;
            }

            if region.flags_at(ip as usize).contains(ByteFlags::FUNC) {
                println!();
                println!("{:05x} <no name>:", ip);
            }

            ip += self.print_mz_instr(ctx, image, arena, ip) as u32;
        }
    }
}

///
/// Driver for a plain DOS executable.
///
pub fn dump_mz(image: &Image, ctx: &DumpContext) -> io::Result<()> {
    let mut arena = RegionArena::new();
    let mz = MzExecutable::read(image, &mut arena)?;

    println!("Module type: MZ (DOS executable)");

    if ctx.mode.contains(Mode::HEADER) {
        mz.print_header();
    }

    if ctx.mode.contains(Mode::DISASSEMBLE) {
        mz.print_code(ctx, image, &arena);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_exe() -> Vec<u8> {
        /* header paragraphs = 2 (0x20 bytes), one page, 0x10 bytes on it,
         * entry at 0:0; code: mov ah, 0x4c; int 0x21 */
        let mut file = vec![0u8; 0x24];
        file[0x00] = 0x4d;
        file[0x01] = 0x5a;
        file[0x02] = 0x10; /* e_cblp */
        file[0x04] = 0x01; /* e_cp */
        file[0x08] = 0x02; /* e_cparhdr */
        file[0x20] = 0xb4;
        file[0x21] = 0x4c;
        file[0x22] = 0xcd;
        file[0x23] = 0x21;
        file
    }

    #[test]
    fn reads_the_code_area_and_scans_the_entry() {
        let image = Image::new(tiny_exe());
        let mut arena = RegionArena::new();
        let mz = MzExecutable::read(&image, &mut arena).unwrap();
        assert_eq!(mz.start, 0x20);
        assert_eq!(mz.length, 0x10);
        assert_eq!(mz.entry_point, 0);

        let r = arena.get(mz.region);
        assert!(r.flags_at(0).contains(ByteFlags::VALID | ByteFlags::FUNC));
        assert!(r.flags_at(1).contains(ByteFlags::SCANNED));
        assert!(r.flags_at(2).contains(ByteFlags::VALID));
        assert!(r.flags_at(3).contains(ByteFlags::SCANNED));
    }

    #[test]
    fn rejects_wrong_magic() {
        let image = Image::new(vec![0u8; 0x40]);
        assert!(MzHeader::read(&image).is_err());
    }

    #[test]
    fn last_page_of_zero_means_a_full_page() {
        let mut file = tiny_exe();
        file[0x02] = 0; /* e_cblp = 0 */
        file.resize(0x220, 0x90);
        let image = Image::new(file);
        let mut arena = RegionArena::new();
        let mz = MzExecutable::read(&image, &mut arena).unwrap();
        assert_eq!(mz.length, 512);
    }

    #[test]
    fn real_mode_address_arithmetic() {
        assert_eq!(realaddr(0x0000, 0x0000), 0);
        assert_eq!(realaddr(0x0010, 0x0004), 0x104);
        assert_eq!(realaddr(0xffef, 0x0000), 0xffef0);
        /* segments past 0xfff0 wrap into the PSP */
        assert_eq!(realaddr(0xfff0, 0x0100), 0x0);
        assert_eq!(realaddr(0xffff, 0x1000), 0xff0);
    }
}
