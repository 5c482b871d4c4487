use bytemuck::{Pod, Zeroable};
use log::warn;
use std::io::{self, ErrorKind};

use crate::exe286::{NE_CIGAM, NE_MAGIC};
use crate::image::Image;

///
/// OS/2 & Windows segmented executable header.
///
/// All table pointers but `ne_nrestab` are relative to the header
/// itself; the non-resident names live at an absolute file offset.
///
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct NeHeader {
    pub ne_magic: u16,        /* 00 'NE' */
    pub ne_ver: u8,           /* 02 linker version */
    pub ne_rev: u8,           /* 03 linker revision */
    pub ne_enttab: u16,       /* 04 offset to entry table */
    pub ne_cbenttab: u16,     /* 06 length of entry table */
    pub ne_crc: u32,          /* 08 checksum */
    pub ne_flags: u16,        /* 0c module flags */
    pub ne_autodata: u8,      /* 0e automatic data segment */
    pub ne_unused: u8,        /* 0f */
    pub ne_heap: u16,         /* 10 initial local heap */
    pub ne_stack: u16,        /* 12 initial stack size */
    pub ne_ip: u16,           /* 14 initial IP */
    pub ne_cs: u16,           /* 16 initial CS */
    pub ne_sp: u16,           /* 18 initial SP */
    pub ne_ss: u16,           /* 1a initial SS */
    pub ne_cseg: u16,         /* 1c segment count */
    pub ne_cmod: u16,         /* 1e module reference count */
    pub ne_cbnrestab: u16,    /* 20 non-resident name table size */
    pub ne_segtab: u16,       /* 22 offset to segment table */
    pub ne_rsrctab: u16,      /* 24 offset to resource table */
    pub ne_restab: u16,       /* 26 offset to resident name table */
    pub ne_modtab: u16,       /* 28 offset to module reference table */
    pub ne_imptab: u16,       /* 2a offset to imported names table */
    pub ne_nrestab: u32,      /* 2c ABSOLUTE offset to non-resident names */
    pub ne_cmovent: u16,      /* 30 movable entry count */
    pub ne_align: u16,        /* 32 logical sector alignment shift */
    pub ne_cres: u16,         /* 34 resource segment count */
    pub ne_exetyp: u8,        /* 36 target OS */
    pub ne_flagsothers: u8,   /* 37 OS/2 flags */
    pub ne_pretthunks: u16,   /* 38 offset to return thunks */
    pub ne_psegrefbytes: u16, /* 3a offset to segment ref. bytes */
    pub ne_swaparea: u16,     /* 3c minimum code swap area */
    pub ne_expver_min: u8,    /* 3e expected Windows version (minor) */
    pub ne_expver_maj: u8,    /* 3f expected Windows version (major) */
}

impl NeHeader {
    pub fn read(image: &Image, offset: usize) -> io::Result<Self> {
        let header: NeHeader = bytemuck::pod_read_unaligned(image.slice(offset, 0x40)?);
        match header.ne_magic {
            NE_MAGIC | NE_CIGAM => Ok(header),
            _ => Err(io::Error::new(
                ErrorKind::InvalidData,
                "invalid magic for segmented executable",
            )),
        }
    }
}

fn print_flags(flags: u16) {
    let mut buffer = String::new();
    match flags & 0x0003 {
        0 => buffer.push_str("no DGROUP"),
        1 => buffer.push_str("single DGROUP"),
        2 => buffer.push_str("multiple DGROUPs"),
        _ => buffer.push_str("(unknown DGROUP type 3)"),
    }
    if flags & 0x0004 != 0 {
        buffer.push_str(", global initialization");
    }
    if flags & 0x0008 != 0 {
        buffer.push_str(", protected mode only");
    }
    if flags & 0x0010 != 0 {
        buffer.push_str(", 8086");
    }
    if flags & 0x0020 != 0 {
        buffer.push_str(", 80286");
    }
    if flags & 0x0040 != 0 {
        buffer.push_str(", 80386");
    }
    if flags & 0x0080 != 0 {
        buffer.push_str(", 80x87");
    }
    match flags & 0x0700 {
        0x0100 => buffer.push_str(", fullscreen"), /* FRAMEBUF */
        0x0200 => buffer.push_str(", console"),    /* API compatible */
        0x0300 => buffer.push_str(", GUI"),        /* uses API */
        0x0000 => buffer.push_str(", (no subsystem)"),
        other => buffer.push_str(&format!(", (unknown application type {})", other >> 8)),
    }
    if flags & 0x0800 != 0 {
        buffer.push_str(", self-loading"); /* OS/2 family */
    }
    if flags & 0x1000 != 0 {
        buffer.push_str(", (unknown flag 0x1000)");
    }
    if flags & 0x2000 != 0 {
        buffer.push_str(", contains linker errors");
    }
    if flags & 0x4000 != 0 {
        buffer.push_str(", non-conforming program");
    }
    if flags & 0x8000 != 0 {
        buffer.push_str(", library");
    }
    println!("Flags: 0x{:04x} ({})", flags, buffer);
}

fn print_os2flags(flags: u8) {
    let mut buffer = String::new();
    if flags & 0x01 != 0 {
        buffer.push_str(", long filename support");
    }
    if flags & 0x02 != 0 {
        buffer.push_str(", 2.x protected mode");
    }
    if flags & 0x04 != 0 {
        buffer.push_str(", 2.x proportional fonts");
    }
    if flags & 0x08 != 0 {
        buffer.push_str(", fast-load area"); /* gangload */
    }
    if flags & 0xf0 != 0 {
        buffer.push_str(&format!(", (unknown flags 0x{:02x})", flags & 0xf0));
    }

    if buffer.is_empty() {
        println!("OS/2 flags: 0x0000");
    } else {
        println!("OS/2 flags: 0x{:04x} ({})", flags, &buffer[2..]);
    }
}

const EXETYPES: [&str; 6] = [
    "unknown",              /* 0 */
    "OS/2",                 /* 1 */
    "Windows (16-bit)",     /* 2 */
    "European DOS 4.x",     /* 3 */
    "Windows 386 (32-bit)", /* 4 */
    "BOSS",                 /* 5 */
];

pub fn print_header(header: &NeHeader) {
    /* Still need to deal with:
     * 34 - number of resource segments (all of my testcases return 0)
     * 38 - offset to return thunks (have testcases)
     * 3a - offset to segment ref. bytes (same)
     */
    println!();
    println!("Linker version: {}.{}", header.ne_ver, header.ne_rev); /* 02 */
    println!("Checksum: {:08x}", header.ne_crc); /* 08 */
    print_flags(header.ne_flags); /* 0c */
    println!("Automatic data segment: {}", header.ne_autodata); /* 0e */
    if header.ne_unused != 0 {
        warn!("Header byte at position 0f has value 0x{:02x}.", header.ne_unused);
    }
    println!("Heap size: {} bytes", header.ne_heap); /* 10 */
    println!("Stack size: {} bytes", header.ne_stack); /* 12 */
    println!("Program entry point: {}:{:04x}", header.ne_cs, header.ne_ip); /* 14 */
    println!("Initial stack location: {}:{:04x}", header.ne_ss, header.ne_sp); /* 18 */
    if (header.ne_exetyp as usize) < EXETYPES.len() {
        /* 36 */
        println!("Target OS: {}", EXETYPES[header.ne_exetyp as usize]);
    } else {
        println!("Target OS: (unknown value {})", header.ne_exetyp);
    }
    print_os2flags(header.ne_flagsothers); /* 37 */
    println!("Swap area: {}", header.ne_swaparea); /* 3c */
    println!(
        "Expected Windows version: {}.{}", /* 3e */
        header.ne_expver_maj, header.ne_expver_min
    );
}
