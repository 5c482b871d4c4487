use bytemuck::{Pod, Zeroable};
use log::warn;

///
/// COFF file header, straight after the `PE\0\0` magic.
///
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct PeFileHeader {
    pub machine: u16,                 /* 04 */
    pub number_of_sections: u16,      /* 06 */
    pub time_date_stamp: u32,         /* 08 */
    pub pointer_to_symbol_table: u32, /* 0c */
    pub number_of_symbols: u32,       /* 10 */
    pub size_of_optional_header: u16, /* 14 */
    pub characteristics: u16,         /* 16 */
}

///
/// Optional header, 32-bit variant (magic 0x10b).
///
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct PeOptionalHeader32 {
    /* standard COFF fields */
    pub magic: u16,                      /* 18 */
    pub major_linker_version: u8,        /* 1a */
    pub minor_linker_version: u8,        /* 1b */
    pub size_of_code: u32,               /* 1c */
    pub size_of_initialized_data: u32,   /* 20 */
    pub size_of_uninitialized_data: u32, /* 24 */
    pub address_of_entry_point: u32,     /* 28 */
    pub base_of_code: u32,               /* 2c */
    pub base_of_data: u32,               /* 30 */
    /* PE fields */
    pub image_base: u32,                    /* 34 */
    pub section_alignment: u32,             /* 38 */
    pub file_alignment: u32,                /* 3c */
    pub major_operating_system_version: u16, /* 40 */
    pub minor_operating_system_version: u16, /* 42 */
    pub major_image_version: u16,           /* 44 */
    pub minor_image_version: u16,           /* 46 */
    pub major_subsystem_version: u16,       /* 48 */
    pub minor_subsystem_version: u16,       /* 4a */
    pub win32_version_value: u32,           /* 4c */
    pub size_of_image: u32,                 /* 50 */
    pub size_of_headers: u32,               /* 54 */
    pub checksum: u32,                      /* 58 */
    pub subsystem: u16,                     /* 5c */
    pub dll_characteristics: u16,           /* 5e */
    pub size_of_stack_reserve: u32,         /* 60 */
    pub size_of_stack_commit: u32,          /* 64 */
    pub size_of_heap_reserve: u32,          /* 68 */
    pub size_of_heap_commit: u32,           /* 6c */
    pub loader_flags: u32,                  /* 70 */
    pub number_of_rva_and_sizes: u32,       /* 74 */
}

///
/// Optional header, PE32+ variant (magic 0x20b). The data base field
/// is gone and the base and size fields widen to 64 bits.
///
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct PeOptionalHeader64 {
    pub magic: u16,                      /* 18 */
    pub major_linker_version: u8,        /* 1a */
    pub minor_linker_version: u8,        /* 1b */
    pub size_of_code: u32,               /* 1c */
    pub size_of_initialized_data: u32,   /* 20 */
    pub size_of_uninitialized_data: u32, /* 24 */
    pub address_of_entry_point: u32,     /* 28 */
    pub base_of_code: u32,               /* 2c */
    pub image_base: u64,                 /* 30 */
    pub section_alignment: u32,          /* 38 */
    pub file_alignment: u32,             /* 3c */
    pub major_operating_system_version: u16, /* 40 */
    pub minor_operating_system_version: u16, /* 42 */
    pub major_image_version: u16,        /* 44 */
    pub minor_image_version: u16,        /* 46 */
    pub major_subsystem_version: u16,    /* 48 */
    pub minor_subsystem_version: u16,    /* 4a */
    pub win32_version_value: u32,        /* 4c */
    pub size_of_image: u32,              /* 50 */
    pub size_of_headers: u32,            /* 54 */
    pub checksum: u32,                   /* 58 */
    pub subsystem: u16,                  /* 5c */
    pub dll_characteristics: u16,        /* 5e */
    pub size_of_stack_reserve: u64,      /* 60 */
    pub size_of_stack_commit: u64,       /* 68 */
    pub size_of_heap_reserve: u64,       /* 70 */
    pub size_of_heap_commit: u64,        /* 78 */
    pub loader_flags: u32,               /* 80 */
    pub number_of_rva_and_sizes: u32,    /* 84 */
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PeDirectory {
    pub address: u32,
    pub size: u32,
}

const PE_SUBSYSTEMS: [&str; 17] = [
    "unknown",
    "native",
    "GUI",
    "CUI",
    "(unknown value 4)",
    "OS/2 CUI",
    "(unknown value 6)",
    "POSIX CUI",
    "(unknown value 8)",
    "CE",
    "EFI",
    "EFI with boot services",
    "EFI with runtime services",
    "EFI ROM image",
    "Xbox",
    "(unknown value 15)",
    "boot",
];

fn print_flags(flags: u16) {
    let mut buffer = String::new();
    if flags & 0x0001 != 0 {
        buffer.push_str(", relocations stripped");
    }
    if flags & 0x0002 != 0 {
        buffer.push_str(", executable");
    }
    if flags & 0x0004 != 0 {
        buffer.push_str(", line numbers stripped");
    }
    if flags & 0x0008 != 0 {
        buffer.push_str(", local symbols stripped");
    }
    if flags & 0x0010 != 0 {
        buffer.push_str(", aggressively trimmed");
    }
    if flags & 0x0020 != 0 {
        buffer.push_str(", large address aware");
    }
    if flags & 0x0040 != 0 {
        buffer.push_str(", 16-bit");
    }
    if flags & 0x0080 != 0 {
        buffer.push_str(", little-endian");
    }
    if flags & 0x0100 != 0 {
        buffer.push_str(", 32-bit");
    }
    if flags & 0x0200 != 0 {
        buffer.push_str(", debug info stripped");
    }
    if flags & 0x0400 != 0 {
        buffer.push_str(", IMAGE_FILE_REMOVABLE_RUN_FROM_SWAP");
    }
    if flags & 0x0800 != 0 {
        buffer.push_str(", IMAGE_FILE_NET_RUN_FROM_SWAP");
    }
    if flags & 0x1000 != 0 {
        buffer.push_str(", system file");
    }
    if flags & 0x2000 != 0 {
        buffer.push_str(", DLL");
    }
    if flags & 0x4000 != 0 {
        buffer.push_str(", uniprocessor");
    }
    if flags & 0x8000 != 0 {
        buffer.push_str(", big-endian");
    }
    if buffer.is_empty() {
        println!("Flags: 0x{:04x}", flags);
    } else {
        println!("Flags: 0x{:04x} ({})", flags, &buffer[2..]);
    }
}

fn print_dll_flags(flags: u16) {
    let mut buffer = String::new();
    if flags & 0x0001 != 0 {
        buffer.push_str(", per-process initialization");
    }
    if flags & 0x0002 != 0 {
        buffer.push_str(", per-process termination");
    }
    if flags & 0x0004 != 0 {
        buffer.push_str(", per-thread initialization");
    }
    if flags & 0x0008 != 0 {
        buffer.push_str(", per-thread termination");
    }
    if flags & 0x0040 != 0 {
        buffer.push_str(", dynamic base");
    }
    if flags & 0x0080 != 0 {
        buffer.push_str(", force integrity");
    }
    if flags & 0x0100 != 0 {
        buffer.push_str(", DEP compatible");
    }
    if flags & 0x0200 != 0 {
        buffer.push_str(", no isolation");
    }
    if flags & 0x0400 != 0 {
        buffer.push_str(", no SEH");
    }
    if flags & 0x0800 != 0 {
        buffer.push_str(", no bind");
    }
    if flags & 0x2000 != 0 {
        buffer.push_str(", WDM driver");
    }
    if flags & 0x8000 != 0 {
        buffer.push_str(", terminal server aware");
    }
    if flags & 0x5030 != 0 {
        buffer.push_str(&format!(", (unknown flags 0x{:04x})", flags & 0x5030));
    }
    if buffer.is_empty() {
        println!("DLL flags: 0x{:04x}", flags);
    } else {
        println!("DLL flags: 0x{:04x} ({})", flags, &buffer[2..]);
    }
}

fn print_subsystem(subsystem: u16) {
    if (subsystem as usize) < PE_SUBSYSTEMS.len() {
        println!("Subsystem: {}", PE_SUBSYSTEMS[subsystem as usize]); /* 5c */
    } else {
        warn!("Subsystem: (unknown value {})", subsystem);
    }
}

fn print_opt32(opt: &PeOptionalHeader32, rel_addr: bool) {
    println!("File version: {}.{}", opt.major_image_version, opt.minor_image_version); /* 44 */
    println!(
        "Linker version: {}.{}",
        opt.major_linker_version, opt.minor_linker_version
    ); /* 1a */

    if opt.address_of_entry_point != 0 {
        let mut address = opt.address_of_entry_point as u64;
        if !rel_addr {
            address += opt.image_base as u64;
        }
        println!("Program entry point: 0x{:x}", address); /* 28 */
    }

    println!("Base of code section: 0x{:x}", opt.base_of_code); /* 2c */
    println!("Base of data section: 0x{:x}", opt.base_of_data); /* 30 */
    println!("Preferred base address: 0x{:x}", opt.image_base); /* 34 */
    println!(
        "Required OS version: {}.{}",
        opt.major_operating_system_version, opt.minor_operating_system_version
    ); /* 40 */

    if opt.win32_version_value != 0 {
        warn!("Win32VersionValue is {} (expected 0)", opt.win32_version_value); /* 4c */
    }
    print_subsystem(opt.subsystem);
    println!(
        "Subsystem version: {}.{}",
        opt.major_subsystem_version, opt.minor_subsystem_version
    ); /* 48 */
    print_dll_flags(opt.dll_characteristics); /* 5e */

    println!("Stack size (reserve): {} bytes", opt.size_of_stack_reserve); /* 60 */
    println!("Stack size (commit): {} bytes", opt.size_of_stack_commit); /* 64 */
    println!("Heap size (reserve): {} bytes", opt.size_of_heap_reserve); /* 68 */
    println!("Heap size (commit): {} bytes", opt.size_of_heap_commit); /* 6c */

    if opt.loader_flags != 0 {
        warn!("LoaderFlags is 0x{:x} (expected 0)", opt.loader_flags); /* 70 */
    }
}

fn print_opt64(opt: &PeOptionalHeader64, rel_addr: bool) {
    println!("File version: {}.{}", opt.major_image_version, opt.minor_image_version); /* 44 */
    println!(
        "Linker version: {}.{}",
        opt.major_linker_version, opt.minor_linker_version
    ); /* 1a */

    if opt.address_of_entry_point != 0 {
        let mut address = opt.address_of_entry_point as u64;
        if !rel_addr {
            address += opt.image_base;
        }
        println!("Program entry point: 0x{:x}", address); /* 28 */
    }

    println!("Base of code section: 0x{:x}", opt.base_of_code); /* 2c */
    println!("Preferred base address: 0x{:x}", opt.image_base); /* 30 */
    println!(
        "Required OS version: {}.{}",
        opt.major_operating_system_version, opt.minor_operating_system_version
    ); /* 40 */

    if opt.win32_version_value != 0 {
        warn!("Win32VersionValue is {} (expected 0)", opt.win32_version_value); /* 4c */
    }
    print_subsystem(opt.subsystem);
    println!(
        "Subsystem version: {}.{}",
        opt.major_subsystem_version, opt.minor_subsystem_version
    ); /* 48 */
    print_dll_flags(opt.dll_characteristics); /* 5e */

    println!("Stack size (reserve): {} bytes", opt.size_of_stack_reserve); /* 60 */
    println!("Stack size (commit): {} bytes", opt.size_of_stack_commit); /* 68 */
    println!("Heap size (reserve): {} bytes", opt.size_of_heap_reserve); /* 70 */
    println!("Heap size (commit): {} bytes", opt.size_of_heap_commit); /* 78 */

    if opt.loader_flags != 0 {
        warn!("LoaderFlags is 0x{:x} (expected 0)", opt.loader_flags); /* 80 */
    }
}

pub fn print_header(pe: &super::PeExecutable) {
    println!();

    if pe.header.size_of_optional_header == 0 {
        println!("No optional header");
        return;
    } else if (pe.header.size_of_optional_header as usize)
        < std::mem::size_of::<PeOptionalHeader32>()
    {
        warn!(
            "Size of optional header is {} (expected at least {}).",
            pe.header.size_of_optional_header,
            std::mem::size_of::<PeOptionalHeader32>()
        );
    }
    print_flags(pe.header.characteristics); /* 16 */

    if let Some(opt) = &pe.opt32 {
        println!("Image type: 32-bit");
        print_opt32(opt, pe.rel_addr);
    } else if let Some(opt) = &pe.opt64 {
        println!("Image type: 64-bit");
        print_opt64(opt, pe.rel_addr);
    }
}
