//! `dump`: tool to disassemble and print information from executable
//! files.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use exe86::context::{DumpContext, Mode, Opts, RelAddr, Syntax};
use exe86::image::Image;
use exe86::{exe, exe286, pe};

#[derive(Parser)]
#[command(
    name = "dump",
    version,
    about = "Disassemble and print information from DOS and Windows executable files."
)]
struct Args {
    /// Print embedded resources, optionally filtered by type or id
    #[arg(short = 'a', long = "resource", value_name = "filter",
          num_args = 0..=1, require_equals = true, default_missing_value = "*")]
    resource: Vec<String>,

    /// Produce output that can be compiled
    #[arg(short = 'c', long = "compilable")]
    compilable: bool,

    /// Demangle C++ function names
    #[arg(short = 'C', long = "demangle")]
    demangle: bool,

    /// Print disassembled machine code
    #[arg(short = 'd', long = "disassemble")]
    disassemble: bool,

    /// Disassemble all code, not just code reachable from entry points
    #[arg(short = 'D', long = "disassemble-all")]
    disassemble_all: bool,

    /// Print exported functions
    #[arg(short = 'e', long = "exports")]
    exports: bool,

    /// Print contents of the file header
    #[arg(short = 'f', long = "file-headers")]
    file_headers: bool,

    /// Print imported modules
    #[arg(short = 'i', long = "imports")]
    imports: bool,

    /// Disassembly syntax: att/gas, intel/masm, or nasm
    #[arg(short = 'M', long = "disassembler-options", value_name = "syntax")]
    syntax: Option<String>,

    /// Create a specfile from exports
    #[arg(short = 'o', long = "specfile")]
    specfile: bool,

    /// Display full contents of all sections
    #[arg(short = 's', long = "full-contents")]
    full_contents: bool,

    /// Print all headers (-f -e -i)
    #[arg(short = 'x', long = "all-headers")]
    all_headers: bool,

    /// Don't print raw instruction hex code
    #[arg(long = "no-show-raw-insn")]
    no_show_raw_insn: bool,

    /// Don't print instruction addresses
    #[arg(long = "no-prefix-addresses")]
    no_show_addresses: bool,

    /// Use relative addresses for PE files: y or n
    #[arg(long = "pe-rel-addr", value_name = "y/n")]
    pe_rel_addr: Option<String>,

    #[arg(required = true, value_name = "file")]
    files: Vec<PathBuf>,
}

fn build_context(args: &Args) -> Result<DumpContext, String> {
    let mut mode = Mode::empty();
    let mut opts = Opts::empty();

    if !args.resource.is_empty() {
        mode |= Mode::RSRC;
    }
    if args.disassemble {
        mode |= Mode::DISASSEMBLE;
    }
    if args.exports {
        mode |= Mode::EXPORT;
    }
    if args.file_headers {
        mode |= Mode::HEADER;
    }
    if args.imports {
        mode |= Mode::IMPORT;
    }
    if args.all_headers {
        mode |= Mode::HEADER | Mode::EXPORT | Mode::IMPORT;
    }
    if args.specfile {
        /* specfile generation is exclusive */
        mode = Mode::SPECFILE;
    }
    if mode.is_empty() {
        mode = Mode::all() & !Mode::SPECFILE;
    }

    if args.disassemble_all {
        opts |= Opts::DISASSEMBLE_ALL;
    }
    if args.demangle {
        opts |= Opts::DEMANGLE;
    }
    if args.no_show_raw_insn {
        opts |= Opts::NO_SHOW_RAW_INSN;
    }
    if args.no_show_addresses {
        opts |= Opts::NO_SHOW_ADDRESSES;
    }
    if args.compilable {
        opts |= Opts::COMPILABLE | Opts::NO_SHOW_ADDRESSES | Opts::NO_SHOW_RAW_INSN;
    }
    if args.full_contents {
        opts |= Opts::FULL_CONTENTS;
    }

    let syntax = match args.syntax.as_deref() {
        None => Syntax::Nasm,
        Some("att") | Some("gas") => Syntax::Gas,
        Some("intel") | Some("masm") => Syntax::Masm,
        Some("nasm") => Syntax::Nasm,
        Some(other) => return Err(format!("Unrecognized disassembly option `{}'.", other)),
    };

    let pe_rel_addr = match args.pe_rel_addr.as_deref() {
        None => RelAddr::Auto,
        Some(v) if v.starts_with(|c| matches!(c, '1' | 'y' | 'Y')) => RelAddr::On,
        Some(v) if v.starts_with(|c| matches!(c, '0' | 'n' | 'N')) => RelAddr::Off,
        Some(other) => return Err(format!("Unrecognized --pe-rel-addr option `{}'.", other)),
    };

    Ok(DumpContext {
        mode,
        opts,
        syntax,
        pe_rel_addr,
        resource_filters: args.resource.clone(),
    })
}

fn dump_file(path: &PathBuf, ctx: &DumpContext) -> std::io::Result<()> {
    let image = Image::new(std::fs::read(path)?);

    println!("File: {}", path.display());

    let magic = image.read_u16(0)?;
    if magic == 0x5a4d {
        /* MZ */
        let offset = image.read_u32(0x3c).unwrap_or(0) as usize;
        match image.read_u16(offset) {
            Ok(0x4550) => pe::dump_pe(&image, offset, ctx),
            Ok(0x454e) => exe286::dump_ne(&image, offset, ctx),
            _ => exe::dump_mz(&image, ctx),
        }
    } else {
        Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "file format not recognized",
        ))
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let args = Args::parse();
    let ctx = match build_context(&args) {
        Ok(ctx) => ctx,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let mut failed = false;
    for (i, file) in args.files.iter().enumerate() {
        if i > 0 {
            println!();
            println!();
        }
        if let Err(err) = dump_file(file, &ctx) {
            eprintln!("{}: {}", file.display(), err);
            failed = true;
        }
    }

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
