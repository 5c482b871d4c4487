//! This crate dissects legacy executable modules of the DOS and Windows
//! families and reconstructs a disassembly of everything reachable from
//! their entry points.
//!
//! ### Support
//!
//! Containers recognized by the two magic bytes at file start:
//!  - `MZ (mod exe)` DOS 16-bit real-mode executables
//!  - `NE (mod exe286)` Windows 1.x-3.x / OS/2 1.x segmented 16-bit executables
//!  - `PE (mod pe)` Win32/Win64 Portable Executables, 32-bit and PE32+
//!
//! ### Pipeline
//!
//! A container adapter reads the headers and carves the file into code
//! regions, each with a per-byte flag vector. Relocation tables are
//! indexed first, then the control-flow scanner (`scan`) walks every
//! entry point and export through the x86 decoder (`x86`), marking the
//! bytes it proves to be instructions. A final pass renders the marked
//! instructions in NASM, MASM or GAS syntax, with operands rewritten
//! through the relocation and import/export indices where the container
//! supplies them.
//!
//! All of the per-file state lives in values handed down the call chain.
//! Nothing is cached between files, so a batch run can process damaged
//! and healthy modules back to back.

/// invocation settings threaded through the pipeline
pub mod context;
/// 16-bit DOS executables
pub mod exe;
/// segmented 16-bit New Executables
pub mod exe286;
/// bounds-checked byte image
pub mod image;
/// Win32/Win64 Portable Executables
pub mod pe;
/// code regions and their per-byte flag vectors
pub mod region;
/// control-flow scanner over code regions
pub mod scan;
/// export specfile writing and parsing
pub mod spec;
/// support of specific types
pub mod types;
/// x86 opcode tables, decoder and formatter
pub mod x86;
