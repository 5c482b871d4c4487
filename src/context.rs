use bitflags::bitflags;

bitflags! {
    ///
    /// What to dump. An empty selection from the command line means
    /// "everything except specfile generation".
    ///
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Mode: u16 {
        const HEADER      = 0x0001;
        const RSRC        = 0x0002;
        const EXPORT      = 0x0004;
        const IMPORT      = 0x0008;
        const DISASSEMBLE = 0x0010;
        const SPECFILE    = 0x0080;
    }
}

bitflags! {
    ///
    /// Additional options orthogonal to the selection above.
    ///
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Opts: u16 {
        const DISASSEMBLE_ALL   = 0x0001;
        const DEMANGLE          = 0x0002;
        const NO_SHOW_RAW_INSN  = 0x0004;
        const NO_SHOW_ADDRESSES = 0x0008;
        const COMPILABLE        = 0x0010;
        const FULL_CONTENTS     = 0x0020;
    }
}

///
/// Which assembler dialect the listing imitates.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// AT&T, as emitted by GAS
    Gas,
    /// Intel, NASM flavor
    Nasm,
    /// Intel, MASM flavor
    Masm,
}

///
/// Whether PE listings strip the preferred image base from displayed
/// addresses. `Auto` resolves per module: relative for DLLs, absolute
/// for programs.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelAddr {
    Auto,
    On,
    Off,
}

///
/// Everything the pipeline needs to know about this invocation.
///
/// The decoder, scanner, resolver and formatter all borrow one of these
/// instead of consulting process-wide state, so two modules dumped in a
/// row cannot leak settings into each other.
///
#[derive(Debug, Clone)]
pub struct DumpContext {
    pub mode: Mode,
    pub opts: Opts,
    pub syntax: Syntax,
    pub pe_rel_addr: RelAddr,
    /// `-a=` arguments; resources whose type or id match any filter
    pub resource_filters: Vec<String>,
}

impl Default for DumpContext {
    fn default() -> Self {
        DumpContext {
            mode: Mode::all(),
            opts: Opts::empty(),
            syntax: Syntax::Nasm,
            pe_rel_addr: RelAddr::Auto,
            resource_filters: Vec::new(),
        }
    }
}

impl DumpContext {
    pub fn show_addresses(&self) -> bool {
        !self.opts.contains(Opts::NO_SHOW_ADDRESSES)
    }

    pub fn show_raw_insn(&self) -> bool {
        !self.opts.contains(Opts::NO_SHOW_RAW_INSN)
    }
}
