//! x86 / x86-64 instruction core: the static opcode tables, the decoder
//! that turns raw bytes into a numeric instruction record, and the
//! formatter that renders a record in one of three assembler dialects.
//!
//! The decoder never produces text. It fills an [`Instruction`] with the
//! chosen table entry, up to three argument slots (each remembering the
//! file position of its value bytes so relocations can be matched to it),
//! and the decoded ModR/M, SIB and VEX state. Rendering and symbolic
//! rewriting happen later, in `fmt` and in the per-container resolvers.

pub mod decode;
pub mod fmt;
pub mod tables;

/// 66 + 67 + seg + lock/rep + 2 opcode bytes + modrm + sib + disp4 + imm4
pub const MAX_INSTR: usize = 16;

/* instruction prefixes as one word; the low three bits hold which
 * segment override is active (1..6), the rest are independent bits */
pub const PREFIX_ES: u16 = 0x0001; /* 26 */
pub const PREFIX_CS: u16 = 0x0002; /* 2e */
pub const PREFIX_SS: u16 = 0x0003; /* 36 */
pub const PREFIX_DS: u16 = 0x0004; /* 3e */
pub const PREFIX_FS: u16 = 0x0005; /* 64 */
pub const PREFIX_GS: u16 = 0x0006; /* 65 */
pub const PREFIX_SEG_MASK: u16 = 0x0007;

pub const PREFIX_OP32: u16 = 0x0008; /* 66 */
pub const PREFIX_ADDR32: u16 = 0x0010; /* 67 */
pub const PREFIX_LOCK: u16 = 0x0020; /* f0 */
pub const PREFIX_REPNE: u16 = 0x0040; /* f2 */
pub const PREFIX_REPE: u16 = 0x0080; /* f3 */
pub const PREFIX_WAIT: u16 = 0x0100; /* 9b */

pub const PREFIX_REX: u16 = 0x0800; /* 40 */
pub const PREFIX_REXB: u16 = 0x1000; /* 41 */
pub const PREFIX_REXX: u16 = 0x2000; /* 42 */
pub const PREFIX_REXR: u16 = 0x4000; /* 44 */
pub const PREFIX_REXW: u16 = 0x8000; /* 48 */
pub const PREFIX_REX_MASK: u16 = 0xf800;

/* opcode table entry flags */
pub const OP_ARG2_IMM: u16 = 0x0001; /* has IMM16/32 as third argument */
pub const OP_ARG2_IMM8: u16 = 0x0002; /* has IMM8 as third argument */
pub const OP_ARG2_CL: u16 = 0x0004; /* has CL as third argument */
pub const OP_64: u16 = 0x0008; /* 64-bit by default in 64-bit mode (call, jmp) */

pub const OP_REPNE: u16 = 0x0010; /* repne prefix valid */
pub const OP_REPE: u16 = 0x0020; /* repe prefix valid */
pub const OP_REP: u16 = OP_REPE; /* rep prefix valid */
pub const OP_OP32_REGONLY: u16 = 0x0040; /* operand-size prefix only valid with reg */
pub const OP_LOCK: u16 = 0x0080; /* lock prefix valid */

pub const OP_STACK: u16 = 0x0100; /* operand width follows the stack */
pub const OP_STRING: u16 = 0x0200; /* string operation */
pub const OP_FAR: u16 = 0x0400; /* far operation */
pub const OP_IMM64: u16 = 0x0800; /* IMM argument may be 64-bit */

pub const OP_S: u16 = 0x1000; /* (FPU) op takes -s under GAS */
pub const OP_L: u16 = 0x2000; /* (FPU) op takes -l under GAS */
pub const OP_LL: u16 = 0x3000; /* (FPU) op takes -ll under GAS */

pub const OP_STOP: u16 = 0x4000; /* stop scanning (jmp, ret) */
pub const OP_BRANCH: u16 = 0x8000; /* branches to argument 0 */

///
/// Abstract operand shapes the tables can ask for. Order matters: the
/// decoder and formatter classify slots with range checks (all the 8-bit
/// registers are contiguous, the ModR/M-sourced register kinds are
/// contiguous, and so on).
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[allow(clippy::upper_case_acronyms)]
pub enum ArgType {
    #[default]
    NONE,
    /// the literal value 1, used for bit shift ops
    ONE,
    /* specific registers */
    AL, CL, DL, BL, AH, CH, DH, BH,
    AX, CX, DX, BX, SP, BP, SI, DI,
    ES, CS, SS, DS, FS, GS,
    /// same as AL/AX except MASM doesn't print them
    ALS, AXS,
    /// same as DX except GAS puts it in parentheses
    DXS,
    /* absolute or relative numbers, given as 1/2/4 bytes */
    IMM8, IMM16, IMM,
    REL8, REL,
    /// absolute far pointer, used for far calls/jumps
    SEGPTR,
    /// absolute memory location, for A0-A3 mov
    MOFFS,
    /* fixed memory addresses for string operations */
    DSBX, DSSI, ESDI,
    /* read from ModR/M */
    RM,
    MM,
    XM,
    /// memory only (mod 3 is invalid)
    MEM,
    REGONLY,
    MMXONLY,
    XMMONLY,
    /* register from the reg field */
    REG,
    MMX,
    XMM,
    SEG16,
    /// 32-bit only register, used for cr/dr/tr
    REG32,
    CR32,
    DR32,
    TR32,
    /* floating point stack */
    ST,
    STX,
}

impl ArgType {
    ///
    /// Does the slot name a register, so that memory size indicators can
    /// be dispensed with?
    ///
    pub fn is_reg(self) -> bool {
        (self >= ArgType::AL && self <= ArgType::GS)
            || (self >= ArgType::REG && self <= ArgType::TR32)
    }

    /// register kinds that read the reg field of an already-parsed ModR/M
    pub fn from_modrm_reg(self) -> bool {
        self >= ArgType::REG && self <= ArgType::TR32
    }
}

///
/// One entry of the static opcode tables.
///
/// `subcode` 8 means "all subcodes"; otherwise it names the required
/// ModR/M reg field (or the full second byte for the fixed FPU and
/// three-byte-escape lists). `size` -1 is resolved at decode time from
/// mode and prefixes.
///
#[derive(Debug, Clone, Copy)]
pub struct OpEntry {
    pub opcode: u16,
    pub subcode: u8,
    pub size: i8,
    pub name: &'static str,
    pub arg0: ArgType,
    pub arg1: ArgType,
    pub flags: u16,
}

impl OpEntry {
    pub const fn new(
        opcode: u16,
        subcode: u8,
        size: i8,
        name: &'static str,
        arg0: ArgType,
        arg1: ArgType,
        flags: u16,
    ) -> Self {
        OpEntry { opcode, subcode, size, name, arg0, arg1, flags }
    }

    pub const fn none(opcode: u16) -> Self {
        OpEntry::new(opcode, 8, 0, "", ArgType::NONE, ArgType::NONE, 0)
    }
}

///
/// The chosen table entry, owned so the decoder's mnemonic adjustments
/// (cbw/cwde, suffixes, `l`-prefixing) can rewrite it without touching
/// the static tables.
///
#[derive(Debug, Clone, Default)]
pub struct Op {
    pub opcode: u16,
    pub subcode: u8,
    pub size: i8,
    pub name: String,
    pub arg0: ArgType,
    pub arg1: ArgType,
    pub flags: u16,
}

impl From<&OpEntry> for Op {
    fn from(e: &OpEntry) -> Self {
        Op {
            opcode: e.opcode,
            subcode: e.subcode,
            size: e.size,
            name: e.name.to_string(),
            arg0: e.arg0,
            arg1: e.arg1,
            flags: e.flags,
        }
    }
}

///
/// Displacement state decoded from ModR/M.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disp {
    /// no displacement, mod == 0 without the absolute special cases
    #[default]
    None,
    /// one byte
    D8,
    /// two or four bytes depending on address size
    D16,
    /// register-direct, mod == 3
    Reg,
}

///
/// One argument slot of a decoded instruction.
///
/// `ip` points at the slot's value bytes when the value was read from
/// the byte stream, and at the start of the instruction otherwise, so a
/// register value can never look like a relocation site. `text` is the
/// resolver's override; when set, the formatter prints it instead of
/// rendering the numeric value.
///
#[derive(Debug, Clone, Default)]
pub struct Argument {
    pub arg_type: ArgType,
    pub ip: u64,
    pub value: u64,
    pub text: Option<String>,
}

///
/// A decoded instruction. Purely numeric; see the module docs.
///
#[derive(Debug, Clone, Default)]
pub struct Instruction {
    pub prefix: u16,
    pub op: Op,
    pub args: [Argument; 3],
    pub addrsize: u8,
    pub modrm_disp: Disp,
    /// base register index; -1 when absolute, 16 when RIP-relative
    pub modrm_reg: i8,
    /// 0 when no SIB byte was consumed
    pub sib_scale: u8,
    /// -1 when the SIB contributes no index
    pub sib_index: i8,
    pub usedmem: bool,
    pub vex: bool,
    /// implied second source register (inverted vvvv, low three bits)
    pub vex_reg: u8,
    pub vex_256: bool,
}

impl Instruction {
    pub fn is_call(&self) -> bool {
        self.op.name == "call" || self.op.name == "lcall"
    }
}
