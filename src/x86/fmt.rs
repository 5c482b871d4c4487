//! Instruction formatter.
//!
//! Renders a decoded [`Instruction`] as one listing line in NASM, MASM
//! or GAS syntax. The numeric record is never modified except that
//! empty argument text slots are filled in; a slot pre-filled by a
//! container's resolver is printed as-is.
//!
//! Prefix sanity diagnostics (doubled prefixes, lock on a non-lockable
//! op, and so on) are produced here rather than in the decoder so each
//! fires once per byte, at the moment the byte is listed.

use log::warn;

use crate::context::{DumpContext, Opts, Syntax};
use crate::region::ByteFlags;
use crate::x86::decode::get_prefix;
use crate::x86::{
    ArgType, Disp, Instruction, OP_FAR, OP_LOCK, OP_REPE, OP_REPNE, OP_STRING, PREFIX_ADDR32,
    PREFIX_LOCK, PREFIX_OP32, PREFIX_REPE, PREFIX_REPNE, PREFIX_REX, PREFIX_REXB, PREFIX_SEG_MASK,
    PREFIX_WAIT,
};

pub const SEG16: [&str; 6] = ["es", "cs", "ss", "ds", "fs", "gs"];

const REG8: [&str; 8] = ["al", "cl", "dl", "bl", "ah", "ch", "dh", "bh"];

const REG8_REX: [&str; 16] = [
    "al", "cl", "dl", "bl", "spl", "bpl", "sil", "dil", "r8b", "r9b", "r10b", "r11b", "r12b",
    "r13b", "r14b", "r15b",
];

const REG16: [&str; 16] = [
    "ax", "cx", "dx", "bx", "sp", "bp", "si", "di", "r8w", "r9w", "r10w", "r11w", "r12w", "r13w",
    "r14w", "r15w",
];

const REG32: [&str; 17] = [
    "eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi", "r8d", "r9d", "r10d", "r11d", "r12d",
    "r13d", "r14d", "r15d", "eip",
];

const REG64: [&str; 17] = [
    "rax", "rcx", "rdx", "rbx", "rsp", "rbp", "rsi", "rdi", "r8", "r9", "r10", "r11", "r12", "r13",
    "r14", "r15", "rip",
];

const MODRM16_GAS: [&str; 8] = [
    "%bx,%si", "%bx,%di", "%bp,%si", "%bp,%di", "%si", "%di", "%bp", "%bx",
];

const MODRM16_MASM: [&str; 8] = ["bx+si", "bx+di", "bp+si", "bp+di", "si", "di", "bp", "bx"];

fn get_seg16(out: &mut String, reg: u16, syntax: Syntax) {
    if syntax == Syntax::Gas {
        out.push('%');
    }
    out.push_str(SEG16[(reg as usize) % 6]);
}

fn get_reg8(out: &mut String, reg: u8, rex: bool, syntax: Syntax) {
    if syntax == Syntax::Gas {
        out.push('%');
    }
    if rex {
        out.push_str(REG8_REX[(reg as usize) & 15]);
    } else {
        out.push_str(REG8[(reg as usize) & 7]);
    }
}

fn get_reg16(out: &mut String, reg: i8, size: i8, syntax: Syntax) {
    if reg == -1 {
        return;
    }
    if syntax == Syntax::Gas {
        out.push('%');
    }
    let reg = reg as usize;
    match size {
        16 => out.push_str(REG16[reg & 15]),
        32 => out.push_str(REG32[reg.min(16)]),
        64 => out.push_str(REG64[reg.min(16)]),
        _ => {}
    }
}

fn get_xmm(out: &mut String, reg: u8, syntax: Syntax) {
    if syntax == Syntax::Gas {
        out.push('%');
    }
    out.push_str(&format!("xmm{}", reg));
}

fn get_mmx(out: &mut String, reg: u8, syntax: Syntax) {
    if syntax == Syntax::Gas {
        out.push('%');
    }
    out.push_str(&format!("mm{}", reg & 7));
}

/// promotes a freshly printed xmm name to ymm
fn promote_ymm(out: &mut String, syntax: Syntax) {
    let at = if syntax == Syntax::Gas { 1 } else { 0 };
    // SAFETY-free ASCII replacement through the byte view
    let mut bytes = std::mem::take(out).into_bytes();
    if bytes.len() > at {
        bytes[at] = b'y';
    }
    *out = String::from_utf8_lossy(&bytes).into_owned();
}

///
/// Renders argument `i` of the instruction into its text slot. Slots
/// filled by a resolver beforehand are left alone.
///
fn print_arg(instr: &mut Instruction, i: usize, bits: u8, syntax: Syntax) {
    if instr.args[i].text.is_some() {
        return; /* someone wants to print something special */
    }

    let arg_type = instr.args[i].arg_type;
    let value = instr.args[i].value;
    let mut out = String::new();
    let gas = syntax == Syntax::Gas;

    if arg_type >= ArgType::AL && arg_type <= ArgType::BH {
        get_reg8(
            &mut out,
            arg_type as u8 - ArgType::AL as u8,
            false,
            syntax,
        );
    } else if arg_type >= ArgType::AX && arg_type <= ArgType::DI {
        let reg = arg_type as u8 - ArgType::AX as u8
            + if instr.prefix & PREFIX_REXB != 0 { 8 } else { 0 };
        get_reg16(&mut out, reg as i8, instr.op.size, syntax);
    } else if arg_type >= ArgType::ES && arg_type <= ArgType::GS {
        get_seg16(&mut out, arg_type as u16 - ArgType::ES as u16, syntax);
    }

    match arg_type {
        ArgType::ONE => {
            out.push_str(if gas { "$0x1" } else { "1h" });
        }
        ArgType::IMM8 => {
            if instr.op.flags & crate::x86::OP_STACK != 0 {
                /* 6a */
                match instr.op.size {
                    64 => out.push_str(&if gas {
                        format!("$0x{:016x}", value)
                    } else {
                        format!("qword {:016X}h", value)
                    }),
                    32 => out.push_str(&if gas {
                        format!("$0x{:08x}", value)
                    } else {
                        format!("dword {:08X}h", value)
                    }),
                    _ => out.push_str(&if gas {
                        format!("$0x{:04x}", value)
                    } else {
                        format!("word {:04X}h", value)
                    }),
                }
            } else if gas {
                out.push_str(&format!("$0x{:02x}", value));
            } else {
                out.push_str(&format!("{:02x}h", value));
            }
        }
        ArgType::IMM16 => {
            out.push_str(&if gas {
                format!("$0x{:04x}", value)
            } else {
                format!("{:04x}h", value)
            });
        }
        ArgType::IMM => {
            if instr.op.flags & crate::x86::OP_STACK != 0 {
                match instr.op.size {
                    64 => out.push_str(&if gas {
                        format!("$0x{:016x}", value)
                    } else {
                        format!("qword {:016X}h", value)
                    }),
                    32 => out.push_str(&if gas {
                        format!("$0x{:08x}", value)
                    } else {
                        format!("dword {:08X}h", value)
                    }),
                    _ => out.push_str(&if gas {
                        format!("$0x{:04x}", value)
                    } else {
                        format!("word {:04X}h", value)
                    }),
                }
            } else {
                match instr.op.size {
                    8 => out.push_str(&if gas {
                        format!("$0x{:02x}", value)
                    } else {
                        format!("{:02x}h", value)
                    }),
                    16 => out.push_str(&if gas {
                        format!("$0x{:04x}", value)
                    } else {
                        format!("{:04x}h", value)
                    }),
                    64 if instr.op.flags & crate::x86::OP_IMM64 != 0 => out.push_str(&if gas {
                        format!("$0x{:016x}", value)
                    } else {
                        format!("{:016x}h", value)
                    }),
                    _ => out.push_str(&if gas {
                        format!("$0x{:08x}", value)
                    } else {
                        format!("{:08x}h", value)
                    }),
                }
            }
        }
        ArgType::REL8 | ArgType::REL => {
            out.push_str(&format!("{:04x}", value));
        }
        ArgType::SEGPTR => {
            /* should always be relocated */
        }
        ArgType::MOFFS => {
            if gas {
                if instr.prefix & PREFIX_SEG_MASK != 0 {
                    get_seg16(&mut out, (instr.prefix & PREFIX_SEG_MASK) - 1, syntax);
                    out.push(':');
                }
                out.push_str(&format!("0x{:04x}", value));
            } else {
                out.push('[');
                if instr.prefix & PREFIX_SEG_MASK != 0 {
                    get_seg16(&mut out, (instr.prefix & PREFIX_SEG_MASK) - 1, syntax);
                    out.push(':');
                }
                out.push_str(&format!("{:04x}h", value));
                out.push(']');
            }
            instr.usedmem = true;
        }
        ArgType::DSBX | ArgType::DSSI => {
            if syntax != Syntax::Nasm {
                if instr.prefix & PREFIX_SEG_MASK != 0 {
                    get_seg16(&mut out, (instr.prefix & PREFIX_SEG_MASK) - 1, syntax);
                    out.push(':');
                }
                out.push(if gas { '(' } else { '[' });
                let reg = if arg_type == ArgType::DSBX { 3 } else { 6 };
                get_reg16(&mut out, reg, instr.addrsize as i8, syntax);
                out.push(if gas { ')' } else { ']' });
            }
            instr.usedmem = true;
        }
        ArgType::ESDI => {
            if syntax != Syntax::Nasm {
                out.push_str(if gas { "%es:(" } else { "es:[" });
                get_reg16(&mut out, 7, instr.addrsize as i8, syntax);
                out.push(if gas { ')' } else { ']' });
            }
            instr.usedmem = true;
        }
        ArgType::ALS => {
            if gas {
                out.push_str("%al");
            }
        }
        ArgType::AXS => {
            if gas {
                out.push_str("%ax");
            }
        }
        ArgType::DXS => {
            if gas {
                out.push_str("(%dx)");
            } else {
                out.push_str("dx");
            }
        }
        ArgType::RM | ArgType::MEM | ArgType::MM | ArgType::XM => {
            if instr.modrm_disp == Disp::Reg {
                /* register direct */
                if arg_type == ArgType::XM {
                    get_xmm(&mut out, instr.modrm_reg as u8, syntax);
                    if instr.vex_256 {
                        promote_ymm(&mut out, syntax);
                    }
                    instr.args[i].text = Some(out);
                    return;
                }
                if arg_type == ArgType::MM {
                    get_mmx(&mut out, instr.modrm_reg as u8, syntax);
                    instr.args[i].text = Some(out);
                    return;
                }
                if arg_type == ArgType::MEM {
                    warn!("ModRM byte has mod 3, but opcode only allows accessing memory.");
                }
                if instr.op.size == 8 || instr.op.opcode == 0x0FB6 || instr.op.opcode == 0x0FBE {
                    /* mov*b* */
                    get_reg8(
                        &mut out,
                        instr.modrm_reg as u8,
                        instr.prefix & PREFIX_REX != 0,
                        syntax,
                    );
                } else if instr.op.opcode == 0x0FB7 || instr.op.opcode == 0x0FBF {
                    /* mov*w* */
                    get_reg16(&mut out, instr.modrm_reg, 16, syntax);
                } else {
                    get_reg16(&mut out, instr.modrm_reg, instr.op.size, syntax);
                }
                instr.args[i].text = Some(out);
                return;
            }

            instr.usedmem = true;

            /* NASM: <size>    [<seg>:<reg>+<reg>+/-<offset>h] */
            /* MASM: <size> ptr <seg>:[<reg>+<reg>+/-<offset>h] */
            /* GAS:           *%<seg>:-0x<offset>(%<reg>,%<reg>) */
            let has_sib = instr.sib_scale != 0 && instr.sib_index != -1;

            if gas {
                if instr.op.opcode == 0xFF && (2..=5).contains(&instr.op.subcode) {
                    out.push('*');
                }
                if instr.prefix & PREFIX_SEG_MASK != 0 {
                    get_seg16(&mut out, (instr.prefix & PREFIX_SEG_MASK) - 1, syntax);
                    out.push(':');
                }
                match instr.modrm_disp {
                    Disp::D8 => {
                        let sv = value as u8 as i8;
                        if sv < 0 {
                            out.push_str(&format!("-0x{:02x}", -(sv as i16)));
                        } else {
                            out.push_str(&format!("0x{:02x}", sv));
                        }
                    }
                    Disp::D16 if instr.addrsize == 16 => {
                        if instr.modrm_reg == -1 {
                            /* absolute memory is unsigned */
                            out.push_str(&format!("0x{:04x}", value));
                            instr.args[i].text = Some(out);
                            return;
                        }
                        let sv = value as u16 as i16;
                        if sv < 0 {
                            out.push_str(&format!("-0x{:04x}", -(sv as i32)));
                        } else {
                            out.push_str(&format!("0x{:04x}", sv));
                        }
                    }
                    Disp::D16 => {
                        if instr.modrm_reg == -1 {
                            out.push_str(&format!("0x{:08x}", value));
                            instr.args[i].text = Some(out);
                            return;
                        }
                        let sv = value as u32 as i32;
                        if sv < 0 {
                            out.push_str(&format!("-0x{:08x}", -(sv as i64)));
                        } else {
                            out.push_str(&format!("0x{:08x}", sv));
                        }
                    }
                    _ => {}
                }
                out.push('(');
                if instr.addrsize == 16 {
                    out.push_str(MODRM16_GAS[(instr.modrm_reg as usize) & 7]);
                } else {
                    get_reg16(&mut out, instr.modrm_reg, instr.addrsize as i8, syntax);
                    if has_sib {
                        out.push(',');
                        get_reg16(&mut out, instr.sib_index, instr.addrsize as i8, syntax);
                        out.push_str(&format!(",{}", instr.sib_scale));
                    }
                }
                out.push(')');
            } else {
                if instr.op.flags & OP_FAR != 0 {
                    out.push_str("far ");
                } else if !instr.op.arg0.is_reg() && !instr.op.arg1.is_reg() {
                    match instr.op.size {
                        8 => out.push_str("byte "),
                        16 => out.push_str("word "),
                        32 => out.push_str("dword "),
                        64 => out.push_str("qword "),
                        80 => out.push_str("tword "),
                        _ => {}
                    }
                    if syntax == Syntax::Masm {
                        out.push_str("ptr ");
                    }
                } else if instr.op.opcode == 0x0FB6 || instr.op.opcode == 0x0FBE {
                    out.push_str("byte ");
                    if syntax == Syntax::Masm {
                        out.push_str("ptr ");
                    }
                } else if instr.op.opcode == 0x0FB7 || instr.op.opcode == 0x0FBF {
                    out.push_str("word ");
                    if syntax == Syntax::Masm {
                        out.push_str("ptr ");
                    }
                }

                if syntax == Syntax::Nasm {
                    out.push('[');
                }
                if instr.prefix & PREFIX_SEG_MASK != 0 {
                    get_seg16(&mut out, (instr.prefix & PREFIX_SEG_MASK) - 1, syntax);
                    out.push(':');
                }
                if syntax == Syntax::Masm {
                    out.push('[');
                }

                if instr.modrm_reg != -1 {
                    if instr.addrsize == 16 {
                        out.push_str(MODRM16_MASM[(instr.modrm_reg as usize) & 7]);
                    } else {
                        get_reg16(&mut out, instr.modrm_reg, instr.addrsize as i8, syntax);
                    }
                    if has_sib {
                        out.push('+');
                    }
                }
                if has_sib {
                    get_reg16(&mut out, instr.sib_index, instr.addrsize as i8, syntax);
                    out.push_str(&format!("*{}", instr.sib_scale));
                }

                match instr.modrm_disp {
                    Disp::D8 => {
                        let sv = value as u8 as i8;
                        if sv < 0 {
                            out.push_str(&format!("-{:02X}h", -(sv as i16)));
                        } else {
                            out.push_str(&format!("+{:02X}h", sv));
                        }
                    }
                    Disp::D16 if instr.addrsize == 16 => {
                        let sv = value as u16 as i16;
                        if instr.modrm_reg == -1 && !has_sib {
                            /* absolute memory is unsigned */
                            out.push_str(&format!("{:04X}h", value));
                        } else if sv < 0 {
                            out.push_str(&format!("-{:04X}h", -(sv as i32)));
                        } else {
                            out.push_str(&format!("+{:04X}h", sv));
                        }
                    }
                    Disp::D16 => {
                        let sv = value as u32 as i32;
                        if instr.modrm_reg == -1 && !has_sib {
                            out.push_str(&format!("{:08X}h", value));
                        } else if sv < 0 {
                            out.push_str(&format!("-{:08X}h", -(sv as i64)));
                        } else {
                            out.push_str(&format!("+{:08X}h", sv));
                        }
                    }
                    _ => {}
                }
                out.push(']');
            }
        }
        ArgType::REG | ArgType::REGONLY => {
            if instr.op.size == 8 {
                get_reg8(&mut out, value as u8, instr.prefix & PREFIX_REX != 0, syntax);
            } else if bits == 64 && instr.op.opcode == 0x63 {
                get_reg16(&mut out, value as i8, 64, syntax);
            } else {
                get_reg16(&mut out, value as i8, instr.op.size, syntax);
            }
        }
        ArgType::REG32 => {
            get_reg16(&mut out, value as i8, bits as i8, syntax);
        }
        ArgType::SEG16 => {
            if value > 5 {
                warn!("Invalid segment register {}", value);
            }
            get_seg16(&mut out, value as u16, syntax);
        }
        ArgType::CR32 => {
            match value {
                0 | 2 | 3 | 4 | 8 => {}
                _ => warn!("Invalid control register {}", value),
            }
            if gas {
                out.push('%');
            }
            out.push_str(&format!("cr{}", value));
        }
        ArgType::DR32 => {
            if gas {
                out.push('%');
            }
            out.push_str(&format!("dr{}", value));
        }
        ArgType::TR32 => {
            if value < 3 {
                warn!("Invalid test register {}", value);
            }
            if gas {
                out.push('%');
            }
            out.push_str(&format!("tr{}", value));
        }
        ArgType::ST => {
            if gas {
                out.push('%');
            }
            out.push_str("st");
            if syntax == Syntax::Nasm {
                out.push('0');
            }
        }
        ArgType::STX => {
            if gas {
                out.push('%');
            }
            out.push_str("st");
            if syntax != Syntax::Nasm {
                out.push('(');
            }
            out.push_str(&format!("{}", value & 7));
            if syntax != Syntax::Nasm {
                out.push(')');
            }
        }
        ArgType::MMX | ArgType::MMXONLY => {
            get_mmx(&mut out, value as u8, syntax);
        }
        ArgType::XMM | ArgType::XMMONLY => {
            get_xmm(&mut out, value as u8, syntax);
            if instr.vex_256 {
                promote_ymm(&mut out, syntax);
            }
        }
        _ => {}
    }

    instr.args[i].text = Some(out);
}

fn arg_str<'a>(instr: &'a Instruction, i: usize) -> &'a str {
    instr.args[i].text.as_deref().unwrap_or("")
}

///
/// Renders one listed instruction. `ip_text` is the container-formatted
/// address, `p` the raw bytes, `flags` the byte's discovery state, and
/// `comment` an optional symbolic annotation from the resolver.
///
/// The result may span two lines when more than seven raw bytes have to
/// be shown.
///
pub fn print_instr(
    ctx: &DumpContext,
    ip_text: &str,
    p: &[u8],
    len: usize,
    flags: ByteFlags,
    instr: &mut Instruction,
    comment: Option<&str>,
    bits: u8,
) -> String {
    let syntax = ctx.syntax;
    let gas = syntax == Syntax::Gas;

    for i in 0..3 {
        print_arg(instr, i, bits, syntax);
    }

    /* did we find too many prefixes? */
    if get_prefix(instr.op.opcode as u8, bits) != 0 && instr.op.opcode < 0x100 {
        if get_prefix(instr.op.opcode as u8, bits) & PREFIX_SEG_MASK != 0 {
            warn!(
                "{}: Multiple segment prefixes found: {}, {}. Skipping to next instruction.",
                ip_text,
                SEG16[((instr.prefix & PREFIX_SEG_MASK).max(1) - 1) as usize % 6],
                instr.op.name
            );
        } else {
            warn!(
                "{}: Prefix specified twice: {}. Skipping to next instruction.",
                ip_text, instr.op.name
            );
        }
        instr.op.name.clear();
    }

    /* check that the instruction exists */
    if instr.op.name == "?" {
        warn!(
            "{}: Unknown opcode {:#04x} (extension {})",
            ip_text, instr.op.opcode, instr.op.subcode
        );
    }

    let mut out = String::new();

    if flags.contains(ByteFlags::JUMP) && ctx.opts.contains(Opts::COMPILABLE) {
        /* a label, which is like an address without the segment prefix */
        if syntax == Syntax::Nasm {
            out.push('.');
        }
        out.push_str(ip_text);
        out.push(':');
    }

    if ctx.show_addresses() {
        out.push_str(ip_text);
    }
    out.push('\t');

    if ctx.show_raw_insn() {
        let shown = len.min(7);
        for b in p.iter().take(shown) {
            out.push_str(&format!("{:02x} ", b));
        }
        for _ in shown..8 {
            out.push_str("   ");
        }
    }

    /* mark instructions that are jumped to */
    if flags.contains(ByteFlags::JUMP) && !ctx.opts.contains(Opts::COMPILABLE) {
        out.push_str(if flags.contains(ByteFlags::FAR) { ">>" } else { " >" });
    } else {
        out.push_str("  ");
    }

    /* print prefixes, including (fake) prefixes if ours are invalid */
    if instr.prefix & PREFIX_SEG_MASK != 0 {
        /* note: is it valid to use overrides with lods and outs? */
        let seg = SEG16[((instr.prefix & PREFIX_SEG_MASK) - 1) as usize % 6];
        if !instr.usedmem
            || instr.op.arg0 == ArgType::ESDI
            || (instr.op.arg1 == ArgType::ESDI && instr.op.arg0 != ArgType::DSSI)
        {
            /* can't be overridden */
            warn!(
                "{}: Segment prefix {} used with opcode 0x{:02x} {}",
                ip_text, seg, instr.op.opcode, instr.op.name
            );
            out.push_str(seg);
            out.push(' ');
        }
    }
    if instr.prefix & PREFIX_OP32 != 0 && instr.op.size != 16 && instr.op.size != 32 {
        warn!(
            "{}: Operand-size override used with opcode 0x{:02x} {}",
            ip_text, instr.op.opcode, instr.op.name
        );
        out.push_str(if gas { "data32 " } else { "o32 " });
    }
    if instr.prefix & PREFIX_ADDR32 != 0
        && syntax == Syntax::Nasm
        && instr.op.flags & OP_STRING != 0
    {
        out.push_str("a32 ");
    } else if instr.prefix & PREFIX_ADDR32 != 0 && !instr.usedmem && instr.op.opcode != 0xE3 {
        /* jecxz is the only non-memory op we expect to see this on */
        warn!(
            "{}: Address-size prefix used with opcode 0x{:02x} {}",
            ip_text, instr.op.opcode, instr.op.name
        );
        out.push_str(if gas { "addr32 " } else { "a32 " });
    }
    if instr.prefix & PREFIX_LOCK != 0 {
        if instr.op.flags & OP_LOCK == 0 {
            warn!(
                "{}: lock prefix used with opcode 0x{:02x} {}",
                ip_text, instr.op.opcode, instr.op.name
            );
        }
        out.push_str("lock ");
    }
    if instr.prefix & PREFIX_REPNE != 0 {
        if instr.op.flags & OP_REPNE == 0 {
            warn!(
                "{}: repne prefix used with opcode 0x{:02x} {}",
                ip_text, instr.op.opcode, instr.op.name
            );
        }
        out.push_str("repne ");
    }
    if instr.prefix & PREFIX_REPE != 0 {
        if instr.op.flags & OP_REPE == 0 {
            warn!(
                "{}: repe prefix used with opcode 0x{:02x} {}",
                ip_text, instr.op.opcode, instr.op.name
            );
        }
        out.push_str(if instr.op.flags & OP_REPNE != 0 { "repe " } else { "rep " });
    }
    if instr.prefix & PREFIX_WAIT != 0 {
        out.push_str("wait ");
    }

    if instr.vex {
        out.push('v');
    }
    out.push_str(&instr.op.name);

    if !arg_str(instr, 0).is_empty() || !arg_str(instr, 1).is_empty() {
        out.push('\t');
    }

    if gas {
        /* operand order is reversed */
        if !arg_str(instr, 1).is_empty() {
            out.push_str(arg_str(instr, 1));
            out.push(',');
        }
        if instr.vex_reg != 0 {
            out.push_str(&format!("%ymm{}, ", instr.vex_reg));
        }
        out.push_str(arg_str(instr, 0));
        if !arg_str(instr, 2).is_empty() {
            out.push(',');
            out.push_str(arg_str(instr, 2));
        }
    } else {
        out.push_str(arg_str(instr, 0));
        if !arg_str(instr, 1).is_empty() {
            out.push_str(", ");
        }
        if instr.vex_reg != 0 {
            out.push_str(&format!("ymm{}, ", instr.vex_reg));
        }
        out.push_str(arg_str(instr, 1));
        if !arg_str(instr, 2).is_empty() {
            out.push_str(", ");
            out.push_str(arg_str(instr, 2));
        }
    }

    if let Some(comment) = comment {
        out.push_str(if gas { "\t// " } else { "\t; " });
        out.push_str(&format!("<{}>", comment));
    }

    /* if we have more than 7 bytes on this line, wrap around */
    if len > 7 && ctx.show_raw_insn() {
        out.push_str("\n\t\t");
        for (n, b) in p.iter().enumerate().take(len).skip(7) {
            out.push_str(&format!("{:02x}", b));
            if n < len - 1 {
                out.push(' ');
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x86::decode::decode;
    use crate::x86::MAX_INSTR;

    fn ctx_with(syntax: Syntax) -> DumpContext {
        DumpContext {
            syntax,
            ..DumpContext::default()
        }
    }

    fn render(bytes: &[u8], bits: u8, syntax: Syntax) -> String {
        let mut p = bytes.to_vec();
        p.resize(MAX_INSTR, 0);
        let (mut instr, len) = decode(0x10, &p, bits, syntax);
        print_instr(
            &ctx_with(syntax),
            "0010",
            &bytes[..len.min(bytes.len())],
            len,
            ByteFlags::empty(),
            &mut instr,
            None,
            bits,
        )
    }

    #[test]
    fn rip_relative_in_three_syntaxes() {
        let code = [0x48, 0x8b, 0x05, 0x10, 0x00, 0x00, 0x00];
        let nasm = render(&code, 64, Syntax::Nasm);
        assert!(nasm.contains("mov"), "{}", nasm);
        assert!(nasm.contains("rax"), "{}", nasm);
        assert!(nasm.contains("[rip+0x00000010h]") || nasm.contains("[rip+00000010h]"), "{}", nasm);
        let gas = render(&code, 64, Syntax::Gas);
        assert!(gas.contains("0x00000010(%rip),%rax"), "{}", gas);
        let masm = render(&code, 64, Syntax::Masm);
        assert!(masm.contains("rip+00000010h"), "{}", masm);
    }

    #[test]
    fn sixteen_bit_memory_operand() {
        let nasm = render(&[0x8b, 0x07], 16, Syntax::Nasm);
        assert!(nasm.contains("[bx]"), "{}", nasm);
        let gas = render(&[0x8b, 0x07], 16, Syntax::Gas);
        assert!(gas.contains("(%bx)"), "{}", gas);
    }

    #[test]
    fn signed_displacements() {
        /* mov ax, [si-2] */
        let nasm = render(&[0x8b, 0x44, 0xfe], 16, Syntax::Nasm);
        assert!(nasm.contains("[si-02h]"), "{}", nasm);
        let gas = render(&[0x8b, 0x44, 0xfe], 16, Syntax::Gas);
        assert!(gas.contains("-0x02(%si)"), "{}", gas);
    }

    #[test]
    fn absolute_memory_is_unsigned() {
        /* mov ax, [0fffeh] */
        let nasm = render(&[0x8b, 0x06, 0xfe, 0xff], 16, Syntax::Nasm);
        assert!(nasm.contains("[FFFEh]"), "{}", nasm);
    }

    #[test]
    fn indirect_branch_star_in_gas() {
        /* jmp [bx] */
        let gas = render(&[0xff, 0x27], 16, Syntax::Gas);
        assert!(gas.contains("*(%bx)"), "{}", gas);
        let nasm = render(&[0xff, 0x27], 16, Syntax::Nasm);
        assert!(!nasm.contains('*'), "{}", nasm);
    }

    #[test]
    fn resolver_text_wins() {
        let mut p = vec![0x9a, 0x00, 0x00, 0x01, 0x00];
        p.resize(MAX_INSTR, 0);
        let (mut instr, len) = decode(0, &p, 16, Syntax::Nasm);
        instr.args[0].text = Some("2:1234".to_string());
        let line = print_instr(
            &ctx_with(Syntax::Nasm),
            "0:0000",
            &p[..len],
            len,
            ByteFlags::empty(),
            &mut instr,
            Some("EntryName"),
            16,
        );
        assert!(line.contains("call\t2:1234"), "{}", line);
        assert!(line.contains("<EntryName>"), "{}", line);
        assert!(!line.contains("00010000"), "{}", line);
    }

    #[test]
    fn long_instructions_wrap() {
        /* mov dword [0x12345678], 0x11223344 in 32-bit: c7 05 78 56 34 12 44 33 22 11 */
        let code = [0xc7, 0x05, 0x78, 0x56, 0x34, 0x12, 0x44, 0x33, 0x22, 0x11];
        let line = render(&code, 32, Syntax::Nasm);
        assert!(line.contains('\n'), "{}", line);
        assert!(line.contains("22 11"), "{}", line);
    }

    #[test]
    fn far_target_mark() {
        let mut p = vec![0x90];
        p.resize(MAX_INSTR, 0);
        let (mut instr, len) = decode(0, &p, 16, Syntax::Nasm);
        let line = print_instr(
            &ctx_with(Syntax::Nasm),
            "0000",
            &p[..len],
            len,
            ByteFlags::JUMP | ByteFlags::FAR,
            &mut instr,
            None,
            16,
        );
        assert!(line.contains(">>"), "{}", line);
    }
}
