//! Instruction decoder.
//!
//! `decode` turns a byte cursor into a numeric [`Instruction`] record and
//! a length. An unknown opcode is not an error: the record gets the
//! placeholder mnemonic `?` and the caller keeps going one byte at a
//! time. Warnings about suspicious prefixes are left to the printing
//! pass so they appear exactly once per byte.

use crate::context::Syntax;
use crate::x86::tables;
use crate::x86::{
    ArgType, Disp, Instruction, Op, MAX_INSTR, OP_64, OP_ARG2_CL, OP_ARG2_IMM, OP_ARG2_IMM8,
    OP_FAR, OP_IMM64, OP_STACK, OP_STRING, PREFIX_ADDR32, PREFIX_CS, PREFIX_DS, PREFIX_ES,
    PREFIX_FS, PREFIX_GS, PREFIX_LOCK, PREFIX_OP32, PREFIX_REPE, PREFIX_REPNE, PREFIX_REX,
    PREFIX_REXB, PREFIX_REXR, PREFIX_REXW, PREFIX_REXX, PREFIX_REX_MASK, PREFIX_SEG_MASK,
    PREFIX_SS, PREFIX_WAIT,
};

pub fn modof(b: u8) -> u8 {
    b >> 6
}

pub fn regof(b: u8) -> u8 {
    (b >> 3) & 7
}

pub fn memof(b: u8) -> u8 {
    b & 7
}

/// byte at `i`, zero when the cursor hangs over the end of the buffer
fn at(p: &[u8], i: usize) -> u8 {
    p.get(i).copied().unwrap_or(0)
}

fn read16(p: &[u8], i: usize) -> u64 {
    u16::from_le_bytes([at(p, i), at(p, i + 1)]) as u64
}

fn read32(p: &[u8], i: usize) -> u64 {
    u32::from_le_bytes([at(p, i), at(p, i + 1), at(p, i + 2), at(p, i + 3)]) as u64
}

fn read48(p: &[u8], i: usize) -> u64 {
    read32(p, i) | (read16(p, i + 4) << 32)
}

fn read64(p: &[u8], i: usize) -> u64 {
    read32(p, i) | (read32(p, i + 4) << 32)
}

/// the prefix flag for this byte, 0 if it is not a prefix in this mode
pub fn get_prefix(opcode: u8, bits: u8) -> u16 {
    if bits == 64 && (opcode & 0xf0) == 0x40 {
        return PREFIX_REX | ((opcode as u16 & 0xf) * 0x1000);
    }

    match opcode {
        0x26 => PREFIX_ES,
        0x2E => PREFIX_CS,
        0x36 => PREFIX_SS,
        0x3E => PREFIX_DS,
        0x64 => PREFIX_FS,
        0x65 => PREFIX_GS,
        0x66 => PREFIX_OP32,
        0x67 => PREFIX_ADDR32,
        0x9B => PREFIX_WAIT,
        0xF0 => PREFIX_LOCK,
        0xF2 => PREFIX_REPNE,
        0xF3 => PREFIX_REPE,
        _ => 0,
    }
}

fn instr_matches(opcode: u8, subcode: u8, e: &crate::x86::OpEntry) -> bool {
    opcode as u16 == e.opcode && (e.subcode == 8 || subcode == e.subcode)
}

///
/// Looks up the fixed three-byte encodings behind the 0F 38 / 0F 3A
/// escapes. Returns the number of extra bytes consumed (the escaped
/// subcode byte on a hit).
///
fn get_sse_single(escape: u8, subcode: u8, instr: &mut Instruction) -> usize {
    if instr.prefix & PREFIX_OP32 != 0 {
        for e in tables::SSE_SINGLE_OP32.iter() {
            if e.opcode == escape as u16 && e.subcode == subcode {
                instr.op = e.into();
                instr.prefix &= !PREFIX_OP32;
                return 1;
            }
        }
    } else {
        for e in tables::SSE_SINGLE.iter() {
            if e.opcode == escape as u16 && e.subcode == subcode {
                instr.op = e.into();
                return 1;
            }
        }
    }
    0
}

///
/// SSE lookup for a 0F-escaped opcode, selected by the prefix in
/// effect. A matching prefix bit is cleared so the printer does not
/// also render it as `rep`/`repne`/`o32`.
///
fn get_sse_instr(p: &[u8], pos: usize, instr: &mut Instruction) -> usize {
    let opcode = at(p, pos);
    let subcode = regof(at(p, pos + 1));

    if instr.prefix & PREFIX_OP32 != 0 {
        for e in tables::SSE_OP32.iter() {
            if instr_matches(opcode, subcode, e) {
                instr.op = e.into();
                instr.prefix &= !PREFIX_OP32;
                return 0;
            }
        }
    } else if instr.prefix & PREFIX_REPNE != 0 {
        for e in tables::SSE_REPNE.iter() {
            if instr_matches(opcode, subcode, e) {
                instr.op = e.into();
                instr.prefix &= !PREFIX_REPNE;
                return 0;
            }
        }
    } else if instr.prefix & PREFIX_REPE != 0 {
        for e in tables::SSE_REPE.iter() {
            if instr_matches(opcode, subcode, e) {
                instr.op = e.into();
                instr.prefix &= !PREFIX_REPE;
                return 0;
            }
        }
    } else {
        for e in tables::SSE.iter() {
            if instr_matches(opcode, subcode, e) {
                instr.op = e.into();
                return 0;
            }
        }
    }

    get_sse_single(at(p, pos), at(p, pos + 1), instr)
}

///
/// Lookup behind the 0F escape. `pos` indexes the byte after the 0F.
/// Returns extra bytes consumed beyond the escaped opcode itself.
///
fn get_0f_instr(p: &[u8], pos: usize, instr: &mut Instruction) -> usize {
    let opcode = at(p, pos);
    let modrm = at(p, pos + 1);
    let subcode = regof(modrm);

    /* a couple of special (read: annoying) cases first */
    if opcode == 0x01 && modof(modrm) == 3 {
        instr.op.opcode = 0x0F01;
        instr.op.subcode = modrm;
        instr.op.name = match modrm {
            0xC1 => "vmcall".to_string(),
            0xC2 => "vmlaunch".to_string(),
            0xC3 => "vmresume".to_string(),
            0xC4 => "vmxoff".to_string(),
            0xC8 => "monitor".to_string(),
            0xC9 => "mwait".to_string(),
            0xD0 => "xgetbv".to_string(),
            0xD1 => "xsetbv".to_string(),
            0xF9 => "rdtscp".to_string(),
            _ => format!("UNK {:x}", modrm),
        };
        return 1;
    } else if opcode == 0xAE && modof(modrm) == 3 {
        instr.op.opcode = 0x0FAE;
        instr.op.subcode = subcode;
        match subcode {
            5 => instr.op.name = "lfence".to_string(),
            6 => instr.op.name = "mfence".to_string(),
            7 => instr.op.name = "sfence".to_string(),
            _ => {}
        }
        return 1;
    }

    let mut len = 0;
    for e in tables::ESCAPE_0F.iter() {
        if instr_matches(opcode, subcode, e) {
            instr.op = e.into();
            break;
        }
    }
    if instr.op.name.is_empty() {
        len = get_sse_instr(p, pos, instr);
    }

    instr.op.opcode = 0x0F00 | opcode as u16;
    len
}

///
/// FPU lookup for D8-DF. The 8x8 tables are indexed by opcode low bits
/// and the reg field; mod 3 encodings missing there fall back to the
/// fully-qualified list (which consumes the second byte as opcode).
///
fn get_fpu_instr(p: &[u8], pos: usize, op: &mut Op) -> usize {
    let opcode = at(p, pos);
    let modrm = at(p, pos + 1);
    let index = ((opcode & 7) * 8 + regof(modrm)) as usize;

    if modof(modrm) < 3 {
        if !tables::FPU_MEM[index].name.is_empty() {
            *op = (&tables::FPU_MEM[index]).into();
        }
        0
    } else if !tables::FPU_REG[index].name.is_empty() {
        *op = (&tables::FPU_REG[index]).into();
        0
    } else {
        for e in tables::FPU_SINGLE.iter() {
            if e.opcode == opcode as u16 && e.subcode == modrm {
                *op = e.into();
                break;
            }
        }
        1
    }
}

///
/// Parses one argument slot. `ip` is the IP of the argument (not of the
/// instruction), which is what makes REL and relocation matching work.
/// `pos` indexes the same place in `p`. Returns bytes consumed.
///
/// Specific registers (AL, DSBX, ONE, ...) have nothing to parse and
/// keep the instruction-start IP assigned by the caller.
///
fn get_arg(ip: u64, p: &[u8], pos: usize, argi: usize, instr: &mut Instruction, bits: u8) -> usize {
    let arg_type = instr.args[argi].arg_type;
    instr.args[argi].value = 0;

    let rexb = if instr.prefix & PREFIX_REXB != 0 { 8u8 } else { 0 };

    match arg_type {
        ArgType::IMM8 => {
            instr.args[argi].ip = ip;
            instr.args[argi].value = at(p, pos) as u64;
            1
        }
        ArgType::IMM16 => {
            instr.args[argi].ip = ip;
            instr.args[argi].value = read16(p, pos);
            2
        }
        ArgType::IMM => {
            instr.args[argi].ip = ip;
            if instr.op.size == 8 {
                instr.args[argi].value = at(p, pos) as u64;
                1
            } else if instr.op.size == 16 {
                instr.args[argi].value = read16(p, pos);
                2
            } else if instr.op.size == 64 && (instr.op.flags & OP_IMM64) != 0 {
                instr.args[argi].value = read64(p, pos);
                8
            } else {
                instr.args[argi].value = read32(p, pos);
                4
            }
        }
        ArgType::REL8 => {
            instr.args[argi].ip = ip;
            let target = ip.wrapping_add(1).wrapping_add(at(p, pos) as i8 as i64 as u64);
            instr.args[argi].value = if bits == 16 { target & 0xffff } else { target & 0xffff_ffff };
            1
        }
        ArgType::REL => {
            instr.args[argi].ip = ip;
            /* equivalently signed or unsigned (i.e. clipped) */
            if instr.op.size == 16 {
                let d = read16(p, pos) as u16 as i16 as i64 as u64;
                instr.args[argi].value = ip.wrapping_add(2).wrapping_add(d) & 0xffff;
                2
            } else {
                let d = read32(p, pos) as u32 as i32 as i64 as u64;
                instr.args[argi].value = ip.wrapping_add(4).wrapping_add(d) & 0xffff_ffff;
                4
            }
        }
        ArgType::SEGPTR => {
            instr.args[argi].ip = ip;
            if instr.op.size == 16 {
                instr.args[argi].value = read32(p, pos);
                4
            } else {
                instr.args[argi].value = read48(p, pos);
                6
            }
        }
        ArgType::MOFFS => {
            instr.args[argi].ip = ip;
            if instr.addrsize == 64 {
                instr.args[argi].value = read64(p, pos);
                8
            } else if instr.addrsize == 32 {
                instr.args[argi].value = read32(p, pos);
                4
            } else {
                instr.args[argi].value = read16(p, pos);
                2
            }
        }
        ArgType::RM | ArgType::MEM | ArgType::MM | ArgType::XM => {
            let modrm = at(p, pos);
            let xmod = modof(modrm);
            let mut rm = memof(modrm);
            let mut ret = 1usize;

            if xmod == 3 {
                instr.modrm_disp = Disp::Reg;
                instr.modrm_reg = (rm + rexb) as i8;
                return 1;
            }

            if instr.addrsize != 16 && rm == 4 {
                /* SIB byte */
                let sib = at(p, pos + 1);
                instr.sib_scale = 1 << modof(sib);
                let mut index = regof(sib) as i8;
                if instr.prefix & PREFIX_REXX != 0 {
                    index += 8;
                }
                if index == 4 {
                    index = -1;
                }
                instr.sib_index = index;
                rm = memof(sib);
                ret += 1;
            }

            if xmod == 0 && bits == 64 && rm == 5 && instr.sib_scale == 0 {
                /* RIP-relative addressing */
                instr.args[argi].ip = ip + ret as u64;
                instr.args[argi].value = read32(p, pos + ret);
                instr.modrm_disp = Disp::D16;
                instr.modrm_reg = 16;
                ret += 4;
            } else if xmod == 0
                && ((instr.addrsize == 16 && rm == 6) || (instr.addrsize != 16 && rm == 5))
            {
                /* absolute displacement */
                instr.args[argi].ip = ip + ret as u64;
                if instr.addrsize == 16 {
                    instr.args[argi].value = read16(p, pos + ret);
                    ret += 2;
                } else {
                    instr.args[argi].value = read32(p, pos + ret);
                    ret += 4;
                }
                instr.modrm_disp = Disp::D16;
                instr.modrm_reg = -1;
            } else if xmod == 0 {
                instr.modrm_disp = Disp::None;
                instr.modrm_reg = (rm + rexb) as i8;
            } else if xmod == 1 {
                instr.args[argi].ip = ip + ret as u64;
                instr.args[argi].value = at(p, pos + ret) as u64;
                instr.modrm_disp = Disp::D8;
                instr.modrm_reg = (rm + rexb) as i8;
                ret += 1;
            } else {
                instr.args[argi].ip = ip + ret as u64;
                if instr.addrsize == 16 {
                    instr.args[argi].value = read16(p, pos + ret);
                    ret += 2;
                } else {
                    instr.args[argi].value = read32(p, pos + ret);
                    ret += 4;
                }
                instr.modrm_disp = Disp::D16;
                instr.modrm_reg = (rm + rexb) as i8;
            }
            ret
        }
        ArgType::REG | ArgType::XMM | ArgType::CR32 | ArgType::DR32 | ArgType::TR32 => {
            instr.args[argi].value = regof(at(p, pos)) as u64;
            if instr.prefix & PREFIX_REXR != 0 {
                instr.args[argi].value += 8;
            }
            0
        }
        ArgType::MMX | ArgType::SEG16 => {
            instr.args[argi].value = regof(at(p, pos)) as u64;
            0
        }
        ArgType::REG32
        | ArgType::STX
        | ArgType::REGONLY
        | ArgType::MMXONLY
        | ArgType::XMMONLY => {
            instr.args[argi].value = (memof(at(p, pos)) + rexb) as u64;
            1
        }
        /* all others are implicit */
        _ => 0,
    }
}

/// tacks a length suffix onto a mnemonic
fn suffix_name(instr: &mut Instruction, syntax: Syntax) {
    if (instr.op.flags & super::OP_LL) == super::OP_LL {
        instr.op.name.push_str("ll");
    } else if instr.op.flags & super::OP_S != 0 {
        instr.op.name.push('s');
    } else if instr.op.flags & super::OP_L != 0 {
        instr.op.name.push('l');
    } else if instr.op.size == 80 {
        instr.op.name.push('t');
    } else if instr.op.size == 8 {
        instr.op.name.push('b');
    } else if instr.op.size == 16 {
        instr.op.name.push('w');
    } else if instr.op.size == 32 {
        instr.op.name.push(if syntax == Syntax::Gas { 'l' } else { 'd' });
    } else if instr.op.size == 64 {
        instr.op.name.push('q');
    }
}

///
/// Decodes one instruction at `ip` from the byte cursor `p` in the
/// given mode. Returns the record and the number of bytes consumed.
///
/// The cursor should hold [`MAX_INSTR`] bytes, zero-padded past the end
/// of real contents; the decoder never indexes beyond what it is given.
///
pub fn decode(ip: u64, p: &[u8], bits: u8, syntax: Syntax) -> (Instruction, usize) {
    let mut instr = Instruction::default();
    let mut len = 0usize;

    /* prefixes */
    loop {
        let prefix = get_prefix(at(p, len), bits);
        if prefix == 0 || len >= MAX_INSTR {
            break;
        }
        if prefix & PREFIX_REX_MASK != 0 && instr.prefix & PREFIX_REX != 0 {
            /* the later REX wins */
            instr.prefix &= !PREFIX_REX_MASK;
        } else if instr.prefix & PREFIX_SEG_MASK != 0 && prefix & PREFIX_SEG_MASK != 0 {
            if instr.prefix & PREFIX_SEG_MASK == prefix & PREFIX_SEG_MASK {
                /* the same override again, collapse it */
            } else {
                /* conflicting overrides; re-present the first as its
                 * own pseudo-instruction and start over here */
                instr.op = (&tables::one_byte(bits)[at(p, len) as usize]).into();
                instr.prefix &= !PREFIX_SEG_MASK;
                return (instr, len.max(1));
            }
        } else if instr.prefix & prefix & PREFIX_OP32 != 0 {
            /* Microsoft likes to repeat this on nops for alignment */
        } else if instr.prefix & prefix != 0 {
            instr.op = (&tables::one_byte(bits)[at(p, len) as usize]).into();
            instr.prefix &= !prefix;
            return (instr, len.max(1));
        }
        instr.prefix |= prefix;
        len += 1;
    }

    let opcode = at(p, len);

    if opcode == 0xC4 && modof(at(p, len + 1)) == 3 && bits != 16 {
        /* three-byte VEX */
        let mut escape = 0xCCu8;
        len += 1;
        instr.vex = true;
        match at(p, len) & 0x1f {
            2 => escape = 0x38,
            3 => escape = 0x3A,
            _ => {} /* unhandled escape class; falls out as unknown */
        }
        len += 1;
        instr.vex_reg = !(at(p, len) >> 3) & 7;
        instr.vex_256 = at(p, len) & 4 != 0;
        match at(p, len) & 3 {
            3 => instr.prefix |= PREFIX_REPNE,
            2 => instr.prefix |= PREFIX_REPE,
            1 => instr.prefix |= PREFIX_OP32,
            _ => {}
        }
        len += get_sse_single(escape, at(p, len + 1), &mut instr);
    } else if opcode == 0xC5 && modof(at(p, len + 1)) == 3 && bits != 16 {
        /* two-byte VEX, implied 0F escape */
        len += 1;
        instr.vex = true;
        instr.vex_reg = !(at(p, len) >> 3) & 7;
        instr.vex_256 = at(p, len) & 4 != 0;
        match at(p, len) & 3 {
            3 => instr.prefix |= PREFIX_REPNE,
            2 => instr.prefix |= PREFIX_REPE,
            1 => instr.prefix |= PREFIX_OP32,
            _ => {}
        }
        len += 1;
        len += get_0f_instr(p, len, &mut instr);
    } else if bits == 64 && !tables::ONE_BYTE_64[opcode as usize].name.is_empty() {
        instr.op = (&tables::ONE_BYTE_64[opcode as usize]).into();
    } else if bits != 64 && !tables::ONE_BYTE_16_32[opcode as usize].name.is_empty() {
        instr.op = (&tables::ONE_BYTE_16_32[opcode as usize]).into();
    } else {
        let subcode = regof(at(p, len + 1));

        if opcode == 0x0F {
            len += 1;
            len += get_0f_instr(p, len, &mut instr);
        } else if (0xD8..=0xDF).contains(&opcode) {
            len += get_fpu_instr(p, len, &mut instr.op);
        } else {
            for e in tables::GROUP.iter() {
                if e.opcode == opcode as u16 && e.subcode == subcode {
                    instr.op = e.into();
                    break;
                }
            }
        }

        /* something unused or inadequately documented */
        if instr.op.name.is_empty() {
            if instr.op.opcode == 0 {
                instr.op.opcode = opcode as u16;
            }
            instr.op.name = "?".to_string(); /* less arrogant than objdump's (bad) */
            instr.op.subcode = subcode;
            instr.op.size = 0;
            instr.op.arg0 = ArgType::NONE;
            instr.op.arg1 = ArgType::NONE;
            instr.op.flags = 0;
        }
    }

    len += 1;

    if instr.vex && instr.op.name == "emms" {
        /* VEX.0F 77 */
        instr.op.name = "zeroupper".to_string();
    }

    /* resolve the size */
    if instr.op.size == -1 {
        if instr.prefix & PREFIX_OP32 != 0 {
            instr.op.size = if bits == 16 { 32 } else { 16 };
        } else if instr.prefix & PREFIX_REXW != 0 {
            instr.op.size = 64;
        } else if instr.op.flags & (OP_STACK | OP_64) != 0 {
            instr.op.size = bits as i8;
        } else {
            instr.op.size = if bits == 16 { 16 } else { 32 };
        }
    }

    instr.addrsize = if instr.prefix & PREFIX_ADDR32 != 0 {
        if bits == 32 { 16 } else { 32 }
    } else {
        bits
    };

    /* figure out what arguments we have */
    if instr.op.arg0 != ArgType::NONE {
        let base = len;

        instr.args[0].arg_type = instr.op.arg0;
        instr.args[1].arg_type = instr.op.arg1;

        /* An arg whose value is one or more bytes has its IP pointing at
         * that value; otherwise it points at the instruction start, so a
         * register can never look like it needs relocating. */
        instr.args[0].ip = ip;
        instr.args[1].ip = ip;
        instr.args[2].ip = ip;

        len += get_arg(ip + len as u64, p, len, 0, &mut instr, bits);

        /* registers that read from the modrm byte we just processed */
        if instr.op.arg1.from_modrm_reg() {
            len += get_arg(ip + base as u64, p, base, 1, &mut instr, bits);
        } else {
            len += get_arg(ip + len as u64, p, len, 1, &mut instr, bits);
        }

        if instr.op.flags & OP_ARG2_IMM != 0 {
            instr.args[2].arg_type = ArgType::IMM;
        } else if instr.op.flags & OP_ARG2_IMM8 != 0 {
            instr.args[2].arg_type = ArgType::IMM8;
        } else if instr.op.flags & OP_ARG2_CL != 0 {
            instr.args[2].arg_type = ArgType::CL;
        }

        len += get_arg(ip + len as u64, p, len, 2, &mut instr, bits);
    }

    /* modify the mnemonic where the tables cannot */
    if syntax == Syntax::Gas {
        match instr.op.opcode {
            0x0FB6 => {
                instr.op.name = "movzb".to_string();
                suffix_name(&mut instr, syntax);
            }
            0x0FB7 => {
                instr.op.name = "movzw".to_string();
                suffix_name(&mut instr, syntax);
            }
            0x0FBE => {
                instr.op.name = "movsb".to_string();
                suffix_name(&mut instr, syntax);
            }
            0x0FBF => {
                instr.op.name = "movsw".to_string();
                suffix_name(&mut instr, syntax);
            }
            0x63 if bits == 64 => instr.op.name = "movslq".to_string(),
            _ => {}
        }
    }

    if instr.op.flags & OP_STACK != 0 && instr.prefix & PREFIX_OP32 != 0 {
        suffix_name(&mut instr, syntax);
    } else if instr.op.flags & OP_STRING != 0 && syntax != Syntax::Gas {
        suffix_name(&mut instr, syntax);
    } else if instr.op.opcode == 0x98 {
        instr.op.name = match instr.op.size {
            16 => "cbw",
            32 => "cwde",
            _ => "cdqe",
        }
        .to_string();
    } else if instr.op.opcode == 0x99 {
        instr.op.name = match instr.op.size {
            16 => "cwd",
            32 => "cdq",
            _ => "cqo",
        }
        .to_string();
    } else if instr.op.opcode == 0xE3 {
        instr.op.name = match instr.op.size {
            16 => "jcxz",
            32 => "jecxz",
            _ => "jrcxz",
        }
        .to_string();
    } else if instr.op.opcode == 0xD4 && instr.args[0].value == 10 {
        /* aam drops its implicit base-ten immediate */
        instr.op.name = "aam".to_string();
        instr.op.arg0 = ArgType::NONE;
        instr.args[0].arg_type = ArgType::NONE;
    } else if instr.op.opcode == 0xD5 && instr.args[0].value == 10 {
        instr.op.name = "aad".to_string();
        instr.op.arg0 = ArgType::NONE;
        instr.args[0].arg_type = ArgType::NONE;
    } else if instr.op.opcode == 0x0FC7 && instr.op.subcode == 1 && instr.prefix & PREFIX_REXW != 0
    {
        instr.op.name = "cmpxchg16b".to_string();
    } else if syntax == Syntax::Gas {
        if instr.op.flags & OP_FAR != 0 {
            instr.op.name.insert(0, 'l');
        } else if !instr.op.arg0.is_reg() && !instr.op.arg1.is_reg() && instr.modrm_disp != Disp::Reg
        {
            suffix_name(&mut instr, syntax);
        }
    } else if instr.op.opcode == 0xCA || instr.op.opcode == 0xCB {
        /* Intel syntaxes mark far returns with a suffix instead */
        instr.op.name.push('f');
    }

    (instr, len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x86::{OP_BRANCH, OP_STOP};

    fn buf(bytes: &[u8]) -> Vec<u8> {
        let mut v = bytes.to_vec();
        v.resize(MAX_INSTR, 0);
        v
    }

    #[test]
    fn dos_exit_sequence() {
        /* mov ah, 0x4c */
        let (instr, len) = decode(0, &buf(&[0xb4, 0x4c, 0xcd, 0x21]), 16, Syntax::Nasm);
        assert_eq!(instr.op.name, "mov");
        assert_eq!(instr.args[0].arg_type, ArgType::AH);
        assert_eq!(instr.args[1].value, 0x4c);
        assert_eq!(len, 2);
        /* int 0x21 */
        let (instr, len) = decode(2, &buf(&[0xcd, 0x21]), 16, Syntax::Nasm);
        assert_eq!(instr.op.name, "int");
        assert_eq!(instr.args[0].value, 0x21);
        assert_eq!(instr.op.flags & OP_STOP, 0);
        assert_eq!(len, 2);
    }

    #[test]
    fn far_call_reads_a_doubleword_pointer() {
        let (instr, len) = decode(0, &buf(&[0x9a, 0x00, 0x00, 0x01, 0x00]), 16, Syntax::Nasm);
        assert_eq!(instr.op.name, "call");
        assert_eq!(instr.args[0].arg_type, ArgType::SEGPTR);
        assert_eq!(instr.args[0].ip, 1);
        assert_eq!(instr.args[0].value, 0x0001_0000);
        assert_eq!(len, 5);
    }

    #[test]
    fn unknown_opcode_gets_placeholder() {
        /* 0F 0B (ud2) has no table entry */
        let (instr, len) = decode(0, &buf(&[0x0f, 0x0b]), 32, Syntax::Nasm);
        assert_eq!(instr.op.name, "?");
        assert_eq!(instr.op.size, 0);
        assert_eq!(instr.args[0].arg_type, ArgType::NONE);
        assert_eq!(len, 2); /* the 0F escape plus one byte */
    }

    #[test]
    fn vex_two_byte_zeroupper() {
        let (instr, len) = decode(0, &buf(&[0xc5, 0xf8, 0x77]), 64, Syntax::Nasm);
        assert!(instr.vex);
        assert!(!instr.vex_256);
        assert_eq!(instr.op.name, "zeroupper");
        assert_eq!(instr.args[0].arg_type, ArgType::NONE);
        assert_eq!(len, 3);
    }

    #[test]
    fn rip_relative_load() {
        let p = buf(&[0x48, 0x8b, 0x05, 0x10, 0x00, 0x00, 0x00]);
        let (instr, len) = decode(0x401000, &p, 64, Syntax::Nasm);
        assert_eq!(instr.op.name, "mov");
        assert_eq!(instr.op.size, 64);
        assert_eq!(instr.modrm_reg, 16);
        assert_eq!(instr.modrm_disp, Disp::D16);
        assert_eq!(instr.args[1].value, 0x10);
        assert_eq!(instr.args[1].ip, 0x401003);
        assert_eq!(len, 7);
        /* effective target = next instruction + displacement */
        assert_eq!(0x401000 + len as u64 + instr.args[1].value, 0x401017);
    }

    #[test]
    fn sixteen_bit_addressing_matrix() {
        /* mov ax, [bx+si] */
        let (instr, len) = decode(0, &buf(&[0x8b, 0x00]), 16, Syntax::Nasm);
        assert_eq!(instr.modrm_disp, Disp::None);
        assert_eq!(instr.modrm_reg, 0);
        assert_eq!(len, 2);
        /* mov ax, [1234h]: mod 0 rm 6 is absolute disp16 */
        let (instr, len) = decode(0, &buf(&[0x8b, 0x06, 0x34, 0x12]), 16, Syntax::Nasm);
        assert_eq!(instr.modrm_disp, Disp::D16);
        assert_eq!(instr.modrm_reg, -1);
        assert_eq!(instr.args[1].value, 0x1234);
        assert_eq!(len, 4);
    }

    #[test]
    fn sib_with_scale() {
        /* mov eax, [ebx+ecx*4] */
        let (instr, len) = decode(0, &buf(&[0x8b, 0x04, 0x8b]), 32, Syntax::Nasm);
        assert_eq!(instr.sib_scale, 4);
        assert_eq!(instr.sib_index, 1);
        assert_eq!(instr.modrm_reg, 3);
        assert_eq!(len, 3);
    }

    #[test]
    fn relative_branch_targets_are_clipped() {
        /* jmp short -2 from ip 0 in 16-bit code wraps */
        let (instr, len) = decode(0, &buf(&[0xeb, 0xfc]), 16, Syntax::Nasm);
        assert_eq!(len, 2);
        assert_eq!(instr.args[0].value, 0xfffe);
        assert_ne!(instr.op.flags & OP_BRANCH, 0);
        assert_ne!(instr.op.flags & OP_STOP, 0);
        /* call rel16 */
        let (instr, _) = decode(0x10, &buf(&[0xe8, 0x00, 0x01]), 16, Syntax::Nasm);
        assert_eq!(instr.args[0].value, 0x113);
    }

    #[test]
    fn rex_widens_registers() {
        /* 41 50: push r8 */
        let (instr, len) = decode(0, &buf(&[0x41, 0x50]), 64, Syntax::Nasm);
        assert_eq!(instr.op.name, "push");
        assert_ne!(instr.prefix & PREFIX_REXB, 0);
        assert_eq!(len, 2);
        /* 48 98: cdqe */
        let (instr, _) = decode(0, &buf(&[0x48, 0x98]), 64, Syntax::Nasm);
        assert_eq!(instr.op.name, "cdqe");
    }

    #[test]
    fn group_and_fpu_dispatch() {
        /* 80 /7: cmp byte */
        let (instr, len) = decode(0, &buf(&[0x80, 0x3e, 0x34, 0x12, 0x05]), 16, Syntax::Nasm);
        assert_eq!(instr.op.name, "cmp");
        assert_eq!(instr.op.size, 8);
        assert_eq!(len, 5); /* opcode, modrm, disp16, imm8 */
        /* d9 e8: fld1 via the single list */
        let (instr, len) = decode(0, &buf(&[0xd9, 0xe8]), 32, Syntax::Nasm);
        assert_eq!(instr.op.name, "fld1");
        assert_eq!(len, 2);
        /* d8 c1: fadd st, st(1) */
        let (instr, len) = decode(0, &buf(&[0xd8, 0xc1]), 32, Syntax::Nasm);
        assert_eq!(instr.op.name, "fadd");
        assert_eq!(instr.args[1].arg_type, ArgType::STX);
        assert_eq!(instr.args[1].value, 1);
        assert_eq!(len, 2);
    }

    #[test]
    fn sse_prefix_selection() {
        /* 66 0F 6F: movdqa */
        let (instr, _) = decode(0, &buf(&[0x66, 0x0f, 0x6f, 0xc1]), 32, Syntax::Nasm);
        assert_eq!(instr.op.name, "movdqa");
        assert_eq!(instr.prefix & PREFIX_OP32, 0); /* consumed by the match */
        /* F3 0F 10: movss */
        let (instr, _) = decode(0, &buf(&[0xf3, 0x0f, 0x10, 0xc1]), 32, Syntax::Nasm);
        assert_eq!(instr.op.name, "movss");
    }

    #[test]
    fn decode_is_deterministic() {
        let bytes = buf(&[0x66, 0x8b, 0x44, 0x8b, 0x10]);
        let (a, alen) = decode(0x100, &bytes, 32, Syntax::Nasm);
        let (b, blen) = decode(0x100, &bytes, 32, Syntax::Nasm);
        assert_eq!(alen, blen);
        assert_eq!(a.op.name, b.op.name);
        assert_eq!(a.args[1].value, b.args[1].value);
        assert_eq!(a.prefix, b.prefix);
    }
}
