//! # Script Formatter
//!
//! Renders script bytes as space-separated mnemonics (`OP_DUP OP_HASH160 <hex>
//! OP_EQUALVERIFY OP_CHECKSIG`). Anything that does not disassemble cleanly is
//! shown as plain hex instead, so witness items that are signatures or control
//! blocks still get a readable value.

use crate::error::ScriptDecodeFailure;
use bitcoin::{
    opcodes::{all::OP_CHECKSIGADD, Class, ClassifyContext, Opcode},
    script::{Instruction, Script},
};

/// Format script bytes for display, falling back to lowercase hex.
pub fn format(bytes: &[u8]) -> String {
    match disassemble(bytes) {
        Ok(asm) => asm,
        Err(failure) => {
            log::debug!("showing {}-byte script as hex: {}", bytes.len(), failure);
            hex::encode(bytes)
        }
    }
}

/// Disassemble script bytes into mnemonic text.
pub fn disassemble(bytes: &[u8]) -> Result<String, ScriptDecodeFailure> {
    let script = Script::from_bytes(bytes);
    let mut tokens = Vec::new();

    for instruction in script.instruction_indices() {
        let (offset, instruction) = instruction?;
        match instruction {
            Instruction::PushBytes(data) if data.is_empty() => tokens.push("OP_0".to_string()),
            Instruction::PushBytes(data) => tokens.push(hex::encode(data.as_bytes())),
            Instruction::Op(opcode) => tokens.push(opcode_mnemonic(opcode, offset)?),
        }
    }

    Ok(tokens.join(" "))
}

fn opcode_mnemonic(opcode: Opcode, offset: usize) -> Result<String, ScriptDecodeFailure> {
    // Everything past OP_CHECKSIGADD is unassigned
    if opcode.to_u8() > OP_CHECKSIGADD.to_u8() {
        return Err(ScriptDecodeFailure::InvalidOpcode {
            opcode: opcode.to_u8(),
            offset,
        });
    }

    Ok(match opcode.classify(ClassifyContext::Legacy) {
        Class::PushNum(-1) => "OP_1NEGATE".to_string(),
        Class::PushNum(n) => format!("OP_{}", n),
        _ => opcode.to_string(),
    })
}
