//! Typed view of the asmdb `x86data.js` JSON payload.
//!
//! Each instruction definition in the payload is a tuple of 5 strings:
//!
//! - `[0]` instruction name
//! - `[1]` operands
//! - `[2]` encoding
//! - `[3]` opcode
//! - `[4]` metadata: CPU features, FLAGS read/written and other attributes
//!
//! The tuples are kept raw inside [`InstructionSetDatabase`] and turned into
//! named [`Instruction`] records by [`InstructionSetDatabase::take_instructions`].

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of slots in a raw instruction tuple.
pub const TUPLE_LEN: usize = 5;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("payload does not match the instruction database schema")]
    SchemaMismatch(#[from] serde_json::Error),

    #[error("instruction #{index} has {len} fields, expected {TUPLE_LEN}")]
    MalformedInstructionTuple { index: usize, len: usize },
}

/// x86/x64 instruction-set data.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstructionSetDatabase {
    pub architectures: Vec<String>,
    pub extensions: Vec<Extension>,
    pub attributes: Vec<Attribute>,
    #[serde(rename = "specialRegs")]
    pub special_regs: Vec<SpecialRegister>,
    pub shortcuts: Vec<Shortcut>,
    pub registers: Option<RegisterSet>,
    /// Raw instruction tuples. A missing key and an empty list are the same thing.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<Vec<String>>,
}

/// An extension an instruction can list in its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    pub name: String,
}

/// An attribute an instruction can list in its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub doc: String,
}

/// A special register (or a part of one) that instructions read or write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialRegister {
    pub name: String,
    pub group: String,
    pub doc: String,
}

/// A macro usable inside instruction metadata, expanded textually to `expand`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub name: String,
    pub expand: String,
}

/// Register classes, one slot per class known to asmdb.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterSet {
    pub bnd: Option<RegisterClass>,
    pub creg: Option<RegisterClass>,
    pub dreg: Option<RegisterClass>,
    pub k: Option<RegisterClass>,
    pub mm: Option<RegisterClass>,
    pub r16: Option<RegisterClass>,
    pub r32: Option<RegisterClass>,
    pub r64: Option<RegisterClass>,
    pub r8: Option<RegisterClass>,
    pub r8hi: Option<RegisterClass>,
    pub rxx: Option<RegisterClass>,
    pub sreg: Option<RegisterClass>,
    pub st: Option<RegisterClass>,
    pub tmm: Option<RegisterClass>,
    pub xmm: Option<RegisterClass>,
    pub ymm: Option<RegisterClass>,
    pub zmm: Option<RegisterClass>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterClass {
    pub names: Vec<String>,
    pub kind: String,
    /// Placeholder name standing for any register of the class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any: Option<String>,
}

/// A single instruction definition with its tuple slots named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub operands: String,
    pub encoding: String,
    pub opcode: String,
    pub metadata: String,
}

impl Instruction {
    /// Names the slots of the raw tuple found at `index`.
    pub fn from_tuple(index: usize, raw: Vec<String>) -> Result<Self, DecodeError> {
        let [name, operands, encoding, opcode, metadata]: [String; TUPLE_LEN] = raw
            .try_into()
            .map_err(|raw: Vec<String>| DecodeError::MalformedInstructionTuple {
                index,
                len: raw.len(),
            })?;

        Ok(Self {
            name,
            operands,
            encoding,
            opcode,
            metadata,
        })
    }
}

impl InstructionSetDatabase {
    /// Decodes the JSON payload. Keys match field names exactly; top-level
    /// keys may be missing, unknown keys are ignored.
    pub fn decode(json: &[u8]) -> Result<Self, DecodeError> {
        let db: Self = serde_json::from_slice(json)?;

        if let Some((index, raw)) = db
            .instructions
            .iter()
            .enumerate()
            .find(|(_, raw)| raw.len() != TUPLE_LEN)
        {
            return Err(DecodeError::MalformedInstructionTuple {
                index,
                len: raw.len(),
            });
        }

        info!(
            "decoded {} architectures, {} extensions, {} attributes, {} special registers, {} shortcuts, {} instructions",
            db.architectures.len(),
            db.extensions.len(),
            db.attributes.len(),
            db.special_regs.len(),
            db.shortcuts.len(),
            db.instructions.len(),
        );
        Ok(db)
    }

    /// Moves the raw tuples out of the database, leaving it without
    /// instructions, and names their slots.
    pub fn take_instructions(&mut self) -> Result<Vec<Instruction>, DecodeError> {
        std::mem::take(&mut self.instructions)
            .into_iter()
            .enumerate()
            .map(|(index, raw)| Instruction::from_tuple(index, raw))
            .collect()
    }
}
