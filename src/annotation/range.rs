//! Annotation range types: what a span of bytes encodes and where it sits in
//! the transaction structure.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// The kind of wire field a range covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Version,
    SegwitMarker,
    SegwitFlag,
    InputCount,
    PrevTxId,
    PrevOutputIndex,
    ScriptSigLength,
    ScriptSig,
    Sequence,
    OutputCount,
    Value,
    ScriptPubKeyLength,
    ScriptPubKey,
    WitnessElementCount,
    WitnessElementLength,
    WitnessElement,
    Locktime,
}

impl FieldKind {
    /// Every field kind, in wire order
    pub const ALL: [FieldKind; 17] = [
        FieldKind::Version,
        FieldKind::SegwitMarker,
        FieldKind::SegwitFlag,
        FieldKind::InputCount,
        FieldKind::PrevTxId,
        FieldKind::PrevOutputIndex,
        FieldKind::ScriptSigLength,
        FieldKind::ScriptSig,
        FieldKind::Sequence,
        FieldKind::OutputCount,
        FieldKind::Value,
        FieldKind::ScriptPubKeyLength,
        FieldKind::ScriptPubKey,
        FieldKind::WitnessElementCount,
        FieldKind::WitnessElementLength,
        FieldKind::WitnessElement,
        FieldKind::Locktime,
    ];

    /// Short label, also used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Version => "version",
            FieldKind::SegwitMarker => "segwitMarker",
            FieldKind::SegwitFlag => "segwitFlag",
            FieldKind::InputCount => "inputCount",
            FieldKind::PrevTxId => "prevTxId",
            FieldKind::PrevOutputIndex => "prevOutputIndex",
            FieldKind::ScriptSigLength => "scriptSigLength",
            FieldKind::ScriptSig => "scriptSig",
            FieldKind::Sequence => "sequence",
            FieldKind::OutputCount => "outputCount",
            FieldKind::Value => "value",
            FieldKind::ScriptPubKeyLength => "scriptPubKeyLength",
            FieldKind::ScriptPubKey => "scriptPubKey",
            FieldKind::WitnessElementCount => "witnessElementCount",
            FieldKind::WitnessElementLength => "witnessElementLength",
            FieldKind::WitnessElement => "witnessElement",
            FieldKind::Locktime => "locktime",
        }
    }

    /// How the decoded value of this field should be interpreted
    pub fn data_type(&self) -> DataType {
        match self {
            FieldKind::SegwitMarker | FieldKind::SegwitFlag => DataType::Byte,
            FieldKind::Version
            | FieldKind::PrevOutputIndex
            | FieldKind::Sequence
            | FieldKind::Locktime => DataType::U32,
            FieldKind::Value => DataType::U64,
            FieldKind::PrevTxId => DataType::TransactionId,
            FieldKind::InputCount
            | FieldKind::OutputCount
            | FieldKind::ScriptSigLength
            | FieldKind::ScriptPubKeyLength
            | FieldKind::WitnessElementCount
            | FieldKind::WitnessElementLength => DataType::VariableLengthInteger,
            FieldKind::ScriptSig | FieldKind::ScriptPubKey | FieldKind::WitnessElement => {
                DataType::ByteString
            }
        }
    }

    /// Fixed explanation of the field's role
    pub fn role(&self) -> &'static str {
        match self {
            FieldKind::Version => {
                "Transaction version number. Version 2 enables relative timelocks (BIP 68)."
            }
            FieldKind::SegwitMarker => {
                "SegWit marker. A zero byte where the input count would be, telling parsers that witness data follows the outputs."
            }
            FieldKind::SegwitFlag => "SegWit flag. Must be 0x01 for transactions carrying witness data.",
            FieldKind::InputCount => "Number of inputs, as a CompactSize integer.",
            FieldKind::PrevTxId => {
                "ID of the transaction whose output is spent. Stored little-endian, shown byte-reversed."
            }
            FieldKind::PrevOutputIndex => "Index of the spent output within the previous transaction.",
            FieldKind::ScriptSigLength => "Length of the unlocking script (scriptSig) in bytes.",
            FieldKind::ScriptSig => "Unlocking script (scriptSig) satisfying the spent output's locking script.",
            FieldKind::Sequence => {
                "Sequence number, used for relative timelocks and replace-by-fee signalling."
            }
            FieldKind::OutputCount => "Number of outputs, as a CompactSize integer.",
            FieldKind::Value => "Amount in satoshis.",
            FieldKind::ScriptPubKeyLength => "Length of the locking script (scriptPubKey) in bytes.",
            FieldKind::ScriptPubKey => {
                "Locking script (scriptPubKey) that must be satisfied to spend this output."
            }
            FieldKind::WitnessElementCount => "Number of witness stack elements for this input.",
            FieldKind::WitnessElementLength => "Length of this witness stack element in bytes.",
            FieldKind::WitnessElement => "Witness stack element data.",
            FieldKind::Locktime => {
                "Locktime. Earliest block height (below 500000000) or UNIX time at which the transaction can be mined."
            }
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a range sits in the transaction structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "camelCase")]
pub enum Location {
    /// Top-level field (version, counts, marker, flag, locktime)
    Transaction,
    Input { index: usize },
    Output { index: usize },
    /// Witness stack header of an input
    Witness { input: usize },
    WitnessElement { input: usize, element: usize },
}

impl Location {
    /// Structural tags for this location, outermost first
    pub fn tags(&self) -> Vec<Tag> {
        match *self {
            Location::Transaction => Vec::new(),
            Location::Input { index } => vec![Tag::Input(index)],
            Location::Output { index } => vec![Tag::Output(index)],
            Location::Witness { input } => vec![Tag::Witness(input)],
            Location::WitnessElement { input, element } => {
                vec![Tag::Witness(input), Tag::WitnessElement(element)]
            }
        }
    }

    fn description_prefix(&self) -> String {
        match *self {
            Location::Transaction => String::new(),
            Location::Input { index } => format!("Input {}: ", index),
            Location::Output { index } => format!("Output {}: ", index),
            Location::Witness { input } => format!("Input {} witness: ", input),
            Location::WitnessElement { input, element } => {
                format!("Input {} witness element {}: ", input, element)
            }
        }
    }
}

/// A semantic label attached to a range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tag {
    Input(usize),
    Output(usize),
    Witness(usize),
    WitnessElement(usize),
    Field(FieldKind),
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Input(n) => write!(f, "input-{}", n),
            Tag::Output(n) => write!(f, "output-{}", n),
            Tag::Witness(n) => write!(f, "witness-{}", n),
            Tag::WitnessElement(n) => write!(f, "element-{}", n),
            Tag::Field(kind) => write!(f, "{}", kind),
        }
    }
}

/// Value interpretation hint for consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    Byte,
    U32,
    U64,
    TransactionId,
    VariableLengthInteger,
    ByteString,
}

/// One annotated span `[start, end)` of the serialized transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRange {
    pub start: usize,
    pub end: usize,
    pub kind: FieldKind,
    pub location: Location,
    pub description: String,
    /// Decoded value, not the raw bytes
    pub value: String,
    pub data_type: DataType,
}

impl AnnotationRange {
    pub fn new(start: usize, end: usize, kind: FieldKind, location: Location, value: String) -> Self {
        debug_assert!(start < end, "empty range for {}", kind);
        Self {
            start,
            end,
            kind,
            location,
            description: format!("{}{}", location.description_prefix(), kind.role()),
            value,
            data_type: kind.data_type(),
        }
    }

    /// Structural tags followed by the field tag; never empty
    pub fn tags(&self) -> Vec<Tag> {
        let mut tags = self.location.tags();
        tags.push(Tag::Field(self.kind));
        tags
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

// Written by hand so the derived tags travel with each range
impl Serialize for AnnotationRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AnnotationRange", 8)?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("end", &self.end)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("location", &self.location)?;
        state.serialize_field("tags", &self.tags())?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("data_type", &self.data_type)?;
        state.end()
    }
}
