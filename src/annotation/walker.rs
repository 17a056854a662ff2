//! # Transaction Walker
//!
//! Replays the consensus serialization rules over the raw bytes with a single
//! forward cursor and emits one [`AnnotationRange`] per field.
//!
//! Byte boundaries always come from the raw buffer. Display values come from
//! the structured [`Transaction`] produced by the `bitcoin` codec, falling back
//! to the raw bytes when the codec output has no matching item. Both sides
//! follow the same wire rules; the final length check is the safety net for
//! when they disagree.

use super::index::{AnnotationIndex, Diagnostic};
use super::range::{AnnotationRange, FieldKind, Location};
use crate::config::wire;
use crate::error::{AnnotationError, AnnotationResult};
use crate::{script, varint};
use bitcoin::Transaction;

/// Annotate `bytes`, the consensus encoding of `tx`.
pub fn annotate(bytes: &[u8], tx: &Transaction) -> AnnotationResult<AnnotationIndex> {
    TransactionWalker::new(bytes, tx).walk()
}

/// Whether `tx` is serialized with the SegWit marker and flag.
///
/// The `bitcoin` encoder also uses the extended form for a transaction with
/// no inputs, otherwise the zero input count would read as the marker.
pub fn has_witness(tx: &Transaction) -> bool {
    tx.input.is_empty() || tx.input.iter().any(|input| !input.witness.is_empty())
}

/// Single-pass field walker over one serialized transaction
pub struct TransactionWalker<'a> {
    bytes: &'a [u8],
    tx: &'a Transaction,
    cursor: usize,
    ranges: Vec<AnnotationRange>,
}

impl<'a> TransactionWalker<'a> {
    pub fn new(bytes: &'a [u8], tx: &'a Transaction) -> Self {
        Self {
            bytes,
            tx,
            cursor: 0,
            ranges: Vec::new(),
        }
    }

    /// Walk every field and build the index.
    pub fn walk(mut self) -> AnnotationResult<AnnotationIndex> {
        let segwit = has_witness(self.tx);

        self.version()?;
        if segwit {
            self.segwit_header()?;
        }

        let input_count = self.count(FieldKind::InputCount)?;
        for index in 0..input_count {
            self.input(index)?;
        }

        let output_count = self.count(FieldKind::OutputCount)?;
        for index in 0..output_count {
            self.output(index)?;
        }

        if segwit {
            for input in 0..input_count {
                self.witness(input)?;
            }
        }

        self.locktime()?;

        log::debug!(
            "annotated {} ranges over {} of {} bytes",
            self.ranges.len(),
            self.cursor,
            self.bytes.len()
        );
        Ok(self.finish())
    }

    fn version(&mut self) -> AnnotationResult<()> {
        let (start, _) = self.take(wire::VERSION_LEN, FieldKind::Version)?;
        let version = self.tx.version.0.to_string();
        self.emit(start, FieldKind::Version, Location::Transaction, version);
        Ok(())
    }

    fn segwit_header(&mut self) -> AnnotationResult<()> {
        for (kind, expected) in [
            (FieldKind::SegwitMarker, wire::SEGWIT_MARKER),
            (FieldKind::SegwitFlag, wire::SEGWIT_FLAG),
        ] {
            let (start, raw) = self.take(1, kind)?;
            let byte = raw[0];
            if byte != expected {
                log::warn!(
                    "{} at offset {} is 0x{:02x}, expected 0x{:02x}",
                    kind,
                    start,
                    byte,
                    expected
                );
            }
            self.emit(start, kind, Location::Transaction, format!("0x{:02x}", byte));
        }
        Ok(())
    }

    fn count(&mut self, kind: FieldKind) -> AnnotationResult<usize> {
        let count = self.take_varint(kind, Location::Transaction)?;
        // Oversized counts run into the end of the buffer long before the loop ends
        Ok(usize::try_from(count).unwrap_or(usize::MAX))
    }

    fn input(&mut self, index: usize) -> AnnotationResult<()> {
        let tx = self.tx;
        let location = Location::Input { index };
        let structured = tx.input.get(index);
        if structured.is_none() {
            log::warn!("structured transaction has no input {}, using raw bytes", index);
        }

        let (start, raw) = self.take(wire::TXID_LEN, FieldKind::PrevTxId)?;
        let txid: Vec<u8> = raw.iter().rev().copied().collect();
        self.emit(start, FieldKind::PrevTxId, location, hex::encode(txid));

        let (start, raw) = self.take(wire::OUTPUT_INDEX_LEN, FieldKind::PrevOutputIndex)?;
        let vout = structured
            .map(|input| input.previous_output.vout)
            .unwrap_or_else(|| varint::read_u32_le(raw));
        self.emit(start, FieldKind::PrevOutputIndex, location, vout.to_string());

        let script_len = self.take_varint(FieldKind::ScriptSigLength, location)?;
        let (start, raw) = self.take_payload(script_len, FieldKind::ScriptSig)?;
        self.emit_script(
            start,
            raw,
            structured.map(|input| input.script_sig.as_bytes()),
            FieldKind::ScriptSig,
            location,
        );

        let (start, raw) = self.take(wire::SEQUENCE_LEN, FieldKind::Sequence)?;
        let sequence = structured
            .map(|input| input.sequence.0)
            .unwrap_or_else(|| varint::read_u32_le(raw));
        self.emit(start, FieldKind::Sequence, location, sequence.to_string());
        Ok(())
    }

    fn output(&mut self, index: usize) -> AnnotationResult<()> {
        let tx = self.tx;
        let location = Location::Output { index };
        let structured = tx.output.get(index);
        if structured.is_none() {
            log::warn!("structured transaction has no output {}, using raw bytes", index);
        }

        let (start, raw) = self.take(wire::VALUE_LEN, FieldKind::Value)?;
        let value = structured
            .map(|output| output.value.to_sat())
            .unwrap_or_else(|| varint::read_u64_le(raw));
        self.emit(start, FieldKind::Value, location, value.to_string());

        let script_len = self.take_varint(FieldKind::ScriptPubKeyLength, location)?;
        let (start, raw) = self.take_payload(script_len, FieldKind::ScriptPubKey)?;
        self.emit_script(
            start,
            raw,
            structured.map(|output| output.script_pubkey.as_bytes()),
            FieldKind::ScriptPubKey,
            location,
        );
        Ok(())
    }

    fn witness(&mut self, input: usize) -> AnnotationResult<()> {
        let tx = self.tx;
        let stack = tx.input.get(input).map(|txin| &txin.witness);

        let element_count = self.take_varint(FieldKind::WitnessElementCount, Location::Witness { input })?;
        let element_count = usize::try_from(element_count).unwrap_or(usize::MAX);

        for element in 0..element_count {
            let location = Location::WitnessElement { input, element };
            let len = self.take_varint(FieldKind::WitnessElementLength, location)?;
            let (start, raw) = self.take_payload(len, FieldKind::WitnessElement)?;
            self.emit_script(
                start,
                raw,
                stack.and_then(|witness| witness.nth(element)),
                FieldKind::WitnessElement,
                location,
            );
        }
        Ok(())
    }

    fn locktime(&mut self) -> AnnotationResult<()> {
        let (start, _) = self.take(wire::LOCKTIME_LEN, FieldKind::Locktime)?;
        let locktime = self.tx.lock_time.to_consensus_u32().to_string();
        self.emit(start, FieldKind::Locktime, Location::Transaction, locktime);
        Ok(())
    }

    /// Consume `len` bytes, returning their start offset and contents.
    fn take(&mut self, len: usize, kind: FieldKind) -> AnnotationResult<(usize, &'a [u8])> {
        let buffer = self.bytes;
        let start = self.cursor;
        let raw = start
            .checked_add(len)
            .and_then(|end| buffer.get(start..end))
            .ok_or_else(|| AnnotationError::truncated(kind.label(), start, len as u64, buffer.len()))?;
        self.cursor += len;
        Ok((start, raw))
    }

    /// Consume a length-prefixed payload whose length was already read.
    fn take_payload(&mut self, len: u64, kind: FieldKind) -> AnnotationResult<(usize, &'a [u8])> {
        let len = usize::try_from(len).map_err(|_| {
            AnnotationError::truncated(kind.label(), self.cursor, len, self.bytes.len())
        })?;
        self.take(len, kind)
    }

    /// Consume a CompactSize field and annotate it with its value.
    fn take_varint(&mut self, kind: FieldKind, location: Location) -> AnnotationResult<u64> {
        let start = self.cursor;
        let (value, consumed) = varint::decode(self.bytes, start).map_err(|err| match err {
            AnnotationError::TruncatedInput {
                offset,
                needed,
                available,
                ..
            } => AnnotationError::TruncatedInput {
                field: kind.label(),
                offset,
                needed,
                available,
            },
            other => other,
        })?;
        self.cursor += consumed;
        self.emit(start, kind, location, value.to_string());
        Ok(value)
    }

    /// Annotate script-like payloads; empty payloads cover no bytes.
    fn emit_script(
        &mut self,
        start: usize,
        raw: &[u8],
        structured: Option<&[u8]>,
        kind: FieldKind,
        location: Location,
    ) {
        if raw.is_empty() {
            return;
        }
        let value = script::format(structured.unwrap_or(raw));
        self.emit(start, kind, location, value);
    }

    fn emit(&mut self, start: usize, kind: FieldKind, location: Location, value: String) {
        self.ranges
            .push(AnnotationRange::new(start, self.cursor, kind, location, value));
    }

    fn finish(self) -> AnnotationIndex {
        let mut diagnostics = Vec::new();

        let expected = self.tx.total_size();
        if self.cursor != expected {
            diagnostics.push(Diagnostic::LengthMismatch {
                expected,
                actual: self.cursor,
            });
        }
        if self.cursor < self.bytes.len() {
            diagnostics.push(Diagnostic::TrailingBytes {
                covered: self.cursor,
                buffer_len: self.bytes.len(),
            });
        }
        for diagnostic in &diagnostics {
            log::warn!("{}", diagnostic);
        }

        AnnotationIndex::new(self.ranges, diagnostics)
    }
}
