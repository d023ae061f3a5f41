//! File-driven command parsing and dispatch for the `bv`/`bp` drivers (spec §6).
//!
//! Both drivers share the same shape: read a header, fold a stream of whitespace-tokenized
//! operations over a façade, write query results as they're produced, then dump the final
//! structure. Malformed tokens never panic; they become [`Error::MalformedInput`] and abort the
//! run, matching the "no partial results" contract.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::dynamic_bp::DynamicBpTree;
use crate::dynamic_vector::DynamicBitVector;
use crate::error::Error;
use crate::traits::{BitSize, Profiler};

/// Outcome of a completed driver run, used to fill in the `RESULT` line's `space=` field.
pub struct RunOutcome {
    pub space_bits: usize,
}

fn io_err(e: io::Error) -> Error {
    Error::MalformedInput(e.to_string())
}

fn tokens(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

fn parse_usize(tok: Option<&str>, line: usize) -> Result<usize, Error> {
    tok.and_then(|t| t.parse::<usize>().ok())
        .ok_or_else(|| Error::MalformedInput(format!("line {line}: expected a number")))
}

fn parse_bit(tok: Option<&str>, line: usize) -> Result<bool, Error> {
    match tok {
        Some("0") => Ok(false),
        Some("1") => Ok(true),
        _ => Err(Error::MalformedInput(format!("line {line}: expected 0 or 1"))),
    }
}

/// Reads `input` per the BV file format, applies every operation to a freshly built
/// [`DynamicBitVector`], writes rank/select results and the final bit string to `output`.
///
/// Generic over the profiler `P` so the driver can opt into [`crate::profiler::BasicProfiler`]'s
/// timing output instead of the zero-cost [`crate::profiler::NoProfiler`] default.
pub fn run_bv<P: Profiler>(input: &Path, output: &Path) -> Result<RunOutcome, Error> {
    let file = File::open(input).map_err(io_err)?;
    let mut lines = BufReader::new(file).lines();
    let mut line_no = 0;

    line_no += 1;
    let header = lines
        .next()
        .ok_or_else(|| Error::MalformedInput("missing initial length".into()))?
        .map_err(io_err)?;
    let initial_length = header
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::MalformedInput(format!("line {line_no}: expected initial length")))?;

    let mut bits = Vec::with_capacity(initial_length);
    while bits.len() < initial_length {
        line_no += 1;
        let line = lines
            .next()
            .ok_or_else(|| Error::MalformedInput(format!("line {line_no}: truncated initial bit string")))?
            .map_err(io_err)?;
        for tok in tokens(&line) {
            bits.push(parse_bit(Some(tok), line_no)?);
        }
    }
    bits.truncate(initial_length);

    let mut bv: DynamicBitVector<P> = DynamicBitVector::from_bits(&bits);
    let mut writer = BufWriter::new(File::create(output).map_err(io_err)?);

    for line in lines {
        line_no += 1;
        let line = line.map_err(io_err)?;
        let toks = tokens(&line);
        if toks.is_empty() {
            continue;
        }
        tracing::debug!(line = line_no, op = toks[0], "bv operation");
        match toks[0] {
            "insert" => {
                let index = parse_usize(toks.get(1).copied(), line_no)?;
                let bit = parse_bit(toks.get(2).copied(), line_no)?;
                bv.insert(index, bit)?;
            }
            "delete" => {
                let index = parse_usize(toks.get(1).copied(), line_no)?;
                bv.delete(index)?;
            }
            "flip" => {
                let index = parse_usize(toks.get(1).copied(), line_no)?;
                bv.flip(index)?;
            }
            "rank" => {
                let bit = parse_bit(toks.get(1).copied(), line_no)?;
                let index = parse_usize(toks.get(2).copied(), line_no)?;
                let result = bv.rank(bit, index)?;
                writeln!(writer, "{result}").map_err(io_err)?;
            }
            "select" => {
                let bit = parse_bit(toks.get(1).copied(), line_no)?;
                let j = parse_usize(toks.get(2).copied(), line_no)?;
                let result = bv.select(bit, j)?;
                writeln!(writer, "{result}").map_err(io_err)?;
            }
            other => {
                return Err(Error::MalformedInput(format!(
                    "line {line_no}: unrecognized operation '{other}'"
                )))
            }
        }
    }

    for i in 0..bv.len() {
        writeln!(writer, "{}", if bv.access(i)? { 1 } else { 0 }).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    Ok(RunOutcome {
        space_bits: bv.bitsize_full(),
    })
}

/// Reads `input` per the BP file format, applies every operation to a freshly built
/// [`DynamicBpTree`], writes `child`/`subtree_size`/`parent` results and the final preorder
/// degree sequence to `output`.
///
/// Generic over the profiler `P` so the driver can opt into [`crate::profiler::BasicProfiler`]'s
/// timing output instead of the zero-cost [`crate::profiler::NoProfiler`] default.
pub fn run_bp<P: Profiler>(input: &Path, output: &Path) -> Result<RunOutcome, Error> {
    let file = File::open(input).map_err(io_err)?;
    let mut writer = BufWriter::new(File::create(output).map_err(io_err)?);
    let mut tree: DynamicBpTree<P> = DynamicBpTree::new();
    let mut line_no = 0;

    for line in BufReader::new(file).lines() {
        line_no += 1;
        let line = line.map_err(io_err)?;
        let toks = tokens(&line);
        if toks.is_empty() {
            continue;
        }
        tracing::debug!(line = line_no, op = toks[0], "bp operation");
        match toks[0] {
            "insertchild" => {
                let v = parse_usize(toks.get(1).copied(), line_no)?;
                let i = parse_usize(toks.get(2).copied(), line_no)?;
                let k = parse_usize(toks.get(3).copied(), line_no)?;
                tree.insert_child(v, i, k)?;
            }
            "deletenode" => {
                let v = parse_usize(toks.get(1).copied(), line_no)?;
                tree.delete_node(v)?;
            }
            "child" => {
                let v = parse_usize(toks.get(1).copied(), line_no)?;
                let i = parse_usize(toks.get(2).copied(), line_no)?;
                let result = tree.child(v, i)?;
                writeln!(writer, "{result}").map_err(io_err)?;
            }
            "subtree_size" => {
                let v = parse_usize(toks.get(1).copied(), line_no)?;
                let result = tree.subtree_size(v)?;
                writeln!(writer, "{result}").map_err(io_err)?;
            }
            "parent" => {
                let v = parse_usize(toks.get(1).copied(), line_no)?;
                let result = tree.parent(v)?;
                writeln!(writer, "{result}").map_err(io_err)?;
            }
            other => {
                return Err(Error::MalformedInput(format!(
                    "line {line_no}: unrecognized operation '{other}'"
                )))
            }
        }
    }

    for degree in tree.degrees_preorder() {
        writeln!(writer, "{degree}").map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    Ok(RunOutcome {
        space_bits: tree.bitsize_full(),
    })
}
