mod dump;
mod extract;
mod x86;

use std::fmt::Write;
use std::io::Read;

use anyhow::{Context, Result};
use log::info;

use extract::{extract_from_reader, MARK_JSON_BEGIN, MARK_JSON_END};
use x86::InstructionSetDatabase;

/// Bundled asmdb x86 data, relative to the crate root.
const ASMDB_X86_DATA_JS: &str = "asmdb/x86data.js";

static ASMDB_X86: &str = include_str!("../asmdb/x86data.js");

/// Extracts the JSON payload of an asmdb data file, decodes it and dumps
/// the database followed by its instructions.
fn gen<R: Read>(name: &str, source: R, config: &dump::Config) -> Result<String> {
    let data = extract_from_reader(source, MARK_JSON_BEGIN, MARK_JSON_END)
        .with_context(|| format!("extract JSON payload from {name}"))?;

    let mut x86_asm = InstructionSetDatabase::decode(&data)
        .with_context(|| format!("decode JSON payload of {name}"))?;
    let instructions = x86_asm
        .take_instructions()
        .with_context(|| format!("name instruction tuples of {name}"))?;
    info!("{name}: {} instructions", instructions.len());

    let mut output = String::new();
    writeln!(output, "x86asm: {}", dump::dump(&x86_asm, config)?)?;
    writeln!(output, "Instructions: {}", dump::dump(&instructions, config)?)?;
    Ok(output)
}

fn main() -> Result<()> {
    env_logger::init();

    let output = gen(
        ASMDB_X86_DATA_JS,
        ASMDB_X86.as_bytes(),
        &dump::Config::default(),
    )?;
    print!("{output}");
    Ok(())
}
