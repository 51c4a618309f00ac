//! Quick split command - everyone shares everything

use anyhow::Result;
use split_common::BillAction;
use std::io::Write;

use crate::errors::EXIT_SUCCESS;
use crate::{input, output};

pub fn run(source: &str, json: bool, out: &mut dyn Write) -> Result<i32> {
    let bill = input::read_bill(source)?.apply(BillAction::QuickSplit)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&bill)?)?;
    } else {
        write!(out, "{}", output::render_summary(&bill, &bill.summary()))?;
    }
    Ok(EXIT_SUCCESS)
}
