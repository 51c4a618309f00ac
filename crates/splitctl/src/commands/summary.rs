//! Summary command - what everyone owes

use anyhow::Result;
use split_common::BillAction;
use std::io::Write;

use crate::errors::EXIT_SUCCESS;
use crate::{input, output};

pub fn run(source: &str, tip: Option<f64>, json: bool, out: &mut dyn Write) -> Result<i32> {
    let mut bill = input::read_bill(source)?;
    if let Some(percentage) = tip {
        bill = bill.apply(BillAction::SetTip { percentage })?;
    }

    let summary = bill.summary();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        write!(out, "{}", output::render_summary(&bill, &summary))?;
    }
    Ok(EXIT_SUCCESS)
}
