use crate::csv_io::{stream_commands, write_results};
use crate::models::{CommandOutput, CommandRow, CommandType};
use crate::register::VatRegister;
use anyhow::Result;
use futures::StreamExt;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::BufReader;

pub async fn run(input_path: PathBuf) -> Result<()> {
    let file = File::open(&input_path).await?;
    let reader = BufReader::new(file);
    let mut stream = stream_commands(reader);

    let mut register = VatRegister::new();
    let mut results = Vec::new();

    while let Some(result) = stream.next().await {
        match result {
            Ok(row) => {
                let seq = results.len() + 1;
                results.push(apply(&mut register, seq, &row));
            }
            Err(e) => {
                tracing::warn!("Skipping malformed command: {}", e);
            }
        }
    }

    tracing::info!(
        commands = results.len(),
        companies = register.len(),
        invoices = register.invoice_count(),
        "script finished"
    );

    write_results(tokio::io::stdout(), results).await?;

    Ok(())
}

/// Executes one script command and reports its outcome.
pub fn apply(register: &mut VatRegister, seq: usize, row: &CommandRow) -> CommandOutput {
    let done = |ok: bool| CommandOutput::status(seq, row.op, ok);

    match row.op {
        CommandType::New => done(
            register
                .new_company(&row.name, &row.addr, &row.tax_id)
                .is_ok(),
        ),
        CommandType::Cancel => done(register.cancel(&row.company_ref()).is_ok()),
        CommandType::Invoice => match row.amount {
            Some(amount) => done(register.invoice(&row.company_ref(), amount).is_ok()),
            None => {
                tracing::warn!(seq, "invoice without amount");
                done(false)
            }
        },
        CommandType::Audit => match register.audit(&row.company_ref()) {
            Ok(sum) => done(true).with_value(sum),
            Err(_) => done(false),
        },
        CommandType::First => match register.first_company() {
            Some((name, addr)) => done(true).with_company(name, addr),
            None => done(false),
        },
        CommandType::Next => match register.next_company(&row.name, &row.addr) {
            Some((name, addr)) => done(true).with_company(name, addr),
            None => done(false),
        },
        CommandType::Median => done(true).with_value(u64::from(register.median_invoice())),
    }
}
