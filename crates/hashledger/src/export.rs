//! Plain text, CSV and JSON renderings of a chain.

use std::fmt::Write as _;

use hashledger_core::Record;

use crate::error::Result;
use hashledger_store::StoreError;

const CSV_HEADER: [&str; 7] = [
    "blockNumber",
    "sender",
    "receiver",
    "amount",
    "timestamp",
    "previousHash",
    "hash",
];

/// Export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    Text,
    Csv,
    Json,
}

impl ExportFormat {
    /// Suggested file name for a download in this format.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Text => "blockchain_export.txt",
            ExportFormat::Csv => "blockchain_export.csv",
            ExportFormat::Json => "blockchain_export.json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

/// Render `records` in `format`.
pub fn export(records: &[Record], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Text => Ok(to_text(records)),
        ExportFormat::Csv => Ok(to_csv(records)),
        ExportFormat::Json => to_json(records),
    }
}

/// Human-readable listing, one paragraph per block.
pub fn to_text(records: &[Record]) -> String {
    let mut out = String::from("BLOCKCHAIN EXPORT\n=================\n\n");
    for record in records {
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "Block #{}\nSender: {}\nReceiver: {}\nAmount: {}\nTimestamp: {}\nPrevious Hash: {}\nHash: {}\n\n",
            record.block_number(),
            record.sender(),
            record.receiver(),
            record.amount(),
            record.timestamp(),
            record.previous_hash(),
            record.hash(),
        );
    }
    out
}

/// CSV with a header row and CRLF line endings. Fields are quoted only when
/// they contain a comma, a quote or a line break.
pub fn to_csv(records: &[Record]) -> String {
    let mut out = String::new();
    push_csv_row(&mut out, CSV_HEADER.iter().copied());
    for record in records {
        let block_number = record.block_number().to_string();
        let timestamp = record.timestamp().to_string();
        let previous = record.previous_hash().to_hex();
        let hash = record.hash().to_hex();
        push_csv_row(
            &mut out,
            [
                block_number.as_str(),
                record.sender(),
                record.receiver(),
                record.amount().as_str(),
                timestamp.as_str(),
                previous.as_str(),
                hash.as_str(),
            ],
        );
    }
    out
}

/// The chain as a pretty-printed JSON array, in the same shape as the data file.
pub fn to_json(records: &[Record]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(|e| StoreError::Serialization(e).into())
}

fn push_csv_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\r', '\n']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push_str("\r\n");
}
