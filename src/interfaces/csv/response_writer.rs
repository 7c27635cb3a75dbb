use crate::domain::payment::{PaymentResponse, PaymentStatus, major_units};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ResponseRow<'a> {
    name: &'a str,
    status: &'a PaymentStatus,
    amount: Decimal,
    transaction_id: Option<&'a str>,
    message: Option<&'a str>,
}

/// Writes processor responses as CSV, amounts in major units.
pub struct ResponseWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_response(&mut self, name: &str, response: &PaymentResponse) -> Result<()> {
        self.writer.serialize(ResponseRow {
            name,
            status: response.status(),
            amount: major_units(response.amount()),
            transaction_id: response.transaction_id(),
            message: response.message(),
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
