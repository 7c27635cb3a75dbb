use crate::domain::customer::{ContactInfo, CustomerData};
use crate::domain::payment::{DEFAULT_CURRENCY, PaymentData, PaymentType};
use crate::error::{PaymentError, Result};
use serde::Deserialize;
use std::io::Read;

/// One line of the batch input file.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PaymentRow {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub customer_id: Option<String>,
    pub amount: i64,
    pub source: Option<String>,
    pub currency: Option<String>,
    pub r#type: Option<PaymentType>,
}

impl PaymentRow {
    /// Splits the row into the customer and payment records, applying the
    /// default currency and payment type to empty cells.
    pub fn into_request(self) -> (CustomerData, PaymentData) {
        let mut customer = CustomerData::new(self.name, ContactInfo::new(self.email, self.phone));
        if let Some(customer_id) = self.customer_id {
            customer = customer.with_customer_id(customer_id);
        }
        let payment = PaymentData::new(
            self.amount,
            self.source.unwrap_or_default(),
            self.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            self.r#type.unwrap_or_default(),
        );
        (customer, payment)
    }
}

/// Reads payment requests from a CSV source.
///
/// Wraps `csv::Reader`, trimming whitespace and tolerating short records.
pub struct PaymentRequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentRequestReader<R> {
    /// Creates a new reader from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily deserializes rows.
    pub fn rows(self) -> impl Iterator<Item = Result<PaymentRow>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "name,email,phone,customer_id,amount,source,currency,type";

    #[test]
    fn test_reader_valid_stream() {
        let data = format!(
            "{HEADER}\n\
             Manuela Torres, manuela@example.com,,,12000,tok_mastercard,MXN,online\n\
             Usuario Anonimo,,,,8000,,,offline"
        );
        let rows: Vec<Result<PaymentRow>> = PaymentRequestReader::new(data.as_bytes()).rows().collect();
        assert_eq!(rows.len(), 2);

        let first = rows[0].as_ref().unwrap();
        assert_eq!(first.email.as_deref(), Some("manuela@example.com"));
        assert_eq!(first.phone, None);
        assert_eq!(first.amount, 12000);

        let (customer, payment) = rows[1].as_ref().unwrap().clone().into_request();
        assert_eq!(customer.name(), "Usuario Anonimo");
        assert!(!customer.contact_info().unwrap().is_reachable());
        assert_eq!(payment.currency(), "MXN");
        assert_eq!(payment.payment_type(), PaymentType::Offline);
        assert!(payment.source().is_empty());
    }

    #[test]
    fn test_empty_type_defaults_to_online() {
        let data = format!("{HEADER}\nCarlos,,5551234567,,5000,tok_visa,USD,");
        let row = PaymentRequestReader::new(data.as_bytes())
            .rows()
            .next()
            .unwrap()
            .unwrap();
        let (_, payment) = row.into_request();
        assert_eq!(payment.payment_type(), PaymentType::Online);
        assert_eq!(payment.currency(), "USD");
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = format!("{HEADER}\nAlice,a@b.com,,,lots,tok_visa,MXN,online");
        let rows: Vec<Result<PaymentRow>> = PaymentRequestReader::new(data.as_bytes()).rows().collect();
        assert!(matches!(rows[0], Err(PaymentError::CsvError(_))));
    }
}
