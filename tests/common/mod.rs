#![allow(dead_code)]

use payflow::application::builder::PaymentServiceBuilder;
use payflow::application::factory::ProcessorFactory;
use payflow::application::listeners::{ListenerManager, RecordingListener};
use payflow::application::service::PaymentService;
use payflow::config::GatewayConfig;
use payflow::domain::customer::{ContactInfo, CustomerData};
use payflow::domain::payment::PaymentData;
use payflow::domain::ports::GatewayClientRef;
use payflow::infrastructure::file_log::FileTransactionLog;
use payflow::infrastructure::in_memory::InMemoryGateway;
use payflow::infrastructure::notifiers::CapturingSink;
use rand::Rng;
use std::fs::File;
use std::io::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const HEADER: [&str; 8] = [
    "name",
    "email",
    "phone",
    "customer_id",
    "amount",
    "source",
    "currency",
    "type",
];

/// A fully wired service plus handles on everything it talks to.
pub struct Harness {
    pub service: PaymentService,
    pub sink: CapturingSink,
    pub listener: Arc<RecordingListener>,
    pub log_path: PathBuf,
    _dir: tempfile::TempDir,
}

impl Harness {
    pub fn log_lines(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log_path)
            .map(|contents| contents.lines().map(String::from).collect())
            .unwrap_or_default()
    }
}

pub fn alice() -> CustomerData {
    CustomerData::new("Alice", ContactInfo::with_email("a@b.com"))
}

pub fn alice_payment() -> PaymentData {
    PaymentData::online(5000, "tok_visa")
}

pub fn harness(gateway: InMemoryGateway, customer: &CustomerData, payment: &PaymentData) -> Harness {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let log_path = dir.path().join("transactions.log");
    let sink = CapturingSink::new();
    let listener = Arc::new(RecordingListener::new());

    let mut listeners = ListenerManager::new();
    listeners.subscribe(listener.clone());

    let gateway: GatewayClientRef = Arc::new(gateway);
    let factory = ProcessorFactory::new(gateway, GatewayConfig::default());

    let service = PaymentServiceBuilder::new()
        .set_payment_processor(&factory, payment)
        .set_notifier(customer, Arc::new(sink.clone()))
        .set_recurring_processor()
        .set_refund_processor()
        .set_logger(Arc::new(FileTransactionLog::new(&log_path)))
        .set_listener_manager(listeners)
        .set_customer_validator()
        .set_payment_validator()
        .build()
        .expect("Failed to build service");

    Harness {
        service,
        sink,
        listener,
        log_path,
        _dir: dir,
    }
}

pub fn write_payments_csv(path: &Path, rows: &[[&str; 8]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes `count` random online payments, a mix of MXN gateway charges,
/// foreign-currency local charges and declined cards.
pub fn generate_payments_csv(path: &Path, count: usize) -> Result<(), Error> {
    let mut rng = rand::thread_rng();
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(HEADER)?;
    for i in 0..count {
        let name = format!("Customer {i}");
        let email = format!("customer{i}@example.com");
        let amount = rng.gen_range(1..=1_000_000i64).to_string();
        let (source, currency) = match rng.gen_range(0..3) {
            0 => ("tok_visa", "MXN"),
            1 => ("tok_visa", "USD"),
            _ => ("tok_chargeDeclined", "MXN"),
        };
        wtr.write_record([
            name.as_str(),
            email.as_str(),
            "",
            "",
            amount.as_str(),
            source,
            currency,
            "online",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
