use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payflow::application::builder::PaymentServiceBuilder;
use payflow::application::decorator::LoggingPaymentService;
use payflow::application::factory::ProcessorFactory;
use payflow::application::listeners::{AccountabilityListener, ListenerManager};
use payflow::application::service::{PaymentService, PaymentServiceApi};
use payflow::config::GatewayConfig;
use payflow::domain::customer::CustomerData;
use payflow::domain::payment::PaymentData;
use payflow::domain::ports::{GatewayClientRef, MessageSinkRef, TransactionLogRef};
use payflow::infrastructure::file_log::{DEFAULT_LOG_PATH, FileTransactionLog};
use payflow::infrastructure::in_memory::InMemoryGateway;
use payflow::infrastructure::notifiers::ConsoleSink;
use payflow::interfaces::csv::request_reader::PaymentRequestReader;
use payflow::interfaces::csv::response_writer::ResponseWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input payments CSV file
    input: PathBuf,

    /// File receiving the transaction log
    #[arg(long, env = "PAYFLOW_LOG_PATH", default_value = DEFAULT_LOG_PATH)]
    log_path: PathBuf,

    /// Set up a recurring payment for every row instead of a one-off charge
    #[arg(long)]
    recurring: bool,

    /// Refund every successful charge right after it is made
    #[arg(long, conflicts_with = "recurring")]
    refund: bool,

    /// Unit amount of the gateway price, in minor units
    #[arg(long, default_value_t = 9900)]
    plan_amount: i64,

    #[command(flatten)]
    gateway: GatewayConfig,
}

fn build_service(
    factory: &ProcessorFactory,
    customer: &CustomerData,
    payment: &PaymentData,
    logger: TransactionLogRef,
    sink: MessageSinkRef,
) -> payflow::error::Result<LoggingPaymentService<PaymentService>> {
    let mut listeners = ListenerManager::new();
    listeners.subscribe(Arc::new(AccountabilityListener));

    let service = PaymentServiceBuilder::new()
        .set_payment_processor(factory, payment)
        .set_notifier(customer, sink)
        .set_recurring_processor()
        .set_refund_processor()
        .set_logger(logger)
        .set_listener_manager(listeners)
        .set_customer_validator()
        .set_payment_validator()
        .build()?;

    Ok(LoggingPaymentService::new(service))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let gateway: GatewayClientRef = Arc::new(
        InMemoryGateway::new().with_price(cli.gateway.price_id.clone(), cli.plan_amount),
    );
    let factory = ProcessorFactory::new(gateway, cli.gateway.clone());
    let logger: TransactionLogRef = Arc::new(FileTransactionLog::new(&cli.log_path));
    let sink: MessageSinkRef = Arc::new(ConsoleSink);

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = PaymentRequestReader::new(file);

    let stdout = io::stdout();
    let mut writer = ResponseWriter::new(stdout.lock());

    for row in reader.rows() {
        let (customer, payment) = match row {
            Ok(row) => row.into_request(),
            Err(e) => {
                eprintln!("Error reading payment: {}", e);
                continue;
            }
        };

        let service = match build_service(&factory, &customer, &payment, logger.clone(), sink.clone()) {
            Ok(service) => service,
            Err(e) => {
                eprintln!("Error building payment service: {}", e);
                continue;
            }
        };

        let result = if cli.recurring {
            service.setup_recurring(&customer, &payment).await
        } else {
            service.process_transaction(&customer, &payment).await
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                eprintln!("Error processing payment: {}", e);
                continue;
            }
        };
        writer
            .write_response(customer.name(), &response)
            .into_diagnostic()?;

        if cli.refund
            && response.is_success()
            && let Some(transaction_id) = response.transaction_id()
        {
            match service.process_refund(transaction_id).await {
                Ok(refund) => writer
                    .write_response(customer.name(), &refund)
                    .into_diagnostic()?,
                Err(e) => eprintln!("Error refunding payment: {}", e),
            }
        }
    }

    writer.flush().into_diagnostic()?;
    Ok(())
}
