use async_trait::async_trait;
use payflow::application::builder::PaymentServiceBuilder;
use payflow::application::service::PaymentServiceApi;
use payflow::domain::customer::{ContactInfo, CustomerData};
use payflow::domain::payment::{PaymentData, PaymentResponse, PaymentStatus};
use payflow::domain::ports::{PaymentProcessor, TransactionLog};
use payflow::error::{PaymentError, Result};
use payflow::infrastructure::notifiers::CapturingSink;
use rand::Rng;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct CountingProcessor {
    calls: AtomicUsize,
}

#[async_trait]
impl PaymentProcessor for CountingProcessor {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn process_transaction(
        &self,
        _customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PaymentResponse::new(
            PaymentStatus::Succeeded,
            payment.amount(),
            Some("T1".to_string()),
            None,
        ))
    }
}

#[derive(Default)]
struct CountingLog {
    entries: AtomicUsize,
}

#[async_trait]
impl TransactionLog for CountingLog {
    async fn log(
        &self,
        _customer: &CustomerData,
        _payment: &PaymentData,
        _response: &PaymentResponse,
    ) -> Result<()> {
        self.entries.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn log_refund(&self, _transaction_id: &str, _response: &PaymentResponse) -> Result<()> {
        self.entries.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn test_non_positive_amounts_never_reach_the_processor() {
    let processor = Arc::new(CountingProcessor::default());
    let log = Arc::new(CountingLog::default());
    let sink = CapturingSink::new();
    let customer = CustomerData::new("Alice", ContactInfo::with_email("a@b.com"));

    let service = PaymentServiceBuilder::new()
        .with_processor(processor.clone())
        .set_notifier(&customer, Arc::new(sink.clone()))
        .set_logger(log.clone())
        .set_customer_validator()
        .set_payment_validator()
        .build()
        .unwrap();

    let mut rng = rand::thread_rng();
    for _ in 0..500 {
        let amount = rng.gen_range(i64::MIN / 2..=0);
        let payment = PaymentData::online(amount, "tok_visa");
        let result = service.process_transaction(&customer, &payment).await;
        assert!(
            matches!(result, Err(PaymentError::ValidationError(_))),
            "amount {amount} was accepted"
        );
    }

    assert_eq!(processor.calls.load(Ordering::SeqCst), 0);
    assert_eq!(log.entries.load(Ordering::SeqCst), 0);
    assert!(sink.messages().is_empty());

    for _ in 0..50 {
        let amount = rng.gen_range(1..=i64::MAX / 2);
        let payment = PaymentData::online(amount, "tok_visa");
        let response = service.process_transaction(&customer, &payment).await.unwrap();
        assert_eq!(response.amount(), amount);
    }
    assert_eq!(processor.calls.load(Ordering::SeqCst), 50);
    assert_eq!(log.entries.load(Ordering::SeqCst), 50);
}
