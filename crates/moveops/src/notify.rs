//! Customer notification seam.
//!
//! Delivery (SMS, email, push) lives outside this core. The lifecycle
//! engine treats notification as fire-and-forget: a failed send is logged
//! and never fails the transition that triggered it.

use async_trait::async_trait;
use thiserror::Error;

/// Errors a notification backend may surface.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Failed to send notification: {0}")]
    SendFailed(String),
}

/// Sends arrival/departure notifications to the customer.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_arrival(
        &self,
        customer_name: &str,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Result<(), NotifyError>;
}

/// Default implementation that only logs. Useful in tests and in deployments
/// where notification delivery is handled elsewhere.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify_arrival(
        &self,
        customer_name: &str,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Result<(), NotifyError> {
        log::info!(
            "Arrival notification for {} (phone: {}, email: {})",
            customer_name,
            phone.unwrap_or("-"),
            email.unwrap_or("-")
        );
        Ok(())
    }
}
