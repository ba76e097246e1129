//! Simulated payment gateway with a fixed-latency, probabilistic outcome.

use std::time::Duration;

use ccommon::BoxFuture;
use ctooling::PaymentMethod;
use futures_timer::Delay;
use rand::Rng;

/// A gateway round trip always resolves to one of these; the gateway
/// itself never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Approved { transaction_id: String },
    Declined,
}

impl PaymentOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved { .. })
    }
}

pub trait PaymentGateway: Send + Sync {
    fn charge<'a>(
        &'a self,
        booking_id: &'a str,
        amount: f64,
        method: PaymentMethod,
    ) -> BoxFuture<'a, PaymentOutcome>;
}

const TRANSACTION_ID_LEN: usize = 9;
const TRANSACTION_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone)]
pub struct SimulatedPaymentGateway {
    success_rate: f64,
    latency: Duration,
}

impl SimulatedPaymentGateway {
    pub fn new() -> Self {
        Self {
            success_rate: 0.9,
            latency: Duration::from_secs(1),
        }
    }

    /// Overrides the approval probability. Tests pin this to 0.0 or 1.0
    /// for deterministic outcomes.
    pub fn with_success_rate(mut self, success_rate: f64) -> Self {
        self.success_rate = success_rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn generate_transaction_id() -> String {
        let mut rng = rand::thread_rng();
        (0..TRANSACTION_ID_LEN)
            .map(|_| {
                let index = rng.gen_range(0..TRANSACTION_ID_CHARSET.len());
                TRANSACTION_ID_CHARSET[index] as char
            })
            .collect()
    }
}

impl Default for SimulatedPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentGateway for SimulatedPaymentGateway {
    fn charge<'a>(
        &'a self,
        _booking_id: &'a str,
        _amount: f64,
        _method: PaymentMethod,
    ) -> BoxFuture<'a, PaymentOutcome> {
        Box::pin(async move {
            Delay::new(self.latency).await;

            let approved = rand::thread_rng().r#gen::<f64>() < self.success_rate;
            if approved {
                PaymentOutcome::Approved {
                    transaction_id: Self::generate_transaction_id(),
                }
            } else {
                PaymentOutcome::Declined
            }
        })
    }
}
