//! Application layer containing the gateway orchestration.
//!
//! This module defines the `PaymentGateway` which is the entry point for every
//! payment, cancellation and history operation. Storage, identifier minting and
//! simulated latency are injected through the domain ports.

pub mod gateway;
