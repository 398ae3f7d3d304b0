//! Domain model of the simulated payment gateway: transactions, requests and
//! results, history selection, and the ports the gateway depends on.

pub mod history;
pub mod payment;
pub mod ports;
pub mod transaction;
