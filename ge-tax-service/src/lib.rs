//! # Georgian Tax Service
//!
//! Application service on top of the currency converter.
//!
//! ## Layout
//!
//! - `dto/` - textual requests as collected by front ends, and their responses
//! - `service/` - request validation, single conversions and income batches
//!
//! The service is generic over `V: MoneyConverter`, so tests drive it with an
//! in-memory converter and the binary wires in the cached feed client.

pub mod dto;
pub mod service;


pub use dto::{ConvertRequest, ConvertResponse, Income, IncomeBatch, IncomeSummary};
pub use service::IncomeService;
