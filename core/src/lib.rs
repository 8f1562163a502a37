//! Synchronous client for the Moota bank-mutation API.
//!
//! # Overview
//! Every API capability is a method on a domain handle (`client.topup()`,
//! `client.mutation()`, ...). Each method builds an `HttpRequest`, sends it
//! through a [`Transport`] and hands the response to the dispatcher, which
//! turns it into a typed response, the raw JSON body, or a typed error.
//!
//! # Design
//! - `MootaClient` owns its access token; there is no global state.
//! - The endpoint catalog maps endpoint paths to the response and error
//!   variants they produce; unregistered endpoints pass JSON through and fail
//!   with the generic [`MootaError::Api`].
//! - Request building and response dispatch are pure, so both can be tested
//!   with [`testing::ScriptedTransport`] or without any transport at all.
//!
//! ```no_run
//! use moota_core::{Config, MootaClient};
//!
//! let client = MootaClient::new(Config::new("access-token"));
//! for topup in client.topup().list(1)? {
//!     println!("{:?} {}", topup.topup_id, topup.amount);
//! }
//! # Ok::<(), moota_core::MootaError>(())
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod response;
pub mod testing;
pub mod transport;
pub mod types;

pub use catalog::{EndpointCatalog, ErrorKind, ResponseKind};
pub use client::MootaClient;
pub use config::Config;
pub use dispatch::{dispatch, Dispatcher};
pub use error::{ApiFailure, MootaError, Result};
pub use http::{FormPart, HttpBody, HttpMethod, HttpRequest, HttpResponse};
pub use response::{ApiResponse, BankAccountResponse, MutationResponse, TaggingResponse, TopupResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{
    BankAccount, BankAccountPayload, CreateMutation, CreateTagging, CreateTopup, DestroyMutations,
    ManualConfirmation, Mutation, MutationNote, MutationQuery, MutationType, Tag, TopupRecord,
};
