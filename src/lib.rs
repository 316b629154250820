//! Typed client for the Tollbit content-licensing gateway: quote a URL, trade an API key for a
//! scoped access token, and fetch the licensed content with it, all behind one closed error
//! taxonomy.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod client;
pub mod env;
pub mod error;
pub mod http;
pub mod model;
pub mod obs;
pub mod response;
pub mod target;

pub use client::{SanctionedContentRequest, UseContentClient};
pub use error::{ConfigError, Error, ErrorKind, Result};

mod _prelude {
	pub use std::{
		borrow::Cow,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _, tracing_subscriber as _};
