//! Low-level gateway APIs, one method per endpoint.
//!
//! [`ContentApi`] covers the unauthenticated rate lookup and the token-authenticated content
//! fetch; [`TokenApi`] covers both token-issuance grants. Every method issues exactly one
//! request and runs the outcome through [`crate::response`].

pub mod content;
pub mod token;

pub use content::*;
pub use token::*;

// self
use crate::{
	http::{GatewayHttpClient, GatewayRequest, GatewayResponse},
	obs,
};

async fn send<C>(
	http_client: &C,
	request: GatewayRequest,
) -> std::result::Result<GatewayResponse, C::TransportError>
where
	C: ?Sized + GatewayHttpClient,
{
	obs::request_dispatched(&request);

	http_client.execute(request).await
}
