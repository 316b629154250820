//! Content formats, currencies, and license-type codes.

// self
use crate::_prelude::*;

/// Representation the gateway renders licensed content in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
	/// Markdown rendering.
	#[default]
	Markdown,
	/// HTML rendering.
	Html,
}
impl ContentFormat {
	/// Returns the wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			ContentFormat::Markdown => "markdown",
			ContentFormat::Html => "html",
		}
	}
}
impl Display for ContentFormat {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

macro_rules! open_code {
	($(#[$meta:meta])* $name:ident { $($(#[$cmeta:meta])* $konst:ident = $value:literal),+ $(,)? }) => {
		$(#[$meta])*
		#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Cow<'static, str>);
		impl $name {
			$(
				$(#[$cmeta])*
				pub const $konst: Self = Self(Cow::Borrowed($value));
			)+

			/// Wraps a code the gateway understands but this crate has no constant for.
			pub fn new(code: impl Into<String>) -> Self {
				Self(Cow::Owned(code.into()))
			}

			/// Returns the wire code.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				self.as_str()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(self.as_str())
			}
		}
	};
}

open_code! {
	/// ISO-4217-style currency code used for prices and price ceilings.
	Currency {
		/// United States dollar.
		USD = "USD",
	}
}

open_code! {
	/// Server-defined code describing the usage rights a license grants.
	LicenseType {
		/// Per-request license for partial use.
		ON_DEMAND_LICENSE = "ON_DEMAND_LICENSE",
		/// Per-request license for full use.
		ON_DEMAND_FULL_USE_LICENSE = "ON_DEMAND_FULL_USE_LICENSE",
		/// Negotiated license selected by its identifier.
		CUSTOM_LICENSE = "CUSTOM_LICENSE",
	}
}
