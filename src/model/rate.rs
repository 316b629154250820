//! Immutable rate quotes returned by rate lookups and echoed by content fetches.

// self
use crate::{
	_prelude::*,
	model::{Currency, LicenseType},
};

/// Price and license terms quoted for a content path.
///
/// Quotes are read-only once decoded; the gateway lists them in tier order and the client
/// never re-sorts them.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RateQuote {
	price: RatePrice,
	license: RateLicense,
	#[serde(default)]
	error: Option<String>,
}
impl RateQuote {
	/// Price charged for this tier.
	pub fn price(&self) -> &RatePrice {
		&self.price
	}

	/// License granted for this tier.
	pub fn license(&self) -> &RateLicense {
		&self.license
	}

	/// Price in micro-units of [`RatePrice::currency`].
	pub fn price_micros(&self) -> i64 {
		self.price.price_micros
	}

	/// Gateway-supplied error for this tier; blank strings are reported as `None`.
	pub fn error(&self) -> Option<&str> {
		self.error.as_deref().filter(|value| !value.is_empty())
	}

	/// Returns `true` if the license has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant >= self.license.valid_until
	}
}

/// Integer price in millionths of a currency unit.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatePrice {
	price_micros: i64,
	currency: Currency,
}
impl RatePrice {
	/// Price in micro-units.
	pub fn micros(&self) -> i64 {
		self.price_micros
	}

	/// Currency code of the price.
	pub fn currency(&self) -> &Currency {
		&self.currency
	}
}

/// License descriptor attached to a quote.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLicense {
	#[serde(default)]
	cuid: Option<String>,
	license_type: LicenseType,
	license_path: String,
	#[serde(default, deserialize_with = "permission_names")]
	permissions: Vec<String>,
	#[serde(with = "time::serde::rfc3339")]
	valid_until: OffsetDateTime,
}
impl RateLicense {
	/// License identifier, when the gateway includes one.
	pub fn id(&self) -> Option<&str> {
		self.cuid.as_deref()
	}

	/// License type code.
	pub fn license_type(&self) -> &LicenseType {
		&self.license_type
	}

	/// Location of the human-readable license terms.
	pub fn license_path(&self) -> &str {
		&self.license_path
	}

	/// Permission names in server order.
	pub fn permissions(&self) -> &[String] {
		&self.permissions
	}

	/// Instant the quoted terms stop being honored.
	pub fn valid_until(&self) -> OffsetDateTime {
		self.valid_until
	}
}

fn permission_names<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	#[derive(Deserialize)]
	struct Permission {
		name: String,
	}

	let permissions = <Vec<Permission>>::deserialize(deserializer)?;

	Ok(permissions.into_iter().map(|permission| permission.name).collect())
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	fn quote_json() -> serde_json::Value {
		serde_json::json!({
			"price": { "priceMicros": 1000, "currency": "USD" },
			"license": {
				"cuid": "r6y1oozkapcoyzfm6dgc7813",
				"licenseType": "ON_DEMAND_FULL_USE_LICENSE",
				"licensePath": "https://example.com/license/full-use",
				"permissions": [{ "name": "FULL_USE" }, { "name": "PARTIAL_USE" }],
				"validUntil": "2024-12-13T00:00:21Z"
			},
			"error": ""
		})
	}

	#[test]
	fn decodes_wire_quote() {
		let quote: RateQuote =
			serde_json::from_value(quote_json()).expect("Quote fixture should decode.");

		assert_eq!(quote.price_micros(), 1000);
		assert_eq!(quote.price().currency(), &Currency::USD);
		assert_eq!(quote.license().id(), Some("r6y1oozkapcoyzfm6dgc7813"));
		assert_eq!(quote.license().license_type(), &LicenseType::ON_DEMAND_FULL_USE_LICENSE);
		assert_eq!(quote.license().permissions(), ["FULL_USE", "PARTIAL_USE"]);
		assert_eq!(quote.license().valid_until(), datetime!(2024-12-13 00:00:21 UTC));
		assert_eq!(quote.error(), None);
	}

	#[test]
	fn license_id_and_error_are_optional() {
		let mut value = quote_json();

		value["license"].as_object_mut().expect("License should be an object.").remove("cuid");
		value.as_object_mut().expect("Quote should be an object.").remove("error");

		let quote: RateQuote = serde_json::from_value(value).expect("Quote should still decode.");

		assert_eq!(quote.license().id(), None);
		assert_eq!(quote.error(), None);
	}

	#[test]
	fn expiry_is_inclusive() {
		let quote: RateQuote =
			serde_json::from_value(quote_json()).expect("Quote fixture should decode.");

		assert!(!quote.is_expired_at(datetime!(2024-12-13 00:00:20 UTC)));
		assert!(quote.is_expired_at(datetime!(2024-12-13 00:00:21 UTC)));
	}

	#[test]
	fn rejects_fractional_prices() {
		let mut value = quote_json();

		value["price"]["priceMicros"] = serde_json::json!(10.5);

		assert!(serde_json::from_value::<RateQuote>(value).is_err());
	}
}
