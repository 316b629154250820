//! Licensed content bundles returned by content fetches.

// self
use crate::{_prelude::*, model::RateQuote};

/// One licensed document: its text fragments, metadata, and the rate that was charged.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ContentBundle {
	content: ContentFragments,
	metadata: ContentMetadata,
	rate: RateQuote,
}
impl ContentBundle {
	/// Header, main, and footer fragments.
	pub fn content(&self) -> &ContentFragments {
		&self.content
	}

	/// Document metadata.
	pub fn metadata(&self) -> &ContentMetadata {
		&self.metadata
	}

	/// Rate the gateway charged for this document.
	pub fn rate(&self) -> &RateQuote {
		&self.rate
	}
}

/// Rendered text split into page regions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ContentFragments {
	header: String,
	main: String,
	footer: String,
}
impl ContentFragments {
	/// Header region.
	pub fn header(&self) -> &str {
		&self.header
	}

	/// Main body.
	pub fn main(&self) -> &str {
		&self.main
	}

	/// Footer region.
	pub fn footer(&self) -> &str {
		&self.footer
	}
}

/// Document metadata; every field is independently optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentMetadata {
	title: Option<String>,
	description: Option<String>,
	image_url: Option<String>,
	author: Option<String>,
	published: Option<String>,
	modified: Option<String>,
}
impl ContentMetadata {
	/// Document title.
	pub fn title(&self) -> Option<&str> {
		self.title.as_deref()
	}

	/// Short description.
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Lead image URL.
	pub fn image_url(&self) -> Option<&str> {
		self.image_url.as_deref()
	}

	/// Author byline.
	pub fn author(&self) -> Option<&str> {
		self.author.as_deref()
	}

	/// Publication timestamp as reported by the publisher.
	pub fn published(&self) -> Option<&str> {
		self.published.as_deref()
	}

	/// Last-modified timestamp as reported by the publisher.
	pub fn modified(&self) -> Option<&str> {
		self.modified.as_deref()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn decodes_bundle_with_sparse_metadata() {
		let bundle: ContentBundle = serde_json::from_value(serde_json::json!({
			"content": { "header": "<h>", "main": "body", "footer": "<f>" },
			"metadata": { "title": "Daydream", "imageUrl": null, "author": "A. Writer" },
			"rate": {
				"price": { "priceMicros": 0, "currency": "USD" },
				"license": {
					"cuid": "license-cuid",
					"licenseType": "STANDARD",
					"licensePath": "/licenses/standard",
					"permissions": [],
					"validUntil": "2024-12-31T23:59:59Z"
				},
				"error": ""
			}
		}))
		.expect("Bundle fixture should decode.");

		assert_eq!(bundle.content().main(), "body");
		assert_eq!(bundle.metadata().title(), Some("Daydream"));
		assert_eq!(bundle.metadata().image_url(), None);
		assert_eq!(bundle.metadata().published(), None);
		assert_eq!(bundle.rate().price_micros(), 0);
	}
}
