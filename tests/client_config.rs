mod support;

// self
use appstore_server_api::{
	api::Client,
	config::{Credentials, Environment},
	error::{ConfigError, Error},
};

#[test]
fn construction_succeeds_with_all_required_fields() {
	Client::new(support::credentials())
		.expect("All four required fields are set, construction should succeed.");
}

#[test]
fn construction_fails_for_each_empty_required_field() {
	for (field, credentials) in [
		("issuer", Credentials::new("", "k", "b", support::TEST_PRIVATE_KEY)),
		("key_id", Credentials::new("i", "", "b", support::TEST_PRIVATE_KEY)),
		("bundle_id", Credentials::new("i", "k", "", support::TEST_PRIVATE_KEY)),
		("private_key", Credentials::new("i", "k", "b", "")),
	] {
		match Client::new(credentials) {
			Err(Error::Config(ConfigError::MissingField { field: reported })) =>
				assert_eq!(reported, field),
			other => panic!("Expected MissingField for `{field}`, got {other:?}."),
		}
	}
}

#[test]
fn sandbox_environment_selects_the_sandbox_base_url() {
	let client = Client::new(support::credentials().with_environment(Environment::Sandbox))
		.expect("Sandbox credentials should construct a client.");

	assert!(format!("{client:?}").contains("https://api.storekit-sandbox.itunes.apple.com"));
}
