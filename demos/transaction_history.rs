//! Fetches and prints the transaction history of one purchase.
//!
//! ```sh
//! export ASSA_ISSUER="57246542-96fe-1a63-e053-0824d011072a"
//! export ASSA_KEY_ID="2X9R4HXF34"
//! export ASSA_BUNDLE_ID="com.example.testbundleid2021"
//! export ASSA_PRIVATE_KEY_PATH="AuthKey_2X9R4HXF34.p8"
//!
//! cargo run --example transaction_history -- <transaction-id>
//! ```

// std
use std::{env, fs};
// crates.io
use color_eyre::Result;
// self
use appstore_server_api::{
	api::Client,
	config::{Credentials, Environment},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let transaction_id = env::args().nth(1).unwrap_or_else(|| "10002".into());
	let private_key = fs::read_to_string(env::var("ASSA_PRIVATE_KEY_PATH")?)?;
	let credentials = Credentials::new(
		env::var("ASSA_ISSUER")?,
		env::var("ASSA_KEY_ID")?,
		env::var("ASSA_BUNDLE_ID")?,
		private_key,
	)
	.with_environment(Environment::Sandbox);
	let client = Client::new(credentials)?;
	let history = client.get_transaction_history(&transaction_id, true).await?;

	println!("revision: {}", history.revision);
	println!("has more: {}", history.has_more);

	for transaction in &history.signed_transactions {
		println!(
			"{} {} x{} (line item {})",
			transaction.transaction_id,
			transaction.product_id,
			transaction.quantity,
			transaction.web_order_line_item_id,
		);
	}

	Ok(())
}
