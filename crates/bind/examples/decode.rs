//! Binds a query string given on the command line with both binders.
//!
//! ```text
//! cargo run --example decode -- 'name=Ada&email=ada%40example.com&dob=1815-12-10&address[city]=London'
//! ```

use micro_bind::{bind_fields, from_args, scan_args, Args};
use serde::Deserialize;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Request {
    name: String,
    email: String,
    #[serde(rename = "date_of_birth")]
    dob: String,
    location: String,
    address: Address,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Address {
    city: String,
    zip: String,
}

impl micro_bind::Field for Address {}

bind_fields!(Request {
    name: url = "name";
    email: url = "email";
    dob: url = "dob";
    location: url = "location";
    address;
});

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let query = std::env::args().nth(1).unwrap_or_else(|| "name=Ada&dob=1815-12-10&address[city]=London".into());

    let args = match Args::parse(&query) {
        Ok(args) => args,
        Err(e) => {
            error!(cause = %e, "invalid query string");
            return;
        }
    };

    let mut flat = Request::default();
    match scan_args(&args, &mut flat, "url") {
        Ok(matched) => info!(?matched, request = ?flat, "flat scan"),
        Err(e) => error!(cause = %e, "flat scan failed"),
    }

    match from_args::<Request>(&args) {
        Ok(nested) => info!(request = ?nested, "nested decode"),
        Err(e) => error!(cause = %e, "nested decode failed"),
    }
}
