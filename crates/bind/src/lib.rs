//! Request parameter binding for micro web services
//!
//! This crate turns the flat, repeatable key/value pairs of URL query strings and
//! `application/x-www-form-urlencoded` bodies into strongly-typed values. It does not read
//! sockets or route requests; it consumes an [`Args`] multimap and produces either a
//! populated value or a [`BindError`].
//!
//! # Binders
//!
//! Two independent binders read the same [`Args`]:
//!
//! - The **flat tag scanner** ([`scan_args`]) fills struct fields that carry a binding key
//!   annotation, declared with [`bind_fields!`]. Scalars, `Option`s of scalars, sequences of
//!   scalars and raw byte sequences are supported.
//! - The **nested-key tree builder** ([`from_args`], [`TreeBuilder`]) parses PHP style
//!   bracket keys such as `filter[price][min]=10` and `tags[]=a`, merges them into one JSON
//!   tree and decodes it with serde by field name.
//!
//! # Example
//!
//! ```
//! use micro_bind::{bind_fields, from_args, scan_args, Args};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default)]
//! struct Order {
//!     symbol: String,
//!     quantity: u32,
//!     price: f64,
//!     tags: Vec<String>,
//! }
//!
//! bind_fields!(Order {
//!     symbol: url = "tradingsymbol";
//!     quantity: url = "quantity";
//!     price: url = "price";
//!     tags: url = "tag";
//! });
//!
//! let args = Args::parse("tradingsymbol=INFY&quantity=10&price=1520.5&tag=a&tag=b").unwrap();
//! let mut order = Order::default();
//! scan_args(&args, &mut order, "url").unwrap();
//! assert_eq!(order.quantity, 10);
//! assert_eq!(order.tags, ["a", "b"]);
//!
//! #[derive(Deserialize)]
//! struct Search {
//!     filter: Filter,
//! }
//!
//! #[derive(Deserialize)]
//! struct Filter {
//!     min: u32,
//!     sizes: Vec<String>,
//! }
//!
//! let args = Args::parse("filter[min]=10&filter[sizes][]=S&filter[sizes][]=M").unwrap();
//! let search: Search = from_args(&args).unwrap();
//! assert_eq!(search.filter.min, 10);
//! assert_eq!(search.filter.sizes, ["S", "M"]);
//! ```
//!
//! # Error Handling
//!
//! - [`BindError`]: errors of both binders
//! - [`Expected`]: the scalar kind a raw value failed to coerce into
//! - [`RequestError`]: errors of the [`request`] helpers
//!
//! Missing keys are never errors; the corresponding fields keep their values.

mod args;
mod coerce;
mod error;
mod field;
mod macros;
mod nested;
mod scan;
mod utils;

pub mod request;

pub use args::Args;
pub use coerce::Coerce;
pub use error::{BindError, Expected, RequestError};
pub use field::{Bind, Field, FieldRef, Rejected, Shape};
pub use nested::{from_args, to_json, to_tree, TreeBuilder, DEFAULT_MAX_DEPTH};
pub use scan::{scan_args, Tag, IGNORE};
