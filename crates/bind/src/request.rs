//! Request decoding helpers.
//!
//! Glue between a parsed HTTP request and the binders: query strings and form bodies go
//! through the flat tag scanner, JSON and XML bodies straight through serde.

use crate::args::Args;
use crate::error::{BindError, RequestError};
use crate::field::Bind;
use crate::scan::scan_args;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, Uri};
use mime::Mime;
use serde::de::DeserializeOwned;
use tracing::debug;

/// How a request body is decoded, chosen from its `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    /// `application/json` and `application/*+json`
    Json,
    /// `application/xml`, `text/xml` and `*/*+xml`
    Xml,
    /// Everything else is read as `application/x-www-form-urlencoded`
    Form,
}

impl BodyFormat {
    /// Picks the body format from the request headers; a missing `Content-Type` means form data
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, RequestError> {
        let Some(value) = headers.get(CONTENT_TYPE) else {
            return Ok(BodyFormat::Form);
        };

        let value = value.to_str().map_err(RequestError::invalid_content_type)?;
        let mime = value.parse::<Mime>().map_err(RequestError::invalid_content_type)?;

        let is_json = mime.type_() == mime::APPLICATION && (mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON));
        let is_xml = mime.subtype() == mime::XML || mime.suffix() == Some(mime::XML);

        Ok(match (is_json, is_xml) {
            (true, _) => BodyFormat::Json,
            (_, true) => BodyFormat::Xml,
            _ => BodyFormat::Form,
        })
    }
}

/// Decodes a request body into `target` according to its `Content-Type`.
///
/// JSON and XML bodies are deserialized with serde and replace `target` as a whole, so
/// fields absent from the body end up with whatever serde gives them, not their previous
/// value. Mark the type `#[serde(default)]` to accept partial bodies. Any other body is
/// parsed as form data and scanned into the fields annotated in `namespace`, which leaves
/// unmatched fields untouched.
///
/// # Example
/// ```
/// use http::HeaderMap;
/// use micro_bind::{bind_fields, request::decode_body};
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// struct Person {
///     name: String,
///     #[serde(rename = "date_of_birth")]
///     dob: String,
/// }
///
/// bind_fields!(Person {
///     name: url = "name";
///     dob: url = "dob";
/// });
///
/// let mut person = Person::default();
/// decode_body(&HeaderMap::new(), b"name=Ada&dob=1815-12-10", &mut person, "url").unwrap();
/// assert_eq!(person.dob, "1815-12-10");
/// ```
pub fn decode_body<T>(headers: &HeaderMap, body: &[u8], target: &mut T, namespace: &str) -> Result<(), RequestError>
where
    T: Bind + DeserializeOwned,
{
    let format = BodyFormat::from_headers(headers)?;
    debug!(?format, len = body.len(), "decode request body");

    match format {
        BodyFormat::Json => {
            *target = serde_json::from_slice(body).map_err(BindError::from)?;
        }
        BodyFormat::Xml => {
            *target = quick_xml::de::from_reader(body).map_err(BindError::from)?;
        }
        BodyFormat::Form => {
            decode_form(body, target, namespace)?;
        }
    }

    Ok(())
}

/// Parses a form encoded body and scans it into the fields annotated in `namespace`.
pub fn decode_form<T>(body: &[u8], target: &mut T, namespace: &str) -> Result<Vec<&'static str>, RequestError>
where
    T: Bind + ?Sized,
{
    let args = Args::from_bytes(body)?;
    Ok(scan_args(&args, target, namespace)?)
}

/// Scans the query string of `uri` into the fields annotated in `namespace`.
pub fn decode_query<T>(uri: &Uri, target: &mut T, namespace: &str) -> Result<Vec<&'static str>, RequestError>
where
    T: Bind + ?Sized,
{
    let args = Args::from_uri(uri)?;
    Ok(scan_args(&args, target, namespace)?)
}
