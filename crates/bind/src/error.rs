use thiserror::Error;

/// Top level error returned by the request decoding helpers in [`crate::request`].
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("error decoding request: {source}")]
    Decode {
        #[from]
        source: BindError,
    },

    #[error("invalid content-type header: {reason}")]
    InvalidContentType { reason: String },
}

impl RequestError {
    pub fn invalid_content_type<S: ToString>(str: S) -> Self {
        Self::InvalidContentType { reason: str.to_string() }
    }
}

#[derive(Debug, Error)]
pub enum BindError {
    #[error("failed to decode `{key}`, got: `{value}` ({expected})")]
    Decode { key: String, value: String, expected: Expected },

    #[error("invalid key `{key}`: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("key `{key}` nests deeper than {max_depth} levels")]
    TooDeep { key: String, max_depth: usize },

    #[error("json error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("xml error: {source}")]
    Xml {
        #[from]
        source: quick_xml::DeError,
    },

    #[error("invalid form data: {source}")]
    Form {
        #[from]
        source: serde_urlencoded::de::Error,
    },
}

impl BindError {
    pub fn decode<K: ToString, V: ToString>(key: K, value: V, expected: Expected) -> Self {
        Self::Decode { key: key.to_string(), value: value.to_string(), expected }
    }

    pub fn invalid_key<K: ToString>(key: K, reason: &'static str) -> Self {
        Self::InvalidKey { key: key.to_string(), reason }
    }

    pub fn too_deep<K: ToString>(key: K, max_depth: usize) -> Self {
        Self::TooDeep { key: key.to_string(), max_depth }
    }
}

/// The scalar kind a raw value failed to coerce into.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    #[error("expected int")]
    Int,

    #[error("expected unsigned int")]
    UnsignedInt,

    #[error("expected decimal")]
    Decimal,

    #[error("expected boolean")]
    Boolean,
}
