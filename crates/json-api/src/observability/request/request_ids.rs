//! Request correlation ids.

use std::fmt::{Display, Formatter, Result as FmtResult};

use salvo::{http::header::HeaderValue, prelude::Response};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Correlation id for one request, echoed in `x-request-id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RequestId(String);

impl RequestId {
    /// Keep a caller-supplied id when it is short printable ASCII, otherwise
    /// mint a fresh one.
    pub(super) fn from_header(value: Option<&str>) -> Self {
        value
            .map(str::trim)
            .filter(|value| is_acceptable(value))
            .map_or_else(Self::generate, |value| Self(value.to_owned()))
    }

    fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    pub(super) fn write_header(&self, res: &mut Response) {
        match HeaderValue::from_str(self.as_str()) {
            Ok(value) => {
                res.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
            Err(source) => {
                warn!(request_id = %self, "could not encode request id header: {source}");
            }
        }
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}
