use reqwest::Method;
use std::borrow::Cow;

use crate::{errors::ConversionError, id::RecordId};

/// Placeholder replaced by [`PathSpec::with_id`]
const ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSpec {
    pub path: Cow<'static, str>,
    pub method: Method,
}

impl PathSpec {
    pub const fn get(path: &'static str) -> Self {
        Self {
            path: Cow::Borrowed(path),
            method: Method::GET,
        }
    }

    pub const fn post(path: &'static str) -> Self {
        Self {
            path: Cow::Borrowed(path),
            method: Method::POST,
        }
    }

    pub const fn put(path: &'static str) -> Self {
        Self {
            path: Cow::Borrowed(path),
            method: Method::PUT,
        }
    }

    pub const fn delete(path: &'static str) -> Self {
        Self {
            path: Cow::Borrowed(path),
            method: Method::DELETE,
        }
    }

    /// Returns a copy with the `{id}` segment filled in by the encoded id
    pub fn with_id(&self, id: &RecordId) -> Result<Self, ConversionError> {
        debug_assert!(
            self.has_id_placeholder(),
            "path does not take an id: {}",
            self.path
        );
        let segment = id.as_path_segment()?;
        Ok(Self {
            path: Cow::Owned(self.path.replace(ID_PLACEHOLDER, &segment)),
            method: self.method.clone(),
        })
    }

    pub fn has_id_placeholder(&self) -> bool {
        self.path.contains(ID_PLACEHOLDER)
    }
}
