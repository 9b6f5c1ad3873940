use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::{LinstorError, LinstorResult};

/// Path, query and body parameters of one request.
///
/// Values are stored exactly as given. Percent encoding happens when the
/// final URL is assembled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams {
    /// Values for the `{name}` placeholders of the URL template.
    pub path: BTreeMap<String, String>,
    /// Query pairs, in order. Repeated keys express arrays.
    pub query: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<Value>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a path placeholder value.
    pub fn path(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path.insert(name.into(), value.into());
        self
    }

    /// Appends a query pair.
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Appends a query pair if `value` is present.
    pub fn query_opt(self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Appends one query pair per value, repeating the key.
    pub fn query_all<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query
            .extend(values.into_iter().map(|value| (name.to_string(), value.into())));
        self
    }

    /// Sets the JSON body.
    pub fn body<B: Serialize + ?Sized>(mut self, body: &B) -> LinstorResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Names of the placeholders in a URL template, in order.
pub fn placeholders(template: &str) -> LinstorResult<Vec<&str>> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| {
            LinstorError::InvalidEndpoint(format!("unclosed placeholder in '{template}'"))
        })?;
        let name = &after[..close];
        if name.is_empty() || name.contains('{') {
            return Err(LinstorError::InvalidEndpoint(format!(
                "malformed placeholder in '{template}'"
            )));
        }
        names.push(name);
        rest = &after[close + 1..];
    }
    Ok(names)
}

/// Replaces every placeholder of one path segment with its raw value.
fn expand_segment(
    template: &str,
    segment: &str,
    path: &BTreeMap<String, String>,
) -> LinstorResult<String> {
    let mut expanded = String::with_capacity(segment.len());
    let mut rest = segment;
    while let Some(open) = rest.find('{') {
        expanded.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| {
            LinstorError::InvalidEndpoint(format!("unclosed placeholder in '{template}'"))
        })?;
        let name = &after[..close];
        let value = path.get(name).ok_or_else(|| {
            LinstorError::InvalidEndpoint(format!(
                "missing path parameter '{name}' for '{template}'"
            ))
        })?;
        expanded.push_str(value);
        rest = &after[close + 1..];
    }
    expanded.push_str(rest);
    Ok(expanded)
}

/// Builds the request URL for `template` below `base`.
///
/// The template must be an absolute path without query or fragment. Each
/// expanded segment is percent encoded, so a value containing `/` or `?`
/// stays inside its segment. A segment expanding to `.` or `..` is rejected.
pub fn build_url(base: &Url, template: &str, params: &RequestParams) -> LinstorResult<Url> {
    if !template.starts_with('/') {
        return Err(LinstorError::InvalidEndpoint(format!(
            "endpoint must start with '/': '{template}'"
        )));
    }
    if template.contains('?') || template.contains('#') {
        return Err(LinstorError::InvalidEndpoint(format!(
            "endpoint must not include query or fragment: '{template}'"
        )));
    }
    placeholders(template)?;

    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            LinstorError::InvalidEndpoint(format!("controller URL cannot be a base: {base}"))
        })?;
        segments.pop_if_empty();
        for segment in template[1..].split('/') {
            let expanded = expand_segment(template, segment, &params.path)?;
            // The url crate drops dot segments instead of encoding them.
            if expanded == "." || expanded == ".." {
                return Err(LinstorError::InvalidEndpoint(format!(
                    "path value '{expanded}' is not allowed in '{template}'"
                )));
            }
            segments.push(&expanded);
        }
    }

    if !params.query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(params.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    Ok(url)
}
