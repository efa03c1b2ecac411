//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! Converting programs retrieved by URI
//!
//! `http`/`https` URIs are downloaded, `file` URIs and plain paths are read
//! from disk. Retrieval is the only asynchronous step; the conversion itself
//! runs synchronously once the text is available.

use url::Url;

use super::{Conversion, ConversionOptions, parse_xml};
use crate::error::{Error, Result};

/// Retrieve the text behind `uri`
///
/// # Errors
/// Returns [`Error::Fetch`] if the resource cannot be retrieved, including
/// HTTP error statuses.
pub async fn fetch_text(uri: &str) -> Result<String> {
    let fetch_error = |message: String| Error::Fetch {
        uri: uri.to_string(),
        message,
    };

    match Url::parse(uri) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            let response = reqwest::get(url)
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(|e| fetch_error(e.to_string()))?;
            response.text().await.map_err(|e| fetch_error(e.to_string()))
        }
        Ok(url) if url.scheme() == "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| fetch_error("not a local file path".to_string()))?;
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| fetch_error(e.to_string()))
        }
        Ok(url) if url.scheme().len() > 1 => {
            Err(fetch_error(format!("unsupported scheme '{}'", url.scheme())))
        }
        // Relative paths and Windows drive letters
        _ => tokio::fs::read_to_string(uri)
            .await
            .map_err(|e| fetch_error(e.to_string())),
    }
}

/// Fetch and convert a program
///
/// Fetched programs are always converted with the full envelope. Any failure,
/// whether retrieving or converting, is logged and gives `None`.
pub async fn parse_file(uri: &str, options: &ConversionOptions) -> Option<Conversion> {
    let text = match fetch_text(uri).await {
        Ok(text) => text,
        Err(err) => {
            tracing::error!("Failed to fetch uri: {}", uri);
            tracing::debug!("{}", err);
            return None;
        }
    };

    let options = ConversionOptions {
        share: true,
        ..*options
    };
    match parse_xml(text.as_str(), &options) {
        Ok(conversion) => Some(conversion),
        Err(err) => {
            tracing::error!("Failed to convert {}: {}", uri, err);
            None
        }
    }
}
