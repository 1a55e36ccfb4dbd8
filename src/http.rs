//! Small helpers for talking to the dashboard's HTTP backend.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cookie::Cookie;
use percent_encoding::percent_decode_str;
use thiserror::Error;

/// Cookie that carries the anti-forgery token.
pub const CSRF_COOKIE: &str = "csrftoken";
/// Header the backend expects the token echoed in.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Extracts the CSRF token from a `Cookie` header value.
///
/// The last `csrftoken` cookie wins; its value is percent-decoded.
pub fn csrf_token(cookie_header: &str) -> Option<String> {
    Cookie::split_parse_encoded(cookie_header)
        .filter_map(Result::ok)
        .filter(|cookie| cookie.name() == CSRF_COOKIE)
        .last()
        .map(|cookie| cookie.value().trim_matches('"').to_string())
        .filter(|token| !token.is_empty())
}

/// Picks the download filename out of a `Content-Disposition` header.
///
/// `filename*=UTF-8''...` wins over `filename=`. Directory components are
/// stripped so the name can be joined onto a target directory safely.
pub fn attachment_filename(content_disposition: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in content_disposition.split(';').skip(1) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let encoded = value
                    .split_once("''")
                    .map(|(_, rest)| rest)
                    .unwrap_or(value);
                extended = Some(
                    percent_decode_str(encoded.trim_matches('"'))
                        .decode_utf8_lossy()
                        .into_owned(),
                );
            }
            "filename" => plain = Some(value.trim_matches('"').to_string()),
            _ => {}
        }
    }

    extended
        .or(plain)
        .and_then(|name| sanitize_filename(&name))
}

fn sanitize_filename(name: &str) -> Option<String> {
    let base = name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "." || base == ".." {
        None
    } else {
        Some(base.to_string())
    }
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("no usable filename for download")]
    MissingFilename,

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes a downloaded body into `dir` and returns the file path.
///
/// The filename comes from `content_disposition` when it names one, otherwise
/// `fallback` is used.
pub fn save_download(
    dir: &Path,
    content_disposition: Option<&str>,
    fallback: &str,
    bytes: &[u8],
) -> Result<PathBuf, DownloadError> {
    let name = content_disposition
        .and_then(attachment_filename)
        .or_else(|| sanitize_filename(fallback))
        .ok_or(DownloadError::MissingFilename)?;

    let path = dir.join(name);
    fs::write(&path, bytes).map_err(|source| DownloadError::Io {
        path: path.clone(),
        source,
    })?;
    log::info!("Saved download to {}", path.display());

    Ok(path)
}
