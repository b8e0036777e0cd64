//! Track `Location` URI decoding

use std::path::PathBuf;
use url::Url;

/// Where a library track lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A file on the local filesystem (decoded path)
    Local(PathBuf),

    /// Anything that is not a `file://` URI (streamed or cloud tracks).
    /// `scheme` is empty when the value is not a URI at all.
    Remote { scheme: String },
}

/// Convert a `Location` value to a filesystem path when it is a `file://` URI.
///
/// Any host part (`file://localhost/...`) is ignored. The raw path text is
/// percent-decoded and otherwise kept as written: `..` segments and
/// backslashes are not normalized, and `/Music/A%20B.mp3` becomes
/// `/Music/A B.mp3`.
pub fn parse_location(uri: &str) -> Location {
    let url = match Url::parse(uri) {
        Ok(url) => url,
        Err(e) => {
            log::debug!("Location {:?} is not a URI: {}", uri, e);
            return Location::Remote {
                scheme: String::new(),
            };
        }
    };

    if url.scheme() != "file" {
        return Location::Remote {
            scheme: url.scheme().to_string(),
        };
    }

    let decoded = urlencoding::decode_binary(raw_path(uri).as_bytes());
    Location::Local(PathBuf::from(String::from_utf8_lossy(&decoded).into_owned()))
}

/// Path part of a URI as written: after `scheme:` and any `//authority`,
/// up to a query or fragment.
fn raw_path(uri: &str) -> &str {
    let rest = uri.find(':').map_or(uri, |i| &uri[i + 1..]);
    let rest = match rest.strip_prefix("//") {
        Some(after) => after.find('/').map_or("", |i| &after[i..]),
        None => rest,
    };
    rest.split(|c| c == '?' || c == '#').next().unwrap_or(rest)
}
