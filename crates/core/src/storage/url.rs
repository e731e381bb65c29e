//! Public URL resolution.

/// `https://{cdn_hostname}/{path}`. Independent of the storage host that accepted the write.
#[must_use]
pub fn public_url(cdn_hostname: &str, path: &str) -> String {
    let host = cdn_hostname
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    format!("https://{host}/{path}")
}
