//! Cache key builders
//!
//! Keys are `|`-delimited: a namespace followed by scope parts. The cache
//! itself treats them as opaque strings.

pub const SEPARATOR: char = '|';

/// Global platform settings.
pub const PLATFORM_SETTINGS: &str = "platform-settings";

/// Joins a namespace and scope parts into a key.
pub fn scoped(namespace: &str, parts: &[&str]) -> String {
    let mut key = String::from(namespace);
    for part in parts {
        key.push(SEPARATOR);
        key.push_str(part);
    }
    key
}

/// Public site lookup by site id.
pub fn public_site(site_id: &str) -> String {
    scoped("public-site", &[site_id])
}

/// Whether a module is enabled on a public site.
pub fn public_module_enabled(site_id: &str, module_key: &str) -> String {
    scoped("public-module-enabled", &[site_id, module_key])
}
