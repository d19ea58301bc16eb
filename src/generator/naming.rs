use std::collections::HashSet;

use tracing::warn;

/// Suffix stripped from endpoint names when building URLs and service names.
const ENDPOINT_SUFFIX: &str = "Controller";

/// Lower the first character: `OrderLines` -> `orderLines`, `ID` -> `iD`.
pub fn to_camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `OrdersController` -> `Orders`; names without the suffix are kept.
pub fn endpoint_stem(simple_name: &str) -> &str {
    match simple_name.strip_suffix(ENDPOINT_SUFFIX) {
        Some(stem) if !stem.is_empty() => stem,
        _ => simple_name,
    }
}

/// Data service class name for an endpoint: `OrdersController` -> `OrdersService`.
pub fn service_name(endpoint_simple_name: &str) -> String {
    format!("{}Service", endpoint_stem(endpoint_simple_name))
}

/// Reserve a unique output name, appending `_1`, `_2`, ... on collision.
///
/// Names are compared case-insensitively since they become file names.
pub fn unique_name(seen: &mut HashSet<String>, name: &str) -> String {
    if seen.insert(name.to_lowercase()) {
        return name.to_string();
    }
    let mut i = 1;
    loop {
        let candidate = format!("{name}_{i}");
        if seen.insert(candidate.to_lowercase()) {
            warn!(name, renamed = %candidate, "Duplicate output name");
            return candidate;
        }
        i += 1;
    }
}
