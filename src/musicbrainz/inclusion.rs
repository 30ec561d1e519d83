/// Inclusions every disc query needs to fill in track and artist data.
pub const REQUIRED_INCLUSIONS: [&str; 3] = ["artists", "recordings", "artist-credits"];
pub const RELEASE_GROUPS: &str = "release-groups";

/// Adds the required `inc` flags to `path`, keeping flags it already carries
/// first and in their original order.
pub fn merge_inclusions(path: &str, use_earliest_date: bool) -> String {
    let (base, existing) = split_inclusions(path);

    let mut flags: Vec<&str> = Vec::new();

    for flag in existing {
        push_unique(&mut flags, flag);
    }
    for flag in REQUIRED_INCLUSIONS {
        push_unique(&mut flags, flag);
    }
    if use_earliest_date {
        push_unique(&mut flags, RELEASE_GROUPS);
    }

    let separator = if base.contains('?') { '&' } else { '?' };

    format!("{base}{separator}inc={}", flags.join("+"))
}

fn push_unique<'a>(flags: &mut Vec<&'a str>, flag: &'a str) {
    if !flag.is_empty() && !flags.contains(&flag) {
        flags.push(flag);
    }
}

/// Splits off an `inc=` parameter, returning the rest of the path and its flags.
fn split_inclusions(path: &str) -> (String, Vec<&str>) {
    let (resource, query) = match path.split_once('?') {
        Some((resource, query)) => (resource, query),
        None => return (path.to_string(), Vec::new()),
    };

    let mut flags = Vec::new();
    let mut params = Vec::new();

    for param in query.split('&') {
        match param.strip_prefix("inc=") {
            Some(inc) => flags.extend(inc.split(['+', ' '])),
            None => params.push(param),
        }
    }

    let base = if params.is_empty() {
        resource.to_string()
    } else {
        format!("{resource}?{}", params.join("&"))
    };

    (base, flags)
}
