//! Path tokenizing for the in-memory namespace

/// One step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component<'a> {
    Parent,
    Name(&'a str),
}

/// Whether `path` starts at the root.
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/')
}

/// Split on `/`, dropping empty and `.` components.
pub fn components(path: &str) -> Vec<Component<'_>> {
    path.split('/')
        .filter(|c| !c.is_empty() && *c != ".")
        .map(|c| match c {
            ".." => Component::Parent,
            name => Component::Name(name),
        })
        .collect()
}

/// Split a path into its parent part and final name.
///
/// `"a/b/c"` gives `("a/b", "c")`, `"/c"` gives `("/", "c")`, `"c"` gives
/// `("", "c")`. Trailing slashes are ignored. Returns `None` when there is no
/// final name (`""`, `"/"`, or a path ending in `.` / `..`).
pub fn split_parent(path: &str) -> Option<(&str, &str)> {
    let trimmed = path.trim_end_matches('/');
    let (parent, name) = match trimmed.rfind('/') {
        Some(0) => ("/", &trimmed[1..]),
        Some(i) => (&trimmed[..i], &trimmed[i + 1..]),
        None => ("", trimmed),
    };
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some((parent, name))
}

/// Join a directory path and a child name.
pub fn join(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{}{}", dir, name)
    } else {
        format!("{}/{}", dir, name)
    }
}
