//! Turns `[id] Title.ext` into a name that is safe to save on any common filesystem.

/// Longest file name accepted by most filesystems.
pub const NAME_MAX: usize = 255;

const ALLOWED_PUNCTUATION: &str = "-_.()[] ";

pub fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || ALLOWED_PUNCTUATION.contains(c)
}

/// Normalizes a suggested file name of the form `[id] title.ext`.
///
/// A single-word title before a colon (`BERT: Pre-training ...`) is moved into
/// parentheses, every other disallowed character becomes `_`, and the result is
/// cut so that it fits in [`NAME_MAX`] characters with the extension intact.
/// The `[id]` prefix is expected exactly once, so feeding the output back in is
/// not guaranteed to give the same name.
pub fn normalize(raw: &str) -> String {
    let prefix = match raw.split_once(']') {
        Some((head, _)) => format!("{head}]"),
        None => format!("{raw}]"),
    };
    let rest = raw.replace(&prefix, "");
    let (base, ext) = split_extension(rest.trim_matches(is_space));
    let base = base.trim_matches(is_space);

    let base = match short_title(base) {
        Some((title, remaining)) => format!("({title}) {remaining}"),
        None => base.to_string(),
    };
    let base: String = base
        .chars()
        .map(|c| if is_allowed(c) { c } else { '_' })
        .collect();

    fit(&format!("{prefix} {base}"), ext)
}

/// Splits `Name: rest` into its short title and the trimmed rest, when the part
/// before the first colon is a single word. All-lowercase short titles are capitalized.
pub fn short_title(title: &str) -> Option<(String, &str)> {
    let (head, rest) = title.split_once(':')?;
    if head.contains(' ') {
        return None;
    }
    let head = if is_lowercase(head) {
        capitalize(head)
    } else {
        head.to_string()
    };
    Some((head, rest.trim_matches(is_space)))
}

// Unicode whitespace plus the ASCII information separators (\x1c-\x1f).
fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

// Has at least one cased character and no uppercase ones.
fn is_lowercase(s: &str) -> bool {
    s.chars().any(char::is_lowercase) && !s.chars().any(char::is_uppercase)
}

/// Title-cases the first character (`ß` -> `Ss`, `ǆ` -> `ǅ`) and keeps the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out = titlecase(first);
            out.extend(chars);
            out
        }
        None => String::new(),
    }
}

fn titlecase(c: char) -> String {
    match c {
        'Ǆ' | 'ǅ' | 'ǆ' => "ǅ".to_string(),
        'Ǉ' | 'ǈ' | 'ǉ' => "ǈ".to_string(),
        'Ǌ' | 'ǋ' | 'ǌ' => "ǋ".to_string(),
        'Ǳ' | 'ǲ' | 'ǳ' => "ǲ".to_string(),
        _ => {
            let mut upper = c.to_uppercase();
            let mut out: String = upper.next().into_iter().collect();
            out.extend(upper.flat_map(char::to_lowercase));
            out
        }
    }
}

/// Splits off the extension of the last path component. A leading run of dots
/// (`.hidden`) does not count as an extension.
fn split_extension(name: &str) -> (&str, &str) {
    let start = name.rfind('/').map_or(0, |i| i + 1);
    match name.rfind('.') {
        Some(dot) if dot > start && name[start..dot].chars().any(|c| c != '.') => {
            name.split_at(dot)
        }
        _ => (name, ""),
    }
}

fn fit(name: &str, ext: &str) -> String {
    let ext_len = ext.chars().count();
    if ext_len >= NAME_MAX {
        return ext.chars().take(NAME_MAX).collect();
    }
    let mut out: String = name.chars().take(NAME_MAX - ext_len).collect();
    out.push_str(ext);
    out
}
