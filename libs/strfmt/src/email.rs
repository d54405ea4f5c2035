//! RFC 5322 `addr-spec` validation.
//!
//! Only the bare address is accepted: no display name, no angle brackets, no
//! comments or folding whitespace. Non-ASCII characters are permitted in atoms.

/// Returns true if `s` is a mailbox address such as `someone@example.com`.
pub fn is_email(s: &str) -> bool {
    let domain = if s.starts_with('"') {
        match quoted_local_part_len(s) {
            Some(len) => match s[len..].strip_prefix('@') {
                Some(domain) => domain,
                None => return false,
            },
            None => return false,
        }
    } else {
        match s.rsplit_once('@') {
            Some((local, domain)) if is_dot_atom(local) => domain,
            _ => return false,
        }
    };

    is_domain(domain)
}

/// Length in bytes of a leading quoted string, including both quotes.
fn quoted_local_part_len(s: &str) -> Option<usize> {
    let mut chars = s.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some(i + 1),
            '\\' => {
                let (_, escaped) = chars.next()?;
                if !(is_vchar(escaped) || escaped == ' ' || escaped == '\t') {
                    return None;
                }
            }
            c if is_qtext(c) || c == ' ' || c == '\t' => {}
            _ => return None,
        }
    }
    None
}

fn is_domain(domain: &str) -> bool {
    if let Some(literal) = domain.strip_prefix('[') {
        return literal
            .strip_suffix(']')
            .is_some_and(|inner| inner.chars().all(is_dtext));
    }
    is_dot_atom(domain)
}

fn is_dot_atom(s: &str) -> bool {
    !s.is_empty()
        && s
            .split('.')
            .all(|atom| !atom.is_empty() && atom.chars().all(is_atext))
}

fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '#'
                | '$'
                | '%'
                | '&'
                | '\''
                | '*'
                | '+'
                | '-'
                | '/'
                | '='
                | '?'
                | '^'
                | '_'
                | '`'
                | '{'
                | '|'
                | '}'
                | '~'
        )
        || is_utf8_non_ascii(c)
}

fn is_qtext(c: char) -> bool {
    matches!(c, '\x21' | '\x23'..='\x5b' | '\x5d'..='\x7e') || is_utf8_non_ascii(c)
}

fn is_dtext(c: char) -> bool {
    matches!(c, '\x21'..='\x5a' | '\x5e'..='\x7e') || is_utf8_non_ascii(c)
}

fn is_vchar(c: char) -> bool {
    matches!(c, '\x21'..='\x7e') || is_utf8_non_ascii(c)
}

fn is_utf8_non_ascii(c: char) -> bool {
    !c.is_ascii() && !c.is_control() && !c.is_whitespace()
}
