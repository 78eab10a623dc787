const DEFAULT_NAME: &str = "User";

// ASCII word characters only, like a `\w` regex class
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Display name guessed from an email: `jane.doe@x` becomes `Jane Doe`.
pub fn derive_display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let mut name = String::with_capacity(local.len());
    let mut previous: Option<char> = None;
    for c in local.chars() {
        let c = if c == '.' || c == '_' { ' ' } else { c };
        if is_word_char(c) && !previous.is_some_and(is_word_char) {
            name.push(c.to_ascii_uppercase());
        } else {
            name.push(c);
        }
        previous = Some(c);
    }
    name
}

/// Name used at sign-in: the typed one, else one derived from the email,
/// else `User`.
pub fn resolve_display_name(email: &str, display_name: &str) -> String {
    let typed = display_name.trim();
    if !typed.is_empty() {
        return typed.to_string();
    }
    let derived = derive_display_name(email);
    if !derived.is_empty() {
        return derived;
    }
    DEFAULT_NAME.to_string()
}

pub(crate) fn non_empty_or_default(name: String) -> String {
    if name.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_display_name() {
        assert_eq!(derive_display_name("jane.doe@example.com"), "Jane Doe");
        assert_eq!(derive_display_name("john_smith@example.com"), "John Smith");
        assert_eq!(derive_display_name("mary-ann@example.com"), "Mary-Ann");
        assert_eq!(derive_display_name("a.b2c@example.com"), "A B2c");
        assert_eq!(derive_display_name("@example.com"), "");
    }

    #[test]
    fn test_derive_display_name_non_ascii() {
        assert_eq!(derive_display_name("élodie.martin@example.com"), "éLodie Martin");
        assert_eq!(derive_display_name("zoë_ng@example.com"), "Zoë Ng");
    }

    #[test]
    fn test_resolve_display_name() {
        assert_eq!(resolve_display_name("jane.doe@example.com", "  Janie "), "Janie");
        assert_eq!(resolve_display_name("jane.doe@example.com", "   "), "Jane Doe");
        assert_eq!(resolve_display_name("@example.com", ""), "User");
    }
}
