//! String helpers for identifiers and display names

/// Prefixes users commonly put in front of component names.
const NAME_PREFIXES: [&str; 3] = ["composer-kit-", "composer-", "ck-"];

/// Title-case a string: uppercase the first letter of each alphabetic run,
/// lowercase the rest.
///
/// ```
/// use kitdex_core::utils::title_case;
///
/// assert_eq!(title_case("token-select"), "Token-Select");
/// assert_eq!(title_case("nft"), "Nft");
/// ```
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// JSX-friendly component name for an identifier: hyphens removed, then title-cased.
///
/// ```
/// use kitdex_core::utils::component_class_name;
///
/// assert_eq!(component_class_name("token-select"), "Tokenselect");
/// ```
pub fn component_class_name(identifier: &str) -> String {
    title_case(&identifier.replace('-', ""))
}

/// Normalize free-form user input to a likely identifier.
///
/// Trims, lowercases and strips one well-known product prefix.
///
/// ```
/// use kitdex_core::utils::normalize_component_name;
///
/// assert_eq!(normalize_component_name("  Composer-Kit-Wallet "), "wallet");
/// assert_eq!(normalize_component_name("ck-token-select"), "token-select");
/// ```
pub fn normalize_component_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    NAME_PREFIXES
        .iter()
        .find_map(|prefix| lowered.strip_prefix(prefix))
        .map_or_else(|| lowered.clone(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("address"), "Address");
        assert_eq!(title_case("WALLET"), "Wallet");
        assert_eq!(title_case("nft card"), "Nft Card");
        assert_eq!(title_case("token2select"), "Token2Select");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_component_class_name() {
        assert_eq!(component_class_name("nft"), "Nft");
        assert_eq!(component_class_name("token-select"), "Tokenselect");
    }

    #[test]
    fn test_normalize_strips_single_prefix() {
        assert_eq!(normalize_component_name("composer-kit-address"), "address");
        assert_eq!(normalize_component_name("composer-balance"), "balance");
        assert_eq!(normalize_component_name("swap"), "swap");
        assert_eq!(normalize_component_name("ck-ck-swap"), "ck-swap");
    }
}
