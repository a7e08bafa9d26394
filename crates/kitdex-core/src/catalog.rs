//! Static dataset injected into the registry builder.
//!
//! The catalog names the candidate identifiers to validate upstream, maps
//! identifiers to categories, lists the identifiers whose examples are split
//! across several files, and carries the package installation guides.
//! [`Catalog::default`] describes Composer Kit.

use serde::Serialize;

/// Category assigned to identifiers absent from the category map.
pub const DEFAULT_CATEGORY: &str = "Other";

/// An identifier whose examples live in several named files instead of `basic.tsx`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSet {
    /// Component identifier.
    pub identifier: String,
    /// Example file names under the component's examples directory, in probe order.
    pub files: Vec<String>,
}

/// How to install the component package with one package manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationGuide {
    /// `npm`, `yarn`, `pnpm` or `bun`.
    pub package_manager: String,
    /// Full install command.
    pub install_command: String,
    /// Ordered setup instructions.
    pub setup_steps: Vec<String>,
    /// Requirements and caveats.
    pub notes: Vec<String>,
}

/// Read-only product dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Human-readable product name used in generated descriptions.
    pub product_name: String,
    /// Package that exports every component.
    pub package_name: String,
    /// Candidate identifiers, in the order results are reported.
    pub known_components: Vec<String>,
    /// Lowercase identifier to category.
    pub categories: Vec<(String, String)>,
    /// Identifiers with multi-file examples.
    pub variants: Vec<VariantSet>,
    /// Installation guides keyed by package manager name.
    pub installation_guides: Vec<InstallationGuide>,
}

impl Catalog {
    /// Category for `identifier`, or [`DEFAULT_CATEGORY`] when unmapped.
    pub fn category_for(&self, identifier: &str) -> &str {
        let needle = identifier.to_lowercase();
        self.categories
            .iter()
            .find(|(name, _)| *name == needle)
            .map_or(DEFAULT_CATEGORY, |(_, category)| category.as_str())
    }

    /// Variant files for `identifier`, if it is a multi-variant identifier.
    pub fn variants_for(&self, identifier: &str) -> Option<&VariantSet> {
        self.variants.iter().find(|v| v.identifier == identifier)
    }

    /// Installation guide for `package_manager`, ignoring case.
    pub fn installation_guide(&self, package_manager: &str) -> Option<&InstallationGuide> {
        self.installation_guides
            .iter()
            .find(|g| g.package_manager.eq_ignore_ascii_case(package_manager))
    }

    /// Names of the supported package managers.
    pub fn package_managers(&self) -> Vec<&str> {
        self.installation_guides
            .iter()
            .map(|g| g.package_manager.as_str())
            .collect()
    }

    /// Default install command, using the first listed package manager.
    pub fn install_command(&self) -> String {
        self.installation_guides.first().map_or_else(
            || format!("npm install {}", self.package_name),
            |g| g.install_command.clone(),
        )
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let package_name = "@composer-kit/ui".to_string();
        let known_components = [
            "address",
            "balance",
            "identity",
            "nft",
            "payment",
            "swap",
            "token-select",
            "transaction",
            "wallet",
        ]
        .map(String::from)
        .to_vec();

        let categories = [
            ("address", "Core Components"),
            ("balance", "Core Components"),
            ("identity", "Core Components"),
            ("wallet", "Wallet Integration"),
            ("connect", "Wallet Integration"),
            ("payment", "Payment & Transactions"),
            ("transaction", "Payment & Transactions"),
            ("swap", "Payment & Transactions"),
            ("tokenselect", "Token Management"),
            ("token-select", "Token Management"),
            ("nftcard", "NFT Components"),
            ("nft-card", "NFT Components"),
            ("nftmint", "NFT Components"),
            ("nft-mint", "NFT Components"),
        ]
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .to_vec();

        let variants = vec![VariantSet {
            identifier: "nft".to_string(),
            files: vec!["mint.tsx".to_string(), "preview.tsx".to_string()],
        }];

        let installation_guides = [
            ("npm", "npm install"),
            ("yarn", "yarn add"),
            ("pnpm", "pnpm add"),
            ("bun", "bun add"),
        ]
        .map(|(pm, verb)| installation_guide(pm, verb, &package_name))
        .to_vec();

        Self {
            product_name: "Composer Kit".to_string(),
            package_name,
            known_components,
            categories,
            variants,
            installation_guides,
        }
    }
}

fn installation_guide(package_manager: &str, verb: &str, package: &str) -> InstallationGuide {
    InstallationGuide {
        package_manager: package_manager.to_string(),
        install_command: format!("{verb} {package}"),
        setup_steps: vec![
            format!("Install the package: {verb} {package}"),
            format!("Import the stylesheet once in your app entry: import \"{package}/style.css\";"),
            "Wrap your app in <ComposerKitProvider> with your wagmi config".to_string(),
            format!("Import components where needed, e.g. import {{ Wallet }} from \"{package}\";"),
        ],
        notes: vec![
            "Requires React 18 or newer".to_string(),
            "Components target Celo networks via wagmi and viem".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_identifier_is_other() {
        let catalog = Catalog::default();
        assert_eq!(catalog.category_for("unknown-name"), "Other");
        assert_eq!(catalog.category_for("nft"), "Other");
    }

    #[test]
    fn test_category_lookup_ignores_case() {
        let catalog = Catalog::default();
        assert_eq!(catalog.category_for("Wallet"), "Wallet Integration");
        assert_eq!(catalog.category_for("TOKEN-SELECT"), "Token Management");
    }

    #[test]
    fn test_exactly_one_multi_variant_identifier() {
        let catalog = Catalog::default();
        let multi: Vec<_> = catalog
            .known_components
            .iter()
            .filter(|id| catalog.variants_for(id).is_some())
            .collect();
        assert_eq!(multi, ["nft"]);
        assert_eq!(
            catalog.variants_for("nft").map(|v| v.files.clone()),
            Some(vec!["mint.tsx".to_string(), "preview.tsx".to_string()])
        );
    }

    #[test]
    fn test_installation_guides() {
        let catalog = Catalog::default();
        assert_eq!(catalog.package_managers(), ["npm", "yarn", "pnpm", "bun"]);
        assert_eq!(catalog.install_command(), "npm install @composer-kit/ui");
        assert_eq!(
            catalog.installation_guide("PNPM").map(|g| g.install_command.as_str()),
            Some("pnpm add @composer-kit/ui")
        );
        assert!(catalog.installation_guide("cargo").is_none());
    }
}
