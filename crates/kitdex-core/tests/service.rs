#![allow(clippy::unwrap_used)]

use kitdex_core::{Catalog, ComponentService, Config};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ADDRESS_EXAMPLE: &str = r#"// Display a shortened wallet address
import { Address } from "@composer-kit/ui";

interface AddressProps {
  address: string;
  isTruncated?: boolean;
}

export default function AddressBasic() {
  return <Address address="0x1234" isTruncated />;
}
"#;

async fn serve(server: &MockServer, repo_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/acme/kit/main/{repo_path}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn not_found_elsewhere(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

fn service_with(server: &MockServer, catalog: Catalog) -> ComponentService {
    let mut config = Config::default();
    config.source.raw_base_url = server.uri();
    config.source.owner = "acme".to_string();
    config.source.repo = "kit".to_string();
    config.fetch.timeout_secs = 5;
    ComponentService::new(config, catalog).unwrap()
}

/// address, wallet and swap as basic examples; nft with both variants;
/// balance only as a package source; nothing else.
async fn kit_server() -> MockServer {
    let server = MockServer::start().await;
    mount_kit(&server).await;
    server
}

async fn mount_kit(server: &MockServer) {
    serve(server, "apps/docs/examples/address/basic.tsx", ADDRESS_EXAMPLE).await;
    serve(server, "apps/docs/examples/wallet/basic.tsx", "// Connect\nexport {}").await;
    serve(server, "apps/docs/examples/swap/basic.tsx", "export {}").await;
    serve(server, "apps/docs/examples/nft/mint.tsx", "// Mint\nexport {}").await;
    serve(server, "apps/docs/examples/nft/preview.tsx", "// Preview\nexport {}").await;
    serve(
        server,
        "packages/ui/src/balance/index.ts",
        "export type BalanceProps = { precision?: number; };",
    )
    .await;
    not_found_elsewhere(server).await;
}

#[tokio::test]
async fn test_lists_discovered_components_in_catalog_order() {
    let server = kit_server().await;
    let service = service_with(&server, Catalog::default());

    let names: Vec<_> = service
        .list_components()
        .await
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["address", "balance", "nft", "swap", "wallet"]);
}

#[tokio::test]
async fn test_address_has_single_basic_example() -> anyhow::Result<()> {
    let server = kit_server().await;
    let service = service_with(&server, Catalog::default());

    let address = service.get_component("address").await?.unwrap();
    assert_eq!(address.examples.len(), 1);
    assert_eq!(address.examples[0].name, "address-basic");
    assert_eq!(address.examples[0].description, "Display a shortened wallet address");
    assert_eq!(address.source_code.as_deref(), Some(ADDRESS_EXAMPLE));

    let props: Vec<_> = address.props.iter().map(|p| (p.name.as_str(), p.required)).collect();
    assert_eq!(props, [("address", true), ("isTruncated", false)]);

    assert_eq!(address.display_name, "Address");
    assert_eq!(address.category, "Core Components");
    assert_eq!(address.description, "Composer Kit address component for Celo dApps");
    assert_eq!(address.file_path.as_deref(), Some("packages/ui/src/address"));
    assert_eq!(address.dependencies, ["@composer-kit/ui"]);
    assert_eq!(
        address.installation_command.as_deref(),
        Some("npm install @composer-kit/ui")
    );
    assert_eq!(
        address.documentation_url.as_deref(),
        Some("https://github.com/acme/kit")
    );
    assert!(address.last_updated.is_some());
    Ok(())
}

#[tokio::test]
async fn test_nft_has_one_example_per_variant() -> anyhow::Result<()> {
    let server = kit_server().await;
    let service = service_with(&server, Catalog::default());

    let nft = service.get_component("nft").await?.unwrap();
    let names: Vec<_> = nft.examples.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["nft-mint", "nft-preview"]);
    assert_eq!(nft.category, "Other");
    Ok(())
}

#[tokio::test]
async fn test_package_only_component_gets_placeholder_example() -> anyhow::Result<()> {
    let server = kit_server().await;
    let service = service_with(&server, Catalog::default());

    let balance = service.get_component("balance").await?.unwrap();
    assert_eq!(balance.examples.len(), 1);
    assert_eq!(balance.examples[0].name, "balance-basic");
    assert_eq!(
        balance.examples[0].description,
        "Basic usage example for balance component"
    );
    assert!(balance.examples[0].code.contains("<Balance />"));
    assert_eq!(balance.props.len(), 1);
    assert_eq!(balance.props[0].name, "precision");
    Ok(())
}

#[tokio::test]
async fn test_component_with_nothing_upstream_still_builds() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    not_found_elsewhere(&server).await;
    let service = service_with(&server, Catalog::default());

    let component = service.builder().build_component("button").await?;
    assert_eq!(component.name, "button");
    assert!(component.source_code.is_none());
    assert!(component.props.is_empty());
    assert_eq!(component.examples.len(), 1);
    assert_eq!(component.examples[0].name, "button-basic");
    assert_eq!(component.examples[0].file_path, "examples/button-basic.tsx");
    Ok(())
}

#[tokio::test]
async fn test_lookup_ignores_case_and_rejects_unknown() -> anyhow::Result<()> {
    let server = kit_server().await;
    let service = service_with(&server, Catalog::default());

    for name in ["WALLET", "Wallet", "wallet"] {
        assert_eq!(
            service.get_component(name).await?.map(|c| c.name),
            Some("wallet".to_string())
        );
    }
    for name in ["button", "identity", "composer-kit-wallet"] {
        assert!(service.get_component(name).await?.is_none(), "{name}");
    }
    assert!(service.get_component("   ").await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_blank_search_matches_nothing() {
    let server = kit_server().await;
    let service = service_with(&server, Catalog::default());

    assert!(!service.list_components().await.is_empty());
    assert!(service.search_components("").await.is_empty());
    assert!(service.search_components("   ").await.is_empty());
    assert_eq!(service.search_components("Core Comp").await.len(), 2);
}

#[tokio::test]
async fn test_categories_partition_the_listing() {
    let server = kit_server().await;
    let service = service_with(&server, Catalog::default());

    let all = service.list_components().await;
    let mut recovered = Vec::new();
    for category in service.categories().await {
        let in_category = service.get_components_by_category(&category.to_uppercase()).await;
        let expected: Vec<_> = all
            .iter()
            .filter(|c| c.category.eq_ignore_ascii_case(&category))
            .cloned()
            .collect();
        assert_eq!(in_category, expected);
        recovered.extend(in_category.into_iter().map(|c| c.name));
    }
    recovered.sort();
    let mut names: Vec<_> = all.into_iter().map(|c| c.name).collect();
    names.sort();
    assert_eq!(recovered, names);
}

#[tokio::test]
async fn test_second_listing_does_not_fetch() {
    let server = kit_server().await;
    let service = service_with(&server, Catalog::default());

    let first = service.list_components().await;
    let fetched = server.received_requests().await.unwrap().len();
    assert!(fetched > 0);

    let second = service.list_components().await;
    assert_eq!(server.received_requests().await.unwrap().len(), fetched);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_clear_cache_forces_refetch() {
    let server = kit_server().await;
    let service = service_with(&server, Catalog::default());

    service.list_components().await;
    let fetched = server.received_requests().await.unwrap().len();

    let cached = service.cache_stats().await.entries;
    assert!(cached > 0);
    assert_eq!(service.clear_cache().await, cached);
    assert_eq!(service.cache_stats().await.entries, 0);
    assert_eq!(service.clear_cache().await, 0);
    service.list_components().await;
    assert!(server.received_requests().await.unwrap().len() > fetched);
}

#[tokio::test]
async fn test_concurrent_callers_share_one_build() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/acme/kit/main/apps/docs/examples/swap/basic.tsx"))
        .respond_with(ResponseTemplate::new(200).set_body_string("export {}"))
        .expect(1)
        .mount(&server)
        .await;
    let catalog = Catalog {
        known_components: vec!["swap".to_string()],
        ..Catalog::default()
    };
    let service = std::sync::Arc::new(service_with(&server, catalog));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = std::sync::Arc::clone(&service);
            tokio::spawn(async move { service.registry().await })
        })
        .collect();
    let mut registries = Vec::new();
    for handle in handles {
        registries.push(handle.await.unwrap());
    }
    assert!(registries.windows(2).all(|w| std::sync::Arc::ptr_eq(&w[0], &w[1])));
}

#[tokio::test]
async fn test_invalid_identifier_is_omitted() {
    let server = MockServer::start().await;
    // `../x` escapes the examples root once the URL is normalized
    serve(&server, "apps/docs/x/basic.tsx", "export {}").await;
    serve(&server, "apps/docs/examples/swap/basic.tsx", "export {}").await;
    not_found_elsewhere(&server).await;

    let catalog = Catalog {
        known_components: vec!["../x".to_string(), "swap".to_string()],
        ..Catalog::default()
    };
    let service = service_with(&server, catalog);

    let names: Vec<_> = service.list_components().await.into_iter().map(|c| c.name).collect();
    assert_eq!(names, ["swap"]);
}

#[tokio::test]
async fn test_debug_access_report() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    serve(&server, "README.md", "# Kit").await;
    mount_kit(&server).await;
    let service = service_with(&server, Catalog::default());

    let report = service.debug_access().await;
    assert_eq!(report.repo_owner, "acme");
    assert_eq!(report.known_components.len(), 9);
    assert!(report.test_results.readme_access.success);

    let json = serde_json::to_value(&report)?;
    assert_eq!(json["test_results"]["component_discovery"]["components_found"], 5);
    assert_eq!(json["test_results"]["readme_access"]["content_length"], 5);
    assert!(json["test_results"]["readme_access"].get("error").is_none());
    Ok(())
}

#[tokio::test]
async fn test_debug_access_reports_missing_readme() {
    let server = kit_server().await;
    let service = service_with(&server, Catalog::default());

    let readme = service.debug_access().await.test_results.readme_access;
    assert!(!readme.success);
    assert_eq!(readme.content_length, 0);
    assert!(readme.error.is_none());
}

#[tokio::test]
async fn test_huge_ttl_does_not_overflow() {
    let server = kit_server().await;
    let mut config = Config::default();
    config.source.raw_base_url = server.uri();
    config.source.owner = "acme".to_string();
    config.source.repo = "kit".to_string();
    config.cache.default_ttl_secs = u64::MAX;
    config.cache.registry_ttl_secs = u64::MAX;
    let service = ComponentService::new(config, Catalog::default()).unwrap();

    assert_eq!(service.list_components().await.len(), 5);
    let fetched = server.received_requests().await.unwrap().len();
    service.list_components().await;
    assert_eq!(server.received_requests().await.unwrap().len(), fetched);
}
