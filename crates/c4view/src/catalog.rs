//! The list of views shown on the start page.

use log::{debug, error};

use c4view_core::model::{ViewCatalog, ViewSummary};

use crate::{C4ViewError, client::BackendClient, config::CatalogSource};

/// The views of the Big Bank example model, which the backend serves by default.
pub fn builtin_catalog() -> ViewCatalog {
    let summary = |id: &str, name: &str| ViewSummary {
        description: Some(String::new()),
        ..ViewSummary::new(id, name)
    };

    ViewCatalog {
        landscapes: vec![summary("SystemLandscape", "System Landscape")],
        contexts: vec![summary(
            "SystemContext",
            "Internet Banking System - System Context",
        )],
        containers: vec![summary(
            "Containers",
            "Internet Banking System - Containers",
        )],
        components: vec![summary(
            "Components",
            "Internet Banking System - API Application - Components",
        )],
    }
}

/// Loads the catalog from the configured source.
///
/// # Errors
///
/// Propagates fetch errors when the source is [`CatalogSource::Backend`].
pub async fn load_catalog(
    source: CatalogSource,
    client: &BackendClient,
) -> Result<ViewCatalog, C4ViewError> {
    match source {
        CatalogSource::Builtin => Ok(builtin_catalog()),
        CatalogSource::Backend => {
            let catalog = client.fetch_catalog().await.inspect_err(|err| {
                error!(err:% = err; "Failed to fetch view catalog");
            })?;
            debug!(views_len = catalog.len(); "View catalog fetched");
            Ok(catalog)
        }
    }
}

#[cfg(test)]
mod tests {
    use c4view_core::model::ViewKind;

    use super::*;

    #[test]
    fn test_builtin_catalog_has_one_view_per_kind() {
        let catalog = builtin_catalog();

        assert_eq!(catalog.len(), 4);
        for kind in ViewKind::ALL {
            assert_eq!(catalog.views(kind).len(), 1);
        }
        assert_eq!(catalog.views(ViewKind::Container)[0].id, "Containers");
    }

    #[tokio::test]
    async fn test_builtin_source_does_not_touch_backend() {
        // Nothing listens on this port; the builtin source must not fetch.
        let client = BackendClient::new(&crate::config::BackendConfig::new(
            "http://127.0.0.1:9",
            1,
            false,
        ))
        .unwrap();

        let catalog = load_catalog(CatalogSource::Builtin, &client).await.unwrap();
        assert_eq!(catalog, builtin_catalog());
    }
}
