//! Default-export detection for remote and vendored source files.

use crate::error::InspectError;
use async_trait::async_trait;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Matches `export default ...` and `export { x as default }` style clauses.
static DEFAULT_EXPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*export\s+(?:default\b|\{[^}]*\bdefault\b[^}]*\})")
        .expect("default export pattern is valid")
});

/// Whether `source` exposes a default export.
pub fn has_default_export(source: &str) -> bool {
    DEFAULT_EXPORT.is_match(source)
}

/// Answers whether a module file exposes a conventional default export.
#[async_trait]
pub trait ExportInspector: Send + Sync {
    /// Inspect the file served at `url`.
    async fn remote_has_default_export(&self, url: &str) -> Result<bool, InspectError>;

    /// Inspect a file on disk.
    ///
    /// A missing file is reported as an error for which
    /// [`InspectError::is_not_found`] holds.
    async fn local_has_default_export(&self, path: &Path) -> Result<bool, InspectError> {
        let source = tokio::fs::read_to_string(path).await?;
        Ok(has_default_export(&source))
    }
}

/// [`ExportInspector`] fetching remote sources over HTTP.
#[cfg(feature = "network")]
#[derive(Debug, Clone)]
pub struct HttpInspector {
    client: reqwest::Client,
}

#[cfg(feature = "network")]
impl HttpInspector {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "network")]
impl Default for HttpInspector {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

#[cfg(feature = "network")]
#[async_trait]
impl ExportInspector for HttpInspector {
    async fn remote_has_default_export(&self, url: &str) -> Result<bool, InspectError> {
        tracing::debug!("Inspecting exports of {url}");
        let source = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(has_default_export(&source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_default_export_forms() {
        assert!(has_default_export("export default function serve() {}"));
        assert!(has_default_export("const a = 1;\nexport default a;\n"));
        assert!(has_default_export("export { default } from \"./mod.ts\";"));
        assert!(has_default_export("export { app as default, Router };"));
    }

    #[test]
    fn ignores_named_exports_and_mentions() {
        assert!(!has_default_export("export const defaultPort = 8000;"));
        assert!(!has_default_export("export * from \"./mod.ts\";"));
        assert!(!has_default_export("// export default is not used here"));
        assert!(!has_default_export("export { defaults } from \"./config.ts\";"));
    }

    #[cfg(feature = "network")]
    #[tokio::test]
    async fn local_inspection_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let inspector = HttpInspector::default();

        let err = inspector
            .local_has_default_export(&dir.path().join("absent.ts"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let file = dir.path().join("mod.ts");
        std::fs::write(&file, "export default 42;\n").unwrap();
        assert!(inspector.local_has_default_export(&file).await.unwrap());
    }

    #[cfg(feature = "network")]
    #[tokio::test]
    async fn remote_inspection_fetches_source() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/x/oak/mod.ts")
            .with_status(200)
            .with_header("content-type", "application/typescript")
            .with_body("export { Application as default } from \"./app.ts\";\n")
            .create_async()
            .await;

        let inspector = HttpInspector::default();
        let url = format!("{}/x/oak/mod.ts", server.url());
        assert!(inspector.remote_has_default_export(&url).await.unwrap());
    }

    #[cfg(feature = "network")]
    #[tokio::test]
    async fn remote_inspection_propagates_http_errors() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/missing.ts")
            .with_status(404)
            .create_async()
            .await;

        let inspector = HttpInspector::default();
        let url = format!("{}/missing.ts", server.url());
        let err = inspector.remote_has_default_export(&url).await.unwrap_err();
        assert!(matches!(err, InspectError::Http(_)));
        assert!(err.is_not_found());
    }
}
