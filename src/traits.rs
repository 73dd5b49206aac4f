use async_trait::async_trait;

/// Where committed URL changes go.
///
/// In the storefront this is the router's client-side navigation; every
/// navigation re-runs the collection query, which is why price edits are
/// debounced before reaching it.
#[async_trait]
pub trait Navigator: Send + Sync + 'static {
    /// Navigate to `to`, a `path?query` link.
    async fn navigate(&self, to: String);
}
