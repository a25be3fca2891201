//! Library API client
//!
//! `LibraryClient` fetches books and orders from the remote catalog API and
//! serves paginated views of the order collection from an in-memory cache.

mod error;
mod request;
mod token;

pub use error::LibraryError;
pub use token::{StaticTokenProvider, TokenProvider, PLACEHOLDER_TOKEN};

use std::sync::Arc;

use reqwest::Client;
use tokio::sync::Mutex;

use crate::cache::CacheManager;
use crate::config::{ClientConfig, DEFAULT_ORDERS_EXPIRATION_MINUTES};
use crate::data::{Book, Order};
use crate::paging::{self, PagedList};

/// Cache key for the order collection
pub const ORDERS_CACHE_KEY: &str = "orders";

/// Page size used by [`LibraryClient::list_orders`]
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Page number used by [`LibraryClient::list_orders`]
pub const DEFAULT_PAGE_NUMBER: usize = 1;

/// Cache of the full, unpaginated order collection
pub type OrdersCache = CacheManager<Arc<Vec<Order>>>;

/// Client for the library catalog and order API
///
/// Clones share the HTTP connection pool, the order cache and the fetch guard.
#[derive(Clone)]
pub struct LibraryClient {
    /// HTTP client for making requests
    http_client: Client,
    /// API root without a trailing slash
    base_url: String,
    /// Order collection cache
    cache: OrdersCache,
    /// Held while fetching orders so concurrent misses share one request
    orders_fetch: Arc<Mutex<()>>,
    /// Source of tokens for `acquire_token`
    tokens: Arc<dyn TokenProvider>,
    /// Sliding expiration for cached orders
    orders_expiration: chrono::Duration,
}

impl LibraryClient {
    /// Creates a client for the API rooted at `base_url` with default settings
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: CacheManager::new(),
            orders_fetch: Arc::new(Mutex::new(())),
            tokens: Arc::new(StaticTokenProvider::default()),
            orders_expiration: chrono::Duration::minutes(DEFAULT_ORDERS_EXPIRATION_MINUTES),
        }
    }

    /// Creates a client from a configuration, building its HTTP client
    ///
    /// # Returns
    /// * `Err(LibraryError::Transport)` - If the HTTP client cannot be built
    pub fn from_config(config: &ClientConfig) -> Result<Self, LibraryError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self::new(config.base_url.as_str())
            .with_client(http_client)
            .with_orders_expiration(config.orders_expiration))
    }

    /// Replaces the HTTP client
    pub fn with_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// Uses a shared cache instead of a private one
    pub fn with_cache(mut self, cache: OrdersCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_token_provider(mut self, provider: impl TokenProvider + 'static) -> Self {
        self.tokens = Arc::new(provider);
        self
    }

    pub fn with_orders_expiration(mut self, expiration: chrono::Duration) -> Self {
        self.orders_expiration = expiration;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Fetches every book in the catalog
    ///
    /// # Returns
    /// * `Ok(Vec<Book>)` - Books in the order the API returned them
    /// * `Err(LibraryError)` - Transport, status or decode failure
    pub async fn list_books(&self, token: &str) -> Result<Vec<Book>, LibraryError> {
        let request = self.http_client.get(self.url("books"));
        let response = request::send(request, token).await?;
        let books: Vec<Book> = request::decode(response).await?;

        tracing::info!(count = books.len(), "fetched books");
        Ok(books)
    }

    /// Adds a book to the catalog
    ///
    /// The response body is ignored.
    pub async fn add_book(&self, book: &Book, token: &str) -> Result<(), LibraryError> {
        let request = self.http_client.post(self.url("books")).json(book);
        request::send(request, token).await?;

        tracing::info!(id = book.id, "added book");
        Ok(())
    }

    /// First page of orders with the default page size
    pub async fn list_orders(&self, token: &str) -> Result<PagedList<Order>, LibraryError> {
        self.list_orders_paged(token, DEFAULT_PAGE_SIZE, DEFAULT_PAGE_NUMBER)
            .await
    }

    /// Returns one page of orders
    ///
    /// The full order collection is fetched once and cached with a sliding
    /// expiration; every page is sliced from that cached collection.
    ///
    /// # Arguments
    /// * `token` - Bearer token, used only if the cache misses
    /// * `page_size` - Orders per page, at least 1
    /// * `page_number` - 1-based page number
    ///
    /// # Returns
    /// * `Ok(PagedList<Order>)` - The requested page
    /// * `Err(LibraryError::InvalidPage)` - If either page argument is zero
    /// * `Err(LibraryError)` - Transport, status or decode failure on a miss
    pub async fn list_orders_paged(
        &self,
        token: &str,
        page_size: usize,
        page_number: usize,
    ) -> Result<PagedList<Order>, LibraryError> {
        paging::validate(page_size, page_number)?;

        let orders = self.cached_orders(token).await?;
        Ok(PagedList::create(orders.as_slice(), page_size, page_number)?)
    }

    /// Returns the cached order collection, fetching it on a miss
    async fn cached_orders(&self, token: &str) -> Result<Arc<Vec<Order>>, LibraryError> {
        if let Some(cached) = self.cache.read(ORDERS_CACHE_KEY) {
            tracing::debug!(expires_at = %cached.expires_at, "orders cache hit");
            return Ok(cached.data);
        }

        let _guard = self.orders_fetch.lock().await;

        // Another caller may have filled the cache while we waited
        if let Some(cached) = self.cache.read(ORDERS_CACHE_KEY) {
            tracing::debug!("orders cache filled by concurrent fetch");
            return Ok(cached.data);
        }

        tracing::debug!("orders cache miss");
        let request = self.http_client.get(self.url("orders"));
        let response = request::send(request, token).await?;
        let orders: Arc<Vec<Order>> = Arc::new(request::decode(response).await?);

        self.cache
            .write(ORDERS_CACHE_KEY, Arc::clone(&orders), self.orders_expiration);

        tracing::info!(count = orders.len(), "fetched orders");
        Ok(orders)
    }

    /// Acquires a token from the configured provider
    pub async fn acquire_token(&self) -> String {
        self.tokens.acquire_token().await
    }
}

impl std::fmt::Debug for LibraryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryClient")
            .field("base_url", &self.base_url)
            .field("orders_expiration", &self.orders_expiration)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paging::PageError;

    /// Nothing listens on port 1, so any request that gets sent fails
    const UNREACHABLE: &str = "http://127.0.0.1:1/api";

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = LibraryClient::new("https://example.com/api/");

        assert_eq!(client.base_url(), "https://example.com/api");
        assert_eq!(client.url("books"), "https://example.com/api/books");
    }

    #[tokio::test]
    async fn test_zero_page_number_fails_before_fetching() {
        let client = LibraryClient::new(UNREACHABLE);

        let err = client.list_orders_paged("token", 25, 0).await.unwrap_err();

        assert!(matches!(err, LibraryError::InvalidPage(PageError::ZeroPageNumber)));
    }

    #[tokio::test]
    async fn test_zero_page_size_fails_before_fetching() {
        let client = LibraryClient::new(UNREACHABLE);

        let err = client.list_orders_paged("token", 0, 1).await.unwrap_err();

        assert!(matches!(err, LibraryError::InvalidPage(PageError::ZeroPageSize)));
    }

    #[tokio::test]
    async fn test_cached_orders_skip_the_network() {
        let cache = OrdersCache::new();
        let orders: Vec<Order> = (0..30)
            .map(|i| Order {
                order_id: Some(format!("order-{i}")),
                order_lines: Vec::new(),
            })
            .collect();
        cache.write(ORDERS_CACHE_KEY, Arc::new(orders), chrono::Duration::minutes(60));

        let client = LibraryClient::new(UNREACHABLE).with_cache(cache);
        let page = client.list_orders_paged("token", 25, 2).await.unwrap();

        assert_eq!(page.items().len(), 5);
        assert_eq!(page.items()[0].order_id.as_deref(), Some("order-25"));
        assert!(page.has_previous_page());
        assert!(!page.has_next_page());
    }

    #[tokio::test]
    async fn test_unreachable_api_is_a_transport_error() {
        let client = LibraryClient::new(UNREACHABLE);

        let err = client.list_books("token").await.unwrap_err();

        assert!(matches!(err, LibraryError::Transport(_)));
        assert!(err.status().is_none());
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_cache_empty() {
        let cache = OrdersCache::new();
        let client = LibraryClient::new(UNREACHABLE).with_cache(cache.clone());

        assert!(client.list_orders("token").await.is_err());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_acquire_token_uses_provider() {
        let client = LibraryClient::new(UNREACHABLE);
        assert_eq!(client.acquire_token().await, PLACEHOLDER_TOKEN);

        let client = client.with_token_provider(StaticTokenProvider::new("issued"));
        assert_eq!(client.acquire_token().await, "issued");
    }

    #[test]
    fn test_from_config_applies_settings() {
        let config = ClientConfig::new("http://localhost:8080/api/")
            .with_orders_expiration(chrono::Duration::minutes(5));

        let client = LibraryClient::from_config(&config).unwrap();

        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(client.orders_expiration, chrono::Duration::minutes(5));
    }
}
