/// Settings used to open a [`Connection`](crate::client::Connection).
///
/// Every field is optional; the accessors fall back to the fixed values the
/// demo runs with (a local server on `localhost:27017`, the `root`/`example`
/// account authenticated against `admin`, retryable writes on).
#[derive(Debug, Clone, Default)]
pub struct ConnectionOptions {
    /// Seed list of `(host, port)` pairs.
    hosts: Option<Vec<(String, u16)>>,
    username: Option<String>,
    password: Option<String>,
    /// The database the credential is defined in.
    auth_source: Option<String>,
    /// Whether the driver retries a write once on a transient failure.
    retry_writes: Option<bool>,
    database_name: Option<String>,
    collection_name: Option<String>,
}

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 27017;
pub const DEFAULT_USERNAME: &str = "root";
pub const DEFAULT_PASSWORD: &str = "example";
pub const DEFAULT_AUTH_SOURCE: &str = "admin";

/// Created on first write, never explicitly.
pub const DATABASE_NAME: &str = "samples_java_mongodb";

/// Created on first write, never explicitly.
pub const COLLECTION_NAME: &str = "minimal_deps";

impl ConnectionOptions {
    pub fn builder() -> ConnectionOptionsBuilder {
        ConnectionOptionsBuilder::default()
    }

    pub fn hosts(&self) -> Vec<(String, u16)> {
        self.hosts
            .clone()
            .unwrap_or_else(|| vec![(DEFAULT_HOST.to_string(), DEFAULT_PORT)])
    }

    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_USERNAME)
    }

    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or(DEFAULT_PASSWORD)
    }

    pub fn auth_source(&self) -> &str {
        self.auth_source.as_deref().unwrap_or(DEFAULT_AUTH_SOURCE)
    }

    pub fn retry_writes(&self) -> bool {
        self.retry_writes.unwrap_or(true)
    }

    pub fn database_name(&self) -> &str {
        self.database_name.as_deref().unwrap_or(DATABASE_NAME)
    }

    pub fn collection_name(&self) -> &str {
        self.collection_name.as_deref().unwrap_or(COLLECTION_NAME)
    }

    /// `database.collection`, as shown in the count summary.
    pub fn namespace(&self) -> String {
        format!("{}.{}", self.database_name(), self.collection_name())
    }
}

#[derive(Debug, Default)]
pub struct ConnectionOptionsBuilder {
    options: ConnectionOptions,
}

impl ConnectionOptionsBuilder {
    pub fn host(mut self, host: impl Into<String>, port: u16) -> Self {
        self.options
            .hosts
            .get_or_insert_with(Vec::new)
            .push((host.into(), port));
        self
    }

    pub fn credential(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        auth_source: impl Into<String>,
    ) -> Self {
        self.options.username = Some(username.into());
        self.options.password = Some(password.into());
        self.options.auth_source = Some(auth_source.into());
        self
    }

    pub fn retry_writes(mut self, retry_writes: bool) -> Self {
        self.options.retry_writes = Some(retry_writes);
        self
    }

    pub fn database_name(mut self, name: impl Into<String>) -> Self {
        self.options.database_name = Some(name.into());
        self
    }

    pub fn collection_name(mut self, name: impl Into<String>) -> Self {
        self.options.collection_name = Some(name.into());
        self
    }

    pub fn build(self) -> ConnectionOptions {
        self.options
    }
}
