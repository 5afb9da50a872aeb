use crate::collection::MongoCollection;
use crate::error::{Error, Result};
use crate::obs::logger::LoggerAndTracer;
use crate::options::options::ConnectionOptions;
use crate::{debug, event};
use bson::{doc, Document};
use mongodb::options::{ClientOptions, Credential, ServerAddress};
use mongodb::sync::Client;
use std::sync::Arc;

/// An authenticated session with a MongoDB deployment.
///
/// Opened once, then shut down when dropped, on the success path as well as
/// when an error propagates out of the caller. Handles derived from it should
/// be dropped first.
pub struct Connection {
    client: Client,
    options: ConnectionOptions,
    logger: Arc<dyn LoggerAndTracer>,
}

impl Connection {
    /// Builds the client and checks that the server is reachable and accepts
    /// the credential. The driver connects lazily, so the check is a `ping`
    /// run against the authentication database.
    pub fn open(options: ConnectionOptions, logger: Arc<dyn LoggerAndTracer>) -> Result<Connection> {
        let client_options = to_client_options(&options)?;
        let client = Client::with_options(client_options).map_err(Error::Connection)?;

        tracing::debug!(
            hosts = ?options.hosts(),
            auth_source = options.auth_source(),
            retry_writes = options.retry_writes(),
            "pinging deployment"
        );
        client
            .database(options.auth_source())
            .run_command(doc! { "ping": 1 })
            .run()
            .map_err(Error::Connection)?;

        tracing::info!(hosts = ?options.hosts(), "connected");
        event!(logger, "connection open, hosts={:?}, user={}", options.hosts(), options.username());

        Ok(Connection {
            client,
            options,
            logger,
        })
    }

    /// The configured collection. Neither it nor its database need to exist yet.
    pub fn collection(&self) -> MongoCollection {
        MongoCollection::new(
            self.client
                .database(self.options.database_name())
                .collection::<Document>(self.options.collection_name()),
        )
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        debug!(self.logger, "Closing connection to {:?}", self.options.hosts());
        // Ends the server sessions and waits for the driver's background tasks.
        // Handles derived from the client are unusable afterwards.
        self.client.clone().shutdown().run();
        tracing::info!(hosts = ?self.options.hosts(), "connection closed");
        event!(self.logger, "connection closed, hosts={:?}", self.options.hosts());
    }
}

fn to_client_options(options: &ConnectionOptions) -> Result<ClientOptions> {
    let hosts = options
        .hosts()
        .into_iter()
        .map(|(host, port)| ServerAddress::parse(format!("{}:{}", host, port)))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::Connection)?;

    if hosts.is_empty() {
        return Err(Error::InvalidRequest("At least one host is required".to_string()));
    }

    let credential = Credential::builder()
        .username(options.username().to_string())
        .password(options.password().to_string())
        .source(options.auth_source().to_string())
        .build();

    Ok(ClientOptions::builder()
        .hosts(hosts)
        .credential(credential)
        .retry_writes(options.retry_writes())
        .app_name(env!("CARGO_PKG_NAME").to_string())
        .build())
}
