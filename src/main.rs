use minimal_deps::obs::logger::{LogLevel, StdoutLogger};
use minimal_deps::{Connection, ConnectionOptions, DocumentStoreDemo, Result};
use tracing_subscriber::EnvFilter;

// Browse the result at http://localhost:8081/db/samples_java_mongodb/minimal_deps/
// (mongo-express). The menu with id 'fileFromJSON' holds menu.popup.menuitem.1.value
// as a string, the one with id 'fileFromCode' as an ISODate.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let logger = StdoutLogger::plain(LogLevel::Info);
    let connection = Connection::open(ConnectionOptions::default(), logger.clone())?;

    let demo = DocumentStoreDemo::new(connection.collection(), logger);
    demo.run()?;
    Ok(())
}
