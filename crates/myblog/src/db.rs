//! MongoDB database connection and configuration

use mongodb::bson::doc;
use mongodb::{options::ClientOptions, Client, Database, IndexModel};

use crate::models::Collection;

/// Database used when the connection string does not name one
pub const DEFAULT_DATABASE: &str = "myBlogApp";

/// MongoDB database wrapper
#[derive(Clone)]
pub struct MongoDb {
    #[allow(dead_code)]
    client: Client,
    db: Database,
}

impl MongoDb {
    /// Build a client for `uri` without touching the network.
    ///
    /// The database is `db_name` when given, otherwise the one named in the
    /// connection string, otherwise [`DEFAULT_DATABASE`].
    pub async fn open(uri: &str, db_name: Option<&str>) -> anyhow::Result<Self> {
        let options = ClientOptions::parse(uri).await?;
        let name = db_name
            .map(str::to_string)
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        let client = Client::with_options(options)?;
        let db = client.database(&name);

        Ok(Self { client, db })
    }

    /// Connect to MongoDB, verifying the connection and ensuring indexes
    pub async fn connect(uri: &str, db_name: Option<&str>) -> anyhow::Result<Self> {
        let instance = Self::open(uri, db_name).await?;

        instance.ping().await?;
        tracing::info!("Connected to MongoDB: {}", instance.db.name());

        instance.ensure_indexes().await?;

        Ok(instance)
    }

    /// Get collection
    pub fn collection<T>(&self, name: &str) -> mongodb::Collection<T> {
        self.db.collection(name)
    }

    /// Ping the database to check connection
    pub async fn ping(&self) -> anyhow::Result<()> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    /// Ensure the listing index exists on every content collection
    pub async fn ensure_indexes(&self) -> anyhow::Result<()> {
        tracing::info!("Ensuring MongoDB indexes...");

        for collection in Collection::ALL {
            self.create_indexes(
                collection.store_name(),
                vec![IndexModel::builder()
                    .keys(doc! { "createdAt": -1 })
                    .build()],
            )
            .await?;
        }

        tracing::info!("MongoDB indexes ensured successfully");
        Ok(())
    }

    async fn create_indexes(&self, collection: &str, indexes: Vec<IndexModel>) -> anyhow::Result<()> {
        let coll = self.db.collection::<mongodb::bson::Document>(collection);
        coll.create_indexes(indexes, None).await?;
        Ok(())
    }
}

/// Collection names as stored in MongoDB
pub mod collections {
    pub const NEWS: &str = "yangiliklarPageCardData";
    pub const VIDEOS: &str = "videolarPageCardData";
    pub const MATERIALS_VIDEO: &str = "materiallarPageVideoCardData";
    pub const MATERIALS_SURAT: &str = "materiallarPageSuratCardData";
    pub const MATERIALS_AUDIO: &str = "materiallarPageAudioCardData";
    pub const MATERIALS_MATN: &str = "materiallarPageMatnCardData";
    pub const ADMIN: &str = "adminPageCardData";
    pub const COMMENTS: &str = "profilPageCommentData";
}
