use mongodb::{Client, Collection, Database};
use std::error::Error;

/// Shared MongoDB handle, opened once at startup and cloned into the
/// actix app data. Connection lifetime = process lifetime.
#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        // Timeouts
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty())
            .unwrap_or("utility_db");

        let db = client.database(db_name);

        // Test connection before accepting traffic
        db.list_collection_names().await?;

        let mongodb = Self { client, db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the query indexes the list endpoints rely on.
    ///
    /// users(email) must stay non-unique: deduplication is an
    /// application-level existence check, and duplicates from
    /// concurrent creates are accepted behavior.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        // Indexes for bills: list filters and the recent-bills sort
        let bills = self.database().collection::<mongodb::bson::Document>("bills");

        let bills_email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .build();

        match bills.create_index(bills_email_index).await {
            Ok(_) => log::info!("   ✅ Index created: bills(email)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        let bills_category_index = IndexModel::builder()
            .keys(doc! { "category": 1 })
            .build();

        match bills.create_index(bills_category_index).await {
            Ok(_) => log::info!("   ✅ Index created: bills(category)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        let bills_date_index = IndexModel::builder()
            .keys(doc! { "date": -1 })
            .build();

        match bills.create_index(bills_date_index).await {
            Ok(_) => log::info!("   ✅ Index created: bills(date desc)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        let users = self.database().collection::<mongodb::bson::Document>("users");

        let users_email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .build();

        match users.create_index(users_email_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(email)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        let payments = self.database().collection::<mongodb::bson::Document>("payments");

        let payments_email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .build();

        match payments.create_index(payments_email_index).await {
            Ok(_) => log::info!("   ✅ Index created: payments(email)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_connection_and_indexes() {
        dotenv::dotenv().ok();

        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/utility_db".to_string());

        let db = MongoDB::new(&uri).await;
        assert!(db.is_ok());
    }
}
