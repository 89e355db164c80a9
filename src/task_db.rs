use log::info;
use mongodb::{options::ClientOptions, Client, Database};

pub struct MongoDB {
    pub db: Database,
}

impl MongoDB {
    pub async fn init(uri: &str, db_name: &str) -> mongodb::error::Result<Self> {
        let client_options = ClientOptions::parse(uri).await?;
        let db = Client::with_options(client_options)?.database(db_name);
        info!("Using MongoDB database {}", db_name);
        Ok(MongoDB { db })
    }
}
