use crate::auth::{MemoryRealm, MemorySessionManager};
use crate::cli::actions::Action;
use crate::middleware::AuthBinding;
use crate::server;
use anyhow::{anyhow, Result};
use std::sync::Arc;
use tracing::info;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server { port, accounts } => {
            let realm = MemoryRealm::new();

            for account in &accounts {
                let (id, secret) = account
                    .split_once(':')
                    .ok_or_else(|| anyhow!("invalid account, expected id:secret: {account}"))?;
                realm.register(id, secret);
            }

            info!("Seeded {} account(s) into the in-memory realm", accounts.len());

            let binding =
                AuthBinding::new(Arc::new(realm), Arc::new(MemorySessionManager::new()));

            server::new(port, binding).await?;
        }
    }

    Ok(())
}
