//! Builders wiring the SQLite adapters into domain services.

use std::sync::Arc;

use chrono::TimeDelta;
use mockable::Clock;

use contact_book::domain::ports::PasswordHasher;
use contact_book::domain::{
    ContactService, CredentialsService, SeedOutcome, UserSeeder, UserSeedingError, Username,
};
use contact_book::inbound::http::state::{HttpState, HttpStatePorts};
use contact_book::outbound::persistence::{DbPool, DieselContactRepository, DieselUserRepository};

/// Build handler state backed by the pooled SQLite store.
pub fn build_http_state(
    pool: &DbPool,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock + Send + Sync>,
    session_ttl: TimeDelta,
) -> HttpState {
    let contacts = Arc::new(ContactService::new(Arc::new(DieselContactRepository::new(
        pool.clone(),
    ))));
    let credentials = Arc::new(CredentialsService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        hasher,
    ));

    HttpState::new(
        HttpStatePorts {
            login: credentials.clone(),
            identity: credentials,
            contacts: contacts.clone(),
            contacts_query: contacts,
        },
        clock,
        session_ttl,
    )
}

/// Create the seed account unless a user with that name already exists.
pub async fn seed_admin(
    pool: &DbPool,
    hasher: Arc<dyn PasswordHasher>,
    username: &Username,
    password: &str,
) -> Result<SeedOutcome, UserSeedingError> {
    let seeder = UserSeeder::new(Arc::new(DieselUserRepository::new(pool.clone())), hasher);
    seeder.ensure_user(username, password).await
}
