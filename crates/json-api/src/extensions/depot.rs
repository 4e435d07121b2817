//! Depot helper extensions.

use std::any::Any;

use catalog_app::auth::Credential;
use salvo::prelude::{Depot, StatusError};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_credential(&mut self, credential: Credential);

    fn credential_or_401(&self) -> Result<&Credential, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_credential(&mut self, credential: Credential) {
        self.inject(credential);
    }

    fn credential_or_401(&self) -> Result<&Credential, StatusError> {
        self.obtain::<Credential>()
            .map_err(|_ignored| StatusError::unauthorized().brief("Missing credential"))
    }
}
