//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use countdown_app::domain::shops::ShopDomain;

const SHOP_DEPOT_KEY: &str = "shop";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_shop(&mut self, shop: ShopDomain);

    fn shop_or_401(&self) -> Result<ShopDomain, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_shop(&mut self, shop: ShopDomain) {
        self.insert(SHOP_DEPOT_KEY, shop);
    }

    fn shop_or_401(&self) -> Result<ShopDomain, StatusError> {
        self.get::<ShopDomain>(SHOP_DEPOT_KEY)
            .cloned()
            .map_err(|_ignored| StatusError::unauthorized().brief("No shop session"))
    }
}
