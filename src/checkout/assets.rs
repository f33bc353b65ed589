use std::collections::BTreeMap;

use crate::checkout::{
    error::{CheckoutError, conflict, not_found},
    types::{Asset, AssetId},
};

#[derive(Debug, Clone, Default)]
pub struct AssetDirectory {
    assets: BTreeMap<AssetId, Asset>,
}

impl AssetDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_assets(assets: impl IntoIterator<Item = Asset>) -> Self {
        let mut directory = Self::new();
        for asset in assets {
            directory.add(asset);
        }
        directory
    }

    /// Inserts or overwrites by identifier.
    pub fn add(&mut self, asset: Asset) {
        self.assets.insert(asset.id.clone(), asset);
    }

    pub fn find(&self, asset_id: &str) -> Result<&Asset, CheckoutError> {
        self.assets
            .get(asset_id)
            .ok_or_else(|| not_found(format!("asset not found: {asset_id}")))
    }

    pub fn contains(&self, asset_id: &str) -> bool {
        self.assets.contains_key(asset_id)
    }

    /// Flips availability from true to false. Not idempotent: a second call on
    /// the same asset fails with a conflict.
    pub fn mark_borrowed(&mut self, asset_id: &str) -> Result<(), CheckoutError> {
        let asset = self
            .assets
            .get_mut(asset_id)
            .ok_or_else(|| not_found(format!("asset not found: {asset_id}")))?;
        if !asset.available {
            return Err(conflict(format!("asset already borrowed: {asset_id}")));
        }
        asset.available = false;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.values()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
