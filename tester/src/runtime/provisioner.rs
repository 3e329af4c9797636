//! Admin Provisioner
//!
//! Typed wrapper over [`SolrAdmin`] that remembers what it created so
//! teardown can run in the only safe order: collections first, then the
//! config sets they were bound to.

use std::path::PathBuf;

use shared::{Collection, ConfigBundle, Stage, stage_info, stage_warn};

use crate::error::{TesterError, TesterResult};
use crate::traits::SolrAdmin;

#[derive(Debug, Clone, PartialEq, Eq)]
struct LiveCollection {
    name: String,
    config_name: String,
}

pub struct Provisioner<'a> {
    admin: &'a dyn SolrAdmin,
    configset_root: PathBuf,
    configs: Vec<String>,
    collections: Vec<LiveCollection>,
}

impl<'a> Provisioner<'a> {
    pub fn new(admin: &'a dyn SolrAdmin, configset_root: impl Into<PathBuf>) -> Self {
        Self {
            admin,
            configset_root: configset_root.into(),
            configs: Vec::new(),
            collections: Vec::new(),
        }
    }

    /// Upload `{configset_root}/{name}` as config set `name`
    pub async fn create_config(&mut self, name: &str) -> TesterResult<ConfigBundle> {
        let source_dir = self.configset_root.join(name);
        if !source_dir.is_dir() {
            return Err(TesterError::MissingConfigSet { path: source_dir });
        }

        self.admin.create_config(name, &source_dir).await?;
        self.configs.push(name.to_string());
        Ok(ConfigBundle::new(name, source_dir))
    }

    pub async fn create_collection(
        &mut self,
        bundle: &ConfigBundle,
        name: &str,
        num_shards: u32,
    ) -> TesterResult<Collection> {
        self.admin.create_collection(bundle.name(), name, num_shards).await?;
        self.collections.push(LiveCollection {
            name: name.to_string(),
            config_name: bundle.name().to_string(),
        });
        Ok(Collection::new(name, bundle.name(), num_shards))
    }

    /// Delete a collection; the handle is consumed either way
    pub async fn delete_collection(&mut self, collection: Collection) -> TesterResult<()> {
        self.delete_collection_by_name(collection.name()).await
    }

    /// Delete a config set; refused while a live collection still uses it.
    ///
    /// The handle is only borrowed so a refused delete can be retried once
    /// the collections are gone. A refused config also stays tracked for `teardown`.
    pub async fn delete_config(&mut self, bundle: &ConfigBundle) -> TesterResult<()> {
        self.delete_config_by_name(bundle.name()).await
    }

    /// Collections created through this provisioner and not yet deleted
    pub fn live_collections(&self) -> Vec<&str> {
        self.collections.iter().map(|c| c.name.as_str()).collect()
    }

    /// Config sets created through this provisioner and not yet deleted
    pub fn live_configs(&self) -> Vec<&str> {
        self.configs.iter().map(String::as_str).collect()
    }

    /// Delete everything still live, collections before configs.
    ///
    /// Keeps going after a failure and returns the first error. A config set
    /// whose collection could not be deleted is left in place.
    pub async fn teardown(&mut self) -> TesterResult<()> {
        let mut first_error = None;

        let collections: Vec<String> = self.collections.iter().rev().map(|c| c.name.clone()).collect();
        for name in collections {
            if let Err(e) = self.delete_collection_by_name(&name).await {
                stage_warn!(Stage::Provisioning, "⚠️ Teardown could not delete collection '{}': {}", name, e);
                first_error.get_or_insert(e);
            }
        }

        let configs: Vec<String> = self.configs.iter().rev().cloned().collect();
        for name in configs {
            if let Err(e) = self.delete_config_by_name(&name).await {
                stage_warn!(Stage::Provisioning, "⚠️ Teardown could not delete config '{}': {}", name, e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                stage_info!(Stage::Provisioning, "🧹 Teardown complete");
                Ok(())
            }
        }
    }

    async fn delete_collection_by_name(&mut self, name: &str) -> TesterResult<()> {
        self.admin.delete_collection(name).await?;
        self.collections.retain(|c| c.name != name);
        Ok(())
    }

    async fn delete_config_by_name(&mut self, name: &str) -> TesterResult<()> {
        let users: Vec<String> = self
            .collections
            .iter()
            .filter(|c| c.config_name == name)
            .map(|c| c.name.clone())
            .collect();

        if !users.is_empty() {
            return Err(TesterError::ConfigInUse {
                config: name.to_string(),
                collections: users,
            });
        }

        self.admin.delete_config(name).await?;
        self.configs.retain(|c| c != name);
        Ok(())
    }
}
