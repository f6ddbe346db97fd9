//! Keyed collection of live form instances

use std::collections::HashMap;

use jsonform_core::prelude::*;
use jsonform_core::FormData;
use jsonform_ui::{UiEvent, UiTree};

use crate::form::{FormInstance, SubmitHandler};

/// Instance key used when the host does not name one
pub const DEFAULT_KEY: &str = "default";

/// Manages every form created by one engine
#[derive(Debug, Default)]
pub struct FormManager {
    /// Live instances indexed by key
    instances: HashMap<String, FormInstance>,

    /// Keys in creation order
    order: Vec<String>,

    /// Handlers registered before their form was created
    pending: HashMap<String, SubmitHandler>,
}

impl FormManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.instances.contains_key(key)
    }

    /// Fail with [`Error::DuplicateInstance`] when `key` is taken
    pub fn ensure_free(&self, key: &str) -> Result<()> {
        if self.contains(key) {
            return Err(Error::duplicate_instance(key));
        }
        Ok(())
    }

    /// Store a freshly built instance, attaching any pending submit handler
    pub fn insert(&mut self, mut instance: FormInstance) -> Result<()> {
        self.ensure_free(&instance.key)?;
        if let Some(handler) = self.pending.remove(&instance.key) {
            instance.submit_handler = Some(handler);
        }
        self.order.push(instance.key.clone());
        self.instances.insert(instance.key.clone(), instance);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&FormInstance> {
        self.instances.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut FormInstance> {
        self.instances.get_mut(key)
    }

    /// Release an instance; the caller removes its subtree
    pub fn remove(&mut self, key: &str) -> Option<FormInstance> {
        self.order.retain(|k| k != key);
        self.pending.remove(key);
        self.instances.remove(key)
    }

    /// Replace the submit handler of `key`, now or once it is created
    pub fn register_submit(&mut self, key: &str, handler: SubmitHandler) {
        match self.instances.get_mut(key) {
            Some(instance) => instance.submit_handler = Some(handler),
            None => {
                debug!("Submit handler for '{}' stored until the form is created", key);
                self.pending.insert(key.to_string(), handler);
            }
        }
    }

    /// Call the form's submit handler, or log when none is registered
    pub fn dispatch_submit(&mut self, key: &str, valid: bool, data: Option<FormData>) {
        match self
            .instances
            .get_mut(key)
            .and_then(|i| i.submit_handler.as_mut())
        {
            Some(handler) => handler.call(valid, data),
            None => info!("Unhandled submit for form '{}'", key),
        }
    }

    /// Key of the form that has a listener for `event`
    pub fn owner_of(&self, tree: &dyn UiTree, event: &UiEvent) -> Option<&str> {
        self.order
            .iter()
            .find(|key| {
                self.instances
                    .get(key.as_str())
                    .is_some_and(|i| i.listeners.resolve(tree, event).is_some())
            })
            .map(String::as_str)
    }

    /// Keys in creation order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
