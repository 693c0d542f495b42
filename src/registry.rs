//! # Registries
//!
//! Two registries with deliberately different key spaces:
//!
//! - [`ConfiguratorRegistry`] maps capability contracts to configurator
//!   functions. Insertion order is a contract: it decides the vertical
//!   order of settings sections on every page. Matching is transitive
//!   over the capability graph.
//! - [`SideEffectRegistry`] maps exact runtime types to follow-up
//!   callbacks run after a locale change. Matching is strict type
//!   equality; a subtype-like widget sharing every capability does not
//!   match another type's entry.
//!
//! Both are write-once-per-key. A duplicate registration is a
//! construction-time fault that prevents startup, never a runtime error.

use std::any::TypeId;
use std::collections::HashMap;

use indexmap::IndexMap;
use thiserror::Error;

use crate::capability::CapabilityId;
use crate::page::SectionSink;
use crate::widgets::DemoWidget;

/// Fatal construction-time inconsistencies.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("a configurator is already registered for capability {0:?}")]
    DuplicateConfigurator(CapabilityId),
    #[error("widget type {0} is demonstrated twice")]
    DuplicateWidget(&'static str),
    #[error("a side effect is already registered for type {0}")]
    DuplicateSideEffect(&'static str),
}

/// Builds the settings controls for one capability.
pub type Configurator = Box<dyn Fn(&mut dyn DemoWidget, &mut SectionSink)>;

/// Capability contract to configurator, in registration order.
pub struct ConfiguratorRegistry {
    entries: IndexMap<CapabilityId, Configurator>,
}

impl ConfiguratorRegistry {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Registers the configurator for a capability. Each capability may
    /// be registered at most once.
    pub fn register<F>(&mut self, capability: CapabilityId, configurator: F) -> Result<(), SetupError>
    where
        F: Fn(&mut dyn DemoWidget, &mut SectionSink) + 'static,
    {
        if self.entries.contains_key(&capability) {
            return Err(SetupError::DuplicateConfigurator(capability));
        }
        self.entries.insert(capability, Box::new(configurator));
        Ok(())
    }

    /// Registered pairs in the exact order they were registered.
    pub fn entries(&self) -> impl Iterator<Item = (CapabilityId, &Configurator)> {
        self.entries.iter().map(|(cap, c)| (*cap, c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ConfiguratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

type SideEffect = Box<dyn Fn(&mut dyn DemoWidget)>;

/// Exact-type-keyed follow-up callbacks for the locale-change flow.
pub struct SideEffectRegistry {
    entries: HashMap<TypeId, SideEffect>,
}

impl SideEffectRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registers a follow-up for the exact type `W`. The callback is
    /// typed, so no cast is needed at the call site; the downcast here
    /// cannot fail because [`Self::run_for`] matches on `TypeId` first.
    pub fn register<W, F>(&mut self, effect: F) -> Result<(), SetupError>
    where
        W: DemoWidget,
        F: Fn(&mut W) + 'static,
    {
        let key = TypeId::of::<W>();
        if self.entries.contains_key(&key) {
            return Err(SetupError::DuplicateSideEffect(std::any::type_name::<W>()));
        }
        self.entries.insert(
            key,
            Box::new(move |widget: &mut dyn DemoWidget| {
                let name = widget.type_name();
                match widget.as_any_mut().downcast_mut::<W>() {
                    Some(concrete) => effect(concrete),
                    None => panic!(
                        "side effect for {} invoked against {name}",
                        std::any::type_name::<W>()
                    ),
                }
            }),
        );
        Ok(())
    }

    /// Runs the follow-up registered for the widget's concrete type, if
    /// any. Returns whether one ran; a miss is normal.
    pub fn run_for(&self, widget: &mut dyn DemoWidget) -> bool {
        let key = widget.as_any().type_id();
        match self.entries.get(&key) {
            Some(effect) => {
                effect(widget);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SideEffectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::number::{DecimalField, IntegerField};

    #[test]
    fn registration_order_is_preserved() {
        let mut registry = ConfiguratorRegistry::new();
        registry
            .register(CapabilityId::HasLocale, |_, _| {})
            .unwrap();
        registry
            .register(CapabilityId::HasValue, |_, _| {})
            .unwrap();
        registry
            .register(CapabilityId::CanSelectText, |_, _| {})
            .unwrap();
        let order: Vec<_> = registry.entries().map(|(cap, _)| cap).collect();
        assert_eq!(
            order,
            vec![
                CapabilityId::HasLocale,
                CapabilityId::HasValue,
                CapabilityId::CanSelectText
            ]
        );
    }

    #[test]
    fn duplicate_configurator_is_rejected() {
        let mut registry = ConfiguratorRegistry::new();
        registry.register(CapabilityId::HasValue, |_, _| {}).unwrap();
        let err = registry.register(CapabilityId::HasValue, |_, _| {});
        assert!(matches!(
            err,
            Err(SetupError::DuplicateConfigurator(CapabilityId::HasValue))
        ));
    }

    #[test]
    fn entries_iteration_restarts() {
        let mut registry = ConfiguratorRegistry::new();
        registry.register(CapabilityId::HasValue, |_, _| {}).unwrap();
        assert_eq!(registry.entries().count(), 1);
        assert_eq!(registry.entries().count(), 1);
    }

    #[test]
    fn side_effect_matches_exact_type_only() {
        let mut effects = SideEffectRegistry::new();
        effects
            .register::<IntegerField, _>(|f| f.set_maximum_integer_digits(2))
            .unwrap();

        let mut integer = IntegerField::new("i", 6);
        let mut decimal = DecimalField::new("d", 8, 4, 1);
        assert!(effects.run_for(&mut integer));
        assert!(!effects.run_for(&mut decimal));
        assert_eq!(integer.maximum_integer_digits(), 2);
        assert_eq!(decimal.maximum_integer_digits(), 8);
    }

    #[test]
    fn duplicate_side_effect_is_rejected() {
        let mut effects = SideEffectRegistry::new();
        effects.register::<IntegerField, _>(|_| {}).unwrap();
        assert!(matches!(
            effects.register::<IntegerField, _>(|_| {}),
            Err(SetupError::DuplicateSideEffect(_))
        ));
    }
}
