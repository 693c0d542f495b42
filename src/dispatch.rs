//! # Dispatch Engine
//!
//! Matches one widget instance against the configurator registry and
//! runs every configurator whose capability the widget satisfies,
//! directly or through the capability graph.
//!
//! The walk order is the registry's registration order, never the
//! contract declaration order and never anything derived from the
//! widget. Each matching configurator runs exactly once per
//! composition; capabilities without a registered configurator are
//! skipped silently.

use crate::capability::satisfies;
use crate::page::{Listener, SectionSink, SettingsSection};
use crate::registry::ConfiguratorRegistry;
use crate::widgets::DemoWidget;

/// Everything the configurators produced for one widget.
pub struct PageParts {
    /// One section per satisfied, registered capability, in
    /// registration order.
    pub sections: Vec<SettingsSection>,
    /// Listeners attached across all configurator runs.
    pub listeners: Vec<Listener>,
}

/// Runs the registry against one widget.
pub fn compose_settings(
    widget: &mut dyn DemoWidget,
    registry: &ConfiguratorRegistry,
) -> PageParts {
    let declared = widget.capabilities();
    let mut sink = SectionSink::new();
    let mut sections = Vec::new();
    for (capability, configurator) in registry.entries() {
        if !satisfies(declared, capability) {
            continue;
        }
        configurator(widget, &mut sink);
        sections.push(SettingsSection {
            capability,
            groups: sink.take_groups(),
        });
    }
    tracing::debug!(
        widget = widget.type_name(),
        sections = sections.len(),
        "composed settings"
    );
    PageParts {
        sections,
        listeners: sink.take_listeners(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CapabilityId;
    use crate::page::Control;
    use crate::widgets::FieldEvent;
    use ratatui::{layout::Rect, Frame};

    struct Probe {
        caps: &'static [CapabilityId],
    }

    impl DemoWidget for Probe {
        fn type_name(&self) -> &'static str {
            "Probe"
        }

        fn capabilities(&self) -> &'static [CapabilityId] {
            self.caps
        }

        fn render(&mut self, _frame: &mut Frame, _area: Rect, _captured: bool) {}

        fn drain_events(&mut self) -> Vec<FieldEvent> {
            Vec::new()
        }

        crate::impl_widget_any!();
    }

    fn noop_registry(caps: &[CapabilityId]) -> ConfiguratorRegistry {
        let mut registry = ConfiguratorRegistry::new();
        for cap in caps {
            registry
                .register(*cap, |_, sink| sink.group(vec![Control::note("n")]))
                .unwrap();
        }
        registry
    }

    #[test]
    fn matches_in_registration_order() {
        let registry = noop_registry(&[
            CapabilityId::HasLocale,
            CapabilityId::HasValue,
            CapabilityId::CanSelectText,
        ]);
        let mut probe = Probe {
            caps: &[CapabilityId::NumberFieldBase],
        };
        let parts = compose_settings(&mut probe, &registry);
        let order: Vec<_> = parts.sections.iter().map(|s| s.capability).collect();
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
    fn transitive_satisfaction_produces_a_section() {
        let registry = noop_registry(&[CapabilityId::HasValue]);
        let mut probe = Probe {
            caps: &[CapabilityId::TabStripContract],
        };
        let parts = compose_settings(&mut probe, &registry);
        assert_eq!(parts.sections.len(), 1);
        assert_eq!(parts.sections[0].capability, CapabilityId::HasValue);
    }

    #[test]
    fn no_section_for_unsatisfied_capability() {
        let registry = noop_registry(&[CapabilityId::HasDatePattern]);
        let mut probe = Probe {
            caps: &[CapabilityId::HasValue],
        };
        let parts = compose_settings(&mut probe, &registry);
        assert!(parts.sections.is_empty());
    }

    #[test]
    fn satisfied_but_unregistered_capability_is_skipped() {
        let registry = noop_registry(&[CapabilityId::CanSelectText]);
        let mut probe = Probe {
            caps: &[
                CapabilityId::CanSelectText,
                CapabilityId::TextSelectionNotifier,
            ],
        };
        let parts = compose_settings(&mut probe, &registry);
        assert_eq!(parts.sections.len(), 1);
    }

    #[test]
    fn composition_is_repeatable() {
        let registry = noop_registry(&[CapabilityId::HasValue, CapabilityId::HasLocale]);
        let mut probe = Probe {
            caps: &[CapabilityId::NumberFieldBase],
        };
        let first: Vec<_> = compose_settings(&mut probe, &registry)
            .sections
            .iter()
            .map(|s| s.label())
            .collect();
        let second: Vec<_> = compose_settings(&mut probe, &registry)
            .sections
            .iter()
            .map(|s| s.label())
            .collect();
        assert_eq!(first, second);
    }
}
