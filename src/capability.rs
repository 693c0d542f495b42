//! # Capability Contracts
//!
//! Every demonstrated widget advertises a static set of capability
//! contracts. A contract names a behavior (a value, a locale, text
//! selection, ...) that the configurator catalog knows how to build
//! controls for. Contracts can imply other contracts, the way an
//! interface extends other interfaces: a widget declaring only
//! [`CapabilityId::NumberFieldBase`] also satisfies `HasValue`,
//! `CanSelectText` and friends through the implication graph.
//!
//! The whole set is fixed at compile time. Nothing here is registered,
//! created or destroyed at runtime; satisfaction checks walk static data.

/// Identity of one capability contract.
///
/// Used as the key of the configurator registry and as the label source
/// for the settings section each configurator produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityId {
    /// Text content can be selected and deselected programmatically.
    CanSelectText,
    /// Exposes a value and a read-only toggle, and reports value changes.
    HasValue,
    /// Shared behavior of the numeric fields (grouping, autoselect,
    /// prefix/suffix, alignment).
    NumberFieldBase,
    /// An empty input may represent a null value instead of reverting.
    NullValueAllowed,
    /// Formatting follows a settable locale.
    HasLocale,
    /// Grid of generated cells with a configurable column count.
    ItemGridContract,
    /// Date display follows a settable pattern.
    HasDatePattern,
    /// Tab strip with configurable title layout and content style.
    TabStripContract,
    /// Intercepts application exit and reports the attempt.
    UnloadNotifier,
    /// Reports when the widget gains input focus.
    FocusNotifier,
    /// Reports when the widget loses input focus.
    BlurNotifier,
    /// Intermediate contract of all text-backed inputs. Not configured
    /// directly; exists to carry implications.
    TextInputBase,
    /// Selection may also be initiated from the keyboard, not only from
    /// the select-all/select-none controls.
    TerminalSelectionSource,
    /// Emits an event carrying the currently selected text.
    TextSelectionNotifier,
}

impl CapabilityId {
    /// Every contract, in declaration order. Handy for exhaustiveness
    /// checks in tests.
    pub const ALL: [CapabilityId; 14] = [
        CapabilityId::CanSelectText,
        CapabilityId::HasValue,
        CapabilityId::NumberFieldBase,
        CapabilityId::NullValueAllowed,
        CapabilityId::HasLocale,
        CapabilityId::ItemGridContract,
        CapabilityId::HasDatePattern,
        CapabilityId::TabStripContract,
        CapabilityId::UnloadNotifier,
        CapabilityId::FocusNotifier,
        CapabilityId::BlurNotifier,
        CapabilityId::TextInputBase,
        CapabilityId::TerminalSelectionSource,
        CapabilityId::TextSelectionNotifier,
    ];

    /// Human-readable label, used in section headers.
    pub fn label(self) -> &'static str {
        match self {
            CapabilityId::CanSelectText => "text selection",
            CapabilityId::HasValue => "value",
            CapabilityId::NumberFieldBase => "number field basics",
            CapabilityId::NullValueAllowed => "optional null value",
            CapabilityId::HasLocale => "locale",
            CapabilityId::ItemGridContract => "item grid",
            CapabilityId::HasDatePattern => "date display pattern",
            CapabilityId::TabStripContract => "tab strip",
            CapabilityId::UnloadNotifier => "exit interception",
            CapabilityId::FocusNotifier => "focus notification",
            CapabilityId::BlurNotifier => "blur notification",
            CapabilityId::TextInputBase => "text input basics",
            CapabilityId::TerminalSelectionSource => "keyboard selection",
            CapabilityId::TextSelectionNotifier => "selection notification",
        }
    }

    /// Contracts directly implied by this one. Satisfaction is the
    /// transitive closure over these edges.
    pub fn implies(self) -> &'static [CapabilityId] {
        match self {
            CapabilityId::NumberFieldBase => {
                &[CapabilityId::TextInputBase, CapabilityId::HasLocale]
            }
            CapabilityId::TextInputBase => &[
                CapabilityId::HasValue,
                CapabilityId::CanSelectText,
                CapabilityId::FocusNotifier,
                CapabilityId::BlurNotifier,
            ],
            CapabilityId::ItemGridContract => &[
                CapabilityId::HasValue,
                CapabilityId::FocusNotifier,
                CapabilityId::BlurNotifier,
            ],
            CapabilityId::TabStripContract => &[CapabilityId::HasValue],
            _ => &[],
        }
    }

    fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// Tests whether a widget with the given directly-declared contracts
/// satisfies `target`, following implication edges any number of hops.
pub fn satisfies(direct: &[CapabilityId], target: CapabilityId) -> bool {
    let mut seen = 0u32;
    let mut stack: Vec<CapabilityId> = direct.to_vec();
    while let Some(cap) = stack.pop() {
        if cap == target {
            return true;
        }
        if seen & cap.bit() != 0 {
            continue;
        }
        seen |= cap.bit();
        stack.extend_from_slice(cap.implies());
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_declaration_satisfies() {
        assert!(satisfies(&[CapabilityId::HasValue], CapabilityId::HasValue));
    }

    #[test]
    fn unrelated_contract_does_not_satisfy() {
        assert!(!satisfies(
            &[CapabilityId::HasValue],
            CapabilityId::HasLocale
        ));
    }

    #[test]
    fn one_hop_implication() {
        assert!(satisfies(
            &[CapabilityId::TabStripContract],
            CapabilityId::HasValue
        ));
    }

    #[test]
    fn two_hop_implication() {
        // NumberFieldBase -> TextInputBase -> CanSelectText
        assert!(satisfies(
            &[CapabilityId::NumberFieldBase],
            CapabilityId::CanSelectText
        ));
        assert!(satisfies(
            &[CapabilityId::NumberFieldBase],
            CapabilityId::BlurNotifier
        ));
    }

    #[test]
    fn implication_is_directed() {
        // HasValue does not satisfy the contracts that imply it.
        assert!(!satisfies(
            &[CapabilityId::HasValue],
            CapabilityId::TabStripContract
        ));
        assert!(!satisfies(
            &[CapabilityId::TextInputBase],
            CapabilityId::NumberFieldBase
        ));
    }

    #[test]
    fn empty_declaration_satisfies_nothing() {
        for cap in CapabilityId::ALL {
            assert!(!satisfies(&[], cap));
        }
    }
}
