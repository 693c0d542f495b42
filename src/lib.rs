//! # field-gallery
//!
//! A terminal demo gallery of enhanced field widgets. Each tab shows a
//! live widget together with a settings panel that is not written by
//! hand: it is composed by dispatching the widget against a registry of
//! capability configurators.
//!
//! The interesting machinery lives in four modules:
//! - [`capability`]: the static contract set and its implication graph
//! - [`registry`]: the ordered configurator registry and the exact-type
//!   side-effect registry
//! - [`dispatch`]: matches one widget against the registry and collects
//!   the produced settings sections
//! - [`page`]: the control model and the composed page, cached per
//!   widget type by the [`gallery`]
//!
//! Everything else is demo wiring: the widgets themselves under
//! [`widgets`], the configurator catalog in [`configurators`], and the
//! terminal shell in [`tui`].

pub mod app;
pub mod capability;
pub mod configurators;
pub mod dispatch;
pub mod gallery;
pub mod locale;
pub mod notify;
pub mod page;
pub mod registry;
pub mod tui;
pub mod widgets;

pub use app::App;
pub use capability::{satisfies, CapabilityId};
pub use dispatch::{compose_settings, PageParts};
pub use gallery::Gallery;
pub use page::{Page, SectionSink};
pub use registry::{ConfiguratorRegistry, SetupError, SideEffectRegistry};
pub use widgets::DemoWidget;
