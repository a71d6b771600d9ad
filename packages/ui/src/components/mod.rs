//! Shared presentational components.

pub mod accordion;
pub mod autocomplete;
pub mod button;
pub mod feedback;
pub mod filter_panel;
pub mod footer;
pub mod form_field;
pub mod header;
pub mod hero;
pub mod input;
pub mod markdown;
pub mod modal_overlay;
pub mod project_card;
pub mod slider;
pub mod step_indicator;
pub mod tag_badge;

pub use accordion::{Accordion, AccordionItem};
pub use autocomplete::{Autocomplete, CatalogItem, CatalogKind};
pub use button::{Button, ButtonVariant};
pub use feedback::{EmptyState, ErrorBanner, Spinner};
pub use filter_panel::FilterPanel;
pub use footer::Footer;
pub use form_field::FormField;
pub use header::Header;
pub use hero::Hero;
pub use input::{Input, Label, Textarea};
pub use markdown::Markdown;
pub use modal_overlay::ModalOverlay;
pub use project_card::{ProjectCard, StatusBadge};
pub use slider::{Slide, Slider};
pub use step_indicator::StepIndicator;
pub use tag_badge::TagBadge;
