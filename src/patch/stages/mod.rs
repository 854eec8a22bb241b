//! Patch stages.
//!
//! The stock plan runs these in order:
//!
//! 1. **LinksStage** - link the enhancement stylesheet and script
//! 2. **FiltersStage** - new projects subtitle with filter buttons
//! 3. **CategoriesStage** - `data-categories` on each project card
//! 4. **ModalsStage** - swap in condensed project modals
//! 5. **FormStage** - point the contact form at its endpoint
//! 6. **CardStage** - add the new project card
//! 7. **AboutStage** - rewrite the biography
//! 8. **ToggleStage** - dark mode toggle button

mod about;
mod card;
mod categories;
mod filters;
mod form;
mod links;
mod modals;
mod toggle;

pub use about::AboutStage;
pub use card::CardStage;
pub use categories::CategoriesStage;
pub use filters::FiltersStage;
pub use form::FormStage;
pub use links::LinksStage;
pub use modals::ModalsStage;
pub use toggle::ToggleStage;

use crate::config::FolioConfig;

use super::{PatchError, Stage};

/// Build the stage called `name`, configured from `config`.
pub fn build(name: &str, config: &FolioConfig) -> Result<Box<dyn Stage>, PatchError> {
    let stage: Box<dyn Stage> = match name {
        "links" => Box::new(LinksStage::new(&config.links)),
        "filters" => Box::new(FiltersStage::new(&config.filters)?),
        "categories" => Box::new(CategoriesStage::new(&config.categories)?),
        "modals" => Box::new(ModalsStage::new(&config.modals)),
        "form" => Box::new(FormStage::new(&config.form)?),
        "card" => Box::new(CardStage::new(&config.card)?),
        "about" => Box::new(AboutStage::new(&config.about)?),
        "toggle" => Box::new(ToggleStage),
        other => return Err(PatchError::UnknownStage(other.to_string())),
    };
    Ok(stage)
}
