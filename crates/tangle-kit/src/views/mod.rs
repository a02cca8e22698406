//! Stock view classes, registered under their markup names.

mod adjustable;
mod conditional;
mod toggle;

pub use adjustable::AdjustableNumber;
pub use conditional::{If, IfElse, PlusMinus, Switch};
pub use toggle::Toggle;

use tangle_core::ViewRegistry;

pub fn install(views: &mut ViewRegistry) {
    views.register("TKToggle", Toggle::default);
    views.register("TKIf", If::default);
    views.register("TKIfElse", IfElse::default);
    views.register("TKPlusMinus", PlusMinus::default);
    views.register("TKSwitch", Switch::default);
    views.register("TKAdjustableNumber", AdjustableNumber::default);
}
