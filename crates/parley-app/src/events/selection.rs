use parley_types::Slot;

use crate::events::EventContext;

pub fn handle_select(ctx: &mut EventContext, slot: Slot, code: &str) {
    match ctx.session.selection.set(&ctx.catalog, slot, code) {
        Ok(true) => tracing::debug!("{slot:?} language set to {code}"),
        Ok(false) => {}
        Err(e) => tracing::warn!("Rejected {slot:?} selection: {e}"),
    }
}

pub fn handle_swap(ctx: &mut EventContext) {
    // the swapped-in text must not be auto-translated by a timer armed for the old input
    ctx.debouncer.cancel();
    ctx.session.swap();
    tracing::debug!(
        "Swapped to {} -> {}",
        ctx.session.selection.source(),
        ctx.session.selection.target()
    );
}

pub fn handle_pick(ctx: &mut EventContext, code: &str) {
    match ctx.session.pick(&ctx.catalog, code) {
        Ok(Some(slot)) => tracing::debug!("Picked {code} for {slot:?}"),
        Ok(None) => tracing::debug!("Pick {code} with no picker open"),
        Err(e) => tracing::warn!("Rejected pick: {e}"),
    }
}
