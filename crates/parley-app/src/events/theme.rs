use parley_io::ThemeStore;

use crate::events::EventContext;

/// Flip the theme in memory first, then persist it
pub fn handle_theme_toggle(ctx: &mut EventContext) -> anyhow::Result<()> {
    let theme = ctx.session.theme.toggled();
    ctx.session.theme = theme;
    tracing::debug!("Theme set to {}", theme.as_str());

    if let Some(store) = &ctx.services.theme_store {
        store.save(theme)?;
    }
    Ok(())
}
