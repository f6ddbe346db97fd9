//! Engine state: registries, settings and live form instances

use jsonform_ui::theme::builtin;
use jsonform_ui::{Theme, ThemeRegistry};

use crate::config::EngineSettings;
use crate::form::FormInstance;
use crate::form_manager::FormManager;
use crate::registry::FieldRegistry;

/// Everything the update loop reads and mutates
#[derive(Debug)]
pub struct EngineState {
    pub settings: EngineSettings,
    pub registry: FieldRegistry,
    pub themes: ThemeRegistry,
    pub forms: FormManager,
    /// Used when neither the configured theme nor `plain` is registered
    fallback_theme: Theme,
}

impl EngineState {
    /// State with the built-in field kinds and themes registered
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            registry: FieldRegistry::with_builtin(),
            themes: ThemeRegistry::with_builtin(),
            forms: FormManager::new(),
            fallback_theme: builtin::plain(),
        }
    }

    /// The configured theme, falling back to `plain`
    pub fn theme(&self) -> &Theme {
        resolve_theme(&self.themes, &self.settings, &self.fallback_theme)
    }

    /// Whether the configured theme is registered
    ///
    /// Lookups fall back to `plain` silently; call this where a missing theme
    /// should be reported.
    pub fn has_configured_theme(&self) -> bool {
        self.themes.contains(&self.settings.engine.theme)
    }

    /// Shared read-only context plus one mutable form instance
    pub(crate) fn split(&mut self, key: &str) -> Option<(Ctx<'_>, &mut FormInstance)> {
        let EngineState {
            settings,
            registry,
            themes,
            forms,
            fallback_theme,
        } = self;
        let instance = forms.get_mut(key)?;
        let ctx = Ctx {
            settings,
            registry,
            theme: resolve_theme(themes, settings, fallback_theme),
        };
        Some((ctx, instance))
    }

    /// Read-only context without a form instance
    pub(crate) fn ctx(&self) -> Ctx<'_> {
        Ctx {
            settings: &self.settings,
            registry: &self.registry,
            theme: self.theme(),
        }
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

fn resolve_theme<'a>(themes: &'a ThemeRegistry, settings: &EngineSettings, fallback: &'a Theme) -> &'a Theme {
    let name = settings.engine.theme.as_str();
    if let Some(theme) = themes.get_theme(name) {
        return theme;
    }
    themes.get_theme(builtin::PLAIN).unwrap_or(fallback)
}

/// Engine-wide collaborators every field operation needs
#[derive(Debug, Clone, Copy)]
pub struct Ctx<'a> {
    pub settings: &'a EngineSettings,
    pub registry: &'a FieldRegistry,
    pub theme: &'a Theme,
}
