use crate::core::config::MapConfig;

/// What the current deployment can render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapCapabilities {
    /// Leaflet is offered to the browser
    pub widget: bool,
    /// Google Static Maps key, if any
    pub static_image_key: Option<String>,
    /// OpenStreetMap export iframe is allowed
    pub embed: bool,
}

impl From<&MapConfig> for MapCapabilities {
    fn from(config: &MapConfig) -> Self {
        Self {
            widget: config.widget_enabled,
            static_image_key: config.google_maps_api_key.clone(),
            embed: config.embed_enabled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapStrategy {
    Widget,
    StaticImage,
    Embed,
    Text,
}

/// First available strategy in the order widget, static image, embed, text
pub fn select_strategy(capabilities: &MapCapabilities) -> MapStrategy {
    if capabilities.widget {
        MapStrategy::Widget
    } else if capabilities.static_image_key.is_some() {
        MapStrategy::StaticImage
    } else if capabilities.embed {
        MapStrategy::Embed
    } else {
        MapStrategy::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_wins_when_available() {
        let caps = MapCapabilities {
            widget: true,
            static_image_key: Some("key".into()),
            embed: true,
        };
        assert_eq!(select_strategy(&caps), MapStrategy::Widget);
    }

    #[test]
    fn test_no_widget_no_key_uses_embed() {
        let caps = MapCapabilities {
            widget: false,
            static_image_key: None,
            embed: true,
        };
        assert_eq!(select_strategy(&caps), MapStrategy::Embed);
    }

    #[test]
    fn test_static_image_before_embed() {
        let caps = MapCapabilities {
            widget: false,
            static_image_key: Some("key".into()),
            embed: true,
        };
        assert_eq!(select_strategy(&caps), MapStrategy::StaticImage);
    }

    #[test]
    fn test_nothing_available_is_text() {
        assert_eq!(select_strategy(&MapCapabilities::default()), MapStrategy::Text);
    }
}
