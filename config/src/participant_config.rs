use eyre::{
    OptionExt as _,
    Result,
};
use url::Url;

#[derive(Debug, Clone)]
pub struct ParticipantConfig {
    pub display_name: String,
    pub room_url: Url,
    pub app_config: super::Config,
}

impl ParticipantConfig {
    pub fn new(config: &super::Config, name: Option<impl ToString>) -> Result<Self> {
        let display_name = if let Some(name) = name {
            name.to_string()
        } else {
            generate_random_name()
        };
        let room_url = config.url.clone().ok_or_eyre("No room URL provided")?;
        Ok(Self {
            display_name,
            room_url,
            app_config: config.clone(),
        })
    }

    /// Room URL with the display name preset and the prejoin screen disabled,
    /// so that loading the page is enough to enter the conference.
    pub fn join_url(&self) -> Url {
        let name = url::form_urlencoded::byte_serialize(self.display_name.as_bytes())
            .collect::<String>()
            .replace('+', "%20");
        let overrides = format!("config.prejoinConfig.enabled=false&userInfo.displayName=%22{name}%22");

        let mut url = self.room_url.clone();
        let fragment = match url.fragment() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{overrides}"),
            _ => overrides,
        };
        url.set_fragment(Some(&fragment));
        url
    }
}

pub fn generate_random_name() -> String {
    names::Generator::default()
        .next()
        .unwrap_or_else(|| "meet-ui-participant".to_string())
}
