use crate::domain::form_data::SocialNetwork;
use serde::Deserialize;

/// Fixed identity of the sender, configured once per deployment.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Branding {
    pub logo_url: String,
    pub footer_info: String,
    pub header_background_color: String,
    /// Icons drawn on dark header backgrounds.
    pub light_icons: SocialIcons,
    /// Icons drawn on light header backgrounds.
    pub dark_icons: SocialIcons,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SocialIcons {
    pub facebook: String,
    pub instagram: String,
    pub linkedin: String,
}

impl SocialIcons {
    pub fn get(&self, network: SocialNetwork) -> &str {
        match network {
            SocialNetwork::Facebook => &self.facebook,
            SocialNetwork::Instagram => &self.instagram,
            SocialNetwork::LinkedIn => &self.linkedin,
        }
    }
}
