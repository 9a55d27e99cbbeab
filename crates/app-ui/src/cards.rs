//! Example components composed from the primitives
//!
//! Showcase cards used by the component-library preview: each one is a
//! plain props struct that lowers into the primitives from
//! [`components`](crate::components).

use serde::{Deserialize, Serialize};

use crate::components::{
    Avatar, Badge, Button, ButtonVariant, Card, CardBody, CardFooter, CardHeader, Image,
};

/// Product card with image, price, and an add-to-cart action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    /// Product name
    pub name: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Formatted price, e.g. "$24.00"
    pub price: String,
    /// Product image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Badge text, e.g. "Sale"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

impl ProductCard {
    /// Create a product card
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self { name: name.into(), price: price.into(), ..Self::default() }
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the product image
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Set the badge text
    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    /// The image primitive, when an image is set
    pub fn image(&self) -> Option<Image> {
        self.image_url
            .as_ref()
            .map(|url| Image::new(url.clone()).alt(self.name.clone()))
    }

    /// The badge primitive, when badge text is set
    pub fn badge_component(&self) -> Option<Badge> {
        self.badge.as_ref().map(|b| Badge::new(b.clone()).tone("accent"))
    }

    /// Lower into a [`Card`]
    pub fn to_card(&self) -> Card {
        Card::new()
            .header(CardHeader::new(self.name.clone()).subtitle(self.price.clone()))
            .body(CardBody::new(self.description.clone()))
            .footer(CardFooter::new(vec![Button::new("Add to cart")]))
            .class("card-product")
    }
}

/// Blog post card with excerpt and author line
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogCard {
    /// Post title
    pub title: String,
    /// Short excerpt
    #[serde(default)]
    pub excerpt: String,
    /// Author display name
    pub author: String,
    /// Publish date, e.g. "2026-08-01"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    /// Cover image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

impl BlogCard {
    /// Create a blog card
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self { title: title.into(), author: author.into(), ..Self::default() }
    }

    /// Set the excerpt
    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    /// Set the publish date
    pub fn published_at(mut self, date: impl Into<String>) -> Self {
        self.published_at = Some(date.into());
        self
    }

    /// Set the cover image
    pub fn cover_url(mut self, url: impl Into<String>) -> Self {
        self.cover_url = Some(url.into());
        self
    }

    /// The author's avatar
    pub fn author_avatar(&self) -> Avatar {
        Avatar::new(self.author.clone())
    }

    /// Lower into a [`Card`]
    pub fn to_card(&self) -> Card {
        let subtitle = match &self.published_at {
            Some(date) => format!("{} · {}", self.author, date),
            None => self.author.clone(),
        };

        Card::new()
            .header(CardHeader::new(self.title.clone()).subtitle(subtitle))
            .body(CardBody::new(self.excerpt.clone()))
            .footer(CardFooter::new(vec![
                Button::new("Read more").variant(ButtonVariant::Ghost)
            ]))
            .class("card-blog")
    }
}

/// Profile card with avatar, bio, and follow action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCard {
    /// Display name
    pub name: String,
    /// Role or tagline
    #[serde(default)]
    pub role: String,
    /// Short bio
    #[serde(default)]
    pub bio: String,
    /// Avatar image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Whether the viewer already follows this profile
    #[serde(default)]
    pub following: bool,
}

impl ProfileCard {
    /// Create a profile card
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Set the role line
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Set the bio
    pub fn bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    /// Set the avatar image
    pub fn avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    /// Mark the profile as followed
    pub fn following(mut self, following: bool) -> Self {
        self.following = following;
        self
    }

    /// The avatar primitive
    pub fn avatar(&self) -> Avatar {
        let avatar = Avatar::new(self.name.clone());
        match &self.avatar_url {
            Some(url) => avatar.src(url.clone()),
            None => avatar,
        }
    }

    /// Lower into a [`Card`]
    pub fn to_card(&self) -> Card {
        let action = if self.following {
            Button::new("Following").variant(ButtonVariant::Outline)
        } else {
            Button::new("Follow")
        };

        Card::new()
            .header(CardHeader::new(self.name.clone()).subtitle(self.role.clone()))
            .body(CardBody::new(self.bio.clone()))
            .footer(CardFooter::new(vec![action]))
            .class("card-profile")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ImageState;

    #[test]
    fn test_product_card_lowers_to_primitives() {
        let product = ProductCard::new("Desk Lamp", "$24.00")
            .description("Warm light, cold steel")
            .image_url("https://cdn.test/lamp.png")
            .badge("Sale");

        let card = product.to_card();
        assert_eq!(card.header.as_ref().unwrap().title, "Desk Lamp");
        assert_eq!(card.header.unwrap().subtitle.as_deref(), Some("$24.00"));
        assert_eq!(card.footer.unwrap().actions[0].label, "Add to cart");

        let image = product.image().unwrap();
        assert_eq!(image.alt, "Desk Lamp");
        assert_eq!(image.state, ImageState::Loading);

        assert_eq!(product.badge_component().unwrap().classes(), "badge badge-accent");
    }

    #[test]
    fn test_blog_card_subtitle_includes_date() {
        let blog = BlogCard::new("On Naming", "Ada Lovelace").published_at("2026-08-01");
        let subtitle = blog.to_card().header.unwrap().subtitle.unwrap();
        assert_eq!(subtitle, "Ada Lovelace · 2026-08-01");

        assert_eq!(blog.author_avatar().initials(), "AL");
    }

    #[test]
    fn test_profile_card_follow_state() {
        let profile = ProfileCard::new("Grace Hopper").role("Engineer");

        let follow = profile.clone().to_card().footer.unwrap().actions.remove(0);
        assert_eq!(follow.label, "Follow");
        assert_eq!(follow.variant, ButtonVariant::Primary);

        let following = profile.following(true).to_card().footer.unwrap().actions.remove(0);
        assert_eq!(following.label, "Following");
        assert_eq!(following.variant, ButtonVariant::Outline);
    }
}
