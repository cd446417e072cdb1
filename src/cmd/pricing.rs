//! Pricing command - suggested rate band for sponsored content

use crate::money::format_zar;
use crate::pricing::{suggest_price, ContentType, Platform};
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct PricingCommand {
    /// Platform the content is delivered on
    #[arg(short, long, value_enum)]
    platform: PlatformArg,

    /// Follower or subscriber count on the platform
    #[arg(short, long, default_value_t = 10000)]
    followers: u64,

    /// Hourly rate for freelance work
    #[arg(long)]
    hourly_rate: Option<Decimal>,

    /// Type of content being priced
    #[arg(short, long, value_enum, default_value_t = ContentArg::SinglePost)]
    content: ContentArg,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PlatformArg {
    Instagram,
    Tiktok,
    Youtube,
    Freelance,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Instagram => Platform::Instagram,
            PlatformArg::Tiktok => Platform::TikTok,
            PlatformArg::Youtube => Platform::YouTube,
            PlatformArg::Freelance => Platform::Freelance,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ContentArg {
    #[default]
    SinglePost,
    StorySeries,
    Campaign,
    Video,
    Reel,
}

impl From<ContentArg> for ContentType {
    fn from(arg: ContentArg) -> Self {
        match arg {
            ContentArg::SinglePost => ContentType::SinglePost,
            ContentArg::StorySeries => ContentType::StorySeries,
            ContentArg::Campaign => ContentType::Campaign,
            ContentArg::Video => ContentType::Video,
            ContentArg::Reel => ContentType::Reel,
        }
    }
}

#[derive(Debug, Serialize)]
struct PricingOutput {
    minimum: String,
    recommended: String,
    maximum: String,
}

impl PricingCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let guide = suggest_price(
            self.platform.into(),
            self.followers,
            self.hourly_rate,
            self.content.into(),
        );

        if self.json {
            let output = PricingOutput {
                minimum: format!("{:.2}", guide.minimum),
                recommended: format!("{:.2}", guide.recommended),
                maximum: format!("{:.2}", guide.maximum),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!();
            println!("SUGGESTED PRICING (based on SA market rates)");
            println!();
            println!("  Minimum:     {}", format_zar(guide.minimum));
            println!("  Recommended: {}", format_zar(guide.recommended));
            println!("  Maximum:     {}", format_zar(guide.maximum));
            println!();
            println!("  Start at the recommended rate and adjust for engagement.");
            println!();
        }
        Ok(())
    }
}
