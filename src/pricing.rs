//! Rate-card guidance for sponsored content and freelance work.
//!
//! Base rates follow the SA market heuristics the original guidance
//! used: follower-scaled rates for social platforms, an hourly rate for
//! freelance work, with a content-type multiplier and a +/-30% band.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Where the work is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Instagram,
    TikTok,
    YouTube,
    Freelance,
}

/// What is being delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    SinglePost,
    StorySeries,
    Campaign,
    Video,
    Reel,
}

impl ContentType {
    fn multiplier(&self) -> Decimal {
        match self {
            ContentType::SinglePost => dec!(1),
            ContentType::StorySeries => dec!(0.6),
            ContentType::Campaign => dec!(5),
            ContentType::Video => dec!(1.5),
            ContentType::Reel => dec!(1.2),
        }
    }
}

/// Suggested price band in whole rand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceGuide {
    pub minimum: Decimal,
    pub recommended: Decimal,
    pub maximum: Decimal,
}

/// Suggest a price band for one piece of content.
///
/// Instagram/TikTok price per 10k followers at R300; YouTube per 1k
/// subscribers at R500; freelance work uses the hourly rate (default
/// R300 when none is set).
pub fn suggest_price(
    platform: Platform,
    followers: u64,
    hourly_rate: Option<Decimal>,
    content: ContentType,
) -> PriceGuide {
    let followers = Decimal::from(followers);
    let base_rate = match platform {
        Platform::Instagram | Platform::TikTok => followers / dec!(10000) * dec!(300),
        Platform::YouTube => followers / dec!(1000) * dec!(500),
        Platform::Freelance => hourly_rate.unwrap_or(dec!(300)),
    };

    let price = base_rate * content.multiplier();
    PriceGuide {
        minimum: round_rand(price * dec!(0.7)),
        recommended: round_rand(price),
        maximum: round_rand(price * dec!(1.3)),
    }
}

fn round_rand(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instagram_scales_with_followers() {
        let guide = suggest_price(Platform::Instagram, 50_000, None, ContentType::SinglePost);
        // 50,000 / 10,000 * 300 = 1,500
        assert_eq!(guide.recommended, dec!(1500));
        assert_eq!(guide.minimum, dec!(1050));
        assert_eq!(guide.maximum, dec!(1950));
    }

    #[test]
    fn youtube_uses_per_thousand_rate() {
        let guide = suggest_price(Platform::YouTube, 20_000, None, ContentType::SinglePost);
        // 20,000 / 1,000 * 500 = 10,000
        assert_eq!(guide.recommended, dec!(10000));
    }

    #[test]
    fn freelance_uses_hourly_rate() {
        let guide = suggest_price(
            Platform::Freelance,
            0,
            Some(dec!(850)),
            ContentType::SinglePost,
        );
        assert_eq!(guide.recommended, dec!(850));

        let default_rate = suggest_price(Platform::Freelance, 0, None, ContentType::SinglePost);
        assert_eq!(default_rate.recommended, dec!(300));
    }

    #[test]
    fn content_multipliers_apply() {
        let campaign = suggest_price(Platform::TikTok, 10_000, None, ContentType::Campaign);
        // base 300, campaign multiplier 5
        assert_eq!(campaign.recommended, dec!(1500));

        let stories = suggest_price(Platform::TikTok, 10_000, None, ContentType::StorySeries);
        assert_eq!(stories.recommended, dec!(180));
    }

    #[test]
    fn band_rounds_to_whole_rand() {
        let guide = suggest_price(Platform::Instagram, 12_345, None, ContentType::Reel);
        // base 370.35, reel 1.2 -> 444.42; band rounds each bound
        assert_eq!(guide.recommended, dec!(444));
        assert_eq!(guide.minimum, dec!(311));
        assert_eq!(guide.maximum, dec!(578));
    }
}
